#![no_main]

use fmtcontract::{CheckConfig, Template};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(template) = Template::parse(s, &CheckConfig::default()) {
            let used = template.used();
            for (slot, spec) in template.consuming() {
                assert!(slot < used);
                assert!(s[spec.offset..].starts_with(&spec.text));
            }
        }
    }
});
