#![no_main]

use arbitrary::Arbitrary;
use fmtcontract::{
    ArgumentType, CheckConfig, EmptyScope, Expr, ValidationResult, validate_call,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct CallSite {
    template: String,
    trailing: Vec<ArgumentType>,
}

fuzz_target!(|site: CallSite| {
    let result = validate_call(
        &Expr::StringLiteral(site.template),
        &site.trailing,
        &EmptyScope,
        &CheckConfig::default(),
    );
    // A literal always resolves, so it can never be reported as unresolved.
    assert_ne!(result, ValidationResult::UnresolvedTemplate);
});
