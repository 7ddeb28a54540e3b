//! Format template parsing.
//!
//! A template is lexed into literal text and format specifiers; only the
//! specifiers are kept. Each specifier is resolved against the implicit
//! argument cursor so the matcher sees a concrete argument slot per
//! specifier.
//!
//! The accepted syntax is
//!
//! ```text
//! %[argument_index$][flags][width][.precision]conversion
//! ```
//!
//! where `flags` may include `<` to reuse the previous argument, and the
//! date/time conversions `t`/`T` take one more suffix character.

use core::fmt;

use logos::{Lexer, Logos};

use crate::config::CheckConfig;
use crate::error::TemplateError;

const FLAG_CHARS: &str = "-#+ 0,(<";

const DATE_TIME_SUFFIXES: &str = "HIklMSLNpzZsQBbhAaCYyjmdeRTrDFc";

/// What a specifier expects of its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conversion {
    /// `b B h H s S`
    General,
    /// `c C`
    Character,
    /// `d o x X`
    Integral,
    /// `e E f g G a A`
    FloatingPoint,
    /// `t T` followed by a suffix
    DateTime,
    /// `%%`
    Percent,
    /// `%n`
    LineSeparator,
}

impl Conversion {
    fn from_letter(letter: char) -> Option<Self> {
        Some(match letter {
            'b' | 'B' | 'h' | 'H' | 's' | 'S' => Conversion::General,
            'c' | 'C' => Conversion::Character,
            'd' | 'o' | 'x' | 'X' => Conversion::Integral,
            'e' | 'E' | 'f' | 'g' | 'G' | 'a' | 'A' => Conversion::FloatingPoint,
            't' | 'T' => Conversion::DateTime,
            '%' => Conversion::Percent,
            'n' => Conversion::LineSeparator,
            _ => return None,
        })
    }

    /// Percent and line-separator escapes take no argument.
    #[inline]
    pub const fn consumes_argument(self) -> bool {
        !matches!(self, Conversion::Percent | Conversion::LineSeparator)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Conversion::General => "general",
            Conversion::Character => "character",
            Conversion::Integral => "integral",
            Conversion::FloatingPoint => "floating point",
            Conversion::DateTime => "date/time",
            Conversion::Percent => "percent",
            Conversion::LineSeparator => "line separator",
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a specifier selects its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexSpec {
    /// Takes the argument at the implicit cursor and advances it.
    Next,
    /// `n$`, 1-based. Does not move the cursor.
    Explicit(usize),
    /// `<`: the argument used by the previous specifier.
    Previous,
}

/// One parsed format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionSpecifier {
    /// Source text, e.g. `%-08.3f`.
    pub text: String,
    /// Byte offset of the `%` in the template.
    pub offset: usize,
    pub index: IndexSpec,
    /// Flag characters other than `<`, in source order.
    pub flags: String,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: Conversion,
    /// The conversion character as written.
    pub letter: char,
    /// Date/time suffix for `t`/`T`.
    pub suffix: Option<char>,
    /// Zero-based argument slot, `None` for escapes.
    pub argument: Option<usize>,
}

impl fmt::Display for ConversionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl ConversionSpecifier {
    /// Parses one specifier whose text is known to match the lexer pattern.
    fn parse(text: &str, offset: usize) -> Result<Self, TemplateError> {
        let body = &text[1..];
        let mut pos = 0;

        let mut index = IndexSpec::Next;
        let index_digits = digits_at(body, pos);
        if index_digits > 0 && body[index_digits..].starts_with('$') {
            let raw = &body[..index_digits];
            let n = raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| TemplateError::InvalidIndex {
                    index: raw.to_string(),
                    offset,
                })?;
            index = IndexSpec::Explicit(n);
            pos = index_digits + 1;
        }

        let flags_len = body[pos..]
            .find(|c: char| !FLAG_CHARS.contains(c))
            .unwrap_or(body.len() - pos);
        let raw_flags = &body[pos..pos + flags_len];
        pos += flags_len;
        if raw_flags.contains('<') {
            index = IndexSpec::Previous;
        }
        let flags: String = raw_flags.chars().filter(|c| *c != '<').collect();

        let width = number_at(body, &mut pos, "width", offset)?;

        let mut precision = None;
        if body[pos..].starts_with('.') {
            pos += 1;
            precision = number_at(body, &mut pos, "precision", offset)?;
        }

        let mut rest = body[pos..].chars();
        let letter = rest.next().ok_or_else(|| TemplateError::Unterminated {
            fragment: text.to_string(),
            offset,
        })?;
        let conversion = Conversion::from_letter(letter).ok_or(TemplateError::UnknownConversion {
            conversion: letter,
            offset,
        })?;

        let suffix = if conversion == Conversion::DateTime {
            match rest.next() {
                None => {
                    return Err(TemplateError::MissingDateTimeSuffix {
                        conversion: letter,
                        offset,
                    });
                }
                Some(suffix) if DATE_TIME_SUFFIXES.contains(suffix) => Some(suffix),
                Some(suffix) => {
                    return Err(TemplateError::UnknownDateTimeSuffix { suffix, offset });
                }
            }
        } else {
            None
        };

        Ok(Self {
            text: text.to_string(),
            offset,
            index,
            flags,
            width,
            precision,
            conversion,
            letter,
            suffix,
            argument: None,
        })
    }
}

fn digits_at(s: &str, pos: usize) -> usize {
    s[pos..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len() - pos)
}

fn number_at(
    s: &str,
    pos: &mut usize,
    field: &'static str,
    offset: usize,
) -> Result<Option<usize>, TemplateError> {
    let len = digits_at(s, *pos);
    if len == 0 {
        return Ok(None);
    }
    let value = s[*pos..*pos + len]
        .parse::<usize>()
        .map_err(|_| TemplateError::InvalidNumber { field, offset })?;
    *pos += len;
    Ok(Some(value))
}

fn directive(lex: &mut Lexer<Piece>) -> Result<ConversionSpecifier, TemplateError> {
    ConversionSpecifier::parse(lex.slice(), lex.span().start)
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = TemplateError)]
enum Piece {
    #[regex(r"[^%]+", allow_greedy = true)]
    Text,

    #[regex(r"%([0-9]+\$)?[-#+ 0,(<]*[0-9]*(\.[0-9]+)?([tT][a-zA-Z]|[a-zA-Z%])", directive)]
    Directive(ConversionSpecifier),
}

/// Explains why no specifier pattern matched at `offset`.
fn diagnose(template: &str, offset: usize) -> TemplateError {
    let Some(rest) = template.get(offset..).and_then(|r| r.strip_prefix('%')) else {
        return TemplateError::Unknown;
    };
    let body_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '$' || c == '.' || FLAG_CHARS.contains(c)))
        .unwrap_or(rest.len());
    let body = &rest[..body_len];
    if let Some(dollar) = body.find('$') {
        return TemplateError::InvalidIndex {
            index: body[..dollar].to_string(),
            offset,
        };
    }
    match rest[body_len..].chars().next() {
        None => TemplateError::Unterminated {
            fragment: format!("%{rest}"),
            offset,
        },
        Some(conversion) => TemplateError::UnknownConversion { conversion, offset },
    }
}

/// A parsed template: its specifiers in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    specifiers: Vec<ConversionSpecifier>,
}

impl Template {
    /// Parses `text`, resolving every argument-consuming specifier to a slot.
    pub fn parse(text: &str, config: &CheckConfig) -> Result<Self, TemplateError> {
        if text.len() > config.max_template_len {
            return Err(TemplateError::TemplateTooLong {
                len: text.len(),
                limit: config.max_template_len,
            });
        }

        let mut lexer = Piece::lexer(text);
        let mut specifiers = Vec::new();
        let mut cursor = 0usize;
        let mut last: Option<usize> = None;

        while let Some(piece) = lexer.next() {
            match piece {
                Ok(Piece::Text) => {}
                Ok(Piece::Directive(mut spec)) => {
                    if specifiers.len() >= config.max_specifiers {
                        return Err(TemplateError::TooManySpecifiers {
                            limit: config.max_specifiers,
                        });
                    }
                    if spec.conversion.consumes_argument() {
                        let slot = match spec.index {
                            IndexSpec::Next => {
                                cursor += 1;
                                cursor - 1
                            }
                            IndexSpec::Explicit(n) => n - 1,
                            IndexSpec::Previous => last.ok_or(
                                TemplateError::NoPreviousArgument {
                                    offset: spec.offset,
                                },
                            )?,
                        };
                        spec.argument = Some(slot);
                        last = Some(slot);
                    }
                    specifiers.push(spec);
                }
                Err(TemplateError::Unknown) => return Err(diagnose(text, lexer.span().start)),
                Err(error) => return Err(error),
            }
        }

        tracing::trace!(specifiers = specifiers.len(), "parsed template");
        Ok(Self { specifiers })
    }

    pub fn specifiers(&self) -> &[ConversionSpecifier] {
        &self.specifiers
    }

    /// Specifiers that take an argument, paired with their slot.
    pub fn consuming(&self) -> impl Iterator<Item = (usize, &ConversionSpecifier)> {
        self.specifiers
            .iter()
            .filter_map(|spec| spec.argument.map(|slot| (slot, spec)))
    }

    /// Number of argument slots the template needs: the highest slot referenced, plus one.
    pub fn used(&self) -> usize {
        self.consuming().map(|(slot, _)| slot + 1).max().unwrap_or(0)
    }
}
