//! Conversion between strings and typed values.
//!
//! Parsing is lenient: surrounding whitespace is ignored and numbers accept
//! the longest leading numeric prefix, so `"42px"` reads as `42`. Text that
//! does not start with a value yields `None` (or the caller's default through
//! [`to_value`]).

/// A value that can be read from and written to text.
pub trait ParseValue: Sized {
    fn parse_value(text: &str) -> Option<Self>;

    fn format_value(&self) -> String;
}

/// Format `value` as text.
pub fn to_string<T: ParseValue>(value: &T) -> String {
    value.format_value()
}

/// Parse `text`, falling back to `default` when it holds no value.
pub fn to_value<T: ParseValue>(text: &str, default: T) -> T {
    T::parse_value(text).unwrap_or(default)
}

/// Parse `text` strictly, with no fallback.
pub fn try_parse<T: ParseValue>(text: &str) -> Option<T> {
    T::parse_value(text)
}

impl ParseValue for bool {
    /// Accepts `true`/`1`/`on` and `false`/`0`/`off`, ignoring case.
    fn parse_value(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" => Some(true),
            "false" | "0" | "off" => Some(false),
            _ => None,
        }
    }

    fn format_value(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

impl ParseValue for String {
    fn parse_value(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn format_value(&self) -> String {
        self.clone()
    }
}

/// Length of the leading integer (`[+-]?[0-9]+`) in `bytes`, or 0.
fn integer_prefix_len(bytes: &[u8]) -> usize {
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 { 0 } else { sign + digits }
}

/// Length of the leading decimal number, with optional fraction and
/// exponent, in `bytes`, or 0.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp = &bytes[end + 1..];
        let exp_len = integer_prefix_len(exp);
        if exp_len > 0 {
            end += 1 + exp_len;
        }
    }
    end
}

macro_rules! impl_parse_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(text: &str) -> Option<Self> {
                    let text = text.trim();
                    let len = integer_prefix_len(text.as_bytes());
                    text[..len].parse().ok()
                }

                fn format_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

macro_rules! impl_parse_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ParseValue for $ty {
                fn parse_value(text: &str) -> Option<Self> {
                    let text = text.trim();
                    let len = float_prefix_len(text.as_bytes());
                    text[..len].parse().ok()
                }

                fn format_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_parse_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);
impl_parse_float!(f32, f64);
