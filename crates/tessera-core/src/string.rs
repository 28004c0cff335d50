//! String helpers.

/// Lowercase ASCII letters, leaving every other character intact.
pub fn to_lowercase(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Uppercase ASCII letters, leaving every other character intact.
pub fn to_uppercase(text: &str) -> String {
    text.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_mapping() {
        assert_eq!(to_lowercase("Background.PNG"), "background.png");
        assert_eq!(to_uppercase("font_16.ttf"), "FONT_16.TTF");
        assert_eq!(to_uppercase("straße"), "STRAßE");
    }
}
