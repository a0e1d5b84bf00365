//! Placeholder type-hint helpers used during regex compilation.

/// Translate a placeholder type hint into a regular-expression fragment.
///
/// Unknown hints fall back to a lazy match of any text.
///
/// # Examples
/// ```
/// use outline_patterns::get_type_pattern;
/// assert_eq!(get_type_pattern(Some("u32")), r"\d+");
/// assert_eq!(get_type_pattern(Some("word")), r"\S+");
/// assert_eq!(get_type_pattern(None), ".+?");
/// ```
#[must_use]
pub fn get_type_pattern(type_hint: Option<&str>) -> &'static str {
    match type_hint {
        Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => r"\d+",
        Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize") => r"[+-]?\d+",
        Some("f32" | "f64") => r"[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?",
        Some("bool") => r"(?:true|false)",
        Some("word") => r"\S+",
        Some("string") => r#""[^"]*""#,
        _ => r".+?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("u64"), r"\d+")]
    #[case(Some("i32"), r"[+-]?\d+")]
    #[case(Some("bool"), r"(?:true|false)")]
    #[case(Some("String"), r".+?")]
    #[case(None, r".+?")]
    fn maps_hints(#[case] hint: Option<&str>, #[case] expected: &str) {
        assert_eq!(get_type_pattern(hint), expected);
    }
}
