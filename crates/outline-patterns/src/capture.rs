//! Regex capture helpers used when a step definition matches step text.

use regex::Regex;

/// One captured placeholder value and where it starts in the matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedValue {
    /// Captured text; empty when an optional group did not participate.
    pub value: String,
    /// Byte offset of the capture, `None` when the group did not participate.
    pub offset: Option<usize>,
}

/// Extract the placeholder captures when `text` matches `re`, returning `None`
/// otherwise.
///
/// Capture group 0 (the full match) is skipped so only placeholders contribute
/// to the result. Groups that do not participate keep their slot with an
/// empty value, preserving positional alignment.
///
/// # Examples
/// ```
/// # use regex::Regex;
/// # use outline_patterns::extract_captured_values;
/// let regex = Regex::new(r"^(\d+)-(\w+)$").expect("valid regex");
/// let values = extract_captured_values(&regex, "42-answer").expect("text matches");
/// assert_eq!(values[1].value, "answer");
/// assert_eq!(values[1].offset, Some(3));
/// assert!(extract_captured_values(&regex, "nope").is_none());
/// ```
#[must_use]
pub fn extract_captured_values(re: &Regex, text: &str) -> Option<Vec<CapturedValue>> {
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|capture| CapturedValue {
                value: capture.map_or_else(String::new, |m| m.as_str().to_owned()),
                offset: capture.map(|m| m.start()),
            })
            .collect(),
    )
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require descriptive panic messages"
)]
mod tests {
    use super::*;

    #[test]
    fn returns_none_when_pattern_does_not_match() {
        let regex = Regex::new(r"^(\d+)$").expect("test regex must compile");
        assert!(extract_captured_values(&regex, "nope").is_none());
    }

    #[test]
    fn collects_captures_in_order_with_offsets() {
        let regex = Regex::new(r"^(\d+)-(\w+)-(\d+)$").expect("test regex must compile");
        let captures =
            extract_captured_values(&regex, "12-answer-7").expect("input should match");
        let values: Vec<_> = captures.iter().map(|c| c.value.as_str()).collect();
        let offsets: Vec<_> = captures.iter().map(|c| c.offset).collect();
        assert_eq!(values, vec!["12", "answer", "7"]);
        assert_eq!(offsets, vec![Some(0), Some(3), Some(10)]);
    }

    #[test]
    fn keeps_slots_for_non_participating_groups() {
        let regex = Regex::new(r"^(a)?(b)?$").expect("test regex must compile");
        let captures = extract_captured_values(&regex, "a").expect("input should match");
        assert_eq!(
            captures,
            vec![
                CapturedValue {
                    value: "a".into(),
                    offset: Some(0),
                },
                CapturedValue {
                    value: String::new(),
                    offset: None,
                },
            ]
        );
    }
}
