//! Content line folding.

/// Maximum line length in octets (not characters) per RFC 6350.
pub const MAX_LINE_OCTETS: usize = 75;

/// Folds a line at [`MAX_LINE_OCTETS`].
#[must_use]
pub fn fold_line(line: &str) -> String {
    fold_line_at(line, MAX_LINE_OCTETS)
}

/// Folds a line so that no physical line exceeds `width` octets.
///
/// Continuation lines start with a single space, which counts towards
/// `width`. Breaks only fall on UTF-8 character boundaries. A `width` of
/// zero disables folding.
#[must_use]
pub fn fold_line_at(line: &str, width: usize) -> String {
    if width < 2 || line.len() <= width {
        return line.to_string();
    }

    let mut result = String::with_capacity(line.len() + line.len() / width * 3);
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();
        if current_len + char_len > width {
            result.push_str("\r\n ");
            current_len = 1;
        }
        result.push(c);
        current_len += char_len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_unchanged() {
        let line = "FN:John Doe";
        assert_eq!(fold_line(line), line);
    }

    #[test]
    fn first_segment_is_75_octets() {
        let line = "X".repeat(80);
        let folded = fold_line(&line);
        let first_line: String = folded.chars().take_while(|&c| c != '\r').collect();
        assert_eq!(first_line.len(), 75);
    }

    #[test]
    fn no_physical_line_exceeds_width() {
        let line = format!("NOTE:{}", "日".repeat(60));
        let folded = fold_line(&line);
        for physical in folded.split("\r\n") {
            assert!(physical.len() <= MAX_LINE_OCTETS, "{physical:?}");
        }
        assert_eq!(folded.replace("\r\n ", ""), line);
    }

    #[test]
    fn zero_width_disables_folding() {
        let line = "X".repeat(200);
        assert_eq!(fold_line_at(&line, 0), line);
        assert_eq!(fold_line_at(&line, 10).matches("\r\n ").count(), 22);
    }
}
