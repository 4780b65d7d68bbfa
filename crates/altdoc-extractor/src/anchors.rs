//! Anchor-proximity search over document lines

use altdoc_domain::Layout;
use regex::Regex;

/// A raw span located near an anchor label
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnchorSpan {
    /// The candidate value text
    pub text: String,

    /// Line distance from the anchor label (0 = same line)
    pub distance: usize,

    /// The label that anchored the search
    pub label: &'static str,
}

/// A flattened, line-oriented view of a document
///
/// Built from the layout's reading order when positional metadata exists,
/// else from the raw text's lines, so both paths behave identically.
pub(crate) struct DocumentView<'a> {
    lines: Vec<&'a str>,
}

impl<'a> DocumentView<'a> {
    pub fn new(text: &'a str, layout: &'a Layout) -> Self {
        let lines = if layout.is_empty() {
            text.lines().collect()
        } else {
            layout.lines().map(|l| l.text.as_str()).collect()
        };
        Self { lines }
    }

    /// All lines in reading order
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Find the value nearest one of the anchor labels
    ///
    /// Labels are tried in priority order (put the most specific first:
    /// "Fund ID" before "Fund"). For the first line containing the label,
    /// the remainder of that line is the candidate at distance 0; when the
    /// remainder is empty the following `scan_lines` lines are scanned for
    /// the first non-empty one. Search order is fixed, so extraction stays
    /// deterministic.
    pub fn find_after_label(
        &self,
        labels: &[&'static str],
        scan_lines: usize,
    ) -> Option<AnchorSpan> {
        for label in labels {
            let needle = label.to_lowercase();
            for (idx, line) in self.lines.iter().enumerate() {
                let lower = line.to_lowercase();
                let Some(pos) = find_word(&lower, &needle) else {
                    continue;
                };

                // Byte offsets from the lowercased copy can drift on
                // non-ASCII text; fall back to an empty remainder there.
                let after = line.get(pos + needle.len()..).unwrap_or("");
                let value = trim_label_separators(after);
                if !value.is_empty() {
                    return Some(AnchorSpan {
                        text: value.to_string(),
                        distance: 0,
                        label,
                    });
                }

                for (offset, below) in self.lines[idx + 1..]
                    .iter()
                    .take(scan_lines)
                    .enumerate()
                {
                    let value = below.trim();
                    if !value.is_empty() {
                        return Some(AnchorSpan {
                            text: value.to_string(),
                            distance: offset + 1,
                            label,
                        });
                    }
                }
            }
        }
        None
    }

    /// First match of a pattern anywhere in the document
    ///
    /// Fallback for fields with no anchor label present; carries a lower
    /// base confidence than an anchored find.
    pub fn find_pattern(&self, pattern: &Regex) -> Option<String> {
        for line in &self.lines {
            if let Some(caps) = pattern.captures(line) {
                let m = caps.get(1).or_else(|| caps.get(0)).unwrap();
                return Some(m.as_str().to_string());
            }
        }
        None
    }

    /// Index of the first line whose text matches the pattern
    pub fn find_line(&self, pattern: &Regex) -> Option<usize> {
        self.lines.iter().position(|l| pattern.is_match(l))
    }
}

/// Locate `needle` in `haystack` at a word boundary on both sides, so a
/// label like "Call No" does not anchor inside "Call Notice".
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    for (pos, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        let after_ok = haystack[pos + needle.len()..]
            .chars()
            .next()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        if before_ok && after_ok {
            return Some(pos);
        }
    }
    None
}

/// Strip the punctuation that separates a label from its value
fn trim_label_separators(s: &str) -> &str {
    s.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '#' | '.' | '='))
        .trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use altdoc_domain::Layout;

    fn view_of(text: &str) -> (String, Layout) {
        (text.to_string(), Layout::from_text(text))
    }

    #[test]
    fn test_same_line_value() {
        let (text, layout) = view_of("Call Amount: $1,250,000.00");
        let view = DocumentView::new(&text, &layout);
        let span = view.find_after_label(&["Call Amount"], 3).unwrap();
        assert_eq!(span.text, "$1,250,000.00");
        assert_eq!(span.distance, 0);
    }

    #[test]
    fn test_value_on_following_line() {
        let (text, layout) = view_of("Call Amount\n\n$500,000");
        let view = DocumentView::new(&text, &layout);
        let span = view.find_after_label(&["Call Amount"], 3).unwrap();
        assert_eq!(span.text, "$500,000");
        assert_eq!(span.distance, 2);
    }

    #[test]
    fn test_label_priority_order() {
        let (text, layout) = view_of("Fund: WRONG\nFund ID: RIGHT-I");
        let view = DocumentView::new(&text, &layout);
        let span = view.find_after_label(&["Fund ID", "Fund"], 3).unwrap();
        assert_eq!(span.text, "RIGHT-I");
        assert_eq!(span.label, "Fund ID");
    }

    #[test]
    fn test_case_insensitive_label() {
        let (text, layout) = view_of("CALL DATE - 2023-03-15");
        let view = DocumentView::new(&text, &layout);
        let span = view.find_after_label(&["Call Date"], 3).unwrap();
        assert_eq!(span.text, "2023-03-15");
    }

    #[test]
    fn test_missing_label() {
        let (text, layout) = view_of("nothing to see");
        let view = DocumentView::new(&text, &layout);
        assert!(view.find_after_label(&["Call Amount"], 3).is_none());
    }

    #[test]
    fn test_label_requires_word_boundary() {
        let (text, layout) = view_of("Capital Call Notice\nCall No: 4");
        let view = DocumentView::new(&text, &layout);
        let span = view.find_after_label(&["Call No"], 3).unwrap();
        assert_eq!(span.text, "4");
    }

    #[test]
    fn test_pattern_fallback_captures_group() {
        let (text, layout) = view_of("relating to ABC-III herein");
        let view = DocumentView::new(&text, &layout);
        let pattern = Regex::new(r"\b([A-Z]{2,6}-[IVX]+)\b").unwrap();
        assert_eq!(view.find_pattern(&pattern).unwrap(), "ABC-III");
    }
}
