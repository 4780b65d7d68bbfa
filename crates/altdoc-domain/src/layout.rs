//! Text/layout representation handed in by the upstream extraction collaborator

use serde::{Deserialize, Serialize};

/// Bounding box of a line on a page, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

/// A single line of text with positional metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line text as extracted upstream
    pub text: String,

    /// Position on the page
    pub bbox: BoundingBox,
}

impl Line {
    /// Create a line with a default bounding box
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bbox: BoundingBox::default(),
        }
    }
}

/// A page of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: u32,

    /// Lines in reading order
    pub lines: Vec<Line>,
}

/// Per-line layout metadata for a document
///
/// Anchor-proximity extraction measures distance in lines of this flattened
/// reading order, so a layout built from plain text behaves identically to
/// one carrying real bounding boxes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Pages in order
    pub pages: Vec<Page>,
}

impl Layout {
    /// Build a single-page layout from plain text, one line per text line
    ///
    /// Used when the upstream collaborator supplies no positional metadata.
    pub fn from_text(text: &str) -> Self {
        let lines = text.lines().map(Line::from_text).collect();
        Self {
            pages: vec![Page { number: 1, lines }],
        }
    }

    /// Iterate all lines in reading order across pages
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Whether the layout carries no lines at all
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.lines.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_preserves_order() {
        let layout = Layout::from_text("first\nsecond\nthird");
        let texts: Vec<_> = layout.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty() {
        assert!(Layout::default().is_empty());
        assert!(!Layout::from_text("x").is_empty());
    }
}
