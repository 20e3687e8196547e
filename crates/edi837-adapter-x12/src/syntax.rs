//! X12 segment rendering and value formatting
//!
//! Delimiters and sanitization live in [`edi837_ir::syntax`] so validation
//! and serialization agree on what counts as blank.

pub use edi837_ir::syntax::{Delimiters, is_blank, sanitize};

/// One X12 segment: a tag followed by its element values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub tag: String,
    pub elements: Vec<String>,
}

impl Segment {
    pub fn new(tag: impl Into<String>, elements: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            elements,
        }
    }

    /// True when every element is empty
    pub fn is_blank(&self) -> bool {
        self.elements.iter().all(String::is_empty)
    }

    /// Render as `TAG*e1*e2...~`
    ///
    /// Elements are written verbatim, trailing empty elements included.
    /// Callers sanitize values before they reach a segment.
    pub fn render(&self, delimiters: &Delimiters) -> String {
        let mut out = String::with_capacity(
            self.tag.len() + self.elements.iter().map(|e| e.len() + 1).sum::<usize>() + 1,
        );
        out.push_str(&self.tag);
        for element in &self.elements {
            out.push(delimiters.element);
            out.push_str(element);
        }
        out.push(delimiters.segment);
        out
    }

    /// Tag of a raw segment string (the text before the first element separator)
    pub fn tag_of<'a>(raw: &'a str, delimiters: &Delimiters) -> &'a str {
        let raw = raw.trim_start();
        raw.split(delimiters.element).next().unwrap_or(raw)
    }
}

/// Compact a date value to `CCYYMMDD`
///
/// Hyphens and whitespace are removed; if eight or more characters remain
/// the first eight are kept, otherwise the value is returned as is.
pub fn format_date(value: &str) -> String {
    let compact: String = value
        .chars()
        .filter(|&c| c != '-' && !c.is_whitespace())
        .collect();
    if compact.chars().count() >= 8 {
        compact.chars().take(8).collect()
    } else {
        compact
    }
}
