//! X12 delimiter handling and value sanitization
//!
//! Values are never escaped. Any delimiter character inside a value is
//! deleted so it cannot break the segment structure.

use crate::claim::EnvelopeContext;

/// Default X12 5010 delimiters
pub const DEFAULT_SEGMENT_TERMINATOR: char = '~';
pub const DEFAULT_ELEMENT_SEPARATOR: char = '*';
pub const DEFAULT_COMPONENT_SEPARATOR: char = ':';
pub const DEFAULT_REPETITION_SEPARATOR: char = '^';

/// Delimiters in effect for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Segment terminator (default '~')
    pub segment: char,
    /// Element separator (default '*')
    pub element: char,
    /// Component separator, declared in ISA16 (default ':')
    pub component: char,
    /// Repetition separator, declared in ISA11 (default '^')
    pub repetition: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            segment: DEFAULT_SEGMENT_TERMINATOR,
            element: DEFAULT_ELEMENT_SEPARATOR,
            component: DEFAULT_COMPONENT_SEPARATOR,
            repetition: DEFAULT_REPETITION_SEPARATOR,
        }
    }
}

impl Delimiters {
    /// Delimiters with the ISA11/ISA16 overrides of an envelope applied
    ///
    /// Only the first character of an override counts. Alphanumeric overrides
    /// and overrides that would collide with the segment terminator or
    /// element separator are ignored.
    #[must_use]
    pub fn from_envelope(envelope: &EnvelopeContext) -> Self {
        let mut delimiters = Self::default();
        if let Some(c) = delimiters.override_char(envelope.value("ISA11")) {
            delimiters.repetition = c;
        }
        if let Some(c) = delimiters.override_char(envelope.value("ISA16")) {
            delimiters.component = c;
        }
        delimiters
    }

    fn override_char(&self, value: Option<&str>) -> Option<char> {
        value
            .and_then(|v| v.trim().chars().next())
            .filter(|&c| !c.is_alphanumeric() && c != self.segment && c != self.element)
    }

    /// Check if a character must be stripped from values
    ///
    /// The four default delimiters are always reserved, whatever overrides
    /// are in effect.
    #[must_use]
    pub fn is_reserved(&self, c: char) -> bool {
        matches!(
            c,
            DEFAULT_SEGMENT_TERMINATOR
                | DEFAULT_ELEMENT_SEPARATOR
                | DEFAULT_COMPONENT_SEPARATOR
                | DEFAULT_REPETITION_SEPARATOR
        ) || c == self.component
            || c == self.repetition
    }
}

/// Clean a raw value for emission
///
/// Absent and whitespace-only values become empty. Otherwise surrounding
/// whitespace is trimmed and every delimiter character is deleted. The
/// result is trimmed again so the function is idempotent.
#[must_use]
pub fn sanitize(value: Option<&str>, delimiters: &Delimiters) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let stripped: String = trimmed
        .chars()
        .filter(|&c| !delimiters.is_reserved(c))
        .collect();
    stripped.trim().to_string()
}

/// True when a value is empty after sanitization
#[must_use]
pub fn is_blank(value: Option<&str>, delimiters: &Delimiters) -> bool {
    sanitize(value, delimiters).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(value: &str) -> String {
        sanitize(Some(value), &Delimiters::default())
    }

    #[test]
    fn test_sanitize_trims_and_strips_delimiters() {
        assert_eq!(clean("  Acme Corp  "), "Acme Corp");
        assert_eq!(clean("A*B~C:D^E"), "ABCDE");
        assert_eq!(clean("Z00.00"), "Z00.00");
    }

    #[test]
    fn test_sanitize_blank_inputs() {
        let delimiters = Delimiters::default();
        assert_eq!(sanitize(None, &delimiters), "");
        assert_eq!(clean(""), "");
        assert_eq!(clean(" \t\n"), "");
        assert_eq!(clean("*~:^"), "");
        assert!(is_blank(Some("~~"), &delimiters));
        assert!(!is_blank(Some("0"), &delimiters));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["* a", "a *", " ~ b ~ ", "plain", "^:^", "x\t*\ty", ""] {
            let once = clean(raw);
            assert_eq!(clean(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_delimiters_from_envelope() {
        let envelope = EnvelopeContext::new().with("ISA11", "|").with("ISA16", ">");
        let delimiters = Delimiters::from_envelope(&envelope);
        assert_eq!(delimiters.repetition, '|');
        assert_eq!(delimiters.component, '>');
        assert_eq!(sanitize(Some("a>b|c:d^e"), &delimiters), "abcde");
    }

    #[test]
    fn test_overrides_keep_default_delimiters_reserved() {
        let envelope = EnvelopeContext::new().with("ISA11", "|");
        let delimiters = Delimiters::from_envelope(&envelope);
        assert!(is_blank(Some("^"), &delimiters));
        assert!(is_blank(Some(" :^| "), &delimiters));
    }

    #[test]
    fn test_alphanumeric_overrides_are_ignored() {
        let envelope = EnvelopeContext::new().with("ISA11", "U").with("ISA16", "5");
        let delimiters = Delimiters::from_envelope(&envelope);
        assert_eq!(delimiters, Delimiters::default());
        assert_eq!(sanitize(Some("UNITED HEALTH 5"), &delimiters), "UNITED HEALTH 5");
    }

    #[test]
    fn test_colliding_overrides_are_ignored() {
        let envelope = EnvelopeContext::new().with("ISA11", "*").with("ISA16", "~");
        assert_eq!(Delimiters::from_envelope(&envelope), Delimiters::default());
    }
}
