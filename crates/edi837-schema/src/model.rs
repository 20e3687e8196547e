//! Schema model definitions
//!
//! Definitions are plain immutable values. The two variant tables are
//! assembled from them as `static` data, so every field borrows `'static`
//! strings and slices.

use serde::Serialize;

/// Value format of an element, driving format-specific transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ElementFormat {
    /// Free text
    #[default]
    Text,
    /// Calendar date; emitted as a compact `CCYYMMDD` token
    Date,
    /// Monetary amount
    Amount,
    /// Qualifier or code value
    Code,
}

/// Definition of a data element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementDefinition {
    /// Element id, unique within its loop (`NM101`, `DTP03_2`)
    pub id: &'static str,
    /// Display label; also quoted in deficiency messages
    pub label: &'static str,
    pub required: bool,
    /// Hint shown by form renderers
    pub help: &'static str,
    pub format: ElementFormat,
}

impl ElementDefinition {
    /// Create an element definition with the default text format
    #[must_use]
    pub const fn new(
        id: &'static str,
        label: &'static str,
        required: bool,
        help: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            required,
            help,
            format: ElementFormat::Text,
        }
    }

    /// Tag as a date element
    #[must_use]
    pub const fn date(mut self) -> Self {
        self.format = ElementFormat::Date;
        self
    }

    /// Tag as an amount element
    #[must_use]
    pub const fn amount(mut self) -> Self {
        self.format = ElementFormat::Amount;
        self
    }

    /// Tag as a code/qualifier element
    #[must_use]
    pub const fn code(mut self) -> Self {
        self.format = ElementFormat::Code;
        self
    }
}

/// Definition of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentDefinition {
    /// Segment tag; a loop may declare the same tag twice
    pub seg_id: &'static str,
    pub name: &'static str,
    /// Elements in emission order
    pub elements: &'static [ElementDefinition],
}

/// Definition of a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoopDefinition {
    pub loop_id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Instance data is an ordered list of records
    pub repeatable: bool,
    /// Required for a structurally well-formed document
    pub mandatory: bool,
    /// Segments in emission order
    pub segments: &'static [SegmentDefinition],
}

impl LoopDefinition {
    /// All elements of the loop, segment by segment
    pub fn elements(&self) -> impl Iterator<Item = &'static ElementDefinition> {
        self.segments.iter().flat_map(|segment| segment.elements.iter())
    }

    /// Elements flagged required, in schema order
    pub fn required_elements(&self) -> impl Iterator<Item = &'static ElementDefinition> {
        self.elements().filter(|element| element.required)
    }

    /// Look up an element definition by id
    #[must_use]
    pub fn find_element(&self, element_id: &str) -> Option<&'static ElementDefinition> {
        self.elements().find(|element| element.id == element_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ELEMENTS: &[ElementDefinition] = &[
        ElementDefinition::new("DTP01", "Date Qualifier", true, "472").code(),
        ElementDefinition::new("DTP02", "Date Format", false, "D8").code(),
        ElementDefinition::new("DTP03", "Date", true, "").date(),
    ];

    static SEGMENTS: &[SegmentDefinition] = &[SegmentDefinition {
        seg_id: "DTP",
        name: "Service Date",
        elements: ELEMENTS,
    }];

    static LOOP: LoopDefinition = LoopDefinition {
        loop_id: "2400",
        name: "Service Line",
        description: "",
        repeatable: true,
        mandatory: false,
        segments: SEGMENTS,
    };

    #[test]
    fn test_element_builders() {
        let element = ElementDefinition::new("AMT02", "Amount", false, "").amount();
        assert_eq!(element.format, ElementFormat::Amount);
        assert!(!element.required);
        assert_eq!(
            ElementDefinition::new("X", "X", true, "").format,
            ElementFormat::Text
        );
    }

    #[test]
    fn test_loop_element_iteration() {
        let ids: Vec<_> = LOOP.elements().map(|e| e.id).collect();
        assert_eq!(ids, vec!["DTP01", "DTP02", "DTP03"]);

        let required: Vec<_> = LOOP.required_elements().map(|e| e.id).collect();
        assert_eq!(required, vec!["DTP01", "DTP03"]);

        assert_eq!(LOOP.find_element("DTP03").map(|e| e.format), Some(ElementFormat::Date));
        assert!(LOOP.find_element("DTP04").is_none());
    }

    #[test]
    fn test_format_serializes_lowercase() {
        let json = serde_json::to_value(ELEMENTS[2]).unwrap();
        assert_eq!(json["format"], "date");
        assert_eq!(json["id"], "DTP03");
    }
}
