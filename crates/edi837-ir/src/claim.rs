//! Loop-keyed claim data

use crate::record::Record;
use crate::{Error, Result};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Data key holding interchange header overrides
pub const ENVELOPE_KEY: &str = "_ISA";
/// Legacy spelling of [`ENVELOPE_KEY`], read only when `_ISA` is absent
pub const ENVELOPE_KEY_ALIAS: &str = "ISA";
/// Data key holding beginning-of-transaction overrides
pub const BHT_KEY: &str = "_BHT";

/// Instance data for one loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoopData {
    /// A single record (every non-repeatable loop)
    Single(Record),
    /// Ordered records (the service-line loop)
    Repeated(Vec<Record>),
}

impl LoopData {
    /// True when no record or no field was supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            LoopData::Single(record) => record.is_empty(),
            LoopData::Repeated(records) => records.is_empty(),
        }
    }
}

/// Wire shape of a loop value before non-record entries are discarded
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLoop {
    Single(Record),
    Repeated(Vec<RawEntry>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Record(Record),
    Other(IgnoredAny),
}

impl RawLoop {
    /// `None` for null and scalar loop values; list entries that are not
    /// records are skipped
    fn into_loop_data(self, loop_id: &str) -> Option<LoopData> {
        match self {
            RawLoop::Single(record) => Some(LoopData::Single(record)),
            RawLoop::Repeated(entries) => {
                let records = entries
                    .into_iter()
                    .enumerate()
                    .filter_map(|(index, entry)| match entry {
                        RawEntry::Record(record) => Some(record),
                        RawEntry::Other(_) => {
                            debug!(loop_id, index, "Skipping non-record list entry");
                            None
                        }
                    })
                    .collect();
                Some(LoopData::Repeated(records))
            }
            RawLoop::Other(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for LoopData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawLoop::deserialize(deserializer)?
            .into_loop_data("")
            .ok_or_else(|| serde::de::Error::custom("expected a record or a list of records"))
    }
}

impl From<Record> for LoopData {
    fn from(record: Record) -> Self {
        LoopData::Single(record)
    }
}

impl From<Vec<Record>> for LoopData {
    fn from(records: Vec<Record>) -> Self {
        LoopData::Repeated(records)
    }
}

/// Transmission-level metadata keyed by field id (`ISA06`, `ISA13`, `BHT03`, ...)
///
/// Blank values count as not supplied so the envelope falls back to its
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvelopeContext {
    fields: Record,
}

impl EnvelopeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    #[must_use]
    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field_id, value);
        self
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field_id, value);
    }

    /// Non-blank value for a field id
    #[must_use]
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.fields.get(field_id).filter(|v| !v.trim().is_empty())
    }

    /// Overlay `other` on top of this context; `other` wins on conflict
    pub fn overlay(&mut self, other: &EnvelopeContext) {
        self.fields.merge(&other.fields);
    }

    /// Fill fields that are not yet supplied from `defaults`
    pub fn fill_defaults(&mut self, defaults: &EnvelopeContext) {
        for (key, value) in defaults.fields.iter() {
            if self.value(key).is_none() {
                self.fields.insert(key, value);
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter()
    }
}

impl From<Record> for EnvelopeContext {
    fn from(fields: Record) -> Self {
        Self { fields }
    }
}

/// Complete claim input: loop instance data plus envelope context
///
/// Keys starting with `_` are reserved for collaborators and never treated
/// as loop ids. `_ISA` (or `ISA`) and `_BHT` are lifted into the envelope
/// context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, LoopData>")]
pub struct ClaimData {
    loops: BTreeMap<String, LoopData>,
    envelope: EnvelopeContext,
}

impl ClaimData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse claim data from its JSON mapping form
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] when the JSON is not a loop-keyed
    /// mapping of records.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::invalid_data("claim data", e.to_string()))
    }

    /// Builder-style loop setter
    #[must_use]
    pub fn with_loop(mut self, loop_id: impl Into<String>, data: impl Into<LoopData>) -> Self {
        self.insert_loop(loop_id, data);
        self
    }

    pub fn insert_loop(&mut self, loop_id: impl Into<String>, data: impl Into<LoopData>) {
        self.loops.insert(loop_id.into(), data.into());
    }

    pub fn remove_loop(&mut self, loop_id: &str) -> Option<LoopData> {
        self.loops.remove(loop_id)
    }

    /// Instance data for a loop id, if supplied
    #[must_use]
    pub fn get(&self, loop_id: &str) -> Option<&LoopData> {
        self.loops.get(loop_id)
    }

    /// Mutable instance data for a loop id
    pub fn get_mut(&mut self, loop_id: &str) -> Option<&mut LoopData> {
        self.loops.get_mut(loop_id)
    }

    /// Loop ids present in the data, in key order
    pub fn loop_ids(&self) -> impl Iterator<Item = &str> {
        self.loops.keys().map(String::as_str)
    }

    #[must_use]
    pub fn envelope(&self) -> &EnvelopeContext {
        &self.envelope
    }

    pub fn envelope_mut(&mut self) -> &mut EnvelopeContext {
        &mut self.envelope
    }

    /// Builder-style envelope replacement
    #[must_use]
    pub fn with_envelope(mut self, envelope: EnvelopeContext) -> Self {
        self.envelope = envelope;
        self
    }
}

impl<'de> Deserialize<'de> for ClaimData {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, RawLoop>::deserialize(deserializer)?;
        let loops = raw
            .into_iter()
            .filter_map(|(loop_id, value)| match value.into_loop_data(&loop_id) {
                Some(data) => Some((loop_id, data)),
                None => {
                    debug!(loop_id = %loop_id, "Treating non-record loop value as absent");
                    None
                }
            })
            .collect::<BTreeMap<_, _>>();
        Ok(Self::from(loops))
    }
}

impl From<BTreeMap<String, LoopData>> for ClaimData {
    fn from(mut raw: BTreeMap<String, LoopData>) -> Self {
        let mut envelope = EnvelopeContext::new();
        // `_ISA` replaces the legacy `ISA` section entirely when both exist
        let isa_key = if raw.contains_key(ENVELOPE_KEY) {
            raw.remove(ENVELOPE_KEY_ALIAS);
            ENVELOPE_KEY
        } else {
            ENVELOPE_KEY_ALIAS
        };
        for key in [isa_key, BHT_KEY] {
            match raw.remove(key) {
                Some(LoopData::Single(record)) => envelope.overlay(&EnvelopeContext::from(record)),
                Some(LoopData::Repeated(_)) => {
                    debug!(key, "Ignoring list-shaped envelope section");
                }
                None => {}
            }
        }

        let reserved: Vec<String> = raw.keys().filter(|k| k.starts_with('_')).cloned().collect();
        for key in reserved {
            debug!(key = %key, "Dropping reserved data key");
            raw.remove(&key);
        }

        Self {
            loops: raw,
            envelope,
        }
    }
}

impl From<ClaimData> for BTreeMap<String, LoopData> {
    fn from(data: ClaimData) -> Self {
        let mut raw = data.loops;
        let mut isa = Record::new();
        let mut bht = Record::new();
        for (key, value) in data.envelope.iter() {
            if key.starts_with("BHT") {
                bht.insert(key, value);
            } else {
                isa.insert(key, value);
            }
        }
        if !isa.is_empty() {
            raw.insert(ENVELOPE_KEY.to_string(), LoopData::Single(isa));
        }
        if !bht.is_empty() {
            raw.insert(BHT_KEY.to_string(), LoopData::Single(bht));
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_data_shapes() {
        let data = ClaimData::from_json(
            r#"{
                "2300": {"CLM01": "A1", "CLM02": "10.00"},
                "2400": [{"LX01": "1"}, {"LX01": "2"}]
            }"#,
        )
        .unwrap();

        assert!(matches!(data.get("2300"), Some(LoopData::Single(r)) if r.get("CLM01") == Some("A1")));
        assert!(matches!(data.get("2400"), Some(LoopData::Repeated(v)) if v.len() == 2));
        assert!(data.get("1000A").is_none());
    }

    #[test]
    fn test_envelope_sections_are_lifted_out_of_loops() {
        let data = ClaimData::from_json(
            r#"{
                "ISA": {"ISA06": "LEGACY", "ISA08": "PAYER01"},
                "_ISA": {"ISA06": "SUBMITTER01"},
                "_BHT": {"BHT03": "BATCH42"},
                "_meta": {"source": "form"},
                "1000A": {"NM101": "41"}
            }"#,
        )
        .unwrap();

        assert_eq!(data.loop_ids().collect::<Vec<_>>(), vec!["1000A"]);
        assert_eq!(data.envelope().value("ISA06"), Some("SUBMITTER01"));
        assert_eq!(data.envelope().value("ISA08"), None);
        assert_eq!(data.envelope().value("BHT03"), Some("BATCH42"));
    }

    #[test]
    fn test_legacy_envelope_section_used_alone() {
        let data = ClaimData::from_json(r#"{"ISA": {"ISA08": "PAYER01"}}"#).unwrap();
        assert_eq!(data.envelope().value("ISA08"), Some("PAYER01"));
        assert_eq!(data.loop_ids().count(), 0);
    }

    #[test]
    fn test_null_loop_reads_as_absent() {
        let data = ClaimData::from_json(r#"{"2000C": null, "2300": {"CLM01": "A"}}"#).unwrap();
        assert!(data.get("2000C").is_none());
        assert_eq!(data.loop_ids().collect::<Vec<_>>(), vec!["2300"]);
    }

    #[test]
    fn test_non_record_list_entries_are_skipped() {
        let data = ClaimData::from_json(
            r#"{"2400": [{"LX01": "1"}, null, "stray", 7, [], {"LX01": "2"}]}"#,
        )
        .unwrap();
        let Some(LoopData::Repeated(records)) = data.get("2400") else {
            panic!("expected repeated loop data");
        };
        let numbers: Vec<_> = records.iter().map(|r| r.get("LX01")).collect();
        assert_eq!(numbers, [Some("1"), Some("2")]);
    }

    #[test]
    fn test_blank_envelope_values_fall_back() {
        let mut envelope = EnvelopeContext::new().with("ISA06", "   ");
        assert_eq!(envelope.value("ISA06"), None);

        envelope.fill_defaults(&EnvelopeContext::new().with("ISA06", "CFGSENDER"));
        assert_eq!(envelope.value("ISA06"), Some("CFGSENDER"));

        envelope.fill_defaults(&EnvelopeContext::new().with("ISA06", "OTHER"));
        assert_eq!(envelope.value("ISA06"), Some("CFGSENDER"));
    }

    #[test]
    fn test_claim_data_round_trips_envelope_sections() {
        let data = ClaimData::new()
            .with_loop("1000B", Record::new().with("NM101", "40"))
            .with_envelope(
                EnvelopeContext::new()
                    .with("ISA13", "000000123")
                    .with("BHT03", "REF1"),
            );

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["_ISA"]["ISA13"], "000000123");
        assert_eq!(json["_BHT"]["BHT03"], "REF1");

        let back: ClaimData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_malformed_data_is_reported() {
        let err = ClaimData::from_json(r#"["not", "a", "mapping"]"#).unwrap_err();
        assert!(err.to_string().contains("claim data"));
    }

    #[test]
    fn test_empty_loop_data() {
        assert!(LoopData::Single(Record::new()).is_empty());
        assert!(LoopData::Repeated(Vec::new()).is_empty());
        assert!(!LoopData::from(Record::new().with("LX01", "1")).is_empty());
    }
}
