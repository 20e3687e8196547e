//! Field records keyed by element id

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One loop instance: element id to raw value.
///
/// A missing key and an empty string both mean "no value supplied"; the
/// serializer and validator treat them the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

/// Scalar JSON values accepted as field values.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(i) => i.to_string(),
            Scalar::Unsigned(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Boolean(b) => b.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Option<Scalar>>::deserialize(deserializer)?;
        // null values are dropped so they read back as absent
        let fields = raw
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.into_text())))
            .collect();
        Ok(Self { fields })
    }
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, element_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(element_id, value);
        self
    }

    /// Set a field value, replacing any previous one
    pub fn insert(&mut self, element_id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(element_id.into(), value.into());
    }

    /// Remove a field, returning its previous value
    pub fn remove(&mut self, element_id: &str) -> Option<String> {
        self.fields.remove(element_id)
    }

    /// Raw value for an element id, if one was supplied
    #[must_use]
    pub fn get(&self, element_id: &str) -> Option<&str> {
        self.fields.get(element_id).map(String::as_str)
    }

    /// Check if a key is present (even with a blank value)
    #[must_use]
    pub fn contains(&self, element_id: &str) -> bool {
        self.fields.contains_key(element_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every field of `other` into this record, overwriting on conflict
    pub fn merge(&mut self, other: &Record) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
