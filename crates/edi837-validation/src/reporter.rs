//! Deficiency messages and reports
//!
//! The message text is a contract: form collaborators match it by pattern to
//! re-highlight the offending field, so the wording must not drift.
//! [`parse_deficiency`] is the reference parser for that grammar.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// One advisory finding about claim data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deficiency {
    /// A required element is blank after sanitization
    MissingElement {
        loop_id: String,
        /// Entry index for list-shaped loop data
        index: Option<usize>,
        element_id: String,
        label: String,
    },
    /// A structurally mandatory loop is absent
    MissingLoop { loop_id: String },
    /// Data names a loop the variant does not declare (strict mode only)
    UndeclaredLoop { loop_id: String, variant: String },
}

impl Deficiency {
    /// Loop the finding refers to
    #[must_use]
    pub fn loop_id(&self) -> &str {
        match self {
            Deficiency::MissingElement { loop_id, .. }
            | Deficiency::MissingLoop { loop_id }
            | Deficiency::UndeclaredLoop { loop_id, .. } => loop_id,
        }
    }

    /// Element the finding refers to, for element-level findings
    #[must_use]
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Deficiency::MissingElement { element_id, .. } => Some(element_id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deficiency::MissingElement {
                loop_id,
                index: None,
                element_id,
                label,
            } => write!(f, "Loop {loop_id}: Required {element_id} ({label}) is missing."),
            Deficiency::MissingElement {
                loop_id,
                index: Some(index),
                element_id,
                label,
            } => write!(
                f,
                "Loop {loop_id}[{index}]: Required {element_id} ({label}) is missing."
            ),
            Deficiency::MissingLoop { loop_id } => write!(f, "Loop {loop_id} is required."),
            Deficiency::UndeclaredLoop { loop_id, variant } => write!(
                f,
                "Loop {loop_id} is not declared for {variant} and was ignored."
            ),
        }
    }
}

impl Serialize for Deficiency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ordered deficiencies found for one claim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    deficiencies: Vec<Deficiency>,
}

impl ValidationReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, deficiency: Deficiency) {
        self.deficiencies.push(deficiency);
    }

    /// True when nothing was found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.deficiencies.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deficiencies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deficiencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deficiency> {
        self.deficiencies.iter()
    }

    /// Rendered messages in report order
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.deficiencies.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Deficiency> {
        self.deficiencies
    }
}

impl Extend<Deficiency> for ValidationReport {
    fn extend<I: IntoIterator<Item = Deficiency>>(&mut self, iter: I) {
        self.deficiencies.extend(iter);
    }
}

impl From<Vec<Deficiency>> for ValidationReport {
    fn from(deficiencies: Vec<Deficiency>) -> Self {
        Self { deficiencies }
    }
}

impl IntoIterator for ValidationReport {
    type Item = Deficiency;
    type IntoIter = std::vec::IntoIter<Deficiency>;

    fn into_iter(self) -> Self::IntoIter {
        self.deficiencies.into_iter()
    }
}

/// Location recovered from a rendered deficiency message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeficiencyRef {
    pub loop_id: String,
    pub index: Option<usize>,
    pub element_id: Option<String>,
}

impl DeficiencyRef {
    /// Form field key: `{loop}_{element}` or `{loop}_{index}_{element}`.
    /// Loop-level findings have no field key.
    #[must_use]
    pub fn field_key(&self) -> Option<String> {
        let element_id = self.element_id.as_deref()?;
        Some(match self.index {
            Some(index) => format!("{}_{index}_{element_id}", self.loop_id),
            None => format!("{}_{element_id}", self.loop_id),
        })
    }
}

static MISSING_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^Loop (?P<loop>\w+)(?:\[(?P<index>\d+)\])?: Required (?P<element>[A-Z0-9_]+) \(.*\) is missing\.$",
    )
    .expect("missing-element pattern is valid")
});

static LOOP_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Loop (?P<loop>\w+) is (?:required|not declared for \S+ and was ignored)\.$")
        .expect("loop-level pattern is valid")
});

/// Parse a rendered deficiency message back into its location
///
/// Returns `None` for text that does not follow the deficiency grammar.
#[must_use]
pub fn parse_deficiency(message: &str) -> Option<DeficiencyRef> {
    if let Some(caps) = MISSING_ELEMENT.captures(message) {
        let index = match caps.name("index") {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };
        return Some(DeficiencyRef {
            loop_id: caps["loop"].to_string(),
            index,
            element_id: Some(caps["element"].to_string()),
        });
    }
    LOOP_LEVEL.captures(message).map(|caps| DeficiencyRef {
        loop_id: caps["loop"].to_string(),
        index: None,
        element_id: None,
    })
}
