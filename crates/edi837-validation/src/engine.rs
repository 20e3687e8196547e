//! Validation engine
//!
//! Walks the loop schema against claim data and reports what is missing.
//! Validation is advisory: it never fails and never mutates its input.

use crate::reporter::{Deficiency, ValidationReport};
use edi837_ir::syntax::{Delimiters, is_blank};
use edi837_ir::{ClaimData, LoopData, Record};
use edi837_schema::{LoopDefinition, Variant};
use tracing::{debug, trace};

/// Strictness level for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictnessLevel {
    /// Required elements and mandatory loops only
    #[default]
    Standard,
    /// Also report loop ids the variant does not declare
    Strict,
}

/// Validation configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationConfig {
    pub strictness: StrictnessLevel,
}

impl ValidationConfig {
    /// Configuration with strict mode enabled
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strictness: StrictnessLevel::Strict,
        }
    }
}

/// Main validation engine
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    config: ValidationConfig,
}

impl ValidationEngine {
    /// Create a new validation engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with specific configuration
    #[must_use]
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate claim data against the variant's own loop table
    #[must_use]
    pub fn validate(&self, variant: Variant, data: &ClaimData) -> ValidationReport {
        self.validate_with_loops(variant, data, variant.loops())
    }

    /// Validate claim data against an explicit loop table
    ///
    /// Report order: element findings in schema order, then absent mandatory
    /// loops, then (strict mode) undeclared loop ids.
    #[must_use]
    pub fn validate_with_loops(
        &self,
        variant: Variant,
        data: &ClaimData,
        loops: &[LoopDefinition],
    ) -> ValidationReport {
        let mut report = ValidationReport::from(validate(data, loops));
        report.extend(check_mandatory_loops(data, loops));
        if self.config.strictness == StrictnessLevel::Strict {
            report.extend(check_undeclared_loops(variant, data, loops));
        }
        debug!(
            variant = %variant,
            deficiencies = report.len(),
            "Validated claim data"
        );
        report
    }
}

/// Check required elements of every declared loop
///
/// A loop absent from the data (or holding only blank values) is skipped
/// unless it is mandatory, in which case it is checked as an empty record.
/// List-shaped data is checked entry by entry and findings carry the entry
/// index.
#[must_use]
pub fn validate(data: &ClaimData, loops: &[LoopDefinition]) -> Vec<Deficiency> {
    let delimiters = Delimiters::from_envelope(data.envelope());
    let empty = Record::new();
    let mut deficiencies = Vec::new();

    for loop_def in loops {
        let loop_data = data
            .get(loop_def.loop_id)
            .filter(|d| loop_def.mandatory || has_content(d, &delimiters));

        match loop_data {
            None if !loop_def.mandatory => {
                trace!(loop_id = loop_def.loop_id, "Optional loop not supplied");
            }
            None => check_record(loop_def, None, &empty, &delimiters, &mut deficiencies),
            Some(LoopData::Single(record)) => {
                check_record(loop_def, None, record, &delimiters, &mut deficiencies);
            }
            Some(LoopData::Repeated(records)) => {
                for (index, record) in records.iter().enumerate() {
                    check_record(loop_def, Some(index), record, &delimiters, &mut deficiencies);
                }
            }
        }
    }

    deficiencies
}

/// Report every mandatory loop that is absent from the data
#[must_use]
pub fn check_mandatory_loops(data: &ClaimData, loops: &[LoopDefinition]) -> Vec<Deficiency> {
    loops
        .iter()
        .filter(|loop_def| loop_def.mandatory && data.get(loop_def.loop_id).is_none())
        .map(|loop_def| Deficiency::MissingLoop {
            loop_id: loop_def.loop_id.to_string(),
        })
        .collect()
}

/// Report loop ids in the data that the loop table does not declare
#[must_use]
pub fn check_undeclared_loops(
    variant: Variant,
    data: &ClaimData,
    loops: &[LoopDefinition],
) -> Vec<Deficiency> {
    data.loop_ids()
        .filter(|id| !loops.iter().any(|loop_def| loop_def.loop_id == *id))
        .map(|id| Deficiency::UndeclaredLoop {
            loop_id: id.to_string(),
            variant: variant.code().to_string(),
        })
        .collect()
}

fn check_record(
    loop_def: &LoopDefinition,
    index: Option<usize>,
    record: &Record,
    delimiters: &Delimiters,
    deficiencies: &mut Vec<Deficiency>,
) {
    for element in loop_def.required_elements() {
        if is_blank(record.get(element.id), delimiters) {
            deficiencies.push(Deficiency::MissingElement {
                loop_id: loop_def.loop_id.to_string(),
                index,
                element_id: element.id.to_string(),
                label: element.label.to_string(),
            });
        }
    }
}

fn has_content(data: &LoopData, delimiters: &Delimiters) -> bool {
    let record_has_content =
        |record: &Record| record.iter().any(|(_, value)| !is_blank(Some(value), delimiters));
    match data {
        LoopData::Single(record) => record_has_content(record),
        LoopData::Repeated(records) => records.iter().any(record_has_content),
    }
}
