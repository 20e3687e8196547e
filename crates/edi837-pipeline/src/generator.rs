//! Claim file generator
//!
//! Builds one 837 document per call and persists it under the configured
//! output directory as `{code}_{YYYYMMDD_HHMMSS}.edi`.

use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use edi837_adapter_x12::syntax::Delimiters;
use edi837_adapter_x12::{X12Serializer, recount_transaction_trailer};
use edi837_ir::{ClaimData, EnvelopeContext, GenerationRequest};
use edi837_schema::Variant;
use edi837_validation::{StrictnessLevel, ValidationConfig};
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Upper bound on collision suffixes tried for one timestamp
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Configuration for the claim file generator
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory receiving generated files; created on demand
    pub output_dir: PathBuf,
    /// Strictness level for validation
    pub strictness: StrictnessLevel,
    /// Envelope values applied beneath whatever the claim data supplies
    pub envelope_defaults: EnvelopeContext,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("edi_output"),
            strictness: StrictnessLevel::default(),
            envelope_defaults: EnvelopeContext::default(),
        }
    }
}

/// Outcome of one generation, as reported to collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    pub success: bool,
    pub file_path: Option<PathBuf>,
    pub file_name: Option<String>,
    /// Validation deficiencies, then any persistence failure
    pub errors: Vec<String>,
    pub message: String,
}

impl GenerationOutcome {
    fn invalid_variant(identifier: &str) -> Self {
        let identifier = identifier.trim().to_uppercase();
        Self {
            success: false,
            file_path: None,
            file_name: None,
            errors: vec![format!("Invalid claim type: {identifier}. Use 837P or 837I.")],
            message: "Invalid claim type.".to_string(),
        }
    }

    fn write_failed(file_name: String, mut errors: Vec<String>, error: &Error) -> Self {
        errors.push(format!("Failed to write file: {error}"));
        Self {
            success: false,
            file_path: None,
            file_name: Some(file_name),
            errors,
            message: format!("File could not be saved: {error}"),
        }
    }

    fn written(file_path: PathBuf, file_name: String, errors: Vec<String>) -> Self {
        let message = if errors.is_empty() {
            format!("EDI file generated: {file_name}.")
        } else {
            format!(
                "EDI file generated: {file_name} ({} validation warning(s).)",
                errors.len()
            )
        };
        Self {
            success: true,
            file_path: Some(file_path),
            file_name: Some(file_name),
            errors,
            message,
        }
    }

    /// True when the file was written but deficiencies were found
    pub fn has_warnings(&self) -> bool {
        self.success && !self.errors.is_empty()
    }
}

/// Generates and persists 837 claim files
#[derive(Debug, Clone, Default)]
pub struct ClaimFileGenerator {
    config: PipelineConfig,
    timestamp: Option<NaiveDateTime>,
}

impl ClaimFileGenerator {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Fix the clock used for the envelope and the file name
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Generate a claim file for a collaborator request
    pub fn generate_request(&self, request: GenerationRequest) -> GenerationOutcome {
        let (identifier, data) = request.into_parts();
        self.generate(&identifier, &data)
    }

    /// Generate a claim file for `data`
    ///
    /// Never panics and never returns an error: every failure is folded
    /// into the outcome. The input data is not modified.
    pub fn generate(&self, identifier: &str, data: &ClaimData) -> GenerationOutcome {
        let Ok(variant) = identifier.parse::<Variant>() else {
            warn!(identifier, "Rejected unknown claim type");
            return GenerationOutcome::invalid_variant(identifier);
        };

        let mut data = data.clone();
        data.envelope_mut()
            .fill_defaults(&self.config.envelope_defaults);

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        let output = X12Serializer::new(variant)
            .with_timestamp(timestamp)
            .with_config(ValidationConfig {
                strictness: self.config.strictness,
            })
            .serialize(&data);
        let text = recount_transaction_trailer(
            &output.text,
            &Delimiters::from_envelope(data.envelope()),
        );
        let errors = output.deficiencies.messages();

        let stem = format!("{}_{}", variant.code(), timestamp.format("%Y%m%d_%H%M%S"));
        match write_unique(&self.config.output_dir, &stem, &text) {
            Ok((file_path, file_name)) => {
                info!(
                    path = %file_path.display(),
                    bytes = text.len(),
                    warnings = errors.len(),
                    "Wrote claim file"
                );
                GenerationOutcome::written(file_path, file_name, errors)
            }
            Err(error) => {
                warn!(
                    output_dir = %self.config.output_dir.display(),
                    error = %error,
                    "Failed to write claim file"
                );
                GenerationOutcome::write_failed(format!("{stem}.edi"), errors, &error)
            }
        }
    }
}

/// Write `text` to the first free `{stem}.edi` / `{stem}_{n}.edi` in `dir`
///
/// Files are opened with `create_new`, so two writers racing for the same
/// name never share a file.
fn write_unique(dir: &Path, stem: &str, text: &str) -> Result<(PathBuf, String)> {
    fs::create_dir_all(dir)
        .map_err(|e| Error::io("create directory", dir.display().to_string(), e.to_string()))?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let file_name = if attempt == 0 {
            format!("{stem}.edi")
        } else {
            format!("{stem}_{attempt}.edi")
        };
        let path = dir.join(&file_name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "File name taken, trying next suffix");
                continue;
            }
            Err(e) => {
                return Err(Error::io("create", path.display().to_string(), e.to_string()));
            }
        };
        file.write_all(text.as_bytes())
            .map_err(|e| Error::io("write", path.display().to_string(), e.to_string()))?;
        return Ok((path, file_name));
    }

    Err(Error::NameExhausted(dir.join(format!("{stem}.edi")).display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use edi837_ir::Record;
    use tempfile::TempDir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(9, 30, 15)
            .unwrap()
    }

    fn generator(dir: &Path) -> ClaimFileGenerator {
        ClaimFileGenerator::new(PipelineConfig {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        })
        .with_timestamp(timestamp())
    }

    #[test]
    fn test_invalid_variant_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let outcome = generator(dir.path()).generate(" 837x ", &ClaimData::new());

        assert!(!outcome.success);
        assert_eq!(outcome.errors, ["Invalid claim type: 837X. Use 837P or 837I."]);
        assert_eq!(outcome.message, "Invalid claim type.");
        assert_eq!(outcome.file_name, None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_warnings_are_counted_in_message() {
        let dir = TempDir::new().unwrap();
        let data = ClaimData::new().with_loop("2300", Record::new().with("CLM01", "CLM001"));
        let outcome = generator(dir.path()).generate("837P", &data);

        assert!(outcome.success);
        assert!(outcome.has_warnings());
        assert_eq!(
            outcome.message,
            format!(
                "EDI file generated: 837P_20260201_093015.edi ({} validation warning(s).)",
                outcome.errors.len()
            )
        );
    }

    #[test]
    fn test_colliding_names_get_suffix() {
        let dir = TempDir::new().unwrap();
        let generator = generator(dir.path());
        let first = generator.generate("837I", &ClaimData::new());
        let second = generator.generate("837I", &ClaimData::new());
        let third = generator.generate("837I", &ClaimData::new());

        assert_eq!(first.file_name.as_deref(), Some("837I_20260201_093015.edi"));
        assert_eq!(second.file_name.as_deref(), Some("837I_20260201_093015_1.edi"));
        assert_eq!(third.file_name.as_deref(), Some("837I_20260201_093015_2.edi"));
    }

    #[test]
    fn test_envelope_defaults_sit_beneath_data() {
        let dir = TempDir::new().unwrap();
        let generator = ClaimFileGenerator::new(PipelineConfig {
            output_dir: dir.path().to_path_buf(),
            envelope_defaults: EnvelopeContext::new()
                .with("ISA06", "CONFIGSENDER")
                .with("ISA08", "CONFIGPAYER"),
            ..Default::default()
        })
        .with_timestamp(timestamp());
        let data = ClaimData::new()
            .with_envelope(EnvelopeContext::new().with("ISA08", "DATAPAYER"));

        let outcome = generator.generate("837P", &data);
        let text = fs::read_to_string(outcome.file_path.unwrap()).unwrap();
        assert!(text.contains("*CONFIGSENDER   *"));
        assert!(text.contains("*DATAPAYER      *"));
        assert!(data.envelope().value("ISA06").is_none());
    }

    #[test]
    fn test_write_failure_is_reported_after_deficiencies() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let outcome = generator(&blocker).generate("837P", &ClaimData::new());
        assert!(!outcome.success);
        assert_eq!(outcome.file_path, None);
        assert_eq!(outcome.file_name.as_deref(), Some("837P_20260201_093015.edi"));
        let last = outcome.errors.last().unwrap();
        assert!(last.starts_with("Failed to write file: "), "{last}");
        assert!(outcome.errors.len() > 1);
        assert!(outcome.message.starts_with("File could not be saved: "));
    }
}
