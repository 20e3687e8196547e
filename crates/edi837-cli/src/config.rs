//! CLI configuration file

use anyhow::{Context, Result};
use edi837_ir::EnvelopeContext;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from the `--config` YAML file
///
/// ```yaml
/// output_dir: ./edi_output
/// strict: false
/// envelope:
///   ISA06: CLINIC01
///   ISA08: PAYER01
///   ISA15: P
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directory for generated files
    pub output_dir: Option<PathBuf>,
    /// Report undeclared loop ids
    pub strict: bool,
    /// Envelope defaults, applied beneath values supplied with the claim
    pub envelope: EnvelopeContext,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
