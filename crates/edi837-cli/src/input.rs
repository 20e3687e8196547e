//! Claim input files

use anyhow::{Context, Result, bail};
use edi837_ir::{ClaimData, GenerationRequest};
use std::fs;
use std::path::Path;

/// Read a claim input file
///
/// Accepts either a full request (`{ "variant", "data", "envelope" }`) or a
/// bare loop-keyed data mapping. The `--type` flag wins over the request's
/// own variant and is required for bare data.
pub fn load_request(path: &Path, variant: Option<&str>) -> Result<GenerationRequest> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    parse_request(&text, variant).with_context(|| format!("Invalid input file {}", path.display()))
}

pub fn parse_request(text: &str, variant: Option<&str>) -> Result<GenerationRequest> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let is_request = value.get("data").is_some_and(serde_json::Value::is_object);

    let mut request = if is_request {
        GenerationRequest::from_json(text)?
    } else {
        let Some(variant) = variant else {
            bail!("Input is bare claim data; pass --type 837P or --type 837I");
        };
        GenerationRequest::new(variant, ClaimData::from_json(text)?)
    };
    if let Some(variant) = variant {
        request.variant = variant.to_string();
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_request() {
        let request = parse_request(
            r#"{ "variant": "837I", "data": { "2300": { "CLM01": "X" } } }"#,
            None,
        )
        .unwrap();
        assert_eq!(request.variant, "837I");
        assert!(request.data.get("2300").is_some());
    }

    #[test]
    fn test_flag_overrides_request_variant() {
        let request =
            parse_request(r#"{ "variant": "837I", "data": {} }"#, Some("837P")).unwrap();
        assert_eq!(request.variant, "837P");
    }

    #[test]
    fn test_bare_data_needs_variant() {
        let bare = r#"{ "2300": { "CLM01": "X" } }"#;
        assert!(parse_request(bare, None).is_err());
        let request = parse_request(bare, Some("837P")).unwrap();
        assert_eq!(request.variant, "837P");
        assert!(request.envelope.is_none());
    }
}
