//! Built-in sample claims

use anyhow::Result;
use edi837_ir::{ClaimData, GenerationRequest};
use edi837_schema::Variant;

const PROFESSIONAL: &str = include_str!("../../../testdata/claims/837p_minimal.json");
const INSTITUTIONAL: &str = include_str!("../../../testdata/claims/837i_minimal.json");

/// A complete request that validates cleanly for `variant`
pub fn sample_request(variant: Variant) -> Result<GenerationRequest> {
    let json = match variant {
        Variant::Professional => PROFESSIONAL,
        Variant::Institutional => INSTITUTIONAL,
    };
    Ok(GenerationRequest::new(variant.code(), ClaimData::from_json(json)?))
}
