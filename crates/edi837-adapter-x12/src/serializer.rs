//! X12 837 serializer
//!
//! Builds the complete interchange text for one claim: envelope headers,
//! the loop body in schema order, and trailers whose counts are computed
//! from the segments actually emitted.

use crate::envelopes::{
    BhtSegment, GeSegment, GsSegment, IeaSegment, IsaSegment, SeSegment, StSegment,
};
use crate::syntax::{Delimiters, Segment, format_date, sanitize};
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use edi837_ir::{ClaimData, GenerationRequest, GenerationResult, LoopData, Record};
use edi837_schema::{ElementFormat, LoopDefinition, Variant};
use edi837_validation::{ValidationConfig, ValidationEngine, ValidationReport};
use tracing::{debug, info, trace};

/// Result of a build: the document text plus advisory deficiencies
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub text: String,
    /// Emitted segments in order, envelope included
    pub segments: Vec<Segment>,
    pub deficiencies: ValidationReport,
}

impl From<BuildOutput> for GenerationResult {
    fn from(output: BuildOutput) -> Self {
        GenerationResult {
            document_text: output.text,
            deficiencies: output.deficiencies.messages(),
        }
    }
}

/// Serializer for 837 documents
#[derive(Debug, Clone)]
pub struct X12Serializer {
    variant: Variant,
    timestamp: Option<NaiveDateTime>,
    config: ValidationConfig,
}

impl X12Serializer {
    /// Create a serializer for a variant
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            timestamp: None,
            config: ValidationConfig::default(),
        }
    }

    /// Create a serializer from a variant identifier such as `837P`
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        Ok(Self::new(identifier.parse()?))
    }

    /// Fix the envelope timestamp instead of using the local clock
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the validation configuration
    #[must_use]
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Build against the variant's own loop table
    pub fn serialize(&self, data: &ClaimData) -> BuildOutput {
        self.build(data, self.variant.loops())
    }

    /// Build the full interchange for `data` against `loops`
    ///
    /// Validation runs first and never stops the build.
    pub fn build(&self, data: &ClaimData, loops: &[LoopDefinition]) -> BuildOutput {
        let deficiencies =
            ValidationEngine::with_config(self.config).validate_with_loops(self.variant, data, loops);

        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());
        let envelope = data.envelope();
        let delimiters = Delimiters::from_envelope(envelope);

        let mut transaction = vec![
            StSegment::from_context(self.variant).generate(),
            BhtSegment::from_context(envelope, &delimiters, timestamp).generate(),
        ];
        transaction.extend(body_segments(data, loops, &delimiters));
        let segment_count = transaction.len() + 1;
        transaction.push(SeSegment::new(segment_count).generate());

        let mut segments = Vec::with_capacity(transaction.len() + 4);
        segments.push(IsaSegment::from_context(envelope, &delimiters, timestamp).generate());
        segments.push(GsSegment::from_context(self.variant, timestamp).generate());
        segments.extend(transaction);
        segments.push(GeSegment::default().generate());
        segments.push(IeaSegment::default().generate());

        let text: String = segments.iter().map(|s| s.render(&delimiters)).collect();

        info!(
            variant = %self.variant,
            segments = segments.len(),
            transaction_segments = segment_count,
            deficiencies = deficiencies.len(),
            "Built 837 document"
        );

        BuildOutput {
            text,
            segments,
            deficiencies,
        }
    }
}

/// Generate a document for a request
///
/// An unknown variant identifier is the only failure; it is reported before
/// any output is produced.
pub fn generate_document(request: GenerationRequest) -> Result<GenerationResult> {
    let (identifier, data) = request.into_parts();
    let serializer = X12Serializer::from_identifier(&identifier)?;
    Ok(serializer.serialize(&data).into())
}

/// Emit the loop body in schema order
fn body_segments(
    data: &ClaimData,
    loops: &[LoopDefinition],
    delimiters: &Delimiters,
) -> Vec<Segment> {
    let mut segments = Vec::new();

    for loop_def in loops {
        let records: &[Record] = match data.get(loop_def.loop_id) {
            None => {
                debug!(loop_id = loop_def.loop_id, "Loop not supplied, skipping");
                continue;
            }
            Some(LoopData::Single(record)) if record.is_empty() => &[],
            Some(LoopData::Single(record)) => std::slice::from_ref(record),
            Some(LoopData::Repeated(records)) if loop_def.repeatable => records.as_slice(),
            Some(LoopData::Repeated(_)) => {
                debug!(
                    loop_id = loop_def.loop_id,
                    "List data supplied for a non-repeatable loop, ignoring"
                );
                continue;
            }
        };

        let before = segments.len();
        for record in records {
            emit_record(loop_def, record, delimiters, &mut segments);
        }
        debug!(
            loop_id = loop_def.loop_id,
            records = records.len(),
            segments = segments.len() - before,
            "Emitted loop"
        );
    }

    segments
}

fn emit_record(
    loop_def: &LoopDefinition,
    record: &Record,
    delimiters: &Delimiters,
    segments: &mut Vec<Segment>,
) {
    for segment_def in loop_def.segments {
        let elements: Vec<String> = segment_def
            .elements
            .iter()
            .map(|element| {
                let raw = record.get(element.id);
                match element.format {
                    ElementFormat::Date => {
                        let compact = raw.map(format_date);
                        sanitize(compact.as_deref(), delimiters)
                    }
                    _ => sanitize(raw, delimiters),
                }
            })
            .collect();

        let segment = Segment::new(segment_def.seg_id, elements);
        if segment.is_blank() {
            trace!(
                loop_id = loop_def.loop_id,
                segment = segment_def.seg_id,
                "Suppressed empty segment"
            );
            continue;
        }
        trace!(
            loop_id = loop_def.loop_id,
            segment = segment_def.seg_id,
            "Emitted segment"
        );
        segments.push(segment);
    }
}

// ============================================================================
// Trailer post-pass
// ============================================================================

/// Rewrite SE01 so it equals the number of segments from ST through SE
///
/// For documents edited after generation. Only the first ST and the first
/// SE after it are considered. The text is returned unchanged when either
/// is missing or SE carries no count element, and applying the pass twice
/// gives the same result as applying it once.
pub fn recount_transaction_trailer(text: &str, delimiters: &Delimiters) -> String {
    let mut parts: Vec<String> = text.split(delimiters.segment).map(str::to_string).collect();

    let Some((st_index, se_index)) = locate_transaction(&parts, delimiters) else {
        return text.to_string();
    };

    let mut se_elements: Vec<&str> = parts[se_index].split(delimiters.element).collect();
    if se_elements.len() < 2 {
        return text.to_string();
    }
    let count = (se_index - st_index + 1).to_string();
    se_elements[1] = &count;
    let rewritten = se_elements.join(&delimiters.element.to_string());
    parts[se_index] = rewritten;

    parts.join(&delimiters.segment.to_string())
}

/// Segment count of the first transaction set in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionCount {
    /// Segments physically present from ST through SE inclusive
    pub actual: usize,
    /// Count declared in SE01, if it parses
    pub declared: Option<usize>,
}

impl TransactionCount {
    pub fn is_consistent(&self) -> bool {
        self.declared == Some(self.actual)
    }
}

/// Read back the ST..SE segment count of a document
pub fn transaction_segment_count(text: &str, delimiters: &Delimiters) -> Result<TransactionCount> {
    let parts: Vec<&str> = text.split(delimiters.segment).collect();
    let (st_index, se_index) = locate_transaction(&parts, delimiters)
        .ok_or_else(|| Error::Envelope("No ST/SE transaction set found".to_string()))?;

    let declared = parts[se_index]
        .split(delimiters.element)
        .nth(1)
        .and_then(|count| count.trim().parse().ok());

    Ok(TransactionCount {
        actual: se_index - st_index + 1,
        declared,
    })
}

fn locate_transaction<S: AsRef<str>>(parts: &[S], delimiters: &Delimiters) -> Option<(usize, usize)> {
    let tag = |part: &S| Segment::tag_of(part.as_ref(), delimiters).to_string();
    let st_index = parts.iter().position(|p| tag(p) == "ST" && has_elements(p.as_ref(), delimiters))?;
    let se_index = parts[st_index..]
        .iter()
        .position(|p| tag(p) == "SE" && has_elements(p.as_ref(), delimiters))?
        + st_index;
    Some((st_index, se_index))
}

fn has_elements(part: &str, delimiters: &Delimiters) -> bool {
    part.contains(delimiters.element)
}
