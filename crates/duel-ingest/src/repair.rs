//! Recovery for truncated JSON exports
//!
//! The malformed files seen in the advocacy exports stop just short of their final
//! closing brace. Recovery is exactly one retry with a `}` appended; nothing else
//! (brace balancing, trailing commas) is attempted.

use serde_json::Value;
use thiserror::Error;

/// Byte appended to the raw input on the single repair attempt.
pub const REPAIR_SUFFIX: u8 = b'}';

/// Whether the document parsed as-is or needed the closing brace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    Clean,
    Repaired,
}

#[derive(Debug)]
pub struct ParsedDocument {
    pub value: Value,
    pub outcome: ParseOutcome,
}

/// Raised when neither the original bytes nor the repaired bytes are valid JSON
///
/// Carries the error from the original parse, which points at the real defect.
#[derive(Debug, Error)]
#[error("malformed JSON that a closing brace does not fix: {source}")]
pub struct RepairError {
    #[source]
    pub source: serde_json::Error,
}

/// Parse `raw`, retrying once with [`REPAIR_SUFFIX`] appended
pub fn parse_with_repair(raw: &[u8]) -> Result<ParsedDocument, RepairError> {
    let original = match serde_json::from_slice::<Value>(raw) {
        Ok(value) => {
            return Ok(ParsedDocument {
                value,
                outcome: ParseOutcome::Clean,
            })
        },
        Err(e) => e,
    };

    let mut patched = Vec::with_capacity(raw.len() + 1);
    patched.extend_from_slice(raw);
    patched.push(REPAIR_SUFFIX);

    serde_json::from_slice::<Value>(&patched)
        .map(|value| ParsedDocument {
            value,
            outcome: ParseOutcome::Repaired,
        })
        .map_err(|_| RepairError { source: original })
}
