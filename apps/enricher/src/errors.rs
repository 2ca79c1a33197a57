use thiserror::Error;

use crate::enrichment::parser::ParseError;
use crate::llm_client::GenerationError;
use crate::storage::StoreError;

/// Record-level error: any variant aborts the remaining steps for the
/// listing it occurred on and is surfaced as a single logged failure.
/// It never aborts the batch.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("response parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("persistence failed: {0}")]
    Store(#[from] StoreError),
}
