//! Ingestion of delimited ledger exports into typed record batches

pub mod normalizer;
pub mod parser;

pub use normalizer::*;
pub use parser::*;

use crate::traits::LedgerRecord;
use crate::types::*;

/// Parse and normalize one ledger export in a single step
pub fn load_ledger<T: LedgerRecord>(
    parser: &TabularParser,
    normalizer: &RecordNormalizer,
    content: &str,
) -> ReconcileResult<NormalizedBatch<T>> {
    let rows = parser.parse(content)?;
    Ok(normalizer.normalize(&rows))
}
