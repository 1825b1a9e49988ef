use thiserror::Error;

use crate::regs::RegId;
use crate::tarmac_record::RecordState;

#[derive(Debug, Error)]
pub enum TraceError {
    /// The thread context cannot provide a register the record needs.
    #[error("Incomplete context: register {0} is not readable")]
    MissingRegister(RegId),

    #[error("Record used out of order: expected {expected:?}, found {found:?}")]
    InvalidState {
        expected: RecordState,
        found: RecordState,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
