//! Wire contract with the grading service.
//!
//! - [`request`] turns an exercise plus the student circuit into the body the
//!   service expects.
//! - [`verdict`] folds the service's trial/target truth tables into per-row
//!   verdicts.
//! - [`client`] is the transport seam: anything implementing [`Oracle`] can
//!   grade a request, [`HttpOracle`] does it over HTTP.
use serde::{Deserialize, Serialize};

use crate::core::truth_table::TruthTable;

pub mod client;
pub mod request;
pub mod verdict;

pub use client::{HttpOracle, Oracle};
pub use request::{OracleRequest, translate};
pub use verdict::{Verdict, VerdictRow, reduce, validate};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Oracle responded with HTTP {status}")]
    Status { status: u16, body: String },
    #[error("Malformed oracle response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{table} truth table has {inputs} inputs but {outputs} outputs")]
    MisalignedTable {
        table: &'static str,
        inputs: usize,
        outputs: usize,
    },
    #[error("Trial truth table has {trial} rows, target has {target}")]
    RowCountMismatch { trial: usize, target: usize },
    #[error("Trial and target inputs differ at row {row}: {trial} vs {target}")]
    InputMismatch {
        row: usize,
        trial: String,
        target: String,
    },
}
pub type OracleError = Error;

impl Error {
    /// Whether the service answered but broke the row-alignment contract.
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(
            self,
            Error::MisalignedTable { .. } | Error::RowCountMismatch { .. } | Error::InputMismatch { .. }
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleResponse {
    #[serde(default)]
    pub message: String,
    pub trial_truth_table: TruthTable,
    pub target_truth_table: TruthTable,
}
