pub mod config;
mod core;
pub mod input;
pub mod level;
pub mod logging;
pub mod oracle;
pub mod session;

pub use crate::core::{
    circuit::Circuit,
    gate::{GateError, GateId, PlacedGate, Placement},
    gate_type::{Arity, GateKind, GateKindError},
    truth_table::{TruthTable, basis_inputs},
    wire::{ControlTargetOrder, LEGAL_ORDERS, NUMBER_OF_WIRES, QubitOrder, WireError, WireIndex},
};

pub use config::{ConfigError, OracleConfig};
pub use input::{DropAction, PlacementSink, handle_drop, resolve_drop};
pub use level::{CanonicalStep, Exercise, LevelCatalog, LevelError};
pub use oracle::{
    HttpOracle, Oracle, OracleError, OracleRequest, OracleResponse, Verdict, VerdictRow, reduce,
    translate,
};
pub use session::{Session, SubmissionState, Ticket};
