use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{circuit::Circuit, gate::PlacedGate, gate_type::GateKind, wire::QubitOrder},
    level::Exercise,
};

/// Body of a grading request. `gates` and `qubit_order` are parallel arrays
/// in column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    pub target_unitary: String,
    pub number_of_qubits: usize,
    pub gates: Vec<GateKind>,
    pub qubit_order: Vec<QubitOrder>,
}

impl OracleRequest {
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

pub fn translate(exercise: &Exercise, circuit: &Circuit) -> OracleRequest {
    // Sorted again here; storage order is not part of the contract.
    let (gates, qubit_order): (Vec<_>, Vec<_>) = circuit
        .iter()
        .sorted_by_key(|gate| gate.column())
        .map(|gate: &PlacedGate| (gate.kind(), gate.qubit_order()))
        .unzip();

    OracleRequest {
        target_unitary: exercise.target_unitary.clone(),
        number_of_qubits: exercise.number_of_qubits,
        gates,
        qubit_order,
    }
}
