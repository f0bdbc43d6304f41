//! Exercise definitions and the level progression.
//!
//! Levels are read-only input to the rest of the crate. Canonical solutions and
//! gate limits are advisory: they feed hints and UI warnings, never grading.

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::{
    circuit::Circuit,
    gate::{GateError, GateId, PlacedGate},
    gate_type::GateKind,
    truth_table::{TruthTable, basis_inputs},
    wire::{NUMBER_OF_WIRES, QubitOrder},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown level: {0}")]
    UnknownLevel(String),
    #[error("Duplicate level: {0}")]
    DuplicateLevel(String),
    #[error("Level {target} needs {wires} wires, more than the circuit has")]
    UnsupportedWireCount { target: String, wires: usize },
    #[error("Level {target}: expected truth table has {inputs} inputs but {outputs} outputs")]
    MalformedTruthTable {
        target: String,
        inputs: usize,
        outputs: usize,
    },
    #[error("Level {target}: canonical step {step} is invalid: {source}")]
    InvalidCanonicalStep {
        target: String,
        step: usize,
        #[source]
        source: GateError,
    },
    #[error("Invalid level catalog: {0}")]
    Json(#[from] serde_json::Error),
}
pub type LevelError = Error;

/// Soft gate limit shown by the UI for the built-in levels.
pub const MAX_GATES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalStep {
    pub gate: GateKind,
    pub order: QubitOrder,
}

impl CanonicalStep {
    pub fn new(gate: GateKind, order: [usize; 2]) -> Self {
        Self {
            gate,
            order: QubitOrder(order),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub target_unitary: String,
    pub number_of_qubits: usize,
    pub toolbox: Vec<GateKind>,
    pub expected_truth: TruthTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical: Option<Vec<CanonicalStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_max_gates: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Exercise {
    pub fn allows(&self, kind: GateKind) -> bool {
        self.toolbox.contains(&kind)
    }

    /// Advisory only; a circuit over the limit is still submitted as-is.
    pub fn exceeds_soft_limit(&self, circuit: &Circuit) -> bool {
        self.ui_max_gates
            .is_some_and(|limit| circuit.len() > limit)
    }

    /// Materialize the hint solution, if the level has one.
    pub fn canonical_circuit(&self, rng: &mut impl Rng) -> Result<Option<Circuit>, LevelError> {
        let Some(steps) = &self.canonical else {
            return Ok(None);
        };

        steps
            .iter()
            .enumerate()
            .map(|(step, CanonicalStep { gate, order })| {
                PlacedGate::from_step(GateId::random(rng), *gate, *order).map_err(|source| {
                    LevelError::InvalidCanonicalStep {
                        target: self.target_unitary.clone(),
                        step,
                        source,
                    }
                })
            })
            .collect::<Result<Circuit, _>>()
            .map(Some)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.number_of_qubits == 0 || self.number_of_qubits > NUMBER_OF_WIRES {
            return Err(LevelError::UnsupportedWireCount {
                target: self.target_unitary.clone(),
                wires: self.number_of_qubits,
            });
        }
        if !self.expected_truth.is_aligned() {
            return Err(LevelError::MalformedTruthTable {
                target: self.target_unitary.clone(),
                inputs: self.expected_truth.input.len(),
                outputs: self.expected_truth.output.len(),
            });
        }
        // Only the shape of each step is checked, ids are throwaway.
        for (step, CanonicalStep { gate, order }) in self.canonical.iter().flatten().enumerate() {
            PlacedGate::from_step(GateId::from_raw(step as u128), *gate, *order).map_err(|source| {
                LevelError::InvalidCanonicalStep {
                    target: self.target_unitary.clone(),
                    step,
                    source,
                }
            })?;
        }
        Ok(())
    }
}

/// Ordered set of exercises; order is the progression order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Exercise>,
}

static BUILTIN: Lazy<LevelCatalog> = Lazy::new(|| LevelCatalog {
    levels: builtin_levels(),
});

impl LevelCatalog {
    pub fn new(levels: Vec<Exercise>) -> Result<Self, LevelError> {
        for (index, level) in levels.iter().enumerate() {
            level.validate()?;
            if levels[..index]
                .iter()
                .any(|other| other.target_unitary == level.target_unitary)
            {
                return Err(LevelError::DuplicateLevel(level.target_unitary.clone()));
            }
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of exercises.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn builtin() -> &'static LevelCatalog {
        &BUILTIN
    }

    pub fn get(&self, target: &str) -> Option<&Exercise> {
        self.levels
            .iter()
            .find(|level| level.target_unitary == target)
    }

    pub fn require(&self, target: &str) -> Result<&Exercise, LevelError> {
        self.get(target)
            .ok_or_else(|| LevelError::UnknownLevel(target.to_owned()))
    }

    pub fn first(&self) -> Option<&Exercise> {
        self.levels.first()
    }

    /// Level after `target`, or `None` on the last or an unknown level.
    pub fn next_after(&self, target: &str) -> Option<&Exercise> {
        let index = self
            .levels
            .iter()
            .position(|level| level.target_unitary == target)?;
        self.levels.get(index + 1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

fn two_wire_level(
    target: GateKind,
    toolbox: Vec<GateKind>,
    canonical: Vec<CanonicalStep>,
    outputs: [&str; 4],
    description: &str,
) -> Exercise {
    Exercise {
        target_unitary: target.name().to_owned(),
        number_of_qubits: 2,
        toolbox,
        expected_truth: TruthTable::new(basis_inputs(2), outputs),
        canonical: Some(canonical),
        ui_max_gates: Some(MAX_GATES),
        description: Some(description.to_owned()),
    }
}

fn builtin_levels() -> Vec<Exercise> {
    use GateKind::*;

    const Q0: [usize; 2] = [0, 0];
    const Q1: [usize; 2] = [1, 1];
    const C0_T1: [usize; 2] = [0, 1];
    const C1_T0: [usize; 2] = [1, 0];

    let single_and_cnot = || {
        let mut toolbox = GateKind::SINGLE_WIRE.to_vec();
        toolbox.push(Cnot);
        toolbox
    };

    vec![
        two_wire_level(
            CnotFlipped,
            single_and_cnot(),
            vec![
                CanonicalStep::new(H, Q0),
                CanonicalStep::new(H, Q1),
                CanonicalStep::new(Cnot, C1_T0),
                CanonicalStep::new(H, Q0),
                CanonicalStep::new(H, Q1),
            ],
            ["00", "11", "10", "01"],
            "Build a CNOT gate with flipped control and target qubits.",
        ),
        two_wire_level(
            ControlledZ,
            single_and_cnot(),
            vec![
                CanonicalStep::new(H, Q1),
                CanonicalStep::new(Cnot, C0_T1),
                CanonicalStep::new(H, Q1),
            ],
            ["00", "01", "10", "11"],
            "Build a Controlled-Z gate. CZ applies a phase flip when both qubits are |1⟩.",
        ),
        two_wire_level(
            Swap,
            {
                let mut toolbox = single_and_cnot();
                toolbox.push(ControlledZ);
                toolbox
            },
            vec![
                CanonicalStep::new(Cnot, C0_T1),
                CanonicalStep::new(Cnot, C1_T0),
                CanonicalStep::new(Cnot, C0_T1),
            ],
            ["00", "10", "01", "11"],
            "Build a SWAP gate from CNOTs. SWAP maps |a,b⟩ → |b,a⟩.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::wire::WireIndex, test_utils::trng};

    #[test]
    fn builtin_levels_are_valid_and_ordered() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(
            catalog
                .iter()
                .map(|level| level.target_unitary.as_str())
                .collect::<Vec<_>>(),
            vec!["CNOT_FLIPPED", "CONTROLLED_Z", "SWAP"]
        );
        LevelCatalog::new(catalog.iter().cloned().collect()).expect("builtin levels validate");
    }

    #[test]
    fn progression() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.first().unwrap().target_unitary, "CNOT_FLIPPED");
        assert_eq!(
            catalog.next_after("CONTROLLED_Z").unwrap().target_unitary,
            "SWAP"
        );
        assert!(catalog.next_after("SWAP").is_none());
        assert!(catalog.next_after("TOFFOLI").is_none());
        assert!(matches!(
            catalog.require("TOFFOLI"),
            Err(LevelError::UnknownLevel(name)) if name == "TOFFOLI"
        ));
    }

    #[test]
    fn swap_toolbox_and_hint() {
        let swap = LevelCatalog::builtin().get("SWAP").unwrap();
        assert!(swap.allows(GateKind::ControlledZ));
        assert!(!swap.allows(GateKind::Swap));
        assert_eq!(swap.expected_truth.output, vec!["00", "10", "01", "11"]);

        let hint = swap.canonical_circuit(&mut trng()).unwrap().unwrap();
        assert_eq!(hint.len(), 3);
        assert!(hint.is_well_formed());
        assert!(hint.iter().all(|gate| gate.kind() == GateKind::Cnot));
        assert_eq!(
            hint.gates()[1].qubit_order(),
            QubitOrder([1, 0]),
        );
    }

    #[test]
    fn canonical_single_wire_steps_land_on_their_wire() {
        let cz = LevelCatalog::builtin().get("CONTROLLED_Z").unwrap();
        let hint = cz.canonical_circuit(&mut trng()).unwrap().unwrap();
        assert_eq!(hint.gates()[0].wire(), Some(WireIndex::B));
    }

    #[test]
    fn soft_limit_is_advisory() {
        let mut rng = trng();
        let level = LevelCatalog::builtin().first().unwrap();
        let circuit: Circuit = (0..=MAX_GATES)
            .map(|_| PlacedGate::single(GateId::random(&mut rng), GateKind::X, WireIndex::A).unwrap())
            .collect();
        assert!(level.exceeds_soft_limit(&circuit));
        assert!(!level.exceeds_soft_limit(&circuit.remove(circuit.gates()[0].id())));
    }

    #[test]
    fn from_json_reads_and_validates() {
        let json = r#"[{
            "target_unitary": "SWAP",
            "number_of_qubits": 2,
            "toolbox": ["CNOT"],
            "expected_truth": {"input": ["00","01","10","11"], "output": ["00","10","01","11"]},
            "canonical": [
                {"gate": "CNOT", "order": [0, 1]},
                {"gate": "CNOT", "order": [1, 0]},
                {"gate": "CNOT", "order": [0, 1]}
            ],
            "ui_max_gates": 6
        }]"#;
        let catalog = LevelCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().unwrap().ui_max_gates, Some(6));
        assert_eq!(catalog.first().unwrap().description, None);

        let bad_step = json.replace("[1, 0]", "[1, 1]");
        assert!(matches!(
            LevelCatalog::from_json(&bad_step),
            Err(LevelError::InvalidCanonicalStep { step: 1, .. })
        ));

        let bad_gate = json.replace("\"toolbox\": [\"CNOT\"]", "\"toolbox\": [\"TOFFOLI\"]");
        assert!(matches!(LevelCatalog::from_json(&bad_gate), Err(LevelError::Json(_))));
    }

    #[test]
    fn rejects_malformed_levels() {
        let mut level = LevelCatalog::builtin().get("SWAP").unwrap().clone();
        assert!(matches!(
            LevelCatalog::new(vec![level.clone(), level.clone()]),
            Err(LevelError::DuplicateLevel(_))
        ));

        level.expected_truth.output.pop();
        assert!(matches!(
            LevelCatalog::new(vec![level.clone()]),
            Err(LevelError::MalformedTruthTable { inputs: 4, outputs: 3, .. })
        ));

        level.number_of_qubits = 3;
        assert!(matches!(
            LevelCatalog::new(vec![level]),
            Err(LevelError::UnsupportedWireCount { wires: 3, .. })
        ));
    }
}
