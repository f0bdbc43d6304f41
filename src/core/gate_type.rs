use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::wire::{ControlTargetOrder, LEGAL_ORDERS};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown gate kind: {0}")]
    UnknownGate(String),
}
pub type GateKindError = Error;

/// Number of wires a gate acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Single,
    Dual,
}

impl Arity {
    pub fn wires(self) -> usize {
        match self {
            Arity::Single => 1,
            Arity::Dual => 2,
        }
    }
}

/// Primitive gates a student can place. The serialized names are the ones
/// the grading service expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateKind {
    X,
    H,
    S,
    T,
    Rx,
    Ry,
    U,
    Cnot,
    CnotFlipped,
    ControlledZ,
    Swap,
}

impl GateKind {
    pub const ALL: [GateKind; 11] = [
        GateKind::X,
        GateKind::H,
        GateKind::S,
        GateKind::T,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::U,
        GateKind::Cnot,
        GateKind::CnotFlipped,
        GateKind::ControlledZ,
        GateKind::Swap,
    ];

    pub const SINGLE_WIRE: [GateKind; 7] = [
        GateKind::X,
        GateKind::H,
        GateKind::S,
        GateKind::T,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::U,
    ];

    pub fn arity(self) -> Arity {
        match self {
            GateKind::X
            | GateKind::H
            | GateKind::S
            | GateKind::T
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::U => Arity::Single,
            GateKind::Cnot | GateKind::CnotFlipped | GateKind::ControlledZ | GateKind::Swap => {
                Arity::Dual
            }
        }
    }

    pub fn is_single_wire(self) -> bool {
        self.arity() == Arity::Single
    }

    pub fn is_dual_wire(self) -> bool {
        self.arity() == Arity::Dual
    }

    /// Control/target orders the UI may offer for this gate.
    ///
    /// The set depends only on the wire count, so every dual-wire gate shares
    /// it. Single-wire gates carry no order and get an empty slice.
    pub fn allowed_orders(self) -> &'static [ControlTargetOrder] {
        match self.arity() {
            Arity::Single => &[],
            Arity::Dual => &LEGAL_ORDERS,
        }
    }

    pub fn is_valid_order(self, order: ControlTargetOrder) -> bool {
        self.allowed_orders().contains(&order)
    }

    /// Name used on the wire and in level definitions.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::X => "X",
            GateKind::H => "H",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::U => "U",
            GateKind::Cnot => "CNOT",
            GateKind::CnotFlipped => "CNOT_FLIPPED",
            GateKind::ControlledZ => "CONTROLLED_Z",
            GateKind::Swap => "SWAP",
        }
    }

    /// Label for a gate chip.
    pub fn label(self) -> &'static str {
        match self {
            GateKind::X => "X",
            GateKind::H => "H",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Rx => "Rx(π/2)",
            GateKind::Ry => "Ry(π/2)",
            GateKind::U => "U",
            GateKind::Cnot => "CNOT",
            GateKind::CnotFlipped => "CNOT (flipped)",
            GateKind::ControlledZ => "CZ",
            GateKind::Swap => "SWAP",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = GateKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GateKindError::UnknownGate(s.to_owned()))
    }
}
