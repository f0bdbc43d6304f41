use std::fmt;

use rand::Rng;

use super::{
    gate_type::{Arity, GateKind},
    wire::{ControlTargetOrder, QubitOrder, WireIndex},
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("{kind} acts on {expected} wire(s) but was given a {got}-wire placement")]
    ArityMismatch {
        kind: GateKind,
        expected: usize,
        got: usize,
    },
    #[error("{kind} does not accept control/target order {order:?}")]
    IllegalOrder { kind: GateKind, order: QubitOrder },
}
pub type GateError = Error;

/// Identifier of a placed gate. Random 128 bits, so collisions inside one
/// circuit are not a practical concern.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateId(u128);

impl GateId {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.random())
    }

    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    pub fn to_hex(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Debug for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GateId({})", self.to_hex())
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Where a gate sits. The variant always matches the gate's arity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    Single(WireIndex),
    Dual(ControlTargetOrder),
}

impl Placement {
    pub fn arity(&self) -> Arity {
        match self {
            Placement::Single(_) => Arity::Single,
            Placement::Dual(_) => Arity::Dual,
        }
    }

    pub fn qubit_order(&self) -> QubitOrder {
        match *self {
            Placement::Single(wire) => QubitOrder::degenerate(wire),
            Placement::Dual(order) => order.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedGate {
    id: GateId,
    kind: GateKind,
    placement: Placement,
    column: usize,
}

impl PlacedGate {
    pub fn single(id: GateId, kind: GateKind, wire: WireIndex) -> Result<Self, GateError> {
        Self::new(id, kind, Placement::Single(wire))
    }

    pub fn dual(id: GateId, kind: GateKind, order: ControlTargetOrder) -> Result<Self, GateError> {
        Self::new(id, kind, Placement::Dual(order))
    }

    pub fn dual_default(id: GateId, kind: GateKind) -> Result<Self, GateError> {
        Self::dual(id, kind, ControlTargetOrder::DEFAULT)
    }

    /// Rebuild a gate from its serialized `(kind, [a, b])` step.
    pub fn from_step(id: GateId, kind: GateKind, order: QubitOrder) -> Result<Self, GateError> {
        let illegal = || GateError::IllegalOrder { kind, order };
        match kind.arity() {
            Arity::Single => {
                let wire = order.as_single_wire().ok_or_else(illegal)?;
                Self::single(id, kind, wire)
            }
            Arity::Dual => {
                let order = ControlTargetOrder::try_from(order).map_err(|_| illegal())?;
                Self::dual(id, kind, order)
            }
        }
    }

    /// Column starts at 0; the circuit assigns the real one on insertion.
    pub fn new(id: GateId, kind: GateKind, placement: Placement) -> Result<Self, GateError> {
        if kind.arity() != placement.arity() {
            return Err(GateError::ArityMismatch {
                kind,
                expected: kind.arity().wires(),
                got: placement.arity().wires(),
            });
        }
        if let Placement::Dual(order) = placement {
            if !kind.is_valid_order(order) {
                return Err(GateError::IllegalOrder {
                    kind,
                    order: order.into(),
                });
            }
        }

        Ok(Self {
            id,
            kind,
            placement,
            column: 0,
        })
    }

    pub fn id(&self) -> GateId {
        self.id
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn wire(&self) -> Option<WireIndex> {
        match self.placement {
            Placement::Single(wire) => Some(wire),
            Placement::Dual(_) => None,
        }
    }

    pub fn order(&self) -> Option<ControlTargetOrder> {
        match self.placement {
            Placement::Single(_) => None,
            Placement::Dual(order) => Some(order),
        }
    }

    pub fn qubit_order(&self) -> QubitOrder {
        self.placement.qubit_order()
    }

    pub(crate) fn with_id(mut self, id: GateId) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Replace the order of a dual-wire gate. Single-wire gates are returned unchanged.
    pub(crate) fn with_order(mut self, order: ControlTargetOrder) -> Self {
        if let Placement::Dual(current) = &mut self.placement {
            *current = order;
        }
        self
    }
}
