use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

/// Errors that can occur when building wire indices and orders
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Wire index outside the circuit
    #[error("Invalid wire index: {0}")]
    InvalidWireIndex(usize),
    /// Control and target point at the same wire
    #[error("Control and target must be distinct wires, got ({0}, {0})")]
    SameControlTarget(WireIndex),
}
pub type WireError = Error;

/// Number of wires on the circuit canvas.
pub const NUMBER_OF_WIRES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WireIndex(u8);

impl WireIndex {
    /// Top wire, `|a⟩`.
    pub const A: Self = Self(0);
    /// Bottom wire, `|b⟩`.
    pub const B: Self = Self(1);

    pub fn new(index: usize) -> Result<Self, WireError> {
        if index < NUMBER_OF_WIRES {
            Ok(Self(index as u8))
        } else {
            Err(WireError::InvalidWireIndex(index))
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUMBER_OF_WIRES).map(|index| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WireIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for WireIndex {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<usize> for WireIndex {
    type Error = WireError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<WireIndex> for usize {
    fn from(wire: WireIndex) -> usize {
        wire.index()
    }
}

/// `(control, target)` assignment of a dual-wire gate. Always two distinct wires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlTargetOrder {
    control: WireIndex,
    target: WireIndex,
}

impl ControlTargetOrder {
    /// Order given to every freshly dropped dual-wire gate and the fail-soft fallback.
    pub const DEFAULT: Self = Self {
        control: WireIndex::A,
        target: WireIndex::B,
    };
    pub const FLIPPED: Self = Self {
        control: WireIndex::B,
        target: WireIndex::A,
    };

    pub fn new(control: WireIndex, target: WireIndex) -> Result<Self, WireError> {
        if control == target {
            return Err(WireError::SameControlTarget(control));
        }
        Ok(Self { control, target })
    }

    pub fn control(&self) -> WireIndex {
        self.control
    }

    pub fn target(&self) -> WireIndex {
        self.target
    }

    pub fn flipped(&self) -> Self {
        Self {
            control: self.target,
            target: self.control,
        }
    }
}

impl Default for ControlTargetOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ControlTargetOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.control, self.target)
    }
}

/// Every control/target permutation available on a two-wire circuit.
pub const LEGAL_ORDERS: [ControlTargetOrder; 2] =
    [ControlTargetOrder::DEFAULT, ControlTargetOrder::FLIPPED];

/// Uniform `[first, second]` wire pair as it travels over the wire.
///
/// Dual-wire gates encode `[control, target]`; single-wire gates encode the
/// degenerate `[wire, wire]`. Nothing about a `QubitOrder` is validated, so it
/// is also the shape in which untrusted orders arrive from the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitOrder(pub [usize; 2]);

impl QubitOrder {
    pub fn degenerate(wire: WireIndex) -> Self {
        Self([wire.index(), wire.index()])
    }

    pub fn first(&self) -> usize {
        self.0[0]
    }

    pub fn second(&self) -> usize {
        self.0[1]
    }

    /// The single wire this order points at, if it is degenerate and in range.
    pub fn as_single_wire(&self) -> Option<WireIndex> {
        match self.0 {
            [a, b] if a == b => WireIndex::new(a).ok(),
            _ => None,
        }
    }
}

impl From<ControlTargetOrder> for QubitOrder {
    fn from(order: ControlTargetOrder) -> Self {
        Self([order.control.index(), order.target.index()])
    }
}

impl From<[usize; 2]> for QubitOrder {
    fn from(pair: [usize; 2]) -> Self {
        Self(pair)
    }
}

impl TryFrom<QubitOrder> for ControlTargetOrder {
    type Error = WireError;

    fn try_from(order: QubitOrder) -> Result<Self, Self::Error> {
        ControlTargetOrder::new(WireIndex::new(order.first())?, WireIndex::new(order.second())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_index_rejects_out_of_range() {
        assert_eq!(WireIndex::new(0), Ok(WireIndex::A));
        assert_eq!(WireIndex::new(1), Ok(WireIndex::B));
        assert_eq!(WireIndex::new(2), Err(WireError::InvalidWireIndex(2)));
    }

    #[test]
    fn wire_index_serde_is_a_plain_integer() {
        assert_eq!(serde_json::to_string(&WireIndex::B).unwrap(), "1");
        assert_eq!(serde_json::from_str::<WireIndex>("0").unwrap(), WireIndex::A);
        assert!(serde_json::from_str::<WireIndex>("7").is_err());
    }

    #[test]
    fn order_requires_distinct_wires() {
        assert_eq!(
            ControlTargetOrder::new(WireIndex::B, WireIndex::B),
            Err(WireError::SameControlTarget(WireIndex::B))
        );
        assert_eq!(
            ControlTargetOrder::new(WireIndex::B, WireIndex::A),
            Ok(ControlTargetOrder::FLIPPED)
        );
        assert_eq!(ControlTargetOrder::DEFAULT.flipped(), ControlTargetOrder::FLIPPED);
    }

    #[test]
    fn qubit_order_conversions() {
        let flipped = QubitOrder::from(ControlTargetOrder::FLIPPED);
        assert_eq!(flipped, QubitOrder([1, 0]));
        assert_eq!(serde_json::to_string(&flipped).unwrap(), "[1,0]");

        assert_eq!(QubitOrder::degenerate(WireIndex::B), QubitOrder([1, 1]));
        assert_eq!(QubitOrder([1, 1]).as_single_wire(), Some(WireIndex::B));
        assert_eq!(QubitOrder([0, 1]).as_single_wire(), None);
        assert_eq!(QubitOrder([3, 3]).as_single_wire(), None);

        assert!(ControlTargetOrder::try_from(QubitOrder([0, 0])).is_err());
        assert!(ControlTargetOrder::try_from(QubitOrder([0, 2])).is_err());
    }
}
