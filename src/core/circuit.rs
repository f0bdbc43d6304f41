//! Student circuit: an ordered, column-indexed list of placed gates.
//!
//! Every operation is a pure transformation that returns the next circuit and
//! leaves `self` untouched. Two invariants hold for any value reachable through
//! these operations:
//! - columns are exactly `0..n-1` and array order is column order;
//! - each gate's placement matches the arity of its kind;
//! - no two gates share an id.
//!
//! Unknown ids are tolerated everywhere: input events can reference a gate
//! that a previous event already removed.

use itertools::Itertools;
use log::trace;

use super::{
    gate::{GateId, PlacedGate},
    wire::{ControlTargetOrder, QubitOrder},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Circuit {
    gates: Vec<PlacedGate>,
}

impl Circuit {
    pub fn empty() -> Self {
        Self { gates: Vec::new() }
    }

    /// Fresh empty circuit; used on explicit clear and on level change.
    pub fn clear() -> Self {
        Self::empty()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn gates(&self) -> &[PlacedGate] {
        &self.gates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedGate> {
        self.gates.iter()
    }

    pub fn get(&self, id: GateId) -> Option<&PlacedGate> {
        self.gates.iter().find(|gate| gate.id() == id)
    }

    pub fn contains(&self, id: GateId) -> bool {
        self.get(id).is_some()
    }

    /// Append at the end. The incoming column is ignored.
    /// Push `gate` at the end. A gate whose id is already present is ignored.
    pub fn append(&self, gate: PlacedGate) -> Self {
        if self.contains(gate.id()) {
            trace!("append: gate {} already in circuit, ignoring", gate.id());
            return self.clone();
        }

        let mut gates = self.gates.clone();
        gates.push(gate.with_column(self.gates.len()));
        Self::renumbered(gates)
    }

    pub fn remove(&self, id: GateId) -> Self {
        if !self.contains(id) {
            trace!("remove: gate {id} not in circuit, ignoring");
            return self.clone();
        }

        Self::renumbered(
            self.sorted_by_column()
                .into_iter()
                .filter(|gate| gate.id() != id)
                .collect(),
        )
    }

    /// Move a gate to `target`, clamped to `[0, n]` where `n` counts the
    /// other gates. A negative target lands at the front.
    pub fn move_to_column(&self, id: GateId, target: isize) -> Self {
        let mut gates = self.sorted_by_column();
        let Some(from) = gates.iter().position(|gate| gate.id() == id) else {
            trace!("move_to_column: gate {id} not in circuit, ignoring");
            return self.clone();
        };

        let gate = gates.remove(from);
        let to = target.clamp(0, gates.len() as isize) as usize;
        gates.insert(to, gate);

        Self::renumbered(gates)
    }

    /// Set the control/target order of a dual-wire gate.
    ///
    /// An order that is not legal for the gate's kind is replaced by
    /// [`ControlTargetOrder::DEFAULT`]. Single-wire gates have no order and are
    /// left as they are.
    pub fn set_order(&self, id: GateId, order: impl Into<QubitOrder>) -> Self {
        let order = order.into();
        if !self.contains(id) {
            trace!("set_order: gate {id} not in circuit, ignoring");
            return self.clone();
        }

        let gates = self
            .gates
            .iter()
            .cloned()
            .map(|gate| {
                if gate.id() != id || gate.order().is_none() {
                    return gate;
                }
                let next = ControlTargetOrder::try_from(order)
                    .ok()
                    .filter(|order| gate.kind().is_valid_order(*order))
                    .unwrap_or_else(|| {
                        trace!("set_order: {order:?} illegal for {}, using default", gate.kind());
                        ControlTargetOrder::DEFAULT
                    });
                gate.with_order(next)
            })
            .collect();

        Self { gates }
    }

    /// Copy of the gates sorted by column, independent of storage order.
    pub fn sorted_by_column(&self) -> Vec<PlacedGate> {
        let mut gates = self.gates.clone();
        gates.sort_by_key(PlacedGate::column);
        gates
    }

    /// Contiguous columns in array order, placement consistent with arity,
    /// and unique ids.
    pub fn is_well_formed(&self) -> bool {
        self.gates.iter().enumerate().all(|(index, gate)| {
            gate.column() == index && gate.kind().arity() == gate.placement().arity()
        }) && self.gates.iter().map(PlacedGate::id).all_unique()
    }

    /// Columns follow array order.
    fn renumbered(gates: Vec<PlacedGate>) -> Self {
        let gates = gates
            .into_iter()
            .enumerate()
            .map(|(column, gate)| gate.with_column(column))
            .collect();
        Self { gates }
    }
}

impl<'c> IntoIterator for &'c Circuit {
    type Item = &'c PlacedGate;
    type IntoIter = std::slice::Iter<'c, PlacedGate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}

impl FromIterator<PlacedGate> for Circuit {
    fn from_iter<I: IntoIterator<Item = PlacedGate>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Circuit::empty(), |circuit, gate| circuit.append(gate))
    }
}

#[cfg(test)]
mod tests;
