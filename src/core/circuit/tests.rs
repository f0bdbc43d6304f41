use rand::Rng;

use super::*;
use crate::{
    core::{
        gate::Placement,
        gate_type::GateKind,
        wire::{ControlTargetOrder, QubitOrder, WireIndex},
    },
    test_utils::trng,
};

fn cnot(raw: u128) -> PlacedGate {
    PlacedGate::dual_default(GateId::from_raw(raw), GateKind::Cnot).unwrap()
}

fn h(raw: u128, wire: WireIndex) -> PlacedGate {
    PlacedGate::single(GateId::from_raw(raw), GateKind::H, wire).unwrap()
}

fn ids(circuit: &Circuit) -> Vec<u128> {
    circuit
        .iter()
        .map(|gate| {
            (0..16u128)
                .find(|raw| GateId::from_raw(*raw) == gate.id())
                .expect("test ids are below 16")
        })
        .collect()
}

fn three_gates() -> Circuit {
    Circuit::empty()
        .append(cnot(1))
        .append(h(2, WireIndex::A))
        .append(h(3, WireIndex::B))
}

#[test]
fn append_forces_column_to_length() {
    let circuit = Circuit::empty()
        .append(cnot(1).with_column(42))
        .append(h(2, WireIndex::B).with_column(7));

    assert_eq!(circuit.len(), 2);
    assert_eq!(circuit.gates()[0].column(), 0);
    assert_eq!(circuit.gates()[1].column(), 1);
    assert!(circuit.is_well_formed());
}

#[test]
fn operations_do_not_touch_the_input() {
    let before = three_gates();
    let snapshot = before.clone();

    let _ = before.remove(GateId::from_raw(1));
    let _ = before.move_to_column(GateId::from_raw(3), 0);
    let _ = before.set_order(GateId::from_raw(1), ControlTargetOrder::FLIPPED);

    assert_eq!(before, snapshot);
}

#[test]
fn remove_renumbers_preserving_relative_order() {
    let circuit = three_gates().remove(GateId::from_raw(2));

    assert_eq!(ids(&circuit), vec![1, 3]);
    assert!(circuit.is_well_formed());
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let circuit = three_gates();
    assert_eq!(circuit.remove(GateId::from_raw(9)), circuit);
    assert_eq!(Circuit::empty().remove(GateId::from_raw(1)), Circuit::empty());
}

#[test]
fn move_to_column_reinserts_at_target() {
    let circuit = three_gates();

    assert_eq!(ids(&circuit.move_to_column(GateId::from_raw(3), 0)), vec![3, 1, 2]);
    assert_eq!(ids(&circuit.move_to_column(GateId::from_raw(1), 1)), vec![2, 1, 3]);
    assert_eq!(ids(&circuit.move_to_column(GateId::from_raw(1), 2)), vec![2, 3, 1]);

    let moved = circuit.move_to_column(GateId::from_raw(2), 0);
    assert!(moved.is_well_formed());
}

#[test]
fn move_to_column_clamps_target() {
    let circuit = three_gates();

    assert_eq!(ids(&circuit.move_to_column(GateId::from_raw(1), 100)), vec![2, 3, 1]);
    assert_eq!(ids(&circuit.move_to_column(GateId::from_raw(3), -5)), vec![3, 1, 2]);
}

#[test]
fn move_unknown_id_is_a_no_op() {
    let circuit = three_gates();
    assert_eq!(circuit.move_to_column(GateId::from_raw(11), 0), circuit);
}

#[test]
fn set_order_accepts_legal_order() {
    let circuit = three_gates().set_order(GateId::from_raw(1), ControlTargetOrder::FLIPPED);
    assert_eq!(
        circuit.get(GateId::from_raw(1)).unwrap().order(),
        Some(ControlTargetOrder::FLIPPED)
    );
}

#[test]
fn set_order_falls_back_to_default_on_illegal_order() {
    let flipped = three_gates().set_order(GateId::from_raw(1), ControlTargetOrder::FLIPPED);

    for illegal in [QubitOrder([0, 0]), QubitOrder([1, 1]), QubitOrder([0, 5]), QubitOrder([3, 2])] {
        let circuit = flipped.set_order(GateId::from_raw(1), illegal);
        assert_eq!(
            circuit.get(GateId::from_raw(1)).unwrap().order(),
            Some(ControlTargetOrder::DEFAULT),
            "{illegal:?}"
        );
        assert!(circuit.is_well_formed());
    }
}

#[test]
fn set_order_leaves_single_wire_gates_alone() {
    let circuit = three_gates();
    let updated = circuit.set_order(GateId::from_raw(3), QubitOrder([1, 0]));

    assert_eq!(updated, circuit);
    assert_eq!(
        updated.get(GateId::from_raw(3)).unwrap().placement(),
        Placement::Single(WireIndex::B)
    );
}

#[test]
fn set_order_unknown_id_is_a_no_op() {
    let circuit = three_gates();
    assert_eq!(circuit.set_order(GateId::from_raw(12), [1, 0]), circuit);
}

#[test]
fn clear_returns_empty_circuit() {
    assert!(Circuit::clear().is_empty());
    assert_eq!(Circuit::clear(), Circuit::default());
}

#[test]
fn sorted_by_column_does_not_trust_storage_order() {
    let mut circuit = three_gates();
    circuit.gates.reverse();

    let sorted = circuit.sorted_by_column();
    assert_eq!(
        sorted.iter().map(PlacedGate::column).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(!circuit.is_well_formed());
}

#[test]
fn remove_first_of_dual_then_single() {
    let circuit = Circuit::empty().append(cnot(1)).append(h(2, WireIndex::B));
    assert_eq!(circuit.gates()[1].column(), 1);

    let circuit = circuit.remove(GateId::from_raw(1));

    assert_eq!(circuit.len(), 1);
    let only = &circuit.gates()[0];
    assert_eq!(only.id(), GateId::from_raw(2));
    assert_eq!(only.column(), 0);
    assert_eq!(only.placement(), Placement::Single(WireIndex::B));
    assert!(circuit.get(GateId::from_raw(1)).is_none());
}

#[test]
fn random_operation_sequences_keep_invariants() {
    let mut rng = trng();

    for _ in 0..50 {
        let mut circuit = Circuit::empty();
        let mut issued = Vec::new();

        for _ in 0..40 {
            let known = (!issued.is_empty()).then(|| issued[rng.random_range(0..issued.len())]);
            let stale = GateId::random(&mut rng);
            let target = known.unwrap_or(stale);

            circuit = match rng.random_range(0..5) {
                0 | 1 => {
                    let id = GateId::random(&mut rng);
                    issued.push(id);
                    let gate = if rng.random_bool(0.5) {
                        PlacedGate::dual_default(id, GateKind::Swap).unwrap()
                    } else {
                        let wire = WireIndex::new(rng.random_range(0..2)).unwrap();
                        PlacedGate::single(id, GateKind::T, wire).unwrap()
                    };
                    circuit.append(gate)
                }
                2 => circuit.remove(target),
                3 => circuit.move_to_column(target, rng.random_range(-3i32..12) as isize),
                _ => circuit.set_order(
                    target,
                    QubitOrder([rng.random_range(0..3), rng.random_range(0..3)]),
                ),
            };

            assert!(circuit.is_well_formed(), "{circuit:?}");
        }
    }
}

#[test]
fn from_iterator_appends_in_order() {
    let circuit: Circuit = [h(1, WireIndex::A), cnot(2)].into_iter().collect();
    assert_eq!(ids(&circuit), vec![1, 2]);
    assert!(circuit.is_well_formed());
}

#[test]
fn duplicate_id_is_not_appended() {
    let gate = h(1, WireIndex::A);
    let circuit = Circuit::empty()
        .append(gate.clone())
        .append(gate.clone())
        .append(cnot(2));

    assert_eq!(ids(&circuit), vec![1, 2]);
    assert!(circuit.is_well_formed());

    let circuit = circuit.remove(gate.id());
    assert_eq!(ids(&circuit), vec![2]);
}

#[test]
fn shared_ids_are_not_well_formed() {
    let mut circuit = three_gates();
    circuit.gates[2] = h(1, WireIndex::B).with_column(2);
    assert!(!circuit.is_well_formed());
}
