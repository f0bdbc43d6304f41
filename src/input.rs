//! Drop events from the drag-and-drop layer, resolved into placements.
//!
//! The UI reports two string ids: the toolbox chip being dragged and the wire
//! it was dropped on. Ids that mean nothing here are ignored, not reported.

use tracing::debug;

use crate::core::{gate_type::GateKind, wire::WireIndex};

/// Receiver of resolved placements.
pub trait PlacementSink {
    /// Place a single-wire gate of `kind` on `wire`.
    fn place_single(&mut self, kind: GateKind, wire: WireIndex);
    /// Place a dual-wire gate of `kind` at the default control/target order.
    fn place_dual(&mut self, kind: GateKind);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropAction {
    Single { kind: GateKind, wire: WireIndex },
    Dual { kind: GateKind },
}

pub const DROP_WIRE_A: &str = "drop-wire-a";
pub const DROP_WIRE_B: &str = "drop-wire-b";

const TOOLS: [(&str, GateKind); 11] = [
    ("tool-cnot", GateKind::Cnot),
    ("tool-cnot-flipped", GateKind::CnotFlipped),
    ("tool-cz", GateKind::ControlledZ),
    ("tool-swap", GateKind::Swap),
    ("tool-x", GateKind::X),
    ("tool-h", GateKind::H),
    ("tool-t", GateKind::T),
    ("tool-s", GateKind::S),
    ("tool-rx", GateKind::Rx),
    ("tool-ry", GateKind::Ry),
    ("tool-u", GateKind::U),
];

pub fn tool_gate(tool_id: &str) -> Option<GateKind> {
    TOOLS
        .iter()
        .find(|(id, _)| *id == tool_id)
        .map(|(_, kind)| *kind)
}

/// Toolbox chip id for `kind`.
pub fn tool_id(kind: GateKind) -> &'static str {
    TOOLS
        .iter()
        .find(|(_, tool)| *tool == kind)
        .map(|(id, _)| *id)
        .unwrap_or_default()
}

pub fn drop_wire(target_id: &str) -> Option<WireIndex> {
    match target_id {
        DROP_WIRE_A => Some(WireIndex::A),
        DROP_WIRE_B => Some(WireIndex::B),
        _ => None,
    }
}

pub fn resolve_drop(tool_id: &str, target_id: &str) -> Option<DropAction> {
    let wire = drop_wire(target_id)?;
    let kind = tool_gate(tool_id)?;

    Some(if kind.is_dual_wire() {
        DropAction::Dual { kind }
    } else {
        DropAction::Single { kind, wire }
    })
}

/// Resolve a drop and forward it to `sink`. Returns what was placed, if anything.
pub fn handle_drop(
    sink: &mut impl PlacementSink,
    tool_id: &str,
    target_id: &str,
) -> Option<DropAction> {
    let Some(action) = resolve_drop(tool_id, target_id) else {
        debug!(tool_id, target_id, "ignoring unresolved drop");
        return None;
    };

    match action {
        DropAction::Single { kind, wire } => sink.place_single(kind, wire),
        DropAction::Dual { kind } => sink.place_dual(kind),
    }
    Some(action)
}
