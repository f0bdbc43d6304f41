pub mod circuit;
pub mod gate;
pub mod gate_type;
pub mod truth_table;
pub mod wire;
