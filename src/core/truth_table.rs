use serde::{Deserialize, Serialize};

/// Row-aligned basis-state inputs and the outputs observed for them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruthTable {
    pub input: Vec<String>,
    pub output: Vec<String>,
}

impl TruthTable {
    pub fn new<I, O>(input: I, output: O) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            output: output.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of complete rows.
    pub fn len(&self) -> usize {
        self.input.len().min(self.output.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_aligned(&self) -> bool {
        self.input.len() == self.output.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.input
            .iter()
            .zip(&self.output)
            .map(|(input, output)| (input.as_str(), output.as_str()))
    }
}

/// Computational basis inputs of an `n`-wire circuit, `|0…0⟩` first.
///
/// Empty when `2^wires` does not fit in a `usize`.
pub fn basis_inputs(wires: usize) -> Vec<String> {
    let Some(states) = u32::try_from(wires)
        .ok()
        .and_then(|wires| 1usize.checked_shl(wires))
    else {
        return Vec::new();
    };

    (0..states)
        .map(|state| format!("{state:0wires$b}"))
        .collect()
}
