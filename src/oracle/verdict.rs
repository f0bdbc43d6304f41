use itertools::{Itertools, izip};
use serde::Serialize;

use super::{OracleError, OracleResponse};
use crate::core::truth_table::TruthTable;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerdictRow {
    pub input: String,
    pub trial_output: String,
    pub target_output: String,
    pub matches: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub rows: Vec<VerdictRow>,
    pub all_correct: bool,
}

impl Verdict {
    pub fn mismatches(&self) -> impl Iterator<Item = &VerdictRow> {
        self.rows.iter().filter(|row| !row.matches)
    }
}

/// Pair trial and target rows positionally.
///
/// Rows are aligned by index and the trial inputs are reported; the service is
/// trusted to emit both tables in the same input order (see [`validate`]).
/// No rows means not correct.
pub fn reduce(response: &OracleResponse) -> Verdict {
    let trial = &response.trial_truth_table;
    let target = &response.target_truth_table;

    let rows = izip!(&trial.input, &trial.output, &target.output)
        .map(|(input, trial_output, target_output)| VerdictRow {
            input: input.clone(),
            trial_output: trial_output.clone(),
            target_output: target_output.clone(),
            matches: trial_output == target_output,
        })
        .collect_vec();

    let all_correct = !rows.is_empty() && rows.iter().all(|row| row.matches);

    Verdict { rows, all_correct }
}

/// Check the alignment contract `reduce` relies on: each table is
/// input/output aligned, both have the same row count and the same inputs.
pub fn validate(response: &OracleResponse) -> Result<(), OracleError> {
    let trial = &response.trial_truth_table;
    let target = &response.target_truth_table;

    check_aligned("Trial", trial)?;
    check_aligned("Target", target)?;

    if trial.len() != target.len() {
        return Err(OracleError::RowCountMismatch {
            trial: trial.len(),
            target: target.len(),
        });
    }

    if let Some((row, (trial, target))) = trial
        .input
        .iter()
        .zip(&target.input)
        .find_position(|(trial, target)| trial != target)
    {
        return Err(OracleError::InputMismatch {
            row,
            trial: trial.clone(),
            target: target.clone(),
        });
    }

    Ok(())
}

fn check_aligned(table: &'static str, truth_table: &TruthTable) -> Result<(), OracleError> {
    if truth_table.is_aligned() {
        Ok(())
    } else {
        Err(OracleError::MisalignedTable {
            table,
            inputs: truth_table.input.len(),
            outputs: truth_table.output.len(),
        })
    }
}
