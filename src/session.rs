//! One student's working state: the active exercise, the circuit being built
//! and the grading submission for it.
//!
//! Submission follows `Idle -> Pending -> Succeeded | Failed`. Clearing the
//! circuit or changing level returns to `Idle` from any state and invalidates
//! whatever grading call is still outstanding, so a late answer can never be
//! shown against a different circuit or exercise.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument, warn};

use crate::{
    core::{
        circuit::Circuit,
        gate::{GateId, PlacedGate},
        gate_type::GateKind,
        wire::{QubitOrder, WireIndex},
    },
    input::PlacementSink,
    level::{Exercise, LevelCatalog},
    oracle::{Oracle, OracleError, OracleRequest, OracleResponse, Verdict, reduce, translate, validate},
};

/// Handle of one grading call. Only the most recent ticket can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending {
        ticket: Ticket,
    },
    Succeeded(Verdict),
    Failed {
        message: String,
    },
}

pub struct Session {
    exercise: Exercise,
    circuit: Circuit,
    state: SubmissionState,
    next_ticket: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(exercise: Exercise) -> Self {
        Self::with_rng(exercise, StdRng::from_os_rng())
    }

    /// Session with reproducible gate ids.
    pub fn with_seed(exercise: Exercise, seed: u64) -> Self {
        Self::with_rng(exercise, StdRng::seed_from_u64(seed))
    }

    fn with_rng(exercise: Exercise, rng: StdRng) -> Self {
        Self {
            exercise,
            circuit: Circuit::empty(),
            state: SubmissionState::Idle,
            next_ticket: 0,
            rng,
        }
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match &self.state {
            SubmissionState::Succeeded(verdict) => Some(verdict),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending { .. })
    }

    pub fn is_solved(&self) -> bool {
        self.verdict().is_some_and(|verdict| verdict.all_correct)
    }

    /// Append an already built gate, e.g. from a hint. A gate whose id is
    /// already in the circuit is given a fresh one; the id actually stored is
    /// returned.
    pub fn append(&mut self, gate: PlacedGate) -> GateId {
        let gate = if self.circuit.contains(gate.id()) {
            gate.with_id(GateId::random(&mut self.rng))
        } else {
            gate
        };
        let id = gate.id();
        self.circuit = self.circuit.append(gate);
        id
    }

    pub fn remove_gate(&mut self, id: GateId) {
        self.circuit = self.circuit.remove(id);
    }

    pub fn move_gate(&mut self, id: GateId, column: isize) {
        self.circuit = self.circuit.move_to_column(id, column);
    }

    pub fn set_gate_order(&mut self, id: GateId, order: impl Into<QubitOrder>) {
        self.circuit = self.circuit.set_order(id, order);
    }

    /// Empty the circuit and drop any verdict or outstanding call.
    pub fn clear(&mut self) {
        debug!("clearing circuit");
        self.reset();
    }

    pub fn change_level(&mut self, exercise: Exercise) {
        info!(level = %exercise.target_unitary, "changing level");
        self.exercise = exercise;
        self.reset();
    }

    /// Move to the level after the current one. Returns `false` on the last level.
    pub fn advance_level(&mut self, catalog: &LevelCatalog) -> bool {
        match catalog.next_after(&self.exercise.target_unitary) {
            Some(next) => {
                self.change_level(next.clone());
                true
            }
            None => false,
        }
    }

    /// Start grading the current circuit.
    ///
    /// Returns `None` without changing state for an empty circuit, or while a
    /// call is already outstanding. Otherwise the previous verdict or error is
    /// dropped, the session becomes `Pending`, and the caller gets the request
    /// to send plus the ticket to resolve it with.
    pub fn begin_submission(&mut self) -> Option<(Ticket, OracleRequest)> {
        if self.circuit.is_empty() {
            debug!("empty circuit, nothing to submit");
            return None;
        }
        if let SubmissionState::Pending { ticket } = self.state {
            warn!(?ticket, "submission already pending");
            return None;
        }

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.state = SubmissionState::Pending { ticket };

        let request = translate(&self.exercise, &self.circuit);
        info!(?ticket, gates = request.len(), "submitting circuit");
        Some((ticket, request))
    }

    /// Apply the outcome of a grading call. Stale tickets are dropped and
    /// `false` is returned.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<OracleResponse, OracleError>,
    ) -> bool {
        if self.state != (SubmissionState::Pending { ticket }) {
            debug!(?ticket, "dropping stale oracle result");
            return false;
        }

        self.state = match result.and_then(|response| {
            validate(&response)?;
            Ok(reduce(&response))
        }) {
            Ok(verdict) => {
                info!(?ticket, correct = verdict.all_correct, "submission graded");
                SubmissionState::Succeeded(verdict)
            }
            Err(err) => {
                warn!(?ticket, %err, "submission failed");
                SubmissionState::Failed {
                    message: err.to_string(),
                }
            }
        };
        true
    }

    /// Submit the circuit to `oracle` and wait for the outcome.
    #[instrument(skip_all)]
    pub async fn submit<O: Oracle>(&mut self, oracle: &O) -> &SubmissionState {
        if let Some((ticket, request)) = self.begin_submission() {
            let result = oracle.simulate(&request).await;
            self.resolve(ticket, result);
        }
        &self.state
    }

    fn reset(&mut self) {
        self.circuit = Circuit::clear();
        self.state = SubmissionState::Idle;
    }
}

impl PlacementSink for Session {
    fn place_single(&mut self, kind: GateKind, wire: WireIndex) {
        match PlacedGate::single(GateId::random(&mut self.rng), kind, wire) {
            Ok(gate) => {
                self.append(gate);
            }
            Err(err) => warn!(%err, "ignoring placement"),
        }
    }

    fn place_dual(&mut self, kind: GateKind) {
        match PlacedGate::dual_default(GateId::random(&mut self.rng), kind) {
            Ok(gate) => {
                self.append(gate);
            }
            Err(err) => warn!(%err, "ignoring placement"),
        }
    }
}
