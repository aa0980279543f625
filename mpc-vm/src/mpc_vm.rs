//! The multi-party circuit executor.
//!
//! Every party runs one [`MpcExecutor`] per computation. The executors
//! evaluate the same circuit over the same shared-storage session and stay
//! in lockstep purely through the deterministic reveal schedule: both the
//! reveal keys and the order in which correlated randomness is consumed
//! depend only on the circuit, never on secret data.

use std::collections::BTreeMap;
use std::time::Instant;

use ark_ff::PrimeField;
use eyre::{bail, ensure};
use rand::{CryptoRng, Rng};

use zkvm_mpc_core::protocols::additive::{
    self, AdditiveState, CorrelatedRandomness, FieldShare, arithmetic, conversion, reveal,
};
use zkvm_mpc_storage::poll;
use zkvm_mpc_storage::{RevealKey, RevealRole, SharedStorage};

use crate::circuit::{Circuit, Operation, OperationKind, reserved_wire_values};
use crate::types::{ExecutionResult, ExecutorPhase, MpcValue};

/// Evaluates circuits over additive secret shares with the other parties of
/// a storage session. One-shot: a second `run` call is rejected.
pub struct MpcExecutor<F: PrimeField, S, P> {
    store: S,
    state: AdditiveState<F, P>,
    phase: ExecutorPhase,
}

impl<F, S, P> MpcExecutor<F, S, P>
where
    F: PrimeField,
    S: SharedStorage,
    P: CorrelatedRandomness<F>,
{
    /// Creates the executor of party `state.id` over `store`.
    pub fn new(store: S, state: AdditiveState<F, P>) -> eyre::Result<Self> {
        ensure!(
            store.num_parties() == state.num_parties,
            "storage session has {} parties but the protocol state expects {}",
            store.num_parties(),
            state.num_parties
        );
        Ok(Self {
            store,
            state,
            phase: ExecutorPhase::InputRequired,
        })
    }

    /// The executor's lifecycle phase.
    pub fn phase(&self) -> ExecutorPhase {
        self.phase
    }

    /// The protocol state, e.g. to inspect randomness consumption after a
    /// run.
    pub fn state(&self) -> &AdditiveState<F, P> {
        &self.state
    }

    /// Evaluates `circuit` with pre-shared private inputs.
    ///
    /// `private_inputs` must hold this party's secret share for every
    /// private-input wire. Plaintext values are rejected so that all
    /// parties dispatch on identical share tags.
    pub fn run(
        &mut self,
        circuit: &Circuit<F>,
        public_inputs: &BTreeMap<usize, F>,
        private_inputs: &BTreeMap<usize, MpcValue<F>>,
    ) -> eyre::Result<ExecutionResult<F>> {
        self.begin(circuit, public_inputs)?;
        ensure!(
            private_inputs.len() == circuit.private_input_count(),
            "expected {} private inputs, got {}",
            circuit.private_input_count(),
            private_inputs.len()
        );
        for (&wire, value) in private_inputs {
            ensure!(
                wire >= circuit.public_input_wires && wire < circuit.input_wires,
                "wire {wire} is not a private-input wire"
            );
            ensure!(
                value.is_share,
                "wire {wire} (private input) is not a secret share"
            );
        }

        let mut board = self.seed_board(circuit, public_inputs);
        for (&wire, &value) in private_inputs {
            board[wire] = Some(value);
        }

        self.online_barrier()?;
        self.evaluate(circuit, board)
    }

    /// Evaluates `circuit`, first secret sharing this party's own private
    /// inputs and fetching the shares other parties produce for the rest.
    ///
    /// Exactly one party must own each private-input wire; the executor
    /// cannot tell ownership apart from a slow peer, so a wire nobody owns
    /// ends in the polling deadline.
    pub fn run_sharing_inputs<R: Rng + CryptoRng>(
        &mut self,
        circuit: &Circuit<F>,
        public_inputs: &BTreeMap<usize, F>,
        my_private_inputs: &BTreeMap<usize, F>,
        rng: &mut R,
    ) -> eyre::Result<ExecutionResult<F>> {
        self.begin(circuit, public_inputs)?;
        for &wire in my_private_inputs.keys() {
            ensure!(
                wire >= circuit.public_input_wires && wire < circuit.input_wires,
                "wire {wire} is not a private-input wire"
            );
        }

        let mut board = self.seed_board(circuit, public_inputs);

        // Sharing needs every peer listening, so the barrier comes first.
        self.online_barrier()?;

        let id = self.state.id;
        for (&wire, &value) in my_private_inputs {
            let shares = additive::share_field_element(value, self.state.num_parties, rng);
            for (receiver, share) in shares.iter().enumerate() {
                if receiver == id {
                    board[wire] = Some(MpcValue::share(share.inner()));
                } else {
                    self.store.post_input_share(
                        wire as u64,
                        id,
                        receiver,
                        share.inner().into_bigint().into(),
                    );
                }
            }
        }
        for wire in circuit.public_input_wires..circuit.input_wires {
            if my_private_inputs.contains_key(&wire) {
                continue;
            }
            let raw = poll::wait_until(self.state.poll, &format!("input share for wire {wire}"), || {
                self.store.fetch_input_share(wire as u64, id)
            })?;
            board[wire] = Some(MpcValue::share(F::from(raw)));
        }

        self.evaluate(circuit, board)
    }

    fn begin(&mut self, circuit: &Circuit<F>, public_inputs: &BTreeMap<usize, F>) -> eyre::Result<()> {
        match self.phase {
            ExecutorPhase::InputRequired => self.phase = ExecutorPhase::Running,
            _ => bail!("this executor has already executed; each instance runs only once"),
        }
        circuit.validate()?;
        ensure!(
            public_inputs.len() == circuit.public_input_count(),
            "expected {} public inputs, got {}",
            circuit.public_input_count(),
            public_inputs.len()
        );
        for &wire in public_inputs.keys() {
            ensure!(
                wire >= circuit.constant_wires && wire < circuit.public_input_wires,
                "wire {wire} is not a public-input wire"
            );
        }
        Ok(())
    }

    fn seed_board(
        &self,
        circuit: &Circuit<F>,
        public_inputs: &BTreeMap<usize, F>,
    ) -> Vec<Option<MpcValue<F>>> {
        let mut board = vec![None; circuit.wire_count];
        for (wire, value) in reserved_wire_values::<F>().into_iter().enumerate() {
            board[wire] = Some(MpcValue::public(value));
        }
        let reserved = reserved_wire_values::<F>().len();
        for (offset, &value) in circuit.constants.iter().enumerate() {
            board[reserved + offset] = Some(MpcValue::public(value));
        }
        for (&wire, &value) in public_inputs {
            board[wire] = Some(MpcValue::public(value));
        }
        board
    }

    fn online_barrier(&self) -> eyre::Result<()> {
        self.store.announce_online(self.state.id);
        poll::wait_until(self.state.poll, "all parties to come online", || {
            self.store.online_parties().iter().all(|&online| online).then_some(())
        })?;
        tracing::debug!(party = self.state.id, "all parties online");
        Ok(())
    }

    fn completed_barrier(&self) -> eyre::Result<()> {
        self.store.announce_completed(self.state.id);
        poll::wait_until(self.state.poll, "all parties to complete", || {
            self.store
                .completed_parties()
                .iter()
                .all(|&done| done)
                .then_some(())
        })?;
        Ok(())
    }

    fn evaluate(
        &mut self,
        circuit: &Circuit<F>,
        mut board: Vec<Option<MpcValue<F>>>,
    ) -> eyre::Result<ExecutionResult<F>> {
        let started = Instant::now();

        // Inputs declared as public outputs never pass through an operation,
        // so reveal them up front.
        for &wire in &circuit.public_outputs {
            if wire < circuit.input_wires {
                self.reveal_output(&mut board, wire)?;
            }
        }

        let total = circuit.operations.len();
        let mut last_logged = Instant::now();
        for (op, operation) in circuit.operations.iter().enumerate() {
            if op == 0 || op + 1 == total || last_logged.elapsed().as_secs() >= 1 {
                tracing::info!(party = self.state.id, "operation {}/{total}: {operation}", op + 1);
                last_logged = Instant::now();
            } else {
                tracing::debug!(party = self.state.id, "operation {}/{total}: {operation}", op + 1);
            }
            self.execute_operation(circuit, &mut board, op, operation)?;
        }

        self.completed_barrier()?;
        self.phase = ExecutorPhase::Completed;

        let elapsed = started.elapsed();
        tracing::info!(party = self.state.id, ?elapsed, "computation finished");
        let values = board
            .into_iter()
            .enumerate()
            .map(|(wire, value)| value.ok_or_else(|| eyre::eyre!("wire {wire} was never written")))
            .collect::<eyre::Result<Vec<_>>>()?;
        for &wire in &circuit.public_outputs {
            ensure!(
                !values[wire].is_share,
                "public output wire {wire} was not revealed"
            );
        }
        Ok(ExecutionResult { values, elapsed })
    }

    fn execute_operation(
        &mut self,
        circuit: &Circuit<F>,
        board: &mut Vec<Option<MpcValue<F>>>,
        op: usize,
        operation: &Operation,
    ) -> eyre::Result<()> {
        let inputs = operation
            .inputs
            .iter()
            .map(|&wire| self.read_wire(board, wire))
            .collect::<eyre::Result<Vec<_>>>()?;

        match operation.kind {
            OperationKind::Add => {
                let mut acc = inputs[0];
                for value in &inputs[1..] {
                    acc = self.add_values(acc, *value);
                }
                self.write_wire(board, operation.outputs[0], acc)?;
                self.reveal_if_public_output(circuit, board, operation.outputs[0])?;
            }
            OperationKind::Mul => {
                // Once any factor is a share, every factor is promoted and
                // every fold is a Beaver multiplication, so all parties
                // consume one triple per fold regardless of public factors.
                let result = if inputs.iter().any(|value| value.is_share) {
                    let mut acc = self.to_share(inputs[0]);
                    for (fold, value) in inputs[1..].iter().enumerate() {
                        let key =
                            RevealKey::indexed(op as u64, RevealRole::MulFold, fold as u32 + 1);
                        let rhs = self.to_share(*value);
                        acc = arithmetic::mul(acc, rhs, key, &self.store, &mut self.state)?;
                    }
                    MpcValue::share(acc.inner())
                } else {
                    MpcValue::public(inputs.iter().map(|value| value.value).product())
                };
                self.write_wire(board, operation.outputs[0], result)?;
                self.reveal_if_public_output(circuit, board, operation.outputs[0])?;
            }
            OperationKind::Inverse => {
                let input = inputs[0];
                let result = if input.is_share {
                    let share = arithmetic::inv(
                        FieldShare::new(input.value),
                        op as u64,
                        &self.store,
                        &mut self.state,
                    )?;
                    MpcValue::share(share.inner())
                } else {
                    MpcValue::public(input.value.inverse().unwrap_or_else(F::zero))
                };
                self.write_wire(board, operation.outputs[0], result)?;
                self.reveal_if_public_output(circuit, board, operation.outputs[0])?;
            }
            OperationKind::BitDecompose => {
                self.execute_bit_decompose(circuit, board, op, operation, inputs[0])?;
            }
        }
        Ok(())
    }

    fn execute_bit_decompose(
        &mut self,
        circuit: &Circuit<F>,
        board: &mut Vec<Option<MpcValue<F>>>,
        op: usize,
        operation: &Operation,
        input: MpcValue<F>,
    ) -> eyre::Result<()> {
        if !input.is_share {
            for (&wire, bit) in operation.outputs.iter().zip(conversion::field_to_bits(input.value)) {
                self.write_wire(board, wire, MpcValue::public(F::from(bit)))?;
            }
            return Ok(());
        }

        let bits = conversion::a2b(
            FieldShare::new(input.value),
            op as u64,
            &self.store,
            &mut self.state,
        )?;
        for (&wire, &bit) in operation.outputs.iter().zip(&bits) {
            if circuit.public_outputs.contains(&wire) {
                let opened = reveal::open_bit(
                    bit,
                    RevealKey::output(wire as u64),
                    &self.store,
                    self.state.id,
                    self.state.poll,
                )?;
                self.write_wire(board, wire, MpcValue::public(F::from(opened)))?;
            } else {
                let share = conversion::b2a(bit, wire as u64, &self.store, &mut self.state)?;
                self.write_wire(board, wire, MpcValue::share(share.inner()))?;
            }
        }
        Ok(())
    }

    fn add_values(&self, lhs: MpcValue<F>, rhs: MpcValue<F>) -> MpcValue<F> {
        let id = self.state.id;
        match (lhs.is_share, rhs.is_share) {
            (false, false) => MpcValue::public(lhs.value + rhs.value),
            (true, true) => MpcValue::share(lhs.value + rhs.value),
            (true, false) => MpcValue::share(
                arithmetic::add_public(FieldShare::new(lhs.value), rhs.value, id).inner(),
            ),
            (false, true) => MpcValue::share(
                arithmetic::add_public(FieldShare::new(rhs.value), lhs.value, id).inner(),
            ),
        }
    }

    fn to_share(&self, value: MpcValue<F>) -> FieldShare<F> {
        if value.is_share {
            FieldShare::new(value.value)
        } else {
            arithmetic::promote_to_trivial_share(value.value, self.state.id)
        }
    }

    fn read_wire(&self, board: &[Option<MpcValue<F>>], wire: usize) -> eyre::Result<MpcValue<F>> {
        match board.get(wire) {
            Some(Some(value)) => Ok(*value),
            _ => bail!("read of unset wire {wire}"),
        }
    }

    fn write_wire(
        &self,
        board: &mut [Option<MpcValue<F>>],
        wire: usize,
        value: MpcValue<F>,
    ) -> eyre::Result<()> {
        ensure!(board[wire].is_none(), "wire {wire} written twice");
        board[wire] = Some(value);
        Ok(())
    }

    fn reveal_if_public_output(
        &mut self,
        circuit: &Circuit<F>,
        board: &mut [Option<MpcValue<F>>],
        wire: usize,
    ) -> eyre::Result<()> {
        if circuit.public_outputs.contains(&wire) {
            self.reveal_output(board, wire)?;
        }
        Ok(())
    }

    // The one place a board slot is overwritten: a share of a declared
    // public output is replaced by its opened plaintext.
    fn reveal_output(&mut self, board: &mut [Option<MpcValue<F>>], wire: usize) -> eyre::Result<()> {
        let value = self.read_wire(board, wire)?;
        if !value.is_share {
            return Ok(());
        }
        let opened = reveal::open_field(
            FieldShare::new(value.value),
            RevealKey::output(wire as u64),
            &self.store,
            self.state.id,
            self.state.poll,
        )?;
        board[wire] = Some(MpcValue::public(opened));
        Ok(())
    }
}

impl<F: PrimeField, S, P> std::fmt::Debug for MpcExecutor<F, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpcExecutor")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
