//! Values flowing through the executors and their results.

use std::collections::BTreeMap;
use std::time::Duration;

use ark_ff::PrimeField;
use eyre::{ensure, eyre};

/// A value on the wire board: either a plaintext everyone knows or this
/// party's additive share of a secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MpcValue<F: PrimeField> {
    /// The plaintext or share.
    pub value: F,
    /// Whether `value` is a share.
    pub is_share: bool,
}

impl<F: PrimeField> MpcValue<F> {
    /// A value known to all parties.
    pub fn public(value: F) -> Self {
        Self {
            value,
            is_share: false,
        }
    }

    /// This party's share of a secret value.
    pub fn share(value: F) -> Self {
        Self {
            value,
            is_share: true,
        }
    }
}

/// Lifecycle of an executor. Each instance runs exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorPhase {
    /// Waiting for `run` to be called.
    InputRequired,
    /// Evaluating the circuit.
    Running,
    /// Finished; further runs are rejected.
    Completed,
}

/// Outcome of one circuit evaluation.
#[derive(Debug, Clone)]
pub struct ExecutionResult<F: PrimeField> {
    /// Final value of every wire. Declared public outputs are guaranteed to
    /// be plaintext.
    pub values: Vec<MpcValue<F>>,
    /// Wall-clock time of the evaluation.
    pub elapsed: Duration,
}

impl<F: PrimeField> ExecutionResult<F> {
    /// The plaintext values of the given public-output wires.
    ///
    /// Fails if a wire is unset or still a share, which would indicate a
    /// defective executor.
    pub fn public_outputs(
        &self,
        wires: impl IntoIterator<Item = usize>,
    ) -> eyre::Result<BTreeMap<usize, F>> {
        let mut outputs = BTreeMap::new();
        for wire in wires {
            let value = self
                .values
                .get(wire)
                .ok_or_else(|| eyre!("wire {wire} does not exist"))?;
            ensure!(
                !value.is_share,
                "public output wire {wire} is still a secret share"
            );
            outputs.insert(wire, value.value);
        }
        Ok(outputs)
    }
}
