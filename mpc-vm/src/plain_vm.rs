//! Single-party plaintext executor.
//!
//! Evaluates a circuit on plaintext inputs with the same wire discipline as
//! the multi-party executor. Used to derive expected results in tests and
//! to run computations whose inputs are not secret at all.

use std::collections::BTreeMap;
use std::time::Instant;

use ark_ff::PrimeField;
use eyre::{bail, ensure};

use zkvm_mpc_core::protocols::additive::conversion;

use crate::circuit::{Circuit, OperationKind, reserved_wire_values};
use crate::types::{ExecutionResult, ExecutorPhase, MpcValue};

/// Plaintext evaluator with the same one-shot lifecycle as the MPC
/// executor.
#[derive(Debug)]
pub struct PlainExecutor {
    phase: ExecutorPhase,
}

impl Default for PlainExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainExecutor {
    /// Creates an executor in the input-required phase.
    pub fn new() -> Self {
        Self {
            phase: ExecutorPhase::InputRequired,
        }
    }

    /// Evaluates `circuit` on plaintext inputs.
    pub fn run<F: PrimeField>(
        &mut self,
        circuit: &Circuit<F>,
        public_inputs: &BTreeMap<usize, F>,
        private_inputs: &BTreeMap<usize, F>,
    ) -> eyre::Result<ExecutionResult<F>> {
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
        ensure!(
            private_inputs.len() == circuit.private_input_count(),
            "expected {} private inputs, got {}",
            circuit.private_input_count(),
            private_inputs.len()
        );

        let started = Instant::now();
        let mut board: Vec<Option<F>> = vec![None; circuit.wire_count];
        for (wire, value) in reserved_wire_values::<F>().into_iter().enumerate() {
            board[wire] = Some(value);
        }
        let reserved = reserved_wire_values::<F>().len();
        for (offset, &value) in circuit.constants.iter().enumerate() {
            board[reserved + offset] = Some(value);
        }
        for (&wire, &value) in public_inputs {
            ensure!(
                wire >= circuit.constant_wires && wire < circuit.public_input_wires,
                "wire {wire} is not a public-input wire"
            );
            board[wire] = Some(value);
        }
        for (&wire, &value) in private_inputs {
            ensure!(
                wire >= circuit.public_input_wires && wire < circuit.input_wires,
                "wire {wire} is not a private-input wire"
            );
            board[wire] = Some(value);
        }

        for operation in &circuit.operations {
            let inputs = operation
                .inputs
                .iter()
                .map(|&wire| match board.get(wire) {
                    Some(Some(value)) => Ok(*value),
                    _ => bail!("read of unset wire {wire}"),
                })
                .collect::<eyre::Result<Vec<F>>>()?;
            match operation.kind {
                OperationKind::Add => {
                    let sum = inputs.iter().copied().sum();
                    write_wire(&mut board, operation.outputs[0], sum)?;
                }
                OperationKind::Mul => {
                    let product = inputs.iter().copied().product();
                    write_wire(&mut board, operation.outputs[0], product)?;
                }
                OperationKind::Inverse => {
                    let inverse = inputs[0].inverse().unwrap_or_else(F::zero);
                    write_wire(&mut board, operation.outputs[0], inverse)?;
                }
                OperationKind::BitDecompose => {
                    for (&wire, bit) in operation
                        .outputs
                        .iter()
                        .zip(conversion::field_to_bits(inputs[0]))
                    {
                        write_wire(&mut board, wire, F::from(bit))?;
                    }
                }
            }
        }

        self.phase = ExecutorPhase::Completed;
        let values = board
            .into_iter()
            .enumerate()
            .map(|(wire, value)| {
                value
                    .map(MpcValue::public)
                    .ok_or_else(|| eyre::eyre!("wire {wire} was never written"))
            })
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(ExecutionResult {
            values,
            elapsed: started.elapsed(),
        })
    }
}

fn write_wire<F: PrimeField>(board: &mut [Option<F>], wire: usize, value: F) -> eyre::Result<()> {
    ensure!(board[wire].is_none(), "wire {wire} written twice");
    board[wire] = Some(value);
    Ok(())
}
