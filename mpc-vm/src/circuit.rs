//! The flat arithmetic-circuit model shared by both executors.
//!
//! Wires are numbered consecutively and partitioned into four ranges:
//! constants (a reserved prefix followed by custom constants), public
//! inputs, private inputs, and operation outputs. The reserved constants
//! are derived from the field alone, so every party materializes the same
//! values without communication.

use std::collections::BTreeSet;
use std::fmt;

use ark_ff::{LegendreSymbol, PrimeField};
use itertools::Itertools;

/// What an operation computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Sum of all input wires.
    Add,
    /// Product of all input wires.
    Mul,
    /// Multiplicative inverse, mapping zero to zero.
    Inverse,
    /// Decomposition into the `B` bits of the input, least significant
    /// first, one output wire per bit.
    BitDecompose,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Add => "add",
            OperationKind::Mul => "mul",
            OperationKind::Inverse => "inv",
            OperationKind::BitDecompose => "bits",
        };
        f.write_str(name)
    }
}

/// One gate of the circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// What to compute.
    pub kind: OperationKind,
    /// Input wire ids.
    pub inputs: Vec<usize>,
    /// Output wire ids.
    pub outputs: Vec<usize>,
}

impl Operation {
    /// Creates an operation. Arity is checked by [`Circuit::validate`],
    /// which knows the field's bit size.
    pub fn new(kind: OperationKind, inputs: Vec<usize>, outputs: Vec<usize>) -> Self {
        Self {
            kind,
            inputs,
            outputs,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] <- [{}]",
            self.kind,
            self.outputs.iter().join(", "),
            self.inputs.iter().join(", ")
        )
    }
}

/// Structural errors detected by [`Circuit::validate`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CircuitError {
    /// The wire range boundaries are not monotonically increasing.
    #[error(
        "wire ranges out of order: reserved {reserved}, constants end {constants}, \
         public inputs end {public_inputs}, inputs end {inputs}, total {total}"
    )]
    InvalidWireRanges {
        /// Number of reserved constant wires.
        reserved: usize,
        /// End of the constant range.
        constants: usize,
        /// End of the public-input range.
        public_inputs: usize,
        /// End of the private-input range.
        inputs: usize,
        /// Total wire count.
        total: usize,
    },
    /// The custom constant list does not fill the constant range.
    #[error("expected {expected} custom constants, got {actual}")]
    ConstantCountMismatch {
        /// Constant wires after the reserved prefix.
        expected: usize,
        /// Constants supplied.
        actual: usize,
    },
    /// An operation has the wrong number of input wires.
    #[error("operation {op} ({kind}) expects {expected} input wire(s), got {actual}")]
    InputArity {
        /// Operation index.
        op: usize,
        /// Operation kind.
        kind: OperationKind,
        /// Required count, as text since Add and Mul take two or more.
        expected: &'static str,
        /// Supplied count.
        actual: usize,
    },
    /// An operation has the wrong number of output wires.
    #[error("operation {op} ({kind}) expects {expected} output wire(s), got {actual}")]
    OutputArity {
        /// Operation index.
        op: usize,
        /// Operation kind.
        kind: OperationKind,
        /// Required count.
        expected: usize,
        /// Supplied count.
        actual: usize,
    },
    /// A wire id exceeds the circuit's wire count.
    #[error("operation {op} references wire {wire}, but the circuit has {total} wires")]
    WireOutOfRange {
        /// Operation index.
        op: usize,
        /// Offending wire id.
        wire: usize,
        /// Total wire count.
        total: usize,
    },
    /// An operation writes into the constant or input ranges.
    #[error("operation {op} writes wire {wire}, which is not an output wire")]
    WriteIntoInputRange {
        /// Operation index.
        op: usize,
        /// Offending wire id.
        wire: usize,
    },
    /// A public output names a wire outside the circuit.
    #[error("public output wire {wire} exceeds the circuit's {total} wires")]
    PublicOutputOutOfRange {
        /// Offending wire id.
        wire: usize,
        /// Total wire count.
        total: usize,
    },
}

/// An arithmetic circuit over the prime field `F`.
#[derive(Debug, Clone)]
pub struct Circuit<F: PrimeField> {
    /// End of the constant wire range (reserved prefix included).
    pub constant_wires: usize,
    /// End of the public-input wire range.
    pub public_input_wires: usize,
    /// End of the private-input wire range.
    pub input_wires: usize,
    /// Total number of wires.
    pub wire_count: usize,
    /// Custom constants, one per wire after the reserved prefix.
    pub constants: Vec<F>,
    /// Wires whose values are revealed to all parties at the end.
    pub public_outputs: BTreeSet<usize>,
    /// The gates, evaluated in order.
    pub operations: Vec<Operation>,
}

/// Bit size `B` of the field's modulus.
pub fn field_bit_size<F: PrimeField>() -> usize {
    F::MODULUS_BIT_SIZE as usize
}

/// Number of reserved constant wires: zero, minus one, the `B` powers of
/// two, a quadratic nonresidue and its negation.
pub fn reserved_wire_count<F: PrimeField>() -> usize {
    field_bit_size::<F>() + 4
}

/// The smallest quadratic nonresidue of `F` at or above two.
pub fn quadratic_nonresidue<F: PrimeField>() -> F {
    let mut candidate = F::from(2u64);
    while candidate.legendre() != LegendreSymbol::QuadraticNonResidue {
        candidate += F::one();
    }
    candidate
}

/// Values of the reserved constant wires, in wire order.
pub fn reserved_wire_values<F: PrimeField>() -> Vec<F> {
    let mut values = Vec::with_capacity(reserved_wire_count::<F>());
    values.push(F::zero());
    values.push(-F::one());
    let mut power = F::one();
    for _ in 0..field_bit_size::<F>() {
        values.push(power);
        power.double_in_place();
    }
    let qnr = quadratic_nonresidue::<F>();
    values.push(qnr);
    values.push(-qnr);
    values
}

impl<F: PrimeField> Circuit<F> {
    /// Number of public-input wires.
    pub fn public_input_count(&self) -> usize {
        self.public_input_wires - self.constant_wires
    }

    /// Number of private-input wires.
    pub fn private_input_count(&self) -> usize {
        self.input_wires - self.public_input_wires
    }

    /// Checks the wire ranges, constant list, and every operation's arity
    /// and wire references.
    pub fn validate(&self) -> Result<(), CircuitError> {
        let reserved = reserved_wire_count::<F>();
        if self.constant_wires < reserved
            || self.public_input_wires < self.constant_wires
            || self.input_wires < self.public_input_wires
            || self.wire_count < self.input_wires
        {
            return Err(CircuitError::InvalidWireRanges {
                reserved,
                constants: self.constant_wires,
                public_inputs: self.public_input_wires,
                inputs: self.input_wires,
                total: self.wire_count,
            });
        }
        let expected_constants = self.constant_wires - reserved;
        if self.constants.len() != expected_constants {
            return Err(CircuitError::ConstantCountMismatch {
                expected: expected_constants,
                actual: self.constants.len(),
            });
        }
        for &wire in &self.public_outputs {
            if wire >= self.wire_count {
                return Err(CircuitError::PublicOutputOutOfRange {
                    wire,
                    total: self.wire_count,
                });
            }
        }
        for (op, operation) in self.operations.iter().enumerate() {
            self.validate_arity(op, operation)?;
            for &wire in operation.inputs.iter().chain(&operation.outputs) {
                if wire >= self.wire_count {
                    return Err(CircuitError::WireOutOfRange {
                        op,
                        wire,
                        total: self.wire_count,
                    });
                }
            }
            for &wire in &operation.outputs {
                if wire < self.input_wires {
                    return Err(CircuitError::WriteIntoInputRange { op, wire });
                }
            }
        }
        Ok(())
    }

    fn validate_arity(&self, op: usize, operation: &Operation) -> Result<(), CircuitError> {
        let kind = operation.kind;
        let (inputs_ok, expected_in): (bool, &'static str) = match kind {
            OperationKind::Add | OperationKind::Mul => (operation.inputs.len() >= 2, "2 or more"),
            OperationKind::Inverse | OperationKind::BitDecompose => {
                (operation.inputs.len() == 1, "1")
            }
        };
        if !inputs_ok {
            return Err(CircuitError::InputArity {
                op,
                kind,
                expected: expected_in,
                actual: operation.inputs.len(),
            });
        }
        let expected_out = match kind {
            OperationKind::BitDecompose => field_bit_size::<F>(),
            _ => 1,
        };
        if operation.outputs.len() != expected_out {
            return Err(CircuitError::OutputArity {
                op,
                kind,
                expected: expected_out,
                actual: operation.outputs.len(),
            });
        }
        Ok(())
    }
}

impl<F: PrimeField> fmt::Display for Circuit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "circuit with {} wires ({} constants, {} public inputs, {} private inputs), \
             {} operations, {} public outputs",
            self.wire_count,
            self.constant_wires,
            self.public_input_count(),
            self.private_input_count(),
            self.operations.len(),
            self.public_outputs.len()
        )
    }
}
