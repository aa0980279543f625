//! Structured reveal keys.
//!
//! Every reveal of a computation is addressed by a [`RevealKey`] instead of
//! an ad-hoc string. The key is collision-free by construction: the
//! operation id partitions the key space, the role partitions the reveals of
//! one operation, and the index/gate pair enumerates repeated reveals of the
//! same role (ladder steps, adder bit positions, adder gates).

use std::fmt;

/// Which reveal of an operation a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RevealRole {
    /// Masked differences `(d_a, d_b)` of one Beaver multiplication. The
    /// index is the fold position for operations with more than two inputs.
    MulFold,
    /// Squaring step of the inversion ladder at exponent bit `index`.
    InvSquare,
    /// Accumulation step of the inversion ladder at exponent bit `index`.
    InvAccum,
    /// Masked value `c = a - b` opened at the start of a bit decomposition.
    DecompMask,
    /// Carry gate of the public-addend adder; `index` is the bit position,
    /// `gate` the gate within that position.
    MaskedSumCarry,
    /// Carry gate of the secret-secret adder; `index` is the bit position,
    /// `gate` the gate within that position.
    BitSumCarry,
    /// daBit correction mask opened while converting one decomposed bit
    /// back to an arithmetic share. The operation id is the output wire.
    BitDelta,
    /// Reveal of a declared public output. The operation id is the wire.
    Output,
}

impl fmt::Display for RevealRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RevealRole::MulFold => "mul",
            RevealRole::InvSquare => "inv_sq",
            RevealRole::InvAccum => "inv_acc",
            RevealRole::DecompMask => "mask",
            RevealRole::MaskedSumCarry => "madd",
            RevealRole::BitSumCarry => "badd",
            RevealRole::BitDelta => "delta",
            RevealRole::Output => "output",
        };
        f.write_str(name)
    }
}

/// Addresses one logical reveal within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevealKey {
    /// Operation id, or wire id for [`RevealRole::BitDelta`] and
    /// [`RevealRole::Output`].
    pub op: u64,
    /// The role of this reveal within the operation.
    pub role: RevealRole,
    /// Enumerates repeated reveals of the same role.
    pub index: u32,
    /// Gate number within an adder bit position.
    pub gate: u32,
}

impl RevealKey {
    /// Key for the single reveal of `role` within operation `op`.
    pub fn op(op: u64, role: RevealRole) -> Self {
        Self {
            op,
            role,
            index: 0,
            gate: 0,
        }
    }

    /// Key for the `index`-th reveal of `role` within operation `op`.
    pub fn indexed(op: u64, role: RevealRole, index: u32) -> Self {
        Self {
            op,
            role,
            index,
            gate: 0,
        }
    }

    /// Key for a gate of an adder carry chain.
    pub fn gated(op: u64, role: RevealRole, index: u32, gate: u32) -> Self {
        Self {
            op,
            role,
            index,
            gate,
        }
    }

    /// Key for the public reveal of output wire `wire`.
    pub fn output(wire: u64) -> Self {
        Self::op(wire, RevealRole::Output)
    }
}

impl fmt::Display for RevealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.op, self.role, self.index, self.gate)
    }
}
