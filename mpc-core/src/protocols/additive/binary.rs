//! Boolean circuits over XOR-shared bits.
//!
//! XOR and NOT are local; AND burns one boolean Beaver triple and OR is
//! built from XOR and AND. On top of these sit the two ripple-carry adders
//! used by the bit decomposition: one against a public addend and one over
//! two shared bit vectors. Gate reveals are keyed by bit position and gate
//! number so all parties consume the same schedule.

use ark_ff::PrimeField;
use eyre::ensure;

use zkvm_mpc_storage::{RevealKey, RevealRole, SharedStorage};

use super::preprocessing::CorrelatedRandomness;
use super::types::BitShare;
use super::{AdditiveState, reveal};

/// XORs two shares locally.
pub fn xor(a: BitShare, b: BitShare) -> BitShare {
    a ^ b
}

/// Negates a share: party 0 flips its bit.
pub fn not(a: BitShare, id: usize) -> BitShare {
    if id == 0 {
        BitShare::new(!a.inner())
    } else {
        a
    }
}

/// Turns a public bit into a trivially consistent sharing.
pub fn promote_to_trivial_share(public: bool, id: usize) -> BitShare {
    BitShare::new(id == 0 && public)
}

/// ANDs a share with a public bit locally.
pub fn and_public(a: BitShare, public: bool) -> BitShare {
    BitShare::new(a.inner() & public)
}

/// ANDs two shares with one boolean Beaver triple.
pub fn and<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    a: BitShare,
    b: BitShare,
    key: RevealKey,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<BitShare> {
    let triple = state.prep.next_bit_triple()?;
    let d_a_share = a ^ triple.x;
    let d_b_share = b ^ triple.y;
    let opened = reveal::open_bits(&[d_a_share, d_b_share], key, store, state.id, state.poll)?;
    let (d_a, d_b) = (opened[0], opened[1]);

    let mut result = triple.xy ^ and_public(triple.y, d_a) ^ and_public(triple.x, d_b);
    result ^= and_public(d_a_share, d_b);
    Ok(result)
}

/// ORs two shares: `a | b = a ^ b ^ (a & b)`.
pub fn or<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    a: BitShare,
    b: BitShare,
    key: RevealKey,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<BitShare> {
    let conj = and(a, b, key, store, state)?;
    Ok(a ^ b ^ conj)
}

/// Ripple-carry addition of a public bit vector to a shared one.
///
/// Bit positions where the public addend is zero cost one AND; positions
/// where it is one cost one AND and two ORs. With `keep_carry` the final
/// carry is appended, widening the result by one bit.
pub fn bits_add_const<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    lhs: &[BitShare],
    rhs: &[bool],
    op: u64,
    store: &S,
    state: &mut AdditiveState<F, P>,
    keep_carry: bool,
) -> eyre::Result<Vec<BitShare>> {
    ensure!(
        lhs.len() == rhs.len(),
        "addend lengths differ: {} vs {}",
        lhs.len(),
        rhs.len()
    );
    let role = RevealRole::MaskedSumCarry;
    let mut sum = Vec::with_capacity(lhs.len() + usize::from(keep_carry));
    let mut carry = BitShare::zero();
    for (i, (&a, &b)) in lhs.iter().zip(rhs).enumerate() {
        let i = i as u32;
        let b_share = promote_to_trivial_share(b, state.id);
        sum.push(a ^ b_share ^ carry);

        // carry' = (a & b) | (a & carry) | (b & carry); with b public the
        // first and third terms are local.
        let t1 = and_public(a, b);
        let t2 = and(a, carry, RevealKey::gated(op, role, i, 2), store, state)?;
        let t3 = and_public(carry, b);
        carry = if b {
            let t4 = or(t1, t2, RevealKey::gated(op, role, i, 4), store, state)?;
            or(t4, t3, RevealKey::gated(op, role, i, 5), store, state)?
        } else {
            t2
        };
    }
    if keep_carry {
        sum.push(carry);
    }
    Ok(sum)
}

/// Ripple-carry addition of two shared bit vectors.
///
/// Every bit position costs three ANDs and two ORs, keyed as gates 1 to 5.
pub fn bits_add<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    lhs: &[BitShare],
    rhs: &[BitShare],
    op: u64,
    store: &S,
    state: &mut AdditiveState<F, P>,
    keep_carry: bool,
) -> eyre::Result<Vec<BitShare>> {
    ensure!(
        lhs.len() == rhs.len(),
        "addend lengths differ: {} vs {}",
        lhs.len(),
        rhs.len()
    );
    let role = RevealRole::BitSumCarry;
    let mut sum = Vec::with_capacity(lhs.len() + usize::from(keep_carry));
    let mut carry = BitShare::zero();
    for (i, (&a, &b)) in lhs.iter().zip(rhs).enumerate() {
        let i = i as u32;
        sum.push(a ^ b ^ carry);

        let t1 = and(a, b, RevealKey::gated(op, role, i, 1), store, state)?;
        let t2 = and(a, carry, RevealKey::gated(op, role, i, 2), store, state)?;
        let t3 = and(b, carry, RevealKey::gated(op, role, i, 3), store, state)?;
        let t4 = or(t1, t2, RevealKey::gated(op, role, i, 4), store, state)?;
        carry = or(t4, t3, RevealKey::gated(op, role, i, 5), store, state)?;
    }
    if keep_carry {
        sum.push(carry);
    }
    Ok(sum)
}
