//! Conversions between arithmetic and boolean sharings.
//!
//! [`a2b`] is a constant-round bit decomposition in the style of Damgård et
//! al.: the secret is masked with an edaBits value, the mask difference is
//! opened, and two binary adders undo the masking and the modular reduction
//! on shared bits. [`b2a`] converts one shared bit back to the field with a
//! daBit.

use ark_ff::PrimeField;
use eyre::ensure;
use num_bigint::BigUint;
use num_traits::One;

use zkvm_mpc_storage::{RevealKey, RevealRole, SharedStorage};

use super::preprocessing::CorrelatedRandomness;
use super::ring::RingElement;
use super::types::{BitShare, FieldShare};
use super::{AdditiveState, arithmetic, binary, reveal};

/// Bit size `B` of the field, the length of every decomposition.
pub fn field_bit_size<F: PrimeField>() -> usize {
    F::MODULUS_BIT_SIZE as usize
}

/// Decomposes a plaintext field element into its `B` bits, least
/// significant first.
pub fn field_to_bits<F: PrimeField>(val: F) -> Vec<bool> {
    let value: BigUint = val.into_bigint().into();
    (0..field_bit_size::<F>() as u64)
        .map(|i| value.bit(i))
        .collect()
}

/// Decomposes an arithmetic sharing of `a` into boolean sharings of the `B`
/// bits of `a`, least significant first.
///
/// Consumes one edaBits instance `(b, bits(b))` and opens `c = a - b`. The
/// opened value is lifted into `Z_2^{B+1}` as `e = c + 2^B - p`, added onto
/// the shared bits of `b`, and the carry out of bit `B` tells whether
/// `b + c` wrapped past `p`. A final shared adder conditionally adds `p`
/// back, leaving exactly the bits of `a`.
pub fn a2b<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    a: FieldShare<F>,
    op: u64,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<Vec<BitShare>> {
    let b = field_bit_size::<F>();
    let edabits = state.prep.next_edabits()?;
    ensure!(
        edabits.bits.len() == b,
        "edaBits instance has {} bits, field needs {b}",
        edabits.bits.len()
    );

    let c = reveal::open_field(
        a - edabits.arith,
        RevealKey::op(op, RevealRole::DecompMask),
        store,
        state.id,
        state.poll,
    )?;

    let modulus: BigUint = F::MODULUS.into();
    let c_big: BigUint = c.into_bigint().into();
    // e = c + 2^B - p lives in [0, 2^B), embedded in the B+1 bit ring so the
    // adder's carry out of bit B survives.
    let e = RingElement::new(c_big + (BigUint::one() << b) - &modulus, b + 1);

    let mut mask_bits = edabits.bits;
    mask_bits.push(BitShare::zero());
    let d_prime = binary::bits_add_const(&mask_bits, &e.bit_decompose(), op, store, state, false)?;

    // The carry into bit B is set exactly when b + c >= p, i.e. when the
    // masked sum wrapped around the field modulus.
    let wrapped = d_prime[b];
    let not_wrapped = binary::not(wrapped, state.id);
    let correction: Vec<BitShare> = (0..b as u64)
        .map(|i| binary::and_public(not_wrapped, modulus.bit(i)))
        .collect();

    binary::bits_add(&d_prime[..b], &correction, op, store, state, false)
}

/// Converts a boolean sharing of one bit into an arithmetic sharing of the
/// same bit. `wire` namespaces the daBit correction reveal.
pub fn b2a<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    bit: BitShare,
    wire: u64,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<FieldShare<F>> {
    let dabit = state.prep.next_dabit()?;
    let delta = reveal::open_bit(
        binary::xor(dabit.bit, bit),
        RevealKey::op(wire, RevealRole::BitDelta),
        store,
        state.id,
        state.poll,
    )?;
    if delta {
        Ok(arithmetic::promote_to_trivial_share(F::one(), state.id) - dabit.arith)
    } else {
        Ok(dabit.arith)
    }
}
