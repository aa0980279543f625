//! Arithmetic on additively shared field elements.
//!
//! Linear operations are local. Multiplication opens two masked differences
//! per Beaver triple; inversion raises to `p - 2` with a square-and-multiply
//! ladder whose every step is a Beaver multiplication. The ladder walks the
//! public exponent bits, so the reveal schedule is identical for all
//! parties.

use ark_ff::{BigInteger, PrimeField};

use zkvm_mpc_storage::{RevealKey, RevealRole, SharedStorage};

use super::preprocessing::CorrelatedRandomness;
use super::types::FieldShare;
use super::{AdditiveState, reveal};

/// Adds two shares locally.
pub fn add<F: PrimeField>(a: FieldShare<F>, b: FieldShare<F>) -> FieldShare<F> {
    a + b
}

/// Subtracts two shares locally.
pub fn sub<F: PrimeField>(a: FieldShare<F>, b: FieldShare<F>) -> FieldShare<F> {
    a - b
}

/// Turns a public value into a trivially consistent sharing: party 0 holds
/// the value, everyone else holds zero.
pub fn promote_to_trivial_share<F: PrimeField>(public: F, id: usize) -> FieldShare<F> {
    if id == 0 {
        FieldShare::new(public)
    } else {
        FieldShare::zero()
    }
}

/// Adds a public value to a share.
pub fn add_public<F: PrimeField>(shared: FieldShare<F>, public: F, id: usize) -> FieldShare<F> {
    shared + promote_to_trivial_share(public, id)
}

/// Multiplies two shares with one Beaver triple, opening the masked
/// differences under `key`.
pub fn mul<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    a: FieldShare<F>,
    b: FieldShare<F>,
    key: RevealKey,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<FieldShare<F>> {
    let triple = state.prep.next_field_triple()?;
    let d_a_share = a - triple.x;
    let d_b_share = b - triple.y;
    let opened = reveal::open_fields(
        &[d_a_share, d_b_share],
        key,
        store,
        state.id,
        state.poll,
    )?;
    let (d_a, d_b) = (opened[0], opened[1]);

    // a * b = xy + d_a * y + d_b * x + d_a * d_b, where the public-public
    // term enters through this party's share of d_b.
    Ok(triple.xy + triple.y * d_a + triple.x * d_b + d_b_share * d_a)
}

/// Multiplies a share by a public constant locally.
pub fn mul_public<F: PrimeField>(shared: FieldShare<F>, public: F) -> FieldShare<F> {
    shared * public
}

/// Inverts a share by raising it to `p - 2`.
///
/// A shared zero stays zero, matching the plaintext convention of mapping
/// the non-invertible element to zero. The ladder visits every one of the
/// `B` exponent bits and squares unconditionally, so the number of Beaver
/// multiplications depends only on the field.
pub fn inv<F: PrimeField, S: SharedStorage, P: CorrelatedRandomness<F>>(
    a: FieldShare<F>,
    op: u64,
    store: &S,
    state: &mut AdditiveState<F, P>,
) -> eyre::Result<FieldShare<F>> {
    let mut exponent = F::MODULUS;
    exponent.sub_with_borrow(&2u64.into());

    let mut acc: Option<FieldShare<F>> = None;
    let mut power = a;
    let bits = exponent.to_bits_le();
    for (i, bit) in bits.iter().take(F::MODULUS_BIT_SIZE as usize).enumerate() {
        let i = i as u32;
        if *bit {
            acc = Some(match acc {
                None => power,
                Some(acc) => mul(
                    acc,
                    power,
                    RevealKey::indexed(op, RevealRole::InvAccum, i),
                    store,
                    state,
                )?,
            });
        }
        power = mul(
            power,
            power,
            RevealKey::indexed(op, RevealRole::InvSquare, i),
            store,
            state,
        )?;
    }
    // p - 2 always has a set bit, so acc is populated by now.
    Ok(acc.unwrap_or(FieldShare::zero()))
}
