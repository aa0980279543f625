//! Insecure trusted dealer for correlated randomness.
//!
//! Samples the secrets in the clear and shares them out, which is only
//! acceptable for tests and local experiments. A production deployment
//! replaces this with an offline-phase protocol that fills the same
//! [`RandomnessStore`] queues.

use ark_ff::PrimeField;
use itertools::izip;
use rand::{CryptoRng, Rng};

use super::preprocessing::{BitTriple, ConsumedCounts, DaBit, EdaBits, FieldTriple, RandomnessStore};
use super::{conversion, share_bit, share_field_element};

/// Deals `count` field Beaver triples, outer vector indexed by party.
pub fn field_triples<F: PrimeField, R: Rng + CryptoRng>(
    num_parties: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Vec<FieldTriple<F>>> {
    let mut per_party = vec![Vec::with_capacity(count); num_parties];
    for _ in 0..count {
        let x = F::rand(rng);
        let y = F::rand(rng);
        let xs = share_field_element(x, num_parties, rng);
        let ys = share_field_element(y, num_parties, rng);
        let xys = share_field_element(x * y, num_parties, rng);
        for (party, (x, y, xy)) in izip!(xs, ys, xys).enumerate() {
            per_party[party].push(FieldTriple { x, y, xy });
        }
    }
    per_party
}

/// Deals `count` boolean Beaver triples, outer vector indexed by party.
pub fn bit_triples<R: Rng + CryptoRng>(
    num_parties: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Vec<BitTriple>> {
    let mut per_party = vec![Vec::with_capacity(count); num_parties];
    for _ in 0..count {
        let x = rng.gen_bool(0.5);
        let y = rng.gen_bool(0.5);
        let xs = share_bit(x, num_parties, rng);
        let ys = share_bit(y, num_parties, rng);
        let xys = share_bit(x & y, num_parties, rng);
        for (party, (x, y, xy)) in izip!(xs, ys, xys).enumerate() {
            per_party[party].push(BitTriple { x, y, xy });
        }
    }
    per_party
}

/// Deals `count` edaBits instances over the full field bit size, outer
/// vector indexed by party.
pub fn edabits<F: PrimeField, R: Rng + CryptoRng>(
    num_parties: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Vec<EdaBits<F>>> {
    let bit_size = conversion::field_bit_size::<F>();
    let mut per_party = vec![Vec::with_capacity(count); num_parties];
    for _ in 0..count {
        let value = F::rand(rng);
        let arith = share_field_element(value, num_parties, rng);
        let bits: Vec<_> = conversion::field_to_bits(value)
            .into_iter()
            .map(|bit| share_bit(bit, num_parties, rng))
            .collect();
        debug_assert_eq!(bits.len(), bit_size);
        for (party, arith) in arith.into_iter().enumerate() {
            per_party[party].push(EdaBits {
                arith,
                bits: bits.iter().map(|shares| shares[party]).collect(),
            });
        }
    }
    per_party
}

/// Deals `count` daBits, outer vector indexed by party.
pub fn dabits<F: PrimeField, R: Rng + CryptoRng>(
    num_parties: usize,
    count: usize,
    rng: &mut R,
) -> Vec<Vec<DaBit<F>>> {
    let mut per_party = vec![Vec::with_capacity(count); num_parties];
    for _ in 0..count {
        let value = rng.gen_bool(0.5);
        let arith = share_field_element(F::from(value), num_parties, rng);
        let bits = share_bit(value, num_parties, rng);
        for (party, (arith, bit)) in arith.into_iter().zip(bits).enumerate() {
            per_party[party].push(DaBit { arith, bit });
        }
    }
    per_party
}

/// Deals a full [`RandomnessStore`] per party with the given supply.
pub fn randomness_stores<F: PrimeField, R: Rng + CryptoRng>(
    num_parties: usize,
    supply: ConsumedCounts,
    rng: &mut R,
) -> Vec<RandomnessStore<F>> {
    tracing::debug!(?supply, num_parties, "dealing correlated randomness");
    let mut field = field_triples(num_parties, supply.field_triples, rng).into_iter();
    let mut bit = bit_triples(num_parties, supply.bit_triples, rng).into_iter();
    let mut eda = edabits(num_parties, supply.edabits, rng).into_iter();
    let mut da = dabits(num_parties, supply.dabits, rng).into_iter();
    (0..num_parties)
        .map(|_| {
            RandomnessStore::new(
                field.next().unwrap_or_default(),
                bit.next().unwrap_or_default(),
                eda.next().unwrap_or_default(),
                da.next().unwrap_or_default(),
            )
        })
        .collect()
}
