//! Additive n-out-of-n secret sharing and its online protocols.
//!
//! A secret `s` is split into `n` shares that sum to `s` (field and ring
//! sharings) or XOR to `s` (boolean sharings). Any `n-1` shares are
//! uniformly distributed and leak nothing; with a single party the share
//! *is* the secret and the protocols degenerate to plaintext evaluation.
//!
//! Linear operations are local. Everything non-linear goes through
//! [`arithmetic`], [`binary`] and [`conversion`], which consume correlated
//! randomness from a [`CorrelatedRandomness`] source and open masked values
//! via the shared storage.

use std::marker::PhantomData;

use ark_ff::PrimeField;
use eyre::ensure;
use rand::{CryptoRng, Rng};

use zkvm_mpc_storage::poll::PollConfig;

pub mod arithmetic;
pub mod binary;
pub mod conversion;
pub mod dealer;
pub mod preprocessing;
pub mod reveal;
pub mod ring;
mod types;

pub use preprocessing::{
    BitTriple, ConsumedCounts, CorrelatedRandomness, DaBit, EdaBits, FieldTriple, RandomnessStore,
};
pub use ring::RingElement;
pub use types::{BitShare, FieldShare, RingShare};

/// Per-party state threaded through every interactive protocol.
pub struct AdditiveState<F: PrimeField, P> {
    /// This party's id, in `0..num_parties`.
    pub id: usize,
    /// Total number of parties.
    pub num_parties: usize,
    /// Polling behavior against the shared storage.
    pub poll: PollConfig,
    /// Source of pre-shared correlated randomness.
    pub prep: P,
    field: PhantomData<F>,
}

impl<F: PrimeField, P: CorrelatedRandomness<F>> AdditiveState<F, P> {
    /// Creates the state of party `id` out of `num_parties`.
    pub fn new(id: usize, num_parties: usize, poll: PollConfig, prep: P) -> eyre::Result<Self> {
        ensure!(num_parties >= 1, "at least one party is required");
        ensure!(
            id < num_parties,
            "party id {id} out of range for {num_parties} parties"
        );
        Ok(Self {
            id,
            num_parties,
            poll,
            prep,
            field: PhantomData,
        })
    }
}

/// Secret shares a field element into `num_parties` additive shares.
pub fn share_field_element<F: PrimeField, R: Rng + CryptoRng>(
    val: F,
    num_parties: usize,
    rng: &mut R,
) -> Vec<FieldShare<F>> {
    debug_assert!(num_parties >= 1);
    let mut shares = Vec::with_capacity(num_parties);
    let mut last = val;
    for _ in 0..num_parties - 1 {
        let share = F::rand(rng);
        last -= share;
        shares.push(FieldShare::new(share));
    }
    shares.push(FieldShare::new(last));
    shares
}

/// Reconstructs a field element from the shares of all parties.
pub fn combine_field_element<F: PrimeField>(shares: &[FieldShare<F>]) -> F {
    shares.iter().map(|share| share.inner()).sum()
}

/// Secret shares a boolean into `num_parties` XOR shares.
pub fn share_bit<R: Rng + CryptoRng>(val: bool, num_parties: usize, rng: &mut R) -> Vec<BitShare> {
    debug_assert!(num_parties >= 1);
    let mut shares = Vec::with_capacity(num_parties);
    let mut last = val;
    for _ in 0..num_parties - 1 {
        let share = rng.gen_bool(0.5);
        last ^= share;
        shares.push(BitShare::new(share));
    }
    shares.push(BitShare::new(last));
    shares
}

/// Reconstructs a boolean from the shares of all parties.
pub fn combine_bit(shares: &[BitShare]) -> bool {
    shares.iter().fold(false, |acc, share| acc ^ share.inner())
}

/// Secret shares a ring element into `num_parties` additive shares of the
/// same bit width.
pub fn share_ring_element<R: Rng + CryptoRng>(
    val: &RingElement,
    num_parties: usize,
    rng: &mut R,
) -> Vec<RingShare> {
    debug_assert!(num_parties >= 1);
    let mut shares = Vec::with_capacity(num_parties);
    let mut last = val.clone();
    for _ in 0..num_parties - 1 {
        let share = RingElement::random(val.bits(), rng);
        last = last - share.clone();
        shares.push(RingShare::new(share));
    }
    shares.push(RingShare::new(last));
    shares
}

/// Reconstructs a ring element from the shares of all parties.
pub fn combine_ring_element(shares: &[RingShare]) -> RingElement {
    debug_assert!(!shares.is_empty());
    let mut acc = shares[0].inner().clone();
    for share in &shares[1..] {
        acc = acc + share.inner().clone();
    }
    acc
}
