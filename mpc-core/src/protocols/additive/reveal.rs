//! Opening shared values through the storage backend.
//!
//! A reveal posts this party's shares under a [`RevealKey`] and polls until
//! the shares of all parties are present, then reconstructs locally. With a
//! single party the posted share already is the secret, but the same code
//! path runs unchanged.

use ark_ff::PrimeField;
use num_bigint::BigUint;

use zkvm_mpc_storage::poll::{self, PollConfig};
use zkvm_mpc_storage::{RevealKey, SharedStorage};

use super::types::{BitShare, FieldShare};

/// Opens a batch of field shares under one key.
pub fn open_fields<F: PrimeField, S: SharedStorage>(
    shares: &[FieldShare<F>],
    key: RevealKey,
    store: &S,
    id: usize,
    cfg: PollConfig,
) -> eyre::Result<Vec<F>> {
    let payload: Vec<BigUint> = shares
        .iter()
        .map(|share| share.inner().into_bigint().into())
        .collect();
    store.post_field_shares(key, id, payload);

    let all = poll::wait_until(cfg, &format!("field shares {key}"), || {
        store.collect_field_shares(key)
    })?;

    let mut opened = vec![F::zero(); shares.len()];
    for party_shares in &all {
        for (acc, share) in opened.iter_mut().zip(party_shares) {
            *acc += F::from(share.clone());
        }
    }
    Ok(opened)
}

/// Opens a single field share.
pub fn open_field<F: PrimeField, S: SharedStorage>(
    share: FieldShare<F>,
    key: RevealKey,
    store: &S,
    id: usize,
    cfg: PollConfig,
) -> eyre::Result<F> {
    let opened = open_fields(&[share], key, store, id, cfg)?;
    Ok(opened[0])
}

/// Opens a batch of boolean shares under one key.
pub fn open_bits<S: SharedStorage>(
    shares: &[BitShare],
    key: RevealKey,
    store: &S,
    id: usize,
    cfg: PollConfig,
) -> eyre::Result<Vec<bool>> {
    let payload: Vec<bool> = shares.iter().map(|share| share.inner()).collect();
    store.post_bit_shares(key, id, payload);

    let all = poll::wait_until(cfg, &format!("bit shares {key}"), || {
        store.collect_bit_shares(key)
    })?;

    let mut opened = vec![false; shares.len()];
    for party_shares in &all {
        for (acc, share) in opened.iter_mut().zip(party_shares) {
            *acc ^= share;
        }
    }
    Ok(opened)
}

/// Opens a single boolean share.
pub fn open_bit<S: SharedStorage>(
    share: BitShare,
    key: RevealKey,
    store: &S,
    id: usize,
    cfg: PollConfig,
) -> eyre::Result<bool> {
    let opened = open_bits(&[share], key, store, id, cfg)?;
    Ok(opened[0])
}
