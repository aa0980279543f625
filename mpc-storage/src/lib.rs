//! Shared-storage exchange layer for the co-zkvm online phase.
//!
//! Parties never talk to each other directly. Every reveal posts a share
//! vector to a storage backend under a [`RevealKey`] and polls until the
//! shares of all parties have arrived. The backend only has to provide
//! eventually-consistent, write-once key/value semantics, which makes it easy
//! to back by a database or an object store. [`local::LocalStore`] is the
//! in-process implementation used by tests.
#![warn(missing_docs)]

use num_bigint::BigUint;

mod key;
pub mod local;
pub mod poll;

pub use key::{RevealKey, RevealRole};

/// Identifies one computation. All parties of a computation must agree on it.
pub type SessionId = u64;

/// One party's handle to the shared storage of a single session.
///
/// `post_*` methods are write-once per `(key, sender)` pair; posting twice
/// under the same pair is a protocol bug. `collect_*` methods return `None`
/// until the shares of *all* parties are present, so callers drive them
/// through [`poll::wait_until`].
pub trait SharedStorage: Send + Sync {
    /// The session this handle belongs to.
    fn session_id(&self) -> SessionId;

    /// Number of parties participating in the session.
    fn num_parties(&self) -> usize;

    /// Marks `party` as having reached the online barrier.
    fn announce_online(&self, party: usize);

    /// Online flags for all parties, indexed by party id.
    fn online_parties(&self) -> Vec<bool>;

    /// Marks `party` as having finished its computation.
    fn announce_completed(&self, party: usize);

    /// Completion flags for all parties, indexed by party id.
    fn completed_parties(&self) -> Vec<bool>;

    /// Posts `sender`'s field-element shares for `key`.
    fn post_field_shares(&self, key: RevealKey, sender: usize, shares: Vec<BigUint>);

    /// Returns the field-element shares of all parties for `key`, outer
    /// vector indexed by party id, or `None` while any party is missing.
    fn collect_field_shares(&self, key: RevealKey) -> Option<Vec<Vec<BigUint>>>;

    /// Posts `sender`'s boolean shares for `key`.
    fn post_bit_shares(&self, key: RevealKey, sender: usize, shares: Vec<bool>);

    /// Returns the boolean shares of all parties for `key`, outer vector
    /// indexed by party id, or `None` while any party is missing.
    fn collect_bit_shares(&self, key: RevealKey) -> Option<Vec<Vec<bool>>>;

    /// Posts the share of input wire `wire` destined for party `receiver`.
    fn post_input_share(&self, wire: u64, sender: usize, receiver: usize, share: BigUint);

    /// Returns the share of input wire `wire` destined for `receiver`, or
    /// `None` while the owning party has not posted it yet.
    fn fetch_input_share(&self, wire: u64, receiver: usize) -> Option<BigUint>;

    /// Releases the session's storage. Call after all parties completed.
    fn retire(&self);
}
