//! Secret-sharing primitives and online-phase MPC protocols for co-zkvm.
//!
//! Everything in this crate operates on additive n-out-of-n sharings of
//! prime-field elements, booleans, and power-of-two ring elements. The
//! interactive protocols exchange data exclusively through the
//! [`zkvm_mpc_storage::SharedStorage`] abstraction and consume correlated
//! randomness (Beaver triples, edaBits, daBits) produced ahead of time.
#![warn(missing_docs)]

pub mod protocols;
