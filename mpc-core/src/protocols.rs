//! MPC protocol implementations.

pub mod additive;
