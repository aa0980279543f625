//! Arithmetic-circuit executors for the co-zkvm online phase.
//!
//! A [`circuit::Circuit`] is a flat list of wires and operations over a
//! prime field. [`plain_vm::PlainExecutor`] evaluates it on plaintext
//! inputs; [`mpc_vm::MpcExecutor`] evaluates the same circuit over additive
//! secret shares together with the other parties of a session, exchanging
//! data through a [`zkvm_mpc_storage::SharedStorage`] backend.
#![warn(missing_docs)]

pub mod circuit;
pub mod mpc_vm;
pub mod plain_vm;
pub mod types;
