//! # bb84
//!
//! BB84 quantum key distribution simulation.
//!
//! The sender prepares random bits in random bases, the receiver measures
//! each one in a basis of their own, and both keep the positions where the
//! bases agree. Qubits are modelled classically as a (bit, basis) pair: a
//! measurement in the preparation basis returns the bit, and a measurement in
//! the conjugate basis returns a fresh coin flip.
//!
//! Every random step takes an explicit `rand::Rng`, so runs can be seeded
//! and concurrent runs never share a generator.

pub mod bb84;
pub mod bb84_protocol;
pub mod bb84_states;
pub mod config;
pub mod error;
pub mod key;

pub use bb84_protocol::{run, run_batch, run_checked, ProtocolOutcome, ProtocolRunner};
pub use bb84_states::{Basis, Bit, Qubit};
pub use config::ProtocolConfig;
pub use error::{Bb84Error, Result};
pub use key::SiftedKey;

pub mod prelude {
    pub use crate::bb84::*;
    pub use crate::bb84_protocol::*;
    pub use crate::bb84_states::*;
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::key::*;
}
