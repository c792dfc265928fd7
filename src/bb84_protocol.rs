//! Full BB84 exchange: preparation, transmission, measurement, sifting and
//! the security estimate.
//!
//! The channel is an in-process slice and is noiseless, so every position
//! where the two bases agree yields the sender's bit on the receiver side.

use crate::bb84::{generate_bases, generate_bits, measure_all, prepare_qubits};
use crate::bb84_states::{Basis, Bit};
use crate::config::ProtocolConfig;
use crate::error::{Bb84Error, Result};
use crate::key::SiftedKey;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-qubit detection factor used by the security estimate.
pub const DETECTION_FACTOR: f64 = 0.75;

/// One position of a run, as seen after the receiver has measured.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    pub sender_bit: Bit,
    pub sender_basis: Basis,
    pub receiver_basis: Basis,
    pub receiver_result: Bit,
}

impl RoundRecord {
    pub fn bases_match(&self) -> bool {
        self.sender_basis == self.receiver_basis
    }
}

/// Everything one run produces. Dropped by the caller when done; runs share
/// no state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolOutcome {
    key: SiftedKey,
    security_level: f64,
    rounds: Vec<RoundRecord>,
    matching: Vec<usize>,
    mismatches: usize,
}

impl ProtocolOutcome {
    pub fn key(&self) -> &SiftedKey {
        &self.key
    }

    pub fn key_string(&self) -> String {
        self.key.to_string()
    }

    pub fn security_level(&self) -> f64 {
        self.security_level
    }

    pub fn n_bits(&self) -> usize {
        self.rounds.len()
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Indices where sender and receiver bases agree, ascending.
    pub fn matching_positions(&self) -> &[usize] {
        &self.matching
    }

    /// Matched positions whose receiver result differs from the sender bit.
    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// Quantum bit error rate over the sifted positions, as a fraction.
    pub fn qber(&self) -> f64 {
        if self.matching.is_empty() {
            0.0
        } else {
            self.mismatches as f64 / self.matching.len() as f64
        }
    }

    /// The `(key, security_level)` pair of the bare protocol contract.
    pub fn into_parts(self) -> (String, f64) {
        (self.key.to_string(), self.security_level)
    }
}

impl fmt::Display for ProtocolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated quantum-secured key: {}", self.key)?;
        writeln!(f, "Key length: {} bits", self.key.len())?;
        write!(
            f,
            "Theoretical security level: {:.2}%",
            self.security_level * 100.0
        )
    }
}

/// `1 - 0.75^key_len`.
///
/// Heuristic only: the factor is applied per sifted bit, not per intercepted
/// qubit. Past roughly 128 bits the result rounds to exactly 1.0 in `f64`.
pub fn security_level(key_len: usize) -> f64 {
    1.0 - DETECTION_FACTOR.powf(key_len as f64)
}

/// Ascending indices where the two basis sequences agree.
pub fn matching_positions(sender_bases: &[Basis], receiver_bases: &[Basis]) -> Vec<usize> {
    sender_bases
        .iter()
        .zip(receiver_bases)
        .enumerate()
        .filter(|(_, (a, b))| a == b)
        .map(|(i, _)| i)
        .collect()
}

/// Keep the sender bits at positions where the bases agree, in index order.
pub fn sift(
    sender_bits: &[Bit],
    sender_bases: &[Basis],
    receiver_bases: &[Basis],
) -> Result<SiftedKey> {
    if sender_bits.len() != sender_bases.len() || sender_bases.len() != receiver_bases.len() {
        return Err(Bb84Error::LengthMismatch {
            bits: sender_bits.len(),
            sender_bases: sender_bases.len(),
            receiver_bases: receiver_bases.len(),
        });
    }
    let key = matching_positions(sender_bases, receiver_bases)
        .into_iter()
        .map(|i| sender_bits[i])
        .collect::<Vec<_>>();
    Ok(SiftedKey::new(key))
}

/// Run the protocol over `n_bits` positions using `rng` for every draw.
///
/// Total: `n_bits == 0` yields an empty key with security level 0.
pub fn simulate<R: Rng + ?Sized>(n_bits: usize, rng: &mut R) -> ProtocolOutcome {
    // Sender preparation
    let sender_bits = generate_bits(n_bits, rng);
    let sender_bases = generate_bases(n_bits, rng);
    let qubits = prepare_qubits(&sender_bits, &sender_bases);

    // Receiver measurement, bases drawn independently of the sender's
    let receiver_bases = generate_bases(n_bits, rng);
    let receiver_results = measure_all(&qubits, &receiver_bases, rng);

    let rounds: Vec<RoundRecord> = (0..n_bits)
        .map(|i| RoundRecord {
            sender_bit: sender_bits[i],
            sender_basis: sender_bases[i],
            receiver_basis: receiver_bases[i],
            receiver_result: receiver_results[i],
        })
        .collect();

    for (i, round) in rounds.iter().enumerate() {
        trace!(
            "position {}: sent {} in {}, measured {} in {}",
            i,
            round.sender_bit,
            round.sender_basis,
            round.receiver_result,
            round.receiver_basis
        );
    }

    // Public basis comparison and sifting
    let matching = matching_positions(&sender_bases, &receiver_bases);
    let key = SiftedKey::new(matching.iter().map(|&i| sender_bits[i]).collect());
    let mismatches = matching
        .iter()
        .filter(|&&i| receiver_results[i] != sender_bits[i])
        .count();
    if mismatches > 0 {
        warn!(
            "{} sifted positions disagree on a noiseless channel",
            mismatches
        );
    }

    let security_level = key.security_level();
    debug!(
        "BB84 run: {} qubits, {} sifted, security {:.4}",
        n_bits,
        key.len(),
        security_level
    );

    ProtocolOutcome {
        key,
        security_level,
        rounds,
        matching,
        mismatches,
    }
}

/// `run(n_bits) -> (key, security_level)` on thread-local randomness.
pub fn run(n_bits: usize) -> (String, f64) {
    simulate(n_bits, &mut rand::thread_rng()).into_parts()
}

/// Validating entry point: rejects an empty run before any random draw.
pub fn run_checked(n_bits: usize) -> Result<(String, f64)> {
    ProtocolRunner::new(ProtocolConfig::new(n_bits))
        .run()
        .map(ProtocolOutcome::into_parts)
}

/// Drives runs from a [`ProtocolConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProtocolRunner {
    config: ProtocolConfig,
}

impl ProtocolRunner {
    pub fn new(config: ProtocolConfig) -> Self {
        ProtocolRunner { config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Seeded when the config carries a seed, thread-local entropy otherwise.
    pub fn run(&self) -> Result<ProtocolOutcome> {
        self.config.validate()?;
        let outcome = match self.config.seed {
            Some(seed) => simulate(self.config.n_bits, &mut StdRng::seed_from_u64(seed)),
            None => simulate(self.config.n_bits, &mut rand::thread_rng()),
        };
        Ok(outcome)
    }

    pub fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ProtocolOutcome> {
        self.config.validate()?;
        Ok(simulate(self.config.n_bits, rng))
    }

    /// `runs` independent runs, each on its own generator. Run `i` is seeded
    /// with `seed + i` when the config has a seed.
    pub fn run_batch(&self, runs: usize) -> Result<Vec<ProtocolOutcome>> {
        run_batch(&self.config, runs)
    }
}

fn batch_rng(config: &ProtocolConfig, index: usize) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Results come back in run order.
pub fn run_batch(config: &ProtocolConfig, runs: usize) -> Result<Vec<ProtocolOutcome>> {
    config.validate()?;
    debug!("BB84 batch: {} runs of {} qubits", runs, config.n_bits);

    #[cfg(feature = "parallel")]
    let outcomes: Vec<ProtocolOutcome> = (0..runs)
        .into_par_iter()
        .map(|i| simulate(config.n_bits, &mut batch_rng(config, i)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<ProtocolOutcome> = (0..runs)
        .map(|i| simulate(config.n_bits, &mut batch_rng(config, i)))
        .collect();

    Ok(outcomes)
}
