use crate::bb84_states::{Basis, Bit, Qubit};
use rand::Rng;

/// Draw `n` independent, uniform bits from `rng`.
pub fn generate_bits<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Bit> {
    (0..n).map(|_| rng.gen()).collect()
}

/// Draw `n` independent, uniform bases from `rng`.
pub fn generate_bases<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<Basis> {
    (0..n).map(|_| rng.gen()).collect()
}

pub fn generate_bb84_state(bit: Bit, basis: Basis) -> Qubit {
    Qubit::new(bit, basis)
}

/// Pair up sender bits and bases position by position.
///
/// Extra elements in the longer slice are ignored.
pub fn prepare_qubits(bits: &[Bit], bases: &[Basis]) -> Vec<Qubit> {
    bits.iter()
        .zip(bases)
        .map(|(&bit, &basis)| generate_bb84_state(bit, basis))
        .collect()
}

/// Measure `qubit` in `basis`.
///
/// A matching basis returns the prepared bit. A mismatched basis returns a
/// fresh uniform draw and never reads the prepared bit.
pub fn measure<R: Rng + ?Sized>(qubit: Qubit, basis: Basis, rng: &mut R) -> Bit {
    if basis == qubit.basis() {
        qubit.bit()
    } else {
        rng.gen()
    }
}

pub fn measure_bb84_state(qubit: Qubit, basis: Basis) -> Bit {
    measure(qubit, basis, &mut rand::thread_rng())
}

/// Receiver side of the channel: measure every qubit in its paired basis.
pub fn measure_all<R: Rng + ?Sized>(qubits: &[Qubit], bases: &[Basis], rng: &mut R) -> Vec<Bit> {
    qubits
        .iter()
        .zip(bases)
        .map(|(&qubit, &basis)| measure(qubit, basis, rng))
        .collect()
}
