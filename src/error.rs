use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Bb84Error {
    #[error("Invalid input: n_bits must be positive, got {n_bits}")]
    InvalidInput { n_bits: usize },

    #[error("Length mismatch: {bits} bits, {sender_bases} sender bases, {receiver_bases} receiver bases")]
    LengthMismatch {
        bits: usize,
        sender_bases: usize,
        receiver_bases: usize,
    },

    #[error("Invalid key character: {0:?}")]
    InvalidKeyString(char),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Bb84Error>;
