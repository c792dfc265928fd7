//! Run configuration for the protocol simulation.

use crate::error::{Bb84Error, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_N_BITS: usize = 20;

pub const N_BITS_ENV: &str = "BB84_N_BITS";
pub const SEED_ENV: &str = "BB84_SEED";

/// Parameters for one protocol run (or one batch of runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Number of qubits the sender prepares.
    pub n_bits: usize,
    /// Seed for a reproducible run. `None` draws from thread-local entropy.
    pub seed: Option<u64>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            n_bits: DEFAULT_N_BITS,
            seed: None,
        }
    }
}

impl ProtocolConfig {
    pub fn new(n_bits: usize) -> Self {
        ProtocolConfig {
            n_bits,
            ..Default::default()
        }
    }

    pub fn with_n_bits(mut self, n_bits: usize) -> Self {
        self.n_bits = n_bits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_bits == 0 {
            return Err(Bb84Error::InvalidInput { n_bits: self.n_bits });
        }
        Ok(())
    }

    /// Read `BB84_N_BITS` and `BB84_SEED`, falling back to defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ProtocolConfig::default();
        if let Some(raw) = lookup(N_BITS_ENV) {
            config.n_bits = parse_value(N_BITS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(SEED_ENV) {
            config.seed = Some(parse_value(SEED_ENV, &raw)?);
        }
        Ok(config)
    }
}

pub fn parse_n_bits_arg(raw: &str) -> Result<usize> {
    parse_value("n_bits", raw)
}

pub fn parse_seed_arg(raw: &str) -> Result<u64> {
    parse_value("seed", raw)
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Bb84Error::InvalidConfig(format!("{name}={raw:?} is not a valid number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_matches_demo_length() {
        let config = ProtocolConfig::default();
        assert_eq!(config.n_bits, 20);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = ProtocolConfig::new(64).with_seed(9).with_n_bits(32);
        assert_eq!(config.n_bits, 32);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert_eq!(
            ProtocolConfig::new(0).validate(),
            Err(Bb84Error::InvalidInput { n_bits: 0 })
        );
        assert!(ProtocolConfig::new(1).validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let config =
            ProtocolConfig::from_lookup(lookup_from(&[(N_BITS_ENV, " 128 "), (SEED_ENV, "42")]))
                .unwrap();
        assert_eq!(config, ProtocolConfig::new(128).with_seed(42));
    }

    #[test]
    fn test_lookup_missing_keeps_defaults() {
        let config = ProtocolConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ProtocolConfig::default());
    }

    #[test]
    fn test_parse_cli_args() {
        assert_eq!(parse_n_bits_arg("20").unwrap(), 20);
        assert_eq!(parse_seed_arg("18446744073709551615").unwrap(), u64::MAX);
        assert!(parse_n_bits_arg("-3").is_err());
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = ProtocolConfig::from_lookup(lookup_from(&[(SEED_ENV, "abc")])).unwrap_err();
        assert!(matches!(err, Bb84Error::InvalidConfig(_)));
    }
}
