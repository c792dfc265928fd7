use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;

/// A classical bit as sent or measured in the protocol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit == Bit::One
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Distribution<Bit> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Bit {
        Bit::from(rng.gen::<bool>())
    }
}

/// Preparation / measurement basis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Basis {
    /// 0° and 90° polarisation, written `+`.
    Rectilinear,
    /// 45° and 135° polarisation, written `x`.
    Diagonal,
}

impl Basis {
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Distribution<Basis> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Basis {
        match rng.gen_range(0..2) {
            0 => Basis::Rectilinear,
            _ => Basis::Diagonal,
        }
    }
}

/// The state the sender prepared: a bit encoded in a basis.
///
/// Plain value, copied freely and never mutated after preparation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Qubit {
    bit: Bit,
    basis: Basis,
}

impl Qubit {
    pub const fn new(bit: Bit, basis: Basis) -> Self {
        Qubit { bit, basis }
    }

    pub fn bit(&self) -> Bit {
        self.bit
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ket = match (self.basis, self.bit) {
            (Basis::Rectilinear, Bit::Zero) => "|0>",
            (Basis::Rectilinear, Bit::One) => "|1>",
            (Basis::Diagonal, Bit::Zero) => "|+>",
            (Basis::Diagonal, Bit::One) => "|->",
        };
        f.write_str(ket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bit_char_conversion() {
        assert_eq!(Bit::Zero.as_char(), '0');
        assert_eq!(Bit::One.as_char(), '1');
        assert_eq!(Bit::from_char('1'), Some(Bit::One));
        assert_eq!(Bit::from_char('2'), None);
        assert!(bool::from(Bit::One));
        assert_eq!(Bit::from(false), Bit::Zero);
    }

    #[test]
    fn test_basis_symbols() {
        assert_eq!(Basis::Rectilinear.to_string(), "+");
        assert_eq!(Basis::Diagonal.to_string(), "x");
    }

    #[test]
    fn test_sampled_values_cover_both_variants() {
        let mut rng = StdRng::seed_from_u64(7);
        let bits: Vec<Bit> = (0..200).map(|_| rng.gen()).collect();
        let bases: Vec<Basis> = (0..200).map(|_| rng.gen()).collect();

        assert!(bits.contains(&Bit::Zero) && bits.contains(&Bit::One));
        assert!(bases.contains(&Basis::Rectilinear) && bases.contains(&Basis::Diagonal));
    }

    #[test]
    fn test_qubit_is_plain_value() {
        let q = Qubit::new(Bit::One, Basis::Diagonal);
        let copy = q;
        assert_eq!(q, copy);
        assert_eq!(copy.bit(), Bit::One);
        assert_eq!(copy.basis(), Basis::Diagonal);
        assert_eq!(copy.to_string(), "|->");
    }
}
