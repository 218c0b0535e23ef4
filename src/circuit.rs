/*!

  Wires, gates, and operators of a boolean gate network.

*/

use bitvec::vec::BitVec;
use std::str::FromStr;

use crate::error::Error;

/// The value carried by a wire: `None` when it is not known.
pub type WireValue = Option<u8>;

/// Wire names fall into families by their first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireFamily {
    /// First operand bits, named `x..`
    X,
    /// Second operand bits, named `y..`
    Y,
    /// Result bits, named `z..`
    Z,
    /// Anything else, such as intermediate carries
    Internal,
}

impl WireFamily {
    /// Classifies a wire by the first character of its name
    pub fn of(name: &str) -> Self {
        match name.chars().next() {
            Some('x') => WireFamily::X,
            Some('y') => WireFamily::Y,
            Some('z') => WireFamily::Z,
            _ => WireFamily::Internal,
        }
    }

    /// Returns the name prefix of the family, if it has one
    pub fn prefix(&self) -> Option<char> {
        match self {
            WireFamily::X => Some('x'),
            WireFamily::Y => Some('y'),
            WireFamily::Z => Some('z'),
            WireFamily::Internal => None,
        }
    }
}

impl std::fmt::Display for WireFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.prefix() {
            Some(c) => write!(f, "{c}"),
            None => write!(f, "internal"),
        }
    }
}

/// A two-input gate driving a single output wire.
///
/// The operator is kept as the raw token from the description. Gates are
/// ordered field by field, so a set of gates iterates deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Gate {
    /// First input wire
    a: String,
    /// Second input wire
    b: String,
    /// Operator token, e.g. `AND`
    op: String,
    /// Output wire
    out: String,
}

impl Gate {
    /// Creates a gate `a op b -> out`
    pub fn new(a: String, b: String, op: String, out: String) -> Self {
        Self { a, b, op, out }
    }

    /// Returns the first input wire
    pub fn get_a(&self) -> &str {
        &self.a
    }

    /// Returns the second input wire
    pub fn get_b(&self) -> &str {
        &self.b
    }

    /// Returns the raw operator token
    pub fn get_op(&self) -> &str {
        &self.op
    }

    /// Returns the output wire
    pub fn get_output(&self) -> &str {
        &self.out
    }

    /// Returns both input wires, in order
    pub fn inputs(&self) -> [&str; 2] {
        [&self.a, &self.b]
    }

    /// Returns every wire the gate touches: both inputs, then the output
    pub fn wires(&self) -> [&str; 3] {
        [&self.a, &self.b, &self.out]
    }

    /// Interprets the operator token
    pub fn operator(&self) -> Result<Operator, Error> {
        self.op.parse()
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} -> {}", self.a, self.op, self.b, self.out)
    }
}

/// The operators a gate can be evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
    /// Bitwise exclusive or
    Xor,
}

impl Operator {
    /// Applies the operator to two wire values
    pub fn apply(&self, a: u8, b: u8) -> u8 {
        match self {
            Operator::And => a & b,
            Operator::Or => a | b,
            Operator::Xor => a ^ b,
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            "XOR" => Ok(Operator::Xor),
            _ => Err(Error::UnknownOperator(s.to_string())),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::And => write!(f, "AND"),
            Operator::Or => write!(f, "OR"),
            Operator::Xor => write!(f, "XOR"),
        }
    }
}

/// A little-endian bundle of wire values, such as all of the `z..` wires.
/// Bit `i` comes from the `i`-th wire of the family in name order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bus {
    bits: BitVec,
}

impl Bus {
    /// Creates a bus from bits in little-endian order
    pub fn new(bits: BitVec) -> Self {
        Self { bits }
    }

    /// Returns the number of bits on the bus
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns bit `index`, reading missing high bits as zero
    pub fn bit(&self, index: usize) -> bool {
        self.bits.get(index).map(|b| *b).unwrap_or(false)
    }

    /// Returns the underlying bits
    pub fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Returns the bus as an integer, if it fits in 128 bits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.bits.iter().by_vals().skip(128).any(|b| b) {
            return None;
        }
        Some(
            self.bits
                .iter()
                .by_vals()
                .take(128)
                .enumerate()
                .filter(|(_, b)| *b)
                .fold(0u128, |acc, (i, _)| acc | (1 << i)),
        )
    }

    /// Adds two buses. The sum is one bit wider than the wider operand.
    pub fn add(&self, other: &Self) -> Self {
        let width = self.width().max(other.width());
        let mut bits = BitVec::with_capacity(width + 1);
        let mut carry = false;
        for i in 0..width {
            let (a, b) = (self.bit(i), other.bit(i));
            bits.push(a ^ b ^ carry);
            carry = (a && b) || (carry && (a ^ b));
        }
        bits.push(carry);
        Self { bits }
    }
}

impl std::fmt::Display for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}'b{}",
            self.bits.len(),
            self.bits
                .iter()
                .rev()
                .map(|b| if *b { '1' } else { '0' })
                .collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    #[test]
    fn families() {
        assert_eq!(WireFamily::of("x00"), WireFamily::X);
        assert_eq!(WireFamily::of("y13"), WireFamily::Y);
        assert_eq!(WireFamily::of("z45"), WireFamily::Z);
        assert_eq!(WireFamily::of("kjc"), WireFamily::Internal);
        assert_eq!(WireFamily::of(""), WireFamily::Internal);
    }

    #[test]
    fn operators() {
        assert_eq!("AND".parse::<Operator>().unwrap().apply(1, 1), 1);
        assert_eq!("OR".parse::<Operator>().unwrap().apply(0, 1), 1);
        assert_eq!("XOR".parse::<Operator>().unwrap().apply(1, 1), 0);
        assert!(matches!(
            "NAND".parse::<Operator>(),
            Err(Error::UnknownOperator(op)) if op == "NAND"
        ));
    }

    #[test]
    fn bus_arithmetic() {
        // 0b011 + 0b110 = 0b1001
        let a = Bus::new(bitvec![1, 1, 0]);
        let b = Bus::new(bitvec![0, 1, 1]);
        let sum = a.add(&b);
        assert_eq!(sum.width(), 4);
        assert_eq!(sum.to_u128(), Some(9));
        assert_eq!(sum.to_string(), "4'b1001");
    }

    #[test]
    fn wide_bus() {
        let mut bits = BitVec::repeat(false, 130);
        assert_eq!(Bus::new(bits.clone()).to_u128(), Some(0));
        bits.set(129, true);
        assert_eq!(Bus::new(bits).to_u128(), None);
    }
}
