use std::fmt;

use bitvec::{order::Lsb0, view::BitView};

use crate::error::{HuffmanError, Result};

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Path from the root of a Huffman tree to one leaf, 0 = left, 1 = right.
///
/// Bits are packed into a `u32`. The first bit of the path (the one taken at
/// the root) is the most significant of the `len` stored bits, so bit 0 is
/// always the most recently added one.
///
/// Ordering compares the packed pattern first and the length second; codes of
/// different lengths never compare equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: u32,
    len: u8,
}

fn check_bit(bit: u8) -> Result<()> {
    if bit > 1 {
        return Err(HuffmanError::invalid_argument(format!(
            "bit must be 0 or 1, got {}",
            bit
        )));
    }
    Ok(())
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a string of `0`/`1` characters, root first.
    pub fn from_str_bits(s: &str) -> Result<Self> {
        let mut code = Self::new();
        for c in s.chars() {
            match c {
                '0' => code.add_bit(0)?,
                '1' => code.add_bit(1)?,
                other => {
                    return Err(HuffmanError::invalid_argument(format!(
                        "unexpected character {:?} in code string",
                        other
                    )))
                }
            }
        }
        Ok(code)
    }

    /// Packed bits, with the most recently added bit in position 0.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add_bit(&mut self, bit: u8) -> Result<()> {
        check_bit(bit)?;
        if self.len == MAX_CODE_LENGTH {
            return Err(HuffmanError::invalid_state(format!(
                "code already holds {} bits",
                MAX_CODE_LENGTH
            )));
        }

        self.bits = (self.bits << 1) | bit as u32;
        self.len += 1;
        Ok(())
    }

    pub fn remove_bit(&mut self) -> Result<()> {
        if self.len == 0 {
            return Err(HuffmanError::invalid_state("no bits to remove"));
        }
        self.bits >>= 1;
        self.len -= 1;
        Ok(())
    }

    /// Bit `n`, counting from the most recently added bit (n = 0).
    pub fn get_bit(&self, n: usize) -> Result<u8> {
        if n >= self.len() {
            return Err(HuffmanError::invalid_argument(format!(
                "bit index {} outside code of length {}",
                n, self.len
            )));
        }
        Ok(self.bits.view_bits::<Lsb0>()[n] as u8)
    }

    /// Bits in root-to-leaf order, the order they go on the wire.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.view_bits::<Lsb0>()[..self.len()]
            .iter()
            .by_vals()
            .rev()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = (other.len - self.len) as u32;
        other.bits.checked_shr(shift).unwrap_or(0) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<empty>");
        }
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
