//! Bit-granular reading and writing on top of byte streams.
//!
//! Bits are packed most-significant first. The writer holds at most one
//! partial byte; [`BitWriter::flush`] left-aligns whatever is left and pads
//! the low end with zeros.

use std::io::{self, Read, Write};

use bitvec::{order::Msb0, view::BitView};

use crate::code::Code;
use crate::error::{HuffmanError, Phase, Result};

pub struct BitWriter<W: Write> {
    inner: W,
    buffer: u8,
    num_bits: u8,
    bits_written: u64,
    bytes_written: u64,
    phase: Phase,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_phase(inner, Phase::PayloadWrite)
    }

    /// `phase` is attached to any I/O error raised by the sink.
    pub fn with_phase(inner: W, phase: Phase) -> Self {
        Self {
            inner,
            buffer: 0,
            num_bits: 0,
            bits_written: 0,
            bytes_written: 0,
            phase,
        }
    }

    pub fn put_bit(&mut self, bit: u8) -> Result<()> {
        if bit > 1 {
            return Err(HuffmanError::invalid_argument(format!(
                "bit must be 0 or 1, got {}",
                bit
            )));
        }

        self.buffer = (self.buffer << 1) | bit;
        self.num_bits += 1;
        self.bits_written += 1;

        if self.num_bits == 8 {
            self.emit()?;
        }
        Ok(())
    }

    pub fn write_code(&mut self, code: &Code) -> Result<()> {
        for bit in code.iter() {
            self.put_bit(bit as u8)?;
        }
        Ok(())
    }

    /// Writes out the last partial byte, if any, and hands back the sink.
    pub fn flush(mut self) -> Result<W> {
        if self.num_bits > 0 {
            self.buffer <<= 8 - self.num_bits;
            self.emit()?;
        }
        self.inner
            .flush()
            .map_err(|e| HuffmanError::io(self.phase, e))?;
        Ok(self.inner)
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    fn emit(&mut self) -> Result<()> {
        self.inner
            .write_all(&[self.buffer])
            .map_err(|e| HuffmanError::io(self.phase, e))?;
        self.bytes_written += 1;
        self.buffer = 0;
        self.num_bits = 0;
        Ok(())
    }
}

pub struct BitReader<R: Read> {
    inner: R,
    buffer: u8,
    // unread bits left in `buffer`, consumed from the high end
    num_bits: u8,
    bytes_read: u64,
    exhausted: bool,
    phase: Phase,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_phase(inner, Phase::PayloadRead)
    }

    pub fn with_phase(inner: R, phase: Phase) -> Self {
        Self {
            inner,
            buffer: 0,
            num_bits: 0,
            bytes_read: 0,
            exhausted: false,
            phase,
        }
    }

    /// Next bit, or `None` once the source has no more bytes.
    ///
    /// Calling this again after it returned `None` is an error.
    pub fn get_bit(&mut self) -> Result<Option<u8>> {
        if self.num_bits == 0 {
            if self.exhausted {
                return Err(HuffmanError::invalid_state(
                    "read attempted after end of bit stream",
                ));
            }
            match self.next_byte()? {
                Some(byte) => {
                    self.buffer = byte;
                    self.num_bits = 8;
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }

        let bit = self.buffer.view_bits::<Msb0>()[(8 - self.num_bits) as usize];
        self.num_bits -= 1;
        Ok(Some(bit as u8))
    }

    /// Unread bits in the current byte and whether they are all zero.
    pub fn pending_padding(&self) -> (u8, bool) {
        let used = 8 - self.num_bits as usize;
        let clean = self.num_bits == 0 || self.buffer.view_bits::<Msb0>()[used..].not_any();
        (self.num_bits, clean)
    }

    /// Pulls one more whole byte from the source, bypassing the bit buffer.
    /// Used to check for trailing data once decoding is complete.
    pub fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HuffmanError::io(self.phase, e)),
            }
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
