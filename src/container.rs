//! Container header: the frequency table that lets the decoder rebuild the
//! encoder's tree.
//!
//! ```text
//! [count: i32 BE]
//! count x [symbol: i32 BE][frequency: i32 BE]
//! [packed payload]
//! ```
//!
//! Entries are written in ascending symbol order and only for symbols that
//! occur. Empty input therefore yields a four-byte container of zeros.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::config::Alphabet;
use crate::error::{HuffmanError, Phase, Result};
use crate::frequency::FrequencyTable;

/// Bytes taken by the count field plus `entries` symbol/frequency pairs.
pub fn header_len(entries: usize) -> u64 {
    4 + 8 * entries as u64
}

/// Writes the header and returns the number of bytes written.
pub fn write_header<W: Write>(
    writer: &mut W,
    frequencies: &FrequencyTable,
    alphabet: Alphabet,
) -> Result<u64> {
    let count = frequencies.distinct_symbols();
    writer
        .write_i32::<BigEndian>(count as i32)
        .map_err(|e| HuffmanError::io(Phase::HeaderWrite, e))?;

    for (symbol, frequency) in frequencies.iter() {
        if !alphabet.contains(symbol as i64) {
            return Err(HuffmanError::invalid_argument(format!(
                "byte {:#04x} is outside the {:?} alphabet",
                symbol, alphabet
            )));
        }
        let frequency = i32::try_from(frequency).map_err(|_| {
            HuffmanError::invalid_argument(format!(
                "byte {:#04x} occurs {} times, more than a header entry can hold",
                symbol, frequency
            ))
        })?;

        log::trace!("header entry {:#04x} x{}", symbol, frequency);
        writer
            .write_i32::<BigEndian>(symbol as i32)
            .map_err(|e| HuffmanError::io(Phase::HeaderWrite, e))?;
        writer
            .write_i32::<BigEndian>(frequency)
            .map_err(|e| HuffmanError::io(Phase::HeaderWrite, e))?;
    }

    Ok(header_len(count))
}

/// Reads and validates a header, returning the frequency table it describes.
pub fn read_header<R: Read>(reader: &mut R, alphabet: Alphabet) -> Result<FrequencyTable> {
    let count = reader
        .read_i32::<BigEndian>()
        .map_err(|e| HuffmanError::from_read(Phase::HeaderRead, e, "header count"))?;

    if count < 0 || count as usize > alphabet.size() {
        return Err(HuffmanError::malformed(format!(
            "header declares {} symbols, expected 0..={}",
            count,
            alphabet.size()
        )));
    }

    let mut frequencies = FrequencyTable::new();
    for entry in 0..count {
        let what = format!("header entry {} of {}", entry + 1, count);
        let symbol = reader
            .read_i32::<BigEndian>()
            .map_err(|e| HuffmanError::from_read(Phase::HeaderRead, e, &what))?;
        let frequency = reader
            .read_i32::<BigEndian>()
            .map_err(|e| HuffmanError::from_read(Phase::HeaderRead, e, &what))?;

        if !alphabet.contains(symbol as i64) {
            return Err(HuffmanError::malformed(format!(
                "{} has symbol {} outside the {:?} alphabet",
                what, symbol, alphabet
            )));
        }
        if frequency <= 0 {
            return Err(HuffmanError::malformed(format!(
                "{} has non-positive frequency {}",
                what, frequency
            )));
        }

        let symbol = symbol as u8;
        if frequencies.count(symbol) != 0 {
            return Err(HuffmanError::malformed(format!(
                "{} repeats symbol {:#04x}",
                what, symbol
            )));
        }
        log::trace!("header entry {:#04x} x{}", symbol, frequency);
        frequencies.set(symbol, frequency as u64);
    }

    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(frequencies: &FrequencyTable) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        let written = write_header(&mut out, frequencies, Alphabet::Full).unwrap();
        assert_eq!(written, out.len() as u64);
        out
    }

    fn words(values: &[i32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    #[test]
    fn test_layout_is_big_endian_pairs() {
        let frequencies = FrequencyTable::from_bytes(b"ABA");
        assert_eq!(encode(&frequencies), words(&[2, 0x41, 2, 0x42, 1]));
    }

    #[test]
    fn test_empty_header() {
        assert_eq!(encode(&FrequencyTable::new()), vec![0, 0, 0, 0]);
        let table = read_header(&mut Cursor::new(vec![0, 0, 0, 0]), Alphabet::Full).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_back() {
        let frequencies = FrequencyTable::from_bytes(b"hello, header \xff\x00");
        let bytes = encode(&frequencies);
        let decoded = read_header(&mut Cursor::new(bytes), Alphabet::Full).unwrap();
        assert_eq!(decoded, frequencies);
    }

    #[test]
    fn test_truncated_header() {
        let mut bytes = words(&[3, 0x41, 2, 0x42]);
        bytes.push(0);
        let err = read_header(&mut Cursor::new(bytes), Alphabet::Full).unwrap_err();
        assert!(err.is_malformed(), "{}", err);

        let err = read_header(&mut Cursor::new(vec![0, 0]), Alphabet::Full).unwrap_err();
        assert!(err.is_malformed(), "{}", err);
    }

    #[test]
    fn test_rejects_bad_entries() {
        let cases = [
            words(&[-1]),
            words(&[257]),
            words(&[1, 256, 4]),
            words(&[1, -3, 4]),
            words(&[1, 0x41, 0]),
            words(&[1, 0x41, -5]),
            words(&[2, 0x41, 1, 0x41, 2]),
        ];
        for bytes in cases {
            let err = read_header(&mut Cursor::new(bytes.clone()), Alphabet::Full).unwrap_err();
            assert!(err.is_malformed(), "{:?} -> {}", bytes, err);
        }
    }

    #[test]
    fn test_legacy_alphabet() {
        let bytes = words(&[1, 255, 1]);
        assert!(read_header(&mut Cursor::new(bytes.clone()), Alphabet::Full).is_ok());
        assert!(read_header(&mut Cursor::new(bytes), Alphabet::Legacy)
            .unwrap_err()
            .is_malformed());

        let mut out: Vec<u8> = Vec::new();
        let err = write_header(&mut out, &FrequencyTable::from_bytes(&[255]), Alphabet::Legacy)
            .unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidArgument { .. }));
    }

    #[test]
    fn test_frequency_too_large_for_header() {
        let mut frequencies = FrequencyTable::new();
        frequencies.set(b'x', i32::MAX as u64 + 1);
        let err = write_header(&mut Vec::<u8>::new(), &frequencies, Alphabet::Full).unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidArgument { .. }));
    }
}
