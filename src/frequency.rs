use std::fmt;

use itertools::Itertools;

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence count for every byte value.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.record(data);
        table
    }

    pub fn record(&mut self, data: &[u8]) {
        for &byte in data {
            self.increment(byte);
        }
    }

    pub fn increment(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with a non-zero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Total number of symbols counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.set(symbol, count);
        }
        table
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FrequencyTable {{ {} }}",
            self.iter()
                .map(|(symbol, count)| format!("{:#04x}: {}", symbol, count))
                .join(", ")
        )
    }
}
