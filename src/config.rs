//! Codec options.

use std::env;

use crate::error::{HuffmanError, Result};

/// Environment variable selecting the symbol alphabet (`full` or `legacy`).
pub const ENV_ALPHABET: &str = "HUFFPUFF_ALPHABET";
/// Environment variable toggling strict trailer checks on decode.
pub const ENV_STRICT: &str = "HUFFPUFF_STRICT";

/// Byte values a container may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// All 256 byte values.
    #[default]
    Full,
    /// Byte values 0..=254, as produced by tools that sized their frequency
    /// table at 255 entries.
    Legacy,
}

impl Alphabet {
    pub fn size(self) -> usize {
        match self {
            Alphabet::Full => 256,
            Alphabet::Legacy => 255,
        }
    }

    pub fn contains(self, symbol: i64) -> bool {
        symbol >= 0 && (symbol as u64) < self.size() as u64
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Alphabet::Full),
            "legacy" => Ok(Alphabet::Legacy),
            other => Err(HuffmanError::invalid_argument(format!(
                "{} must be `full` or `legacy`, got {:?}",
                ENV_ALPHABET, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    pub alphabet: Alphabet,
    /// Reject non-zero padding bits and bytes after the payload.
    pub strict_trailer: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::Full,
            strict_trailer: true,
        }
    }
}

impl CodecConfig {
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_strict_trailer(mut self, strict: bool) -> Self {
        self.strict_trailer = strict;
        self
    }

    /// Defaults overridden by `HUFFPUFF_ALPHABET` and `HUFFPUFF_STRICT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_ALPHABET) {
            config.alphabet = Alphabet::parse(&value)?;
        }
        if let Some(value) = lookup(ENV_STRICT) {
            config.strict_trailer = parse_bool(ENV_STRICT, &value)?;
        }
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(HuffmanError::invalid_argument(format!(
            "{} must be a boolean, got {:?}",
            key, other
        ))),
    }
}
