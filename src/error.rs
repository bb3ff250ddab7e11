//! Error type shared by every stage of the codec.

use std::fmt;
use std::io;

use thiserror::Error;

/// Stage of a run in which an I/O failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading the uncompressed input.
    InputRead,
    /// Writing the frequency header.
    HeaderWrite,
    /// Reading the frequency header.
    HeaderRead,
    /// Reading the packed bit payload.
    PayloadRead,
    /// Writing the packed bit payload.
    PayloadWrite,
    /// Writing the decompressed output.
    OutputWrite,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::InputRead => "input read",
            Phase::HeaderWrite => "header write",
            Phase::HeaderRead => "header read",
            Phase::PayloadRead => "payload read",
            Phase::PayloadWrite => "payload write",
            Phase::OutputWrite => "output write",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// A caller passed a value outside the accepted domain.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An operation is not allowed in the current state of the object.
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// The compressed stream does not describe a valid container.
    #[error("malformed container: {message}")]
    MalformedContainer { message: String },

    #[error("I/O error during {phase}: {source}")]
    Io {
        phase: Phase,
        #[source]
        source: io::Error,
    },
}

impl HuffmanError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    pub fn io(phase: Phase, source: io::Error) -> Self {
        Self::Io { phase, source }
    }

    /// Maps a read error from the header or payload. Running out of input
    /// there means the container is truncated, not that the device failed.
    pub(crate) fn from_read(phase: Phase, source: io::Error, what: &str) -> Self {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            Self::malformed(format!("stream ended while reading {}", what))
        } else {
            Self::io(phase, source)
        }
    }

    /// Short label used in log lines.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "argument",
            Self::InvalidState { .. } => "state",
            Self::MalformedContainer { .. } => "container",
            Self::Io { .. } => "io",
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedContainer { .. })
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
