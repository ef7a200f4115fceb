//! Error types for encoding sequences and running motif searches.

use std::fmt::Display;
use std::fmt::Formatter;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid symbol: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

/// An error raised while building matrices or running a motif search.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A character could not be decoded with the alphabet.
    InvalidSymbol(InvalidSymbol),
    /// No sequences were given to search.
    EmptyInput,
    /// A motif set or count matrix was requested from zero motifs.
    EmptyMotifSet,
    /// The motif width is not strictly positive.
    InvalidWidth { width: usize },
    /// A sequence is shorter than the motif width.
    SequenceTooShort {
        index: usize,
        length: usize,
        width: usize,
    },
    /// A sequence does not have the length of the others.
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A `k`-mer does not have the width of the motif it is compared to.
    KmerLengthMismatch { expected: usize, found: usize },
    /// A sequence is too short to contain a single window of the motif.
    NoWindow { length: usize, width: usize },
    /// The values given for a profile do not form a distribution.
    InvalidProfile(String),
    /// A search parameter is outside of its domain.
    InvalidParameter {
        name: &'static str,
        value: String,
        message: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid_parameter<V: ToString>(
        name: &'static str,
        value: V,
        message: &'static str,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            message,
        }
    }
}

impl From<InvalidSymbol> for Error {
    fn from(error: InvalidSymbol) -> Self {
        Error::InvalidSymbol(error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSymbol(err) => err.fmt(f),
            Error::EmptyInput => f.write_str("no sequences given"),
            Error::EmptyMotifSet => f.write_str("motif set is empty"),
            Error::InvalidWidth { width } => {
                write!(f, "invalid motif width: {} (expected at least 1)", width)
            }
            Error::SequenceTooShort {
                index,
                length,
                width,
            } => write!(
                f,
                "sequence {} has length {}, shorter than motif width {}",
                index, length, width
            ),
            Error::LengthMismatch {
                index,
                expected,
                found,
            } => write!(
                f,
                "sequence {} has length {}, expected {}",
                index, found, expected
            ),
            Error::KmerLengthMismatch { expected, found } => {
                write!(f, "k-mer has length {}, expected {}", found, expected)
            }
            Error::NoWindow { length, width } => write!(
                f,
                "sequence of length {} has no window of width {}",
                length, width
            ),
            Error::InvalidProfile(msg) => write!(f, "invalid profile: {}", msg),
            Error::InvalidParameter {
                name,
                value,
                message,
            } => write!(f, "invalid parameter: {} = {}, {}", name, value, message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidSymbol(e) => Some(e),
            _ => None,
        }
    }
}
