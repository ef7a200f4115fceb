#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate typenum;

pub mod abc;
pub mod dense;
pub mod err;
pub mod kmers;
pub mod motifs;
pub mod num;
pub mod pwm;
pub mod search;
pub mod seq;
pub mod skew;

pub use abc::Alphabet;
pub use abc::ComplementableSymbol;
pub use abc::Dna;
pub use abc::Nucleotide;
pub use abc::Pseudocounts;
pub use abc::Symbol;
pub use dense::DenseMatrix;
pub use err::Error;
pub use err::InvalidSymbol;
pub use motifs::MotifSet;
pub use pwm::CountMatrix;
pub use pwm::FrequencyMatrix;
pub use search::GreedySearch;
pub use seq::EncodedSequence;

#[cfg(feature = "sampling")]
pub use search::GibbsSearch;
#[cfg(feature = "sampling")]
pub use search::RandomizedSearch;
