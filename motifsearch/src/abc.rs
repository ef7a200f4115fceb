//! Digital encoding for DNA sequences using an alphabet.

use std::fmt::Debug;
use std::hash::Hash;

use generic_array::GenericArray;

use super::err::InvalidSymbol;
use super::num::ArrayLength;
use super::num::NonZero;
use super::num::Unsigned;
use super::num::U4;

// --- Symbol ------------------------------------------------------------------

/// A symbol from a biological alphabet.
pub trait Symbol: Sized + Copy + Eq + Hash + Send + Sync {
    /// View this symbol as a zero-based index.
    fn as_index(&self) -> usize;
    /// View this symbol as a string character.
    fn as_char(&self) -> char {
        self.as_ascii() as char
    }
    /// Parse a string character into a symbol.
    fn from_char(c: char) -> Result<Self, InvalidSymbol> {
        if c.is_ascii() {
            Self::from_ascii(c as u8)
        } else {
            Err(InvalidSymbol(c))
        }
    }
    /// View this symbol as an ASCII charater.
    fn as_ascii(&self) -> u8;
    /// Parse an ASCII character into a symbol.
    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol>;
}

/// A symbol that can be complemented.
pub trait ComplementableSymbol: Symbol {
    /// Get the complement of this symbol.
    fn complement(&self) -> Self;
}

// --- Alphabet ----------------------------------------------------------------

/// A biological alphabet with associated metadata.
///
/// The order of [`Alphabet::symbols`] is significant: it matches the
/// index of each symbol, and it is the order used to break ties when
/// building a consensus sequence.
pub trait Alphabet: Debug + Copy + Default + PartialEq + Send + Sync + 'static {
    type Symbol: Symbol + Debug;
    type K: Unsigned + NonZero + ArrayLength + Debug;

    /// Get all the symbols of this alphabet.
    fn symbols() -> &'static [Self::Symbol];
}

// --- DNA ---------------------------------------------------------------------

/// The DNA alphabet composed of the 4 deoxyribonucleotides.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dna;

impl Alphabet for Dna {
    type Symbol = Nucleotide;
    type K = U4;

    fn symbols() -> &'static [Nucleotide] {
        &[Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T]
    }
}

/// A deoxyribonucleotide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Nucleotide {
    /// Adenine.
    A = 0,
    /// Cytosine.
    C = 1,
    /// Guanine.
    G = 2,
    /// Thymine.
    T = 3,
}

impl From<Nucleotide> for char {
    fn from(n: Nucleotide) -> char {
        n.as_char()
    }
}

impl Symbol for Nucleotide {
    fn as_index(&self) -> usize {
        *self as usize
    }

    fn as_ascii(&self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
            Nucleotide::T => b'T',
        }
    }

    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol> {
        match c {
            b'A' => Ok(Nucleotide::A),
            b'C' => Ok(Nucleotide::C),
            b'G' => Ok(Nucleotide::G),
            b'T' => Ok(Nucleotide::T),
            _ => Err(InvalidSymbol(c as char)),
        }
    }
}

impl ComplementableSymbol for Nucleotide {
    fn complement(&self) -> Self {
        match *self {
            Nucleotide::A => Nucleotide::T,
            Nucleotide::T => Nucleotide::A,
            Nucleotide::G => Nucleotide::C,
            Nucleotide::C => Nucleotide::G,
        }
    }
}

// --- Pseudocounts ------------------------------------------------------------

/// A structure for storing the pseudocounts over an alphabet.
///
/// Pseudocounts are added to every cell of a count matrix before it is
/// normalized, so that no symbol ever gets a probability of zero. A
/// pseudocount of 1 for every symbol is Laplace's rule of succession.
#[derive(Clone, Debug, PartialEq)]
pub struct Pseudocounts<A: Alphabet> {
    counts: GenericArray<u32, A::K>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Pseudocounts<A> {
    /// Create pseudocounts of 1 for every symbol.
    pub fn laplace() -> Self {
        Self::from(1)
    }

    /// The pseudocount of each symbol, indexed by symbol.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The sum of the pseudocounts over the whole alphabet.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl<A: Alphabet> Default for Pseudocounts<A> {
    fn default() -> Self {
        Self::from(0)
    }
}

impl<A: Alphabet> From<GenericArray<u32, A::K>> for Pseudocounts<A> {
    fn from(counts: GenericArray<u32, A::K>) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            counts,
        }
    }
}

impl<A: Alphabet> From<u32> for Pseudocounts<A> {
    fn from(count: u32) -> Self {
        let mut counts = GenericArray::<u32, A::K>::default();
        for c in counts.iter_mut() {
            *c = count;
        }
        Self {
            counts,
            alphabet: std::marker::PhantomData,
        }
    }
}

impl<A: Alphabet> AsRef<[u32]> for Pseudocounts<A> {
    fn as_ref(&self) -> &[u32] {
        &self.counts
    }
}

impl<A: Alphabet> AsMut<[u32]> for Pseudocounts<A> {
    fn as_mut(&mut self) -> &mut [u32] {
        &mut self.counts
    }
}
