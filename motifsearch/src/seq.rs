//! Storage for alphabet-encoded sequences.

use std::cmp::PartialEq;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Index;
use std::str::FromStr;

use super::abc::Alphabet;
use super::abc::ComplementableSymbol;
use super::abc::Symbol;
use super::err::InvalidSymbol;

// --- EncodedSequence ---------------------------------------------------------

/// A biological sequence encoded with an alphabet.
#[derive(Clone, Debug)]
pub struct EncodedSequence<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: Vec<A::Symbol>,
}

impl<A: Alphabet> EncodedSequence<A> {
    /// Create a new encoded sequence.
    pub fn new(data: Vec<A::Symbol>) -> Self {
        Self {
            data,
            alphabet: std::marker::PhantomData,
        }
    }

    /// Create a new encoded sequence from a textual representation.
    pub fn encode(sequence: &str) -> Result<Self, InvalidSymbol> {
        sequence
            .chars()
            .map(A::Symbol::from_char)
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Create a new encoded sequence from raw ASCII bytes.
    pub fn encode_ascii(sequence: &[u8]) -> Result<Self, InvalidSymbol> {
        sequence
            .iter()
            .map(|&c| A::Symbol::from_ascii(c))
            .collect::<Result<_, _>>()
            .map(Self::new)
    }

    /// Return the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the symbols in the sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, A::Symbol> {
        self.data.iter()
    }

    /// Iterate over all the windows of length `k`, from left to right.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero.
    #[inline]
    pub fn windows(&self, k: usize) -> std::slice::Windows<'_, A::Symbol> {
        self.data.windows(k)
    }

    /// Extract the `k`-mer starting at position `start`.
    ///
    /// Returns `None` if the `k`-mer does not fit in the sequence.
    pub fn kmer(&self, start: usize, k: usize) -> Option<Self> {
        self.data
            .get(start..start.checked_add(k)?)
            .map(|s| Self::new(s.to_vec()))
    }
}

impl<A: Alphabet> EncodedSequence<A>
where
    A::Symbol: ComplementableSymbol,
{
    /// Get the reverse complement of this sequence.
    pub fn reverse_complement(&self) -> Self {
        self.data
            .iter()
            .rev()
            .map(ComplementableSymbol::complement)
            .collect::<Vec<_>>()
            .into()
    }
}

impl<A: Alphabet> AsRef<EncodedSequence<A>> for EncodedSequence<A> {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<A: Alphabet> AsRef<[<A as Alphabet>::Symbol]> for EncodedSequence<A> {
    fn as_ref(&self) -> &[<A as Alphabet>::Symbol] {
        self.data.as_slice()
    }
}

impl<A: Alphabet> Default for EncodedSequence<A> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<A: Alphabet> Display for EncodedSequence<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for c in self.data.iter() {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for EncodedSequence<A> {
    type Err = InvalidSymbol;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Self::encode(seq)
    }
}

impl<A: Alphabet> From<Vec<A::Symbol>> for EncodedSequence<A> {
    fn from(data: Vec<A::Symbol>) -> Self {
        Self::new(data)
    }
}

impl<A: Alphabet> Index<usize> for EncodedSequence<A> {
    type Output = A::Symbol;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a EncodedSequence<A> {
    type Item = &'a A::Symbol;
    type IntoIter = std::slice::Iter<'a, A::Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<A, S> PartialEq<S> for EncodedSequence<A>
where
    A: Alphabet,
    S: AsRef<[<A as Alphabet>::Symbol]>,
{
    fn eq(&self, other: &S) -> bool {
        self.data.as_slice() == other.as_ref()
    }
}

impl<A: Alphabet> Eq for EncodedSequence<A> {}

impl<A: Alphabet> Hash for EncodedSequence<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.hash(state);
    }
}
