//! Sets of aligned motifs of identical width.

use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Index;
use std::str::FromStr;

use super::abc::Alphabet;
use super::abc::Pseudocounts;
use super::err::Error;
use super::pwm::CountMatrix;
use super::pwm::FrequencyMatrix;
use super::seq::EncodedSequence;

/// An ordered, non-empty set of motifs sharing the same width.
///
/// Motif sets are values: search strategies never modify a motif set
/// in place, but build a new one for every candidate they consider.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifSet<A: Alphabet> {
    motifs: Vec<EncodedSequence<A>>,
}

impl<A: Alphabet> MotifSet<A> {
    /// Create a new motif set from the given motifs.
    ///
    /// Fails if no motif is given, if the motifs are empty, or if they
    /// do not all have the same width.
    pub fn new(motifs: Vec<EncodedSequence<A>>) -> Result<Self, Error> {
        let width = match motifs.first() {
            None => return Err(Error::EmptyMotifSet),
            Some(m) if m.is_empty() => return Err(Error::InvalidWidth { width: 0 }),
            Some(m) => m.len(),
        };
        if let Some((index, m)) = motifs.iter().enumerate().find(|(_, m)| m.len() != width) {
            return Err(Error::LengthMismatch {
                index,
                expected: width,
                found: m.len(),
            });
        }
        Ok(Self { motifs })
    }

    /// Create a new motif set without checking the motif widths.
    pub(crate) fn new_unchecked(motifs: Vec<EncodedSequence<A>>) -> Self {
        debug_assert!(!motifs.is_empty());
        Self { motifs }
    }

    /// Create a new motif set from textual motifs.
    pub fn encode<S: AsRef<str>>(motifs: &[S]) -> Result<Self, Error> {
        motifs
            .iter()
            .map(|m| EncodedSequence::encode(m.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(Error::from)
            .and_then(Self::new)
    }

    /// The number of motifs in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    /// Check whether the set is empty, which never happens for a valid set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    /// The width shared by all motifs of the set.
    #[inline]
    pub fn width(&self) -> usize {
        self.motifs[0].len()
    }

    /// Iterate over the motifs of the set.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, EncodedSequence<A>> {
        self.motifs.iter()
    }

    /// Get the motif at the given index, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&EncodedSequence<A>> {
        self.motifs.get(index)
    }

    /// Build a new motif set where the motif at `index` is replaced.
    pub fn replace(&self, index: usize, motif: EncodedSequence<A>) -> Result<Self, Error> {
        if motif.len() != self.width() {
            return Err(Error::LengthMismatch {
                index,
                expected: self.width(),
                found: motif.len(),
            });
        }
        let mut motifs = self.motifs.clone();
        match motifs.get_mut(index) {
            Some(m) => *m = motif,
            None => {
                return Err(Error::invalid_parameter(
                    "index",
                    index,
                    "out of bounds for motif set",
                ))
            }
        }
        Ok(Self { motifs })
    }

    /// Extract the motifs of the set.
    #[inline]
    pub fn into_inner(self) -> Vec<EncodedSequence<A>> {
        self.motifs
    }

    /// Build the count matrix of the motifs with the given pseudocounts.
    pub fn count_matrix<P>(&self, pseudo: P) -> CountMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        self.raw_counts().with_pseudocounts(pseudo)
    }

    /// Build the profile matrix of the motifs with the given pseudocounts.
    pub fn profile_matrix<P>(&self, pseudo: P) -> FrequencyMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        self.raw_counts().to_freq(pseudo)
    }

    /// Get the consensus sequence of the motifs.
    pub fn consensus(&self) -> EncodedSequence<A> {
        self.raw_counts().consensus()
    }

    /// Get the number of mismatches between the motifs and their consensus.
    pub fn score(&self) -> u32 {
        self.raw_counts().score()
    }

    fn raw_counts(&self) -> CountMatrix<A> {
        let mut data = crate::dense::DenseMatrix::new(self.width());
        for motif in self.motifs.iter() {
            for (i, x) in motif.iter().enumerate() {
                data[i][crate::abc::Symbol::as_index(x)] += 1;
            }
        }
        CountMatrix::new_unchecked(data, self.motifs.len() as u32)
    }
}

impl<A: Alphabet> AsRef<[EncodedSequence<A>]> for MotifSet<A> {
    fn as_ref(&self) -> &[EncodedSequence<A>] {
        self.motifs.as_slice()
    }
}

impl<A: Alphabet> Index<usize> for MotifSet<A> {
    type Output = EncodedSequence<A>;
    fn index(&self, index: usize) -> &Self::Output {
        &self.motifs[index]
    }
}

impl<'a, A: Alphabet> IntoIterator for &'a MotifSet<A> {
    type Item = &'a EncodedSequence<A>;
    type IntoIter = std::slice::Iter<'a, EncodedSequence<A>>;
    fn into_iter(self) -> Self::IntoIter {
        self.motifs.iter()
    }
}

impl<A: Alphabet> Display for MotifSet<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, motif) in self.motifs.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", motif)?;
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for MotifSet<A> {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let motifs = s.split_whitespace().collect::<Vec<_>>();
        Self::encode(&motifs)
    }
}
