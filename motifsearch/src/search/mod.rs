//! Motif search strategies over a collection of sequences.
//!
//! All strategies take a slice of [`EncodedSequence`] and a motif width,
//! and return the best [`MotifSet`] they found, containing exactly one
//! motif per input sequence, in input order.

pub mod greedy;

#[cfg(feature = "sampling")]
pub mod gibbs;
#[cfg(feature = "sampling")]
pub mod randomized;
#[cfg(feature = "sampling")]
pub mod repeat;

#[cfg(feature = "sampling")]
use rand::distributions::Uniform;
#[cfg(feature = "sampling")]
use rand::Rng;

use super::abc::Alphabet;
use super::err::Error;
use super::motifs::MotifSet;
use super::seq::EncodedSequence;

pub use self::greedy::GreedySearch;
#[cfg(feature = "sampling")]
pub use self::gibbs::GibbsIteration;
#[cfg(feature = "sampling")]
pub use self::gibbs::GibbsSampler;
#[cfg(feature = "sampling")]
pub use self::gibbs::GibbsSearch;
#[cfg(feature = "sampling")]
pub use self::randomized::RandomizedSearch;
#[cfg(feature = "sampling")]
pub use self::repeat::repeat;

/// Check that a motif of the given width can be found in all sequences.
pub(crate) fn check_sequences<A: Alphabet>(
    sequences: &[EncodedSequence<A>],
    width: usize,
) -> Result<(), Error> {
    if sequences.is_empty() {
        return Err(Error::EmptyInput);
    }
    if width == 0 {
        return Err(Error::InvalidWidth { width });
    }
    for (index, seq) in sequences.iter().enumerate() {
        if seq.len() < width {
            return Err(Error::SequenceTooShort {
                index,
                length: seq.len(),
                width,
            });
        }
    }
    Ok(())
}

/// Extract the window of length `width` starting at `start`.
pub(crate) fn window<A: Alphabet>(
    seq: &EncodedSequence<A>,
    start: usize,
    width: usize,
) -> EncodedSequence<A> {
    let symbols: &[A::Symbol] = seq.as_ref();
    EncodedSequence::new(symbols[start..start + width].to_vec())
}

/// Build the motif set made of the windows at the given start positions.
pub(crate) fn motifs_at<A: Alphabet>(
    sequences: &[EncodedSequence<A>],
    starts: &[usize],
    width: usize,
) -> MotifSet<A> {
    debug_assert_eq!(sequences.len(), starts.len());
    let motifs = sequences
        .iter()
        .zip(starts)
        .map(|(seq, &start)| window(seq, start, width))
        .collect();
    MotifSet::new_unchecked(motifs)
}

/// Select a start position uniformly in each sequence.
#[cfg(feature = "sampling")]
pub(crate) fn random_starts<A: Alphabet, R: Rng>(
    sequences: &[EncodedSequence<A>],
    width: usize,
    rng: &mut R,
) -> Vec<usize> {
    sequences
        .iter()
        .map(|seq| rng.sample(Uniform::new(0, seq.len() - width + 1)))
        .collect()
}
