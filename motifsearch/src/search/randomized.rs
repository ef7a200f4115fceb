//! Randomized motif search.

use rand::Rng;

use crate::abc::Alphabet;
use crate::abc::Pseudocounts;
use crate::err::Error;
use crate::motifs::MotifSet;
use crate::seq::EncodedSequence;

use super::check_sequences;
use super::motifs_at;
use super::random_starts;
use super::repeat::repeat;

/// A randomized motif search that iterates profile-guided motif selection.
///
/// Each run starts from a random window in every sequence, then replaces
/// the motifs with the most probable windows under their own profile for
/// as long as the score improves.
#[derive(Debug, Clone)]
pub struct RandomizedSearch<A: Alphabet> {
    width: usize,
    pseudocounts: Pseudocounts<A>,
    runs: usize,
}

impl<A: Alphabet> RandomizedSearch<A> {
    /// Create a new randomized search for motifs of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            pseudocounts: Pseudocounts::laplace(),
            runs: 100,
        }
    }

    /// Change the pseudocounts used to build profiles.
    pub fn pseudocounts<P: Into<Pseudocounts<A>>>(&mut self, pseudocounts: P) -> &mut Self {
        self.pseudocounts = pseudocounts.into();
        self
    }

    /// Change the number of independent runs of [`RandomizedSearch::search`].
    pub fn runs(&mut self, runs: usize) -> &mut Self {
        self.runs = runs;
        self
    }

    /// The width of the motifs being searched.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Perform a single run of the search.
    pub fn run<R: Rng>(
        &self,
        sequences: &[EncodedSequence<A>],
        rng: &mut R,
    ) -> Result<MotifSet<A>, Error> {
        check_sequences(sequences, self.width)?;

        let starts = random_starts(sequences, self.width, rng);
        let mut best = motifs_at(sequences, &starts, self.width);
        let mut best_score = best.score();
        let mut step = 0;

        loop {
            let profile = best.profile_matrix(self.pseudocounts.clone());
            let motifs = sequences
                .iter()
                .map(|seq| profile.most_probable_kmer(seq))
                .collect::<Result<Vec<_>, _>>()
                .map(MotifSet::new_unchecked)?;
            let score = motifs.score();
            log::trace!("step {}: score {}", step, score);
            if score < best_score {
                best = motifs;
                best_score = score;
                step += 1;
            } else {
                return Ok(best);
            }
        }
    }

    /// Run the search several times, keeping the best motif set.
    pub fn search<R: Rng>(
        &self,
        sequences: &[EncodedSequence<A>],
        rng: &mut R,
    ) -> Result<MotifSet<A>, Error> {
        check_sequences(sequences, self.width)?;
        log::debug!(
            "running randomized search over {} sequences (k={}, runs={})",
            sequences.len(),
            self.width,
            self.runs
        );
        repeat(self.runs, rng, |r| self.run(sequences, r))
    }
}
