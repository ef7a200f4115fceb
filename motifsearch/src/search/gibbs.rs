//! Gibbs sampling motif search.

use rand::distributions::Distribution;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::WeightedIndex;

use crate::abc::Alphabet;
use crate::abc::Pseudocounts;
use crate::abc::Symbol;
use crate::dense::DenseMatrix;
use crate::dense::MatrixCoordinates;
use crate::err::Error;
use crate::motifs::MotifSet;
use crate::pwm::CountMatrix;
use crate::pwm::FrequencyMatrix;
use crate::seq::EncodedSequence;

use super::check_sequences;
use super::motifs_at;
use super::random_starts;
use super::repeat::repeat;

// --- GibbsSampler ------------------------------------------------------------

/// A Gibbs sampler over the motif start positions of a set of sequences.
///
/// Every call to [`Iterator::next`] performs one sampling step: a
/// sequence is held out, a profile is built from the motifs of all other
/// sequences, and a new start position is drawn for the held out sequence
/// with a probability proportional to the profile probability of each
/// window. The sampler never stops on its own.
#[derive(Debug)]
pub struct GibbsSampler<'a, R: Rng, A: Alphabet> {
    /// The sequences being sampled.
    sequences: &'a [EncodedSequence<A>],
    /// The random number generator.
    rng: R,

    // -- Parameters ----------------------------
    /// The width of the motif currently being built.
    width: usize,
    /// The pseudocounts used to build the profile of the motif.
    pseudocounts: Pseudocounts<A>,

    // -- Internal data -------------------------
    /// The start positions of the motif in each sequence.
    starts: Vec<usize>,
    /// The current count matrix for the motif.
    motif: DenseMatrix<u32, A::K>,
    /// The current step.
    step: usize,
}

impl<'a, R: Rng, A: Alphabet> GibbsSampler<'a, R, A> {
    /// Create a new sampler starting from random positions.
    pub fn new(
        sequences: &'a [EncodedSequence<A>],
        width: usize,
        mut rng: R,
    ) -> Result<Self, Error> {
        check_sequences(sequences, width)?;
        let starts = random_starts(sequences, width, &mut rng);
        Ok(Self::new_unchecked(sequences, width, starts, rng))
    }

    /// Create a new sampler starting from the given positions.
    pub fn with_starts(
        sequences: &'a [EncodedSequence<A>],
        width: usize,
        starts: Vec<usize>,
        rng: R,
    ) -> Result<Self, Error> {
        check_sequences(sequences, width)?;
        if starts.len() != sequences.len() {
            return Err(Error::LengthMismatch {
                index: starts.len().min(sequences.len()),
                expected: sequences.len(),
                found: starts.len(),
            });
        }
        for (seq, &start) in sequences.iter().zip(&starts) {
            if start.checked_add(width).map_or(true, |end| end > seq.len()) {
                return Err(Error::invalid_parameter(
                    "starts",
                    start,
                    "motif does not fit in the sequence",
                ));
            }
        }
        Ok(Self::new_unchecked(sequences, width, starts, rng))
    }

    fn new_unchecked(
        sequences: &'a [EncodedSequence<A>],
        width: usize,
        starts: Vec<usize>,
        rng: R,
    ) -> Self {
        // build motif count with all sequences
        let mut motif = DenseMatrix::new(width);
        for (seq, &start) in sequences.iter().zip(&starts) {
            for (j, k) in (start..start + width).enumerate() {
                motif[MatrixCoordinates::new(j, seq[k].as_index())] += 1;
            }
        }
        Self {
            sequences,
            rng,
            width,
            pseudocounts: Pseudocounts::laplace(),
            starts,
            motif,
            step: 0,
        }
    }

    /// Change the pseudocounts used to build the profile of the motif.
    pub fn pseudocounts<P: Into<Pseudocounts<A>>>(&mut self, pseudocounts: P) -> &mut Self {
        self.pseudocounts = pseudocounts.into();
        self
    }

    /// The current start position of the motif in each sequence.
    #[inline]
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// The number of steps performed so far.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Build the current motif set.
    pub fn motifs(&self) -> MotifSet<A> {
        motifs_at(self.sequences, &self.starts, self.width)
    }

    /// Get the score of the current motif set.
    pub fn score(&self) -> u32 {
        CountMatrix::<A>::new_unchecked(self.motif.clone(), self.sequences.len() as u32).score()
    }

    fn select_holdout(&mut self) -> usize {
        self.rng.sample(Uniform::new(0, self.starts.len()))
    }

    fn include_sequence(&mut self, z: usize) {
        let seq = &self.sequences[z];
        let start = self.starts[z];
        for (i, j) in (start..start + self.width).enumerate() {
            self.motif[MatrixCoordinates::new(i, seq[j].as_index())] += 1;
        }
    }

    fn exclude_sequence(&mut self, z: usize) {
        let seq = &self.sequences[z];
        let start = self.starts[z];
        for (i, j) in (start..start + self.width).enumerate() {
            self.motif[MatrixCoordinates::new(i, seq[j].as_index())] -= 1;
        }
    }

    fn prepare_profile(&self) -> FrequencyMatrix<A> {
        let n = self.sequences.len() as u32 - 1;
        CountMatrix::new_unchecked(self.motif.clone(), n).to_freq(self.pseudocounts.clone())
    }

    fn update_holdout(&mut self, z: usize, profile: &FrequencyMatrix<A>) {
        let weights = profile.window_probabilities(&self.sequences[z]);
        match WeightedIndex::new(weights) {
            Ok(dist) => self.starts[z] = dist.sample(&mut self.rng),
            Err(e) => log::warn!(
                "failed to sample a new position for sequence {} ({}), keeping {}",
                z,
                e,
                self.starts[z]
            ),
        }
    }
}

impl<'a, R: Rng, A: Alphabet> Iterator for GibbsSampler<'a, R, A> {
    type Item = GibbsIteration;
    fn next(&mut self) -> Option<Self::Item> {
        // step 1: sampling
        // select the holdout sequence
        let z = self.select_holdout();
        // remove holdout sequence from motif counts
        self.exclude_sequence(z);

        // step 2: update
        // create profile from the remaining motifs
        let profile = self.prepare_profile();
        // select new start position for sequence Z
        self.update_holdout(z, &profile);
        // add new holdout sequence position to motif counts
        self.include_sequence(z);

        // advance step counter
        self.step += 1;
        // yield current iteration
        Some(GibbsIteration {
            z,
            start: self.starts[z],
            score: self.score(),
        })
    }
}

/// The outcome of a single Gibbs sampling step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GibbsIteration {
    /// The index of the hold-out sequence.
    pub z: usize,
    /// The new start position of the motif in the hold-out sequence.
    pub start: usize,
    /// The score of the motif set after the step.
    pub score: u32,
}

// --- GibbsSearch -------------------------------------------------------------

/// A motif search using a Gibbs sampler.
#[derive(Debug, Clone)]
pub struct GibbsSearch<A: Alphabet> {
    width: usize,
    pseudocounts: Pseudocounts<A>,
    iterations: usize,
    runs: usize,
}

impl<A: Alphabet> GibbsSearch<A> {
    /// Create a new Gibbs search for motifs of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            pseudocounts: Pseudocounts::laplace(),
            iterations: 100,
            runs: 100,
        }
    }

    /// Change the pseudocounts used to build profiles.
    pub fn pseudocounts<P: Into<Pseudocounts<A>>>(&mut self, pseudocounts: P) -> &mut Self {
        self.pseudocounts = pseudocounts.into();
        self
    }

    /// Change the number of sampling steps performed by a single run.
    pub fn iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Change the number of independent runs of [`GibbsSearch::search`].
    pub fn runs(&mut self, runs: usize) -> &mut Self {
        self.runs = runs;
        self
    }

    /// The width of the motifs being searched.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Perform a single run of the search.
    ///
    /// The returned motif set is the best one seen during the run,
    /// including the initial random motifs.
    pub fn run<R: Rng>(
        &self,
        sequences: &[EncodedSequence<A>],
        rng: &mut R,
    ) -> Result<MotifSet<A>, Error> {
        let mut sampler = GibbsSampler::new(sequences, self.width, rng)?;
        sampler.pseudocounts(self.pseudocounts.clone());

        let mut best_starts = sampler.starts().to_vec();
        let mut best_score = sampler.score();
        for _ in 0..self.iterations {
            if let Some(it) = sampler.next() {
                log::trace!(
                    "step {}: z={} start={} score={}",
                    sampler.step(),
                    it.z,
                    it.start,
                    it.score
                );
                if it.score < best_score {
                    best_score = it.score;
                    best_starts.copy_from_slice(sampler.starts());
                }
            }
        }

        Ok(motifs_at(sequences, &best_starts, self.width))
    }

    /// Run the search several times, keeping the best motif set.
    pub fn search<R: Rng>(
        &self,
        sequences: &[EncodedSequence<A>],
        rng: &mut R,
    ) -> Result<MotifSet<A>, Error> {
        check_sequences(sequences, self.width)?;
        log::debug!(
            "running Gibbs sampling over {} sequences (k={}, iterations={}, runs={})",
            sequences.len(),
            self.width,
            self.iterations,
            self.runs
        );
        repeat(self.runs, rng, |r| self.run(sequences, r))
    }
}
