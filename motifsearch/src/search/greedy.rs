//! Greedy motif search.

use crate::abc::Alphabet;
use crate::abc::Pseudocounts;
use crate::err::Error;
use crate::motifs::MotifSet;
use crate::pwm::CountMatrix;
use crate::seq::EncodedSequence;

use super::check_sequences;
use super::motifs_at;
use super::window;

/// A deterministic motif search that extends a seed motif one sequence
/// at a time.
///
/// Every window of the first sequence is tried as a seed. The motif is
/// then extended with the most probable window of each following sequence
/// under the profile of the motifs selected so far.
///
/// # Example
/// ```
/// # use motifsearch::abc::Dna;
/// # use motifsearch::seq::EncodedSequence;
/// # use motifsearch::search::GreedySearch;
/// let sequences = ["GGCGTTCAGGCA", "AAGAATCAGTCA", "CAAGGAGTTCGC", "CACGTCAATCAC", "CAATAATATTCG"]
///     .iter()
///     .map(|s| EncodedSequence::<Dna>::encode(s))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// let motifs = GreedySearch::new(3)
///     .pseudocounts(0u32)
///     .search(&sequences)
///     .unwrap();
/// assert_eq!(motifs.to_string(), "CAG\nCAG\nCAA\nCAA\nCAA");
/// ```
#[derive(Debug, Clone)]
pub struct GreedySearch<A: Alphabet> {
    width: usize,
    pseudocounts: Pseudocounts<A>,
}

impl<A: Alphabet> GreedySearch<A> {
    /// Create a new greedy search for motifs of the given width.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            pseudocounts: Pseudocounts::laplace(),
        }
    }

    /// Change the pseudocounts used to build intermediate profiles.
    pub fn pseudocounts<P: Into<Pseudocounts<A>>>(&mut self, pseudocounts: P) -> &mut Self {
        self.pseudocounts = pseudocounts.into();
        self
    }

    /// The width of the motifs being searched.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Run the search on the given sequences.
    pub fn search(&self, sequences: &[EncodedSequence<A>]) -> Result<MotifSet<A>, Error> {
        check_sequences(sequences, self.width)?;

        let k = self.width;
        let mut best = motifs_at(sequences, &vec![0; sequences.len()], k);
        let mut best_score = best.score();

        for offset in 0..=sequences[0].len() - k {
            let mut motifs = Vec::with_capacity(sequences.len());
            motifs.push(window(&sequences[0], offset, k));
            for seq in &sequences[1..] {
                let profile = CountMatrix::<A>::from_sequences(&motifs)?
                    .to_freq(self.pseudocounts.clone());
                motifs.push(profile.most_probable_kmer(seq)?);
            }
            let motifs = MotifSet::new_unchecked(motifs);
            let score = motifs.score();
            log::trace!("greedy seed at offset {}: score {}", offset, score);
            if score < best_score {
                best = motifs;
                best_score = score;
            }
        }

        log::debug!(
            "greedy search over {} sequences (k={}) finished with score {}",
            sequences.len(),
            k,
            best_score
        );
        Ok(best)
    }
}
