//! Count and frequency matrices over a set of aligned motifs.

use typenum::marker_traits::Unsigned;

use super::abc::Alphabet;
use super::abc::Pseudocounts;
use super::abc::Symbol;
use super::dense::DenseMatrix;
use super::err::Error;
use super::seq::EncodedSequence;

// --- CountMatrix -------------------------------------------------------------

/// A matrix storing symbol occurences at each position.
///
/// Rows are motif positions, columns are alphabet symbols. The matrix
/// remembers the pseudocounts it was built with, so that the raw
/// occurences can always be recovered.
#[derive(Clone, Debug, PartialEq)]
pub struct CountMatrix<A: Alphabet> {
    /// The alphabet of the count matrix.
    alphabet: std::marker::PhantomData<A>,
    /// The counts for each position of the motif, pseudocounts included.
    data: DenseMatrix<u32, A::K>,
    /// The pseudocounts added to every position.
    pseudocounts: Pseudocounts<A>,
    /// The number of sequences from which this count matrix was obtained.
    n: u32,
}

impl<A: Alphabet> CountMatrix<A> {
    /// Create a new count matrix without checking the contents.
    pub(crate) fn new_unchecked(data: DenseMatrix<u32, A::K>, n: u32) -> Self {
        Self {
            alphabet: std::marker::PhantomData,
            pseudocounts: Pseudocounts::default(),
            n,
            data,
        }
    }

    /// Create a new count matrix from the given raw counts.
    ///
    /// The matrix must contain count data for sequences of the same
    /// length, i.e. rows should all sum to the same value.
    pub fn new(data: DenseMatrix<u32, A::K>) -> Result<Self, Error> {
        let mut sums = data.iter().map(|row| row.iter().sum::<u32>());
        let n = sums.next().unwrap_or(0);
        if let Some((i, found)) = sums.enumerate().find(|&(_, s)| s != n) {
            return Err(Error::LengthMismatch {
                index: i + 1,
                expected: n as usize,
                found: found as usize,
            });
        }
        Ok(Self::new_unchecked(data, n))
    }

    /// Create a new count matrix from the given sequences.
    ///
    /// All sequences must have the same length, and at least one
    /// sequence must be given.
    pub fn from_sequences<I>(sequences: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<EncodedSequence<A>>,
    {
        let mut n = 0;
        let mut data: Option<DenseMatrix<u32, A::K>> = None;
        for (index, seq) in sequences.into_iter().enumerate() {
            let seq = seq.as_ref();
            let d = data.get_or_insert_with(|| DenseMatrix::new(seq.len()));
            if seq.len() != d.rows() {
                return Err(Error::LengthMismatch {
                    index,
                    expected: d.rows(),
                    found: seq.len(),
                });
            }
            for (i, x) in seq.iter().enumerate() {
                d[i][x.as_index()] += 1;
            }
            n += 1;
        }
        match data {
            None => Err(Error::EmptyMotifSet),
            Some(matrix) => Ok(Self::new_unchecked(matrix, n)),
        }
    }

    /// Build a new count matrix with additional pseudocounts in every row.
    pub fn with_pseudocounts<P>(&self, pseudo: P) -> Self
    where
        P: Into<Pseudocounts<A>>,
    {
        let p = pseudo.into();
        let mut data = self.data.clone();
        for row in data.iter_mut() {
            for (x, &c) in row.iter_mut().zip(p.counts()) {
                *x += c;
            }
        }
        let mut pseudocounts = self.pseudocounts.clone();
        for (x, &c) in pseudocounts.as_mut().iter_mut().zip(p.counts()) {
            *x += c;
        }
        Self {
            alphabet: std::marker::PhantomData,
            data,
            pseudocounts,
            n: self.n,
        }
    }

    /// Build a probability matrix from this count matrix using pseudo-counts.
    ///
    /// Every row is divided by its total, i.e. the number of sequences
    /// plus the sum of all pseudocounts.
    pub fn to_freq<P>(&self, pseudo: P) -> FrequencyMatrix<A>
    where
        P: Into<Pseudocounts<A>>,
    {
        let p = pseudo.into();
        let mut probas = DenseMatrix::new(self.data.rows());
        for i in 0..self.data.rows() {
            let src = &self.data[i];
            let dst = &mut probas[i];
            for (j, &x) in src.iter().enumerate() {
                dst[j] = x as f64 + p.counts()[j] as f64;
            }
            let s: f64 = dst.iter().sum();
            if s > 0.0 {
                for x in dst.iter_mut() {
                    *x /= s;
                }
            }
        }
        FrequencyMatrix {
            alphabet: std::marker::PhantomData,
            data: probas,
        }
    }

    /// Get the consensus sequence of the motifs.
    ///
    /// Each position holds the symbol with the highest raw count, ties
    /// being resolved in favour of the symbol that comes first in the
    /// alphabet.
    pub fn consensus(&self) -> EncodedSequence<A> {
        let symbols = A::symbols();
        self.raw_rows()
            .map(|row| {
                let mut best = 0;
                for i in 1..symbols.len() {
                    if row[i] > row[best] {
                        best = i;
                    }
                }
                symbols[best]
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Get the score of the motifs.
    ///
    /// The score is the number of symbols which differ from the consensus
    /// sequence over all motifs, computed from the raw counts.
    pub fn score(&self) -> u32 {
        self.raw_rows()
            .map(|row| self.n - row.iter().max().copied().unwrap_or(0))
            .sum()
    }

    /// Iterate over the raw counts of each row, without pseudocounts.
    fn raw_rows(&self) -> impl Iterator<Item = Vec<u32>> + '_ {
        let p = self.pseudocounts.counts();
        self.data
            .iter()
            .map(move |row| row.iter().zip(p).map(|(&x, &c)| x - c).collect())
    }

    /// The number of positions in the matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The number of sequences the matrix was built from.
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// The total of each row, i.e. the number of sequences plus pseudocounts.
    #[inline]
    pub fn total(&self) -> u32 {
        self.n + self.pseudocounts.total()
    }

    /// The pseudocounts included in the counts.
    #[inline]
    pub fn pseudocounts(&self) -> &Pseudocounts<A> {
        &self.pseudocounts
    }

    /// The counts from the count matrix, pseudocounts included.
    #[inline]
    pub fn counts(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }

    /// The counts of a single symbol at every position.
    pub fn symbol_counts(&self, symbol: A::Symbol) -> Vec<u32> {
        self.data.iter().map(|row| row[symbol.as_index()]).collect()
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<u32, A::K>> for CountMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<u32, A::K> {
        &self.data
    }
}

impl<A: Alphabet> FromIterator<EncodedSequence<A>> for Result<CountMatrix<A>, Error> {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = EncodedSequence<A>>,
    {
        CountMatrix::from_sequences(iter)
    }
}

// --- FrequencyMatrix ---------------------------------------------------------

/// A matrix storing symbol frequencies at each position, also known as a
/// profile.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyMatrix<A: Alphabet> {
    alphabet: std::marker::PhantomData<A>,
    data: DenseMatrix<f64, A::K>,
}

impl<A: Alphabet> FrequencyMatrix<A> {
    /// The tolerance on row sums when validating user-supplied data.
    const TOLERANCE: f64 = 1e-6;

    /// Create a new frequency matrix from the given probabilities.
    ///
    /// Every row must contain probabilities that sum to one.
    pub fn new(data: DenseMatrix<f64, A::K>) -> Result<Self, Error> {
        for (i, row) in data.iter().enumerate() {
            if let Some(x) = row.iter().find(|x| !(0.0..=1.0).contains(*x)) {
                return Err(Error::InvalidProfile(format!(
                    "value {} at position {} is not a probability",
                    x, i
                )));
            }
            let s: f64 = row.iter().sum();
            if (s - 1.0).abs() > Self::TOLERANCE {
                return Err(Error::InvalidProfile(format!(
                    "position {} sums to {}",
                    i, s
                )));
            }
        }
        Ok(Self {
            alphabet: std::marker::PhantomData,
            data,
        })
    }

    /// Create a new frequency matrix from a table with one row per symbol.
    ///
    /// This is the layout used in textbooks, where row `i` contains the
    /// probabilities of the `i`-th symbol of the alphabet at each
    /// position of the motif.
    pub fn from_table<R>(table: &[R]) -> Result<Self, Error>
    where
        R: AsRef<[f64]>,
    {
        if table.len() != A::K::USIZE {
            return Err(Error::InvalidProfile(format!(
                "expected {} rows, found {}",
                A::K::USIZE,
                table.len()
            )));
        }
        let k = table[0].as_ref().len();
        if let Some(row) = table.iter().find(|row| row.as_ref().len() != k) {
            return Err(Error::InvalidProfile(format!(
                "expected {} columns, found {}",
                k,
                row.as_ref().len()
            )));
        }
        let mut data = DenseMatrix::new(k);
        for (j, row) in table.iter().enumerate() {
            for (i, &x) in row.as_ref().iter().enumerate() {
                data[i][j] = x;
            }
        }
        Self::new(data)
    }

    /// The length of the motif encoded in this matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The probabilities of the matrix.
    #[inline]
    pub fn matrix(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }

    /// Compute the probability of a `k`-mer being generated by the profile.
    pub fn probability<S>(&self, kmer: S) -> Result<f64, Error>
    where
        S: AsRef<[A::Symbol]>,
    {
        let kmer = kmer.as_ref();
        if kmer.len() != self.len() {
            return Err(Error::KmerLengthMismatch {
                expected: self.len(),
                found: kmer.len(),
            });
        }
        Ok(self.probability_unchecked(kmer))
    }

    #[inline]
    fn probability_unchecked(&self, kmer: &[A::Symbol]) -> f64 {
        kmer.iter()
            .zip(self.data.iter())
            .map(|(s, row)| row[s.as_index()])
            .product()
    }

    /// Compute the probability of every window of the given sequence.
    ///
    /// The returned vector is empty when the sequence is shorter than
    /// the motif.
    pub fn window_probabilities(&self, seq: &EncodedSequence<A>) -> Vec<f64> {
        if self.is_empty() || seq.len() < self.len() {
            return Vec::new();
        }
        seq.windows(self.len())
            .map(|w| self.probability_unchecked(w))
            .collect()
    }

    /// Find the start position of the most probable window of a sequence.
    ///
    /// When several windows share the highest probability, the leftmost
    /// one is returned. Returns `None` if the sequence is shorter than the
    /// motif.
    pub fn best_position(&self, seq: &EncodedSequence<A>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.window_probabilities(seq).into_iter().enumerate() {
            match best {
                Some((_, q)) if p <= q => (),
                _ => best = Some((i, p)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Extract the most probable `k`-mer of a sequence.
    pub fn most_probable_kmer(&self, seq: &EncodedSequence<A>) -> Result<EncodedSequence<A>, Error> {
        self.best_position(seq)
            .and_then(|i| seq.kmer(i, self.len()))
            .ok_or(Error::NoWindow {
                length: seq.len(),
                width: self.len(),
            })
    }
}

impl<A: Alphabet> AsRef<DenseMatrix<f64, A::K>> for FrequencyMatrix<A> {
    fn as_ref(&self) -> &DenseMatrix<f64, A::K> {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::abc::Dna;
    use crate::abc::Nucleotide;

    fn encode(seqs: &[&str]) -> Vec<EncodedSequence<Dna>> {
        seqs.iter()
            .map(|s| EncodedSequence::encode(s).unwrap())
            .collect()
    }

    #[test]
    fn test_from_sequences() {
        let seqs = encode(&["AACGTA", "CCCGTT", "CACCTT", "GGATTA", "TTCCGG"]);
        let counts = CountMatrix::<Dna>::from_sequences(&seqs).unwrap();
        assert_eq!(counts.n(), 5);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.symbol_counts(Nucleotide::A), [1, 2, 1, 0, 0, 2]);
        assert_eq!(counts.symbol_counts(Nucleotide::C), [2, 1, 4, 2, 0, 0]);
        assert_eq!(counts.symbol_counts(Nucleotide::G), [1, 1, 0, 2, 1, 1]);
        assert_eq!(counts.symbol_counts(Nucleotide::T), [1, 1, 0, 1, 4, 2]);
    }

    #[test]
    fn test_from_sequences_invalid() {
        let seqs = encode(&["AACGTA", "CCCGT"]);
        assert_eq!(
            CountMatrix::<Dna>::from_sequences(&seqs),
            Err(Error::LengthMismatch {
                index: 1,
                expected: 6,
                found: 5
            })
        );
        let empty: Vec<EncodedSequence<Dna>> = Vec::new();
        assert_eq!(
            CountMatrix::<Dna>::from_sequences(&empty),
            Err(Error::EmptyMotifSet)
        );
    }

    #[test]
    fn test_new() {
        let data = DenseMatrix::from_rows([[1, 2, 0, 0], [0, 0, 3, 0]]);
        let counts = CountMatrix::<Dna>::new(data).unwrap();
        assert_eq!(counts.n(), 3);
        let data = DenseMatrix::from_rows([[1, 2, 0, 0], [0, 0, 2, 0]]);
        assert!(CountMatrix::<Dna>::new(data).is_err());
    }

    #[test]
    fn test_with_pseudocounts() {
        let seqs = encode(&["AACGTA", "CCCGTT", "CACCTT", "GGATTA", "TTCCGG"]);
        let counts = CountMatrix::<Dna>::from_sequences(&seqs)
            .unwrap()
            .with_pseudocounts(1u32);
        assert_eq!(counts.total(), 9);
        assert_eq!(counts.symbol_counts(Nucleotide::A), [2, 3, 2, 1, 1, 3]);
        assert_eq!(counts.symbol_counts(Nucleotide::C), [3, 2, 5, 3, 1, 1]);
        assert_eq!(counts.symbol_counts(Nucleotide::G), [2, 2, 1, 3, 2, 2]);
        assert_eq!(counts.symbol_counts(Nucleotide::T), [2, 2, 1, 2, 5, 3]);
        for row in counts.counts().iter() {
            assert_eq!(row.iter().sum::<u32>(), 9);
        }
        // consensus and score ignore the pseudocounts
        assert_eq!(counts.consensus().to_string(), "CACCTA");
        assert_eq!(counts.score(), 14);
    }

    #[test]
    fn test_consensus_ties() {
        // every position is a tie between at least two symbols
        let seqs = encode(&["ACGT", "TGCA"]);
        let counts = CountMatrix::<Dna>::from_sequences(&seqs).unwrap();
        assert_eq!(counts.consensus().to_string(), "ACCA");
        assert_eq!(counts.score(), 4);
    }

    #[test]
    fn test_to_freq() {
        let seqs = encode(&["AACGTA", "CCCGTT", "CACCTT", "GGATTA", "TTCCGG"]);
        let counts = CountMatrix::<Dna>::from_sequences(&seqs).unwrap();
        let freq = counts.to_freq(1u32);
        assert!((freq.matrix()[0][0] - 2.0 / 9.0).abs() < 1e-12);
        assert!((freq.matrix()[2][1] - 5.0 / 9.0).abs() < 1e-12);
        let freq = counts.to_freq(0u32);
        assert!((freq.matrix()[2][1] - 4.0 / 5.0).abs() < 1e-12);
        assert_eq!(freq.matrix()[3][0], 0.0);
    }

    #[test]
    fn test_probability() {
        let profile = FrequencyMatrix::<Dna>::from_table(&[
            [0.2, 0.2, 0.0, 0.0, 0.0, 0.0, 0.9, 0.1, 0.1, 0.1, 0.3, 0.0],
            [0.1, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.1, 0.2, 0.4, 0.6],
            [0.0, 0.0, 1.0, 1.0, 0.9, 0.9, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.7, 0.2, 0.0, 0.0, 0.1, 0.1, 0.0, 0.5, 0.8, 0.7, 0.3, 0.4],
        ])
        .unwrap();
        let seq = EncodedSequence::<Dna>::encode("ACGGGGATTACC").unwrap();
        let p = profile.probability(&seq).unwrap();
        assert!((p - 0.000839808).abs() < 1e-12, "{}", p);

        let other = EncodedSequence::<Dna>::encode("TCGGGGATTACC").unwrap();
        assert!(profile.probability(&other).unwrap() > 0.0);
        let zero = EncodedSequence::<Dna>::encode("ACAGGGATTACC").unwrap();
        assert_eq!(profile.probability(&zero).unwrap(), 0.0);

        let short = EncodedSequence::<Dna>::encode("ACGG").unwrap();
        assert_eq!(
            profile.probability(&short),
            Err(Error::KmerLengthMismatch {
                expected: 12,
                found: 4
            })
        );
    }

    #[test]
    fn test_from_table_invalid() {
        assert!(FrequencyMatrix::<Dna>::from_table(&[[0.5], [0.5]]).is_err());
        assert!(FrequencyMatrix::<Dna>::from_table(&[[0.5], [0.5], [0.5], [0.5]]).is_err());
        assert!(
            FrequencyMatrix::<Dna>::from_table(&[vec![0.25, 0.25], vec![0.25], vec![0.25], vec![0.25]])
                .is_err()
        );
        assert!(FrequencyMatrix::<Dna>::from_table(&[[1.5], [-0.5], [0.0], [0.0]]).is_err());
    }

    #[test]
    fn test_most_probable_kmer() {
        let profile = FrequencyMatrix::<Dna>::from_table(&[
            [0.2, 0.2, 0.3, 0.2, 0.3],
            [0.4, 0.3, 0.1, 0.5, 0.1],
            [0.3, 0.3, 0.5, 0.2, 0.4],
            [0.1, 0.2, 0.1, 0.1, 0.2],
        ])
        .unwrap();
        let seq = EncodedSequence::<Dna>::encode(
            "ACCTGTTTATTGCCTAAGTTCCGAACAAACCCAATATAGCCCGAGGGCCT",
        )
        .unwrap();
        let kmer = profile.most_probable_kmer(&seq).unwrap();
        assert_eq!(kmer.to_string(), "CCGAG");

        let short = EncodedSequence::<Dna>::encode("ACGT").unwrap();
        assert_eq!(profile.best_position(&short), None);
        assert_eq!(
            profile.most_probable_kmer(&short),
            Err(Error::NoWindow {
                length: 4,
                width: 5
            })
        );
    }

    #[test]
    fn test_best_position_ties() {
        // windows at positions 2 and 5 are both "GA", the only ones
        // with a non-zero probability
        let profile = FrequencyMatrix::<Dna>::from_table(&[
            [0.0, 1.0],
            [0.0, 0.0],
            [1.0, 0.0],
            [0.0, 0.0],
        ])
        .unwrap();
        let seq = EncodedSequence::<Dna>::encode("CCGACGAT").unwrap();
        assert_eq!(profile.best_position(&seq), Some(2));

        // all windows are equally likely
        let seq = EncodedSequence::<Dna>::encode("TTTT").unwrap();
        assert_eq!(profile.best_position(&seq), Some(0));
    }
}
