//! Skew diagrams for locating the origin of replication.

use super::abc::Dna;
use super::abc::Nucleotide;
use super::seq::EncodedSequence;

/// Compute the running difference between G and C counts along a sequence.
///
/// The returned array has one more element than the sequence, and its
/// element at index `i` is the skew of the prefix of length `i`.
pub fn skew_array(seq: &EncodedSequence<Dna>) -> Vec<i64> {
    let mut skew = Vec::with_capacity(seq.len() + 1);
    let mut x = 0;
    skew.push(x);
    for n in seq.iter() {
        match n {
            Nucleotide::G => x += 1,
            Nucleotide::C => x -= 1,
            Nucleotide::A | Nucleotide::T => (),
        }
        skew.push(x);
    }
    skew
}

/// Find all prefix lengths where the skew reaches its minimum.
pub fn minimum_skew(seq: &EncodedSequence<Dna>) -> Vec<usize> {
    let skew = skew_array(seq);
    let min = skew.iter().copied().min().unwrap_or(0);
    skew.iter()
        .enumerate()
        .filter(|&(_, &x)| x == min)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_skew_array() {
        let seq = EncodedSequence::encode("CATGGGCATCGGCCATACGCC").unwrap();
        assert_eq!(
            skew_array(&seq),
            [0, -1, -1, -1, 0, 1, 2, 1, 1, 1, 0, 1, 2, 1, 0, 0, 0, 0, -1, 0, -1, -2]
        );
        assert_eq!(skew_array(&EncodedSequence::default()), [0]);
    }

    #[test]
    fn test_minimum_skew() {
        let seq = EncodedSequence::encode(
            "TAAAGACTGCCGAGAGGCCAACACGAGTGCTAGAACGAGGGGCGTAAACGCGGGTCCGAT",
        )
        .unwrap();
        assert_eq!(minimum_skew(&seq), [11, 24]);
        // the minimum may be reached at the very end of the sequence
        let seq = EncodedSequence::encode("GGCC").unwrap();
        assert_eq!(minimum_skew(&seq), [0, 4]);
        assert_eq!(minimum_skew(&EncodedSequence::default()), [0]);
    }
}
