extern crate motifsearch;

use motifsearch::abc::Dna;
use motifsearch::abc::Nucleotide;
use motifsearch::abc::Pseudocounts;
use motifsearch::motifs::MotifSet;
use motifsearch::pwm::CountMatrix;
use motifsearch::pwm::FrequencyMatrix;
use motifsearch::seq::EncodedSequence;

const MOTIFS: &[&str] = &["AACGTA", "CCCGTT", "CACCTT", "GGATTA", "TTCCGG"];

fn motifs() -> MotifSet<Dna> {
    MotifSet::encode(MOTIFS).unwrap()
}

#[test]
fn count_matrix_raw() {
    let counts = motifs().count_matrix(Pseudocounts::default());
    assert_eq!(counts.n(), 5);
    assert_eq!(counts.symbol_counts(Nucleotide::A), [1, 2, 1, 0, 0, 2]);
    assert_eq!(counts.symbol_counts(Nucleotide::C), [2, 1, 4, 2, 0, 0]);
    assert_eq!(counts.symbol_counts(Nucleotide::G), [1, 1, 0, 2, 1, 1]);
    assert_eq!(counts.symbol_counts(Nucleotide::T), [1, 1, 0, 1, 4, 2]);
}

#[test]
fn count_matrix_pseudo() {
    let counts = motifs().count_matrix(Pseudocounts::laplace());
    assert_eq!(counts.symbol_counts(Nucleotide::A), [2, 3, 2, 1, 1, 3]);
    assert_eq!(counts.symbol_counts(Nucleotide::C), [3, 2, 5, 3, 1, 1]);
    assert_eq!(counts.symbol_counts(Nucleotide::G), [2, 2, 1, 3, 2, 2]);
    assert_eq!(counts.symbol_counts(Nucleotide::T), [2, 2, 1, 2, 5, 3]);
    // consensus and score ignore pseudocounts
    assert_eq!(counts.consensus().to_string(), "CACCTA");
    assert_eq!(counts.score(), 14);
}

#[test]
fn count_matrix_from_iterator() {
    let counts = MOTIFS
        .iter()
        .map(|s| EncodedSequence::encode(s))
        .map(Result::unwrap)
        .collect::<Result<CountMatrix<Dna>, _>>()
        .unwrap();
    assert_eq!(counts, motifs().count_matrix(Pseudocounts::default()));
}

#[test]
fn profile_matrix_rows() {
    let profile = motifs().profile_matrix(Pseudocounts::laplace());
    assert_eq!(profile.len(), 6);
    for row in profile.matrix().iter() {
        let total: f64 = row.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        for &p in row {
            assert!(p > 0.0);
            assert!(p < 1.0);
        }
    }
    // first column is (2, 3, 2, 2) / 9
    let row = &profile.matrix()[0];
    assert!((row[0] - 2.0 / 9.0).abs() < 1e-12);
    assert!((row[1] - 3.0 / 9.0).abs() < 1e-12);
}

#[test]
fn most_probable_kmer() {
    let profile = FrequencyMatrix::<Dna>::from_table(&[
        [0.2, 0.2, 0.3, 0.2, 0.3],
        [0.4, 0.3, 0.1, 0.5, 0.1],
        [0.3, 0.3, 0.5, 0.2, 0.4],
        [0.1, 0.2, 0.1, 0.1, 0.2],
    ])
    .unwrap();
    let seq = EncodedSequence::encode("ACCTGTTTATTGCCTAAGTTCCGAACAAACCCAATATAGCCCGAGGGCCT").unwrap();
    let kmer = profile.most_probable_kmer(&seq).unwrap();
    assert_eq!(kmer.to_string(), "CCGAG");
}
