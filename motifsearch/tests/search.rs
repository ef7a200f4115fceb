extern crate motifsearch;

use motifsearch::abc::Dna;
use motifsearch::err::Error;
use motifsearch::motifs::MotifSet;
use motifsearch::search::GreedySearch;
use motifsearch::seq::EncodedSequence;

const SAMPLE: &[&str] = &[
    "GGCGTTCAGGCA",
    "AAGAATCAGTCA",
    "CAAGGAGTTCGC",
    "CACGTCAATCAC",
    "CAATAATATTCG",
];

const PLANTED: &[&str] = &[
    "TTGACCGATTACAGCCTTAGCAAT",
    "CAGCGATTACAGTTTAACGTTGCA",
    "GTCCAAGGTAGGATTACAGATTGC",
    "ACGATTACAGGGCCTTTAACGTCA",
    "CCGTTTAGCATCAGGATTACAGTG",
];

fn encode_all(seqs: &[&str]) -> Vec<EncodedSequence<Dna>> {
    seqs.iter()
        .map(|s| EncodedSequence::encode(s))
        .collect::<Result<_, _>>()
        .unwrap()
}

fn assert_windows(motifs: &MotifSet<Dna>, sequences: &[EncodedSequence<Dna>], k: usize) {
    assert_eq!(motifs.len(), sequences.len());
    assert_eq!(motifs.width(), k);
    for (motif, seq) in motifs.iter().zip(sequences) {
        assert!(seq.windows(k).any(|w| *motif == w));
    }
}

#[test]
fn greedy_sample() {
    let sequences = encode_all(SAMPLE);
    let motifs = GreedySearch::new(3).pseudocounts(0u32).search(&sequences).unwrap();
    assert_eq!(motifs.to_string(), "CAG\nCAG\nCAA\nCAA\nCAA");
    let motifs = GreedySearch::new(3).search(&sequences).unwrap();
    assert_eq!(motifs.to_string(), "TTC\nATC\nTTC\nATC\nTTC");
}

#[test]
fn greedy_planted() {
    let sequences = encode_all(PLANTED);
    let motifs = GreedySearch::new(8).search(&sequences).unwrap();
    assert_eq!(motifs.score(), 0);
    assert_eq!(motifs.consensus().to_string(), "GATTACAG");
}

#[test]
fn greedy_invalid_symbol() {
    let err = EncodedSequence::<Dna>::encode("GGCGTTNAGGCA").unwrap_err();
    assert_eq!(Error::from(err), Error::InvalidSymbol(motifsearch::InvalidSymbol('N')));
}

#[cfg(feature = "sampling")]
mod sampling {
    use motifsearch::search::GibbsSearch;
    use motifsearch::search::RandomizedSearch;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn randomized_reproducible() {
        let sequences = encode_all(PLANTED);
        let mut search = RandomizedSearch::new(8);
        search.runs(25);
        let m1 = search
            .search(&sequences, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let m2 = search
            .search(&sequences, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(m1, m2);
        assert_windows(&m1, &sequences, 8);
    }

    #[test]
    fn gibbs_reproducible() {
        let sequences = encode_all(PLANTED);
        let mut search = GibbsSearch::new(8);
        search.runs(10).iterations(50);
        let m1 = search
            .search(&sequences, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let m2 = search
            .search(&sequences, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(m1, m2);
        assert_windows(&m1, &sequences, 8);
    }

    #[test]
    fn gibbs_single_window() {
        // with one window per sequence, every strategy returns the sequences
        let sequences = encode_all(&["GATTACA", "GATTTCA", "CATTACA"]);
        let mut rng = StdRng::seed_from_u64(0);
        let expected = MotifSet::encode(&["GATTACA", "GATTTCA", "CATTACA"]).unwrap();
        assert_eq!(
            GibbsSearch::new(7).search(&sequences, &mut rng).unwrap(),
            expected
        );
        assert_eq!(
            RandomizedSearch::new(7).search(&sequences, &mut rng).unwrap(),
            expected
        );
        assert_eq!(GreedySearch::new(7).search(&sequences).unwrap(), expected);
        assert_eq!(expected.score(), 2);
    }

    #[test]
    fn more_runs_never_worse() {
        let sequences = encode_all(PLANTED);
        let mut search = RandomizedSearch::new(8);
        let few = search
            .runs(5)
            .search(&sequences, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let many = search
            .runs(50)
            .search(&sequences, &mut StdRng::seed_from_u64(9))
            .unwrap();
        // the first 5 seeds drawn are the same in both searches
        assert!(many.score() <= few.score());
    }

    #[test]
    fn invalid_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            GibbsSearch::<Dna>::new(3).search(&[], &mut rng),
            Err(Error::EmptyInput)
        );
        let sequences = encode_all(SAMPLE);
        assert_eq!(
            RandomizedSearch::new(0).search(&sequences, &mut rng),
            Err(Error::InvalidWidth { width: 0 })
        );
        assert!(GibbsSearch::new(3)
            .iterations(0)
            .search(&sequences, &mut rng)
            .is_ok());
    }
}
