//! Driver for repeating a stochastic search several times.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::iter::IntoParallelRefIterator;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::abc::Alphabet;
use crate::err::Error;
use crate::motifs::MotifSet;

/// Repeat a stochastic search and keep the best scoring motif set.
///
/// One seed is drawn from `rng` for every run, in run order, and each run
/// gets its own [`StdRng`] seeded from it. With the `parallel` feature the
/// runs are executed on the `rayon` thread pool, but results are always
/// reduced in run order so that the first run wins ties. The outcome only
/// depends on the state of `rng`, not on the thread scheduling.
pub fn repeat<A, R, F>(runs: usize, rng: &mut R, run: F) -> Result<MotifSet<A>, Error>
where
    A: Alphabet,
    R: Rng,
    F: Fn(&mut StdRng) -> Result<MotifSet<A>, Error> + Send + Sync,
{
    if runs == 0 {
        return Err(Error::invalid_parameter(
            "runs",
            runs,
            "expected at least one run",
        ));
    }

    let seeds = (0..runs).map(|_| rng.gen::<u64>()).collect::<Vec<u64>>();

    #[cfg(feature = "parallel")]
    let results = seeds
        .par_iter()
        .map(|&seed| run(&mut StdRng::seed_from_u64(seed)))
        .collect::<Vec<_>>();
    #[cfg(not(feature = "parallel"))]
    let results = seeds
        .iter()
        .map(|&seed| run(&mut StdRng::seed_from_u64(seed)))
        .collect::<Vec<_>>();

    let mut best: Option<(u32, MotifSet<A>)> = None;
    for (i, result) in results.into_iter().enumerate() {
        let motifs = result?;
        let score = motifs.score();
        log::trace!("run {} finished with score {}", i, score);
        match &best {
            Some((best_score, _)) if score >= *best_score => (),
            _ => best = Some((score, motifs)),
        }
    }

    best.map(|(score, motifs)| {
        log::debug!("best score over {} runs: {}", runs, score);
        motifs
    })
    .ok_or(Error::EmptyMotifSet)
}
