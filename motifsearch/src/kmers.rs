//! Exact and approximate `k`-mer matching and counting.

use std::collections::HashMap;

use super::abc::Alphabet;
use super::err::Error;
use super::seq::EncodedSequence;

/// Count the mismatched positions between two sequences of equal length.
pub fn hamming_distance<A: Alphabet>(
    p: &EncodedSequence<A>,
    q: &EncodedSequence<A>,
) -> Result<usize, Error> {
    if p.len() != q.len() {
        return Err(Error::KmerLengthMismatch {
            expected: p.len(),
            found: q.len(),
        });
    }
    let p: &[A::Symbol] = p.as_ref();
    let q: &[A::Symbol] = q.as_ref();
    Ok(mismatches(p, q))
}

#[inline]
fn mismatches<S: PartialEq>(p: &[S], q: &[S]) -> usize {
    p.iter().zip(q).filter(|(x, y)| x != y).count()
}

/// Find the start positions of all occurrences of `pattern` in `text`.
///
/// Occurrences may overlap. An empty pattern never matches.
pub fn pattern_matching<A: Alphabet>(
    pattern: &EncodedSequence<A>,
    text: &EncodedSequence<A>,
) -> Vec<usize> {
    approximate_pattern_matching(pattern, text, 0)
}

/// Count the occurrences of `pattern` in `text`, overlaps included.
pub fn pattern_count<A: Alphabet>(
    pattern: &EncodedSequence<A>,
    text: &EncodedSequence<A>,
) -> usize {
    approximate_pattern_count(pattern, text, 0)
}

/// Find the start positions of all windows of `text` with at most `d`
/// mismatches to `pattern`.
pub fn approximate_pattern_matching<A: Alphabet>(
    pattern: &EncodedSequence<A>,
    text: &EncodedSequence<A>,
    d: usize,
) -> Vec<usize> {
    let pattern: &[A::Symbol] = pattern.as_ref();
    if pattern.is_empty() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|&(_, w)| mismatches(pattern, w) <= d)
        .map(|(i, _)| i)
        .collect()
}

/// Count the windows of `text` with at most `d` mismatches to `pattern`.
pub fn approximate_pattern_count<A: Alphabet>(
    pattern: &EncodedSequence<A>,
    text: &EncodedSequence<A>,
    d: usize,
) -> usize {
    let pattern: &[A::Symbol] = pattern.as_ref();
    if pattern.is_empty() {
        return 0;
    }
    text.windows(pattern.len())
        .filter(|&w| mismatches(pattern, w) <= d)
        .count()
}

/// Count the occurrences of every `k`-mer of `text`.
pub fn frequency_map<A: Alphabet>(
    text: &EncodedSequence<A>,
    k: usize,
) -> HashMap<EncodedSequence<A>, usize> {
    let mut counts = HashMap::new();
    if k > 0 {
        for w in text.windows(k) {
            *counts.entry(EncodedSequence::new(w.to_vec())).or_insert(0) += 1;
        }
    }
    counts
}

/// Find the most frequent `k`-mers of `text`.
///
/// The `k`-mers are returned in the order of their first occurrence.
pub fn frequent_words<A: Alphabet>(text: &EncodedSequence<A>, k: usize) -> Vec<EncodedSequence<A>> {
    let counts = frequency_map(text, k);
    let max = match counts.values().max() {
        Some(&max) => max,
        None => return Vec::new(),
    };
    let mut words: Vec<EncodedSequence<A>> = Vec::new();
    for w in text.windows(k) {
        let kmer = EncodedSequence::new(w.to_vec());
        if counts[&kmer] == max && !words.contains(&kmer) {
            words.push(kmer);
        }
    }
    words
}
