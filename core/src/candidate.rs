//! Combination candidates and their ranking.

use crate::SourceSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which segmentation contract produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Word syllables concatenated in order reproduce the input exactly.
    Sequence,
    /// Only the syllable multiset matches; output order is canonicalised.
    Bag,
}

/// A ranked segmentation of the input initials into dictionary words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboCandidate {
    /// Concatenation of `words`.
    pub combo: String,
    pub words: Vec<String>,
    /// Source tags per word, parallel to `words`.
    pub word_sources: Vec<SourceSet>,
    /// Per-word scores, parallel to `words`.
    pub word_scores: Vec<f32>,
    /// The input initials, verbatim.
    pub coverage: Vec<char>,
    pub mode: SearchMode,
    pub score: f32,
}

/// Output order of a committed word list. Sequence mode keeps commit
/// order; bag mode re-sorts by `(-length, lexicographic)`.
pub fn canonicalise_words(mut words: Vec<String>, keep_order: bool) -> Vec<String> {
    if !keep_order {
        words.sort_by(|a, b| {
            syllable_count(b)
                .cmp(&syllable_count(a))
                .then_with(|| a.cmp(b))
        });
    }
    words
}

fn syllable_count(word: &str) -> usize {
    word.chars().count()
}

/// Ranking comparator, smallest-first over:
/// more multi-syllable words, fewer singletons, fewer segments, higher
/// score, more total syllables, combo text, then the word tuple itself so
/// distinct candidates never tie.
pub fn compare(a: &ComboCandidate, b: &ComboCandidate) -> Ordering {
    let (a_multi, a_single, a_syllables) = word_stats(a);
    let (b_multi, b_single, b_syllables) = word_stats(b);
    b_multi
        .cmp(&a_multi)
        .then(a_single.cmp(&b_single))
        .then(a.words.len().cmp(&b.words.len()))
        .then(b.score.total_cmp(&a.score))
        .then(b_syllables.cmp(&a_syllables))
        .then_with(|| a.combo.cmp(&b.combo))
        .then_with(|| a.words.cmp(&b.words))
}

fn word_stats(candidate: &ComboCandidate) -> (usize, usize, usize) {
    let multi = candidate
        .words
        .iter()
        .filter(|w| syllable_count(w) > 1)
        .count();
    let single = candidate.words.len() - multi;
    let syllables = candidate.words.iter().map(|w| syllable_count(w)).sum();
    (multi, single, syllables)
}

/// Sort candidates best-first under `compare`.
pub fn rank(candidates: &mut [ComboCandidate]) {
    candidates.sort_by(|a, b| compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(words: &[&str], score: f32) -> ComboCandidate {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        ComboCandidate {
            combo: words.concat(),
            word_sources: vec![SourceSet::EMPTY; words.len()],
            word_scores: vec![0.0; words.len()],
            coverage: Vec::new(),
            mode: SearchMode::Sequence,
            score,
            words,
        }
    }

    #[test]
    fn bag_canonical_order_is_longest_then_lexicographic() {
        let words = vec!["신".into(), "결근".into(), "가나다".into(), "각".into()];
        assert_eq!(
            canonicalise_words(words.clone(), false),
            vec!["가나다", "결근", "각", "신"]
        );
        assert_eq!(canonicalise_words(words.clone(), true), words);
    }

    #[test]
    fn multi_syllable_words_beat_singletons() {
        let mut candidates = vec![
            candidate(&["결", "근", "신", "상"], 9.0),
            candidate(&["결근", "신상"], 4.2),
        ];
        rank(&mut candidates);
        assert_eq!(candidates[0].words, vec!["결근", "신상"]);
    }

    #[test]
    fn fewer_segments_win_at_equal_multi_counts() {
        let mut candidates = vec![
            candidate(&["결근", "신상", "피"], 6.0),
            candidate(&["결근", "신상피"], 5.0),
        ];
        rank(&mut candidates);
        assert_eq!(candidates[0].words, vec!["결근", "신상피"]);
    }

    #[test]
    fn score_breaks_remaining_ties() {
        let mut candidates = vec![
            candidate(&["신상", "결근"], 4.0),
            candidate(&["결근", "신상"], 5.0),
        ];
        rank(&mut candidates);
        assert_eq!(candidates[0].score, 5.0);
    }

    #[test]
    fn comparator_is_total_on_distinct_candidates() {
        // Same text, same stats, same score, different segmentations.
        let a = candidate(&["가나", "다라마바"], 1.0);
        let b = candidate(&["가나다", "라마바"], 1.0);
        assert_ne!(compare(&a, &b), Ordering::Equal);
        assert_eq!(compare(&a, &a), Ordering::Equal);
    }
}
