//! Beam search that segments a sequence of initials into dictionary words.
//!
//! The frontier is a queue of partial states popped front-first; each
//! expansion may commit the accumulated prefix as a word, extend it by one
//! syllable, or finalize when nothing remains. After every expansion round
//! the frontier is stably sorted by score and cut to the beam width, so
//! the walk is breadth-first with pruning rather than best-first.
//!
//! For identical inputs and trie contents the output (and any trace) is
//! bit-identical: the only hash-ordered structure is the dedup map, and
//! the final comparator is a total order.

use crate::candidate::{canonicalise_words, ComboCandidate, SearchMode};
use crate::trace::{TraceEvent, TraceSink};
use crate::trie::Trie;
use crate::Config;
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Deduction per committed word, biasing toward fewer/longer words.
pub const SEGMENT_PENALTY: f32 = 0.2;

/// Bonus per syllable beyond the first in a committed word.
const LENGTH_BONUS: f32 = 0.3;

/// Per-call search knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Frontier states retained after each expansion round.
    pub beam_width: usize,
    /// Stop once this many raw results have been collected.
    pub max_candidates: usize,
    /// Sequence mode (true) or bag mode (false).
    pub keep_order: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            beam_width: 64,
            max_candidates: 20,
            keep_order: true,
        }
    }
}

impl SearchOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            beam_width: config.beam_width,
            max_candidates: config.max_candidates,
            keep_order: config.keep_order,
        }
    }

    pub fn bag(mut self) -> Self {
        self.keep_order = false;
        self
    }
}

/// Multiset of syllables as sorted `(syllable, count)` pairs, so states
/// compare and hash by value rather than identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multiset(Vec<(char, u32)>);

impl Multiset {
    pub fn from_syllables(syllables: &[char]) -> Self {
        let mut counts: BTreeMap<char, u32> = BTreeMap::new();
        for &ch in syllables {
            *counts.entry(ch).or_insert(0) += 1;
        }
        Multiset(counts.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total count across all syllables.
    pub fn total(&self) -> usize {
        self.0.iter().map(|&(_, count)| count as usize).sum()
    }

    /// Distinct syllables in sorted order.
    pub fn syllables(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&(ch, _)| ch)
    }

    /// Copy with one count of `ch` removed (dropped entirely at zero).
    pub fn without(&self, ch: char) -> Multiset {
        let mut pairs = self.0.clone();
        if let Some(pos) = pairs.iter().position(|&(c, _)| c == ch) {
            if pairs[pos].1 <= 1 {
                pairs.remove(pos);
            } else {
                pairs[pos].1 -= 1;
            }
        }
        Multiset(pairs)
    }

    /// Sorted map view for trace payloads.
    pub fn counts(&self) -> BTreeMap<char, u32> {
        self.0.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
struct SearchState {
    score: f32,
    remaining: Multiset,
    prefix: String,
    words: Vec<String>,
}

/// Word score: trie base score plus the multi-syllable bonus.
pub fn score_word(trie: &Trie, word: &str) -> f32 {
    let base = trie.lookup(word).map(|info| info.score).unwrap_or(0.0);
    let syllables = word.chars().count();
    base + LENGTH_BONUS * syllables.saturating_sub(1) as f32
}

/// Extension heuristic: a length nudge plus a peek at the best terminal
/// under the prefix.
pub fn score_prefix_hint(trie: &Trie, prefix: &str) -> f32 {
    let best = trie
        .words_with_prefix(prefix, Some(1))
        .first()
        .map(|info| info.score)
        .unwrap_or(0.0);
    0.1 * prefix.chars().count() as f32 + 0.2 * best
}

/// Enumerate ranked segmentations of `initials` into dictionary words.
///
/// In sequence mode the committed words, concatenated, reproduce the input
/// exactly; in bag mode only the syllable multiset must match and the word
/// list is canonicalised for output. Results are deduplicated by word
/// tuple (best score wins) and ranked by `candidate::compare`.
pub fn search(
    trie: &Trie,
    initials: &[char],
    options: &SearchOptions,
    sink: &mut dyn TraceSink,
) -> Vec<ComboCandidate> {
    let keep_order = options.keep_order;
    let mode = if keep_order {
        SearchMode::Sequence
    } else {
        SearchMode::Bag
    };

    let mut frontier = vec![SearchState {
        score: 0.0,
        remaining: Multiset::from_syllables(initials),
        prefix: String::new(),
        words: Vec::new(),
    }];
    let mut results: Vec<ComboCandidate> = Vec::new();

    while !frontier.is_empty() && results.len() < options.max_candidates {
        let state = frontier.remove(0);
        if sink.enabled() {
            sink.record(TraceEvent::Pop {
                score: state.score,
                prefix: state.prefix.clone(),
                words: state.words.clone(),
                remaining: state.remaining.counts(),
                frontier_size: frontier.len(),
            });
        }

        if state.remaining.is_empty() {
            if state.prefix.is_empty() || trie.contains(&state.prefix) {
                let mut words = state.words;
                if !state.prefix.is_empty() {
                    words.push(state.prefix);
                }
                if words.is_empty() {
                    // Empty input: the empty word is never committed.
                    continue;
                }
                let words = canonicalise_words(words, keep_order);
                let candidate = finalize(trie, words, initials, mode);
                if sink.enabled() {
                    sink.record(TraceEvent::Result {
                        combo: candidate.combo.clone(),
                        words: candidate.words.clone(),
                        word_scores: candidate.word_scores.clone(),
                        score: candidate.score,
                    });
                }
                results.push(candidate);
            }
            continue;
        }

        // Syllables this state may consume next: in sequence mode only the
        // next unconsumed input position, in bag mode anything remaining.
        let extensions: Vec<char> = if keep_order {
            let consumed = initials.len() - state.remaining.total();
            vec![initials[consumed]]
        } else {
            state.remaining.syllables().collect()
        };

        if !state.prefix.is_empty() && trie.contains(&state.prefix) {
            let can_extend = extensions.iter().any(|&syllable| {
                let mut probe = state.prefix.clone();
                probe.push(syllable);
                trie.has_prefix(&probe)
            });
            let single_syllable = state.prefix.chars().count() == 1;
            // Prefer longer words: a lone syllable is only committed once
            // no extension over the remaining syllables is possible.
            if !(single_syllable && can_extend) {
                let mut words = state.words.clone();
                words.push(state.prefix.clone());
                let committed_score = state.score + score_word(trie, &state.prefix);
                if sink.enabled() {
                    sink.record(TraceEvent::Commit {
                        word: state.prefix.clone(),
                        words: words.clone(),
                        score: committed_score,
                        remaining: state.remaining.counts(),
                    });
                }
                frontier.push(SearchState {
                    score: committed_score,
                    remaining: state.remaining.clone(),
                    prefix: String::new(),
                    words,
                });
            }
        }

        for &syllable in &extensions {
            let mut next_prefix = state.prefix.clone();
            next_prefix.push(syllable);
            if !trie.has_prefix(&next_prefix) {
                continue;
            }
            let next_remaining = state.remaining.without(syllable);
            let next_score = state.score + score_prefix_hint(trie, &next_prefix);
            if sink.enabled() {
                sink.record(TraceEvent::Extend {
                    letter: syllable,
                    next_prefix: next_prefix.clone(),
                    score: next_score,
                    remaining: next_remaining.counts(),
                });
            }
            frontier.push(SearchState {
                score: next_score,
                remaining: next_remaining,
                prefix: next_prefix,
                words: state.words.clone(),
            });
        }

        prune_to_beam(&mut frontier, options.beam_width);
        if sink.enabled() {
            sink.record(TraceEvent::Prune {
                frontier_size: frontier.len(),
            });
        }
    }

    let mut ordered = dedup_best(results);
    crate::candidate::rank(&mut ordered);
    if sink.enabled() {
        sink.record(TraceEvent::Complete {
            result_count: ordered.len(),
        });
    }
    ordered
}

fn finalize(trie: &Trie, words: Vec<String>, initials: &[char], mode: SearchMode) -> ComboCandidate {
    let combo = words.concat();
    let word_sources = words
        .iter()
        .map(|word| {
            trie.lookup(word)
                .map(|info| info.sources)
                .unwrap_or_default()
        })
        .collect();
    let word_scores: Vec<f32> = words.iter().map(|word| score_word(trie, word)).collect();
    let score = word_scores.iter().sum::<f32>() - SEGMENT_PENALTY * words.len() as f32;
    ComboCandidate {
        combo,
        word_sources,
        word_scores,
        coverage: initials.to_vec(),
        mode,
        score,
        words,
    }
}

/// Stable score-descending sort, then cut to the beam width.
fn prune_to_beam(frontier: &mut Vec<SearchState>, beam_width: usize) {
    frontier.sort_by(|a, b| b.score.total_cmp(&a.score));
    frontier.truncate(beam_width);
}

/// Keep the best-scoring candidate per canonical word tuple.
fn dedup_best(results: Vec<ComboCandidate>) -> Vec<ComboCandidate> {
    let mut best: AHashMap<Vec<String>, ComboCandidate> = AHashMap::new();
    for candidate in results {
        match best.get(&candidate.words) {
            Some(existing) if existing.score >= candidate.score => {}
            _ => {
                best.insert(candidate.words.clone(), candidate);
            }
        }
    }
    best.into_values().collect()
}
