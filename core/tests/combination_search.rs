//! Scenario coverage for the combination search: ordering contracts,
//! the single-syllable commit rule, dedup, and trace shape.

use dumunja_core::search::Multiset;
use dumunja_core::{
    search, SearchMode, SearchOptions, Source, SourceSet, TraceEvent, TraceLog, NoopSink, Trie,
};

fn probe_trie() -> Trie {
    let mut trie = Trie::new();
    for word in ["결근", "신상", "상피", "신경", "근육", "결합", "결", "신"] {
        trie.insert(word, SourceSet::single(Source::Std));
    }
    trie
}

fn suggest(trie: &Trie, initials: &[char], keep_order: bool) -> Vec<dumunja_core::ComboCandidate> {
    let options = SearchOptions {
        keep_order,
        ..SearchOptions::default()
    };
    search(trie, initials, &options, &mut NoopSink)
}

#[test]
fn sequence_top_candidate_pairs_two_words() {
    let trie = probe_trie();
    let results = suggest(&trie, &['결', '근', '신', '상'], true);
    assert!(!results.is_empty());
    let top = &results[0];
    assert_eq!(top.words, vec!["결근", "신상"]);
    assert_eq!(top.combo, "결근신상");
    assert_eq!(top.mode, SearchMode::Sequence);
    assert_eq!(top.coverage, vec!['결', '근', '신', '상']);
    assert_eq!(top.word_scores.len(), 2);
    assert!(top.word_sources.iter().all(|s| s.contains(Source::Std)));
}

#[test]
fn sequence_finds_compound_pairs() {
    let trie = probe_trie();
    let results = suggest(&trie, &['결', '합', '근', '육'], true);
    assert_eq!(results[0].words, vec!["결합", "근육"]);
}

#[test]
fn bare_singletons_lose_to_available_extensions() {
    let trie = probe_trie();
    let results = suggest(&trie, &['신', '상', '상', '피'], true);
    assert!(results
        .iter()
        .any(|c| c.words == vec!["신상", "상피"]));
    // 신 must never be committed alone while the 신상 extension is live.
    assert!(results.iter().all(|c| !c.words.contains(&"신".to_string())));
}

#[test]
fn singletons_commit_when_no_extension_exists() {
    let mut trie = Trie::new();
    trie.insert("결", SourceSet::single(Source::Std));
    trie.insert("신상", SourceSet::single(Source::Std));
    let results = suggest(&trie, &['결', '신', '상'], true);
    assert!(results.iter().any(|c| c.words == vec!["결", "신상"]));
}

#[test]
fn bag_mode_canonicalises_word_order() {
    let trie = probe_trie();
    let results = suggest(&trie, &['결', '근', '신', '상'], false);
    let top = &results[0];
    assert_eq!(top.words, vec!["결근", "신상"]);
    assert_eq!(top.mode, SearchMode::Bag);

    // Bag mode ignores input order entirely; coverage stays verbatim.
    let shuffled = suggest(&trie, &['상', '신', '근', '결'], false);
    assert!(shuffled
        .iter()
        .any(|c| c.words == vec!["결근", "신상"]));
    assert_eq!(shuffled[0].coverage, vec!['상', '신', '근', '결']);
}

#[test]
fn sequence_candidates_reproduce_the_input() {
    let trie = probe_trie();
    for initials in [
        vec!['결', '근', '신', '상'],
        vec!['신', '상', '상', '피'],
        vec!['결', '합', '근', '육'],
    ] {
        for candidate in suggest(&trie, &initials, true) {
            let concat: String = candidate.words.concat();
            let input: String = initials.iter().collect();
            assert_eq!(concat, input, "sequence candidate must match input order");
            for word in &candidate.words {
                assert!(trie.contains(word), "{word} must be a dictionary word");
            }
        }
    }
}

#[test]
fn bag_candidates_match_the_input_multiset() {
    let trie = probe_trie();
    let initials = ['상', '신', '근', '결'];
    for candidate in suggest(&trie, &initials, false) {
        let used: Vec<char> = candidate.words.iter().flat_map(|w| w.chars()).collect();
        assert_eq!(
            Multiset::from_syllables(&used),
            Multiset::from_syllables(&initials)
        );
        for word in &candidate.words {
            assert!(trie.contains(word));
        }
    }
}

#[test]
fn unreachable_initials_yield_nothing() {
    let trie = probe_trie();
    assert!(suggest(&trie, &['가', '가', '가'], true).is_empty());
    assert!(suggest(&trie, &['가', '가', '가'], false).is_empty());
}

#[test]
fn empty_input_yields_nothing_and_a_single_complete_event() {
    let trie = probe_trie();
    let mut log = TraceLog::new();
    let results = search(&trie, &[], &SearchOptions::default(), &mut log);
    assert!(results.is_empty());

    let completes: Vec<_> = log
        .events()
        .iter()
        .filter(|e| matches!(e, TraceEvent::Complete { .. }))
        .collect();
    assert_eq!(completes.len(), 1);
    assert!(matches!(
        log.events().last(),
        Some(TraceEvent::Complete { result_count: 0 })
    ));
}

#[test]
fn beam_keeps_all_segmentations_when_wide_enough() {
    let mut trie = Trie::new();
    for word in ["결근", "신상", "결근신상"] {
        trie.insert(word, SourceSet::single(Source::Std));
    }
    let results = suggest(&trie, &['결', '근', '신', '상'], true);
    let tuples: Vec<&Vec<String>> = results.iter().map(|c| &c.words).collect();
    assert!(tuples.contains(&&vec!["결근".to_string(), "신상".to_string()]));
    assert!(tuples.contains(&&vec!["결근신상".to_string()]));
    // Two multi-syllable words outrank one long word under the comparator.
    assert_eq!(results[0].words, vec!["결근", "신상"]);
}

#[test]
fn no_two_candidates_share_a_word_tuple() {
    let trie = probe_trie();
    for keep_order in [true, false] {
        let results = suggest(&trie, &['결', '근', '신', '상'], keep_order);
        for (i, a) in results.iter().enumerate() {
            for b in &results[i + 1..] {
                assert_ne!(a.words, b.words);
            }
        }
    }
}

#[test]
fn repeated_runs_are_bit_identical() {
    let trie = probe_trie();
    let options = SearchOptions::default();
    let initials = ['신', '상', '상', '피'];

    let mut first_log = TraceLog::new();
    let first = search(&trie, &initials, &options, &mut first_log);
    let mut second_log = TraceLog::new();
    let second = search(&trie, &initials, &options, &mut second_log);

    assert_eq!(first, second);
    assert_eq!(first_log.events(), second_log.events());
}

#[test]
fn tracing_never_changes_the_results() {
    let trie = probe_trie();
    let options = SearchOptions::default().bag();
    let initials = ['결', '근', '신', '상'];

    let untraced = search(&trie, &initials, &options, &mut NoopSink);
    let mut log = TraceLog::new();
    let traced = search(&trie, &initials, &options, &mut log);

    assert_eq!(untraced, traced);
    assert!(matches!(
        log.events().last(),
        Some(TraceEvent::Complete { result_count }) if *result_count == traced.len()
    ));
}

#[test]
fn duplicate_syllables_consume_one_count_per_use() {
    let mut trie = Trie::new();
    trie.insert("가가", SourceSet::single(Source::Std));
    trie.insert("가", SourceSet::single(Source::Std));
    let results = suggest(&trie, &['가', '가', '가'], true);
    // The singleton rule steers the first two counts into 가가; the last
    // 가 has no extension left and commits alone.
    assert!(results.iter().any(|c| c.words == vec!["가가", "가"]));
    for candidate in &results {
        let used: usize = candidate.words.iter().map(|w| w.chars().count()).sum();
        assert_eq!(used, 3);
    }
}
