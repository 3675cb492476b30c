//! Runtime facade over a loaded trie.
//!
//! The engine owns the immutable trie, validates caller arguments, and
//! memoizes untraced search results in an LRU cache. Traced runs bypass
//! the cache so the event log always mirrors a real walk.

use crate::candidate::ComboCandidate;
use crate::error::LexiconError;
use crate::hangul;
use crate::search::{search, SearchOptions};
use crate::trace::{NoopSink, TraceEvent, TraceLog};
use crate::trie::{Trie, WordInfo};
use crate::{Config, SourceSet};
use lru::LruCache;
use serde::Serialize;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Relative locations probed by `open_default`.
pub const DEFAULT_ARTIFACT_PATHS: [&str; 2] = ["artifacts/trie.bin", "../artifacts/trie.bin"];

/// Dictionary membership summary for a single word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordStatus {
    pub is_word: bool,
    pub has_prefix: bool,
    pub sources: SourceSet,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    initials: Vec<char>,
    beam_width: usize,
    max_candidates: usize,
    keep_order: bool,
}

pub struct Engine {
    trie: Arc<Trie>,
    config: Config,
    cache: RefCell<LruCache<CacheKey, Vec<ComboCandidate>>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl Engine {
    pub fn new(trie: Trie, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size)
            .unwrap_or(NonZeroUsize::new(256).unwrap());
        Self {
            trie: Arc::new(trie),
            config,
            cache: RefCell::new(LruCache::new(capacity)),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    /// Load the trie artifact from the first existing path.
    pub fn open<P: AsRef<Path>>(paths: &[P], config: Config) -> Result<Self, LexiconError> {
        let mut searched = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.exists() {
                debug!(path = %path.display(), "loading trie artifact");
                return Ok(Self::new(Trie::load(path)?, config));
            }
            searched.push(path.to_path_buf());
        }
        Err(LexiconError::ArtifactMissing { searched })
    }

    pub fn open_default(config: Config) -> Result<Self, LexiconError> {
        Self::open(&DEFAULT_ARTIFACT_PATHS, config)
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search options seeded from the engine configuration.
    pub fn default_options(&self) -> SearchOptions {
        SearchOptions::from_config(&self.config)
    }

    fn check_options(options: &SearchOptions) -> Result<(), LexiconError> {
        if options.beam_width < 1 {
            return Err(LexiconError::InvalidArgument(
                "beam_width must be at least 1".into(),
            ));
        }
        if options.max_candidates < 1 {
            return Err(LexiconError::InvalidArgument(
                "max_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Ranked 두문자 조합 for the given initials.
    pub fn suggest(
        &self,
        initials: &[char],
        options: &SearchOptions,
    ) -> Result<Vec<ComboCandidate>, LexiconError> {
        Self::check_options(options)?;
        let key = CacheKey {
            initials: initials.to_vec(),
            beam_width: options.beam_width,
            max_candidates: options.max_candidates,
            keep_order: options.keep_order,
        };
        if let Some(cached) = self.cache.borrow_mut().get(&key) {
            *self.cache_hits.borrow_mut() += 1;
            return Ok(cached.clone());
        }
        *self.cache_misses.borrow_mut() += 1;

        let results = search(&self.trie, initials, options, &mut NoopSink);
        self.cache.borrow_mut().put(key, results.clone());
        Ok(results)
    }

    /// Like `suggest`, also returning the transition log. Never cached.
    pub fn suggest_traced(
        &self,
        initials: &[char],
        options: &SearchOptions,
    ) -> Result<(Vec<ComboCandidate>, Vec<TraceEvent>), LexiconError> {
        Self::check_options(options)?;
        let mut log = TraceLog::new();
        let results = search(&self.trie, initials, options, &mut log);
        Ok((results, log.into_events()))
    }

    /// Extract the initials of whole words, then suggest.
    pub fn suggest_from_words<S: AsRef<str>>(
        &self,
        words: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<ComboCandidate>, LexiconError> {
        let initials = hangul::initials_from_words(words.iter().map(|w| w.as_ref()));
        self.suggest(&initials, options)
    }

    /// Membership and metadata for one word.
    pub fn check_word(&self, word: &str) -> WordStatus {
        match self.trie.lookup(word) {
            Some(info) => WordStatus {
                is_word: true,
                has_prefix: true,
                sources: info.sources,
                score: info.score,
            },
            None => WordStatus {
                is_word: false,
                has_prefix: self.trie.has_prefix(word),
                sources: SourceSet::EMPTY,
                score: 0.0,
            },
        }
    }

    /// Words beginning with `letter`, best first. The documented surface
    /// takes a single syllable; anything else yields nothing. `None` falls
    /// back to the configured `prefix_limit`.
    pub fn words_starting_with(&self, letter: &str, limit: Option<usize>) -> Vec<String> {
        self.words_starting_with_info(letter, limit)
            .into_iter()
            .map(|info| info.word)
            .collect()
    }

    /// As `words_starting_with`, with sources and scores.
    pub fn words_starting_with_info(&self, letter: &str, limit: Option<usize>) -> Vec<WordInfo> {
        if letter.chars().count() != 1 {
            return Vec::new();
        }
        let limit = limit.unwrap_or(self.config.prefix_limit);
        self.trie.words_with_prefix(letter, Some(limit))
    }

    /// `(hits, misses)` counters for the result cache.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}
