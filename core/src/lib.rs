//! dumunja-core
//!
//! Lexicon and combination-search engine for Korean 두문자 조합: given a
//! sequence of Hangul initials, enumerate ranked ways to segment them into
//! real dictionary words whose first syllables reproduce the input.
//!
//! The crate is split along the build/query line. Build side: the source
//! parsers and the `builder` module merge heterogeneous dictionary dumps
//! into a weighted prefix trie plus a gzipped jsonl dump. Query side: the
//! `search` module runs a beam search over the trie and the `engine` module
//! wraps it behind a cached facade for external adapters (HTTP gateway,
//! tool server, CLIs) that live outside this crate.
//!
//! Public API:
//! - `Source` / `SourceSet` - dictionary source tags and their weights
//! - `Config` - engine configuration, toml (de)serialization helpers
//! - `Trie` - weighted prefix index over the merged lexicon
//! - `LexiconBuilder` / `build_lexicon` - dump ingestion and artifact emission
//! - `search` / `SearchOptions` - the combination beam search
//! - `ComboCandidate` - a ranked segmentation result
//! - `Engine` - runtime facade with artifact discovery and result caching

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::LexiconError;

pub mod hangul;

pub mod parsers;

pub mod trie;
pub use trie::{Trie, WordInfo};

pub mod builder;
pub use builder::{build_lexicon, LexiconBuilder, LexiconReport, WordRecord};

pub mod candidate;
pub use candidate::{ComboCandidate, SearchMode};

pub mod trace;
pub use trace::{NoopSink, TraceEvent, TraceLog, TraceSink};

pub mod search;
pub use search::{search, SearchOptions};

pub mod engine;
pub use engine::{Engine, WordStatus};

/// One of the three Korean dictionaries a headword can come from.
///
/// The discriminants are listed in label order so that `SourceSet`
/// iteration yields alphabetically sorted labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// 한국어기초사전 (basic Korean learners' dictionary).
    Basic,
    /// 표준국어대사전 (standard Korean dictionary).
    Std,
    /// 우리말샘 (open Korean dictionary).
    Urimal,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Basic, Source::Std, Source::Urimal];

    /// Opaque wire label for this tag.
    pub fn label(self) -> &'static str {
        match self {
            Source::Basic => "BASIC",
            Source::Std => "STD",
            Source::Urimal => "URIMAL",
        }
    }

    /// Fixed per-source weight used as a word's base score.
    pub fn weight(self) -> f32 {
        match self {
            Source::Basic => 3.0,
            Source::Std => 2.0,
            Source::Urimal => 1.0,
        }
    }

    pub fn from_label(label: &str) -> Option<Source> {
        match label {
            "BASIC" => Some(Source::Basic),
            "STD" => Some(Source::Std),
            "URIMAL" => Some(Source::Urimal),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Source::Basic => 1 << 0,
            Source::Std => 1 << 1,
            Source::Urimal => 1 << 2,
        }
    }
}

/// Set of source tags packed as a bitset.
///
/// Serializes as the sorted list of labels, which is also the order the
/// jsonl dump and candidate payloads expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSet(u8);

impl SourceSet {
    pub const EMPTY: SourceSet = SourceSet(0);

    pub fn single(source: Source) -> SourceSet {
        SourceSet(source.bit())
    }

    pub fn insert(&mut self, source: Source) {
        self.0 |= source.bit();
    }

    pub fn union(self, other: SourceSet) -> SourceSet {
        SourceSet(self.0 | other.0)
    }

    pub fn contains(self, source: Source) -> bool {
        self.0 & source.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in label order.
    pub fn iter(self) -> impl Iterator<Item = Source> {
        Source::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    /// Sorted wire labels.
    pub fn labels(self) -> Vec<&'static str> {
        self.iter().map(Source::label).collect()
    }

    /// Highest weight among members; 0.0 when empty.
    pub fn weight(self) -> f32 {
        self.iter().map(Source::weight).fold(0.0, f32::max)
    }

    pub(crate) fn bits(self) -> u8 {
        self.0
    }

    pub(crate) fn from_bits(bits: u8) -> SourceSet {
        SourceSet(bits & 0b111)
    }
}

impl FromIterator<Source> for SourceSet {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        let mut set = SourceSet::EMPTY;
        for source in iter {
            set.insert(source);
        }
        set
    }
}

impl Serialize for SourceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Source::label))
    }
}

impl<'de> Deserialize<'de> for SourceSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let labels = Vec::<String>::deserialize(deserializer)?;
        let mut set = SourceSet::EMPTY;
        for label in &labels {
            match Source::from_label(label) {
                Some(source) => set.insert(source),
                None => return Err(D::Error::custom(format!("unknown source tag: {label}"))),
            }
        }
        Ok(set)
    }
}

/// Engine configuration.
///
/// All fields have defaults, so a partial toml file is enough.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Frontier states retained after each expansion round. Must be >= 1.
    pub beam_width: usize,
    /// Maximum number of combinations accumulated per search. Must be >= 1.
    pub max_candidates: usize,
    /// Sequence mode (true) reproduces the input order exactly; bag mode
    /// (false) only matches the syllable multiset.
    pub keep_order: bool,
    /// Default cap for the words-starting-with facade.
    pub prefix_limit: usize,
    /// Engine LRU cache capacity (untraced search results).
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            beam_width: 64,
            max_candidates: 20,
            keep_order: true,
            prefix_limit: 50,
            max_cache_size: 256,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_set_union_and_weight() {
        let mut set = SourceSet::single(Source::Urimal);
        assert_eq!(set.weight(), 1.0);
        set.insert(Source::Std);
        assert_eq!(set.weight(), 2.0);
        let both = set.union(SourceSet::single(Source::Basic));
        assert_eq!(both.weight(), 3.0);
        assert_eq!(both.len(), 3);
        assert!(SourceSet::EMPTY.is_empty());
        assert_eq!(SourceSet::EMPTY.weight(), 0.0);
    }

    #[test]
    fn source_set_labels_are_sorted() {
        let set: SourceSet = [Source::Urimal, Source::Basic, Source::Std]
            .into_iter()
            .collect();
        assert_eq!(set.labels(), vec!["BASIC", "STD", "URIMAL"]);
    }

    #[test]
    fn source_set_serde_roundtrip() {
        let set: SourceSet = [Source::Std, Source::Basic].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["BASIC","STD"]"#);
        let back: SourceSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = Config {
            beam_width: 8,
            ..Config::default()
        };
        let text = config.to_toml_string().unwrap();
        let back = Config::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn config_partial_toml_uses_defaults() {
        let config = Config::from_toml_str("beam_width = 4").unwrap();
        assert_eq!(config.beam_width, 4);
        assert_eq!(config.max_candidates, 20);
        assert!(config.keep_order);
    }
}
