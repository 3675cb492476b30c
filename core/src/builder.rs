//! Merge the three dictionary dumps into one weighted lexicon.
//!
//! Words are keyed by their normalized form; each occurrence unions the
//! source tag in, so a word listed by several dictionaries carries them
//! all and scores by the heaviest one. Emission order is `(-score, word)`
//! and stable across runs: files are processed in trailing-number order
//! and the registry is sorted before output.

use crate::error::LexiconError;
use crate::parsers::{extract_basic_words, extract_stdict_words, extract_urimal_words};
use crate::trie::Trie;
use crate::{Source, SourceSet};
use ahash::AHashMap;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A merged headword with the union of the dictionaries that list it.
#[derive(Debug, Clone, PartialEq)]
pub struct WordRecord {
    pub word: String,
    pub sources: SourceSet,
}

impl WordRecord {
    /// Weight of the heaviest source; 0.0 without sources.
    pub fn score(&self) -> f32 {
        self.sources.weight()
    }
}

/// Registry that unions source tags per normalized word.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    registry: AHashMap<String, SourceSet>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_word(&mut self, word: &str, source: Source) {
        if word.is_empty() {
            return;
        }
        self.registry
            .entry(word.to_string())
            .or_default()
            .insert(source);
    }

    /// Ingest every `*.json` dump under `dir`, tagging words with `source`.
    ///
    /// Missing directories and unparseable files are logged and skipped;
    /// a bad file never aborts the build.
    pub fn ingest_dir(&mut self, dir: Option<&Path>, source: Source) {
        let Some(dir) = dir else { return };
        if !dir.is_dir() {
            warn!(dir = %dir.display(), source = source.label(), "source directory missing");
            return;
        }
        let paths = json_files_in_build_order(dir);
        if paths.is_empty() {
            warn!(dir = %dir.display(), source = source.label(), "no JSON files found");
            return;
        }
        let extract: fn(&Path) -> Result<Vec<String>, LexiconError> = match source {
            Source::Std => extract_stdict_words,
            Source::Urimal => extract_urimal_words,
            Source::Basic => extract_basic_words,
        };
        let total = paths.len();
        for (idx, path) in paths.iter().enumerate() {
            match extract(path) {
                Ok(words) => {
                    for word in words {
                        self.add_word(&word, source);
                    }
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unparseable source file");
                }
            }
            if (idx + 1) % 5 == 0 || idx + 1 == total {
                info!(
                    source = source.label(),
                    processed = idx + 1,
                    total,
                    "ingest progress"
                );
            }
        }
    }

    /// Drain into records ordered by `(-score, word)`.
    pub fn into_records(self) -> Vec<WordRecord> {
        let mut records: Vec<WordRecord> = self
            .registry
            .into_iter()
            .map(|(word, sources)| WordRecord { word, sources })
            .collect();
        records.sort_by(|a, b| {
            b.score()
                .total_cmp(&a.score())
                .then_with(|| a.word.cmp(&b.word))
        });
        records
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

/// Build the merged lexicon from up to three dump directories.
pub fn build_lexicon(
    stdict_dir: Option<&Path>,
    urimal_dir: Option<&Path>,
    basic_dir: Option<&Path>,
) -> Vec<WordRecord> {
    let mut builder = LexiconBuilder::new();
    builder.ingest_dir(stdict_dir, Source::Std);
    builder.ingest_dir(urimal_dir, Source::Urimal);
    builder.ingest_dir(basic_dir, Source::Basic);
    let records = builder.into_records();
    info!(total = records.len(), "merged lexicon");
    records
}

/// `*.json` files under `dir` sorted by the trailing integer in
/// `*_<n>.json`, then by name. Unnumbered files sort first.
fn json_files_in_build_order(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .collect();
    paths.sort_by_key(|path| {
        (
            trailing_number(path),
            path.file_name().map(|name| name.to_os_string()),
        )
    });
    paths
}

fn trailing_number(path: &Path) -> u64 {
    let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
        return 0;
    };
    match stem.rsplit_once('_') {
        Some((_, digits))
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    w: &'a str,
    sources: Vec<&'static str>,
    score: f32,
}

/// Write the `(-score, word)`-ordered dump as gzipped jsonl, one
/// `{"w", "sources", "score"}` object per line.
pub fn save_jsonl_gz(records: &[WordRecord], path: &Path) -> Result<(), LexiconError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());
    for record in records {
        let line = serde_json::to_string(&JsonlRecord {
            w: &record.word,
            sources: record.sources.labels(),
            score: record.score(),
        })?;
        writeln!(writer, "{line}")?;
    }
    let buffered = writer.finish()?;
    buffered
        .into_inner()
        .map_err(|err| LexiconError::Io(err.into_error()))?;
    Ok(())
}

/// Insert every record into a fresh weighted trie.
pub fn build_trie(records: &[WordRecord]) -> Trie {
    let mut trie = Trie::new();
    for record in records {
        trie.insert(&record.word, record.sources);
    }
    trie
}

/// Build-time summary of the merged lexicon.
#[derive(Debug, Clone, Serialize)]
pub struct LexiconReport {
    pub total_words: usize,
    /// Word length (in syllables) -> count.
    pub length_histogram: BTreeMap<usize, usize>,
    /// Source label -> number of words carrying it.
    pub source_coverage: BTreeMap<&'static str, usize>,
}

impl LexiconReport {
    pub fn from_records(records: &[WordRecord]) -> Self {
        let mut length_histogram = BTreeMap::new();
        let mut source_coverage = BTreeMap::new();
        for record in records {
            *length_histogram
                .entry(record.word.chars().count())
                .or_insert(0) += 1;
            for source in record.sources.iter() {
                *source_coverage.entry(source.label()).or_insert(0) += 1;
            }
        }
        Self {
            total_words: records.len(),
            length_histogram,
            source_coverage,
        }
    }
}
