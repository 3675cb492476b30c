//! Parsers for the three Korean dictionary dump schemas.
//!
//! Any schema node that should be a mapping may instead be absent, a single
//! mapping, or a list of mappings. The helpers below fold those shapes into
//! one iterator so the parsers stay total over malformed dumps; only a file
//! that is not JSON at all produces an error.
//!
//! Each parser yields normalized headwords, deduplicated within one file in
//! first-seen order.

mod basic;
mod stdict;
mod urimal;

pub use basic::extract_basic_words;
pub use stdict::extract_stdict_words;
pub use urimal::extract_urimal_words;

use crate::error::LexiconError;
use ahash::AHashSet;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) fn read_json(path: &Path) -> Result<Value, LexiconError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| LexiconError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Treat `value` as zero, one, or many JSON objects.
pub(crate) fn maps(value: Option<&Value>) -> Box<dyn Iterator<Item = &Map<String, Value>> + '_> {
    match value {
        Some(Value::Object(map)) => Box::new(std::iter::once(map)),
        Some(Value::Array(items)) => Box::new(items.iter().filter_map(Value::as_object)),
        _ => Box::new(std::iter::empty()),
    }
}

/// Treat `value` as zero, one, or many JSON strings.
pub(crate) fn strings(value: Option<&Value>) -> Box<dyn Iterator<Item = &str> + '_> {
    match value {
        Some(Value::String(s)) => Box::new(std::iter::once(s.as_str())),
        Some(Value::Array(items)) => Box::new(items.iter().filter_map(Value::as_str)),
        _ => Box::new(std::iter::empty()),
    }
}

/// First-seen-order dedup shared by the three parsers.
#[derive(Default)]
pub(crate) struct WordList {
    seen: AHashSet<String>,
    words: Vec<String>,
}

impl WordList {
    pub(crate) fn push(&mut self, word: String) {
        if !word.is_empty() && self.seen.insert(word.clone()) {
            self.words.push(word);
        }
    }

    pub(crate) fn into_words(self) -> Vec<String> {
        self.words
    }
}
