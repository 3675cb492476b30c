//! Weighted prefix trie over the merged lexicon.
//!
//! Nodes live in a flat arena indexed by `u32`, so the structure
//! serializes as a plain node stream and loads without pointer fixups.
//! Built once by the lexicon builder, then read-only: queries take `&self`
//! and the loaded trie can be shared across threads freely.

use crate::error::LexiconError;
use crate::SourceSet;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Metadata for a terminal word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub sources: SourceSet,
    pub score: f32,
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: AHashMap<char, u32>,
    terminal: bool,
    sources: SourceSet,
    base_score: f32,
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    size: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            size: 0,
        }
    }

    /// Insert `word`, unioning `sources` into the terminal node and lifting
    /// its base score to the heaviest source seen so far. Empty words are
    /// ignored; re-inserting an existing word does not change `len`.
    pub fn insert(&mut self, word: &str, sources: SourceSet) {
        if word.is_empty() {
            return;
        }
        let mut idx = 0usize;
        for ch in word.chars() {
            idx = match self.nodes[idx].children.get(&ch) {
                Some(&next) => next as usize,
                None => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(Node::default());
                    self.nodes[idx].children.insert(ch, next);
                    next as usize
                }
            };
        }
        let node = &mut self.nodes[idx];
        if !node.terminal {
            node.terminal = true;
            self.size += 1;
        }
        if !sources.is_empty() {
            node.sources = node.sources.union(sources);
            node.base_score = node.base_score.max(sources.weight());
        }
    }

    fn walk(&self, path: &str) -> Option<usize> {
        let mut idx = 0usize;
        for ch in path.chars() {
            idx = *self.nodes[idx].children.get(&ch)? as usize;
        }
        Some(idx)
    }

    /// True iff the exact word was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.walk(word).is_some_and(|idx| self.nodes[idx].terminal)
    }

    /// True iff some inserted word starts with `prefix`.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    pub fn lookup(&self, word: &str) -> Option<WordInfo> {
        let idx = self.walk(word)?;
        let node = &self.nodes[idx];
        if !node.terminal {
            return None;
        }
        Some(WordInfo {
            word: word.to_string(),
            sources: node.sources,
            score: node.base_score,
        })
    }

    /// Number of distinct inserted words.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Terminal words below `prefix`, ordered by `(-score, word)`.
    ///
    /// With a limit of `k`, the top `k` under that order are kept via a
    /// bounded min-heap: at equal score the lexicographically smaller word
    /// wins a slot. Every call produces a fresh, fully sorted vector.
    pub fn words_with_prefix(&self, prefix: &str, limit: Option<usize>) -> Vec<WordInfo> {
        if limit == Some(0) {
            return Vec::new();
        }
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };
        let mut collector = Collector::new(limit);
        let mut path = String::from(prefix);
        self.gather(start, &mut path, &mut collector);
        collector.into_sorted()
    }

    fn gather(&self, idx: usize, path: &mut String, out: &mut Collector) {
        let node = &self.nodes[idx];
        if node.terminal {
            out.push(WordInfo {
                word: path.clone(),
                sources: node.sources,
                score: node.base_score,
            });
        }
        for (&ch, &child) in &node.children {
            path.push(ch);
            self.gather(child as usize, path, out);
            path.pop();
        }
    }

    /// Write the artifact form (sorted child lists, source bitsets).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LexiconError> {
        if let Some(dir) = path.as_ref().parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &self.to_artifact())?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let artifact: TrieArtifact = bincode::deserialize_from(reader)?;
        Ok(Self::from_artifact(artifact))
    }

    fn to_artifact(&self) -> TrieArtifact {
        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut children: Vec<(char, u32)> =
                    node.children.iter().map(|(&ch, &idx)| (ch, idx)).collect();
                children.sort_unstable_by_key(|&(ch, _)| ch);
                NodeArtifact {
                    children,
                    terminal: node.terminal,
                    sources: node.sources.bits(),
                    base_score: node.base_score,
                }
            })
            .collect();
        TrieArtifact {
            nodes,
            size: self.size as u64,
        }
    }

    fn from_artifact(artifact: TrieArtifact) -> Self {
        let nodes = artifact
            .nodes
            .into_iter()
            .map(|node| Node {
                children: node.children.into_iter().collect(),
                terminal: node.terminal,
                sources: SourceSet::from_bits(node.sources),
                base_score: node.base_score,
            })
            .collect();
        Self {
            nodes,
            size: artifact.size as usize,
        }
    }
}

/// Stable on-disk image: node stream in arena order, child lists sorted by
/// syllable, sources packed as a bitset.
#[derive(Serialize, Deserialize)]
struct TrieArtifact {
    nodes: Vec<NodeArtifact>,
    size: u64,
}

#[derive(Serialize, Deserialize)]
struct NodeArtifact {
    children: Vec<(char, u32)>,
    terminal: bool,
    sources: u8,
    base_score: f32,
}

/// `(-score, word)` ranking; `Greater` means a better entry.
struct Ranked(WordInfo);

impl Ranked {
    fn cmp_rank(&self, other: &Ranked) -> Ordering {
        self.0
            .score
            .total_cmp(&other.0.score)
            .then_with(|| other.0.word.cmp(&self.0.word))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_rank(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp_rank(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_rank(other)
    }
}

/// Unlimited gather, or a bounded min-heap holding the best `k` seen.
struct Collector {
    limit: Option<usize>,
    all: Vec<WordInfo>,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl Collector {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            all: Vec::new(),
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, info: WordInfo) {
        let Some(k) = self.limit else {
            self.all.push(info);
            return;
        };
        let entry = Ranked(info);
        if self.heap.len() < k {
            self.heap.push(Reverse(entry));
        } else if self
            .heap
            .peek()
            .is_some_and(|Reverse(worst)| entry > *worst)
        {
            self.heap.pop();
            self.heap.push(Reverse(entry));
        }
    }

    fn into_sorted(self) -> Vec<WordInfo> {
        let mut items: Vec<WordInfo> = if self.limit.is_some() {
            self.heap
                .into_iter()
                .map(|Reverse(Ranked(info))| info)
                .collect()
        } else {
            self.all
        };
        items.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
        items
    }
}
