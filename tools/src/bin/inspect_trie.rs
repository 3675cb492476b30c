use anyhow::{Context, Result};
use clap::Parser;
use dumunja_core::Trie;
use std::path::PathBuf;

/// Probe a trie artifact: exact lookups and prefix listings.
#[derive(Parser)]
struct Args {
    /// Path to the trie artifact.
    #[arg(long, default_value = "artifacts/trie.bin")]
    trie: PathBuf,

    /// Word to look up.
    #[arg(long)]
    word: Option<String>,

    /// List words under this prefix, best first.
    #[arg(long)]
    prefix: Option<String>,

    /// Cap for the prefix listing.
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let trie = Trie::load(&args.trie)
        .with_context(|| format!("loading trie artifact {}", args.trie.display()))?;
    println!("{} words", trie.len());

    if let Some(word) = &args.word {
        match trie.lookup(word) {
            Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            None => println!("{word}: not a word (has_prefix: {})", trie.has_prefix(word)),
        }
    }

    if let Some(prefix) = &args.prefix {
        for info in trie.words_with_prefix(prefix, Some(args.limit)) {
            println!(
                "{}\t{}\t{}",
                info.word,
                info.score,
                serde_json::to_string(&info.sources)?
            );
        }
    }

    Ok(())
}
