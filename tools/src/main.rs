use anyhow::Result;
use clap::Parser;
use dumunja_core::builder::{build_lexicon, build_trie, save_jsonl_gz, LexiconReport};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Merge the dictionary dumps into the lexicon artifacts.
#[derive(Parser)]
struct Args {
    /// Path to 표준국어대사전 JSON exports.
    #[arg(long)]
    stdict_dir: Option<PathBuf>,

    /// Path to 우리말샘 JSON exports.
    #[arg(long)]
    urimal_dir: Option<PathBuf>,

    /// Path to 한국어기초사전 JSON exports.
    #[arg(long)]
    basic_dir: Option<PathBuf>,

    /// Destination for the merged lexicon dump.
    #[arg(long, default_value = "artifacts/lexicon.jsonl.gz")]
    jsonl_out: PathBuf,

    /// Destination for the trie artifact.
    #[arg(long, default_value = "artifacts/trie.bin")]
    trie_out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let records = build_lexicon(
        args.stdict_dir.as_deref(),
        args.urimal_dir.as_deref(),
        args.basic_dir.as_deref(),
    );

    save_jsonl_gz(&records, &args.jsonl_out)?;
    let trie = build_trie(&records);
    trie.save(&args.trie_out)?;

    let report = LexiconReport::from_records(&records);
    info!(
        total = report.total_words,
        lengths = ?report.length_histogram.iter().take(10).collect::<Vec<_>>(),
        coverage = ?report.source_coverage,
        "lexicon report"
    );
    for probe in ["결근", "신상", "상피", "신경", "근육", "결합"] {
        info!(probe, present = trie.contains(probe), "probe word");
    }

    println!(
        "Wrote {} and {}",
        args.jsonl_out.display(),
        args.trie_out.display()
    );
    Ok(())
}
