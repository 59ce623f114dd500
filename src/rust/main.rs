use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lexclass::{ArtifactStore, ClassificationOrchestrator, Lexicon, RuntimeConfig, StopwordVariant};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Artifacts directory (defaults to $LEXCLASS_ARTIFACTS or the platform data dir)
    #[arg(short, long)]
    artifacts: Option<PathBuf>,

    /// Read the text to classify from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Built-in stopword table, used when the artifacts carry no lexicon.json
    #[arg(long, default_value = "core")]
    stopwords: StopwordVariant,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Text to classify; read from stdin when omitted
    text: Option<String>,
}

fn read_input(args: &Args) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(path) = &args.file {
        return fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path));
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

fn build_orchestrator(args: &Args) -> Result<ClassificationOrchestrator> {
    let store = match &args.artifacts {
        Some(path) => ArtifactStore::new(path),
        None => ArtifactStore::new_default(),
    }
    .context("Failed to open artifacts directory")?;

    let mut builder = ClassificationOrchestrator::builder();
    if store.lexicon_path().is_none() {
        builder = builder.with_lexicon(Lexicon::builtin(args.stopwords));
    }

    let orchestrator = builder
        .from_store(&store, &RuntimeConfig::from_env())?
        .build()?;
    Ok(orchestrator)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start_time = Instant::now();
    let orchestrator = build_orchestrator(&args)?;
    let info_snapshot = orchestrator.info();
    info!(
        "Orchestrator ready in {:.2?} (n1: {} terms/{} classes, n2: {} terms/{} classes, lexicon {})",
        start_time.elapsed(),
        info_snapshot.n1_vocabulary_size,
        info_snapshot.n1_num_classes,
        info_snapshot.n2_vocabulary_size,
        info_snapshot.n2_num_classes,
        info_snapshot.lexicon_version
    );

    let text = read_input(&args)?;
    let classify_start = Instant::now();
    let outcome = orchestrator.predict(&text).context("Classification failed")?;
    info!("Classified in {:.2?}", classify_start.elapsed());

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", json);

    Ok(())
}
