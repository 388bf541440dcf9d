//! CLI tool for inspecting large log files.
//!
//! Loads a log into a line record chain and reads it back through a paged
//! virtual sequence, the same path a scrolling list view takes.

mod cli;
mod parser;
mod reader;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logview_core::config::{CacheConfig, LineFormat};
use logview_core::source::ChainSource;
use logview_core::PagedSequence;

use cli::{Cli, Commands, LoadArgs};
use reader::{load_log, LoadedLog};

fn load(args: &LoadArgs) -> anyhow::Result<(LineFormat, LoadedLog, CacheConfig)> {
    let format = match &args.format {
        Some(path) => LineFormat::from_json_file(path)?,
        None => LineFormat::default(),
    };
    let loaded = load_log(&args.file, &format)?;
    let config = CacheConfig {
        page_size: args.page_size,
        max_cache_size: args.cache_pages,
    };
    Ok((format, loaded, config))
}

fn show(load_args: &LoadArgs, from: usize, count: usize) -> anyhow::Result<()> {
    let (format, loaded, config) = load(load_args)?;
    let sequence = PagedSequence::with_config(ChainSource::new(loaded.chain), config)?;

    let end = from.saturating_add(count).min(sequence.count());
    if from >= end {
        tracing::warn!(from, lines = sequence.count(), "nothing to show");
        return Ok(());
    }

    println!("#\t{}", format.fields.join("\t"));
    for entry in sequence.get_range(from, end - from)? {
        println!("{}\t{}", entry.line, entry.fields.join("\t"));
    }
    tracing::debug!(stats = ?sequence.stats(), "cache");
    Ok(())
}

fn stats(load_args: &LoadArgs) -> anyhow::Result<()> {
    let (format, loaded, config) = load(load_args)?;
    let cells = loaded.chain.cells_len();
    let size_bytes = loaded.chain.size_bytes();
    let sequence = PagedSequence::with_config(ChainSource::new(loaded.chain), config)?;

    let mut longest = 0;
    for entry in &sequence {
        longest = longest.max(entry?.length);
    }
    let cache = sequence.stats();

    println!("format:          {} ({} fields)", format.name, format.component_count());
    println!("file bytes:      {}", loaded.bytes);
    println!("lines:           {}", sequence.count());
    println!("rejected lines:  {}", loaded.summary.rejected);
    println!("longest line:    {}", longest);
    println!("chain cells:     {}", cells);
    println!("chain bytes:     {}", size_bytes);
    println!(
        "cache:           {} misses, {} hits, {} evictions, {} resident pages",
        cache.misses,
        cache.hits,
        cache.evictions,
        sequence.resident_pages().len()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Show { load, from, count } => show(load, *from, *count),
        Commands::Stats { load } => stats(load),
    }
}
