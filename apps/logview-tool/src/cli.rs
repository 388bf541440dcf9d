use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that loads a log file.
#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Log file to open
    pub file: PathBuf,

    /// JSON line format description (defaults to one whole-line field)
    #[arg(short, long)]
    pub format: Option<PathBuf>,

    /// Items per cache page
    #[arg(long, default_value_t = logview_core::config::PAGE_SIZE)]
    pub page_size: usize,

    /// Maximum resident cache pages
    #[arg(long, default_value_t = logview_core::config::MAX_CACHE_SIZE)]
    pub cache_pages: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a range of parsed lines
    Show {
        #[command(flatten)]
        load: LoadArgs,

        /// First line to print (zero-based)
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Number of lines to print
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Scan the whole file and report chain and cache statistics
    Stats {
        #[command(flatten)]
        load: LoadArgs,
    },
}
