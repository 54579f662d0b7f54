// ============================================================
// CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to
// its use case. Printing happens here and only here.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CorpusArgs, ShowArgs, StatsArgs};

use dialog_loader::application::{
    corpus_config::CorpusConfig,
    show_use_case::ShowUseCase,
    stats_use_case::{StatsRequest, StatsUseCase},
};
use dialog_loader::infra::config_store::ConfigStore;

#[derive(Parser, Debug)]
#[command(
    name = "dialog-loader",
    version,
    about = "Batch, pad and inspect multi-turn dialog corpora."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Stats(args)      => run_stats(args),
            Commands::Show(args)       => run_show(args),
            Commands::InitConfig(args) => run_init_config(args),
        }
    }
}

/// Saved config (or defaults) with command-line overrides on top.
fn resolve_config(args: &CorpusArgs) -> Result<CorpusConfig> {
    let store = ConfigStore::new(&args.config_dir);
    let base = if store.exists() {
        store.load()?
    } else {
        tracing::debug!("No config at '{}', using defaults", store.path().display());
        CorpusConfig::default()
    };
    Ok(args.apply(base))
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let config = resolve_config(&args.corpus)?;
    let req = StatsRequest {
        split:               args.split,
        batch_size:          args.batch_size,
        shuffle:             !args.no_shuffle,
        ignore_left_samples: args.ignore_left_samples,
        log_dir:             args.log_dir,
    };

    let stats = StatsUseCase::new(config).execute(&req)?;
    println!(
        "{} | batch_size={} | batches={} (short: {}) | samples={} | dropped={} | padding={:.1}%",
        stats.split,
        stats.batch_size,
        stats.batches,
        stats.short_batches,
        stats.samples,
        stats.dropped,
        stats.padding_ratio * 100.0,
    );
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let config   = resolve_config(&args.corpus)?;
    let sessions = ShowUseCase::new(config).execute(args.split, &args.indices, args.trim)?;

    for session in sessions {
        println!("#{} ({} turns)", session.index, session.turns.len());
        for (t, turn) in session.turns.iter().enumerate() {
            println!("  [{t}] {turn}");
        }
    }
    Ok(())
}

fn run_init_config(args: CorpusArgs) -> Result<()> {
    let store  = ConfigStore::new(&args.config_dir);
    let config = args.apply(CorpusConfig::default());
    store.save(&config)?;
    println!("Wrote {}", store.path().display());
    Ok(())
}
