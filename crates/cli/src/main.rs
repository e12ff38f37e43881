// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! logship - binlog archival agent CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use logship_adapters::{BinlogHeaderReader, FsRemote, IndexFileSource};
use logship_core::{Config, SegmentName};
use logship_engine::{ArchiveOptions, Archiver};
use logship_storage::CacheStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "logship",
    version,
    about = "Archives a database's binary-log stream to remote storage"
)]
struct Cli {
    /// Agent configuration file
    #[arg(long, global = true, default_value = "/etc/logship.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Archive locally available binlog segments
    Push(PushArgs),
}

#[derive(Args)]
struct PushArgs {
    /// Archive only segments strictly below this one (defaults to the
    /// currently active segment)
    #[arg(long)]
    until: Option<String>,

    /// Disable the GTID coverage check and rely on name filters alone
    #[arg(long)]
    no_gtid_check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Push(args) => push(config, args).await,
    }
}

async fn push(config: Config, args: PushArgs) -> Result<()> {
    let source = IndexFileSource::new(&config.index_file, config.resolved_flavor());
    let coverage = BinlogHeaderReader::new();
    let remote = FsRemote::new(&config.remote_root);
    let cache_store = match &config.cache_path {
        Some(path) => CacheStore::at(path),
        None => CacheStore::default_location().context("resolving cache location")?,
    };

    let archiver = Archiver::new(source, coverage, remote, cache_store);
    let report = archiver
        .run(ArchiveOptions {
            until: args.until.map(SegmentName::from),
            check_gtids: !args.no_gtid_check,
            checkpoint_every: config.checkpoint_every,
        })
        .await?;

    println!(
        "archived {} segment(s), skipped {}, boundary {}",
        report.uploaded, report.skipped, report.until
    );
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
