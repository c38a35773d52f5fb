//! chatsort CLI entry point.

use chatsort::archive::Archive;
use chatsort::cli::args::{Cli, Commands};
use chatsort::cli::output::Output;
use chatsort::cli::{search, state, tags};
use chatsort::config::Config;
use chatsort::error::{ArchiveError, ExitCode as ArchiveExitCode};
use chatsort::session::EngineSession;
use chatsort::state::{FilterStateStore, JsonFileSettings};
use chatsort::store::Scope;
use chatsort::tags::TagRules;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::from(ArchiveExitCode::GeneralError.code() as u8);
        }
    };

    match runtime.block_on(run(&cli)) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatsort={}", cli.log_level())));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: &Cli) -> Result<ArchiveExitCode, ArchiveError> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let archive_path = config.resolve_archive_path(cli.archive.as_deref())?;
    let archive = Archive::new(archive_path, &config.archive)?;
    let output = Output::new(cli.output_format(), cli.quiet);
    let preview_chars = config.display.preview_chars;

    match &cli.command {
        Commands::Search(args) => {
            let session = open_session(archive, &config, &args.scope.to_scope())?;
            search::run(&session, args, preview_chars, &output).await?;
        }
        Commands::Draft(args) => {
            let store = filter_state_store(&config, &archive.root);
            search::draft(&store, args, &output)?;
        }
        Commands::Resume(args) => {
            let session = open_session(archive, &config, &args.scope.to_scope())?;
            search::resume(&session, args, preview_chars, &output).await?;
        }
        Commands::Tags(args) => {
            let session = open_session(archive, &config, &Scope::all())?;
            tags::run(&session, args, &output).await?;
        }
        Commands::State(args) => {
            let store = filter_state_store(&config, &archive.root);
            state::run(&store, &args.command, &output)?;
        }
    }

    Ok(ArchiveExitCode::Success)
}

fn filter_state_store(config: &Config, archive_root: &Path) -> FilterStateStore {
    let settings = JsonFileSettings::new(config.settings_path(archive_root));
    FilterStateStore::new(Box::new(settings))
}

fn open_session(archive: Archive, config: &Config, scope: &Scope) -> Result<EngineSession, ArchiveError> {
    let filter_state = filter_state_store(config, &archive.root);
    EngineSession::open(
        Arc::new(archive),
        scope,
        filter_state,
        TagRules::from(&config.tags),
    )
}
