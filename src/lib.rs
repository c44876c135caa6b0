//! emstrack library root.
//! Exposes the CLI parser, the high-level run() function and the core modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod notifier;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::RunContext;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::time::{now, parse_user_ts};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &RunContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, ctx),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, ctx),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, ctx),
        Commands::Checkin { .. }
        | Commands::Checkout { .. }
        | Commands::Break { .. }
        | Commands::Status { .. } => cli::commands::session::handle(&cli.command, ctx),
        Commands::Report { .. } | Commands::Stats { .. } => {
            cli::commands::report::handle(&cli.command, ctx)
        }
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, ctx),
        Commands::Alert { .. } => cli::commands::alert::handle(&cli.command, ctx),
    }
}

fn init_tracing() {
    // RUST_LOG=emstrack=debug for diagnostics
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let settings = cfg.settings()?;

    let now = match &cli.at {
        Some(at) => parse_user_ts(at)?,
        None => now(),
    };

    let ctx = RunContext {
        user_id: cli.user.or(cfg.user_id),
        cfg,
        settings,
        now,
    };

    tracing::debug!(database = %ctx.cfg.database, user_id = ?ctx.user_id, "dispatching");
    dispatch(&cli, &ctx)
}
