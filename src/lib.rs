//! Shyft library root.
//! Exposes the CLI parser, the high-level run() function and the shift
//! store, stopwatch and autologger used by it.

pub mod archive;
pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use context::AppContext;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(ctx),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, ctx),
        Commands::Edit { .. } => cli::commands::edit::handle(&cli.command, ctx),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, ctx),
        Commands::List => cli::commands::list::handle(ctx),
        Commands::Totals => cli::commands::totals::handle(ctx),
        Commands::Timer => cli::commands::timer::handle(ctx),
        Commands::Auto { .. } => cli::commands::auto::handle(&cli.command, ctx),
        Commands::Logs { .. } => cli::commands::logs::handle(&cli.command, ctx),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, ctx),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, ctx),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ apply the data file override from the command line
    if let Some(custom) = &cli.data {
        cfg = cfg.with_data_file(custom);
    }

    // 4️⃣ logging; a failure here must not stop the command
    if let Err(e) = utils::logging::enable_logging(&Config::diagnostics_dir(), &cfg.log_level) {
        ui::messages::warning(format!("Diagnostics log disabled: {e}"));
    }

    // 5️⃣ hand everything to the dispatcher
    let ctx = AppContext::new(cfg, cli.test);
    tracing::debug!(command = ?std::env::args().nth(1), data = %ctx.config.data_file, "dispatching");
    dispatch(&cli, &ctx)
}
