//! Seedr CLI - Command-line interface
//!
//! Provides command-line access to a Seedr account.

mod commands;

use clap::Parser;
use seedr_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "seedr")]
#[command(about = "Manage a Seedr cloud torrent account")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Session token printed by `seedr login` (falls back to SEEDR_TOKEN)
    #[arg(long, global = true, env = "SEEDR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; credentials may come from the shell
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level())?;

    commands::handle_command(cli.command, cli.token).await
}
