use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use orderdesk_observability::LogFormat;
use orderdesk_sales::PageMode;

mod commands;

#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(about = "Decide which sales order controls a user gets", long_about = None)]
struct Cli {
    /// Human-readable logs instead of JSON.
    #[arg(long, global = true, default_value_t = false)]
    pretty_logs: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one order snapshot and print the control plan as JSON
    Evaluate {
        /// Order snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Saved-search and lookup answers (JSON); empty answers when omitted
        #[arg(long)]
        lookups: Option<PathBuf>,

        /// Config overrides (JSON); production defaults when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ModeArg::View)]
        mode: ModeArg,

        /// Platform role id of the viewing user; replaces the snapshot's role
        #[arg(long)]
        role_id: Option<u32>,
    },

    /// Print the effective configuration as JSON
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    View,
    Edit,
    Create,
}

impl From<ModeArg> for PageMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::View => PageMode::View,
            ModeArg::Edit => PageMode::Edit,
            ModeArg::Create => PageMode::Create,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.pretty_logs {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    };
    orderdesk_observability::init(format);

    match cli.cmd {
        Commands::Evaluate {
            snapshot,
            lookups,
            config,
            mode,
            role_id,
        } => {
            let request = commands::EvaluateRequest {
                snapshot,
                lookups,
                config,
                mode: mode.into(),
                role_id,
            };
            let output = commands::evaluate(&request)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Config { config } => {
            let config = commands::load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
