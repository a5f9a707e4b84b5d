//! goding CLI — take and score the highschool test from a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "goding", version, about = "고딩테스트 assessment engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate question bank TOML files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show the page order of a question bank
    Pages {
        /// Question bank file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take the test interactively, one option number per line
    Take {
        /// Question bank file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Directory to save the JSON report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Result format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a saved list of answers in canonical order
    Score {
        /// JSON array or TOML `answers = [...]` of 0-based option indices
        #[arg(long)]
        answers: PathBuf,

        /// Question bank file (default: built-in bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Result format: text, json, markdown
        #[arg(long)]
        format: Option<String>,

        /// Directory to save the JSON report in
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and a copy of the built-in question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("goding=info,goding_core=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Pages { bank, config } => commands::pages::execute(bank, config),
        Commands::Take {
            bank,
            output,
            format,
            config,
        } => commands::take::execute(bank, output, format, config),
        Commands::Score {
            answers,
            bank,
            format,
            output,
            config,
        } => commands::score::execute(answers, bank, format, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
