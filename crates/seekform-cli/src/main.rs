//! seekform-cli - build search queries clause by clause.
//!
//! ```text
//! seekform-cli compile --include subject:release --include from:alice --exclude from:bot --combinator or
//! seekform-cli session
//! seekform-cli fields
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default
//! `seekform=warn,seekform_cli=warn`). Set `LOG_FORMAT=json` for JSON log lines.

mod commands;
mod config;
mod error;
mod output;
mod session;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use seekform::Combinator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::ClauseArg;
use crate::config::Config;
use crate::output::OutputMode;
use crate::session::{RealTerminal, Session};

#[derive(Parser)]
#[command(name = "seekform-cli")]
#[command(version)]
#[command(about = "Build search queries from include and exclude clauses")]
struct Cli {
    /// Config file (YAML). Falls back to $SEEKFORM_CONFIG.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Text, global = true)]
    output: OutputMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile clauses given as arguments and print the query
    Compile {
        /// Include clause as FIELD:KEYWORD (repeatable)
        #[arg(short, long = "include", value_name = "FIELD:KEYWORD")]
        include: Vec<ClauseArg>,

        /// Exclude clause as FIELD:KEYWORD (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "FIELD:KEYWORD")]
        exclude: Vec<ClauseArg>,

        /// How include clauses combine: and, or
        #[arg(short, long)]
        combinator: Option<Combinator>,
    },
    /// Edit a form line by line, printing the query after each change
    Session,
    /// List the searchable fields
    Fields,
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "seekform=warn,seekform_cli=warn".into());
    let registry = tracing_subscriber::registry().with(env_filter);

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    if log_format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Compile {
            include,
            exclude,
            combinator,
        } => {
            let output = commands::compile(&config, &include, &exclude, combinator, cli.output)?;
            println!("{}", output);
        }
        Commands::Session => {
            let mut session = Session::new(config, cli.output);
            session.run(&RealTerminal)?;
        }
        Commands::Fields => {
            println!("{}", commands::fields(&config));
        }
    }

    Ok(())
}
