//! # tagval CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tagval_rules::Registry;

/// Tag-driven structure validation toolkit.
///
/// Lists the available validation rules and checks values against rule tags.
#[derive(Parser, Debug)]
#[command(name = "tagval", version, about)]
struct Cli {
    /// YAML file with `tag_key`, `name_key` and `max_depth`. Defaults to
    /// the TAGVAL_* environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List registered validation rules.
    Rules(tagval_cli::rules::RulesArgs),
    /// Check values against a rule tag.
    Check(tagval_cli::check::CheckArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = tagval_cli::config::load(cli.config.as_deref())?;
    let registry = Registry::global();

    match cli.command {
        Commands::Rules(args) => {
            println!("{}", tagval_cli::rules::run(&args, registry)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check(args) => {
            let report = tagval_cli::check::run(&args, &config, registry)?;
            println!("{}", report.render(args.format)?);
            if report.all_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
