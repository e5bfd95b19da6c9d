//! # Rules Subcommand
//!
//! Lists the rule catalogue of a registry. Negated forms (`!name`) exist
//! for every entry and are not listed separately.

use clap::Args;
use tagval_rules::Registry;

use crate::check::OutputFormat;

/// Arguments for the rules subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list rules whose name contains this text.
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Render the catalogue of `registry`.
pub fn run(args: &RulesArgs, registry: &Registry) -> anyhow::Result<String> {
    let catalog: Vec<_> = registry
        .catalog()
        .into_iter()
        .filter(|rule| {
            args.filter
                .as_deref()
                .map_or(true, |filter| rule.name.contains(filter))
        })
        .collect();

    match args.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Text => {
            let width = catalog.iter().map(|rule| rule.name.len()).max().unwrap_or(0);
            let lines: Vec<String> = catalog
                .iter()
                .map(|rule| format!("{:width$}  {}", rule.name, rule.message))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}
