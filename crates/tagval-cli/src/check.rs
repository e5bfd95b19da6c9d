//! # Check Subcommand
//!
//! Validates each value given on the command line against one rule tag,
//! as if it were a single tagged field of a structure.

use clap::{Args, ValueEnum};
use serde::Serialize;
use tagval_core::{Field, Node, Structure, Traverse, ValidatorConfig};
use tagval_engine::{ValidateError, ValidationError, Validator};
use tagval_rules::Registry;

/// Output format shared by the subcommands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rule tag to apply, e.g. `required,length(3|5)`.
    #[arg(long)]
    pub tag: String,

    /// Field name used in messages.
    #[arg(long, default_value = "value")]
    pub field: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Values to check.
    #[arg(required = true)]
    pub values: Vec<String>,
}

/// A one-field structure whose annotations are chosen at runtime.
struct Probe<'c> {
    config: &'c ValidatorConfig,
    field: &'c str,
    tag: &'c str,
    value: String,
}

impl Structure for Probe<'_> {
    fn type_name(&self) -> &str {
        "check"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("value", &self.value)
            .tag(&self.config.name_key, self.field)
            .tag(&self.config.tag_key, self.tag)]
    }
}

impl Traverse for Probe<'_> {
    fn node(&self) -> Node<'_> {
        Node::Struct(self)
    }
}

/// Result for one checked value.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub value: String,
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Results for every value, in argument order.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CheckReport {
    outcomes: Vec<Outcome>,
}

impl CheckReport {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn all_valid(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.valid)
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let lines: Vec<String> = self
                    .outcomes
                    .iter()
                    .map(|outcome| {
                        if outcome.valid {
                            format!("ok    {:?}", outcome.value)
                        } else {
                            let messages: Vec<&str> =
                                outcome.errors.iter().map(ValidationError::message).collect();
                            format!("FAIL  {:?}: {}", outcome.value, messages.join("; "))
                        }
                    })
                    .collect();
                Ok(lines.join("\n"))
            }
        }
    }
}

/// Check every value in `args` against `args.tag`.
pub fn run(
    args: &CheckArgs,
    config: &ValidatorConfig,
    registry: &Registry,
) -> anyhow::Result<CheckReport> {
    let validator = Validator::with_registry(registry).with_config(config.clone());
    let mut outcomes = Vec::with_capacity(args.values.len());

    for value in &args.values {
        let probe = Probe {
            config,
            field: &args.field,
            tag: &args.tag,
            value: value.clone(),
        };
        let errors = match validator.validate(&probe) {
            Ok(()) => Vec::new(),
            Err(ValidateError::Invalid(errors)) => errors.into_inner(),
            Err(other) => return Err(other.into()),
        };
        outcomes.push(Outcome {
            value: value.clone(),
            valid: errors.is_empty(),
            errors,
        });
    }

    Ok(CheckReport { outcomes })
}
