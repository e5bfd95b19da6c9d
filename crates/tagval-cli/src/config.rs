//! Validator configuration for CLI runs: a YAML file when `--config` is
//! given, otherwise the `TAGVAL_*` environment variables.

use std::path::Path;

use anyhow::Context;
use tagval_core::ValidatorConfig;

/// Load configuration from `path`, or from the environment when absent.
pub fn load(path: Option<&Path>) -> anyhow::Result<ValidatorConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config file {}", path.display()))?;
            parse(&text).with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => ValidatorConfig::from_env().context("invalid TAGVAL_* environment")?,
    };
    tracing::debug!(
        tag_key = %config.tag_key,
        name_key = %config.name_key,
        max_depth = config.max_depth,
        "validator configuration loaded"
    );
    Ok(config)
}

/// Parse a YAML document; omitted keys take their defaults.
pub fn parse(text: &str) -> anyhow::Result<ValidatorConfig> {
    let config: ValidatorConfig = serde_yaml::from_str(text)?;
    if config.tag_key.trim().is_empty() || config.name_key.trim().is_empty() {
        anyhow::bail!("tag_key and name_key must not be empty");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_documents_keep_defaults() {
        let config = parse("tag_key: check\n").unwrap();
        assert_eq!(config.tag_key, "check");
        assert_eq!(config.name_key, ValidatorConfig::default().name_key);
        assert_eq!(config.max_depth, ValidatorConfig::default().max_depth);
    }

    #[test]
    fn empty_keys_are_rejected() {
        assert!(parse("name_key: ''\n").is_err());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(parse("max_depth: [1, 2]\n").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Some(Path::new("/nonexistent/tagval.yaml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tagval.yaml"));
    }
}
