//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level goding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodingConfig {
    /// Question bank file. `None` uses the built-in bank.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Where reports are saved when `--output` is not given.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Result format: text, json, markdown.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for GodingConfig {
    fn default() -> Self {
        Self {
            bank: None,
            output_dir: None,
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `goding.toml` in the current directory
/// 2. `~/.config/goding/config.toml`
///
/// `GODING_BANK` overrides the bank path.
pub fn load_config_from(path: Option<&Path>) -> Result<GodingConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("goding.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<GodingConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => GodingConfig::default(),
    };

    if let Ok(bank) = std::env::var("GODING_BANK") {
        if !bank.is_empty() {
            config.bank = Some(PathBuf::from(bank));
        }
    }

    config.bank = config.bank.as_deref().map(resolve_path);
    config.output_dir = config.output_dir.as_deref().map(resolve_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("goding"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_GODING_TEST_VAR", "banks");
        assert_eq!(resolve_env_vars("${_GODING_TEST_VAR}"), "banks");
        assert_eq!(
            resolve_env_vars("./${_GODING_TEST_VAR}/main.toml"),
            "./banks/main.toml"
        );
        std::env::remove_var("_GODING_TEST_VAR");
    }

    #[test]
    fn unterminated_reference_left_alone() {
        assert_eq!(resolve_env_vars("${OOPS"), "${OOPS");
    }

    #[test]
    fn default_config() {
        let config = GodingConfig::default();
        assert!(config.bank.is_none());
        assert_eq!(config.default_format, "text");
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
bank = "question-banks/goding-test.toml"
output_dir = "./goding-results"
default_format = "markdown"
"#;
        let config: GodingConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.bank,
            Some(PathBuf::from("question-banks/goding-test.toml"))
        );
        assert_eq!(config.default_format, "markdown");
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
