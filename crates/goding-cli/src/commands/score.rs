//! The `goding score` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use goding_core::report::AssessmentReport;
use goding_core::session::AssessmentSession;

use crate::config::load_config_from;

#[derive(Debug, Deserialize)]
struct TomlAnswers {
    answers: Vec<usize>,
}

/// Read canonical-order option indices from a JSON array or a TOML file.
fn load_answers(path: &Path) -> Result<Vec<usize>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
    } else {
        let parsed: TomlAnswers = toml::from_str(&content)
            .with_context(|| format!("failed to parse answers TOML: {}", path.display()))?;
        Ok(parsed.answers)
    }
}

pub fn execute(
    answers_path: PathBuf,
    bank: Option<PathBuf>,
    format: Option<String>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = Arc::new(super::load_bank(bank, &config)?);
    let answers = load_answers(&answers_path)?;

    anyhow::ensure!(
        answers.len() == bank.len(),
        "expected {} answers for bank {}, got {}",
        bank.len(),
        bank.id,
        answers.len()
    );

    let mut session = AssessmentSession::new(Arc::clone(&bank))?;
    session
        .replay(&answers)
        .with_context(|| format!("failed to replay {}", answers_path.display()))?;

    let report = AssessmentReport::from_session(&session)?;
    super::emit(&report, format, output, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_from_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("a.json");
        std::fs::write(&json, "[0, 1, 4]").unwrap();
        assert_eq!(load_answers(&json).unwrap(), vec![0, 1, 4]);

        let toml = dir.path().join("a.toml");
        std::fs::write(&toml, "answers = [1, 0]").unwrap();
        assert_eq!(load_answers(&toml).unwrap(), vec![1, 0]);
    }

    #[test]
    fn negative_indices_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("a.json");
        std::fs::write(&json, "[0, -1]").unwrap();
        assert!(load_answers(&json).is_err());
    }
}
