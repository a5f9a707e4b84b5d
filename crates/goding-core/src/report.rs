//! Assessment report types with JSON persistence and text rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::model::ScoreResult;
use crate::session::AssessmentSession;

/// Screen the shell navigates to once results are shown.
pub const NEXT_SCREEN: &str = "subject-recommendation";

/// A completed assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the bank the test was taken on.
    pub bank: BankSummary,
    /// Chosen option per canonical position.
    pub answers: Vec<Option<usize>>,
    /// One result per instrument.
    pub results: Vec<ScoreResult>,
    /// Downstream screen for the shell.
    pub next_screen: String,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
    pub declared_total: usize,
}

impl AssessmentReport {
    /// Build a report from a completed session.
    pub fn from_session(session: &AssessmentSession) -> Result<Self, AssessmentError> {
        let results = match session.results() {
            Some(results) => results.to_vec(),
            None => {
                let position = session.answers().first_missing().unwrap_or(0);
                return Err(AssessmentError::MissingAnswer { position });
            }
        };
        let bank = session.bank();

        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: BankSummary {
                id: bank.id.clone(),
                name: bank.name.clone(),
                question_count: bank.len(),
                declared_total: bank.declared_total,
            },
            answers: session.answers().as_slice().to_vec(),
            results,
            next_screen: NEXT_SCREEN.to_string(),
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Plain-text rendering, one card per instrument.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("테스트 결과\n");
        for r in &self.results {
            out.push_str(&format!("\n[{}]\n", r.instrument_label));
            out.push_str(&format!("{}\n", r.description));
            if let Some(track) = &r.track {
                out.push_str(&format!("계열: {track}\n"));
            }
            out.push_str(&format!("추천사항: {}\n", r.recommendation));
        }
        out.push_str(&format!("\n다음 단계: {}\n", self.next_screen));
        out
    }

    /// Markdown rendering.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## 테스트 결과: {}\n\n", self.bank.name));
        md.push_str("| 검사 | 결과 | 추천사항 |\n");
        md.push_str("|------|------|----------|\n");
        for r in &self.results {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                r.instrument_label, r.computed_label, r.recommendation
            ));
        }
        md.push('\n');

        if let Some(track) = self.results.iter().find_map(|r| r.track.as_deref()) {
            md.push_str(&format!("**추천 계열:** {track}\n\n"));
        }

        md.push_str(&format!(
            "_Report {} · {}_\n",
            self.id,
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));
        md
    }
}
