pub mod init;
pub mod pages;
pub mod score;
pub mod take;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use goding_core::model::QuestionBank;
use goding_core::report::AssessmentReport;

use crate::config::GodingConfig;

/// `--bank` wins over the config file; neither means the built-in bank.
pub fn load_bank(bank: Option<PathBuf>, config: &GodingConfig) -> Result<QuestionBank> {
    match bank.or_else(|| config.bank.clone()) {
        Some(path) => goding_core::parser::parse_bank(&path),
        None => goding_core::bank::load_builtin(),
    }
}

/// Render a report in the requested format.
pub fn render(report: &AssessmentReport, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(report)?),
        "markdown" | "md" => Ok(report.to_markdown()),
        "text" => Ok(report.to_text()),
        other => anyhow::bail!("unknown format: {other} (expected text, json, or markdown)"),
    }
}

/// Save the report as `report-<id>.json` under `dir`.
pub fn save_report(report: &AssessmentReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("report-{}.json", report.id));
    report.save_json(&path)?;
    Ok(path)
}

/// Print the report and save it if an output directory is configured.
pub fn emit(
    report: &AssessmentReport,
    format: Option<String>,
    output: Option<PathBuf>,
    config: &GodingConfig,
) -> Result<()> {
    let format = format.unwrap_or_else(|| config.default_format.clone());
    println!("{}", render(report, &format)?);

    if let Some(dir) = output.or_else(|| config.output_dir.clone()) {
        let path = save_report(report, &dir)?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}
