//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, checks their
//! structure, and reports softer issues as warnings.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::AssessmentError;
use crate::model::{Axis, Dimension, Instrument, InterestCategory, Question, QuestionBank, TraitFactor};
use crate::paging::PageSequence;
use crate::recommend::{
    RecommendationTables, Threshold, TraitRule, DEFAULT_INTEREST_FALLBACK,
    DEFAULT_TRAITS_FALLBACK, DEFAULT_TYPE_FALLBACK,
};
use crate::scoring::ScoringPlan;

/// Smallest and largest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 5;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    scoring: Option<ScoringPlan>,
    #[serde(default)]
    recommendations: Option<TomlRecommendations>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    declared_total: Option<usize>,
    #[serde(default = "default_first_page_start")]
    first_page_start: usize,
}

fn default_first_page_start() -> usize {
    12
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    instrument: String,
    #[serde(default)]
    dimension: Option<String>,
    prompt: String,
    options: Vec<String>,
    weights: Vec<u32>,
    #[serde(default)]
    track: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlRecommendations {
    #[serde(default = "default_type_fallback")]
    type_fallback: String,
    #[serde(default = "default_interest_fallback")]
    interest_fallback: String,
    #[serde(default = "default_traits_fallback")]
    traits_fallback: String,
    #[serde(default)]
    types: BTreeMap<String, String>,
    #[serde(default)]
    interest: BTreeMap<String, String>,
    #[serde(default)]
    traits: Vec<TomlTraitRule>,
}

#[derive(Debug, Deserialize)]
struct TomlTraitRule {
    factor: String,
    #[serde(default)]
    above: Option<u32>,
    #[serde(default)]
    below: Option<u32>,
    text: String,
}

fn default_type_fallback() -> String {
    DEFAULT_TYPE_FALLBACK.to_string()
}

fn default_interest_fallback() -> String {
    DEFAULT_INTEREST_FALLBACK.to_string()
}

fn default_traits_fallback() -> String {
    DEFAULT_TRAITS_FALLBACK.to_string()
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let instrument: Instrument = q
                .instrument
                .parse()
                .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
            let dimension = q
                .dimension
                .map(|tag| {
                    Dimension::parse_for(instrument, &tag)
                        .map_err(|e| anyhow::anyhow!("question {}: {}", q.id, e))
                })
                .transpose()?;

            Ok(Question {
                id: q.id,
                instrument,
                dimension,
                prompt: q.prompt,
                options: q.options,
                weights: q.weights,
                track: q.track,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let recommendations = match parsed.recommendations {
        Some(rec) => {
            let traits = rec
                .traits
                .into_iter()
                .map(|r| {
                    let factor: TraitFactor = r
                        .factor
                        .parse()
                        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
                    let threshold = match (r.above, r.below) {
                        (Some(limit), None) => Threshold::Above(limit),
                        (None, Some(limit)) => Threshold::Below(limit),
                        _ => anyhow::bail!(
                            "trait rule for {factor} needs exactly one of `above` or `below`"
                        ),
                    };
                    Ok(TraitRule {
                        factor,
                        threshold,
                        text: r.text,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            RecommendationTables {
                types: rec.types,
                interest: rec.interest,
                traits,
                type_fallback: rec.type_fallback,
                interest_fallback: rec.interest_fallback,
                traits_fallback: rec.traits_fallback,
            }
        }
        None => RecommendationTables::default(),
    };

    let declared_total = parsed
        .bank
        .declared_total
        .unwrap_or(questions.len());

    let bank = QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        questions,
        declared_total,
        first_page_start: parsed.bank.first_page_start,
        scoring: parsed.scoring.unwrap_or_default(),
        recommendations,
    };

    check_bank(&bank).with_context(|| format!("in {}", source_path.display()))?;
    Ok(bank)
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Structural checks. A bank that fails these cannot be paged or scored.
pub fn check_bank(bank: &QuestionBank) -> Result<(), AssessmentError> {
    for (position, q) in bank.questions.iter().enumerate() {
        if q.options.len() != q.weights.len() {
            return Err(AssessmentError::InvalidBank(format!(
                "question {} (position {position}) has {} options but {} weights",
                q.id,
                q.options.len(),
                q.weights.len()
            )));
        }
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&q.options.len()) {
            return Err(AssessmentError::InvalidBank(format!(
                "question {} (position {position}) has {} options, expected {MIN_OPTIONS} to {MAX_OPTIONS}",
                q.id,
                q.options.len()
            )));
        }
    }

    PageSequence::for_bank(bank)?;

    let plan = &bank.scoring;
    let expected = Axis::ALL
        .iter()
        .zip(plan.axes.iter())
        .map(|(a, p)| (Dimension::Axis(*a), *p))
        .chain(
            InterestCategory::ALL
                .iter()
                .zip(plan.interest.iter())
                .map(|(c, p)| (Dimension::Interest(*c), *p)),
        )
        .chain(
            TraitFactor::ALL
                .iter()
                .zip(plan.traits.iter())
                .map(|(f, p)| (Dimension::Trait(*f), *p)),
        );

    let mut scored = HashSet::new();
    for (dimension, position) in expected {
        let q = bank.question(position).ok_or_else(|| {
            AssessmentError::InvalidBank(format!(
                "scoring plan reads position {position} but the bank has {} questions",
                bank.len()
            ))
        })?;
        if !scored.insert(position) {
            return Err(AssessmentError::InvalidBank(format!(
                "scoring plan reads position {position} more than once"
            )));
        }
        if q.instrument != dimension.instrument() {
            return Err(AssessmentError::InvalidBank(format!(
                "scoring plan expects a {} question for {dimension} at position {position}, found {} question {}",
                dimension.instrument(),
                q.instrument,
                q.id
            )));
        }
        if q.dimension != Some(dimension) {
            return Err(AssessmentError::InvalidBank(format!(
                "question {} at position {position} is scored as {dimension} but is tagged {}",
                q.id,
                q.dimension
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "nothing".into())
            )));
        }
    }

    Ok(())
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for issues that do not stop it from being used.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &bank.questions {
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt is empty".into(),
            });
        }
        if q.track.is_some() && q.instrument != Instrument::Interest {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("track tag on a {} question is ignored", q.instrument),
            });
        }
    }

    for position in bank.scoring.axes {
        if let Some(q) = bank.question(position) {
            if q.option_count() != 2 {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    message: format!(
                        "type-axis question has {} options; every option after the first counts for the second letter",
                        q.option_count()
                    ),
                });
            }
        }
    }

    if bank.declared_total < bank.len() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!(
                "declared_total {} is smaller than the {} questions defined",
                bank.declared_total,
                bank.len()
            ),
        });
    }

    let rec = &bank.recommendations;
    let missing_types = 16usize.saturating_sub(rec.types.len());
    if missing_types > 0 {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!("{missing_types} type code(s) have no recommendation and will use the fallback"),
        });
    }
    for code in rec.types.keys() {
        if !is_type_code(code) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("recommendation key {code} is not a four-letter type code"),
            });
        }
    }
    for category in InterestCategory::ALL {
        if !rec.interest.contains_key(category.name()) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("interest category {category} has no recommendation"),
            });
        }
    }

    warnings
}

fn is_type_code(code: &str) -> bool {
    let letters: Vec<char> = code.chars().collect();
    letters.len() == 4
        && Axis::ALL.iter().zip(letters.iter()).all(|(axis, c)| {
            let (a, b) = axis.letters();
            *c == a || *c == b
        })
}
