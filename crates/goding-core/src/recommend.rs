//! Recommendation lookup tables.
//!
//! The tables are plain data loaded with the question bank. Lookups never
//! mutate anything and fall back to a fixed message when nothing matches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{InterestCategory, TraitFactor};
use crate::scoring::TraitScores;

pub const DEFAULT_TYPE_FALLBACK: &str = "당신의 심리유형에 맞는 진로를 탐색해보세요.";
pub const DEFAULT_INTEREST_FALLBACK: &str = "당신의 진로유형에 맞는 직업을 탐색해보세요.";
pub const DEFAULT_TRAITS_FALLBACK: &str =
    "균형잡힌 성격 특성을 가지고 있어 다양한 분야에서 성공할 수 있습니다.";

/// When a trait rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// Fires when the factor score is strictly greater.
    Above(u32),
    /// Fires when the factor score is strictly less.
    Below(u32),
}

impl Threshold {
    pub fn matches(self, score: u32) -> bool {
        match self {
            Threshold::Above(limit) => score > limit,
            Threshold::Below(limit) => score < limit,
        }
    }
}

/// Appends `text` to the trait recommendation when `factor` crosses `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitRule {
    pub factor: TraitFactor,
    pub threshold: Threshold,
    pub text: String,
}

/// The three recommendation tables plus their fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationTables {
    /// Four-letter type code to text.
    pub types: BTreeMap<String, String>,
    /// Interest category name to text.
    pub interest: BTreeMap<String, String>,
    /// Trait rules, evaluated in order.
    pub traits: Vec<TraitRule>,
    pub type_fallback: String,
    pub interest_fallback: String,
    pub traits_fallback: String,
}

impl Default for RecommendationTables {
    fn default() -> Self {
        Self {
            types: BTreeMap::new(),
            interest: BTreeMap::new(),
            traits: Vec::new(),
            type_fallback: DEFAULT_TYPE_FALLBACK.to_string(),
            interest_fallback: DEFAULT_INTEREST_FALLBACK.to_string(),
            traits_fallback: DEFAULT_TRAITS_FALLBACK.to_string(),
        }
    }
}

impl RecommendationTables {
    /// Text for a four-letter type code.
    pub fn for_type(&self, code: &str) -> &str {
        match self.types.get(code) {
            Some(text) => text,
            None => {
                tracing::warn!("no recommendation for type code {code}, using fallback");
                &self.type_fallback
            }
        }
    }

    /// Text for the winning interest category.
    pub fn for_interest(&self, category: InterestCategory) -> &str {
        match self.interest.get(category.name()) {
            Some(text) => text,
            None => {
                tracing::warn!("no recommendation for interest category {category}, using fallback");
                &self.interest_fallback
            }
        }
    }

    /// Assemble the trait recommendation: every firing rule's text in rule
    /// order, or the balanced-personality fallback when none fires.
    pub fn for_traits(&self, scores: &TraitScores) -> String {
        let fragments: Vec<&str> = self
            .traits
            .iter()
            .filter(|rule| rule.threshold.matches(scores.get(rule.factor)))
            .map(|rule| rule.text.as_str())
            .collect();

        if fragments.is_empty() {
            self.traits_fallback.clone()
        } else {
            fragments.join(" ")
        }
    }
}
