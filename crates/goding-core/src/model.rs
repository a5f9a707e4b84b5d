//! Core data model types for goding.
//!
//! These are the fundamental types the assessment engine works with: the
//! questions of a bank, the three instruments they belong to, and the
//! per-instrument results a completed test produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::recommend::RecommendationTables;
use crate::scoring::ScoringPlan;

/// One of the three independent scoring models of the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    /// Four dichotomous axes producing a four-letter type code.
    TypeAxes,
    /// Six interest categories, the strongest one wins.
    Interest,
    /// Five trait factors feeding a sentence-assembly rule.
    Traits,
}

impl Instrument {
    pub const ALL: [Instrument; 3] = [
        Instrument::TypeAxes,
        Instrument::Interest,
        Instrument::Traits,
    ];

    /// Title shown above the instrument's result card.
    pub fn label(self) -> &'static str {
        match self {
            Instrument::TypeAxes => "Carl Jung 심리유형",
            Instrument::Interest => "RIASEC 진로유형",
            Instrument::Traits => "Big Five 성격특성",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instrument::TypeAxes => write!(f, "type_axes"),
            Instrument::Interest => write!(f, "interest"),
            Instrument::Traits => write!(f, "traits"),
        }
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type_axes" | "type-axes" | "carl-jung" => Ok(Instrument::TypeAxes),
            "interest" | "riasec" => Ok(Instrument::Interest),
            "traits" | "big-five" => Ok(Instrument::Traits),
            other => Err(format!("unknown instrument: {other}")),
        }
    }
}

/// A dichotomous axis of the type code, in code-letter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    /// The (first, second) letters of the axis. Option 0 votes for the first.
    pub fn letters(self) -> (char, char) {
        match self {
            Axis::EI => ('E', 'I'),
            Axis::SN => ('S', 'N'),
            Axis::TF => ('T', 'F'),
            Axis::JP => ('J', 'P'),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.letters();
        write!(f, "{a}{b}")
    }
}

impl FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EI" => Ok(Axis::EI),
            "SN" => Ok(Axis::SN),
            "TF" => Ok(Axis::TF),
            "JP" => Ok(Axis::JP),
            other => Err(format!("unknown axis: {other}")),
        }
    }
}

/// Interest categories, in the order used for scoring and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InterestCategory {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl InterestCategory {
    pub const ALL: [InterestCategory; 6] = [
        InterestCategory::Realistic,
        InterestCategory::Investigative,
        InterestCategory::Artistic,
        InterestCategory::Social,
        InterestCategory::Enterprising,
        InterestCategory::Conventional,
    ];

    /// Display name, also the key of the interest recommendation table.
    pub fn name(self) -> &'static str {
        match self {
            InterestCategory::Realistic => "Realistic",
            InterestCategory::Investigative => "Investigative",
            InterestCategory::Artistic => "Artistic",
            InterestCategory::Social => "Social",
            InterestCategory::Enterprising => "Enterprising",
            InterestCategory::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for InterestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterestCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "realistic" | "r" => Ok(InterestCategory::Realistic),
            "investigative" | "i" => Ok(InterestCategory::Investigative),
            "artistic" | "a" => Ok(InterestCategory::Artistic),
            "social" | "s" => Ok(InterestCategory::Social),
            "enterprising" | "e" => Ok(InterestCategory::Enterprising),
            "conventional" | "c" => Ok(InterestCategory::Conventional),
            other => Err(format!("unknown interest category: {other}")),
        }
    }
}

/// Five-factor traits, in the order the recommendation sentences are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitFactor {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl TraitFactor {
    pub const ALL: [TraitFactor; 5] = [
        TraitFactor::Openness,
        TraitFactor::Conscientiousness,
        TraitFactor::Extraversion,
        TraitFactor::Agreeableness,
        TraitFactor::Neuroticism,
    ];

    /// Neuroticism is stored reverse-scored.
    pub fn is_reverse_scored(self) -> bool {
        matches!(self, TraitFactor::Neuroticism)
    }

    pub fn korean_name(self) -> &'static str {
        match self {
            TraitFactor::Openness => "개방성",
            TraitFactor::Conscientiousness => "성실성",
            TraitFactor::Extraversion => "외향성",
            TraitFactor::Agreeableness => "친화성",
            TraitFactor::Neuroticism => "신경증",
        }
    }
}

impl fmt::Display for TraitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitFactor::Openness => write!(f, "openness"),
            TraitFactor::Conscientiousness => write!(f, "conscientiousness"),
            TraitFactor::Extraversion => write!(f, "extraversion"),
            TraitFactor::Agreeableness => write!(f, "agreeableness"),
            TraitFactor::Neuroticism => write!(f, "neuroticism"),
        }
    }
}

impl FromStr for TraitFactor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openness" | "o" => Ok(TraitFactor::Openness),
            "conscientiousness" | "c" => Ok(TraitFactor::Conscientiousness),
            "extraversion" | "e" => Ok(TraitFactor::Extraversion),
            "agreeableness" | "a" => Ok(TraitFactor::Agreeableness),
            "neuroticism" | "n" => Ok(TraitFactor::Neuroticism),
            other => Err(format!("unknown trait factor: {other}")),
        }
    }
}

/// What a single question measures within its instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dimension {
    Axis(Axis),
    Interest(InterestCategory),
    Trait(TraitFactor),
}

impl Dimension {
    /// The instrument this dimension belongs to.
    pub fn instrument(self) -> Instrument {
        match self {
            Dimension::Axis(_) => Instrument::TypeAxes,
            Dimension::Interest(_) => Instrument::Interest,
            Dimension::Trait(_) => Instrument::Traits,
        }
    }

    /// Parse a dimension tag in the context of a known instrument.
    ///
    /// Single-letter tags overlap between instruments ("c", "e", "a"), so the
    /// instrument decides which namespace the tag is read from.
    pub fn parse_for(instrument: Instrument, tag: &str) -> Result<Self, String> {
        match instrument {
            Instrument::TypeAxes => tag.parse().map(Dimension::Axis),
            Instrument::Interest => tag.parse().map(Dimension::Interest),
            Instrument::Traits => tag.parse().map(Dimension::Trait),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Axis(a) => write!(f, "{a}"),
            Dimension::Interest(c) => write!(f, "{}", c.name().to_lowercase()),
            Dimension::Trait(t) => write!(f, "{t}"),
        }
    }
}

impl From<Dimension> for String {
    fn from(d: Dimension) -> Self {
        d.to_string()
    }
}

impl TryFrom<String> for Dimension {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.len() == 2 {
            if let Ok(axis) = s.parse::<Axis>() {
                return Ok(Dimension::Axis(axis));
            }
        }
        s.parse::<InterestCategory>()
            .map(Dimension::Interest)
            .or_else(|_| s.parse::<TraitFactor>().map(Dimension::Trait))
            .map_err(|_| format!("unknown dimension: {s}"))
    }
}

/// A single question of the bank. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, stable across bank revisions.
    pub id: String,
    /// Which instrument the question belongs to.
    pub instrument: Instrument,
    /// What the question measures. Required on scored questions.
    #[serde(default)]
    pub dimension: Option<Dimension>,
    /// Display text.
    pub prompt: String,
    /// Choice labels, in display order.
    pub options: Vec<String>,
    /// One score per option.
    pub weights: Vec<u32>,
    /// Field-of-study tag (계열) shown as a badge on interest questions.
    #[serde(default)]
    pub track: Option<String>,
}

impl Question {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Weight of the chosen option, `None` when the index is out of range.
    pub fn weight(&self, option: usize) -> Option<u32> {
        self.weights.get(option).copied()
    }

    /// Largest weight, the base for reverse scoring.
    pub fn max_weight(&self) -> u32 {
        self.weights.iter().copied().max().unwrap_or(0)
    }
}

/// A loaded question bank: questions in canonical order plus the tables the
/// engine needs to page through and score them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    /// Questions in canonical order.
    pub questions: Vec<Question>,
    /// Questionnaire size announced to the user; the progress denominator.
    pub declared_total: usize,
    /// Canonical start of the first page shown.
    pub first_page_start: usize,
    /// Canonical positions each calculator reads.
    pub scoring: ScoringPlan,
    /// Recommendation lookup tables.
    pub recommendations: RecommendationTables,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, position: usize) -> Option<&Question> {
        self.questions.get(position)
    }

    /// Number of questions per instrument, in [`Instrument::ALL`] order.
    pub fn instrument_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for q in &self.questions {
            let slot = Instrument::ALL
                .iter()
                .position(|i| *i == q.instrument)
                .unwrap_or(0);
            counts[slot] += 1;
        }
        counts
    }
}

/// The computed outcome of one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Which instrument produced this result.
    pub instrument: Instrument,
    /// Card title, e.g. "RIASEC 진로유형".
    pub instrument_label: String,
    /// Four-letter code, winning category, or trait score summary.
    pub computed_label: String,
    /// One-line explanation of the computed label.
    pub description: String,
    /// Looked-up recommendation text.
    pub recommendation: String,
    /// Track tag of the winning interest question, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_display_and_parse() {
        assert_eq!(Instrument::TypeAxes.to_string(), "type_axes");
        assert_eq!(
            "riasec".parse::<Instrument>().unwrap(),
            Instrument::Interest
        );
        assert_eq!(
            "Big-Five".parse::<Instrument>().unwrap(),
            Instrument::Traits
        );
        assert!("mbti".parse::<Instrument>().is_err());
    }

    #[test]
    fn axis_letters_follow_code_order() {
        let code: String = Axis::ALL.iter().map(|a| a.letters().0).collect();
        assert_eq!(code, "ESTJ");
        let code: String = Axis::ALL.iter().map(|a| a.letters().1).collect();
        assert_eq!(code, "INFP");
    }

    #[test]
    fn dimension_parse_is_instrument_scoped() {
        assert_eq!(
            Dimension::parse_for(Instrument::Interest, "c").unwrap(),
            Dimension::Interest(InterestCategory::Conventional)
        );
        assert_eq!(
            Dimension::parse_for(Instrument::Traits, "c").unwrap(),
            Dimension::Trait(TraitFactor::Conscientiousness)
        );
        assert!(Dimension::parse_for(Instrument::TypeAxes, "openness").is_err());
    }

    #[test]
    fn dimension_string_roundtrip() {
        for d in [
            Dimension::Axis(Axis::TF),
            Dimension::Interest(InterestCategory::Enterprising),
            Dimension::Trait(TraitFactor::Neuroticism),
        ] {
            let s: String = d.into();
            assert_eq!(Dimension::try_from(s).unwrap(), d);
        }
    }

    #[test]
    fn question_weight_lookup() {
        let q = Question {
            id: "q".into(),
            instrument: Instrument::Traits,
            dimension: Some(Dimension::Trait(TraitFactor::Openness)),
            prompt: "새로운 경험을 시도하는 것이...".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
            weights: vec![4, 3, 2, 1, 0],
            track: None,
        };
        assert_eq!(q.weight(0), Some(4));
        assert_eq!(q.weight(4), Some(0));
        assert_eq!(q.weight(5), None);
        assert_eq!(q.max_weight(), 4);
    }

    #[test]
    fn only_neuroticism_is_reversed() {
        let reversed: Vec<_> = TraitFactor::ALL
            .iter()
            .filter(|f| f.is_reverse_scored())
            .collect();
        assert_eq!(reversed, vec![&TraitFactor::Neuroticism]);
    }
}
