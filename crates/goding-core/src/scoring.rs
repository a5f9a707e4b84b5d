//! The three instrument calculators.
//!
//! Each calculator reads a fixed set of canonical positions named by the
//! [`ScoringPlan`]. Questions outside the plan are presentation only and are
//! never scored.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{
    Axis, Instrument, InterestCategory, Question, QuestionBank, ScoreResult, TraitFactor,
};
use crate::session::AnswerSet;

/// Multiplier applied to the chosen interest weight.
pub const INTEREST_MULTIPLIER: u32 = 2;

/// Canonical positions read by each calculator, in axis/category/factor order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPlan {
    pub axes: [usize; 4],
    pub interest: [usize; 6],
    pub traits: [usize; 5],
}

impl Default for ScoringPlan {
    fn default() -> Self {
        Self {
            axes: [0, 1, 2, 3],
            interest: [4, 5, 6, 7, 8, 9],
            traits: [10, 11, 12, 13, 14],
        }
    }
}

impl ScoringPlan {
    /// Every scored position with the instrument that reads it.
    pub fn positions(&self) -> impl Iterator<Item = (Instrument, usize)> + '_ {
        self.axes
            .iter()
            .map(|p| (Instrument::TypeAxes, *p))
            .chain(self.interest.iter().map(|p| (Instrument::Interest, *p)))
            .chain(self.traits.iter().map(|p| (Instrument::Traits, *p)))
    }

    /// Number of scored questions.
    pub fn scored_count(&self) -> usize {
        self.axes.len() + self.interest.len() + self.traits.len()
    }
}

/// First/second vote counters of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisTally {
    pub first: u32,
    pub second: u32,
}

impl AxisTally {
    /// Option 0 votes for the first letter, anything else for the second.
    pub fn record(&mut self, option: usize) {
        if option == 0 {
            self.first += 1;
        } else {
            self.second += 1;
        }
    }

    pub fn letter(&self, axis: Axis) -> char {
        let (first, second) = axis.letters();
        if self.first > self.second {
            first
        } else {
            second
        }
    }
}

/// Per-factor trait scores, reverse scoring already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitScores([u32; 5]);

impl TraitScores {
    pub fn new(scores: [u32; 5]) -> Self {
        Self(scores)
    }

    pub fn get(&self, factor: TraitFactor) -> u32 {
        let idx = TraitFactor::ALL
            .iter()
            .position(|f| *f == factor)
            .unwrap_or(0);
        self.0[idx]
    }

    pub fn as_array(&self) -> [u32; 5] {
        self.0
    }

    /// "개방성 4, 성실성 3, ..." in factor order.
    pub fn summary(&self) -> String {
        TraitFactor::ALL
            .iter()
            .zip(self.0.iter())
            .map(|(f, s)| format!("{} {s}", f.korean_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn answered<'a>(
    bank: &'a QuestionBank,
    answers: &AnswerSet,
    position: usize,
) -> Result<(&'a Question, usize), AssessmentError> {
    let question = bank
        .question(position)
        .ok_or_else(|| AssessmentError::InvalidBank(format!("no question at position {position}")))?;
    let option = answers
        .get(position)
        .ok_or(AssessmentError::MissingAnswer { position })?;
    Ok((question, option))
}

fn chosen_weight<'a>(
    bank: &'a QuestionBank,
    answers: &AnswerSet,
    position: usize,
) -> Result<(&'a Question, u32), AssessmentError> {
    let (question, option) = answered(bank, answers, position)?;
    let weight = question
        .weight(option)
        .ok_or(AssessmentError::OptionOutOfRange {
            position,
            option,
            option_count: question.option_count(),
        })?;
    Ok((question, weight))
}

/// Four-letter type code from the axis questions.
pub fn type_code(bank: &QuestionBank, answers: &AnswerSet) -> Result<String, AssessmentError> {
    let mut code = String::with_capacity(4);
    for (axis, position) in Axis::ALL.iter().zip(bank.scoring.axes.iter()) {
        let (_, option) = answered(bank, answers, *position)?;
        let mut tally = AxisTally::default();
        tally.record(option);
        code.push(tally.letter(*axis));
    }
    Ok(code)
}

/// Interest totals in [`InterestCategory::ALL`] order.
pub fn interest_totals(
    bank: &QuestionBank,
    answers: &AnswerSet,
) -> Result<[u32; 6], AssessmentError> {
    let mut totals = [0u32; 6];
    for (slot, position) in bank.scoring.interest.iter().enumerate() {
        let (_, weight) = chosen_weight(bank, answers, *position)?;
        totals[slot] += weight * INTEREST_MULTIPLIER;
    }
    Ok(totals)
}

/// The first category holding the maximum total.
pub fn winning_category(totals: &[u32; 6]) -> InterestCategory {
    let mut best = 0;
    for (idx, total) in totals.iter().enumerate().skip(1) {
        if *total > totals[best] {
            best = idx;
        }
    }
    InterestCategory::ALL[best]
}

/// Trait scores with the reverse-scored factor flipped.
pub fn trait_scores(bank: &QuestionBank, answers: &AnswerSet) -> Result<TraitScores, AssessmentError> {
    let mut scores = [0u32; 5];
    for (slot, (factor, position)) in TraitFactor::ALL
        .iter()
        .zip(bank.scoring.traits.iter())
        .enumerate()
    {
        let (question, weight) = chosen_weight(bank, answers, *position)?;
        scores[slot] += if factor.is_reverse_scored() {
            question.max_weight() - weight
        } else {
            weight
        };
    }
    Ok(TraitScores::new(scores))
}

/// Compute all three results, in [`Instrument::ALL`] order.
pub fn score_all(
    bank: &QuestionBank,
    answers: &AnswerSet,
) -> Result<Vec<ScoreResult>, AssessmentError> {
    let tables = &bank.recommendations;

    let code = type_code(bank, answers)?;
    let totals = interest_totals(bank, answers)?;
    let winner = winning_category(&totals);
    let traits = trait_scores(bank, answers)?;

    let winner_slot = InterestCategory::ALL
        .iter()
        .position(|c| *c == winner)
        .unwrap_or(0);
    let track = bank
        .question(bank.scoring.interest[winner_slot])
        .and_then(|q| q.track.clone());

    tracing::debug!(
        code = %code,
        winner = %winner,
        traits = ?traits.as_array(),
        "scored assessment"
    );

    Ok(vec![
        ScoreResult {
            instrument: Instrument::TypeAxes,
            instrument_label: Instrument::TypeAxes.label().to_string(),
            description: format!("당신의 심리유형은 {code}입니다."),
            recommendation: tables.for_type(&code).to_string(),
            computed_label: code,
            track: None,
        },
        ScoreResult {
            instrument: Instrument::Interest,
            instrument_label: Instrument::Interest.label().to_string(),
            computed_label: winner.name().to_string(),
            description: format!("당신의 진로유형은 {winner}입니다."),
            recommendation: tables.for_interest(winner).to_string(),
            track,
        },
        ScoreResult {
            instrument: Instrument::Traits,
            instrument_label: Instrument::Traits.label().to_string(),
            computed_label: traits.summary(),
            description: "개방성, 성실성, 외향성, 친화성, 신경증 성향을 종합적으로 분석했습니다."
                .to_string(),
            recommendation: tables.for_traits(&traits),
            track: None,
        },
    ])
}
