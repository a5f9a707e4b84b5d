//! Assessment error types.
//!
//! The UI shell normally only offers valid indices, so none of these are
//! expected during a regular test attempt. They exist so that a misbehaving
//! caller gets a typed answer instead of a corrupted session. A rejected event
//! never changes session state.

use thiserror::Error;

/// Errors raised by the question bank and the assessment session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// Every page has been answered and results were already produced.
    #[error("the test is already complete; reset to start again")]
    SessionComplete,

    /// The page-local index does not address a question on the current page.
    #[error("slot {slot} is not on the current page ({page_len} questions)")]
    SlotOutOfRange { slot: usize, page_len: usize },

    /// The option index is outside the question's option list.
    #[error("option {option} is out of range for question at position {position} ({option_count} options)")]
    OptionOutOfRange {
        position: usize,
        option: usize,
        option_count: usize,
    },

    /// Scoring needed an answer that was never recorded.
    #[error("no answer recorded for canonical position {position}")]
    MissingAnswer { position: usize },

    /// The question bank violates a structural invariant.
    #[error("invalid question bank: {0}")]
    InvalidBank(String),
}

impl AssessmentError {
    /// Returns `true` for errors caused by a single bad answer event, which a
    /// shell can simply ignore and keep the session running.
    pub fn is_rejected_event(&self) -> bool {
        matches!(
            self,
            AssessmentError::SlotOutOfRange { .. } | AssessmentError::OptionOutOfRange { .. }
        )
    }
}
