//! The assessment session: answer collection, page advance, completion.
//!
//! A session owns the answers of one test attempt. Answers are buffered per
//! page and only copied into the canonical [`AnswerSet`] once every question
//! on the page has one. Completing the last page scores the test exactly once.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{Question, QuestionBank, ScoreResult};
use crate::paging::{PageSequence, PAGE_SIZE};
use crate::parser::check_bank;
use crate::scoring::score_all;

/// Canonical position -> chosen option index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet(Vec<Option<usize>>);

impl AnswerSet {
    pub fn new(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn get(&self, position: usize) -> Option<usize> {
        self.0.get(position).copied().flatten()
    }

    pub fn set(&mut self, position: usize, option: usize) {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = Some(option);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answered_count() == 0
    }

    pub fn answered_count(&self) -> usize {
        self.0.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn first_missing(&self) -> Option<usize> {
        self.0.iter().position(Option::is_none)
    }

    pub fn clear(&mut self) {
        self.0.iter_mut().for_each(|a| *a = None);
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.0
    }
}

/// What an accepted answer event did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Stored in the page buffer; the page still has unanswered questions.
    Recorded { answered: usize, page_len: usize },
    /// The page was complete and the next page starts at `next_start`.
    PageAdvanced { next_start: usize },
    /// The last page was complete and results are available.
    Completed,
}

/// A question as it appears on the current page.
#[derive(Debug, Clone)]
pub struct PageQuestion<'a> {
    /// Canonical position in the bank.
    pub position: usize,
    /// "Q13" style number shown next to the prompt.
    pub display_number: usize,
    pub question: &'a Question,
    /// Option currently held in the page buffer.
    pub selected: Option<usize>,
}

/// Everything a shell needs to render the current page.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub page_number: usize,
    pub declared_pages: usize,
    pub declared_total: usize,
    pub start: usize,
    pub progress: f64,
    pub questions: Vec<PageQuestion<'a>>,
}

impl PageView<'_> {
    /// "페이지 5 / 50 (총 150개 문항)".
    pub fn label(&self) -> String {
        format!(
            "페이지 {} / {} (총 {}개 문항)",
            self.page_number, self.declared_pages, self.declared_total
        )
    }
}

/// One test attempt over a shared question bank.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    bank: Arc<QuestionBank>,
    pages: PageSequence,
    current_page: usize,
    page_answers: [Option<usize>; PAGE_SIZE],
    answers: AnswerSet,
    results: Option<Vec<ScoreResult>>,
}

impl AssessmentSession {
    /// Start an attempt. Fails with [`AssessmentError::InvalidBank`] when the
    /// bank cannot be paged or scored.
    pub fn new(bank: Arc<QuestionBank>) -> Result<Self, AssessmentError> {
        check_bank(&bank)?;
        let pages = PageSequence::for_bank(&bank)?;
        let answers = AnswerSet::new(bank.len());
        Ok(Self {
            bank,
            pages,
            current_page: 0,
            page_answers: [None; PAGE_SIZE],
            answers,
            results: None,
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn pages(&self) -> &PageSequence {
        &self.pages
    }

    /// Canonical start of the current page, `None` once complete.
    pub fn current_start(&self) -> Option<usize> {
        if self.results.is_some() {
            return None;
        }
        self.pages.start(self.current_page)
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn results(&self) -> Option<&[ScoreResult]> {
        self.results.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.results.is_some()
    }

    /// Progress fraction for the current page, 1.0 once complete.
    pub fn progress(&self) -> f64 {
        if self.is_complete() {
            1.0
        } else {
            self.pages.progress(self.current_page)
        }
    }

    /// The page the shell should render, `None` once complete.
    pub fn current_page(&self) -> Option<PageView<'_>> {
        let start = self.current_start()?;
        let range = self.pages.page_range(self.current_page)?;
        let questions = range
            .enumerate()
            .map(|(slot, position)| PageQuestion {
                position,
                display_number: position + 1,
                question: &self.bank.questions[position],
                selected: self.page_answers[slot],
            })
            .collect();

        Some(PageView {
            page_number: self.pages.page_number(self.current_page).unwrap_or(1),
            declared_pages: self.pages.declared_pages(),
            declared_total: self.pages.declared_total(),
            start,
            progress: self.progress(),
            questions,
        })
    }

    /// Record `option` for the `slot`-th question of the current page.
    ///
    /// Re-answering a slot before the page is complete overwrites it.
    pub fn answer(&mut self, slot: usize, option: usize) -> Result<AnswerOutcome, AssessmentError> {
        if self.is_complete() {
            return Err(AssessmentError::SessionComplete);
        }
        let range = self
            .pages
            .page_range(self.current_page)
            .ok_or(AssessmentError::SessionComplete)?;
        let page_len = range.len();
        if slot >= page_len {
            return Err(AssessmentError::SlotOutOfRange { slot, page_len });
        }

        let position = range.start + slot;
        let option_count = self.bank.questions[position].option_count();
        if option >= option_count {
            return Err(AssessmentError::OptionOutOfRange {
                position,
                option,
                option_count,
            });
        }

        let mut buffer = self.page_answers;
        buffer[slot] = Some(option);
        let answered = buffer[..page_len].iter().filter(|a| a.is_some()).count();
        if answered < page_len {
            self.page_answers = buffer;
            return Ok(AnswerOutcome::Recorded { answered, page_len });
        }

        let mut answers = self.answers.clone();
        for (slot, position) in range.enumerate() {
            if let Some(option) = buffer[slot] {
                answers.set(position, option);
            }
        }
        let next_page = self.current_page + 1;

        if let Some(next_start) = self.pages.start(next_page) {
            self.commit_page(answers, next_page);
            tracing::debug!(
                page = self.current_page,
                next_start,
                answered = self.answers.answered_count(),
                "page complete"
            );
            return Ok(AnswerOutcome::PageAdvanced { next_start });
        }

        // Last page: score before touching any state so a failure leaves the
        // page open.
        if let Some(position) = answers.first_missing() {
            return Err(AssessmentError::MissingAnswer { position });
        }
        let results = score_all(&self.bank, &answers)?;
        self.commit_page(answers, next_page);

        tracing::info!(
            bank = %self.bank.id,
            type_code = %results[0].computed_label,
            interest = %results[1].computed_label,
            "assessment complete"
        );
        self.results = Some(results);
        Ok(AnswerOutcome::Completed)
    }

    fn commit_page(&mut self, answers: AnswerSet, next_page: usize) {
        self.answers = answers;
        self.page_answers = [None; PAGE_SIZE];
        self.current_page = next_page;
    }

    /// Feed a canonical-order answer list through the pages in display order.
    pub fn replay(&mut self, canonical: &[usize]) -> Result<AnswerOutcome, AssessmentError> {
        let mut outcome = AnswerOutcome::Recorded {
            answered: 0,
            page_len: 0,
        };
        while let Some(range) = self
            .current_start()
            .and_then(|_| self.pages.page_range(self.current_page))
        {
            for (slot, position) in range.enumerate() {
                let option = canonical
                    .get(position)
                    .copied()
                    .ok_or(AssessmentError::MissingAnswer { position })?;
                outcome = self.answer(slot, option)?;
            }
        }
        Ok(outcome)
    }

    /// Discard every answer and result and go back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 0;
        self.page_answers = [None; PAGE_SIZE];
        self.answers.clear();
        self.results = None;
        tracing::debug!(bank = %self.bank.id, "session reset");
    }
}
