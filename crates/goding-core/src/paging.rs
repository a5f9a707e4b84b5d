//! Page-sequence table and progress arithmetic.
//!
//! The display order is precomputed once per bank. The first page shown is
//! the slice at `first_page_start`; paging then resumes right after it and
//! sweeps to the end of the bank, and finally visits the pages that precede
//! the first one. Every canonical question lands on exactly one page.

use std::ops::Range;

use crate::error::AssessmentError;
use crate::model::QuestionBank;

/// Questions per page.
pub const PAGE_SIZE: usize = 3;

/// Ordered canonical start indices of every page, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSequence {
    starts: Vec<usize>,
    bank_len: usize,
    declared_total: usize,
}

impl PageSequence {
    pub fn new(
        bank_len: usize,
        first_page_start: usize,
        declared_total: usize,
    ) -> Result<Self, AssessmentError> {
        if bank_len == 0 {
            return Err(AssessmentError::InvalidBank("bank has no questions".into()));
        }
        if first_page_start % PAGE_SIZE != 0 {
            return Err(AssessmentError::InvalidBank(format!(
                "first_page_start {first_page_start} is not a multiple of the page size {PAGE_SIZE}"
            )));
        }
        if first_page_start >= bank_len {
            return Err(AssessmentError::InvalidBank(format!(
                "first_page_start {first_page_start} is past the end of a {bank_len}-question bank"
            )));
        }

        let starts = std::iter::once(first_page_start)
            .chain((first_page_start + PAGE_SIZE..bank_len).step_by(PAGE_SIZE))
            .chain((0..first_page_start).step_by(PAGE_SIZE))
            .collect();

        Ok(Self {
            starts,
            bank_len,
            declared_total: declared_total.max(bank_len),
        })
    }

    pub fn for_bank(bank: &QuestionBank) -> Result<Self, AssessmentError> {
        Self::new(bank.len(), bank.first_page_start, bank.declared_total)
    }

    /// Canonical page starts in display order.
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// Number of pages actually shown.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Canonical start of the `page`-th page shown.
    pub fn start(&self, page: usize) -> Option<usize> {
        self.starts.get(page).copied()
    }

    /// Canonical positions covered by the `page`-th page shown.
    pub fn page_range(&self, page: usize) -> Option<Range<usize>> {
        self.start(page)
            .map(|start| start..(start + PAGE_SIZE).min(self.bank_len))
    }

    /// `(start + 1) / declared_total` for the `page`-th page shown.
    pub fn progress(&self, page: usize) -> f64 {
        match self.start(page) {
            Some(start) => ((start + 1) as f64 / self.declared_total as f64).min(1.0),
            None => 1.0,
        }
    }

    /// Page number shown to the user, derived from the canonical start.
    pub fn page_number(&self, page: usize) -> Option<usize> {
        self.start(page).map(|start| start / PAGE_SIZE + 1)
    }

    /// Page count announced to the user.
    pub fn declared_pages(&self) -> usize {
        self.declared_total.div_ceil(PAGE_SIZE)
    }

    pub fn declared_total(&self) -> usize {
        self.declared_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_twelve_then_fifteen() {
        let seq = PageSequence::new(45, 12, 150).unwrap();
        assert_eq!(seq.start(0), Some(12));
        assert_eq!(seq.page_range(0), Some(12..15));
        assert_eq!(seq.start(1), Some(15));
    }

    #[test]
    fn full_sequence_for_builtin_shape() {
        let seq = PageSequence::new(45, 12, 150).unwrap();
        assert_eq!(
            seq.starts(),
            &[12, 15, 18, 21, 24, 27, 30, 33, 36, 39, 42, 0, 3, 6, 9]
        );
    }

    #[test]
    fn every_position_covered_exactly_once() {
        for (len, first) in [(45, 12), (16, 12), (14, 0), (30, 27)] {
            let seq = PageSequence::new(len, first, len).unwrap();
            let mut seen = vec![0u32; len];
            for page in 0..seq.len() {
                for pos in seq.page_range(page).unwrap() {
                    seen[pos] += 1;
                }
            }
            assert!(seen.iter().all(|c| *c == 1), "len={len} first={first}");
        }
    }

    #[test]
    fn short_last_page() {
        let seq = PageSequence::new(16, 12, 16).unwrap();
        assert_eq!(seq.starts(), &[12, 15, 0, 3, 6, 9]);
        assert_eq!(seq.page_range(1), Some(15..16));
    }

    #[test]
    fn progress_uses_declared_total() {
        let seq = PageSequence::new(45, 12, 150).unwrap();
        assert!((seq.progress(0) - 13.0 / 150.0).abs() < f64::EPSILON);
        assert!((seq.progress(1) - 16.0 / 150.0).abs() < f64::EPSILON);
        // the reserved block comes last but reports its low canonical start
        assert!((seq.progress(11) - 1.0 / 150.0).abs() < f64::EPSILON);
        assert_eq!(seq.progress(seq.len()), 1.0);
    }

    #[test]
    fn page_numbers() {
        let seq = PageSequence::new(45, 12, 150).unwrap();
        assert_eq!(seq.page_number(0), Some(5));
        assert_eq!(seq.page_number(1), Some(6));
        assert_eq!(seq.declared_pages(), 50);
    }

    #[test]
    fn declared_total_never_below_bank() {
        let seq = PageSequence::new(45, 12, 10).unwrap();
        assert_eq!(seq.declared_total(), 45);
    }

    #[test]
    fn rejects_misaligned_or_out_of_range_start() {
        assert!(PageSequence::new(45, 13, 150).is_err());
        assert!(PageSequence::new(12, 12, 150).is_err());
        assert!(PageSequence::new(0, 0, 0).is_err());
    }
}
