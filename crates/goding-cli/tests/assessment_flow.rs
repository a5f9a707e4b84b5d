//! End-to-end assessment tests driving the core session directly.
//!
//! These walk the shipped question bank page by page the way the interactive
//! shell does, then persist and reload the resulting report.

use std::collections::BTreeSet;
use std::sync::Arc;

use goding_core::model::QuestionBank;
use goding_core::report::AssessmentReport;
use goding_core::session::{AnswerOutcome, AssessmentSession};

fn shipped_bank() -> Arc<QuestionBank> {
    let path = std::path::Path::new("../../question-banks/goding-test.toml");
    Arc::new(goding_core::parser::parse_bank(path).unwrap())
}

/// Answer every page, picking the option `choose` returns for each position.
fn walk(session: &mut AssessmentSession, choose: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut visited = Vec::new();
    while let Some(page) = session.current_page() {
        let positions: Vec<usize> = page.questions.iter().map(|q| q.position).collect();
        visited.push(page.start);
        for (slot, position) in positions.into_iter().enumerate() {
            session.answer(slot, choose(position)).unwrap();
        }
    }
    visited
}

#[test]
fn shipped_bank_matches_builtin() {
    let bank = shipped_bank();
    let builtin = goding_core::bank::load_builtin().unwrap();
    assert_eq!(bank.id, builtin.id);
    assert_eq!(bank.len(), builtin.len());
    assert!(goding_core::parser::validate_bank(&bank).is_empty());
}

#[test]
fn every_question_is_shown_once() {
    let bank = shipped_bank();
    let mut session = AssessmentSession::new(Arc::clone(&bank)).unwrap();

    let first = session.current_page().unwrap();
    assert_eq!(first.start, 12);
    assert_eq!(first.page_number, 5);

    let starts = walk(&mut session, |_| 0);
    assert_eq!(starts.len(), 15);

    let shown: BTreeSet<usize> = starts.iter().flat_map(|s| *s..*s + 3).collect();
    assert_eq!(shown.len(), bank.len());
    assert_eq!(session.answers().answered_count(), bank.len());
    assert!(session.is_complete());
    assert_eq!(session.progress(), 1.0);
}

#[test]
fn mixed_profile_through_pages() {
    let bank = shipped_bank();
    let mut session = AssessmentSession::new(bank).unwrap();

    // E, N, T, P; Artistic strongest; high openness, anxious.
    // Unscored questions take option 0, which every question has.
    walk(&mut session, |position| match position {
        1 | 3 => 1,
        4 | 5 | 7 | 8 | 9 => 3,
        11..=13 => 2,
        _ => 0,
    });

    let results = session.results().unwrap();
    assert_eq!(results[0].computed_label, "ENTP");
    assert_eq!(results[1].computed_label, "Artistic");
    assert_eq!(results[1].track.as_deref(), Some("예체능계열"));
    assert_eq!(results[2].computed_label, "개방성 4, 성실성 2, 외향성 2, 친화성 2, 신경증 0");
}

#[test]
fn interest_tie_goes_to_first_category() {
    let mut session = AssessmentSession::new(shipped_bank()).unwrap();
    walk(&mut session, |_| 1);

    let results = session.results().unwrap();
    assert_eq!(results[1].computed_label, "Realistic");
    assert_eq!(results[1].track.as_deref(), Some("공학계열"));
}

#[test]
fn reset_mid_test_discards_answers() {
    let mut session = AssessmentSession::new(shipped_bank()).unwrap();
    for slot in 0..3 {
        session.answer(slot, 0).unwrap();
    }
    assert_eq!(session.answers().answered_count(), 3);

    session.reset();
    assert_eq!(session.answers().answered_count(), 0);
    assert_eq!(session.current_start(), Some(12));

    walk(&mut session, |_| 1);
    assert_eq!(session.results().unwrap()[0].computed_label, "INFP");
}

#[test]
fn completed_session_rejects_answers() {
    let mut session = AssessmentSession::new(shipped_bank()).unwrap();
    walk(&mut session, |_| 0);
    let before = session.answers().clone();

    assert!(session.answer(0, 0).is_err());
    assert_eq!(session.answers(), &before);
}

#[test]
fn replay_matches_page_walk() {
    let bank = shipped_bank();
    let canonical: Vec<usize> = (0..bank.len()).map(|p| p % 2).collect();

    let mut walked = AssessmentSession::new(Arc::clone(&bank)).unwrap();
    walk(&mut walked, |p| canonical[p]);

    let mut replayed = AssessmentSession::new(bank).unwrap();
    let outcome = replayed.replay(&canonical).unwrap();
    assert_eq!(outcome, AnswerOutcome::Completed);
    assert_eq!(walked.results(), replayed.results());
}

#[test]
fn report_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = AssessmentSession::new(shipped_bank()).unwrap();
    walk(&mut session, |_| 0);

    let report = AssessmentReport::from_session(&session).unwrap();
    let path = dir.path().join("nested").join("report.json");
    report.save_json(&path).unwrap();

    let loaded = AssessmentReport::load_json(&path).unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.bank.declared_total, 150);
    assert_eq!(loaded.results, report.results);
    assert_eq!(loaded.next_screen, "subject-recommendation");
    assert!(loaded.to_text().contains("ESTJ"));
}
