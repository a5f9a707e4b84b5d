//! The `goding take` command.
//!
//! Each question reads one line: a 1-based option number, or `reset` to start
//! over. Invalid input is reported and the question is asked again.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use goding_core::report::AssessmentReport;
use goding_core::session::{AnswerOutcome, AssessmentSession};

use crate::config::load_config_from;

pub fn execute(
    bank: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = Arc::new(super::load_bank(bank, &config)?);
    let mut session = AssessmentSession::new(bank)?;

    let stdin = std::io::stdin();
    let stderr = std::io::stderr();
    run(&mut session, stdin.lock(), stderr.lock())?;

    let report = AssessmentReport::from_session(&session)?;
    super::emit(&report, format, output, &config)
}

/// Drive `session` to completion from `input`, writing prompts to `out`.
fn run<R: BufRead, W: Write>(session: &mut AssessmentSession, input: R, mut out: W) -> Result<()> {
    let mut lines = input.lines();

    while let Some(page) = session.current_page() {
        writeln!(out, "\n{}  [{:.1}%]", page.label(), page.progress * 100.0)?;
        let prompts: Vec<(usize, String)> = page
            .questions
            .iter()
            .map(|q| {
                let mut text = format!("Q{}", q.display_number);
                if let Some(track) = &q.question.track {
                    text.push_str(&format!(" [{track}]"));
                }
                text.push_str(&format!(" {}\n", q.question.prompt));
                for (i, option) in q.question.options.iter().enumerate() {
                    text.push_str(&format!("  {}) {option}\n", i + 1));
                }
                (q.question.option_count(), text)
            })
            .collect();

        'page: for (slot, (option_count, text)) in prompts.iter().enumerate() {
            loop {
                write!(out, "{text}> ")?;
                out.flush()?;

                let Some(line) = lines.next() else {
                    anyhow::bail!("input ended before the test was complete");
                };
                let line = line?;
                let line = line.trim();

                if line.eq_ignore_ascii_case("reset") {
                    session.reset();
                    writeln!(out, "Test reset.")?;
                    break 'page;
                }

                let option = match line.parse::<usize>() {
                    Ok(n) if (1..=*option_count).contains(&n) => n - 1,
                    _ => {
                        writeln!(out, "Enter a number between 1 and {option_count}.")?;
                        continue;
                    }
                };

                match session.answer(slot, option) {
                    Ok(AnswerOutcome::Completed) => {
                        writeln!(out, "Test complete.")?;
                        return Ok(());
                    }
                    Ok(_) => break,
                    Err(e) if e.is_rejected_event() => {
                        writeln!(out, "{e}")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goding_core::bank::load_builtin;

    fn session() -> AssessmentSession {
        AssessmentSession::new(Arc::new(load_builtin().unwrap())).unwrap()
    }

    #[test]
    fn completes_with_one_line_per_question() {
        let mut s = session();
        let input = "1\n".repeat(s.bank().len());
        let mut out = Vec::new();
        run(&mut s, input.as_bytes(), &mut out).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.results().unwrap()[0].computed_label, "ESTJ");

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("페이지 5 / 50"));
        assert!(out.contains("Test complete."));
    }

    #[test]
    fn invalid_input_is_asked_again() {
        let mut s = session();
        let input = format!("9\nabc\n{}", "2\n".repeat(s.bank().len()));
        let mut out = Vec::new();
        run(&mut s, input.as_bytes(), &mut out).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.results().unwrap()[0].computed_label, "INFP");
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Enter a number between 1 and 5.").count(), 2);
    }

    #[test]
    fn reset_starts_over() {
        let mut s = session();
        let input = format!("1\n1\n1\n1\nreset\n{}", "2\n".repeat(s.bank().len()));
        let mut out = Vec::new();
        run(&mut s, input.as_bytes(), &mut out).unwrap();
        assert_eq!(s.results().unwrap()[0].computed_label, "INFP");
        assert!(String::from_utf8(out).unwrap().contains("Test reset."));
    }

    #[test]
    fn early_eof_is_an_error() {
        let mut s = session();
        let err = run(&mut s, "1\n1\n".as_bytes(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("input ended"));
    }
}
