//! The built-in 고딩테스트 question bank, embedded at compile time.

use std::path::Path;

use anyhow::Result;

use crate::model::QuestionBank;
use crate::parser::parse_bank_str;

/// TOML source of the built-in bank.
pub const BUILTIN_BANK_TOML: &str = include_str!("../../../question-banks/goding-test.toml");

/// Parse the built-in bank.
pub fn load_builtin() -> Result<QuestionBank> {
    parse_bank_str(BUILTIN_BANK_TOML, Path::new("<builtin>/goding-test.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Instrument, InterestCategory, TraitFactor};
    use crate::parser::validate_bank;

    #[test]
    fn builtin_parses_without_warnings() {
        let bank = load_builtin().unwrap();
        assert_eq!(bank.id, "goding-test");
        assert_eq!(bank.len(), 45);
        assert_eq!(bank.declared_total, 150);
        assert_eq!(bank.first_page_start, 12);
        let warnings = validate_bank(&bank);
        assert!(
            warnings.is_empty(),
            "unexpected warnings: {:?}",
            warnings.iter().map(|w| &w.message).collect::<Vec<_>>()
        );
    }

    #[test]
    fn builtin_instrument_mix() {
        let bank = load_builtin().unwrap();
        assert_eq!(bank.instrument_counts(), [12, 18, 15]);
        assert!(bank.questions[..4]
            .iter()
            .all(|q| q.instrument == Instrument::TypeAxes));
        assert!(bank.questions[4..10]
            .iter()
            .all(|q| q.instrument == Instrument::Interest && q.track.is_some()));
        assert!(bank.questions[10..15]
            .iter()
            .all(|q| q.instrument == Instrument::Traits));
    }

    #[test]
    fn builtin_tables_are_complete() {
        let bank = load_builtin().unwrap();
        let rec = &bank.recommendations;
        assert_eq!(rec.types.len(), 16);
        for category in InterestCategory::ALL {
            assert!(rec.interest.contains_key(category.name()));
        }
        assert_eq!(rec.traits.len(), 5);
        assert_eq!(rec.traits[4].factor, TraitFactor::Neuroticism);
    }
}
