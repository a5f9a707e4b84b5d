//! The `goding pages` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use goding_core::paging::PageSequence;

use crate::config::load_config_from;

pub fn execute(bank: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = super::load_bank(bank, &config)?;
    let pages = PageSequence::for_bank(&bank)?;
    let scored: HashSet<usize> = bank.scoring.positions().map(|(_, p)| p).collect();

    let mut table = Table::new();
    table.set_header(vec!["Order", "Page", "Start", "Questions", "Scored", "Progress"]);

    for order in 0..pages.len() {
        let Some(range) = pages.page_range(order) else {
            continue;
        };
        let start = range.start;
        let scored_here = range.clone().filter(|pos| scored.contains(pos)).count();
        let ids: Vec<String> = range
            .map(|pos| format!("{} ({})", bank.questions[pos].id, bank.questions[pos].instrument))
            .collect();
        table.add_row(vec![
            (order + 1).to_string(),
            pages.page_number(order).unwrap_or(0).to_string(),
            start.to_string(),
            ids.join(", "),
            scored_here.to_string(),
            format!("{:.1}%", pages.progress(order) * 100.0),
        ]);
    }

    println!("{} — {} pages shown", bank.name, pages.len());
    println!("{table}");
    Ok(())
}
