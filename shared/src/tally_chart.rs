use std::cmp::Ordering;

use crate::models::{Proposal, Tally, VoteOption};

pub const DATASET_LABEL: &str = "Stemmer";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub option: VoteOption,
    pub label: &'static str,
    pub color: &'static str,
    pub value: u64,
    /// Share of the total in percent, 0.0 when nothing has been cast.
    pub share: f64,
}

pub const fn label(option: VoteOption) -> &'static str {
    match option {
        VoteOption::Yes => "Ja",
        VoteOption::No => "Nei",
        VoteOption::Blank => "Blank",
    }
}

pub const fn color(option: VoteOption) -> &'static str {
    match option {
        VoteOption::Yes => "#4caf50",
        VoteOption::No => "#f44336",
        VoteOption::Blank => "#9e9e9e",
    }
}

pub fn chart_bars(tally: &Tally) -> Vec<ChartBar> {
    let total = tally.total();
    VoteOption::ALL
        .iter()
        .map(|&option| {
            let value = tally.get(option);
            let share = if total == 0 { 0.0 } else { value as f64 * 100.0 / total as f64 };
            ChartBar { option, label: label(option), color: color(option), value, share }
        })
        .collect()
}

/// Tallest bar, used to scale bar heights. Never zero.
pub fn scale_max(bars: &[ChartBar]) -> u64 {
    bars.iter().map(|b| b.value).max().unwrap_or(0).max(1)
}

/// Pixel height of a bar scaled against `max` within `area`. Widened to u128
/// so large tallies cannot overflow.
pub fn bar_height(value: u64, max: u64, area: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    let scaled = u128::from(value.min(max)) * u128::from(area) / u128::from(max);
    u64::try_from(scaled).unwrap_or(area)
}

/// Open proposals ordered by total votes, most first; ties by title.
pub fn trending(proposals: &[Proposal], limit: usize) -> Vec<&Proposal> {
    let mut open: Vec<_> = proposals.iter().filter(|p| p.is_open()).collect();
    open.sort_by(|a, b| {
        match b.total_votes().cmp(&a.total_votes()) {
            Ordering::Equal => a.title.cmp(&b.title),
            other => other,
        }
    });
    open.truncate(limit);
    open
}
