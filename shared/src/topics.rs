//! Grouping of proposals by topic category for the overview card.

use std::collections::BTreeMap;

use crate::models::Proposal;

pub const UNCATEGORIZED: &str = "Annet";

/// Label shown for a proposal's category. Blank categories fall under [`UNCATEGORIZED`].
pub fn category_label(proposal: &Proposal) -> &str {
    match proposal.category.trim() {
        "" => UNCATEGORIZED,
        category => category,
    }
}

/// Open proposals grouped by category. Categories are sorted by name with
/// [`UNCATEGORIZED`] last; proposals keep their input order within a group.
pub fn group_by_category(proposals: &[Proposal]) -> Vec<(&str, Vec<&Proposal>)> {
    let mut groups: BTreeMap<&str, Vec<&Proposal>> = BTreeMap::new();
    for proposal in proposals.iter().filter(|p| p.is_open()) {
        groups.entry(category_label(proposal)).or_default().push(proposal);
    }
    let other = groups.remove(UNCATEGORIZED);
    let mut grouped: Vec<_> = groups.into_iter().collect();
    if let Some(proposals) = other {
        grouped.push((UNCATEGORIZED, proposals));
    }
    grouped
}
