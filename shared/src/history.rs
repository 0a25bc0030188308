//! Votes committed during one browser session.

use serde::{Deserialize, Serialize};

use crate::models::{ProposalId, VoteOption, STARTING_BUDGET};
use crate::session::CommitTicket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedVote {
    pub proposal_id: ProposalId,
    pub option: VoteOption,
    pub amount: u64,
}

impl From<&CommitTicket> for CommittedVote {
    fn from(ticket: &CommitTicket) -> Self {
        Self { proposal_id: ticket.proposal_id.clone(), option: ticket.option, amount: ticket.amount }
    }
}

/// Append-only record of confirmed votes. Only votes the gateway accepted
/// belong here, so `remaining` matches what the sessions deducted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteHistory {
    budget: u64,
    votes: Vec<CommittedVote>,
}

impl Default for VoteHistory {
    fn default() -> Self {
        Self::with_budget(STARTING_BUDGET)
    }
}

impl VoteHistory {
    pub fn with_budget(budget: u64) -> Self {
        Self { budget, votes: Vec::new() }
    }

    pub fn record(&mut self, vote: CommittedVote) {
        self.votes.push(vote);
    }

    /// Newest first.
    pub fn votes(&self) -> impl Iterator<Item = &CommittedVote> {
        self.votes.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn spent(&self) -> u64 {
        self.votes.iter().fold(0u64, |sum, vote| sum.saturating_add(vote.amount))
    }

    pub fn remaining(&self) -> u64 {
        self.budget.saturating_sub(self.spent())
    }

    pub fn spent_on(&self, id: &ProposalId) -> u64 {
        self.votes
            .iter()
            .filter(|vote| &vote.proposal_id == id)
            .fold(0u64, |sum, vote| sum.saturating_add(vote.amount))
    }
}
