//! Vote session: a user's budgeted point allocation against one proposal.
//!
//! [`VoteSession`] is a plain state container. Every transition is a method
//! that either validates locally or consumes a ticket handed out earlier, so a
//! UI can drive it from callbacks and tests can drive it without a runtime.
//! [`VoteController`] couples a session with an injected [`ProposalGateway`]
//! for callers that can simply `await` each step.
//!
//! Budget rule: `remaining_budget` is only ever reduced by an amount that the
//! gateway confirmed. Validation failures and gateway failures leave
//! `remaining_budget` and `pending_amount` untouched.

use thiserror::Error;
use tracing::{debug, warn};

use crate::gateway::{GatewayError, ProposalGateway};
use crate::models::{Proposal, ProposalId, Tally, VoteOption, STARTING_BUDGET};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Proposal {0} not found")]
    NotFound(ProposalId),
    #[error("Error fetching proposal: {0}")]
    Fetch(GatewayError),
    #[error("Error casting vote: {0}")]
    Commit(GatewayError),
    #[error("Please enter a valid number of vote points (got {0})")]
    InvalidAmount(i64),
    #[error("Not enough vote points available ({requested} requested, {remaining} remaining)")]
    InsufficientBudget { requested: u64, remaining: u64 },
    #[error("Proposal is not loaded")]
    NotLoaded,
    #[error("A vote is already being submitted")]
    SubmitInFlight,
    #[error("Vote session is closed")]
    Closed,
    #[error("Response discarded")]
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Ready,
    /// Terminal: the proposal id did not resolve.
    NotFound,
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    pub proposal_id: ProposalId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTicket {
    seq: u64,
    pub proposal_id: ProposalId,
    pub option: VoteOption,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoteSession {
    proposal_id: Option<ProposalId>,
    phase: SessionPhase,
    title: Option<String>,
    tally: Option<Tally>,
    remaining_budget: u64,
    pending_amount: i64,
    last_error: Option<SessionError>,
    live: bool,
    load_epoch: u64,
    commit_seq: u64,
    committing: Option<CommitTicket>,
}

impl Default for VoteSession {
    fn default() -> Self {
        Self::with_budget(STARTING_BUDGET)
    }
}

impl VoteSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(budget: u64) -> Self {
        Self {
            proposal_id: None,
            phase: SessionPhase::Idle,
            title: None,
            tally: None,
            remaining_budget: budget,
            pending_amount: 0,
            last_error: None,
            live: true,
            load_epoch: 0,
            commit_seq: 0,
            committing: None,
        }
    }

    pub fn proposal_id(&self) -> Option<&ProposalId> { self.proposal_id.as_ref() }
    pub fn phase(&self) -> SessionPhase { self.phase }
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn tally(&self) -> Option<&Tally> { self.tally.as_ref() }
    pub fn remaining_budget(&self) -> u64 { self.remaining_budget }
    pub fn pending_amount(&self) -> i64 { self.pending_amount }
    pub fn last_error(&self) -> Option<&SessionError> { self.last_error.as_ref() }
    pub fn is_live(&self) -> bool { self.live }
    pub fn is_submitting(&self) -> bool { self.committing.is_some() }

    /// Starts fetching `id`. Any response to an earlier load is stale from here on.
    pub fn begin_load(&mut self, id: ProposalId) -> Result<LoadTicket, SessionError> {
        if !self.live {
            return Err(SessionError::Closed);
        }
        self.load_epoch += 1;
        self.phase = SessionPhase::Loading;
        self.last_error = None;
        if self.proposal_id.as_ref() != Some(&id) {
            self.title = None;
            self.tally = None;
        }
        self.proposal_id = Some(id.clone());
        debug!(proposal_id = %id, epoch = self.load_epoch, "loading proposal");
        Ok(LoadTicket { epoch: self.load_epoch, proposal_id: id })
    }

    pub fn apply_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<Proposal, GatewayError>,
    ) -> Result<(), SessionError> {
        if !self.live || ticket.epoch != self.load_epoch {
            debug!(proposal_id = %ticket.proposal_id, "discarding stale load response");
            return Err(SessionError::Discarded);
        }
        match result {
            Ok(proposal) => {
                self.title = Some(proposal.title);
                self.tally = Some(proposal.tally);
                self.phase = SessionPhase::Ready;
                Ok(())
            }
            Err(GatewayError::NotFound(id)) => {
                warn!(proposal_id = %id, "proposal not found");
                self.phase = SessionPhase::NotFound;
                self.fail(SessionError::NotFound(id))
            }
            Err(e) => {
                warn!(proposal_id = %ticket.proposal_id, error = %e, "failed to fetch proposal");
                self.phase = SessionPhase::FetchFailed;
                self.fail(SessionError::Fetch(e))
            }
        }
    }

    /// Accepts any integer; validation waits for submission.
    pub fn set_pending_amount(&mut self, amount: i64) {
        self.pending_amount = amount;
    }

    /// Validates the pending amount and reserves a commit. No gateway call may
    /// be made unless this returns a ticket.
    pub fn prepare_submit(&mut self, option: VoteOption) -> Result<CommitTicket, SessionError> {
        if !self.live {
            return Err(SessionError::Closed);
        }
        let proposal_id = match (self.phase, &self.proposal_id) {
            (SessionPhase::Ready, Some(id)) => id.clone(),
            (SessionPhase::NotFound, Some(id)) => return Err(SessionError::NotFound(id.clone())),
            _ => return Err(SessionError::NotLoaded),
        };
        if self.committing.is_some() {
            return Err(SessionError::SubmitInFlight);
        }
        if self.pending_amount <= 0 {
            return self.fail(SessionError::InvalidAmount(self.pending_amount));
        }
        let amount = self.pending_amount.unsigned_abs();
        if amount > self.remaining_budget {
            return self.fail(SessionError::InsufficientBudget {
                requested: amount,
                remaining: self.remaining_budget,
            });
        }

        self.commit_seq += 1;
        let ticket = CommitTicket { seq: self.commit_seq, proposal_id, option, amount };
        self.committing = Some(ticket.clone());
        debug!(proposal_id = %ticket.proposal_id, %option, amount, "submitting vote");
        Ok(ticket)
    }

    pub fn apply_commit(
        &mut self,
        ticket: CommitTicket,
        result: Result<(), GatewayError>,
    ) -> Result<(), SessionError> {
        if !self.live || self.committing.as_ref() != Some(&ticket) {
            debug!(proposal_id = %ticket.proposal_id, "discarding stale commit response");
            return Err(SessionError::Discarded);
        }
        self.committing = None;
        // The user may have moved on to another proposal while this commit was
        // in flight. The budget is shared, the error and pending amount are not.
        let current = self.proposal_id.as_ref() == Some(&ticket.proposal_id);
        match result {
            Ok(()) => {
                self.remaining_budget = self.remaining_budget.saturating_sub(ticket.amount);
                if current {
                    self.pending_amount = 0;
                    self.last_error = None;
                    if let Some(tally) = self.tally.as_mut() {
                        tally.add(ticket.option, ticket.amount);
                    }
                }
                debug!(remaining = self.remaining_budget, current, "vote committed");
                Ok(())
            }
            Err(e) => {
                warn!(proposal_id = %ticket.proposal_id, error = %e, "vote commit failed");
                if current {
                    self.fail(SessionError::Commit(e))
                } else {
                    Err(SessionError::Commit(e))
                }
            }
        }
    }

    /// Tears the session down. Later responses are ignored.
    pub fn close(&mut self) {
        self.live = false;
        self.committing = None;
    }

    fn fail<T>(&mut self, error: SessionError) -> Result<T, SessionError> {
        self.last_error = Some(error.clone());
        Err(error)
    }
}

pub struct VoteController<G> {
    gateway: G,
    session: VoteSession,
}

impl<G: ProposalGateway> VoteController<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_session(gateway, VoteSession::new())
    }

    pub fn with_session(gateway: G, session: VoteSession) -> Self {
        Self { gateway, session }
    }

    pub fn session(&self) -> &VoteSession {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn load(&mut self, id: impl Into<ProposalId>) -> Result<(), SessionError> {
        let ticket = self.session.begin_load(id.into())?;
        let result = self.gateway.get(&ticket.proposal_id).await;
        self.session.apply_loaded(ticket, result)
    }

    pub fn set_pending_amount(&mut self, amount: i64) {
        self.session.set_pending_amount(amount);
    }

    pub async fn submit_vote(&mut self, option: VoteOption) -> Result<(), SessionError> {
        let ticket = self.session.prepare_submit(option)?;
        let result = self.gateway
            .increment_tally(&ticket.proposal_id, ticket.option, ticket.amount)
            .await;
        self.session.apply_commit(ticket, result)
    }

    pub fn close(&mut self) {
        self.session.close();
    }
}
