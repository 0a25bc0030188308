//! Contract between a vote session and the store that owns proposal tallies.
//!
//! The store is the only authority on tallies. `increment_tally` must be applied
//! atomically on the store side (never read-modify-write from a client) and is
//! commutative across concurrent callers. It is not idempotent: a retried
//! increment after a transport failure may count twice, so callers never retry
//! on their own.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

use crate::models::{Proposal, ProposalId, ProposalStatus, VoteOption};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Proposal {0} not found")]
    NotFound(ProposalId),
    #[error("Proposal {0} is closed for voting")]
    Closed(ProposalId),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Store error: {0}")]
    Store(String),
}

#[allow(async_fn_in_trait)]
pub trait ProposalGateway {
    async fn get(&self, id: &ProposalId) -> Result<Proposal, GatewayError>;

    async fn increment_tally(
        &self,
        id: &ProposalId,
        option: VoteOption,
        amount: u64,
    ) -> Result<(), GatewayError>;
}

impl<G: ProposalGateway + ?Sized> ProposalGateway for &G {
    async fn get(&self, id: &ProposalId) -> Result<Proposal, GatewayError> {
        (**self).get(id).await
    }

    async fn increment_tally(
        &self,
        id: &ProposalId,
        option: VoteOption,
        amount: u64,
    ) -> Result<(), GatewayError> {
        (**self).increment_tally(id, option, amount).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Get(ProposalId),
    Increment(ProposalId, VoteOption, u64),
}

/// In-process store. Each increment happens under one lock acquisition, which
/// gives the same atomicity the database provides.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    proposals: Mutex<HashMap<ProposalId, Proposal>>,
    calls: Mutex<Vec<GatewayCall>>,
    fail_next_get: Mutex<Option<GatewayError>>,
    fail_next_increment: Mutex<Option<GatewayError>>,
}

fn poisoned<T>(_: T) -> GatewayError {
    GatewayError::Store("memory store lock poisoned".into())
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proposals(proposals: impl IntoIterator<Item = Proposal>) -> Self {
        let gateway = Self::new();
        if let Ok(mut map) = gateway.proposals.lock() {
            map.extend(proposals.into_iter().map(|p| (p.id.clone(), p)));
        }
        gateway
    }

    pub fn insert(&self, proposal: Proposal) -> Result<(), GatewayError> {
        self.proposals.lock().map_err(poisoned)?.insert(proposal.id.clone(), proposal);
        Ok(())
    }

    pub fn snapshot(&self, id: &ProposalId) -> Option<Proposal> {
        self.proposals.lock().ok()?.get(id).cloned()
    }

    pub fn close(&self, id: &ProposalId) -> Result<(), GatewayError> {
        let mut proposals = self.proposals.lock().map_err(poisoned)?;
        let proposal = proposals.get_mut(id).ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        proposal.status = ProposalStatus::Closed;
        Ok(())
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn increment_calls(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, GatewayCall::Increment(..))).count()
    }

    /// Makes the next `get` fail with `error`.
    pub fn fail_next_get(&self, error: GatewayError) {
        if let Ok(mut slot) = self.fail_next_get.lock() {
            *slot = Some(error);
        }
    }

    /// Makes the next `increment_tally` fail with `error` without touching the tally.
    pub fn fail_next_increment(&self, error: GatewayError) {
        if let Ok(mut slot) = self.fail_next_increment.lock() {
            *slot = Some(error);
        }
    }

    fn record(&self, call: GatewayCall) -> Result<(), GatewayError> {
        self.calls.lock().map_err(poisoned)?.push(call);
        Ok(())
    }
}

impl ProposalGateway for MemoryGateway {
    async fn get(&self, id: &ProposalId) -> Result<Proposal, GatewayError> {
        self.record(GatewayCall::Get(id.clone()))?;
        if let Some(error) = self.fail_next_get.lock().map_err(poisoned)?.take() {
            return Err(error);
        }
        self.proposals.lock().map_err(poisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }

    async fn increment_tally(
        &self,
        id: &ProposalId,
        option: VoteOption,
        amount: u64,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::Increment(id.clone(), option, amount))?;
        if let Some(error) = self.fail_next_increment.lock().map_err(poisoned)?.take() {
            return Err(error);
        }
        let mut proposals = self.proposals.lock().map_err(poisoned)?;
        let proposal = proposals.get_mut(id).ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        if !proposal.is_open() {
            return Err(GatewayError::Closed(id.clone()));
        }
        proposal.tally.add(option, amount);
        Ok(())
    }
}
