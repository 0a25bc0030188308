//! Postgres side of the proposal gateway.
//!
//! Tally increments are a single `UPDATE ... SET col = col + $2`, so concurrent
//! sessions never lose each other's points.

use shared::{GatewayError, Proposal, ProposalGateway, ProposalId, ProposalStatus, Tally, VoteOption};
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
pub struct ProposalRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub yes_votes: i64,
    pub no_votes: i64,
    pub blank_votes: i64,
    pub status: ProposalStatus,
}

impl From<ProposalRow> for Proposal {
    fn from(row: ProposalRow) -> Self {
        Proposal {
            id: ProposalId::new(row.id),
            title: row.title,
            category: row.category,
            tally: Tally {
                yes: counter(row.yes_votes),
                no: counter(row.no_votes),
                blank: counter(row.blank_votes),
            },
            status: row.status,
        }
    }
}

/// Counters are CHECK-constrained to be non-negative.
pub fn counter(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub const SELECT_PROPOSAL: &str =
    "SELECT id, title, category, yes_votes, no_votes, blank_votes, status FROM proposals";

fn increment_sql(option: VoteOption) -> &'static str {
    match option {
        VoteOption::Yes => "UPDATE proposals SET yes_votes = yes_votes + $2 WHERE id = $1 AND status = 'open'",
        VoteOption::No => "UPDATE proposals SET no_votes = no_votes + $2 WHERE id = $1 AND status = 'open'",
        VoteOption::Blank => "UPDATE proposals SET blank_votes = blank_votes + $2 WHERE id = $1 AND status = 'open'",
    }
}

fn store_error(e: sqlx::Error) -> GatewayError {
    GatewayError::Store(e.to_string())
}

pub struct PgGateway<'a> {
    pool: &'a PgPool,
}

impl<'a> PgGateway<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl ProposalGateway for PgGateway<'_> {
    async fn get(&self, id: &ProposalId) -> Result<Proposal, GatewayError> {
        sqlx::query_as::<_, ProposalRow>(&format!("{SELECT_PROPOSAL} WHERE id = $1"))
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await
            .map_err(store_error)?
            .map(Proposal::from)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }

    async fn increment_tally(
        &self,
        id: &ProposalId,
        option: VoteOption,
        amount: u64,
    ) -> Result<(), GatewayError> {
        let amount = i64::try_from(amount)
            .map_err(|_| GatewayError::Store(format!("amount {amount} exceeds counter range")))?;

        let result = sqlx::query(increment_sql(option))
            .bind(id.as_str())
            .bind(amount)
            .execute(self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let status: Option<ProposalStatus> = sqlx::query_scalar("SELECT status FROM proposals WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await
            .map_err(store_error)?;

        Err(match status {
            None => GatewayError::NotFound(id.clone()),
            Some(_) => GatewayError::Closed(id.clone()),
        })
    }
}
