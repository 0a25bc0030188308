use rustrict::CensorStr;
use shared::{
    validate_argument, validate_proposal_request, validate_suggestion, Argument, ArgumentReaction,
    CreateProposalRequest, Proposal, ProposalId, Suggestion,
};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::rate_limiter::RateLimiter;
use crate::utils::rate_limit_key;
use crate::store::{counter, ProposalRow, SELECT_PROPOSAL};

#[derive(Debug, sqlx::FromRow)]
struct ArgumentRow {
    id: Uuid,
    proposal_id: String,
    text: String,
    up_votes: i64,
    down_votes: i64,
    created_at: OffsetDateTime,
}

impl From<ArgumentRow> for Argument {
    fn from(row: ArgumentRow) -> Self {
        Argument {
            id: row.id,
            proposal_id: ProposalId::new(row.proposal_id),
            text: row.text,
            up: counter(row.up_votes),
            down: counter(row.down_votes),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SuggestionRow {
    id: Uuid,
    text: String,
    created_at: OffsetDateTime,
}

impl From<SuggestionRow> for Suggestion {
    fn from(row: SuggestionRow) -> Self {
        Suggestion { id: row.id, text: row.text, created_at: row.created_at }
    }
}

const ARGUMENT_COLUMNS: &str = "id, proposal_id, text, up_votes, down_votes, created_at";

pub fn check_profanity(field: &str, text: &str) -> Result<(), ApiError> {
    if text.is_inappropriate() {
        return Err(ApiError::Invalid(format!("Possible profanity detected in {}", field)));
    }
    Ok(())
}

pub struct ProposalProcessor;

impl ProposalProcessor {
    /// Content checks first, then the caller's rate-limit window. A rejected
    /// suggestion does not use up the window.
    pub fn admit_suggestion<'t>(
        limiter: &RateLimiter,
        fingerprint: &str,
        text: &'t str,
    ) -> Result<&'t str, ApiError> {
        validate_suggestion(text)?;
        let text = text.trim();
        check_profanity("suggestion", text)?;
        limiter.check(&rate_limit_key("suggestion", fingerprint))?;
        Ok(text)
    }

    /// Same ordering for arguments. The per-proposal cap needs the database and
    /// is enforced by `add_argument`.
    pub fn admit_argument<'t>(
        limiter: &RateLimiter,
        id: &ProposalId,
        fingerprint: &str,
        text: &'t str,
    ) -> Result<&'t str, ApiError> {
        let text = text.trim();
        validate_argument(text, 0)?;
        check_profanity("argument", text)?;
        limiter.check(&rate_limit_key(&format!("argument:{}", id), fingerprint))?;
        Ok(text)
    }

    pub async fn list_proposals(pool: &PgPool) -> Result<Vec<Proposal>, ApiError> {
        let rows = sqlx::query_as::<_, ProposalRow>(&format!("{SELECT_PROPOSAL} ORDER BY created_at DESC"))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Proposal::from).collect())
    }

    pub async fn create_proposal(pool: &PgPool, request: &CreateProposalRequest) -> Result<Proposal, ApiError> {
        validate_proposal_request(request)?;
        let title = request.title.trim();
        check_profanity("title", title)?;

        let category = request.category.trim();
        check_profanity("category", category)?;

        let proposal = Proposal::new(ProposalId::generate(), title).with_category(category);
        sqlx::query("INSERT INTO proposals (id, title, category) VALUES ($1, $2, $3)")
            .bind(proposal.id.as_str())
            .bind(&proposal.title)
            .bind(&proposal.category)
            .execute(pool)
            .await?;

        info!("Created proposal {}", proposal.id);
        Ok(proposal)
    }

    pub async fn close_proposal(pool: &PgPool, id: &ProposalId) -> Result<Proposal, ApiError> {
        let row = sqlx::query_as::<_, ProposalRow>(
            "UPDATE proposals SET status = 'closed' WHERE id = $1
             RETURNING id, title, category, yes_votes, no_votes, blank_votes, status",
        )
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound)?;

        info!("Closed proposal {}", id);
        Ok(row.into())
    }

    pub async fn list_arguments(pool: &PgPool, id: &ProposalId) -> Result<Vec<Argument>, ApiError> {
        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM proposals WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(pool)
            .await?;
        if exists.is_none() {
            return Err(ApiError::NotFound);
        }

        let rows = sqlx::query_as::<_, ArgumentRow>(&format!(
            "SELECT {ARGUMENT_COLUMNS} FROM arguments WHERE proposal_id = $1 ORDER BY created_at"
        ))
        .bind(id.as_str())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Argument::from).collect())
    }

    /// The proposal row is locked while counting so the per-proposal cap holds
    /// under concurrent posts.
    pub async fn add_argument(
        pool: &PgPool,
        id: &ProposalId,
        text: &str,
        fingerprint: &str,
    ) -> Result<Argument, ApiError> {
        let mut tx = pool.begin().await?;

        let locked: Option<String> = sqlx::query_scalar("SELECT id FROM proposals WHERE id = $1 FOR UPDATE")
            .bind(id.as_str())
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(ApiError::NotFound);
        }

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM arguments WHERE proposal_id = $1")
            .bind(id.as_str())
            .fetch_one(&mut *tx)
            .await?;
        validate_argument(text, usize::try_from(existing).unwrap_or(usize::MAX))?;

        let row = sqlx::query_as::<_, ArgumentRow>(&format!(
            "INSERT INTO arguments (id, proposal_id, text, user_fingerprint) VALUES ($1, $2, $3, $4)
             RETURNING {ARGUMENT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(id.as_str())
        .bind(text)
        .bind(fingerprint)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    pub async fn react(pool: &PgPool, argument_id: Uuid, reaction: ArgumentReaction) -> Result<Argument, ApiError> {
        let column = match reaction {
            ArgumentReaction::Up => "up_votes",
            ArgumentReaction::Down => "down_votes",
        };
        let row = sqlx::query_as::<_, ArgumentRow>(&format!(
            "UPDATE arguments SET {column} = {column} + 1 WHERE id = $1 RETURNING {ARGUMENT_COLUMNS}"
        ))
        .bind(argument_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound)?;
        Ok(row.into())
    }

    pub async fn submit_suggestion(pool: &PgPool, text: &str, fingerprint: &str) -> Result<Suggestion, ApiError> {
        let row = sqlx::query_as::<_, SuggestionRow>(
            "INSERT INTO suggestions (id, text, user_fingerprint) VALUES ($1, $2, $3)
             RETURNING id, text, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(text)
        .bind(fingerprint)
        .fetch_one(pool)
        .await?;

        info!("Received suggestion {}", row.id);
        Ok(row.into())
    }

    pub async fn list_suggestions(pool: &PgPool) -> Result<Vec<Suggestion>, ApiError> {
        let rows = sqlx::query_as::<_, SuggestionRow>(
            "SELECT id, text, created_at FROM suggestions ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Suggestion::from).collect())
    }
}
