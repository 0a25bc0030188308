use crate::error::ApiError;
use shared::ArgumentReaction;
use uuid::Uuid;

pub fn parse_argument_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::Invalid("Invalid argument ID".into()))
}

pub fn parse_reaction(reaction: &str) -> Result<ArgumentReaction, ApiError> {
    reaction.parse().map_err(ApiError::Invalid)
}

pub fn rate_limit_key(action: &str, fingerprint: &str) -> String {
    format!("{}:{}", action, fingerprint)
}
