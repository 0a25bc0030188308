use crate::models::{CreateProposalRequest, IncrementRequest};

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CATEGORY_LENGTH: usize = 60;
pub const MAX_SUGGESTION_LENGTH: usize = 1000;
pub const MAX_ARGUMENT_WORDS: usize = 50;
pub const MAX_ARGUMENTS_PER_PROPOSAL: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Title exceeds maximum length of {MAX_TITLE_LENGTH}")]
    TitleTooLong,
    #[error("Category exceeds maximum length of {MAX_CATEGORY_LENGTH}")]
    CategoryTooLong,
    #[error("Suggestion must not be empty")]
    EmptySuggestion,
    #[error("Suggestion exceeds maximum length of {MAX_SUGGESTION_LENGTH}")]
    SuggestionTooLong,
    #[error("Argument must not be empty")]
    EmptyArgument,
    #[error("Argument has {0} words (maximum {MAX_ARGUMENT_WORDS})")]
    ArgumentTooLong(usize),
    #[error("A proposal can have at most {MAX_ARGUMENTS_PER_PROPOSAL} arguments")]
    TooManyArguments,
    #[error("Vote amount must be positive")]
    ZeroAmount,
    #[error("Vote amount {0} is out of range")]
    AmountOutOfRange(u64),
}

pub fn validate_proposal_request(request: &CreateProposalRequest) -> Result<(), ValidationError> {
    let title = request.title.trim();
    if title.is_empty() { return Err(ValidationError::EmptyTitle); }
    if title.chars().count() > MAX_TITLE_LENGTH { return Err(ValidationError::TitleTooLong); }
    if request.category.trim().chars().count() > MAX_CATEGORY_LENGTH { return Err(ValidationError::CategoryTooLong); }
    Ok(())
}

pub fn validate_suggestion(text: &str) -> Result<(), ValidationError> {
    let text = text.trim();
    if text.is_empty() { return Err(ValidationError::EmptySuggestion); }
    if text.chars().count() > MAX_SUGGESTION_LENGTH { return Err(ValidationError::SuggestionTooLong); }
    Ok(())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `existing` is the number of arguments already attached to the proposal.
pub fn validate_argument(text: &str, existing: usize) -> Result<(), ValidationError> {
    let words = word_count(text);
    if words == 0 { return Err(ValidationError::EmptyArgument); }
    if words > MAX_ARGUMENT_WORDS { return Err(ValidationError::ArgumentTooLong(words)); }
    if existing >= MAX_ARGUMENTS_PER_PROPOSAL { return Err(ValidationError::TooManyArguments); }
    Ok(())
}

/// Server-side guard on increments. Postgres counters are BIGINT.
pub fn validate_increment(request: &IncrementRequest) -> Result<(), ValidationError> {
    if request.amount == 0 { return Err(ValidationError::ZeroAmount); }
    if i64::try_from(request.amount).is_err() {
        return Err(ValidationError::AmountOutOfRange(request.amount));
    }
    Ok(())
}
