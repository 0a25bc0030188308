use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse, GatewayError, ValidationError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Proposal not found")]
    NotFound,
    #[error("{0}")]
    Invalid(String),
    #[error("Proposal is closed for voting")]
    Closed,
    #[error("Admin token missing or invalid")]
    Unauthorized,
    #[error("{0}")]
    RateLimited(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound => Status::NotFound,
            ApiError::Invalid(_) => Status::BadRequest,
            ApiError::Closed => Status::Forbidden,
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::RateLimited(_) => Status::TooManyRequests,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::NotFound => ErrorCode::NotFound,
            ApiError::Invalid(_) => ErrorCode::InvalidInput,
            ApiError::Closed => ErrorCode::Closed,
            ApiError::Unauthorized => ErrorCode::Unauthorized,
            ApiError::RateLimited(_) => ErrorCode::RateLimited,
            ApiError::Internal(_) => ErrorCode::SystemError,
        }
    }

    /// Body sent to the client. Internal details stay in the log.
    pub fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Internal(_) => ErrorResponse::internal("An internal server error occurred."),
            other => ErrorResponse::new(other.code(), other.to_string()),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::NotFound(_) => ApiError::NotFound,
            GatewayError::Closed(_) => ApiError::Closed,
            GatewayError::Transport(msg) | GatewayError::Store(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Invalid(e.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        if let ApiError::Internal(detail) = &self {
            error!("{} {} failed: {}", req.method(), req.uri(), detail);
        }
        let status = self.status();
        rocket::Response::build_from(Json(self.body()).respond_to(req)?)
            .status(status)
            .ok()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;
