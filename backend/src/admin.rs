use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use tracing::warn;

use crate::routes::AppState;

pub const ADMIN_HEADER: &str = "X-Admin-Token";

/// Request guard for proposal administration.
pub struct Admin;

/// Constant-time comparison. A missing expected token never matches.
pub fn token_matches(expected: Option<&str>, provided: Option<&str>) -> bool {
    match (expected, provided) {
        (Some(expected), Some(provided)) => {
            ring::constant_time::verify_slices_are_equal(expected.as_bytes(), provided.as_bytes()).is_ok()
        }
        _ => false,
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Admin {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(state) = req.rocket().state::<AppState>() else {
            return Outcome::Error((Status::InternalServerError, ()));
        };

        let provided = req.headers().get_one(ADMIN_HEADER);
        if token_matches(state.config.admin_token.as_deref(), provided) {
            Outcome::Success(Admin)
        } else {
            warn!("Rejected admin request to {}", req.uri());
            Outcome::Error((Status::Unauthorized, ()))
        }
    }
}
