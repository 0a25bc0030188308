use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{Request, Response};

use crate::admin::ADMIN_HEADER;

const DEV_ORIGINS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

/// Lets the dev server (trunk on another port) call the API. In production the
/// SPA is served from the same origin and no headers are added.
pub struct CORS;

pub fn is_allowed_origin(origin: &str) -> bool {
    DEV_ORIGINS.iter().any(|allowed| {
        origin
            .strip_prefix(allowed)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
    })
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info { name: "Dev CORS", kind: Kind::Response }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(origin) = req.headers().get_one("Origin") else { return };
        if !is_allowed_origin(origin) {
            return;
        }

        res.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
        res.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, OPTIONS"));
        res.set_header(Header::new("Access-Control-Allow-Headers", format!("Content-Type, {}", ADMIN_HEADER)));
        res.set_header(Header::new("Access-Control-Max-Age", "86400"));
    }
}
