use serde::{Serialize, Deserialize};

/// Caller identity as seen by the backend. Used as the rate limit key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub fingerprint: String,
    pub ip: String,
}

pub fn generate_fingerprint(ip: &str, user_agent: Option<&str>) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use sha2::{Sha256, Digest};

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    if let Some(ua) = user_agent {
        hasher.update(b"|");
        hasher.update(ua.as_bytes());
    }
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for UserInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = headers.get_one("X-Real-IP")
                .or_else(|| headers.get_one("X-Forwarded-For").and_then(|v| v.split(',').next()))
                .map(|ip| ip.trim().to_string())
                .or_else(|| req.client_ip().map(|ip| ip.to_string()))
                .unwrap_or_else(|| "0.0.0.0".to_string());

            let fingerprint = generate_fingerprint(&ip, headers.get_one("User-Agent"));

            Outcome::Success(UserInfo { fingerprint, ip })
        }
    }
}
