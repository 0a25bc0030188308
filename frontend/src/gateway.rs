use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    ErrorResponse, GatewayError, IncrementRequest, Proposal, ProposalGateway, ProposalId, Suggestion,
    SuggestionRequest, VoteOption,
};

use tracing::warn;

use crate::config::CONFIG;

/// Talks to the backend's `/proposal` endpoints.
#[derive(Clone, Copy, PartialEq)]
pub struct HttpGateway {
    base_url: &'static str,
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self { base_url: CONFIG.api_base_url }
    }
}

fn transport(e: gloo_net::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    warn!(status, url = %response.url(), "request failed");
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}

impl ProposalGateway for HttpGateway {
    async fn get(&self, id: &ProposalId) -> Result<Proposal, GatewayError> {
        let response = Request::get(&format!("{}/proposal/{}", self.base_url, id))
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            200 => response.json::<Proposal>().await
                .map_err(|e| GatewayError::Transport(format!("Failed to parse proposal: {}", e))),
            404 => Err(GatewayError::NotFound(id.clone())),
            _ => Err(GatewayError::Store(error_message(response).await)),
        }
    }

    async fn increment_tally(
        &self,
        id: &ProposalId,
        option: VoteOption,
        amount: u64,
    ) -> Result<(), GatewayError> {
        let response = Request::post(&format!("{}/proposal/{}/tally", self.base_url, id))
            .json(&IncrementRequest { option, amount })
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            200 | 204 => Ok(()),
            404 => Err(GatewayError::NotFound(id.clone())),
            403 => Err(GatewayError::Closed(id.clone())),
            _ => Err(GatewayError::Store(error_message(response).await)),
        }
    }
}

const ADMIN_HEADER: &str = "X-Admin-Token";

fn with_admin(request: Request, admin_token: Option<&str>) -> Request {
    match admin_token {
        Some(token) => request.header(ADMIN_HEADER, token),
        None => request,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    match response.status() {
        200 => response.json::<T>().await.map_err(|e| e.to_string()),
        401 => Err("Ugyldig administratornøkkel".into()),
        429 => Err("Du gjør dette for ofte. Prøv igjen senere.".into()),
        _ => Err(error_message(response).await),
    }
}

pub async fn fetch_json<T: DeserializeOwned>(path: &str, admin_token: Option<&str>) -> Result<T, String> {
    let request = with_admin(Request::get(&format!("{}{}", CONFIG.api_base_url, path)), admin_token);
    let response = request.send().await.map_err(|e| e.to_string())?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: Option<&B>,
    admin_token: Option<&str>,
) -> Result<T, String> {
    let request = with_admin(Request::post(&format!("{}{}", CONFIG.api_base_url, path)), admin_token);
    let request = match body {
        Some(body) => request.json(body).map_err(|e| e.to_string())?,
        None => request,
    };
    let response = request.send().await.map_err(|e| e.to_string())?;
    read_json(response).await
}

pub async fn post_empty<T: DeserializeOwned>(path: &str, admin_token: Option<&str>) -> Result<T, String> {
    post_json::<(), T>(path, None, admin_token).await
}

pub async fn submit_suggestion(text: String) -> Result<Suggestion, String> {
    post_json("/suggestion", Some(&SuggestionRequest { text }), None).await
}
