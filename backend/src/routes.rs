use rocket::{State, get, post, http::Status, serde::json::Json};
use tracing::{debug, info, instrument};
use sqlx::PgPool;
use shared::{
    tally_chart::trending, user_info::UserInfo, validate_increment, Argument, ArgumentRequest,
    CreateProposalRequest, IncrementRequest, Proposal, ProposalGateway, ProposalId, Suggestion,
    SuggestionRequest,
};
use crate::{
    admin::Admin,
    config::Config,
    error::{ApiError, ApiResult},
    processor::ProposalProcessor,
    rate_limiter::RateLimiter,
    store::PgGateway,
    utils::{parse_argument_id, parse_reaction, rate_limit_key},
};

const DEFAULT_TRENDING_LIMIT: usize = 5;
const MAX_TRENDING_LIMIT: usize = 50;

pub struct AppState {
    pub increment_limiter: RateLimiter,
    pub suggestion_limiter: RateLimiter,
    pub argument_limiter: RateLimiter,
    pub config: Config,
    pub db: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self {
            increment_limiter: RateLimiter::new(config.increment_limit_per_minute, 1),
            suggestion_limiter: RateLimiter::new(1, config.suggestion_window_minutes),
            argument_limiter: RateLimiter::new(1, config.argument_window_minutes),
            config,
            db: pool,
        }
    }
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[get("/proposals")]
pub async fn list_proposals(state: &State<AppState>) -> ApiResult<Vec<Proposal>> {
    ProposalProcessor::list_proposals(&state.db).await.map(Json)
}

#[get("/proposals/trending?<limit>")]
pub async fn trending_proposals(state: &State<AppState>, limit: Option<usize>) -> ApiResult<Vec<Proposal>> {
    let limit = limit.unwrap_or(DEFAULT_TRENDING_LIMIT).min(MAX_TRENDING_LIMIT);
    let proposals = ProposalProcessor::list_proposals(&state.db).await?;
    Ok(Json(trending(&proposals, limit).into_iter().cloned().collect()))
}

#[instrument(skip(state))]
#[get("/proposal/<id>")]
pub async fn get_proposal(state: &State<AppState>, id: &str) -> ApiResult<Proposal> {
    let proposal = PgGateway::new(&state.db).get(&ProposalId::from(id)).await?;
    Ok(Json(proposal))
}

#[instrument(skip(state, request, user_info), fields(option = %request.option, amount = request.amount))]
#[post("/proposal/<id>/tally", format = "json", data = "<request>")]
pub async fn increment_tally(
    state: &State<AppState>,
    id: &str,
    request: Json<IncrementRequest>,
    user_info: UserInfo,
) -> Result<Status, ApiError> {
    let request = request.into_inner();
    validate_increment(&request)?;
    state.increment_limiter.check(&rate_limit_key("increment", &user_info.fingerprint))?;

    PgGateway::new(&state.db)
        .increment_tally(&ProposalId::from(id), request.option, request.amount)
        .await?;

    debug!("Tally incremented");
    Ok(Status::NoContent)
}

#[instrument(skip(state, request, _admin))]
#[post("/proposal", format = "json", data = "<request>")]
pub async fn create_proposal(
    state: &State<AppState>,
    request: Json<CreateProposalRequest>,
    _admin: Admin,
) -> ApiResult<Proposal> {
    ProposalProcessor::create_proposal(&state.db, &request).await.map(Json)
}

#[instrument(skip(state, _admin))]
#[post("/proposal/<id>/close")]
pub async fn close_proposal(state: &State<AppState>, id: &str, _admin: Admin) -> ApiResult<Proposal> {
    ProposalProcessor::close_proposal(&state.db, &ProposalId::from(id)).await.map(Json)
}

#[get("/proposal/<id>/arguments")]
pub async fn list_arguments(state: &State<AppState>, id: &str) -> ApiResult<Vec<Argument>> {
    ProposalProcessor::list_arguments(&state.db, &ProposalId::from(id)).await.map(Json)
}

#[instrument(skip(state, request, user_info))]
#[post("/proposal/<id>/arguments", format = "json", data = "<request>")]
pub async fn add_argument(
    state: &State<AppState>,
    id: &str,
    request: Json<ArgumentRequest>,
    user_info: UserInfo,
) -> ApiResult<Argument> {
    let id = ProposalId::from(id);
    let text = ProposalProcessor::admit_argument(&state.argument_limiter, &id, &user_info.fingerprint, &request.text)?;
    ProposalProcessor::add_argument(&state.db, &id, text, &user_info.fingerprint)
        .await
        .map(Json)
}

#[instrument(skip(state))]
#[post("/argument/<id>/<reaction>")]
pub async fn react_to_argument(state: &State<AppState>, id: &str, reaction: &str) -> ApiResult<Argument> {
    let argument_id = parse_argument_id(id)?;
    let reaction = parse_reaction(reaction)?;
    ProposalProcessor::react(&state.db, argument_id, reaction).await.map(Json)
}

#[instrument(skip(state, request, user_info))]
#[post("/suggestion", format = "json", data = "<request>")]
pub async fn submit_suggestion(
    state: &State<AppState>,
    request: Json<SuggestionRequest>,
    user_info: UserInfo,
) -> ApiResult<Suggestion> {
    let text = ProposalProcessor::admit_suggestion(&state.suggestion_limiter, &user_info.fingerprint, &request.text)?;
    let suggestion = ProposalProcessor::submit_suggestion(&state.db, text, &user_info.fingerprint).await?;
    info!("Suggestion stored");
    Ok(Json(suggestion))
}

#[get("/suggestions")]
pub async fn list_suggestions(state: &State<AppState>, _admin: Admin) -> ApiResult<Vec<Suggestion>> {
    ProposalProcessor::list_suggestions(&state.db).await.map(Json)
}
