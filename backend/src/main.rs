use backend::{
    routes::{
        add_argument, all_options, close_proposal, create_proposal, get_proposal, increment_tally,
        list_arguments, list_proposals, list_suggestions, react_to_argument, submit_suggestion,
        trending_proposals, AppState,
    },
    config::Config,
    cors::CORS,
    catchers::{bad_request, forbidden, internal_error, not_found, too_many_requests, unauthorized, unprocessable},
};
use rocket::{routes, catchers, fs::NamedFile};
use shuttle_runtime::CustomError;
use sqlx::PgPool;
use tracing::info;
use include_dir::{include_dir, Dir};
use uuid::Uuid;

static STATIC_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

#[rocket::get("/<path..>", rank = 20)]
async fn spa_handler(path: std::path::PathBuf, static_root: &rocket::State<std::path::PathBuf>) -> Option<NamedFile> {
    let file_path = static_root.join(&path);
    if file_path.is_file() {
        NamedFile::open(&file_path).await.ok()
    } else {
        NamedFile::open(static_root.join("index.html")).await.ok()
    }
}

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secret_store: shuttle_runtime::SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    info!("Starting direct democracy server");

    let config = Config::from_secrets(&secret_store);

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(CustomError::new)?;

    info!("Migrations complete");

    let static_root = std::env::temp_dir().join(format!("direct_democracy_static_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&static_root).map_err(CustomError::new)?;
    STATIC_DIR.extract(&static_root).map_err(CustomError::new)?;

    let rocket = rocket::build()
        .attach(CORS)
        .manage(AppState::new(pool, config))
        .manage(static_root)
        .mount(
            "/api",
            routes![
                list_proposals,
                trending_proposals,
                get_proposal,
                increment_tally,
                create_proposal,
                close_proposal,
                list_arguments,
                add_argument,
                react_to_argument,
                submit_suggestion,
                list_suggestions,
                all_options
            ],
        )
        .mount("/", routes![spa_handler])
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                forbidden,
                not_found,
                unprocessable,
                too_many_requests,
                internal_error
            ],
        );

    Ok(rocket.into())
}
