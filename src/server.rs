use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{ApiFormatRequest, ApiFormatResponse};
use threadstorm::config::EngineConfig;
use threadstorm::{format_with_config, FormatError};

#[derive(Clone)]
struct AppState {
    config: Arc<EngineConfig>,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs) -> Result<(), String> {
    let (config, config_path) = EngineConfig::load(None)?;
    if let Some(path) = config_path.as_ref() {
        tracing::info!(path = %path.display(), "engine config loaded");
    }
    let state = AppState {
        config: Arc::new(config),
    };

    let web_root = args.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/format", post(format_handler))
        .nest_service("/", static_service)
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    tracing::info!(%addr, "threadstorm server listening");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| format!("failed to bind server: {}", err))?,
        app,
    )
    .await
    .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn format_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiFormatRequest>,
) -> Result<Json<ApiFormatResponse>, (StatusCode, String)> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(generate_request_id);

    let draft = request
        .into_draft()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;

    let storm = format_with_config(&draft, &state.config)
        .map_err(|err| (status_for(&err), err.to_string()))?;

    tracing::info!(
        request_id = %request_id,
        draft_id = %storm.draft_id,
        posts = storm.total_posts,
        score = storm.engagement_score,
        "draft formatted"
    );

    Ok(Json(ApiFormatResponse::from_threadstorm(storm, request_id)))
}

fn status_for(err: &FormatError) -> StatusCode {
    match err {
        FormatError::EmptyContent | FormatError::Configuration(_) => StatusCode::BAD_REQUEST,
        FormatError::PackingOverflow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
