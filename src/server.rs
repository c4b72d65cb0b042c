use axum::{
    extract::State,
    http::StatusCode,
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
use tracing::{info, warn};

use crate::api::{AnalysisEntry, ApiAnalyzeRequest, ApiAnalyzeResponse, ApiError, ApiHealthResponse};
use post_score::{validate_content, ContentAnalyzer};

#[derive(Clone)]
struct AppState {
    analyzer: Arc<ContentAnalyzer>,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub async fn serve(args: crate::ServeArgs, analyzer: ContentAnalyzer) -> anyhow::Result<()> {
    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<ApiHealthResponse> {
    let config = state.analyzer.config();
    let provider = state.analyzer.provider();
    Json(ApiHealthResponse {
        status: "ok",
        provider: provider.name(),
        remote: provider.is_remote(),
        model: config.ai.model.clone(),
        image_max_size: config.image.max_size,
        image_supported_ext: config.image.supported_ext.clone(),
        min_word_count: config.analysis.min_word_count,
        max_word_count: config.analysis.max_word_count,
    })
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> ApiResult<ApiAnalyzeResponse> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(generate_request_id);
    let with_advice = request.advice.unwrap_or(false);
    let content = request.into_content().map_err(|err| api_error(StatusCode::BAD_REQUEST, err))?;

    let analyzer = &state.analyzer;
    let warnings = validate_content(&content, analyzer.config(), analyzer.image_analyzer());
    let result = analyzer.analyze(&content).await.map_err(|err| {
        warn!(request_id = %request_id, error = %err, "analysis failed");
        api_error(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    })?;

    let topics = analyzer.topics(&content).await;
    let advice = if with_advice {
        Some(analyzer.advise(&result).await)
    } else {
        None
    };

    Ok(Json(ApiAnalyzeResponse {
        request_id,
        entry: AnalysisEntry {
            result,
            topics,
            warnings,
            advice,
        },
    }))
}

fn api_error(status: StatusCode, error: String) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error }))
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
