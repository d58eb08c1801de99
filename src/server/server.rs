use anyhow::Result;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::state::*;
use crate::config::Config;
use crate::dashboard::{render_page, PageContent, PageOptions};
use crate::error::AnalyzerError;
use crate::report::{to_csv, CSV_FILE_NAME};

#[derive(Deserialize, Debug, Default)]
struct HomeQuery {
    #[serde(default)]
    pub sample: bool,
}

#[derive(Deserialize, Debug, Default)]
struct ReviewsBody {
    #[serde(default)]
    pub reviews: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct HealthStats {
    status: &'static str,
    uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn status_of(err: &AnalyzerError) -> StatusCode {
    if err.is_empty_input() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn home(
    Query(query): Query<HomeQuery>,
    State(word_cloud): State<SharedWordCloud>,
) -> Html<String> {
    let options = if query.sample {
        PageOptions::sample()
    } else {
        PageOptions::default()
    };
    Html(render_page(&options, PageContent::Empty, &word_cloud))
}

async fn analyze_page(State(state): State<ServerState>, Form(body): Form<ReviewsBody>) -> Response {
    let options = PageOptions::with_text(body.reviews.as_str());

    match state.analyzer.analyze(&body.reviews) {
        Ok(analysis) => Html(render_page(
            &options,
            PageContent::Report(&analysis),
            &state.word_cloud,
        ))
        .into_response(),
        Err(err) if err.is_empty_input() => Html(render_page(
            &options,
            PageContent::Warning(err.to_string()),
            &state.word_cloud,
        ))
        .into_response(),
        Err(err) => {
            error!("Analysis failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_page(
                    &options,
                    PageContent::Warning(err.to_string()),
                    &state.word_cloud,
                )),
            )
                .into_response()
        }
    }
}

async fn export_csv(State(analyzer): State<SharedAnalyzer>, Form(body): Form<ReviewsBody>) -> Response {
    let csv = analyzer
        .analyze(&body.reviews)
        .and_then(|analysis| to_csv(&analysis.results));

    match csv {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => {
            if !err.is_empty_input() {
                error!("CSV export failed: {}", err);
            }
            (status_of(&err), err.to_string()).into_response()
        }
    }
}

async fn analyze_api(State(analyzer): State<SharedAnalyzer>, Json(body): Json<ReviewsBody>) -> Response {
    match analyzer.analyze(&body.reviews) {
        Ok(analysis) => Json(analysis).into_response(),
        Err(err) => {
            if !err.is_empty_input() {
                error!("Analysis failed: {}", err);
            }
            (
                status_of(&err),
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn stats(State(state): State<ServerState>) -> Json<HealthStats> {
    Json(HealthStats {
        status: "ok",
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

pub fn make_app(state: ServerState) -> Router {
    let api_routes: Router = Router::new()
        .route("/analyze", post(analyze_api))
        .route("/stats", get(stats))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .route("/analyze", post(analyze_page))
        .route("/export.csv", post(export_csv))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}

pub async fn run_server(config: &Config) -> Result<()> {
    config.validate()?;

    let app = make_app(ServerState::from_config(config));
    let address = format!("{}:{}", config.server.host, config.server.port);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Review analyzer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
