//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::digitraffic::DigitrafficError;
use crate::preferences::PreferenceError;
use crate::stations::{NO_SELECTION, ResolveError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Default number of station suggestions.
const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Upper bound on station suggestions.
const MAX_SEARCH_LIMIT: usize = 50;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/board", get(show_board))
        .route("/board/live", get(live_board))
        .route("/preferences/theme", post(toggle_theme))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the station picker.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let theme = state.preferences.theme().await;
    let directory = state.stations.current().await;

    // Every station in feed order, matching what resolution accepts
    let stations: Vec<StationOption> = directory.iter().map(StationOption::from_station).collect();

    let template = IndexTemplate {
        theme: theme_class(theme),
        theme_label: theme.icon().to_string(),
        placeholder: NO_SELECTION.to_string(),
        stations,
        refresh_secs: state.config().refresh_interval.as_secs(),
        is_mock: state.source.is_mock(),
    };
    let html = template.render()?;

    Ok(Html(html).into_response())
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT);
    let directory = state.stations.current().await;

    let stations = directory
        .suggest(&req.q, limit)
        .into_iter()
        .map(StationSearchResult::from_station)
        .collect();

    Json(StationSearchResponse { stations })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Show the board for a station and start refreshing it.
async fn show_board(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(req): Query<BoardRequest>,
) -> Response {
    let html = accepts_html(&headers);
    match load_board(&state, &req, html).await {
        Ok(response) => response,
        Err(e) if html => e.into_fragment(),
        Err(e) => e.into_response(),
    }
}

async fn load_board(state: &AppState, req: &BoardRequest, html: bool) -> Result<Response, AppError> {
    let directory = state.stations.current().await;
    let station = directory.resolve(&req.q, req.selected.as_deref())?.clone();

    let board = state.live.compute(&station.short_code).await?;
    info!(
        station = %station.short_code,
        upcoming = board.upcoming().count(),
        past = board.past().count(),
        "board computed"
    );

    let response = if html {
        let template = BoardTemplate {
            board: BoardView::from_board(&station, &board)
                .with_window_mins(state.config().window_mins),
        };
        Html(template.render()?).into_response()
    } else {
        Json(BoardResponse::from_board(&station, &board)).into_response()
    };

    state.live.watch(station, board).await;

    Ok(response)
}

/// Latest refreshed board for the watched station.
async fn live_board(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let snapshot = state.live.snapshot().await.ok_or_else(|| AppError::NotFound {
        message: "No station is being watched.".to_string(),
    })?;

    if accepts_html(&headers) {
        let template = BoardTemplate {
            board: BoardView::from_snapshot(&snapshot)
                .with_window_mins(state.config().window_mins),
        };
        Ok(Html(template.render()?).into_response())
    } else {
        Ok(Json(BoardResponse::from_snapshot(&snapshot)).into_response())
    }
}

/// Switch between light and dark theme.
async fn toggle_theme(State(state): State<AppState>) -> Result<Json<ThemeResponse>, AppError> {
    let theme = state.preferences.toggle_theme().await?;
    debug!(%theme, "theme changed");
    Ok(Json(ThemeResponse::from(theme)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    DataUnavailable { message: String },
    Internal { message: String },
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::DataUnavailable { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        }
    }

    fn log(&self) {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(%status, reason = message, "request failed");
        } else {
            warn!(%status, reason = message, "request rejected");
        }
    }

    /// Render as an HTML message fragment.
    fn into_fragment(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();
        let template = MessageTemplate {
            message: message.to_string(),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, message.to_string()).into_response(),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::EmptyQuery => AppError::BadRequest {
                message: "Please enter or choose a station.".to_string(),
            },
            ResolveError::NotFound(_) => AppError::NotFound {
                message: "Station not found.".to_string(),
            },
        }
    }
}

impl From<DigitrafficError> for AppError {
    fn from(e: DigitrafficError) -> Self {
        AppError::DataUnavailable {
            message: format!("Error fetching data: {e}"),
        }
    }
}

impl From<PreferenceError> for AppError {
    fn from(e: PreferenceError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();
        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}
