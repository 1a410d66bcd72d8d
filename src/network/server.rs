//! HTTP Game Server
//!
//! Axum server exposing the daily word game to the frontend.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/wordle/daily-word` | Game parameters (rotates the word if needed) |
//! | POST | `/api/wordle/guess` | Score a guess |
//! | GET | `/api/wordle/next-reset` | Seconds until the next word |
//! | GET | `/api/user/stats` | Placeholder player statistics |

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use crate::core::clock::{Clock, SystemClock};
use crate::core::rng::{derive_server_seed, seed_fingerprint, DeterministicRng};
use crate::game::round::{DailyRound, GuessError};
use crate::game::words::{load_word_pool, PoolOrigin};
use crate::network::config::ServerConfig;
use crate::network::protocol::{
    DailyWordResponse, ErrorResponse, GuessRequest, GuessResponse, HealthResponse,
    NextResetResponse, StatsQuery, UserStatsResponse,
};
use crate::{MAX_GUESSES, VERSION, WORD_LENGTH};

/// Game server errors.
#[derive(Debug, thiserror::Error)]
pub enum GameServerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    BindFailed(#[source] std::io::Error),

    /// Server loop failed.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Request errors returned to clients as `{"detail": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Guess failed validation.
    #[error(transparent)]
    Guess(#[from] GuessError),

    /// Guess body missing, not JSON, or `guess` not a string.
    #[error("Invalid guess length.")]
    MalformedGuess,

    /// Query string could not be parsed.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Guess(GuessError::InvalidLength { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Guess(GuessError::NotInDictionary { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedGuess => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    round: Arc<DailyRound>,
    reveal_word: bool,
}

/// Build the API router.
pub fn create_router(round: Arc<DailyRound>, config: &ServerConfig) -> Router {
    let state = AppState {
        round,
        reveal_word: config.reveal_word,
    };

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/wordle/daily-word", get(handle_daily_word))
        .route("/api/wordle/guess", post(handle_guess))
        .route("/api/wordle/next-reset", get(handle_next_reset))
        .route("/api/user/stats", get(handle_user_stats))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured frontends, with credentials.
///
/// Wildcards are not allowed together with credentials, so methods and
/// headers are mirrored from the preflight request instead.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

async fn handle_daily_word(State(state): State<AppState>) -> Json<DailyWordResponse> {
    let word = state.round.daily_word().await;
    Json(DailyWordResponse {
        word_length: WORD_LENGTH,
        max_guesses: MAX_GUESSES,
        word: state.reveal_word.then_some(word),
    })
}

async fn handle_guess(
    State(state): State<AppState>,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessResponse>, ApiError> {
    let guess = match body {
        Ok(Json(GuessRequest { guess: Some(guess) })) => guess,
        Ok(_) => return Err(ApiError::MalformedGuess),
        Err(rejection) => {
            warn!("Rejected guess body: {}", rejection);
            return Err(ApiError::MalformedGuess);
        }
    };

    let outcome = state.round.submit_guess(&guess).await?;
    Ok(Json(outcome.into()))
}

async fn handle_next_reset(State(state): State<AppState>) -> Json<NextResetResponse> {
    Json(NextResetResponse {
        time_remaining_seconds: state.round.seconds_until_reset(),
    })
}

async fn handle_user_stats(
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<UserStatsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    Ok(Json(UserStatsResponse::placeholder(query.user_id)))
}

// =============================================================================
// SERVER
// =============================================================================

/// The game server.
pub struct GameServer {
    /// Server configuration.
    config: ServerConfig,
    /// Daily round shared with handlers.
    round: Arc<DailyRound>,
}

impl GameServer {
    /// Create a server around an existing round manager.
    pub fn new(config: ServerConfig, round: Arc<DailyRound>) -> Self {
        Self { config, round }
    }

    /// Load the word list and seed the word picker from `config`.
    ///
    /// Blocks on file I/O; call before accepting requests.
    pub fn from_config(config: ServerConfig) -> Self {
        let loaded = load_word_pool(config.word_list_path.as_deref(), config.candidate_limit);
        match &loaded.origin {
            PoolOrigin::Dictionary(path) => info!("Word source: {}", path.display()),
            PoolOrigin::Fallback { reason } => warn!("Word source: fallback list ({})", reason),
        }
        info!(
            "Vocabulary: {} accepted guesses, {} daily candidates",
            loaded.pool.accepted_count(),
            loaded.pool.candidate_count()
        );

        let seed = config.rng_seed.unwrap_or_else(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            derive_server_seed(nanos, std::process::id())
        });
        info!("Word picker seed fingerprint: {}", seed_fingerprint(seed));

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let round = DailyRound::new(
            Arc::new(loaded.pool),
            Box::new(DeterministicRng::new(seed)),
            clock,
        );

        Self::new(config, Arc::new(round))
    }

    /// Router for this server.
    pub fn router(&self) -> Router {
        create_router(self.round.clone(), &self.config)
    }

    /// The shared round manager.
    pub fn round(&self) -> &Arc<DailyRound> {
        &self.round
    }

    /// Run the server until Ctrl-C.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), GameServerError> {
        let listener = TcpListener::bind(self.config.bind_addr)
            .await
            .map_err(GameServerError::BindFailed)?;
        info!("Game server listening on {}", self.config.bind_addr);
        info!("Allowed origins: {:?}", self.config.allowed_origins);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(GameServerError::Serve)?;

        info!("Game server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

// =============================================================================
// TESTS
// =============================================================================
