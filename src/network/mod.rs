//! Network Layer
//!
//! HTTP+JSON API for the frontend. Handlers are thin: all game decisions
//! live in `game/`.

pub mod config;
pub mod protocol;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use protocol::{
    DailyWordResponse, ErrorResponse, GuessRequest, GuessResponse, NextResetResponse,
    UserStatsResponse,
};
pub use server::{create_router, ApiError, GameServer, GameServerError};
