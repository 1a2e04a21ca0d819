//! Web layer for the subway line manager.
//!
//! Provides JSON endpoints for stations, lines and line sections.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
