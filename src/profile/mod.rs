mod dto;
pub mod handlers;
mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
