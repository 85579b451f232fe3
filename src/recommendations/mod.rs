mod dto;
pub mod engine;
pub mod handlers;
pub mod repo_types;
pub mod services;
pub mod store;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::recommendation_routes()
}
