//! Domain route groups (files, sessions).

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn file_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/files/upload", API_PREFIX),
            post(handlers::upload::upload_files),
        )
        .route(
            &format!("{}/files/scan", API_PREFIX),
            post(handlers::scan::scan_files),
        )
        .route(
            &format!("{}/files/wipe", API_PREFIX),
            post(handlers::wipe::wipe_files),
        )
        .with_state(state)
}

pub fn session_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/sessions/{{sessionId}}", API_PREFIX),
            get(handlers::session::get_session).delete(handlers::session::purge_session),
        )
        .route(
            &format!("{}/sessions/{{sessionId}}/progress", API_PREFIX),
            get(handlers::session::get_progress),
        )
        .with_state(state)
}
