//! notes-server library: router and shared state.
//!
//! The binary in `main.rs` wires these to a listener; integration tests
//! drive the router directly.

pub mod config;
pub mod error;
pub mod notes;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    routing::{get, post},
};
use notes_core::{NoteService, NoteStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub service: NoteService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn NoteStore>) -> Self {
        let service = NoteService::new(store, config.service_options());
        Self { config, service }
    }
}

/// Build the HTTP router
pub fn build_router(state: Arc<AppState>) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(state.config.allow_origin()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/api/notes", post(notes::create::handler))
        .route(
            "/api/notes/{view_id}",
            get(notes::fetch::handler).put(notes::update::handler),
        )
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
