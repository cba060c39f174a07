//! Flatwiki - a minimal personal wiki backed by flat text files
//!
//! Pages live in `<data_dir>/<title>.txt` and are viewed, edited and saved
//! through `/view/{title}`, `/edit/{title}` and `/save/{title}`. `[Word]` in a
//! page body renders as a link to `/view/Word`.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod route;
pub mod services;
pub mod types;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};

// Re-export commonly used items
pub use components::{TemplateComponent, View};
pub use config::Config;
pub use errors::WikiError;
pub use services::{LinkRenderer, PageStore};
pub use types::{AppState, Page};

/// All wiki routes. Paths that do not match a title route exactly end up as 404.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_front_page))
        .route("/view/*title", get(handlers::handle_view))
        .route("/edit/*title", get(handlers::handle_edit))
        .route(
            "/save/*title",
            post(handlers::handle_save).fallback(handlers::handle_not_found),
        )
        .fallback(handlers::handle_not_found)
        .with_state(state)
}
