#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use patchline_model::ContentStore;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;

mod config;
mod http;
mod leads;
mod mailer;

pub const CRATE_NAME: &str = "patchline-server";

pub use config::{
    resolve_api_key, validate_startup_config_contract, SiteConfig, CONFIG_SCHEMA_VERSION,
    PLACEHOLDER_API_KEY,
};
pub use leads::{Lead, LeadResponse};
pub use mailer::{FakeMailer, HttpMailer, MailError, Mailer, OutboundEmail};

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
    pub site: Arc<SiteConfig>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub ready: Arc<AtomicBool>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(
        content: Arc<ContentStore>,
        site: Arc<SiteConfig>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            content,
            site,
            mailer,
            ready: Arc::new(AtomicBool::new(true)),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::pages::home_handler))
        .route("/services", get(http::pages::services_handler))
        .route("/services/:slug", get(http::pages::service_detail_handler))
        .route("/locations", get(http::pages::locations_handler))
        .route("/locations/:state", get(http::pages::state_handler))
        .route("/locations/:state/:city", get(http::pages::city_handler))
        .route("/blog", get(http::pages::blog_handler))
        .route("/blog/:slug", get(http::pages::post_handler))
        .route("/contact", get(http::pages::contact_page_handler))
        .route("/quote", get(http::pages::quote_page_handler))
        .route("/sitemap.xml", get(http::handlers::sitemap_handler))
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/api/contact", post(http::handlers::contact_submit_handler))
        .route("/api/quote", post(http::handlers::quote_submit_handler))
        .fallback(http::pages::not_found_handler)
        .layer(DefaultBodyLimit::max(state.site.max_body_bytes))
        .with_state(state)
}
