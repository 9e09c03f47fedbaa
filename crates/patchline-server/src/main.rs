#![forbid(unsafe_code)]

use patchline_model::ContentStore;
use patchline_server::{
    build_router, resolve_api_key, validate_startup_config_contract, AppState, HttpMailer, Mailer,
    SiteConfig,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_recipients() -> Vec<String> {
    ["PATCHLINE_NOTIFY_PRIMARY", "PATCHLINE_NOTIFY_SECONDARY"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("PATCHLINE_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env_string("PATCHLINE_BIND", "0.0.0.0:8080");
    let data_dir = PathBuf::from(env_string("PATCHLINE_DATA_DIR", "data"));

    let defaults = SiteConfig::default();
    let cfg = SiteConfig {
        public_base_url: env_string("PATCHLINE_PUBLIC_BASE_URL", &defaults.public_base_url),
        company_name: env_string("PATCHLINE_COMPANY_NAME", &defaults.company_name),
        company_phone: env_string("PATCHLINE_COMPANY_PHONE", &defaults.company_phone),
        mail_api_key: resolve_api_key(env::var("PATCHLINE_MAIL_API_KEY").ok()),
        mail_endpoint: env_string("PATCHLINE_MAIL_ENDPOINT", &defaults.mail_endpoint),
        mail_from: env_string("PATCHLINE_MAIL_FROM", &defaults.mail_from),
        notify_recipients: env_recipients(),
        mail_timeout: Duration::from_millis(env_u64("PATCHLINE_MAIL_TIMEOUT_MS", 10_000)),
        max_body_bytes: env_usize("PATCHLINE_MAX_BODY_BYTES", defaults.max_body_bytes),
        strict_startup: env_bool("PATCHLINE_STRICT_STARTUP", false),
    };
    validate_startup_config_contract(&cfg)?;

    let content = ContentStore::load_from_dir(&data_dir)
        .map_err(|e| format!("content tables failed to load: {e}"))?;
    info!(
        states = content.states().len(),
        services = content.services().len(),
        posts = content.posts().len(),
        "content tables loaded"
    );

    let mailer: Option<Arc<dyn Mailer>> = match &cfg.mail_api_key {
        Some(key) => Some(Arc::new(HttpMailer::new(
            cfg.mail_endpoint.clone(),
            key.clone(),
            cfg.mail_timeout,
        ))),
        None => {
            error!("mail provider credential missing or placeholder; lead forms will answer 503");
            None
        }
    };
    if cfg.mail_api_key.is_some() && cfg.notify_recipients.is_empty() {
        error!("no staff notification addresses configured; lead forms will answer 500");
    }

    let state = AppState::new(Arc::new(content), Arc::new(cfg), mailer);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("patchline-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
