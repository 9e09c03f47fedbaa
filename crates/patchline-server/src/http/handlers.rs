use crate::leads::{submit_lead, Lead};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use patchline_model::{ContactSubmission, QuoteSubmission};
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    with_request_id((StatusCode::OK, "ok").into_response(), &request_id)
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let resp = if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    };
    with_request_id(resp, &request_id)
}

pub(crate) async fn sitemap_handler(State(state): State<AppState>) -> impl IntoResponse {
    let paths = patchline_sitemap::site_paths(&state.content);
    let xml = patchline_sitemap::render_xml(&state.site.public_base_url, &paths);
    let mut resp = Response::new(Body::from(xml));
    resp.headers_mut().insert(
        "content-type",
        HeaderValue::from_static("application/xml; charset=utf-8"),
    );
    resp
}

pub(crate) async fn contact_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ContactSubmission>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/api/contact", "lead received");
    let (status, body) = submit_lead(&state, Lead::Contact(payload)).await;
    with_request_id((status, body).into_response(), &request_id)
}

pub(crate) async fn quote_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<QuoteSubmission>,
) -> Response {
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/api/quote", "lead received");
    let (status, body) = submit_lead(&state, Lead::Quote(payload)).await;
    with_request_id((status, body).into_response(), &request_id)
}
