#![allow(dead_code)]

use patchline_model::{City, ContentStore, LocationTable, Post, Service, Slug, State};
use patchline_server::{build_router, AppState, Mailer, SiteConfig};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub fn slug(s: &str) -> Slug {
    Slug::parse(s).expect("slug")
}

pub fn fixture_store() -> ContentStore {
    let city = City {
        name: "Frederick".to_string(),
        description: "HQ city".to_string(),
        population: 78_171,
        response_time: "Same-day service".to_string(),
        headquarters: true,
        emergency_service: true,
        neighborhoods: vec!["Baker Park".to_string()],
        specialties: vec!["Historic plaster restoration".to_string()],
        zip_codes: vec!["21701".to_string()],
    };
    let state = State {
        slug: slug("maryland"),
        name: "Maryland".to_string(),
        abbreviation: "MD".to_string(),
        description: "Home base.".to_string(),
        building_codes: "IRC 2021".to_string(),
        climate: "Humid summers.".to_string(),
        cities: vec![slug("frederick")],
    };
    let locations = LocationTable {
        states: vec![state],
        cities: BTreeMap::from([(slug("frederick"), city)]),
    };
    let services = vec![Service {
        slug: slug("drywall-repair"),
        name: "Drywall Repair".to_string(),
        description: "Holes and cracks patched.".to_string(),
        price_range: "$150 - $450".to_string(),
        timeline: "Same day to 1 day".to_string(),
    }];
    let posts = vec![Post {
        slug: slug("patch-or-replace"),
        title: "Patch or Replace?".to_string(),
        excerpt: "Rules of thumb.".to_string(),
        published: "2025-05-02".to_string(),
        body: vec!["Anything smaller than a dinner plate gets patched.".to_string()],
    }];
    ContentStore::from_parts(locations, services, posts).expect("fixture store")
}

pub fn fixture_config(recipients: &[&str]) -> SiteConfig {
    SiteConfig {
        mail_api_key: Some("re_test_key".to_string()),
        notify_recipients: recipients.iter().map(|r| (*r).to_string()).collect(),
        ..SiteConfig::default()
    }
}

pub fn app_state(
    store: ContentStore,
    cfg: SiteConfig,
    mailer: Option<Arc<dyn Mailer>>,
) -> AppState {
    AppState::new(Arc::new(store), Arc::new(cfg), mailer)
}

pub async fn serve(state: AppState) -> SocketAddr {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn send_raw(addr: SocketAddr, request: String) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

pub async fn get(addr: SocketAddr, path: &str) -> (u16, String, String) {
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    send_raw(addr, req).await
}

pub async fn post_json(addr: SocketAddr, path: &str, body: &str) -> (u16, String) {
    let req = format!(
        "POST {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let (status, _, body) = send_raw(addr, req).await;
    (status, body)
}
