mod support;

use patchline_server::{FakeMailer, Mailer};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use support::{app_state, fixture_config, fixture_store, post_json, serve};

const CONTACT_BODY: &str = r#"{
    "firstName": "Dana",
    "lastName": "Reyes",
    "email": "dana@example.com",
    "phone": "301-555-0142",
    "location": "Frederick, MD",
    "serviceType": "Water Damage Repair",
    "message": "Ceiling stain in the hallway keeps growing."
}"#;

#[tokio::test]
async fn successful_contact_submission_sends_notification_then_confirmation() {
    let fake = Arc::new(FakeMailer::default());
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com", "owner@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/contact", CONTACT_BODY).await;
    assert_eq!(status, 200);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], true);
    assert!(envelope["data"]["id"]
        .as_str()
        .expect("provider id")
        .starts_with("fake-"));

    assert_eq!(fake.send_calls.load(Ordering::Relaxed), 2);
    let sent = fake.sent.lock().await;
    assert_eq!(sent.len(), 2);

    let notification = &sent[0];
    assert_eq!(
        notification.to,
        vec![
            "leads@patchlinedrywall.com".to_string(),
            "owner@patchlinedrywall.com".to_string()
        ]
    );
    assert_eq!(notification.reply_to.as_deref(), Some("dana@example.com"));
    assert_eq!(notification.subject, "New contact lead: Dana Reyes");
    assert!(notification.html.contains("Ceiling stain in the hallway"));

    let confirmation = &sent[1];
    assert_eq!(confirmation.to, vec!["dana@example.com".to_string()]);
    assert_eq!(confirmation.reply_to, None);
    assert!(confirmation.subject.contains("Thanks for contacting"));
}

#[tokio::test]
async fn quote_submission_uses_the_quote_templates() {
    let fake = Arc::new(FakeMailer::default());
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let body = r#"{
        "firstName": "Lee",
        "lastName": "Okafor",
        "email": "lee@example.com",
        "phone": "240-555-0188",
        "address": "14 Market St, Frederick MD 21701",
        "service": "Ceiling Repair",
        "description": "Bedroom ceiling sagging after a bathtub overflow."
    }"#;
    let (status, resp) = post_json(addr, "/api/quote", body).await;
    assert_eq!(status, 200);
    let envelope: serde_json::Value = serde_json::from_str(&resp).expect("envelope json");
    assert_eq!(envelope["success"], true);

    let sent = fake.sent.lock().await;
    assert_eq!(sent[0].subject, "New quote request: Lee Okafor");
    assert!(sent[0].html.contains("14 Market St, Frederick MD 21701"));
    assert!(sent[1].subject.contains("quote request"));
}

#[tokio::test]
async fn missing_credential_returns_503_without_provider_calls() {
    // Startup resolved the credential to "absent": no mailer is wired at all,
    // so no network I/O can happen.
    let state = app_state(fixture_store(), fixture_config(&["leads@x.com"]), None);
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/contact", CONTACT_BODY).await;
    assert_eq!(status, 503);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], false);
    assert!(envelope["message"]
        .as_str()
        .expect("message")
        .contains("(301) 555-0148"));
}

#[tokio::test]
async fn missing_recipients_return_500_before_any_send() {
    let fake = Arc::new(FakeMailer::default());
    let state = app_state(
        fixture_store(),
        fixture_config(&[]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/quote", "{}").await;
    assert_eq!(status, 500);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], false);
    assert_eq!(fake.send_calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn primary_send_failure_fails_the_request() {
    let fake = Arc::new(FakeMailer::failing_for("leads@patchlinedrywall.com"));
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/contact", CONTACT_BODY).await;
    assert_eq!(status, 500);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], false);
    // The confirmation is never attempted once the notification fails.
    assert_eq!(fake.send_calls.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn confirmation_failure_still_reports_success() {
    let fake = Arc::new(FakeMailer::failing_for("dana@example.com"));
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/contact", CONTACT_BODY).await;
    assert_eq!(status, 200);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], true);
    assert_eq!(fake.send_calls.load(Ordering::Relaxed), 2);
    // Only the notification actually went out.
    assert_eq!(fake.sent.lock().await.len(), 1);
}

#[tokio::test]
async fn submitted_html_is_escaped_in_the_notification() {
    let fake = Arc::new(FakeMailer::default());
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let body = r#"{
        "firstName": "<script>alert(1)</script>",
        "email": "mallory@example.com",
        "message": "tags like <img src=x onerror=alert(1)> should not survive"
    }"#;
    let (status, _) = post_json(addr, "/api/contact", body).await;
    assert_eq!(status, 200);

    let sent = fake.sent.lock().await;
    assert!(!sent[0].html.contains("<script>"));
    assert!(sent[0].html.contains("&lt;script&gt;"));
    assert!(!sent[0].html.contains("<img"));
}

#[tokio::test]
async fn empty_payload_still_notifies_staff_but_skips_confirmation() {
    let fake = Arc::new(FakeMailer::default());
    let state = app_state(
        fixture_store(),
        fixture_config(&["leads@patchlinedrywall.com"]),
        Some(fake.clone() as Arc<dyn Mailer>),
    );
    let addr = serve(state).await;

    let (status, body) = post_json(addr, "/api/contact", "{}").await;
    assert_eq!(status, 200);
    let envelope: serde_json::Value = serde_json::from_str(&body).expect("envelope json");
    assert_eq!(envelope["success"], true);

    // No submitter address, so only the staff notification goes out, with no
    // reply-to and a generic subject.
    assert_eq!(fake.send_calls.load(Ordering::Relaxed), 1);
    let sent = fake.sent.lock().await;
    assert_eq!(sent[0].reply_to, None);
    assert_eq!(sent[0].subject, "New contact lead: website visitor");
    assert!(!sent[0].html.contains("undefined"));
}
