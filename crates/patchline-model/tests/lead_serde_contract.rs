use patchline_model::{ContactSubmission, QuoteSubmission};

#[test]
fn contact_payload_uses_camel_case_wire_names() {
    let body = r#"{
        "firstName": "Dana",
        "lastName": "Reyes",
        "email": "dana@example.com",
        "phone": "301-555-0142",
        "location": "Frederick, MD",
        "serviceType": "Water damage repair",
        "message": "Ceiling stain in the hallway."
    }"#;
    let parsed: ContactSubmission = serde_json::from_str(body).expect("contact payload");
    assert_eq!(parsed.first_name, "Dana");
    assert_eq!(parsed.service_type, "Water damage repair");
    assert_eq!(parsed.full_name(), "Dana Reyes");
}

#[test]
fn missing_fields_deserialize_to_empty_strings() {
    let parsed: ContactSubmission = serde_json::from_str(r#"{"firstName": "Dana"}"#).expect("sparse");
    assert_eq!(parsed.first_name, "Dana");
    assert_eq!(parsed.last_name, "");
    assert_eq!(parsed.email, "");
    assert_eq!(parsed.message, "");

    let parsed: QuoteSubmission = serde_json::from_str("{}").expect("empty object");
    assert_eq!(parsed.full_name(), "");
}

#[test]
fn unknown_fields_are_ignored() {
    let parsed: QuoteSubmission = serde_json::from_str(
        r#"{"firstName": "Lee", "unexpected": true, "service": "ceiling-repair"}"#,
    )
    .expect("extra fields tolerated");
    assert_eq!(parsed.first_name, "Lee");
    assert_eq!(parsed.service, "ceiling-repair");
}
