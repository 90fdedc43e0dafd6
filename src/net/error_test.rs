use super::*;

#[test]
fn parse_detail_reads_message_string() {
    assert_eq!(parse_detail(r#"{"detail":"Incorrect email or password"}"#).as_deref(), Some("Incorrect email or password"));
}

#[test]
fn parse_detail_joins_validation_entries() {
    let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},{"msg":"field required"}]}"#;
    assert_eq!(
        parse_detail(body).as_deref(),
        Some("value is not a valid email address; field required")
    );
}

#[test]
fn parse_detail_rejects_non_json_and_blank() {
    assert_eq!(parse_detail("<html>502 Bad Gateway</html>"), None);
    assert_eq!(parse_detail(r#"{"detail":"   "}"#), None);
    assert_eq!(parse_detail(r#"{"error":"nope"}"#), None);
}

#[test]
fn from_status_maps_auth_statuses() {
    let err = ApiError::from_status(401, r#"{"detail":"Invalid credentials"}"#);
    assert_eq!(err, ApiError::Unauthorized { status: 401, detail: Some("Invalid credentials".to_owned()) });
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(err.has_response());

    let err = ApiError::from_status(403, "");
    assert_eq!(err.to_string(), "invalid credentials");
}

#[test]
fn from_status_maps_other_statuses_to_server() {
    let err = ApiError::from_status(400, r#"{"detail":"Email already registered"}"#);
    assert_eq!(err.to_string(), "server error 400: Email already registered");
    assert_eq!(err.detail(), Some("Email already registered"));
    assert!(err.has_response());

    let err = ApiError::from_status(500, "Internal Server Error");
    assert_eq!(err.to_string(), "server error 500");
    assert!(!err.has_response());
}

#[test]
fn transport_failures_have_no_response() {
    assert!(!ApiError::Timeout.has_response());
    assert!(!ApiError::Network("connection refused".to_owned()).has_response());
    assert!(!ApiError::Decode("missing field".to_owned()).has_response());
}
