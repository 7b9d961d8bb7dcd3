use super::*;
use serde_json::json;

#[test]
fn ok_envelope_serializes_without_optional_fields() {
    let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).expect("serialize");
    assert_eq!(value, json!({ "success": true, "data": [1, 2] }));
}

#[test]
fn failure_envelope_has_null_data_and_error() {
    let value = serde_json::to_value(ApiResponse::<u8>::failure("nope")).expect("serialize");
    assert_eq!(value, json!({ "success": false, "data": null, "error": "nope" }));
}

#[test]
fn into_data_returns_payload() {
    let resp: ApiResponse<String> =
        serde_json::from_value(json!({ "success": true, "data": "x", "message": "fine" })).expect("parse");
    assert_eq!(resp.into_data().expect("data"), "x");
}

#[test]
fn into_result_allows_null_payload() {
    let resp: ApiResponse<String> = serde_json::from_value(json!({ "success": true, "data": null })).expect("parse");
    assert_eq!(resp.into_result().expect("ok"), None);
}

#[test]
fn into_result_allows_missing_payload_key() {
    let resp: ApiResponse<String> = serde_json::from_value(json!({ "success": true })).expect("parse");
    assert_eq!(resp.into_result().expect("ok"), None);
}

#[test]
fn into_data_rejects_null_payload() {
    let resp = ApiResponse::<String>::ok_empty();
    assert_eq!(resp.into_data(), Err(EnvelopeError::MissingData));
}

#[test]
fn rejection_prefers_error_then_message() {
    let with_error: ApiResponse<u8> =
        serde_json::from_value(json!({ "success": false, "error": "bad", "message": "ignored" })).expect("parse");
    assert_eq!(with_error.into_result(), Err(EnvelopeError::Rejected("bad".to_owned())));

    let with_message = ApiResponse::<u8> { success: false, data: None, message: Some("msg".to_owned()), error: None };
    assert_eq!(with_message.into_result(), Err(EnvelopeError::Rejected("msg".to_owned())));

    let bare = ApiResponse::<u8> { success: false, data: None, message: None, error: None };
    assert_eq!(bare.into_result(), Err(EnvelopeError::Rejected("request failed".to_owned())));
}
