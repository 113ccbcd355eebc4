use insta::assert_snapshot;

use skills_profile::SkpError;
use skills_profile::error::ErrorCode;
use skills_profile::forms::FormKind;
use skills_profile::review::{Decision, resolve_decision};

#[test]
fn test_error_nothing_selected() {
    assert_snapshot!(SkpError::NothingSelected.to_string(), @"Select at least one form to submit");
}

#[test]
fn test_error_validation_failed() {
    let err = SkpError::ValidationFailed {
        kind: FormKind::Certification,
        message: "cert_type is required".to_string(),
    };
    assert_snapshot!(err.to_string(), @"Invalid certification draft: cert_type is required");
}

#[test]
fn test_error_backend_rejected() {
    let err = SkpError::Backend {
        status: 422,
        body: "missing user_id".to_string(),
    };
    assert_snapshot!(err.to_string(), @"Backend returned HTTP 422: missing user_id");
}

#[test]
fn test_error_partial_submission() {
    let err = SkpError::SubmissionIncomplete {
        succeeded: 3,
        failed: 2,
    };
    assert_snapshot!(err.to_string(), @"Submitted 3 form(s), 2 failed");
}

#[test]
fn test_error_unknown_section() {
    let err = resolve_decision("badge", Decision::Approved, r#"{"id": 1}"#, None).unwrap_err();
    assert_snapshot!(err.to_string(), @"Unknown section type: badge");
}

#[test]
fn test_error_missing_record_id() {
    let err = resolve_decision("asset", Decision::Approved, r#"{"asset_desc": "x"}"#, None)
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"Invalid request data: no id found in request data");
}

#[test]
fn test_error_code_strings() {
    let codes: Vec<String> = ErrorCode::all()
        .map(|code| format!("{} {}", code.code_string(), code.category()))
        .collect();
    assert_snapshot!(codes.join("\n"), @r"
    E101 queue
    E102 queue
    E103 queue
    E201 review
    E202 review
    E301 config
    E302 config
    E501 network
    E502 network
    E601 backend
    E602 backend
    E603 backend
    E801 validation
    E901 internal
    E902 internal
    ");
}
