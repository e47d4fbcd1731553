use gk_shared::errors::IntoErrorResponse;

use crate::domain::entities::token::TokenKind;
use crate::errors::{
    AuthError, AuthFailure, DomainError, FailureTarget, StatusClass, StoreError, TokenError,
};

#[test]
fn test_missing_token_codes_follow_kind() {
    let access = AuthFailure::missing_token(TokenKind::Access);
    assert_eq!(access.code, "MISSING_ACCESS_TOKEN");
    assert_eq!(access.message, "Access token is missing");
    assert_eq!(access.status, StatusClass::Unauthorized);
    assert_eq!(access.target, FailureTarget::Authentication);

    let refresh = AuthFailure::missing_token(TokenKind::Refresh);
    assert_eq!(refresh.code, "MISSING_REFRESH_TOKEN");
}

#[test]
fn test_expiry_and_audience_are_distinct() {
    let expired = AuthFailure::from_token_error(&TokenError::TokenExpired, TokenKind::Access);
    assert_eq!(expired.code, "TOKEN_EXPIRED");
    assert_eq!(expired.status.http_status(), 401);

    let audience = AuthFailure::from_token_error(&TokenError::InvalidAudience, TokenKind::Refresh);
    assert_eq!(audience.code, "INVALID_TOKEN_AUDIENCE");
    assert_ne!(expired.code, audience.code);
}

#[test]
fn test_structural_failures_by_kind() {
    let malformed = AuthFailure::from_token_error(&TokenError::MalformedToken, TokenKind::Refresh);
    assert_eq!(malformed.code, "INVALID_REFRESH_TOKEN");
    assert_eq!(malformed.message, "Invalid refresh token");

    let missing_role = AuthFailure::from_token_error(
        &TokenError::MissingClaim { claim: "role" },
        TokenKind::Access,
    );
    assert_eq!(missing_role.code, "INVALID_ACCESS_TOKEN_FORMAT");
    assert_eq!(missing_role.message, "Access token missing role information");

    let missing_sub = AuthFailure::from_token_error(
        &TokenError::MissingClaim { claim: "sub" },
        TokenKind::Refresh,
    );
    assert_eq!(missing_sub.code, "INVALID_REFRESH_TOKEN_FORMAT");
}

#[test]
fn test_decode_failure_does_not_leak_reason() {
    let failure = AuthFailure::from_token_error(
        &TokenError::DecodeFailure {
            reason: "ring::Unspecified".into(),
        },
        TokenKind::Access,
    );
    assert!(!failure.message.contains("ring"));
}

#[test]
fn test_insufficient_permissions_is_forbidden() {
    let failure = AuthFailure::from(&AuthError::InsufficientPermissions);
    assert_eq!(failure.status.http_status(), 403);
    assert_eq!(failure.code, "INSUFFICIENT_PERMISSIONS");
    assert_eq!(failure.target, FailureTarget::Role);
    assert!(!failure.is_unauthorized());
}

#[test]
fn test_store_outage_is_distinct_from_deny() {
    let failure: AuthFailure = DomainError::Store(StoreError::Unavailable { attempts: 15 }).into();
    assert_eq!(failure.status, StatusClass::ServiceUnavailable);
    assert_eq!(failure.code, "REVOCATION_STORE_UNAVAILABLE");
    assert_eq!(failure.target, FailureTarget::Store);
    assert!(failure.is_server_fault());
    assert!(!failure.message.contains("15"));
}

#[test]
fn test_encoding_failure_is_server_fault() {
    let failure: AuthFailure = DomainError::Token(TokenError::EncodingFailed).into();
    assert_eq!(failure.status, StatusClass::ServerFault);
    assert_eq!(failure.code, "TOKEN_ENCODING_ERROR");
}

#[test]
fn test_internal_errors_are_masked() {
    let failure: AuthFailure = DomainError::Internal {
        message: "pool exhausted at 10.0.0.4".into(),
    }
    .into();
    assert_eq!(failure.code, "INTERNAL_ERROR");
    assert_eq!(failure.message, "Internal server error");
}

#[test]
fn test_from_domain_respects_kind() {
    let error = DomainError::Token(TokenError::WrongTokenKind {
        expected: TokenKind::Refresh,
    });
    let failure = AuthFailure::from_domain(&error, TokenKind::Refresh);
    assert_eq!(failure.code, "INVALID_REFRESH_TOKEN");
}

#[test]
fn test_error_response_carries_code_and_target() {
    let response = AuthFailure::missing_token(TokenKind::Access).to_error_response();
    assert_eq!(response.error, "MISSING_ACCESS_TOKEN");
    assert_eq!(response.target.as_deref(), Some("authentication"));
}
