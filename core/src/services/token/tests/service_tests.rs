//! Unit tests for token service

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use gk_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::value_objects::RoleSet;
use crate::errors::{DomainError, StoreError, TokenError};
use crate::repositories::{MemoryRevocationStore, RevocationStore};
use crate::services::token::{refresh_key, TokenService, TokenServiceConfig};

/// Store whose every call fails as if the backend were down
struct UnavailableStore;

#[async_trait]
impl RevocationStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable { attempts: 15 })
    }

    async fn set_with_expiry(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable { attempts: 15 })
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable { attempts: 15 })
    }
}

fn jwt_config() -> JwtConfig {
    JwtConfig::new("unit-test-secret")
}

fn service() -> TokenService<MemoryRevocationStore> {
    TokenService::new(MemoryRevocationStore::new(), &jwt_config()).unwrap()
}

fn token_error<T: std::fmt::Debug>(result: Result<T, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(err)) => err,
        other => panic!("expected token error, got {other:?}"),
    }
}

const MINUTE: Duration = Duration::from_secs(60);

#[test]
fn test_encode_decode_round_trip() {
    let service = service();
    let claims = service.access_claims("alice", RoleSet::from("user"));

    let token = service.encode(&claims).unwrap();
    assert_eq!(service.decode(&token).unwrap(), claims);
    assert_eq!(claims.aud, "gatekeeper:auth");
}

#[test]
fn test_decode_as_checks_kind() {
    let service = service();
    let refresh = service.encode(&service.refresh_claims("alice")).unwrap();

    assert_eq!(
        token_error(service.decode_as(&refresh, TokenKind::Access)),
        TokenError::WrongTokenKind {
            expected: TokenKind::Access
        }
    );
    assert!(service.decode_as(&refresh, TokenKind::Refresh).is_ok());
}

#[test]
fn test_access_token_without_role_is_structurally_invalid() {
    let service = service();
    let claims = Claims {
        role: None,
        ..service.access_claims("alice", RoleSet::from("user"))
    };
    let token = service.encode(&claims).unwrap();

    // signature and expiry are fine
    assert!(service.decode(&token).is_ok());
    assert_eq!(
        token_error(service.decode_as(&token, TokenKind::Access)),
        TokenError::MissingClaim { claim: "role" }
    );
}

#[test]
fn test_scalar_role_claim_is_accepted() {
    let service = service();
    let now = chrono::Utc::now().timestamp();
    let signer = crate::services::token::TokenSigner::new(
        b"unit-test-secret",
        jsonwebtoken::Algorithm::HS256,
        "gatekeeper:auth",
    )
    .unwrap();
    let token = signer
        .sign(&json!({
            "sub": "alice",
            "aud": "gatekeeper:auth",
            "iat": now,
            "exp": now + 60,
            "jti": "legacy",
            "typ": "access",
            "role": "admin",
        }))
        .unwrap();

    let claims = service.decode_as(&token, TokenKind::Access).unwrap();
    assert!(claims.roles().unwrap().contains("admin"));
}

fn sign_externally(payload: serde_json::Value) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &payload,
        &jsonwebtoken::EncodingKey::from_secret(b"unit-test-secret"),
    )
    .unwrap()
}

#[test]
fn test_minimal_external_token_is_accepted() {
    let service = service();
    let now = chrono::Utc::now().timestamp();
    let token = sign_externally(json!({
        "sub": "alice",
        "aud": "gatekeeper:auth",
        "iat": now,
        "exp": now + 600,
        "role": ["user"],
    }));

    let claims = service.decode(&token).unwrap();
    assert_eq!(claims.typ, None);
    assert!(claims.jti.is_empty());

    let claims = service.decode_as(&token, TokenKind::Access).unwrap();
    assert_eq!(claims.sub, "alice");
    assert!(claims.roles().unwrap().contains("user"));
}

#[test]
fn test_untyped_token_uses_declared_kind() {
    let service = service();
    let now = chrono::Utc::now().timestamp();
    let token = sign_externally(json!({
        "sub": "alice",
        "aud": "gatekeeper:auth",
        "iat": now,
        "exp": now + 600,
    }));

    // without a role it can only serve as a refresh token
    assert!(service.decode_as(&token, TokenKind::Refresh).is_ok());
    assert_eq!(
        token_error(service.decode_as(&token, TokenKind::Access)),
        TokenError::MissingClaim { claim: "role" }
    );
}

#[test]
fn test_present_type_must_match_declared_kind() {
    let service = service();
    let now = chrono::Utc::now().timestamp();
    let token = sign_externally(json!({
        "sub": "alice",
        "aud": "gatekeeper:auth",
        "iat": now,
        "exp": now + 600,
        "typ": "refresh",
        "role": ["user"],
    }));

    assert_eq!(
        token_error(service.decode_as(&token, TokenKind::Access)),
        TokenError::WrongTokenKind {
            expected: TokenKind::Access
        }
    );
}

#[test]
fn test_blank_subject_rejected() {
    let service = service();
    let token = service.encode(&service.refresh_claims("  ")).unwrap();

    assert_eq!(
        token_error(service.decode_as(&token, TokenKind::Refresh)),
        TokenError::MissingClaim { claim: "sub" }
    );
}

#[tokio::test]
async fn test_rotation_invalidates_previous_token() {
    let service = service();
    service.store_refresh("alice", "t1", MINUTE).await.unwrap();
    service.store_refresh("alice", "t2", MINUTE).await.unwrap();

    assert!(!service.validate_refresh("t1", "alice").await.unwrap());
    assert!(service.validate_refresh("t2", "alice").await.unwrap());
}

#[tokio::test]
async fn test_revoke_invalidates_every_token() {
    let service = service();
    service.store_refresh("alice", "t1", MINUTE).await.unwrap();
    service.revoke_refresh("alice").await.unwrap();

    assert!(!service.validate_refresh("t1", "alice").await.unwrap());
    // revoking again is harmless
    service.revoke_refresh("alice").await.unwrap();
}

#[tokio::test]
async fn test_records_are_per_identity() {
    let service = service();
    service.store_refresh("alice", "shared", MINUTE).await.unwrap();

    assert!(!service.validate_refresh("shared", "bob").await.unwrap());
    assert_eq!(
        service.store().get(&refresh_key("alice")).await.unwrap().as_deref(),
        Some("shared")
    );
}

#[tokio::test]
async fn test_store_outage_is_an_error_not_a_verdict() {
    let service = TokenService::new(UnavailableStore, &jwt_config()).unwrap();

    let result = service.validate_refresh("t1", "alice").await;
    assert!(matches!(
        result,
        Err(DomainError::Store(StoreError::Unavailable { .. }))
    ));
}

#[tokio::test]
async fn test_issue_tokens_records_refresh_token() {
    let service = service();
    let pair = service.issue_tokens("alice", RoleSet::from("user")).await.unwrap();

    assert_eq!(pair.access_expires_in, 3600);
    assert_eq!(pair.refresh_expires_in, 86400);
    assert!(service.validate_refresh(&pair.refresh_token, "alice").await.unwrap());

    let access = service.decode_as(&pair.access_token, TokenKind::Access).unwrap();
    assert_eq!(access.sub, "alice");
}

#[tokio::test]
async fn test_issue_tokens_requires_roles() {
    let service = service();
    let result = service.issue_tokens("alice", RoleSet::new()).await;

    assert_eq!(token_error(result), TokenError::MissingClaim { claim: "role" });
    assert!(service.store().is_empty().await);
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_replay() {
    let service = service();
    let first = service.issue_tokens("alice", RoleSet::from("user")).await.unwrap();

    let second = service
        .refresh_tokens(&first.refresh_token, RoleSet::from("user"))
        .await
        .unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);

    let replay = service
        .refresh_tokens(&first.refresh_token, RoleSet::from("user"))
        .await;
    assert_eq!(token_error(replay), TokenError::RefreshTokenRevoked);

    assert!(service.validate_refresh(&second.refresh_token, "alice").await.unwrap());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let service = service();
    let pair = service.issue_tokens("alice", RoleSet::from("user")).await.unwrap();

    let result = service.refresh_tokens(&pair.access_token, RoleSet::from("user")).await;
    assert_eq!(
        token_error(result),
        TokenError::WrongTokenKind {
            expected: TokenKind::Refresh
        }
    );
}

#[test]
fn test_config_rejects_unknown_algorithms() {
    let mut config = jwt_config();
    config.algorithm = "RS256".to_string();
    assert!(matches!(
        TokenServiceConfig::from_jwt(&config),
        Err(DomainError::Token(TokenError::UnsupportedAlgorithm { .. }))
    ));

    config.algorithm = "rot13".to_string();
    assert!(TokenServiceConfig::from_jwt(&config).is_err());

    config.algorithm = "HS512".to_string();
    assert!(TokenServiceConfig::from_jwt(&config).is_ok());
}

#[test]
fn test_refresh_record_ttl_matches_lifetime() {
    let config = TokenServiceConfig::from_jwt(&jwt_config()).unwrap();
    assert_eq!(config.refresh_record_ttl(), Duration::from_secs(86400));
}
