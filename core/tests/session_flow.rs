//! End-to-end session scenario against the in-memory revocation store

use std::sync::Arc;

use gk_core::{
    AccessGuard, MemoryRevocationStore, RoleSet, SessionAuthenticator, StatusClass, TokenKind,
    TokenService,
};
use gk_shared::config::JwtConfig;

fn authenticator() -> SessionAuthenticator<MemoryRevocationStore> {
    let config = JwtConfig::new("session-flow-secret").with_access_expiry_minutes(15);
    let tokens = TokenService::new(MemoryRevocationStore::new(), &config).unwrap();
    SessionAuthenticator::new(Arc::new(tokens))
}

#[tokio::test]
async fn test_user_session_lifecycle() {
    let auth = authenticator();
    let user = RoleSet::from("user");

    // login as a plain user
    let t1 = auth.login("6a0b1f52-7f11-4d2e-9c55-0d7d0b3f9e21", user.clone()).await.unwrap();
    assert_eq!(t1.access_expires_in, 15 * 60);

    let claims = auth
        .authorize(Some(&t1.access_token), &AccessGuard::authenticated())
        .unwrap();
    assert!(claims.user_id().is_ok());

    // moderator-only operation is forbidden, not unauthorized
    let denied = auth
        .authorize(Some(&t1.access_token), &AccessGuard::moderator())
        .unwrap_err();
    assert_eq!(denied.status, StatusClass::Forbidden);

    // refresh rotates T1 into T2
    let t2 = auth.refresh(Some(&t1.refresh_token), user.clone()).await.unwrap();
    assert_ne!(t1.refresh_token, t2.refresh_token);

    // T1 can no longer be used
    let replay = auth.refresh(Some(&t1.refresh_token), user.clone()).await.unwrap_err();
    assert_eq!(replay.code, "INVALID_REFRESH_TOKEN");

    // T2 still works until logout
    assert!(auth.authenticate_refresh(Some(&t2.refresh_token)).await.is_ok());
    auth.logout(&claims.sub).await.unwrap();
    let after_logout = auth.authenticate_refresh(Some(&t2.refresh_token)).await.unwrap_err();
    assert_eq!(after_logout.code, "INVALID_REFRESH_TOKEN");

    // access tokens are stateless and survive logout until they expire
    assert!(auth.authenticate(Some(&t2.access_token), TokenKind::Access).is_ok());
}

#[tokio::test]
async fn test_tokens_from_another_deployment_are_rejected() {
    let ours = authenticator();
    let theirs = {
        let tokens =
            TokenService::new(MemoryRevocationStore::new(), &JwtConfig::new("someone-else"))
                .unwrap();
        SessionAuthenticator::new(Arc::new(tokens))
    };

    let foreign = theirs.login("alice", RoleSet::from("admin")).await.unwrap();
    let failure = ours
        .authorize(Some(&foreign.access_token), &AccessGuard::admin())
        .unwrap_err();
    assert_eq!(failure.code, "INVALID_ACCESS_TOKEN");
}
