//! Shared-secret token signer

use std::fmt;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{DomainError, TokenError};

/// Holds the signing secret; signs and verifies tokens
///
/// Verification checks the signature before any claim, then audience and
/// expiry with zero leeway.
#[derive(Clone)]
pub struct TokenSigner {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Creates a signer for `secret`
    ///
    /// # Arguments
    ///
    /// * `secret` - Shared HMAC secret; must not be empty
    /// * `algorithm` - One of HS256, HS384 or HS512
    /// * `audience` - Audience every verified token must carry
    pub fn new(secret: &[u8], algorithm: Algorithm, audience: &str) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Validation {
                message: "Signing secret must not be empty".to_string(),
            });
        }
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(TokenError::UnsupportedAlgorithm {
                name: format!("{:?}", algorithm),
            }
            .into());
        }

        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Serializes and signs `claims`
    pub fn sign<T: Serialize>(&self, claims: &T) -> Result<String, DomainError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key).map_err(|err| {
            tracing::error!(error = %err, "Failed to sign token");
            DomainError::Token(TokenError::EncodingFailed)
        })
    }

    /// Verifies `token` and deserializes its claims
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, DomainError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| DomainError::Token(classify(err)))
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &self.algorithm)
            .field("audience", &self.validation.aud)
            .finish_non_exhaustive()
    }
}

fn classify(error: JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidAudience => TokenError::InvalidAudience,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::MalformedToken,
        other => TokenError::DecodeFailure {
            reason: format!("{:?}", other),
        },
    }
}
