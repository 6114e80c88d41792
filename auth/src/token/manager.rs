use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::IssuedToken;
use super::claims::UserClaims;
use super::errors::TokenError;
use super::key::SecretKey;
use super::metadata::extract_presented_token;
use super::metadata::RequestMetadata;

/// Issues and verifies session tokens.
///
/// Tokens are compact JWTs signed with HS256 (HMAC with SHA-256). The manager
/// is immutable after construction, so a single instance can be shared across
/// threads without locking.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    token_duration: Duration,
}

impl TokenManager {
    /// Create a new token manager.
    ///
    /// # Arguments
    /// * `secret` - Key used to sign and verify tokens
    /// * `token_duration` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `InvalidInput` - Token duration is not positive
    pub fn new(secret: &SecretKey, token_duration: Duration) -> Result<Self, TokenError> {
        if token_duration <= Duration::zero() {
            return Err(TokenError::InvalidInput(
                "token duration must be positive".to_string(),
            ));
        }

        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        // Expiry is checked by `verify_at` against its own clock, without leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            validation,
            token_duration,
        })
    }

    pub fn token_duration(&self) -> Duration {
        self.token_duration
    }

    /// Issue a token for an already authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier (must not be blank)
    ///
    /// # Returns
    /// Signed token and the claims it carries
    ///
    /// # Errors
    /// * `InvalidInput` - Subject is empty
    /// * `Internal` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        if subject.trim().is_empty() {
            return Err(TokenError::InvalidInput(
                "subject must not be empty".to_string(),
            ));
        }

        let claims = UserClaims::new(subject, issued_at.trunc_subsecs(0), self.token_duration)
            .ok_or_else(|| TokenError::Internal("token expiration out of range".to_string()))?;

        let access_token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Internal(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            claims,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token is malformed or its signature does not match
    /// * `UnsupportedAlgorithm` - Token declares an algorithm other than HS256
    /// * `Expired` - Token expiration has passed
    pub fn verify(&self, token: &str) -> Result<UserClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub(crate) fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<UserClaims, TokenError> {
        // `jsonwebtoken` fails to parse headers naming algorithms it does not
        // support (`none` included), so the declared name is checked first.
        if let Some(alg) = declared_algorithm(token) {
            if !matches!(alg.parse::<Algorithm>(), Ok(algorithm) if algorithm == self.algorithm) {
                return Err(TokenError::UnsupportedAlgorithm);
            }
        }

        let token_data = decode::<UserClaims>(token, &self.decoding_key, &self.validation)
            .map_err(decoding_error)?;

        let claims = token_data.claims;
        if claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Extract the token presented in request metadata and verify it.
    ///
    /// # Errors
    /// * `Unauthenticated` - No usable authorization entry
    /// * Any error returned by [`TokenManager::verify`]
    pub fn verify_presented(&self, metadata: &RequestMetadata) -> Result<UserClaims, TokenError> {
        let token = extract_presented_token(metadata)?;
        self.verify(&token)
    }
}

#[derive(Deserialize)]
struct DeclaredHeader {
    alg: Option<String>,
}

/// Algorithm named by the token header, if the header is readable JSON.
fn declared_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    serde_json::from_slice::<DeclaredHeader>(&bytes).ok()?.alg
}

fn decoding_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnsupportedAlgorithm
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::InvalidSignature,
    }
}
