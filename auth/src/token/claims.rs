use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a session token.
///
/// Serialized with the RFC 7519 names (`sub`, `iat`, `exp`) and Unix-second
/// timestamps, so sub-second precision is dropped on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at
    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    /// Expiration time
    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl UserClaims {
    /// Create claims for `subject` valid for `lifetime` from `issued_at`.
    ///
    /// Returns `None` if the expiration overflows the representable range.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, lifetime: Duration) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;

        Some(Self {
            sub: subject.to_string(),
            issued_at,
            expires_at,
        })
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Check if the token is expired at `now`.
    ///
    /// A token is only valid strictly before its expiration instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// A freshly signed session token together with the claims it encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub claims: UserClaims,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_new_claims() {
        let claims = UserClaims::new("user123", at(1_000), Duration::hours(24)).unwrap();

        assert_eq!(claims.subject(), "user123");
        assert_eq!(claims.issued_at, at(1_000));
        assert_eq!(
            (claims.expires_at - claims.issued_at).num_seconds(),
            24 * 60 * 60
        );
    }

    #[test]
    fn test_new_claims_overflow() {
        assert!(UserClaims::new("user123", DateTime::<Utc>::MAX_UTC, Duration::hours(1)).is_none());
    }

    #[test]
    fn test_is_expired() {
        let claims = UserClaims::new("user123", at(0), Duration::seconds(1_000)).unwrap();

        assert!(!claims.is_expired(at(999)));
        assert!(claims.is_expired(at(1_000))); // Exactly at expiration
        assert!(claims.is_expired(at(1_001)));
    }

    #[test]
    fn test_wire_format() {
        let claims = UserClaims::new("42", at(1_700_000_000), Duration::seconds(3_600)).unwrap();

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "sub": "42", "iat": 1_700_000_000, "exp": 1_700_003_600 })
        );

        let decoded: UserClaims = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_missing_claim_rejected() {
        let result = serde_json::from_value::<UserClaims>(serde_json::json!({ "sub": "42", "iat": 1 }));
        assert!(result.is_err());
    }
}
