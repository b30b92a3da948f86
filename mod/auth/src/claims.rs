//! Unverified JWT payload decoding.
//!
//! The token format is `header.payload.signature`; only the payload is
//! read. **The signature is never verified** — this is not a security
//! control, purely a convenience for deciding what to render. The server
//! remains the authority for API access and rejects bad tokens there.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::AuthError;
use crate::model::{Claims, Session};

/// Decode the claims embedded in a bearer token.
///
/// Never panics on malformed input: a token without three segments, with
/// a payload that isn't base64url, or with claims that aren't valid JSON
/// yields [`AuthError::InvalidToken`].
pub fn decode_claims(token: &str) -> Result<Claims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::InvalidToken("missing payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::InvalidToken(format!("claims are not valid JSON: {e}")))
}

/// Decode a token into a [`Session`], or None if it doesn't parse.
pub fn session_for_token(token: &str) -> Option<Session> {
    decode_claims(token).ok().map(|c| Session::from_claims(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};

    /// Build a signed token the way the server would. The decoder must
    /// read it without knowing the key.
    fn signed_token(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn decodes_subject_and_roles() {
        let token = signed_token(serde_json::json!({
            "sub": "alice",
            "roles": ["ADMIN", "MANAGER"],
            "iat": 1700000000,
            "exp": 1700086400,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(
            claims.roles.as_deref(),
            Some(&["ADMIN".to_string(), "MANAGER".to_string()][..])
        );

        let session = session_for_token(&token).unwrap();
        assert_eq!(session.subject, "alice");
        assert_eq!(session.roles, vec![Role::Admin, Role::Manager]);
    }

    #[test]
    fn missing_roles_claim_is_none() {
        let token = signed_token(serde_json::json!({"sub": "bob"}));
        let claims = decode_claims(&token).unwrap();
        assert!(claims.roles.is_none());
    }

    #[test]
    fn malformed_tokens_fail_without_panicking() {
        for bad in ["", "justonechunk", "no.!!!.dots", "a.%%%.c", "a.b", "..."] {
            assert!(decode_claims(bad).is_err(), "expected failure for {bad:?}");
            assert!(session_for_token(bad).is_none());
        }
    }

    #[test]
    fn payload_with_invalid_json_fails() {
        let garbage = URL_SAFE_NO_PAD.encode(b"not json at all");
        let token = format!("eyJhbGciOiJIUzI1NiJ9.{garbage}.sig");
        assert!(decode_claims(&token).is_err());
    }

    #[test]
    fn signature_is_never_checked() {
        let token = signed_token(serde_json::json!({"sub": "eve", "roles": ["EMPLOYEE"]}));
        // Corrupt the signature segment; the payload must still decode.
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[2] = "tampered";
        let tampered = parts.join(".");

        let claims = decode_claims(&tampered).unwrap();
        assert_eq!(claims.sub, "eve");
    }
}
