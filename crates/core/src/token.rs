//! JWT claim decoding and expiry checks
//!
//! Tokens are never verified here. The server owns signatures; the client
//! only reads the payload segment to learn the role and the expiry time.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Standard alphabet with optional padding, applied after the URL-safe
/// characters have been mapped back.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Role carried in the `role` claim
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Member,
    Librarian,
    /// Any role this client has no special handling for
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Member => "member",
            Self::Librarian => "librarian",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "member" => Self::Member,
            "librarian" => Self::Librarian,
            _ => Self::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded token payload. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiry in seconds since the epoch
    #[serde(default)]
    pub exp: Option<f64>,
    /// Anything other than a string reads as no role
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
}

fn lenient_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Role>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(role) => Some(Role::from(role)),
        _ => None,
    })
}

impl Claims {
    /// Expiry as a timestamp, if the claim is present and representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        let millis = (exp * 1000.0).round();
        if !millis.is_finite() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        Utc.timestamp_millis_opt(millis as i64).single()
    }

    /// Whether `exp` lies before `now`. Claims without `exp` never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        self.exp.is_some_and(|exp| exp < now_secs)
    }

    /// Whether the role claim equals `role`
    pub fn has_role(&self, role: &Role) -> bool {
        self.role.as_ref() == Some(role)
    }
}

/// Decode the claims segment of `token`.
///
/// Returns `None` for anything malformed: a missing segment, bad base64,
/// non-UTF-8 bytes, or JSON that is not a claims object.
pub fn decode(token: &str) -> Option<Claims> {
    let Some(segment) = token.split('.').nth(1) else {
        tracing::debug!("Token has no claims segment");
        return None;
    };

    let normalized = segment.replace('-', "+").replace('_', "/");
    let bytes = match PAYLOAD_ENGINE.decode(normalized.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Error decoding token payload");
            return None;
        }
    };

    match serde_json::from_slice::<Claims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::warn!(error = %e, "Error parsing token claims");
            None
        }
    }
}

/// Whether `token` is expired at `now`. Undecodable tokens are expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    decode(token).is_none_or(|claims| claims.is_expired_at(now))
}

/// Whether `token` is expired right now
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Duration;
    use serde_json::json;

    /// Build an unsigned token around the given payload
    pub(crate) fn token_with_payload(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    /// Token for `role` that expires `offset_secs` from now
    pub(crate) fn token_expiring_in(offset_secs: i64, role: &str) -> String {
        let exp = (Utc::now() + Duration::seconds(offset_secs)).timestamp();
        token_with_payload(&json!({ "user_id": 7, "role": role, "exp": exp }))
    }

    #[test]
    fn test_decode_well_formed_token() {
        let token = token_expiring_in(3600, "librarian");
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, Some(Role::Librarian));
        assert!(claims.exp.is_some());
    }

    #[test]
    fn test_decode_keeps_unknown_roles() {
        let token = token_expiring_in(3600, "archivist");
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, Some(Role::Other("archivist".to_string())));
        assert_eq!(claims.role.unwrap().to_string(), "archivist");
    }

    #[test]
    fn test_decode_maps_url_safe_alphabet() {
        // '?' and '>' force '_' and '-' into the url-safe encoding
        let payload = json!({ "exp": 4_102_444_800_i64, "role": "member", "note": "??>>" });
        let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
        assert!(encoded.contains('_') && encoded.contains('-'));

        let claims = decode(&format!("header.{encoded}.sig")).unwrap();
        assert_eq!(claims.role, Some(Role::Member));
    }

    #[test]
    fn test_decode_accepts_padded_payload() {
        let padded =
            base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":1,"role":"member"}"#);
        assert!(padded.ends_with('='));
        assert!(decode(&format!("header.{padded}.sig")).is_some());
    }

    #[test]
    fn test_decode_two_segment_token() {
        let body = URL_SAFE_NO_PAD.encode(r#"{"exp":1,"role":"member"}"#);
        assert!(decode(&format!("header.{body}")).is_some());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        let not_json = URL_SAFE_NO_PAD.encode("not json");
        let not_object = URL_SAFE_NO_PAD.encode("[1,2,3]");
        let bad_exp = URL_SAFE_NO_PAD.encode(r#"{"exp":"tomorrow"}"#);

        for token in [
            String::new(),
            "no-dots-at-all".to_string(),
            "header.!!!not-base64!!!.sig".to_string(),
            format!("header.{not_json}.sig"),
            format!("header.{not_object}.sig"),
            format!("header.{bad_exp}.sig"),
        ] {
            assert_eq!(decode(&token), None, "expected None for {token:?}");
            assert!(is_expired(&token), "expected expired for {token:?}");
        }
    }

    #[test]
    fn test_future_expiry_is_not_expired() {
        assert!(!is_expired(&token_expiring_in(60, "member")));
        assert!(!is_expired(&token_expiring_in(86_400, "librarian")));
    }

    #[test]
    fn test_past_expiry_is_expired() {
        assert!(is_expired(&token_expiring_in(-10, "member")));
        assert!(is_expired(&token_expiring_in(-86_400, "librarian")));
    }

    #[test]
    fn test_expiry_boundary_uses_strict_comparison() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = token_with_payload(&json!({ "exp": 1_700_000_000, "role": "member" }));
        assert!(!is_expired_at(&token, now));
        assert!(is_expired_at(&token, now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_missing_exp_never_expires() {
        let token = token_with_payload(&json!({ "role": "member", "user_id": 1 }));
        let claims = decode(&token).unwrap();
        assert_eq!(claims.exp, None);
        assert!(!is_expired(&token));
    }

    #[test]
    fn test_non_string_role_is_ignored() {
        let token = token_with_payload(&json!({ "exp": 4_102_444_800_i64, "role": 5 }));
        let claims = decode(&token).unwrap();
        assert_eq!(claims.role, None);
        assert!(!is_expired(&token));

        let token = token_with_payload(&json!({ "exp": 4_102_444_800_i64, "role": null }));
        assert_eq!(decode(&token).unwrap().role, None);
    }

    #[test]
    fn test_expires_at() {
        let claims = Claims {
            exp: Some(1_700_000_000.5),
            role: None,
        };
        let at = claims.expires_at().unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
        assert_eq!(at.timestamp_subsec_millis(), 500);

        let no_exp = Claims {
            exp: None,
            role: None,
        };
        assert_eq!(no_exp.expires_at(), None);
    }

    #[test]
    fn test_role_round_trips_through_strings() {
        assert_eq!(Role::from("member"), Role::Member);
        assert_eq!(String::from(Role::Librarian), "librarian");
        assert!(
            Claims {
                exp: None,
                role: Some(Role::Librarian)
            }
            .has_role(&Role::Librarian)
        );
    }
}
