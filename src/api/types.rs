//! API request and response types.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{GateError, GateResult};

// ==================== Authentication ====================

/// Login request.
///
/// Decoding is lenient in the way common JSON decoders are: field names match
/// case-insensitively, the last occurrence of a field wins, missing fields and
/// a `null` body leave empty strings, and unknown fields are ignored.
#[derive(Debug, Default, PartialEq, Eq, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl LoginRequest {
    /// Decode the first JSON value of a request body.
    ///
    /// Bytes after the first complete value are not inspected.
    pub fn from_body(body: &[u8]) -> GateResult<Self> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<LoginRequest>()
            .next()
            .unwrap_or_else(|| Err(de::Error::custom("empty request body")))
            .map_err(|e| GateError::BadRequest(e.to_string()))
    }
}

#[derive(Clone, Copy)]
enum LoginField {
    Username,
    Password,
    Other,
}

impl LoginField {
    fn from_key(key: &str) -> Self {
        if key_matches(key, "username") {
            LoginField::Username
        } else if key_matches(key, "password") {
            LoginField::Password
        } else {
            LoginField::Other
        }
    }
}

/// Case-insensitive key comparison, folding the two non-ASCII characters
/// whose simple case fold is an ASCII letter (long s and the Kelvin sign).
fn key_matches(key: &str, name: &str) -> bool {
    let folded = key.chars().map(|c| match c {
        '\u{017F}' => 's',
        '\u{212A}' => 'k',
        c => c.to_ascii_lowercase(),
    });
    folded.eq(name.chars())
}

impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LoginRequestVisitor)
    }
}

struct LoginRequestVisitor;

impl<'de> Visitor<'de> for LoginRequestVisitor {
    type Value = LoginRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object with string fields `username` and `password`")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(LoginRequest::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut request = LoginRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            // A null value leaves the field as it was.
            match LoginField::from_key(&key) {
                LoginField::Username => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        request.username = value;
                    }
                }
                LoginField::Password => {
                    if let Some(value) = map.next_value::<Option<String>>()? {
                        request.password = value;
                    }
                }
                LoginField::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(request)
    }
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of entries in the credential store.
    pub users: usize,
    /// Timestamp.
    pub timestamp: String,
}
