//! Request-scoped session carried in a signed cookie.
//!
//! The cookie value is `base64url(json) "." base64url(hmac_sha256(json_b64))`.
//! A cookie that fails verification or decoding is treated as an empty
//! session and removed on the next response.

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
    Warning,
    Info,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
            FlashLevel::Warning => "warning",
            FlashLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

impl SessionData {
    fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.user_fullname.is_none() && self.flashes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub fullname: String,
}

#[derive(Clone)]
pub struct SessionCodec {
    key: Vec<u8>,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> anyhow::Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).context("invalid session key")
    }

    pub fn encode(&self, data: &SessionData) -> anyhow::Result<String> {
        let json = serde_json::to_vec(data).context("failed to serialize session")?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    pub fn decode(&self, value: &str) -> Option<SessionData> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }
}

/// Per-request session state. Handlers mutate it and hand it back through
/// [`Session::into_jar`], which signs the new state into the response.
pub struct Session {
    data: SessionData,
    jar: CookieJar,
    codec: SessionCodec,
    secure: bool,
    had_cookie: bool,
}

impl Session {
    pub fn from_jar(jar: CookieJar, codec: SessionCodec, secure: bool) -> Self {
        let raw = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
        let data = match raw.as_deref() {
            Some(value) => codec.decode(value).unwrap_or_else(|| {
                tracing::warn!("discarding session cookie with invalid signature");
                SessionData::default()
            }),
            None => SessionData::default(),
        };

        Self {
            data,
            jar,
            codec,
            secure,
            had_cookie: raw.is_some(),
        }
    }

    pub fn user(&self) -> Option<CurrentUser> {
        Some(CurrentUser {
            id: self.data.user_id?,
            fullname: self.data.user_fullname.clone().unwrap_or_default(),
        })
    }

    pub fn login(&mut self, user_id: i64, fullname: &str) {
        self.data.user_id = Some(user_id);
        self.data.user_fullname = Some(fullname.to_string());
    }

    /// Drops every key, pending flashes included.
    pub fn clear(&mut self) {
        self.data = SessionData::default();
    }

    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.data.flashes.push(Flash {
            level,
            message: message.into(),
        });
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.data.flashes)
    }

    pub fn into_jar(self) -> CookieJar {
        if self.data.is_empty() {
            if !self.had_cookie {
                return self.jar;
            }
            let mut cookie = Cookie::from(SESSION_COOKIE);
            cookie.set_path("/");
            return self.jar.remove(cookie);
        }

        match self.codec.encode(&self.data) {
            Ok(value) => {
                let mut cookie = Cookie::new(SESSION_COOKIE, value);
                cookie.set_path("/");
                cookie.set_http_only(true);
                cookie.set_secure(self.secure);
                cookie.set_same_site(SameSite::Lax);
                self.jar.add(cookie)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to encode session");
                self.jar
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(Session::from_jar(
            jar,
            SessionCodec::new(&state.config.secret_key),
            state.config.cookie_secure,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SessionData {
        SessionData {
            user_id: Some(7),
            user_fullname: Some("Ελένη Γεωργίου".to_string()),
            flashes: vec![Flash {
                level: FlashLevel::Success,
                message: "Επιτυχής σύνδεση!".to_string(),
            }],
        }
    }

    #[test]
    fn test_signed_value_decodes() {
        let codec = SessionCodec::new("secret");
        let value = codec.encode(&sample()).unwrap();
        assert_eq!(codec.decode(&value), Some(sample()));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = SessionCodec::new("secret");
        let value = codec.encode(&sample()).unwrap();
        let (_, signature) = value.split_once('.').unwrap();

        let forged = SessionData {
            user_id: Some(1),
            ..sample()
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        assert!(codec.decode(&format!("{forged_payload}.{signature}")).is_none());
        assert!(codec.decode("garbage").is_none());
    }

    #[test]
    fn test_other_key_rejected() {
        let value = SessionCodec::new("secret").encode(&sample()).unwrap();
        assert!(SessionCodec::new("another").decode(&value).is_none());
    }

    #[test]
    fn test_flashes_are_drained_once() {
        let mut session = Session::from_jar(CookieJar::new(), SessionCodec::new("k"), false);
        session.flash(FlashLevel::Info, "one");
        session.flash(FlashLevel::Warning, "two");

        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[1].level, FlashLevel::Warning);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_clear_logs_out() {
        let mut session = Session::from_jar(CookieJar::new(), SessionCodec::new("k"), false);
        session.login(3, "Kostas");
        assert_eq!(session.user().map(|u| u.id), Some(3));

        session.clear();
        assert!(session.user().is_none());
        assert!(session.into_jar().get(SESSION_COOKIE).is_none());
    }

    #[test]
    fn test_round_trip_through_jar() {
        let codec = SessionCodec::new("k");
        let mut session = Session::from_jar(CookieJar::new(), codec.clone(), false);
        session.login(5, "Anna");
        let jar = session.into_jar();

        let restored = Session::from_jar(jar, codec, false);
        let user = restored.user().unwrap();
        assert_eq!(user.id, 5);
        assert_eq!(user.fullname, "Anna");
    }
}
