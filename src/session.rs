// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session token lifecycle: login through a pluggable provider, token
//! storage, claims decoding, and expiry checks.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{self, ApiClient};
use crate::config::{AuthMode, Config};
use crate::error::{ApiError, ApiResult, ClaimsError};
use crate::models::{AuthResponse, UserLogin};
use crate::store::{LocalStore, TOKEN_KEY};

/// Signature segment carried by tokens the mock provider issues.
pub const MOCK_SIGNATURE: &str = "mocksignature";
pub const MOCK_TOKEN_TTL_SECS: i64 = 3600;

/// Decoded token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry in epoch seconds.
    pub exp: i64,
}

impl SessionClaims {
    /// Valid only while `exp` is strictly after `now`.
    pub fn is_live_at(&self, now: i64) -> bool {
        self.exp > now
    }
}

/// Splits a `header.payload.signature` token and parses the payload.
///
/// Accepts both the standard and the URL-safe base64 alphabets, padded or not,
/// since locally minted and server-issued tokens differ on this.
pub fn decode_claims(token: &str) -> Result<SessionClaims, ClaimsError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClaimsError::Segments(parts.len()));
    }
    let payload = parts[1].trim_end_matches('=');
    let raw = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .map_err(|_| ClaimsError::Encoding)?;
    serde_json::from_slice(&raw).map_err(|e| ClaimsError::Payload(e.to_string()))
}

/// Builds an unsigned token for `claims` with the mock signature.
pub fn encode_mock_token(claims: &SessionClaims) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    // SessionClaims only holds strings and integers, serialization cannot fail
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap_or_default());
    format!("{}.{}.{}", header, payload, MOCK_SIGNATURE)
}

pub trait AuthProvider {
    fn login(&self, credentials: &UserLogin) -> ApiResult<AuthResponse>;
}

/// Offline provider that accepts a fixed roster of accounts.
pub struct MockAuthProvider {
    roster: Vec<(String, String)>,
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new([
            ("demo@example.com", "12345678"),
            ("testuser@example.com", "12345678"),
        ])
    }
}

impl MockAuthProvider {
    pub fn new<I, E, P>(roster: I) -> Self
    where
        I: IntoIterator<Item = (E, P)>,
        E: Into<String>,
        P: Into<String>,
    {
        Self {
            roster: roster
                .into_iter()
                .map(|(e, p)| (e.into(), p.into()))
                .collect(),
        }
    }
}

impl AuthProvider for MockAuthProvider {
    fn login(&self, credentials: &UserLogin) -> ApiResult<AuthResponse> {
        let known = self
            .roster
            .iter()
            .any(|(e, p)| *e == credentials.username && *p == credentials.password);
        if !known {
            return Err(ApiError::InvalidCredentials);
        }
        let email = credentials.username.clone();
        let claims = SessionClaims {
            sub: email.clone(),
            name: email.split('@').next().map(str::to_string),
            email: Some(email),
            role: Some("user".to_string()),
            exp: Utc::now().timestamp() + MOCK_TOKEN_TTL_SECS,
        };
        Ok(AuthResponse {
            access_token: encode_mock_token(&claims),
            token_type: "bearer".to_string(),
            expires_in: MOCK_TOKEN_TTL_SECS,
        })
    }
}

/// Provider that exchanges credentials with the backend.
pub struct RemoteAuthProvider {
    api: ApiClient,
}

impl RemoteAuthProvider {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl AuthProvider for RemoteAuthProvider {
    fn login(&self, credentials: &UserLogin) -> ApiResult<AuthResponse> {
        api::auth::login(&self.api, credentials)
    }
}

pub fn provider_for(cfg: &Config, api: &ApiClient) -> Box<dyn AuthProvider> {
    match cfg.auth_mode {
        AuthMode::Mock => Box::new(MockAuthProvider::default()),
        AuthMode::Remote => Box::new(RemoteAuthProvider::new(api.clone())),
    }
}

/// Explicit session context handed to every command that needs identity.
pub struct Session {
    store: LocalStore,
    provider: Box<dyn AuthProvider>,
}

impl Session {
    pub fn new(store: LocalStore, provider: Box<dyn AuthProvider>) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn login(&self, credentials: &UserLogin) -> ApiResult<AuthResponse> {
        let resp = self.provider.login(credentials)?;
        self.store.set_item(TOKEN_KEY, &resp.access_token)?;
        info!(user = %credentials.username, "session token stored");
        Ok(resp)
    }

    pub fn token(&self) -> Option<String> {
        match self.store.get_item(TOKEN_KEY) {
            Ok(t) => t.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read session token");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now().timestamp())
    }

    pub fn is_authenticated_at(&self, now: i64) -> bool {
        match self.user_info() {
            Some(claims) => claims.is_live_at(now),
            None => false,
        }
    }

    pub fn user_info(&self) -> Option<SessionClaims> {
        let token = self.token()?;
        match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "stored token is not decodable");
                None
            }
        }
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.store.remove_item(TOKEN_KEY)?;
        info!("session token cleared");
        Ok(())
    }
}
