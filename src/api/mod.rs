// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking HTTP clients for the finance assistant REST API.
//!
//! Every request is built through [`ApiClient::request`], which runs it past
//! [`augment`] so the client-identifier and bearer headers are applied in one
//! place.

pub mod auth;
pub mod chat;
pub mod finance;
pub mod upload;

use anyhow::Result;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::utils::http_client;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Endpoints that must never see a bearer token.
const PUBLIC_PATHS: [&str; 2] = ["auth/login", "auth/register"];

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            http: http_client(cfg.timeout)?,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            token: None,
        })
    }

    /// Same client, carrying `token` for protected calls.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let req = self.http.request(method, self.url(path));
        augment(req, path, &self.api_key, self.token.as_deref())
    }
}

/// True when a request to `path` should carry the bearer token.
pub fn sends_bearer(path: &str, token: Option<&str>) -> bool {
    let path = path.trim_start_matches('/');
    let public = PUBLIC_PATHS
        .iter()
        .any(|p| path == *p || path.starts_with(&format!("{}?", p)));
    matches!(token, Some(t) if !t.is_empty()) && !public
}

pub fn augment(
    req: RequestBuilder,
    path: &str,
    api_key: &str,
    token: Option<&str>,
) -> RequestBuilder {
    let req = req.header(API_KEY_HEADER, api_key);
    match token {
        Some(t) if sends_bearer(path, Some(t)) => req.header(AUTHORIZATION, format!("Bearer {}", t)),
        _ => req,
    }
}

/// Pulls `detail` out of a FastAPI-style error body.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    match v.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn status_error(resp: Response) -> ApiError {
    let status = resp.status();
    let detail = resp.text().ok().and_then(|b| error_detail(&b));
    debug!(%status, ?detail, "api error response");
    ApiError::Status { status, detail }
}

pub(crate) fn read_json<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(status_error(resp));
    }
    debug!(%status, "api response");
    let body = resp.bytes()?;
    Ok(serde_json::from_slice(&body)?)
}
