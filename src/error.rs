// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::StatusCode;
use thiserror::Error;

/// Backend detail string returned when registering an email that already exists.
pub const DUPLICATE_EMAIL_DETAIL: &str = "Email already registered";

/// Errors surfaced by the API clients and the session layer.
///
/// Call sites branch on the variant (or on [`ApiError::status`]) to pick the
/// message a view shows; nothing here is retried.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered")]
    AlreadyRegistered,

    #[error("server returned {status}{}", .detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("local store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl ApiError {
    /// HTTP status associated with the failure, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::InvalidCredentials => Some(StatusCode::UNAUTHORIZED),
            ApiError::AlreadyRegistered => Some(StatusCode::BAD_REQUEST),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }
}

/// Reasons a bearer token could not be turned into session claims.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token has {0} segments, expected 3")]
    Segments(usize),

    #[error("token payload is not valid base64")]
    Encoding,

    #[error("token payload is not a valid claims object: {0}")]
    Payload(String),
}

/// Client-side form constraint violations, raised before any request is sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("'{0}' is not a valid email address")]
    Email(String),

    #[error("{field} must be at least {min} characters")]
    MinLength { field: &'static str, min: usize },

    #[error("{field} must be at most {max} characters")]
    MaxLength { field: &'static str, max: usize },

    #[error("file '{0}' does not exist")]
    MissingFile(String),

    #[error("invalid {field} '{value}'")]
    Invalid { field: &'static str, value: String },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
