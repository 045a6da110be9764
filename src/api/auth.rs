// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::{Method, StatusCode};

use super::{read_json, status_error, ApiClient};
use crate::error::{ApiError, ApiResult, DUPLICATE_EMAIL_DETAIL};
use crate::models::{ApiKeyStatus, AuthResponse, User, UserCreate, UserLogin};

pub fn register(api: &ApiClient, user: &UserCreate) -> ApiResult<User> {
    let resp = api.request(Method::POST, "auth/register").json(user).send()?;
    if resp.status() == StatusCode::BAD_REQUEST {
        return Err(match status_error(resp) {
            ApiError::Status {
                detail: Some(d), ..
            } if d == DUPLICATE_EMAIL_DETAIL => ApiError::AlreadyRegistered,
            other => other,
        });
    }
    read_json(resp)
}

/// Form-encoded credential exchange.
pub fn login(api: &ApiClient, credentials: &UserLogin) -> ApiResult<AuthResponse> {
    let resp = api
        .request(Method::POST, "auth/login")
        .form(credentials)
        .send()?;
    if resp.status() == StatusCode::UNAUTHORIZED {
        return Err(ApiError::InvalidCredentials);
    }
    read_json(resp)
}

pub fn validate_api_key(api: &ApiClient) -> ApiResult<ApiKeyStatus> {
    let resp = api.request(Method::POST, "auth/validate-api-key").send()?;
    read_json(resp)
}
