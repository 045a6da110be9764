// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;

use super::{read_json, ApiClient};
use crate::error::ApiResult;
use crate::models::{ChatRequest, ChatResponse};

pub fn send_message(api: &ApiClient, message: &str) -> ApiResult<ChatResponse> {
    let body = ChatRequest {
        message: message.to_string(),
    };
    let resp = api.request(Method::POST, "chat/message").json(&body).send()?;
    read_json(resp)
}
