// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::blocking::multipart::Form;
use reqwest::Method;
use std::path::Path;

use super::{read_json, ApiClient};
use crate::error::ApiResult;
use crate::models::Transaction;

/// Sends a statement file as the multipart field `file`; the server answers
/// with the transactions it extracted.
pub fn bank_statement(api: &ApiClient, path: &Path) -> ApiResult<Vec<Transaction>> {
    let form = Form::new().file("file", path)?;
    let resp = api
        .request(Method::POST, "upload/bank-statement")
        .multipart(form)
        .send()?;
    read_json(resp)
}
