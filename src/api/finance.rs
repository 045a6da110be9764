// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;

use super::{read_json, ApiClient};
use crate::error::ApiResult;
use crate::models::{MonthlySummary, Transaction, TransactionCreate, YearlySummary};

pub const DEFAULT_SKIP: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 100;

pub fn transactions(api: &ApiClient, skip: u32, limit: u32) -> ApiResult<Vec<Transaction>> {
    let resp = api
        .request(Method::GET, "finance/transactions")
        .query(&[("skip", skip), ("limit", limit)])
        .send()?;
    read_json(resp)
}

pub fn create_transaction(api: &ApiClient, tx: &TransactionCreate) -> ApiResult<Transaction> {
    let resp = api
        .request(Method::POST, "finance/transactions")
        .json(tx)
        .send()?;
    read_json(resp)
}

pub fn monthly_summary(api: &ApiClient, year: i32, month: u32) -> ApiResult<MonthlySummary> {
    let resp = api
        .request(Method::GET, "finance/monthly-summary")
        .query(&[("year", year.to_string()), ("month", month.to_string())])
        .send()?;
    read_json(resp)
}

pub fn yearly_summary(api: &ApiClient, year: i32) -> ApiResult<YearlySummary> {
    let resp = api
        .request(Method::GET, "finance/yearly-summary")
        .query(&[("year", year)])
        .send()?;
    read_json(resp)
}
