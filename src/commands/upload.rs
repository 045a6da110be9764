// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use std::path::PathBuf;

use super::report_form_errors;
use super::transactions::transactions_table;
use crate::api;
use crate::app::App;
use crate::error::ApiResult;
use crate::forms::UploadForm;
use crate::models::Transaction;
use crate::utils::maybe_print_json;

pub const UPLOADING: &str = "Uploading...";
pub const UPLOAD_OK: &str = "File uploaded successfully!";

pub fn upload_status(result: &ApiResult<Vec<Transaction>>) -> String {
    match result {
        Ok(_) => UPLOAD_OK.to_string(),
        Err(e) => format!("Upload failed: {}", e),
    }
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let form = UploadForm {
        file: m.get_one::<PathBuf>("file").cloned(),
    };
    let path = match form.validate() {
        Ok(p) => p,
        Err(errors) => {
            report_form_errors(&errors);
            bail!("Cannot upload");
        }
    };

    eprintln!("{}", UPLOADING);
    let result = api::upload::bank_statement(&app.api(), &path);
    let status = upload_status(&result);
    let Ok(txs) = result else {
        bail!(status);
    };
    eprintln!("{}", status);
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &txs)? && !txs.is_empty() {
        println!("{}", transactions_table(&txs));
    }
    Ok(())
}
