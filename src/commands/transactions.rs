// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde::Serialize;

use super::report_form_errors;
use crate::api;
use crate::app::App;
use crate::forms::TransactionForm;
use crate::models::Transaction;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let get = |name: &str| sub.get_one::<String>(name).cloned();
    let form = TransactionForm {
        date: get("date").unwrap_or_default(),
        description: get("description").unwrap_or_default(),
        amount: get("amount").unwrap_or_default(),
        category: get("category"),
        transaction_type: get("type").unwrap_or_default(),
        source: get("source"),
    };
    let body = match form.validate() {
        Ok(b) => b,
        Err(errors) => {
            report_form_errors(&errors);
            bail!("Cannot record transaction");
        }
    };
    let tx = api::finance::create_transaction(&app.api(), &body)?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        tx.transaction_type.as_str(),
        fmt_money(&tx.amount),
        tx.date.date(),
        tx.description,
        tx.id
    );
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let skip = *sub.get_one::<u32>("skip").unwrap_or(&api::finance::DEFAULT_SKIP);
    let limit = *sub.get_one::<u32>("limit").unwrap_or(&api::finance::DEFAULT_LIMIT);
    let data = api::finance::transactions(&app.api(), skip, limit)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", transactions_table(&data));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub transaction_type: String,
    pub source: String,
}

pub fn to_rows(data: &[Transaction]) -> Vec<TransactionRow> {
    data.iter()
        .map(|t| TransactionRow {
            date: t.date.date().to_string(),
            description: t.description.clone(),
            amount: fmt_money(&t.amount),
            category: t.category.clone().unwrap_or_default(),
            transaction_type: t.transaction_type.as_str().to_string(),
            source: t.source.as_str().to_string(),
        })
        .collect()
}

pub fn transactions_table(data: &[Transaction]) -> comfy_table::Table {
    let rows = to_rows(data)
        .into_iter()
        .map(|r| {
            vec![
                r.date,
                r.description,
                r.amount,
                r.category,
                r.transaction_type,
                r.source,
            ]
        })
        .collect();
    pretty_table(
        &["Date", "Description", "Amount", "Category", "Type", "Source"],
        rows,
    )
}
