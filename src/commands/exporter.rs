// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Result};

use super::transactions::to_rows;
use crate::api;
use crate::app::App;
use crate::models::Transaction;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(app, sub),
        _ => Ok(()),
    }
}

fn export_transactions(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .ok_or_else(|| anyhow!("--out is required"))?;
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    let skip = *sub.get_one::<u32>("skip").unwrap_or(&api::finance::DEFAULT_SKIP);
    let limit = *sub.get_one::<u32>("limit").unwrap_or(&api::finance::DEFAULT_LIMIT);
    let data = api::finance::transactions(&app.api(), skip, limit)?;
    write_transactions(&data, &fmt, &out)?;
    println!("Exported {} transactions to {}", data.len(), out);
    Ok(())
}

pub fn write_transactions(data: &[Transaction], fmt: &str, out: &str) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            for row in to_rows(data) {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(data)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    Ok(())
}
