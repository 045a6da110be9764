// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

use crate::api::{self, ApiClient};
use crate::app::App;
use crate::charts::{
    category_ranking, monthly_trend, trend_years, CategoryBar, TrendPoint, TypeDistribution,
};
use crate::error::ApiResult;
use crate::models::MonthlySummary;
use crate::utils::{bar, fmt_money, fmt_pct, maybe_print_json, parse_month, pretty_table};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub year: i32,
    pub month: u32,
    pub summary: MonthlySummary,
    pub distribution: Option<TypeDistribution>,
    pub categories: Vec<CategoryBar>,
    pub trend: Vec<TrendPoint>,
}

/// Fetches the month's summary plus every yearly summary the trend window
/// needs, then derives the chart values.
pub fn load_dashboard(
    api: &ApiClient,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> ApiResult<DashboardData> {
    let summary = api::finance::monthly_summary(api, year, month)?;
    let mut yearly = BTreeMap::new();
    for y in trend_years(today) {
        yearly.insert(y, api::finance::yearly_summary(api, y)?);
    }
    Ok(DashboardData {
        year,
        month,
        distribution: crate::charts::type_distribution(&summary),
        categories: category_ranking(&summary),
        trend: monthly_trend(&yearly, today),
        summary,
    })
}

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let today = Utc::now().date_naive();
    let (year, month) = match m.get_one::<String>("month") {
        Some(s) => parse_month(s.trim())?,
        None => (today.year(), today.month()),
    };

    let data = match load_dashboard(&app.api(), year, month, today) {
        Ok(d) => d,
        Err(e) => {
            error!(error = %e, "dashboard load failed");
            bail!("Failed to load dashboard data. Run `finassist dashboard` to retry.");
        }
    };
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    render(&data);
    Ok(())
}

fn render(data: &DashboardData) {
    let s = &data.summary;
    println!("Finance dashboard {:04}-{:02}", data.year, data.month);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Investment", "Net savings"],
            vec![vec![
                fmt_money(&s.total_income),
                fmt_money(&s.total_expense),
                fmt_money(&s.total_investment),
                fmt_money(&s.net_savings),
            ]],
        )
    );

    match &data.distribution {
        Some(d) => {
            let rows = d
                .slices
                .iter()
                .map(|sl| {
                    vec![
                        sl.kind.as_str().to_string(),
                        fmt_money(&sl.amount),
                        fmt_pct(&sl.percentage),
                        format!("{}°", sl.start_angle.round_dp(1)),
                        bar(&sl.percentage, BAR_WIDTH),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Type", "Amount", "Share", "Starts at", ""], rows)
            );
        }
        None => println!("No transactions recorded for this month."),
    }

    if data.categories.is_empty() {
        println!("No expenses by category.");
    } else {
        let rows = data
            .categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount),
                    bar(&c.percentage, BAR_WIDTH),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", ""], rows));
    }

    if data.trend.is_empty() {
        println!("No expense trend for the last six months.");
    } else {
        let rows = data
            .trend
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    fmt_money(&p.amount),
                    bar(&p.percentage, BAR_WIDTH),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Expense", ""], rows));
    }
}
