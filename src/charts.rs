// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Presentation values derived from server summaries: pie slices for the
//! transaction-type split, ranked expense-category bars, and a six-month
//! expense trend.
//!
//! Everything here is pure. A zero or missing denominator yields no chart
//! data (`None` or an empty vector) instead of an error.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{MonthlySummary, TransactionType, YearlySummary};

/// Arc length of the pie ring, roughly 2πr for a radius of 50.
pub const CIRCUMFERENCE: Decimal = Decimal::from_parts(314, 0, 0, false, 0);
pub const FULL_TURN: Decimal = Decimal::from_parts(360, 0, 0, false, 0);
pub const TREND_MONTHS: u32 = 6;

pub const PALETTE: [&str; 8] = [
    "#3f51b5", "#e91e63", "#ff9800", "#4caf50", "#9c27b0", "#00bcd4", "#795548", "#607d8b",
];

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub kind: TransactionType,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub start_angle: Decimal,
    pub end_angle: Decimal,
    /// Stroke dash length on the ring.
    pub dash: Decimal,
    pub gap: Decimal,
    /// Negative cumulative arc length of the preceding slices.
    pub offset: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDistribution {
    pub total: Decimal,
    /// Always income, expense, investment.
    pub slices: Vec<Slice>,
}

impl TypeDistribution {
    pub fn slice(&self, kind: TransactionType) -> Option<&Slice> {
        self.slices.iter().find(|s| s.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBar {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    (part * Decimal::ONE_HUNDRED).checked_div(whole)
}

pub fn type_distribution(summary: &MonthlySummary) -> Option<TypeDistribution> {
    let parts = [
        (TransactionType::Income, summary.total_income),
        (TransactionType::Expense, summary.total_expense),
        (TransactionType::Investment, summary.total_investment),
    ];
    let total: Decimal = parts.iter().map(|(_, v)| *v).sum();
    if total.is_zero() {
        return None;
    }

    let mut slices = Vec::with_capacity(parts.len());
    let mut cumulative = Decimal::ZERO;
    for (kind, amount) in parts {
        let percentage = percent_of(amount, total)?;
        let start_angle = cumulative * FULL_TURN / Decimal::ONE_HUNDRED;
        let dash = percentage * CIRCUMFERENCE / Decimal::ONE_HUNDRED;
        let offset = -(cumulative * CIRCUMFERENCE / Decimal::ONE_HUNDRED);
        cumulative += percentage;
        slices.push(Slice {
            kind,
            amount,
            percentage,
            start_angle,
            end_angle: cumulative * FULL_TURN / Decimal::ONE_HUNDRED,
            dash,
            gap: CIRCUMFERENCE - dash,
            offset,
        });
    }
    Some(TypeDistribution { total, slices })
}

/// Bars scaled against the largest category, so the top bar is always 100%.
/// Order follows the summary, colors cycle through [`PALETTE`].
pub fn category_ranking(summary: &MonthlySummary) -> Vec<CategoryBar> {
    let breakdown = &summary.expense_by_category;
    let max = breakdown.iter().map(|(_, v)| v).max().unwrap_or_default();
    if max <= Decimal::ZERO {
        return Vec::new();
    }
    breakdown
        .iter()
        .enumerate()
        .filter_map(|(i, (name, amount))| {
            Some(CategoryBar {
                category: name.to_string(),
                amount,
                percentage: percent_of(amount, max)?,
                color: PALETTE[i % PALETTE.len()],
            })
        })
        .collect()
}

/// The `(year, month)` pairs of the trend window, oldest first, ending at
/// `today`'s month.
pub fn trend_window(today: NaiveDate) -> Vec<(i32, u32)> {
    let mut year = today.year();
    let mut month = today.month() as i32;
    let mut out = Vec::with_capacity(TREND_MONTHS as usize);
    for _ in 0..TREND_MONTHS {
        out.push((year, month as u32));
        month -= 1;
        if month < 1 {
            month = 12;
            year -= 1;
        }
    }
    out.reverse();
    out
}

/// Distinct years the trend window touches.
pub fn trend_years(today: NaiveDate) -> Vec<i32> {
    let mut years: Vec<i32> = trend_window(today).into_iter().map(|(y, _)| y).collect();
    years.dedup();
    years
}

pub fn monthly_trend(
    summaries_by_year: &BTreeMap<i32, YearlySummary>,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let selected: Vec<(i32, u32, Decimal)> = trend_window(today)
        .into_iter()
        .filter_map(|(y, m)| {
            let totals = summaries_by_year.get(&y)?.monthly_data.get(&m)?;
            Some((y, m, totals.expense))
        })
        .collect();

    let max = selected.iter().map(|(_, _, v)| *v).max().unwrap_or_default();
    if max <= Decimal::ZERO {
        return Vec::new();
    }
    selected
        .into_iter()
        .filter_map(|(year, month, amount)| {
            Some(TrendPoint {
                year,
                month,
                label: format!("{} {}", MONTH_ABBR[(month as usize - 1) % 12], year),
                amount,
                percentage: percent_of(amount, max)?,
            })
        })
        .collect()
}
