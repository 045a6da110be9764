// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    #[serde(deserialize_with = "server_time")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "server_time")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Login form body; `username` carries the email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKeyStatus {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Expense,
    Income,
    Investment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
            TransactionType::Investment => "investment",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    Manual,
    BankStatement,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "manual",
            TransactionSource::BankStatement => "bank_statement",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    #[serde(deserialize_with = "wall_clock")]
    pub date: NaiveDateTime,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Option<String>,
    pub transaction_type: TransactionType,
    pub source: TransactionSource,
    #[serde(deserialize_with = "server_time")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "server_time")]
    pub updated_at: DateTime<Utc>,
}

/// Server timestamps come with an offset when the column is timezone-aware
/// and without one otherwise. Naive values are read as UTC.
fn server_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();
    s.parse::<DateTime<FixedOffset>>()
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| s.parse::<NaiveDateTime>().map(|n| n.and_utc()))
        .map_err(|_| D::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Keeps the wall-clock time the server recorded, dropping any offset.
fn wall_clock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();
    s.parse::<NaiveDateTime>()
        .or_else(|_| s.parse::<DateTime<FixedOffset>>().map(|t| t.naive_local()))
        .map_err(|_| D::Error::custom(format!("invalid timestamp '{}'", raw)))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionCreate {
    pub date: NaiveDateTime,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub transaction_type: TransactionType,
    pub source: TransactionSource,
}

/// Category totals in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAmounts(pub Vec<(String, Decimal)>);

impl CategoryAmounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for CategoryAmounts {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        CategoryAmounts(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Serialize, Deserialize)]
struct FloatAmount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl<'de> Deserialize<'de> for CategoryAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = CategoryAmounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to amount")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((k, FloatAmount(v))) = map.next_entry::<String, FloatAmount>()? {
                    out.push((k, v));
                }
                Ok(CategoryAmounts(out))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

impl Serialize for CategoryAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, &FloatAmount(*v))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_savings: Decimal,
    #[serde(default)]
    pub expense_by_category: CategoryAmounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub investment: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YearlyTotals {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_savings: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct YearlySummary {
    /// Keyed by calendar month, 1 through 12.
    pub monthly_data: BTreeMap<u32, MonthTotals>,
    pub yearly_totals: YearlyTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_breakdown_keeps_server_order() {
        let raw = r#"{
            "total_income": 120, "total_expense": 80.5, "total_investment": 0,
            "net_savings": 39.5,
            "expense_by_category": {"Rent": 50, "Food": 100, "Travel": 12.25}
        }"#;
        let s: MonthlySummary = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = s.expense_by_category.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["Rent", "Food", "Travel"]);
        assert_eq!(s.total_expense, Decimal::new(805, 1));
        assert_eq!(s.expense_by_category.0[2].1, Decimal::new(1225, 2));
    }

    #[test]
    fn yearly_summary_parses_string_month_keys() {
        let raw = r#"{
            "monthly_data": {"1": {"income": 10, "expense": 5, "investment": 0},
                             "12": {"income": 0, "expense": 7.5, "investment": 1}},
            "yearly_totals": {"total_income": 10, "total_expense": 12.5,
                              "total_investment": 1, "net_savings": -3.5}
        }"#;
        let y: YearlySummary = serde_json::from_str(raw).unwrap();
        assert_eq!(y.monthly_data[&12].expense, Decimal::new(75, 1));
        assert_eq!(y.monthly_data.keys().copied().collect::<Vec<_>>(), [1, 12]);
    }

    #[test]
    fn transaction_accepts_offset_and_naive_timestamps() {
        let raw = r#"{
            "id": 3, "user_id": 7, "date": "2025-03-04T18:30:00+05:30",
            "description": "Rent", "amount": 900, "category": null,
            "transaction_type": "expense", "source": "bank_statement",
            "created_at": "2025-03-04T09:00:00+02:00",
            "updated_at": "2025-03-04T09:00:00.250000"
        }"#;
        let t: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(t.date.to_string(), "2025-03-04 18:30:00");
        assert_eq!(t.created_at.to_rfc3339(), "2025-03-04T07:00:00+00:00");
        assert_eq!(t.updated_at.timestamp_subsec_millis(), 250);

        let bad = raw.replace("2025-03-04T09:00:00+02:00", "yesterday");
        assert!(serde_json::from_str::<Transaction>(&bad).is_err());
    }

    #[test]
    fn chat_message_uses_camel_case_flag() {
        let m = ChatMessage {
            id: "1".into(),
            content: "hi".into(),
            is_user: true,
            timestamp: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["isUser"], serde_json::json!(true));
    }
}
