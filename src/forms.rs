// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client-side form constraints. Each form validates every field and reports
//! all violations at once, before anything touches the network.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::error::FormError;
use crate::models::{TransactionCreate, TransactionSource, TransactionType, UserCreate, UserLogin};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_DESCRIPTION_LEN: usize = 255;
pub const MAX_CATEGORY_LEN: usize = 100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

pub type FormResult<T> = Result<T, Vec<FormError>>;

pub fn is_email(s: &str) -> bool {
    let local_len = s.split('@').next().map(str::len).unwrap_or(0);
    s.len() <= 254 && local_len <= 64 && EMAIL_RE.is_match(s)
}

fn required(errors: &mut Vec<FormError>, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FormError::Required(field));
        false
    } else {
        true
    }
}

fn email(errors: &mut Vec<FormError>, value: &str) {
    if required(errors, "email", value) && !is_email(value.trim()) {
        errors.push(FormError::Email(value.trim().to_string()));
    }
}

fn finish<T>(errors: Vec<FormError>, value: impl FnOnce() -> T) -> FormResult<T> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> FormResult<UserLogin> {
        let mut errors = Vec::new();
        email(&mut errors, &self.email);
        required(&mut errors, "password", &self.password);
        finish(errors, || UserLogin {
            username: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> FormResult<UserCreate> {
        let mut errors = Vec::new();
        required(&mut errors, "first name", &self.first_name);
        required(&mut errors, "last name", &self.last_name);
        email(&mut errors, &self.email);
        if required(&mut errors, "password", &self.password)
            && self.password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.push(FormError::MinLength {
                field: "password",
                min: MIN_PASSWORD_LEN,
            });
        }
        finish(errors, || UserCreate {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub category: Option<String>,
    pub transaction_type: String,
    pub source: Option<String>,
}

fn parse_type(s: &str) -> Option<TransactionType> {
    match s.trim().to_ascii_lowercase().as_str() {
        "expense" => Some(TransactionType::Expense),
        "income" => Some(TransactionType::Income),
        "investment" => Some(TransactionType::Investment),
        _ => None,
    }
}

fn parse_source(s: &str) -> Option<TransactionSource> {
    match s.trim().to_ascii_lowercase().as_str() {
        "manual" => Some(TransactionSource::Manual),
        "bank_statement" | "bank-statement" => Some(TransactionSource::BankStatement),
        _ => None,
    }
}

impl TransactionForm {
    pub fn validate(&self) -> FormResult<TransactionCreate> {
        let mut errors = Vec::new();

        let date = if required(&mut errors, "date", &self.date) {
            let d = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok();
            if d.is_none() {
                errors.push(FormError::Invalid {
                    field: "date",
                    value: self.date.clone(),
                });
            }
            d
        } else {
            None
        };

        if required(&mut errors, "description", &self.description)
            && self.description.trim().chars().count() > MAX_DESCRIPTION_LEN
        {
            errors.push(FormError::MaxLength {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        let amount = if required(&mut errors, "amount", &self.amount) {
            let a = self.amount.trim().parse::<Decimal>().ok();
            if a.is_none() {
                errors.push(FormError::Invalid {
                    field: "amount",
                    value: self.amount.clone(),
                });
            }
            a
        } else {
            None
        };

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        if category
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_CATEGORY_LEN)
        {
            errors.push(FormError::MaxLength {
                field: "category",
                max: MAX_CATEGORY_LEN,
            });
        }

        let kind = if required(&mut errors, "type", &self.transaction_type) {
            let k = parse_type(&self.transaction_type);
            if k.is_none() {
                errors.push(FormError::Invalid {
                    field: "type",
                    value: self.transaction_type.clone(),
                });
            }
            k
        } else {
            None
        };

        let source = match self.source.as_deref() {
            None => Some(TransactionSource::Manual),
            Some(s) => {
                let parsed = parse_source(s);
                if parsed.is_none() {
                    errors.push(FormError::Invalid {
                        field: "source",
                        value: s.to_string(),
                    });
                }
                parsed
            }
        };

        match (date, amount, kind, source) {
            (Some(date), Some(amount), Some(kind), Some(source)) if errors.is_empty() => {
                Ok(TransactionCreate {
                    date: date.and_time(chrono::NaiveTime::default()),
                    description: self.description.trim().to_string(),
                    amount,
                    category,
                    transaction_type: kind,
                    source,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
}

impl UploadForm {
    pub fn validate(&self) -> FormResult<PathBuf> {
        match &self.file {
            None => Err(vec![FormError::Required("file")]),
            Some(p) if p.as_os_str().is_empty() => Err(vec![FormError::Required("file")]),
            Some(p) if !p.is_file() => Err(vec![FormError::MissingFile(p.display().to_string())]),
            Some(p) => Ok(p.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_email("ada@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email("ada@"));
        assert!(!is_email("ada.example.com"));
        assert!(!is_email("a b@example.com"));
    }

    #[test]
    fn login_requires_both_fields() {
        let errs = LoginForm::default().validate().unwrap_err();
        assert_eq!(
            errs,
            vec![FormError::Required("email"), FormError::Required("password")]
        );
    }

    #[test]
    fn login_maps_email_to_username() {
        let form = LoginForm {
            email: " ada@example.com ".into(),
            password: "pw".into(),
        };
        assert_eq!(form.validate().unwrap().username, "ada@example.com");
    }

    #[test]
    fn register_enforces_password_length() {
        let form = RegisterForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "short".into(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            vec![FormError::MinLength {
                field: "password",
                min: 8
            }]
        );
    }

    #[test]
    fn transaction_form_builds_create_body() {
        let form = TransactionForm {
            date: "2025-03-04".into(),
            description: "Groceries".into(),
            amount: "42.10".into(),
            category: Some("Food".into()),
            transaction_type: "Expense".into(),
            source: None,
        };
        let tx = form.validate().unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.source, TransactionSource::Manual);
        assert_eq!(tx.amount, Decimal::new(4210, 2));
        assert_eq!(tx.date.to_string(), "2025-03-04 00:00:00");
    }

    #[test]
    fn transaction_form_collects_every_problem() {
        let form = TransactionForm {
            date: "04/03/2025".into(),
            description: String::new(),
            amount: "lots".into(),
            category: None,
            transaction_type: "gift".into(),
            source: Some("scanner".into()),
        };
        assert_eq!(form.validate().unwrap_err().len(), 5);
    }

    #[test]
    fn upload_requires_existing_file() {
        assert_eq!(
            UploadForm::default().validate().unwrap_err(),
            vec![FormError::Required("file")]
        );
        let missing = UploadForm {
            file: Some(PathBuf::from("/definitely/not/here.pdf")),
        };
        assert!(matches!(
            missing.validate().unwrap_err()[0],
            FormError::MissingFile(_)
        ));
    }
}
