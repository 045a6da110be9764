// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;

use crate::api;
use crate::app::App;
use crate::models::ChatMessage;
use crate::session::{decode_claims, Session};
use crate::store::CHAT_HISTORY_KEY;
use crate::utils::pretty_table;

/// Local problems: a stored token that cannot be used, or unreadable history.
pub fn local_issues(session: &Session, now: i64) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Session token
    if let Some(token) = session.token() {
        match decode_claims(&token) {
            Ok(c) if !c.is_live_at(now) => {
                rows.push(vec!["token_expired".into(), format!("exp {}", c.exp)]);
            }
            Ok(_) => {}
            Err(e) => rows.push(vec!["token_malformed".into(), e.to_string()]),
        }
    }

    // 2) Chat history
    if let Some(raw) = session.store().get_item(CHAT_HISTORY_KEY)? {
        if let Err(e) = serde_json::from_str::<Vec<ChatMessage>>(&raw) {
            rows.push(vec!["chat_history_unreadable".into(), e.to_string()]);
        }
    }
    Ok(rows)
}

pub fn handle(app: &App) -> Result<()> {
    let mut rows = local_issues(&app.session, Utc::now().timestamp())?;

    // 3) API reachability and key
    if let Err(e) = api::auth::validate_api_key(&app.api()) {
        let issue = match e.status() {
            Some(s) if s.is_client_error() => "api_key_rejected",
            Some(_) => "api_error",
            None => "api_unreachable",
        };
        rows.push(vec![issue.into(), e.to_string()]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
