// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::app::App;
use crate::chat::ChatHistory;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let mut history = ChatHistory::load(app.session.store());
    match m.subcommand() {
        Some(("send", sub)) => {
            let message = sub
                .get_many::<String>("message")
                .map(|parts| parts.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let message = message.trim();
            if message.is_empty() {
                return Ok(());
            }
            // the failure reply is already in the history; show it instead of erroring
            let reply = history
                .send(&app.api(), message)
                .unwrap_or_else(|_| crate::chat::CHAT_ERROR_REPLY.to_string());
            println!("{}", reply);
        }
        Some(("history", sub)) => {
            let shown = history.transcript();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shown)? {
                let rows = shown
                    .iter()
                    .map(|msg| {
                        vec![
                            msg.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                            if msg.is_user { "you" } else { "assistant" }.to_string(),
                            msg.content.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["When", "Who", "Message"], rows));
            }
        }
        Some(("clear", _)) => {
            history.clear()?;
            println!("Chat history cleared");
        }
        _ => {}
    }
    Ok(())
}
