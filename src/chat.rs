// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Utc;
use tracing::{error, warn};
use uuid::Uuid;

use crate::api::{self, ApiClient};
use crate::error::ApiResult;
use crate::models::ChatMessage;
use crate::store::{LocalStore, CHAT_HISTORY_KEY};

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again later.";
pub const WELCOME_MESSAGE: &str =
    "Hello! I'm your financial assistant. How can I help you with your finances today?";
const WELCOME_ID: &str = "welcome";

/// Conversation log, persisted to the local store after every append.
pub struct ChatHistory<'a> {
    store: &'a LocalStore,
    messages: Vec<ChatMessage>,
}

impl<'a> ChatHistory<'a> {
    pub fn load(store: &'a LocalStore) -> Self {
        let messages = match store.get_item(CHAT_HISTORY_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "discarding unreadable chat history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read chat history");
                Vec::new()
            }
        };
        Self { store, messages }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// What the chat panel shows: the stored messages, or a greeting from the
    /// assistant when there are none. The greeting is never persisted.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        if !self.messages.is_empty() {
            return self.messages.clone();
        }
        vec![ChatMessage {
            id: WELCOME_ID.to_string(),
            content: WELCOME_MESSAGE.to_string(),
            is_user: false,
            timestamp: Utc::now(),
        }]
    }

    fn append(&mut self, content: String, is_user: bool) -> ApiResult<()> {
        self.messages.push(ChatMessage {
            id: Uuid::new_v4().to_string(),
            content,
            is_user,
            timestamp: Utc::now(),
        });
        let raw = serde_json::to_string(&self.messages)?;
        self.store.set_item(CHAT_HISTORY_KEY, &raw)?;
        Ok(())
    }

    /// Records the user's message, asks the assistant, and records either its
    /// reply or [`CHAT_ERROR_REPLY`]. The API error is still returned.
    pub fn send(&mut self, api: &ApiClient, message: &str) -> ApiResult<String> {
        self.append(message.to_string(), true)?;
        match api::chat::send_message(api, message) {
            Ok(resp) => {
                self.append(resp.response.clone(), false)?;
                Ok(resp.response)
            }
            Err(e) => {
                error!(error = %e, "chat message failed");
                self.append(CHAT_ERROR_REPLY.to_string(), false)?;
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) -> ApiResult<()> {
        self.messages.clear();
        self.store.remove_item(CHAT_HISTORY_KEY)?;
        Ok(())
    }
}
