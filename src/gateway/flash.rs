//! One-shot flash messages
//!
//! A message is queued for a principal when an operation finishes (usually
//! right before a redirect) and is handed out exactly once, by the next
//! screen rendered for that principal.

use dashmap::DashMap;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            text: text.into(),
        }
    }
}

/// Oldest messages are dropped once a principal has this many unread
pub const MAX_PENDING_PER_PRINCIPAL: usize = 16;

/// Pending messages per principal (user id)
#[derive(Default)]
pub struct FlashStore {
    pending: DashMap<i64, Vec<FlashMessage>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, user_id: i64, message: FlashMessage) {
        let mut queue = self.pending.entry(user_id).or_default();
        if queue.len() >= MAX_PENDING_PER_PRINCIPAL {
            let overflow = queue.len() + 1 - MAX_PENDING_PER_PRINCIPAL;
            queue.drain(..overflow);
        }
        queue.push(message);
    }

    /// Drain everything pending for the principal, oldest first
    pub fn take(&self, user_id: i64) -> Vec<FlashMessage> {
        self.pending
            .remove(&user_id)
            .map(|(_, messages)| messages)
            .unwrap_or_default()
    }

    /// No principal has anything pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
