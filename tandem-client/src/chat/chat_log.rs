use chrono::Local;
use std::collections::VecDeque;
use tandem_core::ChatMessage;

/// Message log in relay arrival order, most recent first.
///
/// Nothing is inserted optimistically: a sender sees its own message only once
/// the relay echoes it back, so every participant renders the same order.
#[derive(Debug, Default, Clone)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_front(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }
}

/// Builds an outgoing message stamped with the local wall clock.
///
/// Returns `None` when either the text or the user name is blank.
pub fn compose_message(text: &str, user: &str) -> Option<ChatMessage> {
    let (text, user) = (text.trim(), user.trim());
    if text.is_empty() || user.is_empty() {
        return None;
    }

    Some(ChatMessage {
        text: text.to_owned(),
        user: user.to_owned(),
        timestamp: Local::now().format("%H:%M:%S").to_string(),
    })
}
