//! In-memory chat transcript.
//!
//! Each successful `send` appends the user's message and the assistant's
//! reply. Bot messages can be rated; the whole transcript exports as JSON.
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use faqbot_core::error::{Error, Result};
use faqbot_core::traits::AnswerMatcher;
use faqbot_core::types::FaqId;

use crate::assistant::FaqAssistant;

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
}

impl Rating {
    /// Feedback line shown after rating.
    pub fn acknowledgement(self) -> &'static str {
        match self {
            Rating::Up => "Thank you for your feedback!",
            Rating::Down => "Thanks for letting us know. We'll work to improve our responses.",
        }
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "+" | "helpful" => Ok(Rating::Up),
            "down" | "-" | "unhelpful" => Ok(Rating::Down),
            other => Err(Error::InvalidInput(format!("unknown rating '{}', expected up or down", other))),
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Up => write!(f, "up"),
            Rating::Down => write!(f, "down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub confidence: Option<f64>,
    pub faq_id: Option<FaqId>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: MessageId,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the assistant and record both sides. Nothing is recorded when the
    /// query is rejected.
    pub fn send<M: AnswerMatcher>(&mut self, assistant: &FaqAssistant<M>, text: &str) -> Result<&ChatMessage> {
        let reply = assistant.ask(text)?;
        self.push(text.trim().to_string(), Sender::User, None, None);
        Ok(self.push(reply.text, Sender::Bot, Some(reply.confidence), reply.faq_id))
    }

    pub fn rate(&mut self, id: MessageId, rating: Rating) -> Result<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::NotFound(format!("message {}", id)))?;
        if message.sender != Sender::Bot {
            return Err(Error::InvalidInput(format!("message {} is not an assistant reply", id)));
        }
        message.rating = Some(rating);
        Ok(())
    }

    pub fn last_bot_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.sender == Sender::Bot)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }

    fn push(&mut self, content: String, sender: Sender, confidence: Option<f64>, faq_id: Option<FaqId>) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            timestamp: Utc::now(),
            confidence,
            faq_id,
            rating: None,
        });
        &self.messages[self.messages.len() - 1]
    }
}
