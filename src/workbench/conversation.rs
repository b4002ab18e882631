use crate::error::{CompletionError, InvalidState};
use tracing::{debug, warn};

pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, I encountered an issue while processing your message.";
pub const CHAT_EMPTY_MESSAGE: &str = "No response from the assistant.";
/// Shown under the transcript while a reply is outstanding; never stored.
pub const PENDING_REPLY_LABEL: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Droid Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub role: Role,
    pub text: String,
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeId(u64);

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub exchange: ExchangeId,
    pub history: Vec<ConversationEntry>,
    pub context_label: Option<String>,
    pub message: String,
}

/// Append-only chat transcript. At most one exchange is awaiting a reply, so
/// every reply lands directly after the user entry that asked for it.
#[derive(Debug, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
    pending: Option<ExchangeId>,
    next_exchange: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    pub fn append_user(
        &mut self,
        text: &str,
        context_label: Option<String>,
    ) -> Result<ChatRequest, InvalidState> {
        let message = text.trim();
        if message.is_empty() {
            return Err(InvalidState::BlankMessage);
        }
        if self.pending.is_some() {
            return Err(InvalidState::ExchangeInFlight);
        }

        self.next_exchange += 1;
        let exchange = ExchangeId(self.next_exchange);
        let history = self.entries.clone();
        self.entries.push(ConversationEntry::user(message));
        self.pending = Some(exchange);

        Ok(ChatRequest {
            exchange,
            history,
            context_label,
            message: message.to_string(),
        })
    }

    pub fn finish_exchange(
        &mut self,
        exchange: ExchangeId,
        outcome: Result<String, CompletionError>,
    ) -> bool {
        if self.pending != Some(exchange) {
            debug!(exchange = exchange.0, "ignoring reply for unknown exchange");
            return false;
        }

        let text = match outcome {
            Ok(text) if text.trim().is_empty() => CHAT_EMPTY_MESSAGE.to_string(),
            Err(CompletionError::EmptyResponse) => CHAT_EMPTY_MESSAGE.to_string(),
            Ok(text) => text,
            Err(err) => {
                warn!(exchange = exchange.0, error = %err, "chat request failed");
                CHAT_ERROR_MESSAGE.to_string()
            }
        };
        self.entries.push(ConversationEntry::assistant(text));
        self.pending = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_messages_leave_the_log_unchanged() {
        let mut log = ConversationLog::new();
        assert_eq!(log.append_user("", None).err(), Some(InvalidState::BlankMessage));
        assert_eq!(log.append_user("   ", None).err(), Some(InvalidState::BlankMessage));
        assert!(log.is_empty());
        assert!(!log.is_awaiting_reply());
    }

    #[test]
    fn user_entry_is_appended_before_the_reply_arrives() {
        let mut log = ConversationLog::new();
        let request = log
            .append_user("hi", Some("Cliente.kt".to_string()))
            .expect("message should be accepted");

        assert_eq!(log.entries(), &[ConversationEntry::user("hi")]);
        assert!(log.is_awaiting_reply());
        assert!(request.history.is_empty());
        assert_eq!(request.message, "hi");
        assert_eq!(request.context_label.as_deref(), Some("Cliente.kt"));

        assert!(log.finish_exchange(request.exchange, Ok("Hello!".to_string())));
        assert_eq!(
            log.entries(),
            &[
                ConversationEntry::user("hi"),
                ConversationEntry::assistant("Hello!")
            ]
        );
    }

    #[test]
    fn failed_send_appends_exactly_one_error_entry() {
        let mut log = ConversationLog::new();
        let before = log.len();
        let request = log.append_user("explain Room", None).expect("accepted");
        log.finish_exchange(
            request.exchange,
            Err(CompletionError::Network("connection refused".to_string())),
        );

        assert_eq!(log.len(), before + 2);
        assert_eq!(log.entries()[1], ConversationEntry::assistant(CHAT_ERROR_MESSAGE));
        assert!(!log.is_awaiting_reply());
    }

    #[test]
    fn history_carries_prior_turns_only() {
        let mut log = ConversationLog::new();
        let first = log.append_user("one", None).expect("accepted");
        log.finish_exchange(first.exchange, Ok("reply one".to_string()));

        let second = log.append_user("  two  ", None).expect("accepted");
        assert_eq!(second.message, "two");
        assert_eq!(
            second.history,
            vec![
                ConversationEntry::user("one"),
                ConversationEntry::assistant("reply one")
            ]
        );
    }

    #[test]
    fn second_submission_is_rejected_while_waiting() {
        let mut log = ConversationLog::new();
        let first = log.append_user("one", None).expect("accepted");
        assert_eq!(
            log.append_user("two", None).err(),
            Some(InvalidState::ExchangeInFlight)
        );
        assert_eq!(log.len(), 1);

        log.finish_exchange(first.exchange, Ok("done".to_string()));
        assert!(log.append_user("two", None).is_ok());
    }

    #[test]
    fn replies_for_unknown_exchanges_are_ignored() {
        let mut log = ConversationLog::new();
        let first = log.append_user("one", None).expect("accepted");
        log.finish_exchange(first.exchange, Ok("done".to_string()));

        assert!(!log.finish_exchange(first.exchange, Ok("duplicate".to_string())));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn blank_reply_is_replaced() {
        let mut log = ConversationLog::new();
        let request = log.append_user("hi", None).expect("accepted");
        log.finish_exchange(request.exchange, Ok(String::new()));
        assert_eq!(log.entries()[1].text, CHAT_EMPTY_MESSAGE);
        assert_ne!(log.entries()[1].text, PENDING_REPLY_LABEL);
        assert!(!log.is_awaiting_reply());
    }
}
