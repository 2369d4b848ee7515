//! In-memory chat session state. Conversations live only for the lifetime of
//! the session object; there is no transport, persistence, or delivery
//! guarantee beyond append order. The partner's side is simulated by a
//! fixed-delay echo reply.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Sender label for the local side of every conversation
pub const SELF_SENDER: &str = "You";

const AUTO_REPLY_TEXT: &str = "This is an auto-reply.";
const AUTO_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

/// How long a pin lasts before it drops out of the pinned view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinTerm {
    TwentyFourHours,
    SevenDays,
    ThirtyDays,
}

impl PinTerm {
    fn as_duration(self) -> Duration {
        match self {
            PinTerm::TwentyFourHours => Duration::from_secs(24 * 60 * 60),
            PinTerm::SevenDays => Duration::from_secs(7 * 24 * 60 * 60),
            PinTerm::ThirtyDays => Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

/// Quoted message carried by a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRef {
    pub sender: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub sender: String,
    pub content: String,
    pub sent_at: OffsetDateTime,
    pub status: MessageStatus,
    pub pinned: bool,
    /// Timer-clock deadline, so pins follow the same clock as the echo
    pub pinned_until: Option<Instant>,
    pub reply_to: Option<ReplyRef>,
}

impl Message {
    fn outgoing(content: &str, reply_to: Option<ReplyRef>) -> Self {
        Self {
            sender: SELF_SENDER.to_string(),
            content: content.to_string(),
            sent_at: OffsetDateTime::now_utc(),
            status: MessageStatus::Sent,
            pinned: false,
            pinned_until: None,
            reply_to,
        }
    }

    fn incoming(sender: &str, content: &str) -> Self {
        Self {
            sender: sender.to_string(),
            content: content.to_string(),
            sent_at: OffsetDateTime::now_utc(),
            status: MessageStatus::Read,
            pinned: false,
            pinned_until: None,
            reply_to: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no conversation with {0}")]
    UnknownConversation(String),

    #[error("no message at index {0}")]
    IndexOutOfRange(usize),
}

/// Per-session conversation store keyed by partner name
#[derive(Clone, Default)]
pub struct ChatSession {
    conversations: Arc<Mutex<HashMap<String, Vec<Message>>>>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a conversation, creating an empty one when absent
    pub async fn open(&self, partner: &str) {
        self.conversations
            .lock()
            .await
            .entry(partner.to_string())
            .or_default();
    }

    /// Known conversation partners, sorted by name
    pub async fn partners(&self) -> Vec<String> {
        let mut names: Vec<String> = self.conversations.lock().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Append an outgoing message and schedule the partner's echo reply.
    /// Blank input is ignored, matching the send box behavior.
    pub async fn send(&self, partner: &str, content: &str, reply_to: Option<ReplyRef>) {
        if content.trim().is_empty() {
            return;
        }

        {
            let mut guard = self.conversations.lock().await;
            guard
                .entry(partner.to_string())
                .or_default()
                .push(Message::outgoing(content, reply_to));
        }

        // Simulated partner: a plain timer callback, not a cancellable job
        let conversations = Arc::clone(&self.conversations);
        let partner = partner.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(AUTO_REPLY_DELAY).await;

            let mut guard = conversations.lock().await;
            let Some(messages) = guard.get_mut(&partner) else {
                return;
            };

            // The reply doubles as a delivery receipt for everything sent
            for message in messages.iter_mut() {
                if message.sender == SELF_SENDER && message.status == MessageStatus::Sent {
                    message.status = MessageStatus::Delivered;
                }
            }

            messages.push(Message::incoming(&partner, AUTO_REPLY_TEXT));
        });
    }

    /// Copy a message to each recipient as a fresh outgoing message
    pub async fn forward(
        &self,
        partner: &str,
        index: usize,
        recipients: &[&str],
    ) -> Result<(), ChatError> {
        let mut guard = self.conversations.lock().await;

        let source = guard
            .get(partner)
            .ok_or_else(|| ChatError::UnknownConversation(partner.to_string()))?
            .get(index)
            .ok_or(ChatError::IndexOutOfRange(index))?
            .clone();

        for recipient in recipients {
            guard
                .entry(recipient.to_string())
                .or_default()
                .push(Message::outgoing(&source.content, source.reply_to.clone()));
        }

        Ok(())
    }

    /// Pin a message for the chosen term
    pub async fn pin(&self, partner: &str, index: usize, term: PinTerm) -> Result<(), ChatError> {
        self.with_message(partner, index, |message| {
            message.pinned = true;
            message.pinned_until = Some(Instant::now() + term.as_duration());
        })
        .await
    }

    pub async fn unpin(&self, partner: &str, index: usize) -> Result<(), ChatError> {
        self.with_message(partner, index, |message| {
            message.pinned = false;
            message.pinned_until = None;
        })
        .await
    }

    /// Delete a message by index
    pub async fn delete(&self, partner: &str, index: usize) -> Result<(), ChatError> {
        let mut guard = self.conversations.lock().await;
        let messages = guard
            .get_mut(partner)
            .ok_or_else(|| ChatError::UnknownConversation(partner.to_string()))?;

        if index >= messages.len() {
            return Err(ChatError::IndexOutOfRange(index));
        }
        messages.remove(index);
        Ok(())
    }

    /// All messages with a partner, in append order
    pub async fn messages(&self, partner: &str) -> Vec<Message> {
        self.conversations
            .lock()
            .await
            .get(partner)
            .cloned()
            .unwrap_or_default()
    }

    /// Pinned messages whose term has not yet expired
    pub async fn pinned(&self, partner: &str) -> Vec<Message> {
        let now = Instant::now();
        self.messages(partner)
            .await
            .into_iter()
            .filter(|m| m.pinned && m.pinned_until.map(|until| until > now).unwrap_or(true))
            .collect()
    }

    async fn with_message(
        &self,
        partner: &str,
        index: usize,
        apply: impl FnOnce(&mut Message),
    ) -> Result<(), ChatError> {
        let mut guard = self.conversations.lock().await;
        let messages = guard
            .get_mut(partner)
            .ok_or_else(|| ChatError::UnknownConversation(partner.to_string()))?;

        let message = messages
            .get_mut(index)
            .ok_or(ChatError::IndexOutOfRange(index))?;

        apply(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Long enough for the echo timer to fire under the paused test clock
    const PAST_ECHO: Duration = Duration::from_millis(600);

    #[tokio::test(start_paused = true)]
    async fn send_appends_then_echoes() {
        let session = ChatSession::new();

        session.send("Riya", "hey, saw your project", None).await;

        let messages = session.messages("Riya").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, SELF_SENDER);
        assert_eq!(messages[0].status, MessageStatus::Sent);

        tokio::time::sleep(PAST_ECHO).await;

        let messages = session.messages("Riya").await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].status, MessageStatus::Delivered);
        assert_eq!(messages[1].sender, "Riya");
        assert_eq!(messages[1].content, "This is an auto-reply.");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_messages_are_ignored() {
        let session = ChatSession::new();

        session.send("Riya", "   ", None).await;
        tokio::time::sleep(PAST_ECHO).await;

        assert!(session.messages("Riya").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_carries_the_quoted_message() {
        let session = ChatSession::new();

        session.send("Riya", "first", None).await;
        tokio::time::sleep(PAST_ECHO).await;

        let quoted = ReplyRef {
            sender: "Riya".to_string(),
            content: "This is an auto-reply.".to_string(),
        };
        session.send("Riya", "replying to you", Some(quoted.clone())).await;

        let messages = session.messages("Riya").await;
        assert_eq!(messages.last().unwrap().reply_to, Some(quoted));
    }

    #[tokio::test(start_paused = true)]
    async fn forward_copies_to_each_recipient() {
        let session = ChatSession::new();

        session.send("Riya", "check this out", None).await;
        session.forward("Riya", 0, &["Dev", "Ishan"]).await.unwrap();

        for partner in ["Dev", "Ishan"] {
            let messages = session.messages(partner).await;
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].sender, SELF_SENDER);
            assert_eq!(messages[0].content, "check this out");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn forward_unknown_message_fails() {
        let session = ChatSession::new();
        session.open("Riya").await;

        assert!(matches!(
            session.forward("Riya", 3, &["Dev"]).await,
            Err(ChatError::IndexOutOfRange(3))
        ));
        assert!(matches!(
            session.forward("Nobody", 0, &["Dev"]).await,
            Err(ChatError::UnknownConversation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn pin_expires_after_its_term() {
        let session = ChatSession::new();

        session.send("Riya", "pinned note", None).await;
        session
            .pin("Riya", 0, PinTerm::TwentyFourHours)
            .await
            .unwrap();

        assert_eq!(session.pinned("Riya").await.len(), 1);

        tokio::time::sleep(Duration::from_secs(25 * 60 * 60)).await;
        assert!(session.pinned("Riya").await.is_empty());
        // The message itself is still there, only the pin lapsed
        assert_eq!(session.messages("Riya").await.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unpin_clears_the_pin() {
        let session = ChatSession::new();

        session.send("Riya", "note", None).await;
        session.pin("Riya", 0, PinTerm::SevenDays).await.unwrap();
        session.unpin("Riya", 0).await.unwrap();

        assert!(session.pinned("Riya").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_removes_by_index() {
        let session = ChatSession::new();

        session.send("Riya", "one", None).await;
        session.send("Riya", "two", None).await;
        session.delete("Riya", 0).await.unwrap();

        let messages = session.messages("Riya").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "two");
    }

    #[tokio::test(start_paused = true)]
    async fn open_registers_the_partner() {
        let session = ChatSession::new();

        session.open("Riya").await;
        session.open("Dev").await;
        session.open("Riya").await;

        assert_eq!(session.partners().await, vec!["Dev", "Riya"]);
        assert!(session.messages("Riya").await.is_empty());
    }
}
