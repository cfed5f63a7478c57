//! Chat widget state machine.
//!
//! The launcher is closed or open; the transcript is append-only. Sending
//! a visitor message schedules the canned agent reply after the configured
//! delay, and [`ChatWidget::poll`] delivers every reply that has come due.
//! This is scripted reassurance, not a conversational agent, and nothing
//! survives a reload.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use lane_content::ChatSettings;
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Visitor,
    Agent,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    fn new(sender: Sender, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text,
        }
    }
}

/// The chat launcher's state.
#[derive(Debug)]
pub struct ChatWidget {
    settings: ChatSettings,
    open: bool,
    transcript: Vec<ChatMessage>,
    /// When each queued agent reply comes due, in send order.
    pending_replies: VecDeque<Instant>,
}

impl ChatWidget {
    /// Create a closed widget with an empty transcript.
    #[must_use]
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            settings,
            open: false,
            transcript: Vec::new(),
            pending_replies: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip between open and closed.
    ///
    /// The first open seeds the transcript with the agent greeting; closing
    /// keeps the transcript.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if self.open && self.transcript.is_empty() {
            self.transcript
                .push(ChatMessage::new(Sender::Agent, self.settings.greeting.clone()));
        }
    }

    /// Append a visitor message and schedule the canned reply.
    pub fn send(&mut self, text: &str, now: Instant) {
        self.transcript
            .push(ChatMessage::new(Sender::Visitor, text.to_owned()));
        self.pending_replies
            .push_back(now + Duration::from_millis(self.settings.reply_delay_ms));
    }

    /// Append every agent reply due by `now`. Returns how many were added.
    pub fn poll(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while let Some(due) = self.pending_replies.front() {
            if *due > now {
                break;
            }
            self.pending_replies.pop_front();
            self.transcript
                .push(ChatMessage::new(Sender::Agent, self.settings.reply.clone()));
            delivered += 1;
        }
        delivered
    }

    /// The transcript so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn settings() -> ChatSettings {
        ChatSettings {
            greeting: "Hello!".to_owned(),
            reply: "We got it, hang tight.".to_owned(),
            reply_delay_ms: 1000,
        }
    }

    #[test]
    fn test_starts_closed_and_empty() {
        let widget = ChatWidget::new(settings());

        assert!(!widget.is_open());
        assert!(widget.messages().is_empty());
    }

    #[test]
    fn test_first_open_seeds_greeting_once() {
        let mut widget = ChatWidget::new(settings());

        widget.toggle();
        assert!(widget.is_open());
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(widget.messages()[0].sender, Sender::Agent);
        assert_eq!(widget.messages()[0].text, "Hello!");

        // Close and reopen: transcript kept, no second greeting
        widget.toggle();
        assert!(!widget.is_open());
        widget.toggle();
        assert_eq!(widget.messages().len(), 1);
    }

    #[test]
    fn test_send_appends_without_immediate_reply() {
        let mut widget = ChatWidget::new(settings());
        widget.toggle();
        let now = Instant::now();

        widget.send("Is my SUV too big?", now);

        assert_eq!(widget.messages().len(), 2);
        assert_eq!(widget.messages()[1].sender, Sender::Visitor);
        assert_eq!(widget.poll(now), 0);
    }

    #[test]
    fn test_reply_arrives_after_delay() {
        let mut widget = ChatWidget::new(settings());
        widget.toggle();
        let now = Instant::now();

        widget.send("Anyone there?", now);

        assert_eq!(widget.poll(now + Duration::from_millis(999)), 0);
        assert_eq!(widget.poll(now + Duration::from_millis(1000)), 1);

        let last = widget.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Agent);
        assert_eq!(last.text, "We got it, hang tight.");
    }

    #[test]
    fn test_replies_deliver_in_send_order() {
        let mut widget = ChatWidget::new(settings());
        widget.toggle();
        let now = Instant::now();

        widget.send("first", now);
        widget.send("second", now + Duration::from_millis(100));

        // Both due by now + 1100
        assert_eq!(widget.poll(now + Duration::from_millis(1100)), 2);
        assert_eq!(widget.messages().len(), 5);

        let senders: Vec<Sender> = widget.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Agent,
                Sender::Visitor,
                Sender::Visitor,
                Sender::Agent,
                Sender::Agent
            ]
        );
    }

    #[test]
    fn test_poll_is_quiet_with_nothing_pending() {
        let mut widget = ChatWidget::new(settings());
        widget.toggle();

        assert_eq!(widget.poll(Instant::now()), 0);
        assert_eq!(widget.messages().len(), 1);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let mut widget = ChatWidget::new(settings());
        widget.toggle();
        let now = Instant::now();
        widget.send("a", now);
        widget.send("b", now);
        widget.poll(now + Duration::from_secs(2));

        let mut ids: Vec<Uuid> = widget.messages().iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), widget.messages().len());
    }
}
