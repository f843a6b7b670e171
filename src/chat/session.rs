//! Chat Session Reducer
//!
//! Consumes the typed event sequence of one assistant response and folds it
//! into transcript state: buffered streaming text, a transient status line,
//! tool-progress bookkeeping, and finalized [`ChatMessage`]s. The reducer is
//! synchronous and pure; the tray drives it from stream callbacks.

use crate::api::stream::ChatStreamEvent;
use crate::chat::message::{ChatMessage, ToolRecord};

/// Suffix appended to partial text preserved by a cancelled stream.
pub const CANCELLATION_MARKER: &str = " [cancelled]";

/// Ephemeral record of the tool call currently in flight
#[derive(Debug, Clone, PartialEq)]
pub struct ToolProgress {
    pub tool: String,
    pub message: Option<String>,
}

/// In-memory state of one assistant conversation
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    streaming_text: String,
    status: Option<String>,
    active_tool: Option<ToolProgress>,
    tool_history: Vec<ToolRecord>,
    error: Option<String>,
    busy: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Text streamed so far for the turn in flight.
    pub fn streaming_text(&self) -> &str {
        &self.streaming_text
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn active_tool(&self) -> Option<&ToolProgress> {
        self.active_tool.as_ref()
    }

    /// Banner-level error from the last turn, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Record the outgoing user message and arm the session for a stream.
    pub fn begin_turn(&mut self, user_text: impl Into<String>) {
        self.messages.push(ChatMessage::user(user_text));
        self.clear_transient();
        self.error = None;
        self.busy = true;
    }

    /// Fold one stream event into the session.
    pub fn apply(&mut self, event: ChatStreamEvent) {
        match event {
            ChatStreamEvent::TextDelta { text } => {
                self.streaming_text.push_str(&text);
                // Prose arriving supersedes the status line.
                self.status = None;
            }
            ChatStreamEvent::Status { message } => {
                self.status = Some(message);
            }
            ChatStreamEvent::ToolStart { tool } => {
                self.active_tool = Some(ToolProgress {
                    tool: tool.clone(),
                    message: None,
                });
                self.tool_history.push(ToolRecord {
                    tool,
                    notes: Vec::new(),
                });
            }
            ChatStreamEvent::ToolProgress { tool, message } => {
                if let Some(record) = self
                    .tool_history
                    .iter_mut()
                    .rev()
                    .find(|record| record.tool == tool)
                {
                    record.notes.push(message.clone());
                } else {
                    self.tool_history.push(ToolRecord {
                        tool: tool.clone(),
                        notes: vec![message.clone()],
                    });
                }
                self.active_tool = Some(ToolProgress {
                    tool,
                    message: Some(message),
                });
            }
            ChatStreamEvent::ToolComplete => {
                self.active_tool = None;
            }
            ChatStreamEvent::Complete { payload } => {
                let content = if payload.message.is_empty() {
                    std::mem::take(&mut self.streaming_text)
                } else {
                    payload.message
                };

                let mut message = ChatMessage::assistant(content);
                message.suggested_values = payload.suggested_values;
                message.suggested_actions = payload.suggested_actions;
                message.custom_payload = payload.custom_payload;
                message.tool_history = std::mem::take(&mut self.tool_history);
                self.messages.push(message);

                self.finish_turn();
            }
            ChatStreamEvent::Error { message } => {
                // Preserve whatever streamed before the failure, then make
                // the failure visible in the transcript and in the banner.
                if !self.streaming_text.is_empty() {
                    let mut partial =
                        ChatMessage::assistant(std::mem::take(&mut self.streaming_text));
                    partial.tool_history = std::mem::take(&mut self.tool_history);
                    self.messages.push(partial);
                }
                self.messages
                    .push(ChatMessage::assistant(format!("Error: {}", message)));
                self.error = Some(message);

                self.finish_turn();
            }
            ChatStreamEvent::Cancelled => {
                // User cancellation is not an error; partial text survives as
                // a finalized message carrying the cancellation marker.
                if !self.streaming_text.is_empty() {
                    let mut content = std::mem::take(&mut self.streaming_text);
                    content.push_str(CANCELLATION_MARKER);

                    let mut message = ChatMessage::assistant(content);
                    message.cancelled = true;
                    message.tool_history = std::mem::take(&mut self.tool_history);
                    self.messages.push(message);
                }

                self.finish_turn();
            }
        }
    }

    /// Drop the transcript (new-chat action).
    pub fn reset(&mut self) {
        self.messages.clear();
        self.clear_transient();
        self.error = None;
        self.busy = false;
    }

    /// Replace the transcript with a persisted conversation.
    pub fn load(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
        self.clear_transient();
        self.error = None;
        self.busy = false;
    }

    fn finish_turn(&mut self) {
        self.clear_transient();
        self.busy = false;
    }

    fn clear_transient(&mut self) {
        self.streaming_text.clear();
        self.status = None;
        self.active_tool = None;
        self.tool_history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stream::{CompletePayload, CustomPayload};
    use crate::chat::message::Role;

    fn delta(text: &str) -> ChatStreamEvent {
        ChatStreamEvent::TextDelta {
            text: text.to_string(),
        }
    }

    fn complete(message: &str) -> ChatStreamEvent {
        ChatStreamEvent::Complete {
            payload: CompletePayload {
                message: message.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_streamed_buffer_is_concatenation_of_deltas() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        for part in ["a", "b", "", "cd"] {
            session.apply(delta(part));
        }
        assert_eq!(session.streaming_text(), "abcd");
    }

    #[test]
    fn test_cancel_with_partial_text_finalizes_one_marked_message() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(delta("partial answ"));
        session.apply(ChatStreamEvent::Cancelled);

        assert_eq!(session.messages().len(), 2);
        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert!(last.cancelled);
        assert!(last.content.ends_with(CANCELLATION_MARKER));
        assert!(last.content.starts_with("partial answ"));

        assert!(!session.is_busy());
        assert!(session.error().is_none());
        assert_eq!(session.streaming_text(), "");
    }

    #[test]
    fn test_cancel_with_empty_buffer_adds_no_message() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(ChatStreamEvent::Status {
            message: "Thinking".to_string(),
        });
        session.apply(ChatStreamEvent::Cancelled);

        // Only the user message remains.
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::User);
        assert!(session.status().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_tool_start_then_complete_leaves_no_stale_state() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(ChatStreamEvent::ToolStart {
            tool: "search".to_string(),
        });
        assert!(session.active_tool().is_some());

        session.apply(complete("done"));
        assert!(session.active_tool().is_none());
        assert!(session.status().is_none());
        assert_eq!(session.streaming_text(), "");
    }

    #[test]
    fn test_worked_event_sequence() {
        let mut session = ChatSession::new();
        session.begin_turn("find something");

        session.apply(ChatStreamEvent::Status {
            message: "Searching".to_string(),
        });
        session.apply(ChatStreamEvent::ToolStart {
            tool: "search".to_string(),
        });
        session.apply(ChatStreamEvent::ToolProgress {
            tool: "search".to_string(),
            message: "found 3".to_string(),
        });
        session.apply(ChatStreamEvent::ToolComplete);
        session.apply(delta("Here"));
        session.apply(delta(" you go"));
        session.apply(complete("Here you go"));

        assert_eq!(session.messages().len(), 2);
        let reply = session.messages().last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "Here you go");
        assert_eq!(reply.tool_history.len(), 1);
        assert_eq!(reply.tool_history[0].tool, "search");
        assert_eq!(reply.tool_history[0].notes, vec!["found 3".to_string()]);

        assert!(session.status().is_none());
        assert!(session.active_tool().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_complete_without_message_uses_streamed_text() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(delta("streamed"));
        session.apply(ChatStreamEvent::Complete {
            payload: CompletePayload::default(),
        });

        assert_eq!(session.messages().last().unwrap().content, "streamed");
    }

    #[test]
    fn test_complete_attaches_custom_payload() {
        let mut session = ChatSession::new();
        session.begin_turn("propose sections");
        session.apply(ChatStreamEvent::Complete {
            payload: CompletePayload {
                message: "How about this layout?".to_string(),
                custom_payload: Some(CustomPayload {
                    kind: "taxonomy_edit".to_string(),
                    data: serde_json::json!({"sections": [{"id": "s1", "title": "Overview"}]}),
                }),
                ..Default::default()
            },
        });

        let payload = session
            .messages()
            .last()
            .unwrap()
            .custom_payload
            .as_ref()
            .unwrap();
        assert_eq!(payload.kind, "taxonomy_edit");
    }

    #[test]
    fn test_error_preserves_partial_text_and_sets_banner() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(delta("half an ans"));
        session.apply(ChatStreamEvent::Error {
            message: "upstream timeout".to_string(),
        });

        // user + preserved partial + inline error
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].content, "half an ans");
        assert!(!session.messages()[1].cancelled);
        assert_eq!(session.messages()[2].content, "Error: upstream timeout");
        assert_eq!(session.error(), Some("upstream timeout"));
        assert!(!session.is_busy());
    }

    #[test]
    fn test_new_turn_clears_previous_error() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(ChatStreamEvent::Error {
            message: "boom".to_string(),
        });
        assert!(session.error().is_some());

        session.begin_turn("again");
        assert!(session.error().is_none());
        assert!(session.is_busy());
    }

    #[test]
    fn test_status_cleared_by_text() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(ChatStreamEvent::Status {
            message: "Searching".to_string(),
        });
        assert_eq!(session.status(), Some("Searching"));
        session.apply(delta("Here"));
        assert!(session.status().is_none());
    }

    #[test]
    fn test_load_replaces_transcript() {
        let mut session = ChatSession::new();
        session.begin_turn("hi");
        session.apply(complete("answer"));

        session.load(vec![ChatMessage::user("old"), ChatMessage::assistant("reply")]);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].content, "old");
        assert!(!session.is_busy());
    }
}
