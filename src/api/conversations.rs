//! Conversation Store Client
//!
//! Thin REST wrapper over the persisted conversation records backing the
//! chat tray's history picker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::chat::message::ChatMessage;

/// Summary row from GET /api/v1/conversations
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ConversationSummary {
    pub conversation_id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message_count: usize,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ConversationList {
    #[serde(default)]
    conversations: Vec<ConversationSummary>,
}

/// Full record from GET /api/v1/conversations/:id
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub conversation_id: Uuid,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
struct CreateConversation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

/// Client for the conversation endpoints
pub struct ConversationApi {
    client: ApiClient,
}

impl ConversationApi {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        let response: ConversationList = self.client.get("/api/v1/conversations").await?;
        Ok(response.conversations)
    }

    pub async fn create(&self, title: Option<&str>) -> Result<ConversationSummary, ApiError> {
        self.client
            .post("/api/v1/conversations", &CreateConversation { title })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Conversation, ApiError> {
        self.client
            .get(&format!("/api/v1/conversations/{}", id))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/v1/conversations/{}", id))
            .await
    }
}

impl Default for ConversationApi {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Role;

    #[test]
    fn test_conversation_deserializes_messages() {
        let json = r#"{
            "conversation_id": "6f7c9a46-94b3-4f07-9db4-6f1d3f0a2a11",
            "messages": [
                {"role": "user", "content": "hi", "timestamp": "2026-08-01T10:00:00Z"},
                {"role": "assistant", "content": "hello", "timestamp": "2026-08-01T10:00:02Z"}
            ]
        }"#;

        let conversation: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].role, Role::User);
        assert_eq!(conversation.messages[1].content, "hello");
        assert!(conversation.messages[1].tool_history.is_empty());
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let json = r#"{"conversation_id": "6f7c9a46-94b3-4f07-9db4-6f1d3f0a2a11"}"#;
        let summary: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.title, "");
        assert_eq!(summary.message_count, 0);
        assert!(summary.updated_at.is_none());
    }
}
