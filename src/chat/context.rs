//! Page Context Bridge
//!
//! Pages publish a snapshot of what the user is looking at; the chat tray
//! sends it with every request so the assistant can ground its answers and
//! proposals. Accepted payloads flow back through handlers the page
//! registers for its lifetime.

use leptos::{create_rw_signal, on_cleanup, use_context, RwSignal};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::chat::payload::{HandlerRegistry, PayloadHandler};

/// Context the active page shares with the assistant
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContext {
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<Uuid>,
    /// Free-form page detail (active tab, draft values, filters)
    #[serde(skip_serializing_if = "Value::is_null")]
    pub detail: Value,
}

impl PageContext {
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            stream_id: None,
            detail: Value::Null,
        }
    }

    pub fn with_stream(mut self, stream_id: Uuid) -> Self {
        self.stream_id = Some(stream_id);
        self
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Shared state between pages and the chat tray
#[derive(Clone)]
pub struct ChatBridge {
    pub context: RwSignal<PageContext>,
    pub handlers: HandlerRegistry,
}

impl ChatBridge {
    pub fn new() -> Self {
        Self {
            context: create_rw_signal(PageContext::default()),
            handlers: HandlerRegistry::new(),
        }
    }
}

/// Fetch the bridge provided at the app root.
pub fn use_chat_bridge() -> ChatBridge {
    use_context::<ChatBridge>().expect("ChatBridge should be provided at the app root")
}

/// Register a payload handler for the lifetime of the calling page.
pub fn register_page_handler(bridge: &ChatBridge, kind: &'static str, handler: PayloadHandler) {
    bridge.handlers.register(kind, handler);

    let handlers = bridge.handlers.clone();
    on_cleanup(move || handlers.unregister(kind));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_context_serializes_compactly() {
        let context = PageContext::new("streams");
        let value = context.to_value();
        assert_eq!(value["page"], "streams");
        assert!(value.get("stream_id").is_none());
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn test_page_context_with_stream_and_detail() {
        let id = Uuid::new_v4();
        let context = PageContext::new("stream_editor")
            .with_stream(id)
            .with_detail(serde_json::json!({"tab": "taxonomy"}));

        let value = context.to_value();
        assert_eq!(value["stream_id"], serde_json::json!(id));
        assert_eq!(value["detail"]["tab"], "taxonomy");
    }
}
