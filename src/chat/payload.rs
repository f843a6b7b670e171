//! Payload Lifecycle
//!
//! Assistant messages may carry a structured payload rendered by a
//! kind-specific handler instead of plain text. Each message index moves
//! through `none -> pending -> active -> dismissed`; dismissal is terminal
//! and sticky. Only the latest message can surface a payload, so at most
//! one is pending or active at a time.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use leptos::View;
use serde_json::Value;

use crate::chat::message::{ChatMessage, Role};

/// Where the surfaced payload sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadPhase {
    /// Announced in the transcript, panel not yet opened
    Pending,
    /// Panel open
    Active,
}

/// Derived payload descriptor; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPayload {
    pub kind: String,
    pub data: Value,
    pub message_index: usize,
}

/// Tri-state tracker for payload-bearing message indices
#[derive(Debug, Default)]
pub struct PayloadLifecycle {
    dismissed: HashSet<usize>,
    active: Option<usize>,
}

impl PayloadLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the surfaced payload from the transcript tail.
    ///
    /// Only the latest message is considered; it must be an assistant
    /// message carrying a payload whose kind has a registered handler, and
    /// its index must not have been dismissed.
    pub fn current(
        &self,
        messages: &[ChatMessage],
        mut has_handler: impl FnMut(&str) -> bool,
    ) -> Option<(PendingPayload, PayloadPhase)> {
        let index = messages.len().checked_sub(1)?;
        let message = messages.last()?;
        if message.role != Role::Assistant {
            return None;
        }

        let payload = message.custom_payload.as_ref()?;
        if self.dismissed.contains(&index) {
            return None;
        }
        if !has_handler(&payload.kind) {
            return None;
        }

        let phase = if self.active == Some(index) {
            PayloadPhase::Active
        } else {
            PayloadPhase::Pending
        };

        Some((
            PendingPayload {
                kind: payload.kind.clone(),
                data: payload.data.clone(),
                message_index: index,
            },
            phase,
        ))
    }

    /// Open the panel for a pending payload ("View").
    pub fn activate(&mut self, message_index: usize) {
        if !self.dismissed.contains(&message_index) {
            self.active = Some(message_index);
        }
    }

    /// Close the payload for good. Dismissal is terminal: the index never
    /// resurfaces, even when the transcript is replayed from history.
    pub fn dismiss(&mut self, message_index: usize) {
        self.dismissed.insert(message_index);
        if self.active == Some(message_index) {
            self.active = None;
        }
    }

    /// Forget all lifecycle state (reset or conversation switch).
    pub fn reset(&mut self) {
        self.dismissed.clear();
        self.active = None;
    }
}

// ============================================================================
// Handler Registry
// ============================================================================

/// Panel chrome overrides a handler may request
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub panel_width: &'static str,
    pub header_title: String,
    pub header_icon: &'static str,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            panel_width: "w-96",
            header_title: "Assistant proposal".to_string(),
            header_icon: "✦",
        }
    }
}

/// Callbacks handed to a handler's render function so custom panel UI can
/// resolve the payload itself.
#[derive(Clone)]
pub struct PayloadActions {
    pub accept: Rc<dyn Fn()>,
    pub reject: Rc<dyn Fn()>,
}

/// Renderer and resolution hooks for one payload kind
#[derive(Clone)]
pub struct PayloadHandler {
    pub render: Rc<dyn Fn(&Value, &PayloadActions) -> View>,
    pub on_accept: Option<Rc<dyn Fn(&Value)>>,
    pub on_reject: Option<Rc<dyn Fn(&Value)>>,
    pub options: RenderOptions,
}

impl PayloadHandler {
    pub fn new(render: impl Fn(&Value, &PayloadActions) -> View + 'static) -> Self {
        Self {
            render: Rc::new(render),
            on_accept: None,
            on_reject: None,
            options: RenderOptions::default(),
        }
    }

    pub fn on_accept(mut self, f: impl Fn(&Value) + 'static) -> Self {
        self.on_accept = Some(Rc::new(f));
        self
    }

    pub fn on_reject(mut self, f: impl Fn(&Value) + 'static) -> Self {
        self.on_reject = Some(Rc::new(f));
        self
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Shared handler table keyed by payload kind. Pages register handlers for
/// the kinds they can apply while mounted and remove them on cleanup.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Rc<RefCell<HashMap<String, PayloadHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, kind: impl Into<String>, handler: PayloadHandler) {
        self.handlers.borrow_mut().insert(kind.into(), handler);
    }

    pub fn unregister(&self, kind: &str) {
        self.handlers.borrow_mut().remove(kind);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.handlers.borrow().contains_key(kind)
    }

    pub fn get(&self, kind: &str) -> Option<PayloadHandler> {
        self.handlers.borrow().get(kind).cloned()
    }
}

/// Resolution order: tray-local handlers shadow the global registry.
pub fn resolve_handler(
    local: &HandlerRegistry,
    global: &HandlerRegistry,
    kind: &str,
) -> Option<PayloadHandler> {
    local.get(kind).or_else(|| global.get(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stream::CustomPayload;
    use leptos::IntoView;

    fn payload_message(kind: &str) -> ChatMessage {
        let mut message = ChatMessage::assistant("take a look");
        message.custom_payload = Some(CustomPayload {
            kind: kind.to_string(),
            data: serde_json::json!({"n": 1}),
        });
        message
    }

    fn transcript(with_payload_last: bool) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::user("hi")];
        if with_payload_last {
            messages.push(payload_message("taxonomy_edit"));
        } else {
            messages.push(ChatMessage::assistant("plain reply"));
        }
        messages
    }

    #[test]
    fn test_latest_payload_is_pending() {
        let lifecycle = PayloadLifecycle::new();
        let messages = transcript(true);

        let (payload, phase) = lifecycle.current(&messages, |_| true).unwrap();
        assert_eq!(payload.kind, "taxonomy_edit");
        assert_eq!(payload.message_index, 1);
        assert_eq!(phase, PayloadPhase::Pending);
    }

    #[test]
    fn test_view_action_activates() {
        let mut lifecycle = PayloadLifecycle::new();
        let messages = transcript(true);

        lifecycle.activate(1);
        let (_, phase) = lifecycle.current(&messages, |_| true).unwrap();
        assert_eq!(phase, PayloadPhase::Active);
    }

    #[test]
    fn test_dismissed_index_never_resurfaces() {
        let mut lifecycle = PayloadLifecycle::new();
        let mut messages = transcript(true);

        lifecycle.dismiss(1);
        assert!(lifecycle.current(&messages, |_| true).is_none());

        // Appending further messages must not resurrect index 1, and
        // activate() on a dismissed index is a no-op.
        lifecycle.activate(1);
        assert!(lifecycle.current(&messages, |_| true).is_none());

        messages.push(ChatMessage::user("more"));
        messages.push(payload_message("retrieval_proposal"));
        let (payload, _) = lifecycle.current(&messages, |_| true).unwrap();
        assert_eq!(payload.message_index, 3);

        // Replaying the shorter transcript still yields nothing for index 1.
        assert!(lifecycle.current(&messages[..2], |_| true).is_none());
    }

    #[test]
    fn test_only_latest_message_surfaces_payload() {
        let lifecycle = PayloadLifecycle::new();
        let mut messages = transcript(true);
        messages.push(ChatMessage::assistant("follow-up without payload"));

        assert!(lifecycle.current(&messages, |_| true).is_none());
    }

    #[test]
    fn test_payload_requires_registered_handler() {
        let lifecycle = PayloadLifecycle::new();
        let messages = transcript(true);

        assert!(lifecycle.current(&messages, |_| false).is_none());
        assert!(lifecycle
            .current(&messages, |kind| kind == "taxonomy_edit")
            .is_some());
    }

    #[test]
    fn test_reset_clears_dismissals() {
        let mut lifecycle = PayloadLifecycle::new();
        let messages = transcript(true);

        lifecycle.dismiss(1);
        lifecycle.reset();
        assert!(lifecycle.current(&messages, |_| true).is_some());
    }

    #[test]
    fn test_user_message_last_surfaces_nothing() {
        let lifecycle = PayloadLifecycle::new();
        let mut messages = transcript(true);
        messages.push(ChatMessage::user("wait"));

        assert!(lifecycle.current(&messages, |_| true).is_none());
    }

    #[test]
    fn test_local_handlers_shadow_global() {
        let local = HandlerRegistry::new();
        let global = HandlerRegistry::new();

        global.register(
            "prompt_suggestion",
            PayloadHandler::new(|_, _| ().into_view()).options(RenderOptions {
                header_title: "Global".to_string(),
                ..Default::default()
            }),
        );
        assert_eq!(
            resolve_handler(&local, &global, "prompt_suggestion")
                .unwrap()
                .options
                .header_title,
            "Global"
        );

        local.register(
            "prompt_suggestion",
            PayloadHandler::new(|_, _| ().into_view()).options(RenderOptions {
                header_title: "Local".to_string(),
                ..Default::default()
            }),
        );
        assert_eq!(
            resolve_handler(&local, &global, "prompt_suggestion")
                .unwrap()
                .options
                .header_title,
            "Local"
        );

        assert!(resolve_handler(&local, &global, "unknown").is_none());
    }

    #[test]
    fn test_unregister_removes_handler() {
        let registry = HandlerRegistry::new();
        registry.register("x", PayloadHandler::new(|_, _| ().into_view()));
        assert!(registry.contains("x"));
        registry.unregister("x");
        assert!(!registry.contains("x"));
    }
}
