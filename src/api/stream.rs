//! Chat Stream Transport
//!
//! Opens a cancellable POST to /api/v1/chat/stream and decodes the
//! SSE-framed event sequence into typed [`ChatStreamEvent`]s. Event frames
//! are `data: <json>` lines terminated by a blank line; the JSON carries a
//! `type` discriminant.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, ReadableStreamDefaultReader, RequestInit, Response};

use crate::api::error::ApiError;

// ============================================================================
// Event Types (matches server chat stream framing)
// ============================================================================

/// Server event on the chat stream
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamEvent {
    /// Incremental assistant text
    TextDelta { text: String },
    /// Transient status line ("Searching sources...")
    Status { message: String },
    /// A server-side tool call began
    ToolStart { tool: String },
    /// Progress report for the in-flight tool call
    ToolProgress { tool: String, message: String },
    /// The in-flight tool call finished
    ToolComplete,
    /// Final assistant turn
    Complete {
        #[serde(default)]
        payload: CompletePayload,
    },
    /// Stream-level failure
    Error { message: String },
    /// The stream was cancelled (server-acknowledged or client-synthesized)
    Cancelled,
}

/// Body of the terminal `complete` event
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CompletePayload {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub suggested_values: Option<Value>,
    #[serde(default)]
    pub suggested_actions: Vec<SuggestedAction>,
    #[serde(default)]
    pub custom_payload: Option<CustomPayload>,
}

/// A follow-up action the assistant proposes alongside its answer
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SuggestedAction {
    pub label: String,
    pub action: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Structured payload attached to an assistant message, rendered by a
/// kind-specific handler instead of plain text
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CustomPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

/// Client request body for POST /api/v1/chat/stream
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<Uuid>,
    /// Page-scoped context published by the active page
    pub context: Value,
}

// ============================================================================
// SSE Frame Decoder
// ============================================================================

/// Incremental decoder for `text/event-stream` bytes.
///
/// Chunks may split frames, lines, and UTF-8 sequences arbitrarily; the
/// decoder buffers bytes and only yields the `data:` payload of complete
/// frames (blank-line terminated). Multiple `data:` lines in one frame are
/// joined with `\n` per the SSE framing rules.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning the data payloads of every frame it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(end) = find_frame_end(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end.frame_len).collect();
            self.buffer.drain(..end.separator_len);
            if let Some(data) = decode_frame(&frame) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flush a trailing unterminated frame at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let frame = std::mem::take(&mut self.buffer);
        decode_frame(&frame)
    }
}

struct FrameEnd {
    frame_len: usize,
    separator_len: usize,
}

/// Locate the first blank-line frame terminator (`\n\n` or `\r\n\r\n`).
fn find_frame_end(buffer: &[u8]) -> Option<FrameEnd> {
    let mut i = 0;
    while i < buffer.len() {
        if buffer[i] == b'\n' {
            if buffer.get(i + 1) == Some(&b'\n') {
                return Some(FrameEnd {
                    frame_len: i,
                    separator_len: 2,
                });
            }
            if buffer.get(i + 1) == Some(&b'\r') && buffer.get(i + 2) == Some(&b'\n') {
                return Some(FrameEnd {
                    frame_len: i,
                    separator_len: 3,
                });
            }
        }
        i += 1;
    }
    None
}

/// Extract the joined `data:` payload of one frame, if any.
fn decode_frame(frame: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(frame);
    let mut data_lines = Vec::new();

    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.starts_with(':') {
            // SSE comment / keep-alive
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

/// Parse one frame payload into a typed event. Unknown or malformed frames
/// return None and are skipped by the transport.
pub fn parse_event(payload: &str) -> Option<ChatStreamEvent> {
    let trimmed = payload.trim();
    if trimmed.is_empty() || trimmed == "[DONE]" {
        return None;
    }
    serde_json::from_str::<ChatStreamEvent>(trimmed).ok()
}

// ============================================================================
// Cancellable Transport
// ============================================================================

/// Handle for one in-flight chat stream
pub struct StreamHandle {
    controller: AbortController,
    generation: u64,
}

impl StreamHandle {
    /// Abort the underlying fetch. The read loop observes the AbortError and
    /// synthesizes a `cancelled` event for this generation.
    pub fn cancel(&self) {
        self.controller.abort();
    }
}

/// Serializes chat requests for one tray instance: at most one stream is
/// live, and starting a new one invalidates every event from its
/// predecessor (last caller wins).
pub struct ChatStreamController {
    base_url: String,
    current: Rc<Cell<u64>>,
    active: RefCell<Option<StreamHandle>>,
}

impl ChatStreamController {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            current: Rc::new(Cell::new(0)),
            active: RefCell::new(None),
        }
    }

    /// Open a stream for `request`, delivering events to `on_event`.
    ///
    /// Any previous stream is aborted first; its remaining events (including
    /// the abort-synthesized `cancelled`) are dropped by the generation
    /// guard rather than delivered to the stale callback.
    pub fn start(
        &self,
        request: &ChatRequest,
        on_event: impl Fn(ChatStreamEvent) + 'static,
    ) -> Result<(), ApiError> {
        let generation = self.current.get() + 1;
        self.current.set(generation);

        if let Some(previous) = self.active.borrow_mut().take() {
            previous.cancel();
        }

        let controller = AbortController::new()
            .map_err(|e| ApiError::Network(js_error_message(&e)))?;
        let signal = controller.signal();

        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let url = format!("{}/api/v1/chat/stream", self.base_url);

        let gate = Rc::clone(&self.current);
        let deliver = move |event: ChatStreamEvent| {
            if gate.get() == generation {
                on_event(event);
            }
        };

        leptos::spawn_local(run_stream(url, body, signal, deliver));

        *self.active.borrow_mut() = Some(StreamHandle {
            controller,
            generation,
        });
        Ok(())
    }

    /// Cancel the in-flight stream, if any. The synthesized `cancelled`
    /// event is still delivered so the session can preserve partial text.
    pub fn cancel(&self) {
        if let Some(handle) = self.active.borrow().as_ref() {
            if handle.generation == self.current.get() {
                handle.cancel();
            }
        }
    }
}

/// Fetch the stream and pump decoded events into the callback.
async fn run_stream(
    url: String,
    body: String,
    signal: web_sys::AbortSignal,
    on_event: impl Fn(ChatStreamEvent),
) {
    let terminal_seen = Cell::new(false);
    let emit = |event: ChatStreamEvent| {
        if matches!(
            event,
            ChatStreamEvent::Complete { .. } | ChatStreamEvent::Error { .. } | ChatStreamEvent::Cancelled
        ) {
            terminal_seen.set(true);
        }
        on_event(event);
    };

    let response = match fetch_stream(&url, &body, &signal).await {
        Ok(response) => response,
        Err(err) => {
            emit(stream_failure(err));
            return;
        }
    };

    if !response.ok() {
        emit(ChatStreamEvent::Error {
            message: format!("chat endpoint returned status {}", response.status()),
        });
        return;
    }

    let Some(stream) = response.body() else {
        emit(ChatStreamEvent::Error {
            message: "chat endpoint returned no body".to_string(),
        });
        return;
    };

    let reader: ReadableStreamDefaultReader = match stream.get_reader().dyn_into() {
        Ok(reader) => reader,
        Err(_) => {
            emit(ChatStreamEvent::Error {
                message: "response body is not readable".to_string(),
            });
            return;
        }
    };

    let mut decoder = SseDecoder::new();
    loop {
        let chunk = match JsFuture::from(reader.read()).await {
            Ok(chunk) => chunk,
            Err(err) => {
                emit(stream_failure(err));
                return;
            }
        };

        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }

        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).unwrap_or_default();
        let bytes = js_sys::Uint8Array::new(&value).to_vec();

        for payload in decoder.push(&bytes) {
            match parse_event(&payload) {
                Some(event) => emit(event),
                None => gloo_console::warn!("skipping unrecognized stream frame:", payload),
            }
        }
    }

    if let Some(payload) = decoder.finish() {
        if let Some(event) = parse_event(&payload) {
            emit(event);
        }
    }

    // A stream that ends without complete/error/cancelled is a failure; the
    // session must not be left waiting on it.
    if !terminal_seen.get() {
        emit(ChatStreamEvent::Error {
            message: "stream ended unexpectedly".to_string(),
        });
    }
}

async fn fetch_stream(
    url: &str,
    body: &str,
    signal: &web_sys::AbortSignal,
) -> Result<Response, JsValue> {
    let headers = Headers::new()?;
    headers.append("Content-Type", "application/json")?;
    headers.append("Accept", "text/event-stream")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(body));
    init.set_signal(Some(signal));

    let request = web_sys::Request::new_with_str_and_init(url, &init)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await?;
    response.dyn_into::<Response>()
}

/// Map a rejected fetch/read into the event the reducer expects: aborts
/// become `cancelled`, everything else becomes `error`.
fn stream_failure(err: JsValue) -> ChatStreamEvent {
    if is_abort_error(&err) {
        ChatStreamEvent::Cancelled
    } else {
        ChatStreamEvent::Error {
            message: js_error_message(&err),
        }
    }
}

fn is_abort_error(err: &JsValue) -> bool {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .is_some_and(|name| name == "AbortError")
}

fn js_error_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_single_frame() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: {\"type\":\"text_delta\",\"text\":\"hi\"}\n\n");
        assert_eq!(payloads, vec![r#"{"type":"text_delta","text":"hi"}"#]);
    }

    #[test]
    fn test_decoder_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: {\"type\":\"too").is_empty());
        assert!(decoder.push(b"l_complete\"}").is_empty());
        let payloads = decoder.push(b"\n\ndata: x\n\n");
        assert_eq!(payloads, vec![r#"{"type":"tool_complete"}"#, "x"]);
    }

    #[test]
    fn test_decoder_multiline_data_and_comments() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b": keep-alive\ndata: first\ndata: second\n\n");
        assert_eq!(payloads, vec!["first\nsecond"]);
    }

    #[test]
    fn test_decoder_crlf_frames() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: a\r\n\r\ndata: b\r\n\r\n");
        assert_eq!(payloads, vec!["a", "b"]);
    }

    #[test]
    fn test_decoder_finish_flushes_trailing_frame() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_decoder_utf8_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        let text = "data: {\"type\":\"text_delta\",\"text\":\"héllo\"}\n\n";
        let bytes = text.as_bytes();
        // Split inside the two-byte é sequence.
        let mid = text.find('é').unwrap() + 1;
        assert!(decoder.push(&bytes[..mid]).is_empty());
        let payloads = decoder.push(&bytes[mid..]);
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].contains("héllo"));
    }

    #[test]
    fn test_parse_event_discriminants() {
        assert_eq!(
            parse_event(r#"{"type":"text_delta","text":"Here"}"#),
            Some(ChatStreamEvent::TextDelta {
                text: "Here".to_string()
            })
        );
        assert_eq!(
            parse_event(r#"{"type":"status","message":"Searching"}"#),
            Some(ChatStreamEvent::Status {
                message: "Searching".to_string()
            })
        );
        assert_eq!(
            parse_event(r#"{"type":"tool_start","tool":"search"}"#),
            Some(ChatStreamEvent::ToolStart {
                tool: "search".to_string()
            })
        );
        assert_eq!(
            parse_event(r#"{"type":"tool_complete"}"#),
            Some(ChatStreamEvent::ToolComplete)
        );
        assert_eq!(parse_event(r#"{"type":"cancelled"}"#), Some(ChatStreamEvent::Cancelled));
    }

    #[test]
    fn test_parse_complete_event_with_custom_payload() {
        let event = parse_event(
            r#"{
                "type": "complete",
                "payload": {
                    "message": "Here you go",
                    "custom_payload": {
                        "type": "taxonomy_edit",
                        "data": {"sections": []}
                    }
                }
            }"#,
        )
        .unwrap();

        match event {
            ChatStreamEvent::Complete { payload } => {
                assert_eq!(payload.message, "Here you go");
                let custom = payload.custom_payload.unwrap();
                assert_eq!(custom.kind, "taxonomy_edit");
                assert!(custom.data.get("sections").is_some());
            }
            other => panic!("expected complete, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_skips_noise() {
        assert_eq!(parse_event(""), None);
        assert_eq!(parse_event("[DONE]"), None);
        assert_eq!(parse_event("{not json"), None);
        assert_eq!(parse_event(r#"{"type":"unknown_kind"}"#), None);
    }
}
