//! Chat Assistant State
//!
//! Pure state for the embedded assistant: message records, the streaming
//! session reducer, the payload lifecycle, and the page-context bridge.
//! Everything here is host-testable; the WASM wiring lives in
//! `components::chat_tray`.

pub mod context;
pub mod message;
pub mod payload;
pub mod session;

pub use message::{ChatMessage, Role, ToolRecord};
pub use payload::{PayloadHandler, PayloadLifecycle, PayloadPhase, PendingPayload, RenderOptions};
pub use session::ChatSession;
