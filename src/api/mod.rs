//! API Client Module

pub mod client;
pub mod conversations;
pub mod error;
pub mod stream;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
