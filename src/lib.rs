//! Rill Research Console
//!
//! A pure Rust web front-end for the Rill research-stream platform,
//! built with Leptos.

pub mod api;
pub mod app;
pub mod chat;
pub mod components;
pub mod pages;

pub use app::App;
