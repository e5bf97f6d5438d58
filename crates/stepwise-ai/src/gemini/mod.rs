//! Google Gemini API client.
//!
//! Implements the `AiClient` trait against Gemini's OpenAI-compatible
//! chat-completions endpoint, using a JSON-schema `response_format` so every
//! reply is a single step object.

mod api;
mod client;
mod config;

pub use client::GeminiClient;
pub use config::GeminiConfig;
