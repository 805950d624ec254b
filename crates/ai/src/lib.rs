//! Campus Canteen AI - Gemini API client.
//!
//! A thin client for the Gemini `generateContent` endpoint, used for demand
//! prediction (storefront) and merchant advice (admin). Every call requests
//! JSON output constrained by a response schema; callers parse the returned
//! text themselves and supply their own fallback values when a call fails.
//!
//! The model is an opaque collaborator: nothing in this crate interprets
//! what it returns beyond transport-level decoding.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod error;
mod types;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GeminiError;
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
