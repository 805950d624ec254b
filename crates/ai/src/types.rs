//! Types for the Gemini API.
//!
//! These types match the `generateContent` REST format, reduced to the
//! fields this platform uses.

use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    /// Conversation contents; a single user turn for our calls.
    pub contents: Vec<Content>,
    /// Output constraints.
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// The turn's content parts.
    pub parts: Vec<Part>,
    /// Role of the sender ("user" or "model"); absent on some responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    /// A single-part user turn.
    #[must_use]
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
            role: Some("user".to_owned()),
        }
    }
}

/// One content part. Only text parts are used here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// The text content.
    pub text: String,
}

/// Output configuration for structured JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    /// MIME type of the response ("application/json" for our calls).
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    /// JSON Schema constraining the response shape.
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// JSON output constrained by `schema`.
    #[must_use]
    pub fn json_with_schema(schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: "application/json".to_owned(),
            response_schema: Some(schema),
        }
    }
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates; the first one is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// The candidate's content.
    pub content: Content,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        if candidate.content.parts.is_empty() {
            return None;
        }
        Some(
            candidate
                .content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect(),
        )
    }
}
