//! Gemini API client.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use crate::error::{ApiErrorResponse, GeminiError};
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini API configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`.
    pub api_key: SecretString,
    /// Model used for the heavier prediction calls.
    pub pro_model: String,
    /// Model used for the lighter advice calls.
    pub flash_model: String,
    /// Endpoint base URL; overridable for tests.
    pub base_url: String,
}

impl GeminiConfig {
    /// Configuration against the public endpoint with the default models.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            pro_model: "gemini-3-pro-preview".to_owned(),
            flash_model: "gemini-3-flash-preview".to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("pro_model", &self.pro_model)
            .field("flash_model", &self.flash_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Gemini API client.
///
/// Issues `generateContent` calls that request schema-constrained JSON
/// output. `Clone` is cheap - all internal state is `Arc`-wrapped.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    base_url: String,
    pro_model: String,
    flash_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key_value = HeaderValue::from_str(config.api_key.expose_secret())
            .expect("Invalid API key for header");
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(GeminiClientInner {
                client,
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                pro_model: config.pro_model.clone(),
                flash_model: config.flash_model.clone(),
            }),
        }
    }

    /// Model name used for prediction calls.
    #[must_use]
    pub fn pro_model(&self) -> &str {
        &self.inner.pro_model
    }

    /// Model name used for advice calls.
    #[must_use]
    pub fn flash_model(&self) -> &str {
        &self.inner.flash_model
    }

    /// Send a prompt and return the model's JSON text, constrained by `schema`.
    ///
    /// The returned string is the raw JSON document; callers deserialize it
    /// into their own types.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// response carries no text.
    #[instrument(skip(self, prompt, schema))]
    pub async fn generate_json(
        &self,
        model: &str,
        prompt: &str,
        schema: serde_json::Value,
    ) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig::json_with_schema(schema)),
        };

        let url = format!(
            "{}/v1beta/models/{model}:generateContent",
            self.inner.base_url
        );

        let response = self.inner.client.post(url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_owned(),
            };
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        body.first_text().ok_or(GeminiError::EmptyResponse)
    }
}
