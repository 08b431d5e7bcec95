//! Image captioning through an external vision model.

use crate::image_prep::PreparedImage;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Header carrying the API key, kept out of the URL so it never shows up
/// in transport error messages.
const API_KEY_HEADER: &str = "x-goog-api-key";

const CAPTION_INSTRUCTION: &str =
    "Describe the structure shown in this image in one short sentence. Mention any visible damage such as cracks, collapse or exposed reinforcement.";

#[derive(Debug, Error)]
pub enum CaptionError {
    /// Built with the request URL stripped.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("No caption in response")]
    MissingCaption,
}

impl From<reqwest::Error> for CaptionError {
    fn from(err: reqwest::Error) -> Self {
        CaptionError::Http(err.without_url())
    }
}

/// Produces one caption per image.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn caption(&self, image: &PreparedImage) -> Result<String, CaptionError>;

    fn model_name(&self) -> &str;
}

/// Captioner backed by the Google Gemini `generateContent` endpoint.
pub struct GeminiCaptioner {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiCaptioner {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CaptionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Build the `generateContent` request body for one JPEG image.
pub fn gemini_payload(image_base64: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [{
            "parts": [
                {
                    "text": CAPTION_INSTRUCTION
                },
                {
                    "inline_data": {
                        "mime_type": "image/jpeg",
                        "data": image_base64
                    }
                }
            ]
        }]
    })
}

/// Pull the first candidate's text out of a `generateContent` response.
pub fn extract_caption(response: &serde_json::Value) -> Result<String, CaptionError> {
    let caption = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::trim)
        .unwrap_or_default();

    if caption.is_empty() {
        return Err(CaptionError::MissingCaption);
    }

    Ok(caption.to_string())
}

#[async_trait]
impl Captioner for GeminiCaptioner {
    async fn caption(&self, image: &PreparedImage) -> Result<String, CaptionError> {
        let payload = gemini_payload(&image.to_base64());

        debug!(
            model = %self.model,
            jpeg_bytes = image.jpeg.len(),
            "Sending caption request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%status, "Caption request rejected");
            return Err(CaptionError::Api { status, body });
        }

        let result: serde_json::Value = serde_json::from_str(&body)?;
        let caption = extract_caption(&result)?;

        info!(model = %self.model, %caption, "Caption generated");

        Ok(caption)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
