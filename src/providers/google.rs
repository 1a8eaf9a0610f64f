use std::time::Duration;
use serde::{Serialize, Deserialize};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;
use log::{debug, error};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Path of the v2 translate method, relative to the service endpoint
const TRANSLATE_PATH: &str = "language/translate/v2";

/// Google Cloud Translation client (v2 REST API)
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Service endpoint URL
    endpoint: String,
    /// Per-request timeout
    timeout: Duration,
}

/// Translate request body
#[derive(Debug, Clone, Serialize)]
pub struct TranslateRequest {
    /// Text to translate
    q: String,

    /// Target language code
    target: String,

    /// Source text format; always plain text for titles
    format: String,

    /// API key, sent as the `key` query parameter
    #[serde(skip)]
    api_key: String,
}

/// Translate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslationsData,
}

/// `data` object of a translate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsData {
    pub translations: Vec<Translation>,
}

/// Individual translation in a translate response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,

    /// Language the service detected, when no source was given
    #[serde(rename = "detectedSourceLanguage", default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
}

impl TranslateRequest {
    /// Create a new plain-text translate request
    pub fn new(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: text.into(),
            target: target.into(),
            format: "text".to_string(),
            api_key: String::new(),
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.q
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn key(&self) -> &str {
        &self.api_key
    }
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Build the request URL, carrying the API key as a query credential
    pub fn request_url(&self, api_key: &str) -> Result<Url, ProviderError> {
        let base = format!("{}/", self.endpoint.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .and_then(|base| base.join(TRANSLATE_PATH))
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", self.endpoint, e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        let url = self.request_url(&request.api_key)?;
        debug!("Requesting translation into '{}' ({} chars)", request.target, request.q.chars().count());

        let response = self.client.post(url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, error_text);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ProviderError::AuthenticationError(error_text)
                }
                _ => ProviderError::ApiError {
                    status_code: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<TranslateResponse>(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn extract_text(response: &TranslateResponse) -> Option<String> {
        response.data.translations.first()
            .map(|t| t.translated_text.clone())
    }
}
