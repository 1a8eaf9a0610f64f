/*!
 * Mock translation provider.
 *
 * Speaks the same request/response types as the Google client so it can be
 * dropped into a `Translator` in tests or offline runs:
 * - `MockProvider::working()` - succeeds, echoing the text with a marker
 * - `MockProvider::with_translations(..)` - succeeds from a fixed phrase table
 * - `MockProvider::failing()` - always fails with an API error
 * - `MockProvider::malformed()` - fails as if the body could not be parsed
 * - `MockProvider::empty()` - succeeds with no translations in the payload
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::google::{TranslateRequest, TranslateResponse, Translation, TranslationsData};

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with an API error
    Failing,
    /// Fails with a parse error, as for an unexpected JSON body
    Malformed,
    /// Succeeds with an empty `translations` list
    Empty,
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of requests received, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests received, shared between clones
    requests: Arc<Mutex<Vec<TranslateRequest>>>,
    /// Fixed source -> translation table; unknown text is echoed with a marker
    phrases: HashMap<String, String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            phrases: HashMap::new(),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a working mock provider answering from a phrase table
    pub fn with_translations<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut provider = Self::working();
        provider.phrases = pairs
            .into_iter()
            .map(|(source, translated)| (source.into(), translated.into()))
            .collect();
        provider
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock whose responses cannot be parsed
    pub fn malformed() -> Self {
        Self::new(MockBehavior::Malformed)
    }

    /// Create a mock that returns no translations
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of requests this provider (and its clones) has received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Copy of the requests received so far
    pub fn requests(&self) -> Vec<TranslateRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn translate_text(&self, request: &TranslateRequest) -> String {
        self.phrases
            .get(request.text())
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", request.target(), request.text()))
    }

    fn response_for(text: String) -> TranslateResponse {
        TranslateResponse {
            data: TranslationsData {
                translations: vec![Translation {
                    translated_text: text,
                    detected_source_language: None,
                }],
            },
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.behavior {
            MockBehavior::Working => Ok(Self::response_for(self.translate_text(&request))),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Malformed => Err(ProviderError::ParseError(
                "missing field `data`".to_string(),
            )),

            MockBehavior::Empty => Ok(TranslateResponse {
                data: TranslationsData {
                    translations: Vec::new(),
                },
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                Ok(Self::response_for(self.translate_text(&request)))
            }
        }
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response
            .data
            .translations
            .first()
            .map(|t| t.translated_text.clone())
    }
}
