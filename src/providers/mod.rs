/*!
 * Provider implementations for machine translation services.
 *
 * This module contains the client for the translation service used to turn
 * titles into the target language:
 * - Google: Cloud Translation API v2 (`/language/translate/v2`)
 * - Mock: scripted provider for tests and offline use
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation providers
///
/// This trait defines the interface that provider implementations must follow,
/// allowing the translator to be exercised against a stub in tests.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract the translated text from the provider response
    ///
    /// Returns `None` when the response carries no usable translation.
    fn extract_text(response: &Self::Response) -> Option<String>;
}

pub mod google;
pub mod mock;
