/*!
 * Title translation with a total-function contract.
 *
 * `Translator::translate` always returns usable text: with no API key it
 * returns the input untouched, and any transport, status or parse failure is
 * logged and answered with the input as well. One request is issued per call;
 * results are not cached and failed requests are not retried.
 */

use log::{debug, warn};
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationSettings};
use crate::providers::Provider;
use crate::providers::google::{GoogleTranslate, TranslateRequest, TranslateResponse};

/// Translator over a translation provider
#[derive(Debug)]
pub struct Translator<P> {
    provider: P,
}

impl Translator<GoogleTranslate> {
    /// Create a translator talking to the configured Google endpoint
    pub fn google(settings: &TranslationSettings) -> Self {
        Self::new(GoogleTranslate::new(
            settings.endpoint.clone(),
            Duration::from_secs(settings.timeout_secs),
        ))
    }
}

impl<P> Translator<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate `text` into `target_language`.
    ///
    /// Returns `text` unchanged when `config` carries no API key or when the
    /// request fails for any reason.
    pub async fn translate(&self, text: &str, target_language: &str, config: &TranslationConfig) -> String {
        if !config.is_enabled() {
            debug!("No translation API key configured, keeping original text");
            return text.to_string();
        }

        let request = TranslateRequest::new(text, target_language)
            .api_key(config.api_key.trim());

        match self.provider.complete(request).await {
            Ok(response) => match P::extract_text(&response) {
                Some(translated) => {
                    debug!("Translated title into '{}': {:?} -> {:?}", target_language, text, translated);
                    translated
                }
                None => {
                    warn!("Translation response contained no translations, keeping original text");
                    text.to_string()
                }
            },
            Err(e) => {
                warn!("Translation failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }
}
