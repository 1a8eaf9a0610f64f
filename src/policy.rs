/*!
 * Slug decision for content about to be saved.
 *
 * The decision is a short chain of gates: keep an existing slug, ignore
 * content types other than posts, then translate and normalize the title and
 * apply the configured pattern. It never fails; the worst outcome is a slug
 * built from the untranslated title, or no slug at all.
 */

use chrono::NaiveDateTime;
use log::{debug, warn};
use std::sync::Arc;

use crate::app_config::{SlugPattern, TranslationConfig};
use crate::content::{Clock, ContentRecord, ContentStore, PublishDate};
use crate::language_utils::resolve_target_language;
use crate::providers::Provider;
use crate::providers::google::{TranslateRequest, TranslateResponse};
use crate::slugifier::normalize;
use crate::translator::Translator;

/// Separator between the date part and the title part of a date-prefixed slug
pub const DATE_SEPARATOR: char = '_';

/// Settings read for one decision
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlugSettings {
    pub translation: TranslationConfig,
    pub pattern: SlugPattern,
}

impl SlugSettings {
    pub fn new(translation: TranslationConfig, pattern: SlugPattern) -> Self {
        Self { translation, pattern }
    }
}

/// Decides whether and how a record gets a slug
pub struct SlugDecisionPolicy<P> {
    translator: Translator<P>,
    store: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
}

impl<P> SlugDecisionPolicy<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    pub fn new(translator: Translator<P>, store: Arc<dyn ContentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { translator, store, clock }
    }

    pub fn translator(&self) -> &Translator<P> {
        &self.translator
    }

    /// Decide the slug of `record` and return the possibly updated record.
    pub async fn decide(&self, mut record: ContentRecord, settings: &SlugSettings) -> ContentRecord {
        if let Some(id) = record.id {
            if self.has_persisted_slug(id) {
                debug!("Content {} already has a slug, leaving it untouched", id);
                return record;
            }
        }

        if !record.is_managed_type() {
            debug!("Skipping slug generation for content type '{}'", record.content_type);
            return record;
        }

        let target_language = resolve_target_language(&settings.translation.target_language);
        let translated = self
            .translator
            .translate(&record.title, &target_language, &settings.translation)
            .await;
        let base_slug = normalize(&translated);

        let slug = match settings.pattern {
            SlugPattern::PlainTitle => base_slug,
            SlugPattern::DatePrefixedTitle => {
                let date_part = date_prefix(&record.publish_date, self.clock.now());
                format!("{}{}{}", date_part, DATE_SEPARATOR, base_slug)
            }
        };

        if slug.is_empty() {
            debug!("Title {:?} produced no slug", record.title);
        } else {
            debug!("Generated slug '{}' for {:?}", slug, record.title);
            record.slug = slug;
        }

        record
    }

    // Lookup errors count as "no slug persisted"
    fn has_persisted_slug(&self, id: i64) -> bool {
        match self.store.persisted_slug(id) {
            Ok(slug) => slug.is_some_and(|s| !s.is_empty()),
            Err(e) => {
                warn!("Failed to look up persisted slug for content {}: {:#}", id, e);
                false
            }
        }
    }
}

/// `YYYYMMDD` of the publish date, or of `now` when the date is unset
pub fn date_prefix(publish_date: &PublishDate, now: NaiveDateTime) -> String {
    publish_date
        .as_datetime()
        .unwrap_or(now)
        .format("%Y%m%d")
        .to_string()
}
