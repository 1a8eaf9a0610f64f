/*!
 * Before-insert hook surface.
 *
 * The host owns a `HookRegistry` and dispatches every content save through
 * it. `SlugHook` is the handler this crate provides: it reads the current
 * settings from a `ConfigProvider` and runs the slug decision.
 */

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::app_config::ConfigProvider;
use crate::content::ContentRecord;
use crate::policy::{SlugDecisionPolicy, SlugSettings};
use crate::providers::Provider;
use crate::providers::google::{TranslateRequest, TranslateResponse};

/// Name under which `SlugHook` registers itself
pub const SLUG_HOOK_NAME: &str = "slug_translation";

/// Arguments of the insert call that triggered the hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertArgs {
    /// Id of the item being updated; `None` for new items
    pub id: Option<i64>,
}

impl InsertArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_update(id: i64) -> Self {
        Self { id: Some(id) }
    }
}

/// Handler invoked before a content item is persisted
#[async_trait]
pub trait BeforeInsertHook: Send + Sync {
    /// Name the handler is registered under
    fn name(&self) -> &str;

    /// Return the record to persist in place of `record`
    async fn on_before_insert(&self, record: ContentRecord, args: &InsertArgs) -> ContentRecord;
}

/// Slug generation wired to a configuration provider
pub struct SlugHook<P> {
    policy: SlugDecisionPolicy<P>,
    config: Arc<dyn ConfigProvider>,
}

impl<P> SlugHook<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    pub fn new(policy: SlugDecisionPolicy<P>, config: Arc<dyn ConfigProvider>) -> Self {
        Self { policy, config }
    }

    pub fn policy(&self) -> &SlugDecisionPolicy<P> {
        &self.policy
    }

    /// Settings as currently stored
    pub fn current_settings(&self) -> SlugSettings {
        self.config.settings()
    }
}

#[async_trait]
impl<P> BeforeInsertHook for SlugHook<P>
where
    P: Provider<Request = TranslateRequest, Response = TranslateResponse>,
{
    fn name(&self) -> &str {
        SLUG_HOOK_NAME
    }

    async fn on_before_insert(&self, mut record: ContentRecord, args: &InsertArgs) -> ContentRecord {
        if record.id.is_none() {
            record.id = args.id;
        }

        let settings = self.current_settings();
        self.policy.decide(record, &settings).await
    }
}

/// Ordered set of named before-insert handlers
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn BeforeInsertHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; an existing handler with the same name is replaced
    /// in place
    pub fn register(&mut self, hook: Arc<dyn BeforeInsertHook>) {
        match self.hooks.iter().position(|h| h.name() == hook.name()) {
            Some(index) => {
                debug!("Replacing before-insert hook '{}'", hook.name());
                self.hooks[index] = hook;
            }
            None => {
                debug!("Registering before-insert hook '{}'", hook.name());
                self.hooks.push(hook);
            }
        }
    }

    /// Remove a handler by name; returns whether one was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|h| h.name() != name);
        before != self.hooks.len()
    }

    pub fn hook_names(&self) -> Vec<String> {
        self.hooks.iter().map(|h| h.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every handler in registration order, each seeing the previous
    /// handler's output
    pub async fn dispatch_before_insert(&self, record: ContentRecord, args: &InsertArgs) -> ContentRecord {
        let mut record = record;
        for hook in &self.hooks {
            record = hook.on_before_insert(record, args).await;
        }
        record
    }
}
