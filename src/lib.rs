/*!
 * # slugline - translated slugs for content titles
 *
 * A Rust library that turns a native-language article title into a URL-safe
 * slug right before the content item is saved, optionally machine-translating
 * the title first.
 *
 * ## Features
 *
 * - Slug normalization into the `[a-z0-9-]` alphabet
 * - Title translation through the Google Cloud Translation v2 API, degrading
 *   to the original title when no key is configured or the request fails
 * - Plain (`hello-world`) and date-prefixed (`20240305_hello-world`) patterns
 * - Existing slugs and non-post content are left untouched
 * - A before-insert hook registry for wiring the decision into a host
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `slugifier`: Slug normalization
 * - `translator`: Total-function wrapper around a translation provider
 * - `policy`: The slug decision for a record about to be saved
 * - `hooks`: Before-insert handler trait, the slug handler and the registry
 * - `content`: Content records, the content store and clock collaborators
 * - `app_config`: Configuration file and configuration providers
 * - `providers`: Translation service clients:
 *   - `providers::google`: Google Cloud Translation v2 client
 *   - `providers::mock`: Scripted provider for tests
 * - `database`: SQLite content store used by the command line host
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod content;
pub mod database;
pub mod errors;
pub mod hooks;
pub mod language_utils;
pub mod policy;
pub mod providers;
pub mod slugifier;
pub mod translator;

// Re-export main types for easier usage
pub use app_config::{Config, ConfigProvider, JsonFileConfig, SlugPattern, StaticConfig, TranslationConfig};
pub use content::{Clock, ContentRecord, ContentStore, PublishDate, SystemClock, MANAGED_CONTENT_TYPE};
pub use errors::{AppError, ProviderError};
pub use hooks::{BeforeInsertHook, HookRegistry, InsertArgs, SlugHook};
pub use policy::{SlugDecisionPolicy, SlugSettings};
pub use slugifier::normalize;
pub use translator::Translator;
