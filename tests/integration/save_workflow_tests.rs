/*!
 * End-to-end save workflow: hook registry, slug hook, file configuration,
 * SQLite store and a mock translation service
 */

use std::path::Path;
use std::sync::Arc;

use slugline::app_config::{Config, JsonFileConfig, SlugPattern};
use slugline::content::ContentRecord;
use slugline::database::Repository;
use slugline::hooks::{HookRegistry, InsertArgs, SlugHook};
use slugline::policy::SlugDecisionPolicy;
use slugline::translator::Translator;

use crate::common::{
    create_temp_dir, datetime, init_test_logging, march_fifth, received_count, translating_server,
    write_config,
};

fn keyed_config(endpoint: &str, pattern: SlugPattern) -> Config {
    let mut config = Config::default();
    config.translation.api_key = "test-key".to_string();
    config.translation.endpoint = endpoint.to_string();
    config.slug.convert_pattern = pattern;
    config
}

fn registry_for(config_path: &Path, config: &Config, repository: &Repository) -> HookRegistry {
    let policy = SlugDecisionPolicy::new(
        Translator::google(&config.translation),
        Arc::new(repository.clone()),
        Arc::new(march_fifth()),
    );
    let mut registry = HookRegistry::new();
    registry.register(Arc::new(SlugHook::new(
        policy,
        Arc::new(JsonFileConfig::new(config_path)),
    )));
    registry
}

#[tokio::test]
async fn test_insert_shouldStoreTranslatedSlug() {
    init_test_logging();
    let server = translating_server("Hello World").await;
    let dir = create_temp_dir().unwrap();
    let config = keyed_config(&server.uri(), SlugPattern::PlainTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let record = registry
        .dispatch_before_insert(ContentRecord::post("こんにちは World"), &InsertArgs::new())
        .await;
    let id = repository.insert_content(&record).await.unwrap();

    let stored = repository.get_content(id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "hello-world");
    assert_eq!(stored.title, "こんにちは World");
    let requests = server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value = requests[0].body_json().expect("JSON body");
    assert_eq!(body["q"], "こんにちは World");
    assert_eq!(body["target"], "en");
}

#[tokio::test]
async fn test_update_shouldKeepStoredSlug() {
    let server = translating_server("Something New").await;
    let dir = create_temp_dir().unwrap();
    let config = keyed_config(&server.uri(), SlugPattern::DatePrefixedTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let id = repository
        .insert_content(&ContentRecord::post("Hello World").with_slug("hello-world"))
        .await
        .unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let mut record = repository.get_content(id).await.unwrap().unwrap();
    record.title = "Etwas Neues".to_string();
    let record = registry
        .dispatch_before_insert(record, &InsertArgs::for_update(id))
        .await;
    repository.update_content(&record).await.unwrap();

    let stored = repository.get_content(id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "hello-world");
    assert_eq!(stored.title, "Etwas Neues");
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn test_update_withEmptyStoredSlug_shouldGenerateSlug() {
    let server = translating_server("Hello World").await;
    let dir = create_temp_dir().unwrap();
    let config = keyed_config(&server.uri(), SlugPattern::DatePrefixedTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let id = repository
        .insert_content(
            &ContentRecord::post("こんにちは World")
                .with_publish_date(datetime("2023-07-14 09:00:00")),
        )
        .await
        .unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let record = repository.get_content(id).await.unwrap().unwrap();
    let record = registry
        .dispatch_before_insert(record, &InsertArgs::for_update(id))
        .await;
    repository.update_content(&record).await.unwrap();

    let stored = repository.get_content(id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "20230714_hello-world");
}

#[tokio::test]
async fn test_insert_withPageType_shouldStoreEmptySlug() {
    let server = translating_server("About us").await;
    let dir = create_temp_dir().unwrap();
    let config = keyed_config(&server.uri(), SlugPattern::PlainTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let record = registry
        .dispatch_before_insert(ContentRecord::new("page", "Über uns"), &InsertArgs::new())
        .await;
    let id = repository.insert_content(&record).await.unwrap();

    let stored = repository.get_content(id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "");
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn test_patternChange_shouldApplyOnNextSave() {
    let server = translating_server("Hello World").await;
    let dir = create_temp_dir().unwrap();
    let mut config = keyed_config(&server.uri(), SlugPattern::PlainTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let first = registry
        .dispatch_before_insert(ContentRecord::post("こんにちは World"), &InsertArgs::new())
        .await;

    config.slug.convert_pattern = SlugPattern::DatePrefixedTitle;
    write_config(dir.path(), &config).unwrap();

    let second = registry
        .dispatch_before_insert(ContentRecord::post("こんにちは World"), &InsertArgs::new())
        .await;

    assert_eq!(first.slug, "hello-world");
    assert_eq!(second.slug, "20240305_hello-world");
}

#[tokio::test]
async fn test_keyRemovedFromFile_shouldSlugifyOriginalTitle() {
    let server = translating_server("Hello World").await;
    let dir = create_temp_dir().unwrap();
    let mut config = keyed_config(&server.uri(), SlugPattern::PlainTitle);
    config.translation.api_key = String::new();
    let config_path = write_config(dir.path(), &config).unwrap();
    let repository = Repository::new_in_memory().unwrap();
    let registry = registry_for(&config_path, &config, &repository);

    let record = registry
        .dispatch_before_insert(ContentRecord::post("Guten Morgen Welt"), &InsertArgs::new())
        .await;

    assert_eq!(record.slug, "guten-morgen-welt");
    assert_eq!(received_count(&server).await, 0);
}

#[tokio::test]
async fn test_fileBackedDatabase_shouldPersistAcrossConnections() {
    let server = translating_server("Hello World").await;
    let dir = create_temp_dir().unwrap();
    let config = keyed_config(&server.uri(), SlugPattern::PlainTitle);
    let config_path = write_config(dir.path(), &config).unwrap();
    let db_path = dir.path().join("data").join("slugline.db");

    let id = {
        let repository = Repository::new(slugline::database::DatabaseConnection::new(&db_path).unwrap());
        let registry = registry_for(&config_path, &config, &repository);
        let record = registry
            .dispatch_before_insert(ContentRecord::post("こんにちは World"), &InsertArgs::new())
            .await;
        repository.insert_content(&record).await.unwrap()
    };

    let reopened = Repository::new(slugline::database::DatabaseConnection::new(&db_path).unwrap());
    let stored = reopened.get_content(id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "hello-world");
    assert_eq!(reopened.connection().stats().unwrap().slugged_count, 1);
}
