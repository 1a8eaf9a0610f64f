// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use slugline::app_config::{self, Config, JsonFileConfig};
use slugline::content::{ContentRecord, ContentStore, InMemoryContentStore, PublishDate, SystemClock, UNSET_DATE_SENTINEL};
use slugline::database::{DatabaseConnection, Repository};
use slugline::hooks::{HookRegistry, InsertArgs, SlugHook};
use slugline::language_utils;
use slugline::policy::SlugDecisionPolicy;
use slugline::translator::Translator;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the slug a title would get, without storing anything
    Slug {
        #[command(flatten)]
        content: ContentArgs,

        /// Treat the item as an update of this id
        #[arg(long)]
        id: Option<i64>,

        /// Slug already persisted for --id
        #[arg(long, requires = "id")]
        existing_slug: Option<String>,
    },

    /// Store a new content item, generating its slug
    Insert {
        #[command(flatten)]
        content: ContentArgs,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Update a stored content item; an existing slug is kept
    Update {
        /// Id of the item to update
        #[arg(long)]
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New content type
        #[arg(long)]
        content_type: Option<String>,

        /// New publish date
        #[arg(long)]
        publish_date: Option<String>,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Print a stored content item as JSON
    Show {
        /// Id of the item to show
        #[arg(long)]
        id: i64,

        #[command(flatten)]
        db: DbArgs,
    },

    /// Validate the configuration file
    Check,

    /// Generate shell completions for slugline
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ContentArgs {
    /// Title in the author's language
    #[arg(short, long)]
    title: String,

    /// Content type; only "post" gets a generated slug
    #[arg(long, default_value = slugline::MANAGED_CONTENT_TYPE)]
    content_type: String,

    /// Publish date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    publish_date: Option<String>,
}

#[derive(Args, Debug)]
struct DbArgs {
    /// SQLite database path (overrides the config file)
    #[arg(long, env = "SLUGLINE_DB")]
    db: Option<PathBuf>,
}

/// slugline - translated URL slugs for content titles
///
/// Generates the slug of a content item right before it is saved, translating
/// the title through the Google Cloud Translation API when an API key is
/// configured.
#[derive(Parser, Debug)]
#[command(name = "slugline")]
#[command(version)]
#[command(about = "Translated URL slugs for content titles")]
#[command(long_about = "slugline generates URL slugs for content items right before they are saved.

EXAMPLES:
    slugline slug -t \"こんにちは World\"                 # Print the slug for a title
    slugline insert -t \"Bonjour le monde\"               # Store a post with a generated slug
    slugline update --id 3 --title \"New title\"          # Existing slugs are kept
    slugline show --id 3                                # Print a stored item
    slugline check                                      # Validate conf.json
    slugline completions bash > slugline.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default and re-read on every save.
    Set translation.api_key to enable translation and slug.convert_pattern to
    \"title\" or \"date_title\". A default file is created when missing.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, label, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts every level; the global max level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "slugline", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    match cli.command {
        Commands::Slug { content, id, existing_slug } => {
            run_slug(&cli.config_path, &config, content, id, existing_slug).await
        }
        Commands::Insert { content, db } => {
            run_insert(&cli.config_path, &config, content, db).await
        }
        Commands::Update { id, title, content_type, publish_date, db } => {
            let changes = UpdateChanges { title, content_type, publish_date };
            run_update(&cli.config_path, &config, id, changes, db).await
        }
        Commands::Show { id, db } => run_show(&config, id, db).await,
        Commands::Check => run_check(&cli.config_path, &config),
        Commands::Completions { .. } => Ok(()),
    }
}

struct UpdateChanges {
    title: Option<String>,
    content_type: Option<String>,
    publish_date: Option<String>,
}

/// Registry with the slug hook reading `config_path` on every save
fn build_registry(config_path: &Path, config: &Config, store: Arc<dyn ContentStore>) -> HookRegistry {
    let translator = Translator::google(&config.translation);
    let policy = SlugDecisionPolicy::new(translator, store, Arc::new(SystemClock));
    let hook = SlugHook::new(policy, Arc::new(JsonFileConfig::new(config_path)));

    let mut registry = HookRegistry::new();
    registry.register(Arc::new(hook));
    registry
}

fn parse_publish_date(value: Option<&str>) -> Result<PublishDate> {
    let Some(value) = value else {
        return Ok(PublishDate::Unset);
    };

    let parsed = PublishDate::parse(value);
    if !parsed.is_set() && !value.trim().is_empty() && value.trim() != UNSET_DATE_SENTINEL {
        return Err(anyhow!("Invalid publish date: {}", value));
    }
    Ok(parsed)
}

fn open_repository(config: &Config, db: &DbArgs) -> Result<Repository> {
    let path = match db.db.clone().or_else(|| config.database_path.clone()) {
        Some(path) => path,
        None => DatabaseConnection::default_database_path()?,
    };
    let connection = DatabaseConnection::new(&path)
        .with_context(|| format!("Failed to open content database: {}", path.display()))?;
    Ok(Repository::new(connection))
}

async fn run_slug(
    config_path: &Path,
    config: &Config,
    content: ContentArgs,
    id: Option<i64>,
    existing_slug: Option<String>,
) -> Result<()> {
    let store = Arc::new(InMemoryContentStore::new());
    if let (Some(id), Some(slug)) = (id, existing_slug.as_ref()) {
        store.set_slug(id, slug.clone());
    }

    let registry = build_registry(config_path, config, store);
    let mut record = ContentRecord::new(content.content_type, content.title)
        .with_publish_date(parse_publish_date(content.publish_date.as_deref())?);
    record.slug = existing_slug.unwrap_or_default();

    let args = InsertArgs { id };
    let record = registry.dispatch_before_insert(record, &args).await;

    println!("{}", record.slug);
    Ok(())
}

async fn run_insert(config_path: &Path, config: &Config, content: ContentArgs, db: DbArgs) -> Result<()> {
    let repository = open_repository(config, &db)?;
    let registry = build_registry(config_path, config, Arc::new(repository.clone()));

    let record = ContentRecord::new(content.content_type, content.title)
        .with_publish_date(parse_publish_date(content.publish_date.as_deref())?);
    let record = registry.dispatch_before_insert(record, &InsertArgs::new()).await;

    let id = repository.insert_content(&record).await?;
    info!("Stored content {} ({})", id, repository.connection().stats()?);
    println!("{}\t{}", id, record.slug);
    Ok(())
}

async fn run_update(
    config_path: &Path,
    config: &Config,
    id: i64,
    changes: UpdateChanges,
    db: DbArgs,
) -> Result<()> {
    let repository = open_repository(config, &db)?;
    let mut record = repository
        .get_content(id)
        .await?
        .ok_or_else(|| anyhow!("Content {} does not exist", id))?;

    if let Some(title) = changes.title {
        record.title = title;
    }
    if let Some(content_type) = changes.content_type {
        record.content_type = content_type;
    }
    if changes.publish_date.is_some() {
        record.publish_date = parse_publish_date(changes.publish_date.as_deref())?;
    }

    let registry = build_registry(config_path, config, Arc::new(repository.clone()));
    let record = registry
        .dispatch_before_insert(record, &InsertArgs::for_update(id))
        .await;

    repository.update_content(&record).await?;
    println!("{}\t{}", id, record.slug);
    Ok(())
}

async fn run_show(config: &Config, id: i64, db: DbArgs) -> Result<()> {
    let repository = open_repository(config, &db)?;
    let record = repository
        .get_content(id)
        .await?
        .ok_or_else(|| anyhow!("Content {} does not exist", id))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_check(config_path: &Path, config: &Config) -> Result<()> {
    config.validate().context("Configuration validation failed")?;

    let language = language_utils::get_language_name(&config.translation.target_language)?;
    println!("Config file:      {}", config_path.display());
    println!("Target language:  {} ({})", config.translation.target_language, language);
    println!("Slug pattern:     {}", config.slug.convert_pattern);
    println!("Endpoint:         {}", config.translation.endpoint);
    println!("Timeout:          {}s", config.translation.timeout_secs);

    if config.translation.translation_config().is_enabled() {
        println!("Translation:      enabled");
    } else {
        warn!("No translation API key configured; slugs are built from the original titles");
        println!("Translation:      disabled");
    }

    Ok(())
}
