// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record as LogRecord, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;

use crate::app_config::{Config, Setting, Settings};
use crate::database::{DatabaseConnection, NewRecord, Repository};
use crate::language_utils::LanguageRegistry;

mod app_config;
mod language_utils;
mod database;
mod admin;
mod template_tags;
mod urls;
mod errors;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database and write a default configuration file
    Init,

    /// Add a record, optionally as a translation of an existing one
    Add {
        /// Collection the record belongs to
        #[arg(short, long, default_value = "pages")]
        collection: String,

        /// Record title
        title: String,

        /// URL slug, unique within the collection
        #[arg(short, long)]
        slug: String,

        /// Language code (defaults to the primary language)
        #[arg(short, long)]
        language: Option<String>,

        /// Record body text
        #[arg(short, long, default_value = "")]
        body: String,

        /// ID of the primary-language original this record translates
        #[arg(long)]
        translation_of: Option<i64>,
    },

    /// List records in a collection
    List {
        /// Collection to list
        #[arg(short, long, default_value = "pages")]
        collection: String,

        /// Only list records in this language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Show a record with its localized URL
    Show {
        /// Record ID
        id: i64,
    },

    /// Show all sibling translations of a record
    Translations {
        /// Record ID
        id: i64,
    },

    /// Show database statistics
    Stats,

    /// Generate shell completions for lingua-link
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lingua-link - multilingual record links
///
/// Stores translatable records in SQLite and resolves the translation
/// relationships between them.
#[derive(Parser, Debug)]
#[command(name = "lingua-link")]
#[command(version = "0.5.0")]
#[command(about = "Translation links between multilingual records")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Database file path (defaults to the user data directory)
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
    config_path: String,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &LogRecord) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => writeln!(stderr, "\x1B[1;31m{} {}\x1B[0m", now, record.args()),
                Level::Warn => writeln!(stderr, "\x1B[1;33m{} {}\x1B[0m", now, record.args()),
                _ => writeln!(stderr, "{} {}", now, record.args()),
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn load_config(path: &str) -> Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}

fn open_repository(options: &CommandLineOptions, config: &Config) -> Result<Repository> {
    let registry = LanguageRegistry::from_config(config)?;
    let db = match &options.db_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    Ok(Repository::new(db, registry))
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let config = load_config(&options.config_path)?;
    CustomLogger::init(config.log_level.to_level_filter())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    if let Err(e) = run(options, config).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(options: CommandLineOptions, config: Config) -> Result<()> {
    match &options.command {
        Commands::Init => {
            let config_path = options.config_path.clone();
            if !std::path::Path::new(&config_path).exists() {
                config.to_file(&config_path)?;
                info!("Wrote default configuration to {}", config_path);
            }
            let repo = open_repository(&options, &config)?;
            info!("Database ready at {:?}", repo.connection().path());
        }

        Commands::Add {
            collection,
            title,
            slug,
            language,
            body,
            translation_of,
        } => {
            let repo = open_repository(&options, &config)?;
            let language = language
                .clone()
                .unwrap_or_else(|| config.default_language().to_string());

            let mut new_record = NewRecord::new(collection, title, slug, &language).with_body(body);
            if let Some(original_id) = translation_of {
                new_record = new_record.with_translation_of(*original_id);
            }

            let record = repo.insert_record(new_record).await?;
            println!("{} [{}] {} ({})", record.id, record.language, record.title, record.slug);
        }

        Commands::List {
            collection,
            language,
        } => {
            let repo = open_repository(&options, &config)?;
            let records = repo.list_records(collection, language.as_deref()).await?;
            for record in records {
                let link = record
                    .translation_of
                    .map(|id| format!(" -> {}", id))
                    .unwrap_or_default();
                println!("{} [{}] {} ({}){}", record.id, record.language, record.title, record.slug, link);
            }
        }

        Commands::Show { id } => {
            let repo = open_repository(&options, &config)?;
            let record = repo
                .get_record(*id)
                .await?
                .with_context(|| format!("No record with id {}", id))?;

            let settings = Settings::from_config(&config);
            let path = format!("/{}/{}/", record.collection, record.slug);
            let url = urls::localized_url(
                repo.registry(),
                settings.resolve_bool(Setting::UseLocaleurl, None),
                &record.language,
                &path,
            );

            println!("{}: {}", record.id, record.title);
            println!("  language: {}", record.language);
            println!("  url: {}", url);
            if let Some(original_id) = record.translation_of {
                println!("  translation of: {}", original_id);
            }
        }

        Commands::Translations { id } => {
            let repo = open_repository(&options, &config)?;
            let record = repo
                .get_record(*id)
                .await?
                .with_context(|| format!("No record with id {}", id))?;

            let siblings = repo.available_translations(&record).await?;
            if siblings.is_empty() {
                println!("No translations for record {}", id);
            }
            for sibling in siblings {
                println!("{} [{}] {}", sibling.id, sibling.language, sibling.title);
            }
        }

        Commands::Stats => {
            let repo = open_repository(&options, &config)?;
            let stats = repo.connection().stats()?;
            println!("{}", stats);
        }

        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "lingua-link", &mut std::io::stdout());
        }
    }

    Ok(())
}
