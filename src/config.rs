//! # Configuration Module
//!
//! Parser settings (record defaults, how multi-priced lines are laid out) and
//! the process configuration read from the environment by the `menus` binary.

use std::env;
use std::str::FromStr;

use crate::errors::MenuError;
use crate::menu_model::ItemDefaults;

/// Confidence below which a vegetarian flag is reported for manual review
pub const DEFAULT_REVIEW_THRESHOLD: f32 = 0.6;

/// How a line with several prices is turned into records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantLayout {
    /// One record per price, the variant label appended to the name
    #[default]
    Split,
    /// One record per line with parallel `variants` / `variant_prices`
    Grouped,
}

impl FromStr for VariantLayout {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" => Ok(VariantLayout::Split),
            "grouped" => Ok(VariantLayout::Grouped),
            other => Err(MenuError::Config(format!("unknown variant layout '{other}'"))),
        }
    }
}

/// Configuration options for menu parsing
#[derive(Debug, Clone, PartialEq)]
pub struct MenuParserConfig {
    /// Field values every parsed record starts with
    pub defaults: ItemDefaults,
    pub variant_layout: VariantLayout,
    /// Veg confidence below this is logged as needing review
    pub review_threshold: f32,
}

impl Default for MenuParserConfig {
    fn default() -> Self {
        Self {
            defaults: ItemDefaults::default(),
            variant_layout: VariantLayout::Split,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

/// Log output format for the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(MenuError::Config(format!("unknown log format '{other}'"))),
        }
    }
}

/// Process configuration for the `menus` binary
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Postgres connection string, only needed for seeding
    pub database_url: Option<String>,
    pub log_format: LogFormat,
    pub parser: MenuParserConfig,
}

impl AppConfig {
    /// Load configuration from the environment, reading `.env` first if present
    ///
    /// Recognised variables: `DATABASE_URL`, `MENU_LOG_FORMAT` (`text` or `json`)
    /// and `MENU_VARIANT_LAYOUT` (`split` or `grouped`).
    pub fn from_env() -> Result<Self, MenuError> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
        let log_format: LogFormat = parse_var("MENU_LOG_FORMAT")?.unwrap_or_default();
        let variant_layout: VariantLayout = parse_var("MENU_VARIANT_LAYOUT")?.unwrap_or_default();

        Ok(Self {
            database_url,
            log_format,
            parser: MenuParserConfig {
                variant_layout,
                ..Default::default()
            },
        })
    }

    /// The database URL, or an error naming the missing variable
    pub fn require_database_url(&self) -> Result<&str, MenuError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| MenuError::Config("DATABASE_URL must be set".to_string()))
    }
}

fn parse_var<T>(key: &str) -> Result<Option<T>, MenuError>
where
    T: FromStr<Err = MenuError>,
{
    match env::var(key) {
        Ok(value) => value.parse().map(Some),
        Err(_) => Ok(None),
    }
}
