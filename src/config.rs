use std::time::Duration;

use anyhow::{bail, Context};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub schema: ProductSchema,
}

/// Physical names of the product table and of the column exposed as
/// `title`/`activity`. Deployments disagree on the latter (`title`, `name`,
/// `product_name`), so it is never hard-coded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSchema {
    pub table: String,
    pub title_column: String,
}

impl Default for ProductSchema {
    fn default() -> Self {
        Self {
            table: "products".to_string(),
            title_column: "title".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let defaults = ProductSchema::default();
        let schema = ProductSchema {
            table: identifier("PRODUCTS_TABLE", var("PRODUCTS_TABLE", &defaults.table))?,
            title_column: identifier(
                "PRODUCT_TITLE_COLUMN",
                var("PRODUCT_TITLE_COLUMN", &defaults.title_column),
            )?,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            host: var("HOST", "127.0.0.1"),
            port: var("PORT", "3000")
                .parse()
                .context("PORT must be a valid number")?,
            max_connections: var("DB_MAX_CONNECTIONS", "10")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            acquire_timeout: Duration::from_secs(
                var("DB_ACQUIRE_TIMEOUT_SECS", "30")
                    .parse()
                    .context("DB_ACQUIRE_TIMEOUT_SECS must be a valid number")?,
            ),
            schema,
        })
    }
}

// Table and column names are spliced into SQL text, never bound.
fn identifier(key: &str, value: String) -> anyhow::Result<String> {
    let mut chars = value.chars();
    let valid_head = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_head || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("{} must be a plain SQL identifier, got {:?}", key, value);
    }
    Ok(value)
}
