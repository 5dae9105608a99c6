//! spacetraveling: a blog front-end for a headless content API
//!
//! Posts are queried from a Prismic-style REST API, mapped into a small view
//! model and rendered with built-in Tera templates, either as a static site
//! (`generate`) or on request (`server`).

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod server;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Static assets copied into the output as is
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new instance from a directory
    ///
    /// Reads `.env` (without overriding variables already set), then
    /// `_config.yml`, then applies the API environment overrides.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let env_path = base_dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path)?;
            tracing::debug!("Loaded environment from {:?}", env_path);
        }

        let config_path = base_dir.join("_config.yml");
        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            static_dir,
            public_dir,
        }
    }

    /// HTTP client for the configured content API
    pub fn client(&self) -> Result<api::ContentClient> {
        Ok(api::ContentClient::new(&self.config.api)?)
    }

    /// The listing query
    pub fn query(&self) -> api::Query {
        api::Query::from_config(&self.config.api)
    }

    /// Publication date formatter for the site's language and timezone
    pub fn dates(&self) -> helpers::DateFormatter {
        helpers::DateFormatter::new(
            &self.config.date_format,
            &self.config.language,
            &self.config.timezone,
        )
    }

    /// UI strings, with `languages/` overrides applied
    pub fn i18n(&self) -> Result<i18n::I18n> {
        let mut i18n = i18n::I18n::new(&self.config.language);
        i18n.load_languages(self.base_dir.join("languages"))?;
        Ok(i18n)
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
