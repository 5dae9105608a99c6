//! Internationalization (i18n) support
//!
//! UI strings ship embedded for `pt-BR` and `en`; a site can override or add
//! languages with `languages/<lang>.yml` files holding flat `key: text` maps.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const PT_BR: &str = r#"
home: Início
load_more: Carregar mais posts
not_found: Página não encontrada
server_error: Erro interno
upstream_error: Não foi possível carregar os posts
"#;

const EN: &str = r#"
home: Home
load_more: Load more posts
not_found: Page not found
server_error: Internal error
upstream_error: Could not load posts
"#;

/// Internationalization handler
#[derive(Debug, Clone)]
pub struct I18n {
    /// Current language
    language: String,
    /// lang -> key -> translation
    translations: HashMap<String, HashMap<String, String>>,
}

impl I18n {
    /// Create a handler with the embedded languages loaded
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        for (lang, source) in [("pt-BR", PT_BR), ("en", EN)] {
            match serde_yaml::from_str::<HashMap<String, String>>(source) {
                Ok(data) => {
                    translations.insert(lang.to_string(), data);
                }
                Err(e) => tracing::error!("Embedded language {} is invalid: {}", lang, e),
            }
        }

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Load language files from a directory, overriding embedded keys
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || !matches!(ext, Some("yml") | Some("yaml")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<HashMap<String, String>>(&content) {
                Ok(data) => {
                    self.translations
                        .entry(lang.to_string())
                        .or_default()
                        .extend(data);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Get a translation by key
    pub fn get(&self, key: &str) -> String {
        self.translations
            .get(&self.language)
            .and_then(|data| data.get(key))
            .or_else(|| self.translations.get("en").and_then(|data| data.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// All translations for the current language, English filling the gaps
    pub fn get_all_translations(&self) -> HashMap<String, String> {
        let mut result = self.translations.get("en").cloned().unwrap_or_default();
        if let Some(data) = self.translations.get(&self.language) {
            result.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        result
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new("pt-BR")
    }
}
