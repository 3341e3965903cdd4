// src/catalog/mod.rs

mod english;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::models::content::{ContentError, SurveyContent};

/// Content tables per language code. Read-only after startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_language: String,
    contents: HashMap<String, Arc<SurveyContent>>,
}

impl Catalog {
    /// Catalog with the bundled English content only.
    pub fn builtin() -> Self {
        let mut contents = HashMap::new();
        contents.insert("en".to_string(), Arc::new(english::content()));
        Self {
            default_language: "en".to_string(),
            contents,
        }
    }

    /// Adds or replaces languages. Every table is checked before anything
    /// is inserted.
    pub fn extend(
        &mut self,
        contents: impl IntoIterator<Item = (String, SurveyContent)>,
    ) -> Result<(), CatalogError> {
        let mut checked = Vec::new();
        for (language, content) in contents {
            content
                .check()
                .map_err(|source| CatalogError::Invalid {
                    language: language.clone(),
                    source,
                })?;
            checked.push((language, Arc::new(content)));
        }
        self.contents.extend(checked);
        Ok(())
    }

    /// Reads a JSON object of `language code -> content` and overlays it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<usize, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(CatalogError::Io)?;
        let parsed: BTreeMap<String, SurveyContent> =
            serde_json::from_str(&raw).map_err(CatalogError::Parse)?;
        let count = parsed.len();
        self.extend(parsed)?;
        Ok(count)
    }

    /// Makes `language` the fallback. It must already be loaded.
    pub fn set_default_language(&mut self, language: &str) -> Result<(), CatalogError> {
        if !self.contents.contains_key(language) {
            return Err(CatalogError::UnknownDefault(language.to_string()));
        }
        self.default_language = language.to_string();
        Ok(())
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.contents.keys().cloned().collect();
        languages.sort();
        languages
    }

    pub fn supports(&self, language: &str) -> bool {
        self.contents.contains_key(language)
    }

    /// Content for `language`, falling back to the default language.
    /// Returns the language actually served.
    pub fn content(&self, language: &str) -> (&str, Arc<SurveyContent>) {
        if let Some((code, content)) = self.contents.get_key_value(language) {
            return (code.as_str(), Arc::clone(content));
        }

        tracing::warn!(
            "Unsupported language '{}', falling back to '{}'",
            language,
            self.default_language
        );
        (
            self.default_language.as_str(),
            Arc::clone(&self.contents[&self.default_language]),
        )
    }

    pub fn default_content(&self) -> Arc<SurveyContent> {
        Arc::clone(&self.contents[&self.default_language])
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        language: String,
        source: ContentError,
    },
    UnknownDefault(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read content file: {}", e),
            CatalogError::Parse(e) => write!(f, "failed to parse content file: {}", e),
            CatalogError::Invalid { language, source } => {
                write!(f, "content for '{}' is invalid: {}", language, source)
            }
            CatalogError::UnknownDefault(language) => {
                write!(f, "default language '{}' has no content", language)
            }
        }
    }
}

impl std::error::Error for CatalogError {}
