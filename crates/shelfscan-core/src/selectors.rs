//! CSS selector table for search-result pages.
//!
//! The storefront renders the same field with different markup depending on
//! experiment cohort and product type, so every field is an ordered fallback
//! chain: entries are tried in order until one yields a non-empty value.
//! The built-in table matches current Amazon search markup; a YAML file can
//! replace any subset of chains without a rebuild.
//!
//! ```yaml
//! title:
//!   - "h2 a span"
//!   - ".a-size-medium.a-color-base.a-text-normal"
//! next_link:
//!   - ".s-pagination-next"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container marking one search-result entry.
    pub product_item: String,
    pub title: Vec<String>,
    /// Elements whose text reads like "4.5 out of 5 stars".
    pub rating: Vec<String>,
    pub review_count: Vec<String>,
    pub image: Vec<String>,
    /// Attributes read from the matched image element, in order.
    /// Lazy-loaded images leave `src` empty and carry the URL in `data-src`.
    pub image_attributes: Vec<String>,
    /// Present only on the last page, where the "next" control is disabled in place.
    pub next_disabled: Vec<String>,
    pub next_link: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        let chain = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect();
        Self {
            product_item: r#".s-result-item[data-component-type="s-search-result"]"#.to_string(),
            title: chain(&[
                "h2 a span",
                ".a-size-medium.a-color-base.a-text-normal",
                ".a-link-normal .a-text-normal",
            ]),
            rating: chain(&[
                ".a-icon-star-small .a-icon-alt",
                ".a-icon-star .a-icon-alt",
            ]),
            review_count: chain(&[".a-size-small .a-link-normal", ".a-size-base .a-link-normal"]),
            image: chain(&[".s-image", ".a-link-normal img"]),
            image_attributes: chain(&["src", "data-src"]),
            next_disabled: chain(&[
                ".a-last.a-disabled",
                ".s-pagination-next.s-pagination-disabled",
            ]),
            next_link: chain(&[".a-last a", ".s-pagination-next"]),
        }
    }
}

impl SelectorConfig {
    /// Checks that every chain has at least one non-blank entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.product_item.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product_item selector must be non-empty".to_string(),
            ));
        }

        let chains: [(&str, &[String]); 7] = [
            ("title", &self.title),
            ("rating", &self.rating),
            ("review_count", &self.review_count),
            ("image", &self.image),
            ("image_attributes", &self.image_attributes),
            ("next_disabled", &self.next_disabled),
            ("next_link", &self.next_link),
        ];

        for (name, chain) in chains {
            if chain.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "selector chain '{name}' must have at least one entry"
                )));
            }
            if chain.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "selector chain '{name}' contains a blank entry"
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate a selector table from a YAML file.
///
/// Fields missing from the file keep their built-in chains.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_selector_config(path: &Path) -> Result<SelectorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: SelectorConfig = serde_yaml::from_str(&content)?;
    config.validate()?;

    Ok(config)
}
