//! Compiled form of [`SelectorConfig`].

use scraper::Selector;
use shelfscan_core::SelectorConfig;

use crate::error::ScraperError;

/// CSS selectors ready for matching, one ordered chain per field.
#[derive(Debug, Clone)]
pub struct SelectorTable {
    pub(crate) product_item: Selector,
    pub(crate) title: Vec<Selector>,
    pub(crate) rating: Vec<Selector>,
    pub(crate) review_count: Vec<Selector>,
    pub(crate) image: Vec<Selector>,
    pub(crate) image_attributes: Vec<String>,
    pub(crate) next_disabled: Vec<Selector>,
    pub(crate) next_link: Vec<Selector>,
}

impl SelectorTable {
    /// Compiles every selector string in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] for the first string that is
    /// not valid CSS selector syntax.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            product_item: compile_one("product_item", &config.product_item)?,
            title: compile_chain("title", &config.title)?,
            rating: compile_chain("rating", &config.rating)?,
            review_count: compile_chain("review_count", &config.review_count)?,
            image: compile_chain("image", &config.image)?,
            image_attributes: config.image_attributes.clone(),
            next_disabled: compile_chain("next_disabled", &config.next_disabled)?,
            next_link: compile_chain("next_link", &config.next_link)?,
        })
    }

    /// The built-in table.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if a built-in selector fails
    /// to compile.
    pub fn builtin() -> Result<Self, ScraperError> {
        Self::compile(&SelectorConfig::default())
    }
}

fn compile_one(field: &'static str, selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        field,
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

fn compile_chain(field: &'static str, chain: &[String]) -> Result<Vec<Selector>, ScraperError> {
    chain.iter().map(|s| compile_one(field, s)).collect()
}
