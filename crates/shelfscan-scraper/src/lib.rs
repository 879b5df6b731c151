pub mod client;
pub mod error;
pub mod pagination;
pub mod parse;
mod parse_helpers;
pub mod selectors;
pub mod types;
pub mod urls;

pub use client::SearchClient;
pub use error::{FieldError, ScraperError};
pub use parse::extract_search_page;
pub use selectors::SelectorTable;
pub use types::{PaginationState, Product, SearchPage, SearchRequest};
