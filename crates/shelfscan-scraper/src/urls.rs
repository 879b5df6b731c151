//! Origin extraction and relative-link qualification.

use reqwest::Url;

use crate::error::ScraperError;

/// Parses the configured storefront URL and reduces it to its origin.
///
/// Given `"https://www.amazon.com/gp/browse"`, returns `https://www.amazon.com/`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute
/// `http`/`https` URL.
pub fn parse_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let parsed = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", parsed.scheme())));
    }

    let origin = parsed.origin().ascii_serialization();
    Url::parse(&origin).map_err(|e| invalid(e.to_string()))
}

/// Origin of `base` without a trailing slash, e.g. `"https://www.amazon.com"`.
#[must_use]
pub fn origin_of(base: &Url) -> String {
    base.origin().ascii_serialization()
}

/// Whether `href` starts with an RFC 3986 scheme (`https:`, `data:`, ...).
#[must_use]
pub fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Returns `href` verbatim when it is already absolute, otherwise resolves it
/// against the origin in `base`. Protocol-relative links pick up the origin's
/// scheme.
///
/// Returns `None` for blank input or a link that cannot be resolved.
#[must_use]
pub fn qualify_url(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if has_scheme(href) {
        return Some(href.to_owned());
    }
    match base.join(href) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            tracing::debug!(href, error = %e, "could not qualify relative link");
            None
        }
    }
}

/// Like [`qualify_url`], but only yields links a client can fetch: the
/// result must be an `http` or `https` URL. `javascript:` and `mailto:`
/// hrefs yield `None`.
#[must_use]
pub fn qualify_page_url(href: &str, base: &Url) -> Option<String> {
    let qualified = qualify_url(href, base)?;
    let parsed = Url::parse(&qualified).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(qualified)
}

/// Reads the `page` query parameter of an absolute URL.
#[must_use]
pub fn page_from_url(url: &str) -> Option<u32> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base_url("https://www.amazon.com").unwrap()
    }

    #[test]
    fn parse_base_url_strips_path() {
        let url = parse_base_url("https://www.amazon.com/gp/browse?node=1").unwrap();
        assert_eq!(url.as_str(), "https://www.amazon.com/");
    }

    #[test]
    fn parse_base_url_keeps_port() {
        let url = parse_base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(origin_of(&url), "http://127.0.0.1:8080");
    }

    #[test]
    fn parse_base_url_rejects_relative() {
        assert!(matches!(
            parse_base_url("www.amazon.com"),
            Err(ScraperError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn parse_base_url_rejects_non_http_scheme() {
        assert!(matches!(
            parse_base_url("ftp://files.example.com"),
            Err(ScraperError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn has_scheme_detects_absolute_links() {
        assert!(has_scheme("https://www.amazon.com/s?k=shoes"));
        assert!(has_scheme("http://example.com"));
        assert!(has_scheme("data:image/gif;base64,R0lGOD"));
        assert!(!has_scheme("/s?k=shoes&page=2"));
        assert!(!has_scheme("//m.media-amazon.com/images/I/1.jpg"));
        assert!(!has_scheme("s?k=a:b"));
    }

    #[test]
    fn qualify_url_prefixes_origin_for_relative_path() {
        assert_eq!(
            qualify_url("/s?k=shoes&page=2", &base()).as_deref(),
            Some("https://www.amazon.com/s?k=shoes&page=2")
        );
    }

    #[test]
    fn qualify_url_keeps_absolute_verbatim() {
        let href = "https://www.amazon.com/s?k=shoes&page=2&qid=17";
        assert_eq!(qualify_url(href, &base()).as_deref(), Some(href));
    }

    #[test]
    fn qualify_url_handles_protocol_relative() {
        assert_eq!(
            qualify_url("//m.media-amazon.com/images/I/1.jpg", &base()).as_deref(),
            Some("https://m.media-amazon.com/images/I/1.jpg")
        );
    }

    #[test]
    fn qualify_url_blank_is_none() {
        assert!(qualify_url("   ", &base()).is_none());
    }

    #[test]
    fn qualify_page_url_accepts_http_links() {
        assert_eq!(
            qualify_page_url("/s?k=shoes&page=2", &base()).as_deref(),
            Some("https://www.amazon.com/s?k=shoes&page=2")
        );
        assert_eq!(
            qualify_page_url("http://www.amazon.com/s?k=shoes", &base()).as_deref(),
            Some("http://www.amazon.com/s?k=shoes")
        );
    }

    #[test]
    fn qualify_page_url_rejects_non_http_schemes() {
        assert!(qualify_page_url("javascript:void(0)", &base()).is_none());
        assert!(qualify_page_url("mailto:help@example.com", &base()).is_none());
    }

    #[test]
    fn page_from_url_reads_param() {
        assert_eq!(
            page_from_url("https://www.amazon.com/s?k=shoes&page=3&ref=sr_pg_3"),
            Some(3)
        );
    }

    #[test]
    fn page_from_url_missing_or_invalid() {
        assert!(page_from_url("https://www.amazon.com/s?k=shoes").is_none());
        assert!(page_from_url("https://www.amazon.com/s?k=shoes&page=last").is_none());
        assert!(page_from_url("/s?k=shoes&page=2").is_none());
    }
}
