use clap::Parser;

use super::{Cli, Commands};

#[test]
fn parses_search_with_keyword_and_page() {
    let cli = Cli::try_parse_from(["shelfscan-cli", "search", "--keyword", "shoes", "--page", "3"])
        .expect("parse");
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.keyword.as_deref(), Some("shoes"));
            assert_eq!(args.page, Some(3));
            assert!(args.url.is_none());
        }
        Commands::Crawl(_) => panic!("expected search"),
    }
}

#[test]
fn parses_search_with_url_only() {
    let cli = Cli::try_parse_from([
        "shelfscan-cli",
        "search",
        "--url",
        "/s?k=shoes&page=2",
    ])
    .expect("parse");
    assert!(matches!(
        cli.command,
        Commands::Search(ref args) if args.url.as_deref() == Some("/s?k=shoes&page=2")
    ));
}

#[test]
fn search_requires_keyword_or_url() {
    assert!(Cli::try_parse_from(["shelfscan-cli", "search"]).is_err());
}

#[test]
fn search_rejects_non_numeric_page() {
    assert!(
        Cli::try_parse_from(["shelfscan-cli", "search", "--keyword", "shoes", "--page", "two"])
            .is_err()
    );
}

#[test]
fn crawl_uses_defaults() {
    let cli = Cli::try_parse_from(["shelfscan-cli", "crawl", "--keyword", "shoes"]).expect("parse");
    match cli.command {
        Commands::Crawl(args) => {
            assert_eq!(args.keyword, "shoes");
            assert_eq!(args.max_pages, 5);
            assert_eq!(args.delay_ms, 1000);
        }
        Commands::Search(_) => panic!("expected crawl"),
    }
}

#[test]
fn crawl_accepts_limits() {
    let cli = Cli::try_parse_from([
        "shelfscan-cli",
        "crawl",
        "--keyword",
        "shoes",
        "--max-pages",
        "2",
        "--delay-ms",
        "0",
    ])
    .expect("parse");
    assert!(matches!(
        cli.command,
        Commands::Crawl(ref args) if args.max_pages == 2 && args.delay_ms == 0
    ));
}

#[test]
fn missing_subcommand_is_error() {
    assert!(Cli::try_parse_from(["shelfscan-cli"]).is_err());
}
