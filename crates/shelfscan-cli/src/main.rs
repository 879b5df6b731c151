mod crawl;

use clap::{Args, Parser, Subcommand};
use shelfscan_core::SelectorConfig;
use shelfscan_scraper::{SearchClient, SearchRequest};
use tracing_subscriber::EnvFilter;

use crate::crawl::{crawl, CrawlOptions};

#[derive(Debug, Parser)]
#[command(name = "shelfscan-cli")]
#[command(about = "Scrape storefront search results from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch one results page and print it as JSON.
    Search(SearchArgs),
    /// Follow next-page links from a keyword search and print every product.
    Crawl(CrawlArgs),
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Search keyword.
    #[arg(long, required_unless_present = "url")]
    keyword: Option<String>,
    /// 1-based page number.
    #[arg(long)]
    page: Option<u32>,
    /// Resume from a previously returned `nextPageUrl`. Wins over `--keyword`.
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Args)]
struct CrawlArgs {
    /// Search keyword.
    #[arg(long)]
    keyword: String,
    /// Stop after this many pages.
    #[arg(long, default_value_t = 5)]
    max_pages: u32,
    /// Pause between page fetches, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = shelfscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let selectors = match &config.selectors_path {
        Some(path) => shelfscan_core::load_selector_config(path)?,
        None => SelectorConfig::default(),
    };
    let client = SearchClient::from_config(&config, &selectors)?;

    let output = match cli.command {
        Commands::Search(args) => {
            let request = SearchRequest::from_parts(
                args.keyword.as_deref(),
                args.page,
                args.url.as_deref(),
            )?;
            let page = client.search(&request).await?;
            serde_json::to_string_pretty(&page)?
        }
        Commands::Crawl(args) => {
            let options = CrawlOptions {
                max_pages: args.max_pages,
                delay: std::time::Duration::from_millis(args.delay_ms),
            };
            let request = SearchRequest::from_parts(Some(&args.keyword), None, None)?;
            let result = crawl(&client, request, &options).await?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests;
