mod format;
mod gemini;
mod router;
mod tavily;

pub const USER_AGENT: &str = concat!("luna/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Client;
use tracing::info;

use gemini::GeminiClient;
use router::Router;
use tavily::client::{DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT};
use tavily::{SearchProvider, TavilyClient};

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

/// Answer questions with Gemini, pulling in Tavily web search when the
/// question asks about current events.
///
/// Reads `GEMINI_API_KEY`, `TAVILY_API_KEY` and optionally `GEMINI_MODEL`.
#[derive(Parser)]
#[command(name = "luna", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a question, searching the web first if it mentions live topics
    Ask {
        question: String,
        /// Number of search results to feed into the prompt (1-20)
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u8,
        /// Print the answer payload as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a Tavily web search and print the results
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u8,
        #[arg(long)]
        json: bool,
    },
    /// Extract page content for one or more URLs
    Extract {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

fn http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}

fn print_json(value: &impl serde::Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("luna=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let http = http_client()?;

    match cli.command {
        Command::Ask {
            question,
            max_results,
            json,
        } => {
            if question.trim().is_empty() {
                return Err("question must not be empty".into());
            }
            let search = TavilyClient::from_env(http.clone())?;
            let generator = GeminiClient::from_env(http)?;
            info!(model = generator.model(), "answering question");

            let router = Router::new(search, generator, max_results.clamp(1, MAX_RESULTS_LIMIT));
            let payload = router.answer_or_fallback(&question).await;

            if json {
                print_json(&payload)?;
            } else {
                println!("{}", format::format_answer(&payload));
            }
        }
        Command::Search {
            query,
            max_results,
            json,
        } => {
            let search = TavilyClient::from_env(http)?;
            let response = search.search(&query, max_results).await?;
            if json {
                print_json(&response)?;
            } else {
                println!("{}", format::format_search(&response, &query));
            }
        }
        Command::Extract { urls, json } => {
            let search = TavilyClient::from_env(http)?;
            let response = search.extract(&urls).await?;
            if json {
                print_json(&response)?;
            } else {
                println!("{}", format::format_extract(&response));
            }
        }
    }

    Ok(())
}
