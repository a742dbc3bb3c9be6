// src/main.rs
mod extractors;
mod fetch;
mod inference;
mod pipeline;
mod server;
mod utils;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fetch::client::DEFAULT_FETCH_TIMEOUT_SECS;
use fetch::{HttpFetcher, PageFetcher};
use inference::client::{
    DEFAULT_INFERENCE_TIMEOUT_SECS, DEFAULT_INFERENCE_URL, DEFAULT_NER_MODEL,
    DEFAULT_SUMMARY_MODEL,
};
use inference::{HfInference, InferenceConfig};
use pipeline::ExtractionPipeline;
use utils::AppError;

/// Summary, entity events and publish date for a news article URL
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Page fetch timeout in seconds
    #[arg(long, global = true, env = "NEWS_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,

    /// Timeout for each model inference call in seconds
    #[arg(long, global = true, env = "NEWS_INFERENCE_TIMEOUT_SECS", default_value_t = DEFAULT_INFERENCE_TIMEOUT_SECS)]
    inference_timeout_secs: u64,

    /// Base URL of the inference API; the model id is appended
    #[arg(long, global = true, env = "NEWS_INFERENCE_URL", default_value = DEFAULT_INFERENCE_URL)]
    inference_url: String,

    /// Summarization model id
    #[arg(long, global = true, env = "NEWS_SUMMARY_MODEL", default_value = DEFAULT_SUMMARY_MODEL)]
    summary_model: String,

    /// Named-entity recognition model id
    #[arg(long, global = true, env = "NEWS_NER_MODEL", default_value = DEFAULT_NER_MODEL)]
    ner_model: String,

    /// API token for the inference endpoint
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    hf_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single article and print the JSON result
    Extract {
        /// Article URL
        #[arg(short, long)]
        url: String,

        /// Save the raw and annotated page here for debugging
        #[arg(short, long)]
        debug_dir: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Serve POST /extract over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "NEWS_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load .env if there is one, so env-backed args below can use it
    let dotenv = dotenvy::dotenv();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    // 3. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting with command: {:?}", args.command);

    if args.fetch_timeout_secs == 0 || args.inference_timeout_secs == 0 {
        return Err(AppError::Config("Timeouts must be at least one second".to_string()));
    }

    // 4. Build collaborators, shared by every request
    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(args.fetch_timeout_secs))?);
    let models = Arc::new(HfInference::new(InferenceConfig {
        base_url: args.inference_url,
        summary_model: args.summary_model,
        ner_model: args.ner_model,
        api_token: args.hf_token,
        timeout_secs: args.inference_timeout_secs,
    })?);
    let pipeline = Arc::new(ExtractionPipeline::new(
        fetcher.clone(),
        models.clone(),
        models,
    ));

    // 5. Run
    match args.command {
        Command::Extract { url, debug_dir, pretty } => {
            let outcome = match debug_dir {
                Some(dir) => match fetcher.fetch(&url).await {
                    Ok(page) => {
                        if let Err(e) = utils::html_debug::dump_page(&dir, &page.html) {
                            tracing::warn!("Failed to write debug pages: {}", e);
                        }
                        pipeline.analyze(Some(&page.html)).await?
                    }
                    Err(e) => {
                        tracing::warn!("Fetch failed for {}: {}", url, e);
                        pipeline.analyze(None).await?
                    }
                },
                None => pipeline.run(&url).await?,
            };

            let json = if pretty {
                serde_json::to_string_pretty(&outcome)?
            } else {
                serde_json::to_string(&outcome)?
            };
            println!("{}", json);
        }
        Command::Serve { bind } => {
            server::serve(bind, pipeline).await?;
        }
    }

    tracing::info!("Done.");
    Ok(())
}
