use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pharma_papers::config::DEFAULT_BATCH_SIZE;
use pharma_papers::export::export_papers;
use pharma_papers::pipeline::{BatchFailurePolicy, PipelineOptions, run};
use pharma_papers::{ClientConfig, PubMedClient};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(
    name = "get-papers-list",
    version,
    about = "Find PubMed papers with pharmaceutical or biotech company-affiliated authors",
    long_about = "Searches PubMed, keeps papers with at least one author affiliated with a \
                  pharmaceutical or biotech company, and writes them as CSV"
)]
struct Cli {
    /// PubMed query (full PubMed syntax is supported)
    query: String,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// Write results to this CSV file instead of stdout
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of search results to process
    #[arg(long, default_value_t = 100)]
    max_results: usize,

    /// Number of IDs per EFetch request
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Skip a batch whose fetch fails after retries instead of aborting
    #[arg(long)]
    skip_failed_batches: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "pharma-papers")]
    tool: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_tool(&self.tool);
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(email) = &self.email {
            config = config.with_email(email);
        }
        config
    }

    fn pipeline_options(&self) -> PipelineOptions {
        let policy = if self.skip_failed_batches {
            BatchFailurePolicy::Skip
        } else {
            BatchFailurePolicy::Abort
        };
        PipelineOptions::new(self.max_results)
            .with_batch_size(self.batch_size)
            .with_batch_failure_policy(policy)
    }
}

fn init_tracing(debug: bool) {
    // RUST_LOG wins unless --debug is given
    let filter = if debug {
        EnvFilter::new("warn,pharma_papers=debug,get_papers_list=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,pharma_papers=info,get_papers_list=info"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    debug!(query = %cli.query, max_results = cli.max_results, "Parsed arguments");

    let client = PubMedClient::with_config(cli.client_config())
        .context("Failed to create HTTP client")?;

    let output = run(&client, &cli.query, &cli.pipeline_options())
        .await
        .with_context(|| format!("Failed to retrieve papers for query {:?}", cli.query))?;

    if !output.report.invalid_ids.is_empty() {
        info!(
            count = output.report.invalid_ids.len(),
            "Some search results were not valid PMIDs and were skipped"
        );
    }
    if !output.report.missing_ids.is_empty() {
        info!(
            count = output.report.missing_ids.len(),
            "Some requested papers were not returned by PubMed"
        );
    }

    export_papers(&output.papers, cli.file.as_deref()).with_context(|| match &cli.file {
        Some(path) => format!("Failed to write {}", path.display()),
        None => "Failed to write to stdout".to_string(),
    })?;

    Ok(())
}
