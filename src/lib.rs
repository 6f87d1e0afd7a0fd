//! # Pharma Papers
//!
//! Find PubMed papers with at least one author affiliated with a
//! pharmaceutical or biotech company, and export them as CSV.
//!
//! ## Features
//!
//! - **PubMed API Integration**: ESearch for IDs, batched EFetch for details
//! - **Tolerant Extraction**: a malformed record is skipped, never fatal
//! - **Affiliation Classifier**: ordered, auditable industry/academic rules
//! - **CSV Export**: fixed column contract, to a file or stdout
//!
//! ## Quick Start
//!
//! ```no_run
//! use pharma_papers::pipeline::{PipelineOptions, run};
//! use pharma_papers::{ClientConfig, PubMedClient, export::export_papers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PubMedClient::with_config(ClientConfig::new().with_email("me@example.org"))?;
//!     let output = run(&client, "cancer immunotherapy", &PipelineOptions::new(50)).await?;
//!
//!     export_papers(&output.papers, None)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Classifying an affiliation
//!
//! ```
//! use pharma_papers::affiliation::classify;
//!
//! let result = classify(Some("Genentech Research, affiliated with Stanford University Hospital"), None);
//! assert!(result.is_industry);
//! assert_eq!(result.company_name.as_deref(), Some("Genentech"));
//! ```

pub mod affiliation;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod pubmed;
pub mod rate_limit;
pub mod retry;

// Re-export main types for convenience
pub use affiliation::{Classification, MatchRule, classify};
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use filter::{FilteredPaper, filter_industry_papers};
pub use pipeline::{BatchFailurePolicy, PaperSource, PipelineOptions};
pub use pubmed::{Author, PaperRecord, PubMedClient, PublicationDate};
pub use retry::RetryConfig;
