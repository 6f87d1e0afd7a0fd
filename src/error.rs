use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Everything that can go wrong between a query and the CSV file
#[derive(Error, Debug)]
pub enum PubMedError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// ESearch answered with something other than the expected JSON
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The EFetch payload is not well-formed XML past some point
    #[error("XML parsing failed: {0}")]
    XmlError(String),

    /// A single paper's sub-tree could not be turned into a record
    #[error("Malformed record {}: {message}", .pmid.as_deref().unwrap_or("<unknown PMID>"))]
    MalformedRecord {
        pmid: Option<String>,
        message: String,
    },

    #[error("Invalid PMID format: {pmid}")]
    InvalidPmid { pmid: String },

    /// NCBI kept answering 429 after all retries
    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// ESearch cannot page past the first 9,999 results
    #[error("Search limit exceeded: requested {requested}, maximum is {maximum}")]
    SearchLimitExceeded { requested: usize, maximum: usize },

    #[error("CSV export failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = result::Result<T, PubMedError>;

impl PubMedError {
    /// Whether this error came from the remote API boundary.
    ///
    /// Only these errors are fatal to a run; everything else degrades to
    /// omitting the affected paper.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PubMedError::RequestError(_)
                | PubMedError::JsonError(_)
                | PubMedError::XmlError(_)
                | PubMedError::RateLimitExceeded
                | PubMedError::ApiError { .. }
        )
    }
}

/// 5xx and 429 are worth another attempt
fn transient_status(status: u16) -> bool {
    (500..600).contains(&status) || status == 429
}

impl RetryableError for PubMedError {
    fn is_retryable(&self) -> bool {
        match self {
            PubMedError::RequestError(err) => match err.status() {
                Some(status) => transient_status(status.as_u16()),
                None => err.is_timeout() || err.is_connect() || err.is_request(),
            },
            PubMedError::RateLimitExceeded => true,
            PubMedError::ApiError { status, .. } => transient_status(*status),
            _ => false,
        }
    }

    fn retry_reason(&self) -> &str {
        match self {
            PubMedError::RequestError(err) if err.is_timeout() => "request timed out",
            PubMedError::RequestError(err) if err.is_connect() => "connection failed",
            PubMedError::RequestError(_) => "network error",
            PubMedError::RateLimitExceeded => "throttled by NCBI",
            PubMedError::ApiError { status, .. } if transient_status(*status) => "server error",
            PubMedError::ApiError { .. } => "request rejected",
            PubMedError::JsonError(_) => "unreadable search response",
            PubMedError::XmlError(_) | PubMedError::MalformedRecord { .. } => "unreadable payload",
            PubMedError::InvalidPmid { .. } | PubMedError::SearchLimitExceeded { .. } => {
                "invalid input"
            }
            PubMedError::CsvError(_) | PubMedError::IoError(_) => "output error",
        }
    }
}
