//! Client configuration for NCBI E-utilities access

use std::time::Duration;

use crate::rate_limit::RateLimiter;
use crate::retry::RetryConfig;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "pharma-papers";

/// NCBI allows 3 requests/second without an API key
const RATE_LIMIT_WITHOUT_KEY: f64 = 3.0;
/// and 10 requests/second with one
const RATE_LIMIT_WITH_KEY: f64 = 10.0;

/// NCBI recommends at most 200 IDs per EFetch request
pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Configuration for [`PubMedClient`](crate::pubmed::PubMedClient)
///
/// # Example
///
/// ```
/// use pharma_papers::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu");
///
/// assert_eq!(config.effective_rate_limit(), 10.0);
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// NCBI API key (raises the rate limit)
    pub api_key: Option<String>,
    /// Contact email sent with every request
    pub email: Option<String>,
    /// Tool name sent with every request
    pub tool: Option<String>,
    /// Requests per second; derived from the API key when unset
    pub rate_limit: Option<f64>,
    /// Override for the E-utilities base URL (used by tests)
    pub base_url: Option<String>,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// HTTP timeout per request
    pub timeout: Duration,
    /// Retry policy for transient failures
    pub retry_config: RetryConfig,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: None,
            rate_limit: None,
            base_url: None,
            user_agent: None,
            timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set an explicit rate limit in requests per second
    pub fn with_rate_limit(mut self, rate_limit: f64) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Explicit rate limit, else the NCBI default for the presence of an API key
    pub fn effective_rate_limit(&self) -> f64 {
        self.rate_limit.unwrap_or(if self.api_key.is_some() {
            RATE_LIMIT_WITH_KEY
        } else {
            RATE_LIMIT_WITHOUT_KEY
        })
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("pharma-papers/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }

        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }

        params.push(("tool".to_string(), self.effective_tool().to_string()));

        params
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_rate_limit())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
