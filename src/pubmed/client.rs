use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::responses::ESearchResult;
use crate::rate_limit::RateLimiter;
use crate::retry::with_retry;

/// ESearch cannot page past the first 9,999 results
pub const MAX_RETRIEVABLE: usize = 9999;

/// Client for the two E-utilities calls the pipeline needs: ESearch for IDs
/// and EFetch for the XML details of those IDs
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use pharma_papers::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_api_key("your_api_key_here")
    ///     .with_email("researcher@university.edu");
    ///
    /// let client = PubMedClient::with_config(config).unwrap();
    /// assert_eq!(client.config().effective_rate_limit(), 10.0);
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.effective_user_agent())
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing HTTP client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            rate_limiter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Search PubMed and return up to `max_results` PMIDs in relevance order
    ///
    /// An empty query returns no IDs without contacting the API.
    ///
    /// # Errors
    ///
    /// * `PubMedError::SearchLimitExceeded` - `max_results` is above 9,999
    /// * `PubMedError::ApiError` - NCBI rejected the query
    /// * `PubMedError::RequestError` - the HTTP request failed after retries
    #[instrument(skip(self), fields(query = %query, max_results = max_results))]
    pub async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        if max_results > MAX_RETRIEVABLE {
            return Err(PubMedError::SearchLimitExceeded {
                requested: max_results,
                maximum: MAX_RETRIEVABLE,
            });
        }

        if query.trim().is_empty() {
            debug!("Empty query provided, returning empty results");
            return Ok(Vec::new());
        }

        if max_results == 0 {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&retmax={}&retstart=0&retmode=json",
            self.base_url,
            urlencoding::encode(query),
            max_results
        );

        debug!("Making ESearch API request");
        let response = self.make_request(&url).await?;
        let search_result: ESearchResult = response.json().await?;

        // NCBI sometimes returns 200 OK with an ERROR field
        if let Some(error_msg) = &search_result.esearchresult.error {
            return Err(PubMedError::ApiError {
                status: 200,
                message: format!("NCBI ESearch API error: {}", error_msg),
            });
        }

        let total_count: usize = search_result
            .esearchresult
            .count
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(0);

        if let Some(translation) = &search_result.esearchresult.querytranslation {
            debug!(translation = %translation, "Query translated by PubMed");
        }

        info!(
            total = total_count,
            returned = search_result.esearchresult.idlist.len(),
            "Search completed"
        );

        Ok(search_result.esearchresult.idlist)
    }

    /// Fetch the EFetch XML payload for `ids` in a single request
    ///
    /// Callers batch large ID lists; see
    /// [`PipelineOptions::batch_size`](crate::pipeline::PipelineOptions::batch_size).
    /// Every ID is validated before any request is made.
    #[instrument(skip(self, ids), fields(ids_count = ids.len()))]
    pub async fn fetch_details(&self, ids: &[String]) -> Result<String> {
        if ids.is_empty() {
            return Ok(String::new());
        }

        for id in ids {
            validate_pmid(id)?;
        }

        let url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            ids.iter().map(|id| id.trim()).collect::<Vec<_>>().join(",")
        );

        debug!(batch_size = ids.len(), "Making batch EFetch API request");
        let response = self.make_request(&url).await?;
        let xml = response.text().await?;
        debug!(bytes = xml.len(), "EFetch payload received");

        Ok(xml)
    }

    /// Send a GET request with rate limiting and bounded retry.
    /// Appends `api_key`, `email` and `tool` to the URL.
    async fn make_request(&self, url: &str) -> Result<Response> {
        let mut final_url = url.to_string();
        let api_params = self.config.build_api_params();

        if !api_params.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            final_url.push(separator);

            let param_strings: Vec<String> = api_params
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
                .collect();
            final_url.push_str(&param_strings.join("&"));
        }

        let response = with_retry(
            || async {
                self.rate_limiter.acquire().await?;
                debug!("Making API request to: {}", final_url);
                let response = self
                    .client
                    .get(&final_url)
                    .send()
                    .await
                    .map_err(PubMedError::from)?;

                // Server errors and throttling are retryable
                if response.status().is_server_error()
                    || response.status() == StatusCode::TOO_MANY_REQUESTS
                {
                    return Err(status_error(&response));
                }

                Ok(response)
            },
            &self.config.retry_config,
            "NCBI API request",
        )
        .await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(status_error(&response));
        }

        Ok(response)
    }
}

fn status_error(response: &Response) -> PubMedError {
    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        return PubMedError::RateLimitExceeded;
    }
    PubMedError::ApiError {
        status: response.status().as_u16(),
        message: response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

/// PMIDs are positive integers; anything else is rejected before a request
pub fn validate_pmid(pmid: &str) -> Result<()> {
    let trimmed = pmid.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(PubMedError::InvalidPmid {
            pmid: pmid.to_string(),
        });
    }
    if trimmed.chars().all(|c| c == '0') {
        return Err(PubMedError::InvalidPmid {
            pmid: pmid.to_string(),
        });
    }
    Ok(())
}
