//! Search, fetch, extract and filter in one sequential run
//!
//! The pipeline talks to the network only through [`PaperSource`], so tests
//! can drive it with canned payloads.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::config::DEFAULT_BATCH_SIZE;
use crate::error::Result;
use crate::filter::{FilteredPaper, filter_industry_papers};
use crate::pubmed::PubMedClient;
use crate::pubmed::client::validate_pmid;
use crate::pubmed::models::PaperRecord;
use crate::pubmed::parser::extract_papers;

/// The two remote operations the pipeline depends on
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// IDs matching `query`, at most `max_results`
    async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

    /// Raw EFetch XML for `ids`
    async fn fetch_details(&self, ids: &[String]) -> Result<String>;
}

#[async_trait]
impl PaperSource for PubMedClient {
    async fn search_ids(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        PubMedClient::search_ids(self, query, max_results).await
    }

    async fn fetch_details(&self, ids: &[String]) -> Result<String> {
        PubMedClient::fetch_details(self, ids).await
    }
}

/// What to do when a batch still fails after the client's retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchFailurePolicy {
    /// Stop the run on a transport error
    #[default]
    Abort,
    /// Log the failure and continue with the next batch
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    pub max_results: usize,
    pub batch_size: usize,
    pub on_batch_failure: BatchFailurePolicy,
}

impl PipelineOptions {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            batch_size: DEFAULT_BATCH_SIZE,
            on_batch_failure: BatchFailurePolicy::default(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_batch_failure_policy(mut self, policy: BatchFailurePolicy) -> Self {
        self.on_batch_failure = policy;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Counters and diagnostics collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// IDs returned by the search
    pub requested: usize,
    /// Papers successfully extracted
    pub extracted: usize,
    /// Papers whose record could not be parsed
    pub malformed: usize,
    /// Batches whose fetch failed and were dropped
    pub skipped_batches: usize,
    /// IDs from the search that are not valid PMIDs and were never fetched
    pub invalid_ids: Vec<String>,
    /// Requested IDs absent from the fetched payloads
    pub missing_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub papers: Vec<FilteredPaper>,
    pub report: RunReport,
}

/// Extract and filter one EFetch payload. No I/O.
pub fn process_payload(xml: &str) -> Vec<FilteredPaper> {
    filter_industry_papers(&extract_papers(xml).papers)
}

/// Fetch `ids` in batches and extract their records, in request order.
///
/// Invalid PMIDs are dropped up front. A failed batch ends the run only when
/// the error is a transport error and the policy is
/// [`BatchFailurePolicy::Abort`]; otherwise the batch is skipped.
#[instrument(skip(source, ids, options, report), fields(ids = ids.len(), batch_size = options.batch_size))]
pub async fn fetch_records<S>(
    source: &S,
    ids: &[String],
    options: &PipelineOptions,
    report: &mut RunReport,
) -> Result<Vec<PaperRecord>>
where
    S: PaperSource + ?Sized,
{
    let (ids, invalid): (Vec<String>, Vec<String>) =
        ids.iter().cloned().partition(|id| validate_pmid(id).is_ok());
    if !invalid.is_empty() {
        warn!(count = invalid.len(), ids = ?invalid, "Dropping invalid PMIDs");
        report.invalid_ids.extend(invalid);
    }

    let mut records = Vec::with_capacity(ids.len());
    let batch_count = ids.len().div_ceil(options.batch_size.max(1));

    for (index, batch) in ids.chunks(options.batch_size.max(1)).enumerate() {
        debug!(batch = index + 1, of = batch_count, size = batch.len(), "Fetching batch");

        let payload = match source.fetch_details(batch).await {
            Ok(payload) => payload,
            Err(err)
                if err.is_transport() && options.on_batch_failure == BatchFailurePolicy::Abort =>
            {
                return Err(err);
            }
            Err(err) => {
                warn!(
                    batch = index + 1,
                    size = batch.len(),
                    error = %err,
                    "Batch fetch failed, skipping"
                );
                report.skipped_batches += 1;
                continue;
            }
        };

        let extraction = extract_papers(&payload);
        report.malformed += extraction.skipped.len();

        let returned: HashSet<&str> = extraction.papers.iter().map(|p| p.pmid.as_str()).collect();
        let missing: Vec<String> = batch
            .iter()
            .filter(|id| !returned.contains(id.trim()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            warn!(count = missing.len(), ids = ?missing, "Requested IDs missing from payload");
            report.missing_ids.extend(missing);
        }

        report.extracted += extraction.papers.len();
        records.extend(extraction.papers);
    }

    Ok(records)
}

/// Run search, fetch, extraction and filtering for `query`
///
/// Returns an error when the search itself fails, or when a fetch hits a
/// transport error under [`BatchFailurePolicy::Abort`]. No matches is an
/// empty, successful output.
#[instrument(skip(source, options), fields(query = %query, max_results = options.max_results))]
pub async fn run<S>(source: &S, query: &str, options: &PipelineOptions) -> Result<PipelineOutput>
where
    S: PaperSource + ?Sized,
{
    let ids = source.search_ids(query, options.max_results).await?;
    let mut report = RunReport {
        requested: ids.len(),
        ..RunReport::default()
    };

    if ids.is_empty() {
        info!("No papers matched the query");
        return Ok(PipelineOutput {
            papers: Vec::new(),
            report,
        });
    }

    let records = fetch_records(source, &ids, options, &mut report).await?;
    let papers = filter_industry_papers(&records);

    info!(
        requested = report.requested,
        extracted = report.extracted,
        malformed = report.malformed,
        skipped_batches = report.skipped_batches,
        industry_papers = papers.len(),
        "Pipeline completed"
    );

    Ok(PipelineOutput { papers, report })
}
