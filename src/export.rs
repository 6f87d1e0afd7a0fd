//! CSV output of filtered papers
//!
//! Columns, in order: `PubmedID`, `Title`, `Publication Date`,
//! `Non-academic Author(s)`, `Company Affiliation(s)`,
//! `Corresponding Author Email`.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::filter::FilteredPaper;

pub const CSV_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "PubmedID")]
    pmid: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    industry_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    companies: String,
    #[serde(rename = "Corresponding Author Email")]
    corresponding_email: &'a str,
}

impl<'a> From<&'a FilteredPaper> for CsvRow<'a> {
    fn from(paper: &'a FilteredPaper) -> Self {
        Self {
            pmid: &paper.pmid,
            title: &paper.title,
            publication_date: paper.publication_date.to_string(),
            industry_authors: paper.industry_authors_joined(),
            companies: paper.companies_joined(),
            corresponding_email: paper.corresponding_email.as_deref().unwrap_or(""),
        }
    }
}

/// Write `papers` as CSV with a header row. Writes nothing for an empty slice.
pub fn write_csv<W: Write>(papers: &[FilteredPaper], writer: W) -> Result<()> {
    if papers.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for paper in papers {
        wtr.serialize(CsvRow::from(paper))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render `papers` to a CSV string
pub fn to_csv_string(papers: &[FilteredPaper]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(papers, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Export to `path`, or to stdout when `path` is `None`
///
/// An empty result logs a warning and leaves no file behind.
pub fn export_papers(papers: &[FilteredPaper], path: Option<&Path>) -> Result<()> {
    if papers.is_empty() {
        warn!("No papers to export");
        return Ok(());
    }

    match path {
        Some(path) => {
            info!(count = papers.len(), path = %path.display(), "Exporting papers");
            let file = std::fs::File::create(path)?;
            write_csv(papers, io::BufWriter::new(file))?;
        }
        None => {
            info!(count = papers.len(), "Exporting papers to stdout");
            write_csv(papers, io::stdout().lock())?;
        }
    }

    info!("Export completed");
    Ok(())
}
