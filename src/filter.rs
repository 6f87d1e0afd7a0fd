//! Keep papers with at least one industry-affiliated author

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::affiliation::{Classification, classify_author};
use crate::pubmed::models::{Author, PaperRecord, PublicationDate};

/// Separator for multi-valued output fields
pub const FIELD_SEPARATOR: &str = "; ";

/// An author together with the classifier's verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAuthor<'a> {
    pub author: &'a Author,
    pub classification: Classification,
}

impl ClassifiedAuthor<'_> {
    pub fn is_industry(&self) -> bool {
        self.classification.is_industry
    }

    pub fn company_name(&self) -> Option<&str> {
        self.classification.company_name.as_deref()
    }
}

/// A paper that passed the filter, reduced to its industry authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredPaper {
    pub pmid: String,
    pub title: String,
    pub publication_date: PublicationDate,
    /// Industry-affiliated author names in source order
    pub industry_authors: Vec<String>,
    /// Distinct company names in first-seen order
    pub companies: Vec<String>,
    /// Email of the first author (of any affiliation) that has one
    pub corresponding_email: Option<String>,
}

impl FilteredPaper {
    pub fn industry_authors_joined(&self) -> String {
        self.industry_authors.join(FIELD_SEPARATOR)
    }

    pub fn companies_joined(&self) -> String {
        self.companies.join(FIELD_SEPARATOR)
    }
}

/// Classify every author of `paper`, in source order
pub fn classify_authors(paper: &PaperRecord) -> Vec<ClassifiedAuthor<'_>> {
    paper
        .authors
        .iter()
        .map(|author| ClassifiedAuthor {
            author,
            classification: classify_author(author),
        })
        .collect()
}

/// Build the filtered record for one paper, or `None` when no author is
/// industry-affiliated
pub fn filter_paper(paper: &PaperRecord) -> Option<FilteredPaper> {
    let classified = classify_authors(paper);

    let mut industry_authors = Vec::new();
    let mut companies: Vec<String> = Vec::new();
    for entry in classified.iter().filter(|entry| entry.is_industry()) {
        debug!(
            pmid = %paper.pmid,
            author = %entry.author.name,
            rule = %entry.classification.rule,
            company = ?entry.company_name(),
            "Industry author"
        );
        industry_authors.push(entry.author.name.clone());
        if let Some(company) = entry.company_name() {
            if !companies.iter().any(|seen| seen == company) {
                companies.push(company.to_string());
            }
        }
    }

    if industry_authors.is_empty() {
        return None;
    }

    let corresponding_email = paper
        .authors
        .iter()
        .filter_map(|author| author.email.as_deref())
        .map(str::trim)
        .find(|email| !email.is_empty())
        .map(str::to_string);

    Some(FilteredPaper {
        pmid: paper.pmid.clone(),
        title: paper.title.clone(),
        publication_date: paper.publication_date,
        industry_authors,
        companies,
        corresponding_email,
    })
}

/// Filter `papers` down to those with at least one industry-affiliated
/// author, preserving input order
#[instrument(skip(papers), fields(papers = papers.len()))]
pub fn filter_industry_papers(papers: &[PaperRecord]) -> Vec<FilteredPaper> {
    let filtered: Vec<FilteredPaper> = papers.iter().filter_map(filter_paper).collect();

    info!(
        kept = filtered.len(),
        total = papers.len(),
        "Filtered papers with industry authors"
    );
    filtered
}
