//! Extraction and filtering over complete EFetch payloads

mod common;

use common::{TWO_PAPER_PAYLOAD, article_set, article_xml};
use pharma_papers::PubMedError;
use pharma_papers::pipeline::process_payload;
use pharma_papers::pubmed::parser::extract_papers;
use tracing_test::traced_test;

#[test]
fn test_two_paper_payload_end_to_end() {
    let filtered = process_payload(TWO_PAPER_PAYLOAD);

    assert_eq!(filtered.len(), 1);
    let paper = &filtered[0];
    assert_eq!(paper.pmid, "37000001");
    assert_eq!(
        paper.title,
        "Efficacy of a novel kinase inhibitor in advanced NSCLC"
    );
    assert_eq!(paper.publication_date.to_string(), "2023-03-15");
    assert_eq!(paper.industry_authors_joined(), "Alice Smith");
    assert_eq!(paper.companies_joined(), "Pfizer");
    assert_eq!(paper.corresponding_email.as_deref(), Some("x@pfizer.com"));
}

#[test]
fn test_extraction_and_filtering_are_idempotent() {
    let first = process_payload(TWO_PAPER_PAYLOAD);
    let second = process_payload(TWO_PAPER_PAYLOAD);
    assert_eq!(first, second);

    let first_csv = pharma_papers::export::to_csv_string(&first).unwrap();
    let second_csv = pharma_papers::export::to_csv_string(&second).unwrap();
    assert_eq!(first_csv.as_bytes(), second_csv.as_bytes());
}

#[test]
fn test_records_keep_author_order_and_details() {
    let extraction = extract_papers(TWO_PAPER_PAYLOAD);
    assert!(extraction.skipped.is_empty());

    let names: Vec<&str> = extraction.papers[0]
        .authors
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice Smith", "Bob Jones"]);

    let carol = &extraction.papers[1].authors[0];
    assert_eq!(carol.email.as_deref(), Some("carol@stanford.edu"));
    assert_eq!(extraction.papers[1].publication_date.to_string(), "2022");
}

#[test]
#[traced_test]
fn test_malformed_paper_does_not_abort_batch() {
    let broken = "<PubmedArticle><MedlineCitation><PMID>20000002</PMID>\
                  <Article><ArticleTitle>A</ArticleTitle></Article>\
                  <Article><ArticleTitle>B</ArticleTitle></Article>\
                  </MedlineCitation></PubmedArticle>"
        .to_string();
    let xml = article_set(&[
        article_xml("20000001", "Before", &[("Doe", "Jane", "Moderna, Cambridge, MA")]),
        broken,
        article_xml("20000003", "After", &[("Roe", "John", "Amgen Inc., Thousand Oaks, CA")]),
    ]);

    let extraction = extract_papers(&xml);
    let pmids: Vec<&str> = extraction.papers.iter().map(|p| p.pmid.as_str()).collect();
    assert_eq!(pmids, vec!["20000001", "20000003"]);
    assert!(matches!(
        &extraction.skipped[..],
        [PubMedError::MalformedRecord { pmid: Some(pmid), .. }] if pmid == "20000002"
    ));
    assert!(logs_contain("Failed to parse article, skipping"));

    let filtered = process_payload(&xml);
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_paper_without_author_list() {
    let xml = article_set(&["<PubmedArticle><MedlineCitation><PMID>30000001</PMID>\
         <Article><ArticleTitle>Editorial</ArticleTitle></Article>\
         </MedlineCitation></PubmedArticle>"
        .to_string()]);

    let extraction = extract_papers(&xml);
    assert_eq!(extraction.papers.len(), 1);
    assert!(extraction.papers[0].authors.is_empty());
    assert!(process_payload(&xml).is_empty());
}

#[test]
fn test_multiple_affiliations_are_joined() {
    let xml = article_set(&["<PubmedArticle><MedlineCitation><PMID>40000001</PMID><Article>\
         <AuthorList><Author><LastName>Kim</LastName><ForeName>Min</ForeName>\
         <AffiliationInfo><Affiliation>Seoul National University, Seoul, Korea.</Affiliation></AffiliationInfo>\
         <AffiliationInfo><Affiliation>Acme Biotech, Seoul, Korea. min.kim@acmebio.co.kr</Affiliation></AffiliationInfo>\
         </Author></AuthorList></Article></MedlineCitation></PubmedArticle>"
        .to_string()]);

    let papers = extract_papers(&xml).papers;
    let author = &papers[0].authors[0];
    assert_eq!(
        author.affiliation.as_deref(),
        Some("Seoul National University, Seoul, Korea.; Acme Biotech, Seoul, Korea. min.kim@acmebio.co.kr")
    );
    assert_eq!(author.email.as_deref(), Some("min.kim@acmebio.co.kr"));

    // The first decisive institution is academic
    assert!(process_payload(&xml).is_empty());
}

#[test]
fn test_empty_and_non_xml_payloads() {
    assert!(extract_papers("").papers.is_empty());

    let extraction = extract_papers("<html><body>Service unavailable</body></html>");
    assert!(extraction.papers.is_empty());
}
