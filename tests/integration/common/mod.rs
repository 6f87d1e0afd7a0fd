//! Shared EFetch fixtures and mock-server helpers

#![allow(dead_code)]

use pharma_papers::{ClientConfig, PubMedClient, RetryConfig};
use std::time::Duration;
use wiremock::MockServer;

/// Paper 1 has a Pfizer author with an email; paper 2 is purely academic
pub const TWO_PAPER_PAYLOAD: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2023//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_230101.dtd">
<PubmedArticleSet>
    <PubmedArticle>
        <MedlineCitation Status="MEDLINE" Owner="NLM">
            <PMID Version="1">37000001</PMID>
            <Article PubModel="Print">
                <Journal>
                    <JournalIssue CitedMedium="Internet">
                        <PubDate><Year>2023</Year><Month>Mar</Month><Day>15</Day></PubDate>
                    </JournalIssue>
                    <Title>Journal of Clinical Oncology</Title>
                </Journal>
                <ArticleTitle>Efficacy of a novel kinase inhibitor in advanced NSCLC</ArticleTitle>
                <AuthorList CompleteYN="Y">
                    <Author ValidYN="Y">
                        <LastName>Smith</LastName>
                        <ForeName>Alice</ForeName>
                        <Initials>A</Initials>
                        <AffiliationInfo>
                            <Affiliation>Pfizer Inc., New York, NY, USA. Electronic address: x@pfizer.com.</Affiliation>
                        </AffiliationInfo>
                    </Author>
                    <Author ValidYN="Y">
                        <LastName>Jones</LastName>
                        <ForeName>Bob</ForeName>
                        <Initials>B</Initials>
                        <AffiliationInfo>
                            <Affiliation>Department of Medicine, Harvard University, Boston, MA, USA.</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
    <PubmedArticle>
        <MedlineCitation Status="MEDLINE" Owner="NLM">
            <PMID Version="1">37000002</PMID>
            <Article PubModel="Print">
                <Journal>
                    <JournalIssue CitedMedium="Internet">
                        <PubDate><Year>2022</Year></PubDate>
                    </JournalIssue>
                </Journal>
                <ArticleTitle>Sleep quality in medical residents</ArticleTitle>
                <AuthorList CompleteYN="Y">
                    <Author ValidYN="Y">
                        <LastName>Brown</LastName>
                        <ForeName>Carol</ForeName>
                        <AffiliationInfo>
                            <Affiliation>School of Medicine, Stanford University, Stanford, CA, USA. carol@stanford.edu</Affiliation>
                        </AffiliationInfo>
                    </Author>
                </AuthorList>
            </Article>
        </MedlineCitation>
    </PubmedArticle>
</PubmedArticleSet>"#;

/// Build a `<PubmedArticle>` with one author per `(last, fore, affiliation)`
pub fn article_xml(pmid: &str, title: &str, authors: &[(&str, &str, &str)]) -> String {
    let authors: String = authors
        .iter()
        .map(|(last, fore, affiliation)| {
            format!(
                "<Author><LastName>{last}</LastName><ForeName>{fore}</ForeName>\
                 <AffiliationInfo><Affiliation>{affiliation}</Affiliation></AffiliationInfo></Author>"
            )
        })
        .collect();

    format!(
        "<PubmedArticle><MedlineCitation><PMID Version=\"1\">{pmid}</PMID><Article>\
         <Journal><JournalIssue><PubDate><Year>2024</Year><Month>01</Month></PubDate></JournalIssue></Journal>\
         <ArticleTitle>{title}</ArticleTitle><AuthorList>{authors}</AuthorList>\
         </Article></MedlineCitation></PubmedArticle>"
    )
}

pub fn article_set(articles: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" ?>\n<PubmedArticleSet>{}</PubmedArticleSet>",
        articles.concat()
    )
}

/// Client pointed at a mock server, with fast retries
pub fn create_mock_client(mock_server: &MockServer) -> PubMedClient {
    let config = ClientConfig::new()
        .with_base_url(mock_server.uri())
        .with_rate_limit(100.0)
        .with_retry_config(
            RetryConfig::new()
                .with_max_retries(2)
                .with_delay(Duration::from_millis(10)),
        );

    PubMedClient::with_config(config).expect("client builds")
}
