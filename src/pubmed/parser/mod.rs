//! PubMed EFetch XML parser
//!
//! Turns an EFetch response into [`PaperRecord`]s. Each `<PubmedArticle>` is
//! cut out of the payload and deserialized on its own, so one broken record
//! never costs the rest of the batch.
//!
//! # Module Organization
//!
//! - `preprocessing` - inline markup removal
//! - `extractors` - emails, names, dates
//! - `xml_types` - serde schema and conversion into public models

mod extractors;
mod preprocessing;
mod xml_types;

use quick_xml::Reader;
use quick_xml::events::Event;
use quick_xml::name::QName;
use tracing::{debug, info, instrument, warn};

use crate::error::PubMedError;
use crate::pubmed::models::PaperRecord;
use extractors::sniff_pmid;
use preprocessing::strip_inline_markup;
use xml_types::PubmedArticleXml;

const ARTICLE_TAG: &str = "PubmedArticle";

/// Outcome of parsing one EFetch payload
#[derive(Debug, Default)]
pub struct Extraction {
    /// Successfully parsed papers, in payload order
    pub papers: Vec<PaperRecord>,
    /// One diagnostic per paper (or payload tail) that had to be skipped
    pub skipped: Vec<PubMedError>,
}

/// Parse every `<PubmedArticle>` in an EFetch XML response.
///
/// Never fails: a paper whose sub-tree cannot be read is recorded in
/// [`Extraction::skipped`] and the scan moves on. If the document itself
/// breaks off, the papers read so far are kept.
///
/// # Example
///
/// ```
/// use pharma_papers::pubmed::parser::extract_papers;
///
/// let xml = r#"<PubmedArticleSet>
///   <PubmedArticle>
///     <MedlineCitation>
///       <PMID>12345678</PMID>
///       <Article><ArticleTitle>Example</ArticleTitle></Article>
///     </MedlineCitation>
///   </PubmedArticle>
/// </PubmedArticleSet>"#;
///
/// let extraction = extract_papers(xml);
/// assert_eq!(extraction.papers[0].pmid, "12345678");
/// assert!(extraction.papers[0].authors.is_empty());
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn extract_papers(xml: &str) -> Extraction {
    let cleaned = strip_inline_markup(xml);
    let mut extraction = Extraction::default();

    for fragment in article_fragments(&cleaned, &mut extraction.skipped) {
        match parse_fragment(fragment) {
            Ok(paper) => extraction.papers.push(paper),
            Err(err) => {
                warn!(error = %err, "Failed to parse article, skipping");
                extraction.skipped.push(err);
            }
        }
    }

    info!(
        parsed = extraction.papers.len(),
        skipped = extraction.skipped.len(),
        "Extraction completed"
    );
    extraction
}

/// Inner text of each `<PubmedArticle>` element, in document order.
///
/// A document-level error ends the scan and is pushed onto `errors`.
fn article_fragments<'a>(xml: &'a str, errors: &mut Vec<PubMedError>) -> Vec<&'a str> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut fragments = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == ARTICLE_TAG.as_bytes() => {
                match reader.read_to_end(QName(ARTICLE_TAG.as_bytes())) {
                    Ok(span) => {
                        let inner = usize::try_from(span.start)
                            .ok()
                            .zip(usize::try_from(span.end).ok())
                            .and_then(|(start, end)| xml.get(start..end));
                        match inner {
                            Some(inner) => fragments.push(inner),
                            None => {
                                errors.push(PubMedError::XmlError(format!(
                                    "article span {:?} out of bounds",
                                    span
                                )));
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(
                            position = reader.buffer_position(),
                            error = %e,
                            "Payload breaks off inside an article, keeping earlier papers"
                        );
                        errors.push(PubMedError::XmlError(e.to_string()));
                        break;
                    }
                }
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == ARTICLE_TAG.as_bytes() => {
                fragments.push("");
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    position = reader.buffer_position(),
                    error = %e,
                    "Malformed payload, keeping earlier papers"
                );
                errors.push(PubMedError::XmlError(e.to_string()));
                break;
            }
        }
    }

    debug!(articles = fragments.len(), "Scanned article fragments");
    fragments
}

fn parse_fragment(inner: &str) -> crate::Result<PaperRecord> {
    let wrapped = format!("<{tag}>{inner}</{tag}>", tag = ARTICLE_TAG);

    let article: PubmedArticleXml =
        quick_xml::de::from_str(&wrapped).map_err(|e| PubMedError::MalformedRecord {
            pmid: sniff_pmid(inner),
            message: e.to_string(),
        })?;

    article.into_record().map_err(|err| match err {
        PubMedError::MalformedRecord { pmid: None, message } => PubMedError::MalformedRecord {
            pmid: sniff_pmid(inner),
            message,
        },
        other => other,
    })
}
