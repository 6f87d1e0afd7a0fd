//! Serde schema for a single `<PubmedArticle>` element
//!
//! Every element is optional. Conversion into [`PaperRecord`] decides which
//! absences are tolerable and which make the record unusable.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::result;

use super::extractors::{
    extract_email_from_text, format_author_name, parse_date_parts, parse_medline_date,
};
use crate::error::{PubMedError, Result};
use crate::pubmed::models::{Author, NO_TITLE, PaperRecord, PublicationDate};

#[derive(Debug, Deserialize)]
pub(super) struct PubmedArticleXml {
    #[serde(rename = "MedlineCitation")]
    pub medline_citation: Option<MedlineCitation>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MedlineCitation {
    #[serde(rename = "PMID")]
    pub pmid: Option<PmidXml>,
    #[serde(rename = "Article")]
    pub article: Option<ArticleXml>,
    #[serde(rename = "DateCompleted")]
    pub date_completed: Option<DateXml>,
    #[serde(rename = "DateRevised")]
    pub date_revised: Option<DateXml>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PmidXml {
    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ArticleXml {
    #[serde(rename = "Journal")]
    journal: Option<JournalXml>,
    #[serde(rename = "ArticleTitle", default, deserialize_with = "deserialize_mixed_text")]
    article_title: Option<String>,
    #[serde(rename = "VernacularTitle", default, deserialize_with = "deserialize_mixed_text")]
    vernacular_title: Option<String>,
    #[serde(rename = "AuthorList")]
    author_list: Option<AuthorListXml>,
    #[serde(rename = "ArticleDate", default)]
    article_dates: Vec<DateXml>,
}

#[derive(Debug, Deserialize)]
struct JournalXml {
    #[serde(rename = "JournalIssue")]
    journal_issue: Option<JournalIssueXml>,
}

#[derive(Debug, Deserialize)]
struct JournalIssueXml {
    #[serde(rename = "PubDate")]
    pub_date: Option<DateXml>,
}

/// Shared shape of `ArticleDate`, `PubDate`, `DateCompleted` and `DateRevised`
#[derive(Debug, Deserialize)]
pub(super) struct DateXml {
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Month")]
    month: Option<String>,
    #[serde(rename = "Day")]
    day: Option<String>,
    #[serde(rename = "MedlineDate")]
    medline_date: Option<String>,
}

impl DateXml {
    fn to_publication_date(&self) -> PublicationDate {
        let date = parse_date_parts(
            self.year.as_deref(),
            self.month.as_deref(),
            self.day.as_deref(),
        );
        if date.is_known() {
            return date;
        }

        // MedlineDate carries free text such as "2020 Mar-Apr"
        self.medline_date
            .as_deref()
            .map(parse_medline_date)
            .unwrap_or(PublicationDate::Unknown)
    }
}

#[derive(Debug, Deserialize)]
struct AuthorListXml {
    #[serde(rename = "Author", default)]
    authors: Vec<AuthorXml>,
}

#[derive(Debug, Deserialize)]
struct AuthorXml {
    #[serde(rename = "LastName")]
    last_name: Option<String>,
    #[serde(rename = "ForeName")]
    fore_name: Option<String>,
    #[serde(rename = "Initials")]
    initials: Option<String>,
    #[serde(rename = "CollectiveName", default, deserialize_with = "deserialize_mixed_text")]
    collective_name: Option<String>,
    #[serde(rename = "AffiliationInfo", default)]
    affiliation_info: Vec<AffiliationInfoXml>,
}

#[derive(Debug, Deserialize)]
struct AffiliationInfoXml {
    #[serde(rename = "Affiliation", default, deserialize_with = "deserialize_mixed_text")]
    affiliation: Option<String>,
}

impl AuthorXml {
    fn into_author(self) -> Option<Author> {
        let name = format_author_name(
            self.last_name.as_deref(),
            self.fore_name.as_deref(),
            self.initials.as_deref(),
        )
        .or_else(|| non_empty(self.collective_name))?;

        let affiliations: Vec<String> = self
            .affiliation_info
            .into_iter()
            .filter_map(|info| non_empty(info.affiliation))
            .collect();

        let email = affiliations
            .iter()
            .find_map(|text| extract_email_from_text(text));

        let affiliation = if affiliations.is_empty() {
            None
        } else {
            Some(affiliations.join("; "))
        };

        Some(Author {
            name,
            affiliation,
            email,
        })
    }
}

impl PubmedArticleXml {
    pub(super) fn into_record(self) -> Result<PaperRecord> {
        let medline = self
            .medline_citation
            .ok_or_else(|| PubMedError::MalformedRecord {
                pmid: None,
                message: "missing MedlineCitation".to_string(),
            })?;

        let pmid = medline
            .pmid
            .map(|p| p.value.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PubMedError::MalformedRecord {
                pmid: None,
                message: "missing PMID".to_string(),
            })?;

        let (title, date_sources, authors) = match medline.article {
            Some(article) => {
                let title = non_empty(article.article_title)
                    .or_else(|| non_empty(article.vernacular_title));
                let pub_date = article
                    .journal
                    .and_then(|j| j.journal_issue)
                    .and_then(|ji| ji.pub_date);
                let mut dates: Vec<DateXml> = article.article_dates;
                dates.extend(pub_date);
                let authors: Vec<Author> = article
                    .author_list
                    .map(|list| {
                        list.authors
                            .into_iter()
                            .filter_map(AuthorXml::into_author)
                            .collect()
                    })
                    .unwrap_or_default();
                (title, dates, authors)
            }
            None => (None, Vec::new(), Vec::new()),
        };

        let publication_date = date_sources
            .iter()
            .chain(medline.date_completed.iter())
            .chain(medline.date_revised.iter())
            .map(DateXml::to_publication_date)
            .find(PublicationDate::is_known)
            .unwrap_or(PublicationDate::Unknown);

        Ok(PaperRecord {
            pmid,
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            publication_date,
            authors,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|v| !v.is_empty())
}

/// Accept either plain text or an element with attributes and mixed children,
/// keeping only the direct text content.
fn deserialize_mixed_text<'de, D>(deserializer: D) -> result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, IgnoredAny, MapAccess, Visitor};

    struct MixedTextVisitor;

    impl<'de> Visitor<'de> for MixedTextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("element text content")
        }

        fn visit_str<E>(self, value: &str) -> result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_unit<E>(self) -> result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_map<M>(self, mut map: M) -> result::Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut parts = Vec::new();
            while let Some(key) = map.next_key::<String>()? {
                if key == "$text" {
                    parts.push(map.next_value::<String>()?);
                } else {
                    // Attributes and nested elements
                    map.next_value::<IgnoredAny>()?;
                }
            }
            Ok(Some(parts.join(" ")))
        }
    }

    deserializer.deserialize_any(MixedTextVisitor)
}
