use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Title used when a paper carries no usable title element
pub const NO_TITLE: &str = "No title available";

/// Rendering of [`PublicationDate::Unknown`]
pub const UNKNOWN_DATE: &str = "Unknown";

/// An author as listed on a paper, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    /// "ForeName LastName", the last name alone, or a collective/group name
    pub name: String,
    /// All affiliation entries joined with `"; "`
    pub affiliation: Option<String>,
    /// Email found in the affiliation text
    pub email: Option<String>,
}

impl Author {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            affiliation: None,
            email: None,
        }
    }

    pub fn with_affiliation<S: Into<String>>(mut self, affiliation: S) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// One paper as extracted from an EFetch response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperRecord {
    /// PubMed ID
    pub pmid: String,
    pub title: String,
    pub publication_date: PublicationDate,
    /// Source order is preserved; empty when the payload has no author list
    pub authors: Vec<Author>,
}

/// A publication date at whatever precision the source provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicationDate {
    Full(NaiveDate),
    YearMonth { year: i32, month: u32 },
    Year(i32),
    Unknown,
}

impl PublicationDate {
    /// Build the most precise valid date from optional parts.
    ///
    /// An impossible day (e.g. 31 February) drops back to year and month; an
    /// impossible month drops back to the year alone.
    pub fn from_parts(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        let Some(year) = year.filter(|y| (1000..=9999).contains(y)) else {
            return PublicationDate::Unknown;
        };

        let Some(month) = month.filter(|m| (1..=12).contains(m)) else {
            return PublicationDate::Year(year);
        };

        match day.and_then(|d| NaiveDate::from_ymd_opt(year, month, d)) {
            Some(date) => PublicationDate::Full(date),
            None => PublicationDate::YearMonth { year, month },
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PublicationDate::Unknown)
    }
}

impl fmt::Display for PublicationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicationDate::Full(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PublicationDate::YearMonth { year, month } => write!(f, "{:04}-{:02}", year, month),
            PublicationDate::Year(year) => write!(f, "{:04}", year),
            PublicationDate::Unknown => f.write_str(UNKNOWN_DATE),
        }
    }
}

impl Serialize for PublicationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
