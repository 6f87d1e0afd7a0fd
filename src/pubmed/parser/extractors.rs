//! Field-level helpers: emails, author names, dates, PMID sniffing

use std::sync::OnceLock;

use regex::Regex;

use crate::pubmed::models::PublicationDate;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
            .expect("email pattern is valid")
    })
}

/// First email address embedded in free text, e.g. the
/// "Electronic address: x@pfizer.com." suffix PubMed appends to affiliations.
pub(crate) fn extract_email_from_text(text: &str) -> Option<String> {
    email_regex().find(text).map(|m| {
        m.as_str()
            .trim_end_matches(&['.', ',', ';', ')'][..])
            .to_string()
    })
}

pub(super) fn format_author_name(
    last_name: Option<&str>,
    fore_name: Option<&str>,
    initials: Option<&str>,
) -> Option<String> {
    fn clean(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }

    match (clean(fore_name), clean(last_name)) {
        (Some(fore), Some(last)) => Some(format!("{} {}", fore, last)),
        (None, Some(last)) => Some(match clean(initials) {
            Some(init) => format!("{} {}", init, last),
            None => last.to_string(),
        }),
        (Some(fore), None) => Some(fore.to_string()),
        (None, None) => None,
    }
}

/// Month as a number from "03", "3", "Mar" or "March"
fn parse_month(month: &str) -> Option<u32> {
    let month = month.trim();
    if let Ok(n) = month.parse::<u32>() {
        return Some(n);
    }

    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix: String = month.chars().take(3).collect::<String>().to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

fn parse_year(year: &str) -> Option<i32> {
    let digits: String = year.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

pub(super) fn parse_date_parts(
    year: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> PublicationDate {
    PublicationDate::from_parts(
        year.and_then(parse_year),
        month.and_then(parse_month),
        day.and_then(|d| d.trim().parse().ok()),
    )
}

/// Best-effort reading of `MedlineDate` strings such as `"2020 Mar-Apr"`,
/// `"1998 Dec-1999 Jan"` or `"2000 Spring"`.
pub(super) fn parse_medline_date(text: &str) -> PublicationDate {
    let mut tokens = text
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|t| !t.is_empty());

    let year = tokens.next().and_then(parse_year);
    let month = tokens.next().and_then(parse_month);
    PublicationDate::from_parts(year, month, None)
}

/// Pull a PMID out of a fragment that failed to deserialize, for diagnostics
pub(super) fn sniff_pmid(fragment: &str) -> Option<String> {
    static PMID_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = PMID_REGEX
        .get_or_init(|| Regex::new(r"<PMID[^>]*>\s*(\d+)\s*</PMID>").expect("PMID pattern is valid"));
    re.captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
