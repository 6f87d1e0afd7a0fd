//! Affiliation classifier
//!
//! Decides from an author's free-text affiliation and email whether the
//! author works for a pharmaceutical or biotech company. The decision is an
//! ordered list of [`MatchRule`]s; the first rule that applies wins.
//!
//! ```
//! use pharma_papers::affiliation::{MatchRule, classify};
//!
//! let result = classify(Some("Pfizer Inc., New York"), None);
//! assert!(result.is_industry);
//! assert_eq!(result.company_name.as_deref(), Some("Pfizer"));
//! assert_eq!(result.rule, MatchRule::KnownCompanyMatch);
//!
//! let result = classify(Some("Department of Medicine, Harvard University"), None);
//! assert!(!result.is_industry);
//! assert_eq!(result.rule, MatchRule::AcademicMatch);
//! ```

mod lexicon;

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::pubmed::models::Author;
use lexicon::{
    ACADEMIC_PATTERNS, COMMERCIAL_TLDS, CORPORATE_DOMAINS, CORPORATE_SUFFIXES, INDUSTRY_KEYWORDS,
    KNOWN_COMPANIES, SUBUNIT_PREFIXES, WEBMAIL_DOMAINS,
};

/// The rule that produced a [`Classification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// A curated company name appears anywhere in the affiliation
    KnownCompanyMatch,
    /// The first decisive institution is a university, hospital or agency
    AcademicMatch,
    /// The first decisive institution carries an industry keyword or corporate suffix
    KeywordMatch,
    /// No decisive institution; the email domain decided
    DomainMatch,
    /// Nothing matched
    Default,
}

impl MatchRule {
    /// Evaluation order. A known company name overrides the academic
    /// exclusion, which in turn overrides generic keywords.
    pub const ORDER: [MatchRule; 5] = [
        MatchRule::KnownCompanyMatch,
        MatchRule::AcademicMatch,
        MatchRule::KeywordMatch,
        MatchRule::DomainMatch,
        MatchRule::Default,
    ];

    fn evaluate(self, input: &Input<'_>) -> Option<Classification> {
        match self {
            MatchRule::KnownCompanyMatch => input
                .affiliation
                .and_then(known_company)
                .map(|name| Classification::industry(name, self)),
            MatchRule::AcademicMatch => match input.verdict {
                Some(Verdict::Academic) => Some(Classification::not_industry(self)),
                _ => None,
            },
            MatchRule::KeywordMatch => match &input.verdict {
                Some(Verdict::Industry(name)) => Some(Classification::industry(name.clone(), self)),
                _ => None,
            },
            MatchRule::DomainMatch => {
                if input.verdict.is_some() {
                    return None;
                }
                match input.email.and_then(classify_domain)? {
                    DomainKind::Company(name) => Some(Classification::industry(name, self)),
                    DomainKind::Academic => Some(Classification::not_industry(self)),
                }
            }
            MatchRule::Default => Some(Classification::not_industry(self)),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchRule::KnownCompanyMatch => "known company",
            MatchRule::AcademicMatch => "academic",
            MatchRule::KeywordMatch => "industry keyword",
            MatchRule::DomainMatch => "email domain",
            MatchRule::Default => "default",
        };
        f.write_str(name)
    }
}

/// Result of classifying one author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_industry: bool,
    /// Canonical or best-effort company name; always `None` when not industry
    pub company_name: Option<String>,
    pub rule: MatchRule,
}

impl Classification {
    fn industry(company_name: String, rule: MatchRule) -> Self {
        Self {
            is_industry: true,
            company_name: Some(company_name),
            rule,
        }
    }

    fn not_industry(rule: MatchRule) -> Self {
        Self {
            is_industry: false,
            company_name: None,
            rule,
        }
    }
}

/// Classify an affiliation/email pair.
///
/// Pure and deterministic. Missing or blank inputs are treated alike; with
/// neither present the result is [`MatchRule::Default`].
pub fn classify(affiliation: Option<&str>, email: Option<&str>) -> Classification {
    let normalized = affiliation
        .map(|a| a.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|a| !a.is_empty());
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    let input = Input::new(normalized.as_deref(), email);

    MatchRule::ORDER
        .iter()
        .find_map(|rule| rule.evaluate(&input))
        .unwrap_or_else(|| Classification::not_industry(MatchRule::Default))
}

/// [`classify`] applied to an author's affiliation and email
pub fn classify_author(author: &Author) -> Classification {
    classify(author.affiliation.as_deref(), author.email.as_deref())
}

struct Input<'a> {
    affiliation: Option<&'a str>,
    email: Option<&'a str>,
    /// Verdict of the first decisive institution, reading `;` segments and
    /// then `,` parts in order
    verdict: Option<Verdict>,
}

impl<'a> Input<'a> {
    fn new(affiliation: Option<&'a str>, email: Option<&'a str>) -> Self {
        let verdict = affiliation.and_then(|text| {
            text.split(';')
                .flat_map(|segment| segment.split(','))
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .find_map(|part| judge_part(part, text))
        });

        Self {
            affiliation,
            email,
            verdict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verdict {
    Academic,
    Industry(String),
}

fn build_regex(body: String) -> Regex {
    Regex::new(&format!("(?i){}", body)).expect("lexicon patterns are valid")
}

fn known_company_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let mut aliases: Vec<&str> = KNOWN_COMPANIES.iter().map(|(alias, _)| *alias).collect();
        // Longest first so "eli lilly" wins over a shorter alias at the same position
        aliases.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        let alternation = aliases
            .iter()
            .map(|alias| regex::escape(alias))
            .collect::<Vec<_>>()
            .join("|");
        build_regex(format!(r"\b(?:{})\b", alternation))
    })
}

fn academic_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| build_regex(format!("(?:{})", ACADEMIC_PATTERNS.join("|"))))
}

fn keyword_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| build_regex(format!(r"\b(?:{})\b", INDUSTRY_KEYWORDS.join("|"))))
}

/// "Co." counts only at the end of a part or before "Ltd"; "Co. Cork" is a county
fn suffix_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        build_regex(format!(
            r"\b(?:{})\b\.?|\bco\.(?:\s*ltd\b|\s*$)",
            CORPORATE_SUFFIXES.join("|")
        ))
    })
}

fn subunit_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| build_regex(format!(r"^(?:{})\b", SUBUNIT_PREFIXES.join("|"))))
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| build_regex(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}".to_string()))
}

/// Canonical name of the leftmost known company in `text`.
///
/// An alias glued to a lowercase hyphenated tail is part of a place name
/// ("La Roche-sur-Yon") and is skipped.
fn known_company(text: &str) -> Option<String> {
    let found = known_company_regex().find_iter(text).find(|m| {
        let mut tail = text[m.end()..].chars();
        !(tail.next() == Some('-') && tail.next().is_some_and(char::is_lowercase))
    })?;
    let matched = found.as_str().to_lowercase();
    let canonical = KNOWN_COMPANIES
        .iter()
        .find(|(alias, _)| *alias == matched)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| found.as_str().to_string());
    Some(canonical)
}

/// Academic wins inside a part; emails are ignored when looking for
/// industry terms so that `.co.uk` addresses do not read as a suffix.
fn judge_part(part: &str, full_affiliation: &str) -> Option<Verdict> {
    if academic_regex().is_match(part) {
        return Some(Verdict::Academic);
    }

    let without_emails = email_regex().replace_all(part, "");
    company_from_part(without_emails.trim()).map(|name| {
        Verdict::Industry(name.unwrap_or_else(|| full_affiliation.to_string()))
    })
}

/// `None` when the part has no industry term; `Some(None)` when it has one
/// but no usable name precedes it.
fn company_from_part(part: &str) -> Option<Option<String>> {
    // Name before a corporate suffix: "Acme Biologics Ltd." -> "Acme Biologics"
    if let Some(m) = suffix_regex().find(part) {
        return Some(clean_name(&part[..m.start()]));
    }

    if subunit_regex().is_match(part) {
        return None;
    }

    // Name through the keyword: "Acme Therapeutics" stays whole
    keyword_regex()
        .find(part)
        .map(|m| clean_name(&part[..m.end()]))
}

fn clean_name(raw: &str) -> Option<String> {
    let name = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(&[' ', ',', '.', ';', ':', '-', '&', '('][..])
        .to_string();
    // "..., and Acme Therapeutics"
    let name = if name.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("and ")) {
        name[4..].trim_start().to_string()
    } else {
        name
    };
    if name.is_empty() { None } else { Some(name) }
}

enum DomainKind {
    Company(String),
    Academic,
}

fn classify_domain(email: &str) -> Option<DomainKind> {
    let (_, domain) = email.rsplit_once('@')?;
    let domain = domain.trim().trim_end_matches('.').to_lowercase();
    if domain.is_empty() {
        return None;
    }

    let matches_domain = |known: &str| domain == known || domain.ends_with(&format!(".{}", known));

    if let Some((_, name)) = CORPORATE_DOMAINS.iter().find(|(d, _)| matches_domain(*d)) {
        return Some(DomainKind::Company(name.to_string()));
    }

    if WEBMAIL_DOMAINS.iter().any(|d| matches_domain(*d)) {
        return None;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let academic = labels
        .iter()
        .any(|label| matches!(*label, "edu" | "ac" | "gov" | "mil") || label.starts_with("univ"))
        || labels.last() == Some(&"org");
    if academic {
        return Some(DomainKind::Academic);
    }

    let tld = COMMERCIAL_TLDS
        .iter()
        .filter(|tld| domain.ends_with(&format!(".{}", tld)))
        .max_by_key(|tld| tld.len())?;
    let stem = &domain[..domain.len() - tld.len() - 1];
    let label = stem.rsplit('.').next().filter(|l| !l.is_empty())?;

    Some(DomainKind::Company(title_case(label)))
}

/// "acme-bio" -> "Acme Bio"
fn title_case(label: &str) -> String {
    label
        .split(|c| c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
