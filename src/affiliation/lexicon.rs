//! Word lists behind the affiliation rules
//!
//! Aliases are lowercase. Patterns in `ACADEMIC_PATTERNS`, `INDUSTRY_KEYWORDS`
//! and `CORPORATE_SUFFIXES` are regex fragments, matched case-insensitively.

/// Pharmaceutical and biotech companies as `(alias, canonical name)`
pub(super) const KNOWN_COMPANIES: &[(&str, &str)] = &[
    ("pfizer", "Pfizer"),
    ("novartis", "Novartis"),
    ("roche", "Roche"),
    ("hoffmann-la roche", "Roche"),
    ("genentech", "Genentech"),
    ("merck", "Merck"),
    ("merck sharp & dohme", "Merck"),
    ("msd", "Merck"),
    ("johnson & johnson", "Johnson & Johnson"),
    ("johnson and johnson", "Johnson & Johnson"),
    ("j&j", "Johnson & Johnson"),
    ("janssen", "Janssen"),
    ("bristol myers squibb", "Bristol Myers Squibb"),
    ("bristol-myers squibb", "Bristol Myers Squibb"),
    ("bms", "Bristol Myers Squibb"),
    ("abbvie", "AbbVie"),
    ("amgen", "Amgen"),
    ("gilead", "Gilead"),
    ("gilead sciences", "Gilead"),
    ("biogen", "Biogen"),
    ("biogen idec", "Biogen"),
    ("regeneron", "Regeneron"),
    ("vertex pharmaceuticals", "Vertex Pharmaceuticals"),
    ("moderna", "Moderna"),
    ("modernatx", "Moderna"),
    ("biontech", "BioNTech"),
    ("gsk", "GSK"),
    ("glaxosmithkline", "GSK"),
    ("sanofi", "Sanofi"),
    ("takeda", "Takeda"),
    ("astrazeneca", "AstraZeneca"),
    ("eli lilly", "Eli Lilly"),
    ("lilly research laboratories", "Eli Lilly"),
    ("boehringer ingelheim", "Boehringer Ingelheim"),
    ("bayer", "Bayer"),
    ("novo nordisk", "Novo Nordisk"),
    ("celgene", "Celgene"),
    ("alexion", "Alexion"),
    ("incyte", "Incyte"),
    ("illumina", "Illumina"),
    ("immunogen", "ImmunoGen"),
    ("seagen", "Seagen"),
    ("seattle genetics", "Seagen"),
    ("daiichi sankyo", "Daiichi Sankyo"),
    ("astellas", "Astellas"),
    ("eisai", "Eisai"),
    ("otsuka pharmaceutical", "Otsuka"),
    ("chugai", "Chugai"),
    ("teva", "Teva"),
];

/// Signals of a university, hospital or government institution
pub(super) const ACADEMIC_PATTERNS: &[&str] = &[
    r"\buniversit",
    r"\bcollege\b",
    r"\binstitutes? of\b",
    r"\bschool of\b",
    r"\bfaculty of\b",
    r"\bmedical school\b",
    r"\bhospitals?\b",
    r"\bmedical cent(?:er|re)\b",
    r"\bcancer cent(?:er|re)\b",
    r"\bacademy of\b",
    r"\bpolytechnic",
    r"\bacademic\b",
    r"\bclinic\b",
    r"\.edu\b",
    r"\.ac\.[a-z]{2}\b",
    r"\.gov\b",
];

pub(super) const INDUSTRY_KEYWORDS: &[&str] = &[
    r"(?:bio)?pharma(?:ceutical)?s?",
    r"biotech(?:nology)?",
    r"therapeutics",
    r"drug development",
    r"life sciences?",
];

/// Leading words of an organisational sub-unit ("Department of Pharmaceutical
/// Sciences"). Industry keywords inside such a part name a field, not a company.
pub(super) const SUBUNIT_PREFIXES: &[&str] = &[
    r"department",
    r"dept",
    r"division",
    r"section",
    r"unit",
    r"laborator(?:y|ies)",
    r"lab",
    r"program(?:me)?",
    r"graduate program",
    r"chair",
];

pub(super) const CORPORATE_SUFFIXES: &[&str] = &[
    r"inc",
    r"corp",
    r"corporation",
    r"ltd",
    r"llc",
    r"gmbh",
    r"plc",
    r"company",
    r"limited",
];

/// Corporate email domains as `(domain, canonical name)`; subdomains match too
pub(super) const CORPORATE_DOMAINS: &[(&str, &str)] = &[
    ("pfizer.com", "Pfizer"),
    ("novartis.com", "Novartis"),
    ("roche.com", "Roche"),
    ("gene.com", "Genentech"),
    ("merck.com", "Merck"),
    ("msd.com", "Merck"),
    ("jnj.com", "Johnson & Johnson"),
    ("its.jnj.com", "Johnson & Johnson"),
    ("bms.com", "Bristol Myers Squibb"),
    ("abbvie.com", "AbbVie"),
    ("amgen.com", "Amgen"),
    ("gilead.com", "Gilead"),
    ("biogen.com", "Biogen"),
    ("regeneron.com", "Regeneron"),
    ("vrtx.com", "Vertex Pharmaceuticals"),
    ("modernatx.com", "Moderna"),
    ("biontech.de", "BioNTech"),
    ("gsk.com", "GSK"),
    ("sanofi.com", "Sanofi"),
    ("takeda.com", "Takeda"),
    ("astrazeneca.com", "AstraZeneca"),
    ("lilly.com", "Eli Lilly"),
    ("boehringer-ingelheim.com", "Boehringer Ingelheim"),
    ("bayer.com", "Bayer"),
    ("novonordisk.com", "Novo Nordisk"),
    ("illumina.com", "Illumina"),
];

/// Free mail providers never count as corporate
pub(super) const WEBMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "msn.com",
    "aol.com",
    "icloud.com",
    "me.com",
    "protonmail.com",
    "163.com",
    "126.com",
    "qq.com",
    "sina.com",
    "yandex.com",
    "mail.com",
];

/// Top-level suffixes treated as commercial
pub(super) const COMMERCIAL_TLDS: &[&str] = &[
    "com", "biz", "co.uk", "com.cn", "co.jp", "com.au", "co.kr", "com.br",
];
