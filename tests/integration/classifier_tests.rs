//! Table-driven checks of the affiliation classifier

use pharma_papers::affiliation::{MatchRule, classify};
use rstest::rstest;

#[rstest]
#[case::pfizer("Pfizer Inc., New York, NY", "Pfizer")]
#[case::novartis_corp("Novartis Pharmaceuticals Corporation", "Novartis")]
#[case::roche_genentech("Roche Genentech, South San Francisco", "Roche")]
#[case::bms("Bristol-Myers Squibb Company, Princeton, NJ", "Bristol Myers Squibb")]
#[case::jnj("Johnson & Johnson, New Brunswick, NJ", "Johnson & Johnson")]
#[case::lilly("Lilly Research Laboratories, Eli Lilly and Company, Indianapolis", "Eli Lilly")]
#[case::gsk_alias("GlaxoSmithKline, Stevenage, UK", "GSK")]
#[case::mixed_case("ASTRAZENECA R&D, Gothenburg, Sweden", "AstraZeneca")]
fn test_known_companies(#[case] affiliation: &str, #[case] company: &str) {
    let result = classify(Some(affiliation), None);
    assert!(result.is_industry, "expected industry for {affiliation}");
    assert_eq!(result.company_name.as_deref(), Some(company));
    assert_eq!(result.rule, MatchRule::KnownCompanyMatch);
}

#[rstest]
#[case::ucsf("University of California, San Francisco")]
#[case::harvard_medical("Harvard Medical School")]
#[case::mit("Massachusetts Institute of Technology")]
#[case::hopkins("Johns Hopkins Hospital")]
#[case::harvard_department("Department of Medicine, Harvard University")]
#[case::pharmacy_school("School of Pharmaceutical Sciences, Peking University, Beijing")]
#[case::medical_centre("Erasmus Medical Centre, Rotterdam")]
#[case::edu_email_in_text("Dept. of Biology, Boston, MA. j.doe@bu.edu")]
fn test_academic_affiliations(#[case] affiliation: &str) {
    let result = classify(Some(affiliation), None);
    assert!(!result.is_industry, "expected academic for {affiliation}");
    assert_eq!(result.company_name, None);
    assert_eq!(result.rule, MatchRule::AcademicMatch);
}

#[rstest]
#[case::therapeutics("Acme Therapeutics, Cambridge, MA, USA", "Acme Therapeutics")]
#[case::ltd("Oncology Unit, Zenith Biologics Ltd., Oxford, UK", "Zenith Biologics")]
#[case::gmbh("Helix Diagnostics GmbH, Berlin, Germany", "Helix Diagnostics")]
#[case::co_ltd("Sunrise Medicine Co., Ltd., Osaka, Japan", "Sunrise Medicine")]
#[case::biopharma("Northstar Biopharma, San Diego, CA", "Northstar Biopharma")]
fn test_keyword_and_suffix_matches(#[case] affiliation: &str, #[case] company: &str) {
    let result = classify(Some(affiliation), None);
    assert!(result.is_industry, "expected industry for {affiliation}");
    assert_eq!(result.rule, MatchRule::KeywordMatch);
    assert_eq!(result.company_name.as_deref(), Some(company));
}

#[rstest]
#[case::known_domain(None, "x@pfizer.com", true, Some("Pfizer"))]
#[case::subdomain(None, "a@us.novartis.com", true, Some("Novartis"))]
#[case::generic_com(None, "researcher@biotech.com", true, Some("Biotech"))]
#[case::ambiguous_text(Some("Boston, MA, USA"), "r@helixgen.com", true, Some("Helixgen"))]
#[case::webmail(None, "someone@gmail.com", false, None)]
#[case::edu(None, "student@university.edu", false, None)]
#[case::not_an_email(None, "invalid-email", false, None)]
fn test_email_domains(
    #[case] affiliation: Option<&str>,
    #[case] email: &str,
    #[case] is_industry: bool,
    #[case] company: Option<&str>,
) {
    let result = classify(affiliation, Some(email));
    assert_eq!(result.is_industry, is_industry, "email {email}");
    assert_eq!(result.company_name.as_deref(), company);
}

#[test]
fn test_known_name_outranks_academic_context() {
    let result = classify(
        Some("Genentech Research, affiliated with Stanford University Hospital"),
        Some("someone@stanford.edu"),
    );
    assert!(result.is_industry);
    assert_eq!(result.company_name.as_deref(), Some("Genentech"));
}

#[test]
fn test_affiliation_outranks_email() {
    // A decisive academic affiliation is not overturned by a corporate-looking email
    let result = classify(Some("University of Oxford, Oxford, UK"), Some("a@acme-pharma.com"));
    assert!(!result.is_industry);
    assert_eq!(result.rule, MatchRule::AcademicMatch);
}

#[test]
fn test_no_evidence_defaults_to_not_industry() {
    for (affiliation, email) in [(None, None), (Some(""), Some("  ")), (Some("Boston, MA"), None)] {
        let result = classify(affiliation, email);
        assert!(!result.is_industry);
        assert_eq!(result.rule, MatchRule::Default);
    }
}

#[test]
fn test_classification_is_deterministic() {
    let inputs = [
        (Some("Pfizer Inc., New York"), Some("x@pfizer.com")),
        (Some("Acme Therapeutics; Harvard University"), None),
        (None, Some("r@helixgen.com")),
    ];

    for (affiliation, email) in inputs {
        assert_eq!(classify(affiliation, email), classify(affiliation, email));
    }
}

#[rstest]
#[case::company_then_university(
    "Novel Biotech Inc., Cambridge, MA, USA, and Department of Pharmacology, University of Cambridge, UK",
    true
)]
#[case::company_then_medical_school("Acme Therapeutics, Harvard Medical School, Boston", true)]
#[case::university_then_company("University of Cambridge, Cambridge, UK, and Novel Biotech Inc., Cambridge, MA", false)]
#[case::medical_school_then_company("Harvard Medical School, Acme Therapeutics, Boston", false)]
#[case::place_name_alias("Centre Hospitalier Departemental Vendee, La Roche-sur-Yon, France", false)]
#[case::county_abbreviation("Teagasc Food Research Centre, Moorepark, Fermoy, Co. Cork, Ireland", false)]
fn test_first_decisive_institution_in_comma_list(#[case] affiliation: &str, #[case] is_industry: bool) {
    let result = classify(Some(affiliation), None);
    assert_eq!(result.is_industry, is_industry, "affiliation {affiliation}");
}
