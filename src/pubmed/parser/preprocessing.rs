//! Cleanup applied to EFetch XML before it is scanned

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Remove inline formatting tags (`<i>`, `<sup>`, `<sub>`, `<b>` …) from titles
/// and affiliations.
///
/// The serde deserializer cannot read mixed content, so `CO<sub>2</sub>`
/// becomes `CO2` before parsing.
pub(crate) fn strip_inline_markup(xml: &str) -> String {
    static INLINE_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG_REGEX.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold|sc|underline)(?:\s[^<>]*)?/?>")
            .expect("inline tag pattern is valid")
    });

    let cleaned = re.replace_all(xml, "");

    if cleaned.len() != xml.len() {
        debug!(
            original_bytes = xml.len(),
            cleaned_bytes = cleaned.len(),
            "Stripped inline markup"
        );
    }

    cleaned.into_owned()
}
