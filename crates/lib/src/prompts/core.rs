//! # Template Rendering
//!
//! Prompt templates use `{field_name}` placeholders. Rendering is a single pass
//! over the template: substituted values are never scanned again, so user text
//! that happens to contain `{...}` is inserted as-is.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Rendered in place of the reference block when no document text is available.
pub const NO_CONTEXT_PROVIDED: &str = "No external document context provided.";

/// The user query sent with every policy section request.
///
/// Placeholders: `{section_title}`
pub const POLICY_USER_QUERY: &str =
    "Generate the full text for the policy section: {section_title} using all provided context and constraints.";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(?P<name>[a-z0-9_]+)\}").expect("placeholder pattern is valid")
});

/// Replaces every `{name}` in `template` with `values[name]`.
///
/// Names without a value render as the empty string.
pub fn render_template(template: &str, values: &HashMap<&str, &str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values.get(&caps["name"]).copied().unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Returns the reference text to embed in a prompt, or the "no context" notice.
pub fn context_or_notice(reference_text: Option<&str>) -> &str {
    match reference_text {
        Some(text) if !text.trim().is_empty() => text,
        _ => NO_CONTEXT_PROVIDED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_and_blanks_unknown() {
        let values = HashMap::from([("agency_name", "Test PSAP")]);
        let rendered = render_template("Agency: {agency_name}; AHJ: {ahj_name}.", &values);
        assert_eq!(rendered, "Agency: Test PSAP; AHJ: .");
    }

    #[test]
    fn test_render_does_not_expand_inserted_values() {
        let values = HashMap::from([("a", "{b}"), ("b", "nope")]);
        assert_eq!(render_template("{a}", &values), "{b}");
    }

    #[test]
    fn test_context_or_notice() {
        assert_eq!(context_or_notice(None), NO_CONTEXT_PROVIDED);
        assert_eq!(context_or_notice(Some("  \n")), NO_CONTEXT_PROVIDED);
        assert_eq!(context_or_notice(Some("MOU text")), "MOU text");
    }
}
