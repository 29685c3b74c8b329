//! # Policy Kinds and Section Catalogues
//!
//! Each policy manual has a closed set of sections. A section tag from the
//! caller is matched exactly against the full title or the short name; anything
//! else resolves to the `General` section of that manual and keeps the raw tag
//! as its title.

pub mod ng911;
pub mod tert;

pub use ng911::Ng911Section;
pub use tert::TertSection;

use crate::prompts::{ng911::NG911_SYSTEM_INSTRUCTION, tert::TERT_SYSTEM_INSTRUCTION};
use crate::types::SectionInputs;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed enumeration of the sections in one policy manual.
pub trait SectionCatalog: Copy + PartialEq + Sized + 'static {
    /// Every named section, in manual order. Excludes the fallback.
    const ALL: &'static [Self];
    const FALLBACK: Self;

    fn title(self) -> &'static str;
    fn short_name(self) -> &'static str;
    /// The section-specific instruction, with `{field}` placeholders.
    fn guidance_template(self) -> &'static str;

    fn from_tag(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|section| section.title() == tag || section.short_name() == tag)
            .unwrap_or(Self::FALLBACK)
    }
}

/// A field whose value is picked from a fixed list.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChoiceList {
    pub field: &'static str,
    pub options: &'static [&'static str],
}

/// A section tag resolved against a manual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicySection {
    /// The canonical title, or the caller's tag for unmatched sections.
    pub title: String,
    /// `None` when the tag fell back to the generic section.
    pub short_name: Option<&'static str>,
    #[serde(skip)]
    pub guidance_template: &'static str,
}

impl PolicySection {
    fn from_catalog<S: SectionCatalog>(tag: &str) -> Self {
        let section = S::from_tag(tag);
        if section != S::FALLBACK {
            Self {
                title: section.title().to_string(),
                short_name: Some(section.short_name()),
                guidance_template: section.guidance_template(),
            }
        } else {
            Self {
                title: tag.to_string(),
                short_name: None,
                guidance_template: section.guidance_template(),
            }
        }
    }

    fn listed<S: SectionCatalog>(section: S) -> Self {
        Self {
            title: section.title().to_string(),
            short_name: Some(section.short_name()),
            guidance_template: section.guidance_template(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.short_name.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Tert,
    Ng911,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::Tert, PolicyKind::Ng911];

    pub fn display_name(self) -> &'static str {
        match self {
            PolicyKind::Tert => "TERT Policy Manual",
            PolicyKind::Ng911 => "NG9-1-1 Policy Manual",
        }
    }

    /// The fixed persona, compliance rules and hard constraints for this manual.
    pub fn system_template(self) -> &'static str {
        match self {
            PolicyKind::Tert => TERT_SYSTEM_INSTRUCTION,
            PolicyKind::Ng911 => NG911_SYSTEM_INSTRUCTION,
        }
    }

    /// Resolves a section tag. Never fails.
    pub fn resolve(self, tag: &str) -> PolicySection {
        match self {
            PolicyKind::Tert => PolicySection::from_catalog::<TertSection>(tag),
            PolicyKind::Ng911 => PolicySection::from_catalog::<Ng911Section>(tag),
        }
    }

    /// The named sections in manual order.
    pub fn sections(self) -> Vec<PolicySection> {
        match self {
            PolicyKind::Tert => TertSection::ALL
                .iter()
                .map(|s| PolicySection::listed(*s))
                .collect(),
            PolicyKind::Ng911 => Ng911Section::ALL
                .iter()
                .map(|s| PolicySection::listed(*s))
                .collect(),
        }
    }

    /// Form field names in presentation order.
    pub fn input_fields(self) -> Vec<&'static str> {
        self.default_pairs().iter().map(|(field, _)| *field).collect()
    }

    /// The sample agency values the forms start with.
    pub fn default_inputs(self) -> SectionInputs {
        self.default_pairs()
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect()
    }

    pub fn choice_lists(self) -> &'static [ChoiceList] {
        match self {
            PolicyKind::Tert => tert::CHOICE_LISTS,
            PolicyKind::Ng911 => ng911::CHOICE_LISTS,
        }
    }

    pub fn export_file_name(self) -> &'static str {
        match self {
            PolicyKind::Tert => "draft_tert_policy.md",
            PolicyKind::Ng911 => "draft_ng911_policy.md",
        }
    }

    fn default_pairs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PolicyKind::Tert => tert::DEFAULT_INPUTS,
            PolicyKind::Ng911 => ng911::DEFAULT_INPUTS,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Tert => write!(f, "tert"),
            PolicyKind::Ng911 => write!(f, "ng911"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_title_and_short_name() {
        let by_short = PolicyKind::Tert.resolve("Qualifications and Training");
        let by_title =
            PolicyKind::Tert.resolve("Section 3.0: TERT Personnel Minimum Qualifications and Training");
        assert_eq!(by_short, by_title);
        assert_eq!(
            by_short.title,
            "Section 3.0: TERT Personnel Minimum Qualifications and Training"
        );
        assert!(!by_short.is_fallback());
    }

    #[test]
    fn test_unmatched_tag_falls_back() {
        let section = PolicyKind::Ng911.resolve("Appendix A: Contacts");
        assert!(section.is_fallback());
        assert_eq!(section.title, "Appendix A: Contacts");
        assert_eq!(
            section.guidance_template,
            crate::prompts::ng911::NG911_GENERAL_GUIDANCE
        );
    }

    #[test]
    fn test_matching_is_exact() {
        assert!(PolicyKind::Tert.resolve("qualifications and training").is_fallback());
        assert!(PolicyKind::Tert.resolve(" Safety and Review").is_fallback());
    }

    #[test]
    fn test_catalogue_titles_sort_in_manual_order() {
        for kind in PolicyKind::ALL {
            let titles: Vec<String> = kind.sections().into_iter().map(|s| s.title).collect();
            let mut sorted = titles.clone();
            sorted.sort();
            assert_eq!(titles, sorted);
            assert_eq!(titles.len(), 6);
        }
    }

    #[test]
    fn test_defaults_cover_every_input_field() {
        let inputs = PolicyKind::Tert.default_inputs();
        assert_eq!(inputs.len(), PolicyKind::Tert.input_fields().len());
        assert_eq!(
            inputs.get("daily_expense_limit").map(String::as_str),
            Some("$75 per day")
        );
        for list in PolicyKind::Tert.choice_lists() {
            let default = &inputs[list.field];
            assert!(list.options.contains(&default.as_str()));
        }
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&PolicyKind::Ng911).unwrap(), "\"ng911\"");
        let kind: PolicyKind = serde_json::from_str("\"tert\"").unwrap();
        assert_eq!(kind, PolicyKind::Tert);
        assert_eq!(PolicyKind::Tert.export_file_name(), "draft_tert_policy.md");
    }
}
