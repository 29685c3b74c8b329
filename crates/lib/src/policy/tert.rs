//! Sections, sample inputs and choice lists for the TERT policy manual.

use super::{ChoiceList, SectionCatalog};
use crate::prompts::tert::{
    TERT_ACTIVATION_GUIDANCE, TERT_DEFINITIONS_GUIDANCE, TERT_GENERAL_GUIDANCE,
    TERT_LOGISTICS_GUIDANCE, TERT_PURPOSE_GUIDANCE, TERT_QUALIFICATIONS_GUIDANCE,
    TERT_SAFETY_GUIDANCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TertSection {
    PurposeScopeAuthority,
    Definitions,
    Qualifications,
    Activation,
    Logistics,
    SafetyAndReview,
    /// Any tag outside the manual's six sections.
    General,
}

impl SectionCatalog for TertSection {
    const ALL: &'static [Self] = &[
        Self::PurposeScopeAuthority,
        Self::Definitions,
        Self::Qualifications,
        Self::Activation,
        Self::Logistics,
        Self::SafetyAndReview,
    ];
    const FALLBACK: Self = Self::General;

    fn title(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => "Section 1.0: Purpose, Scope, and Authority",
            Self::Definitions => "Section 2.0: Definitions and Acronyms",
            Self::Qualifications => "Section 3.0: TERT Personnel Minimum Qualifications and Training",
            Self::Activation => "Section 4.0: Activation and Deployment Steps",
            Self::Logistics => "Section 5.0: Logistics, Finance, and Equipment",
            Self::SafetyAndReview => "Section 6.0: Safety, Wellness, and Post-Mission Review",
            Self::General => "General",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => "Purpose, Scope, and Authority",
            Self::Definitions => "Definitions and Acronyms",
            Self::Qualifications => "Qualifications and Training",
            Self::Activation => "Activation and Deployment Steps",
            Self::Logistics => "Logistics and Finance",
            Self::SafetyAndReview => "Safety and Review",
            Self::General => "General",
        }
    }

    fn guidance_template(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => TERT_PURPOSE_GUIDANCE,
            Self::Definitions => TERT_DEFINITIONS_GUIDANCE,
            Self::Qualifications => TERT_QUALIFICATIONS_GUIDANCE,
            Self::Activation => TERT_ACTIVATION_GUIDANCE,
            Self::Logistics => TERT_LOGISTICS_GUIDANCE,
            Self::SafetyAndReview => TERT_SAFETY_GUIDANCE,
            Self::General => TERT_GENERAL_GUIDANCE,
        }
    }
}

pub const BACKGROUND_CHECK_OPTIONS: &[&str] = &[
    "Standard Agency Fingerprint-based Check",
    "State-Level Background Check Only",
    "No Additional Requirements Beyond Initial Employment",
];

pub const REVIEW_DEADLINE_OPTIONS: &[&str] = &[
    "Must be submitted within 72 hours of demobilization.",
    "Must be submitted within 7 calendar days of demobilization.",
    "Required within 30 days of the mission end.",
];

pub(super) const CHOICE_LISTS: &[ChoiceList] = &[
    ChoiceList {
        field: "background_check",
        options: BACKGROUND_CHECK_OPTIONS,
    },
    ChoiceList {
        field: "post_mission_review_requirement",
        options: REVIEW_DEADLINE_OPTIONS,
    },
];

/// Form fields in the order the form presents them, with the sample agency values.
pub(super) const DEFAULT_INPUTS: &[(&str, &str)] = &[
    ("agency_name", "City of Willow Creek 9-1-1 Emergency Communications Center"),
    ("ahj_name", "Willow Creek County Public Safety Commission"),
    (
        "ter_program_goal",
        "To provide mutual aid and staffing relief to PSAPs affected by natural disasters, planned events, or critical incidents that compromise continuity of operations.",
    ),
    (
        "state_authority_reference",
        "Inter-Agency Mutual Aid Agreement (MAA-2024-001) as authorized by State Statute 48-9-904 et. seq.",
    ),
    (
        "local_roles_to_define",
        "PSAP Manager; Communications Unit Leader (COML); Local CAD System (Fire); Local Radio System.",
    ),
    ("background_check", "Standard Agency Fingerprint-based Check"),
    (
        "additional_training",
        "Annual NIMS Refresher; Local CAD System Certification (Level 1); 40 hours of on-the-job mentorship.",
    ),
    (
        "local_request_mechanism",
        "PSAP Manager contacts County EMA who then contacts the State TERT Coordinator via secure channel.",
    ),
    (
        "tert_package_items",
        "PSAP Floor Plan; Primary Radio Channel List; CAD System Login Protocol; Local Acronym Sheet.",
    ),
    (
        "reimbursement_mechanism",
        "Deploying agency seeks reimbursement via State TERT Program/Federal EMAC upon declaration.",
    ),
    (
        "equipment_provision",
        "Deploying PSAP provides personal gear (laptop, headset). Receiving PSAP ensures operational radio and CAD access.",
    ),
    ("daily_expense_limit", "$75 per day"),
    (
        "cism_policy_reference",
        "Access provided through County Employee Assistance Program (EAP) or State CISM Team (Policy 12.3).",
    ),
    (
        "post_mission_review_requirement",
        "Must be submitted within 72 hours of demobilization.",
    ),
    (
        "on_site_safety_protocol",
        "Required buddy system, daily check-in/out with TERT Team Leader, and adherence to Requesting PSAP's physical security procedures.",
    ),
];
