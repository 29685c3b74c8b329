//! Sections and sample inputs for the NG9-1-1 transition policy manual.

use super::{ChoiceList, SectionCatalog};
use crate::prompts::ng911::{
    NG911_GENERAL_GUIDANCE, NG911_LOCATION_GUIDANCE, NG911_MULTIMEDIA_GUIDANCE,
    NG911_PURPOSE_GUIDANCE, NG911_RECORDS_GUIDANCE, NG911_SECURITY_GUIDANCE,
    NG911_TERMINOLOGY_GUIDANCE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ng911Section {
    PurposeScopeAuthority,
    Terminology,
    Multimedia,
    Location,
    Records,
    Security,
    /// Any tag outside the manual's six sections.
    General,
}

impl SectionCatalog for Ng911Section {
    const ALL: &'static [Self] = &[
        Self::PurposeScopeAuthority,
        Self::Terminology,
        Self::Multimedia,
        Self::Location,
        Self::Records,
        Self::Security,
    ];
    const FALLBACK: Self = Self::General;

    fn title(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => "Section 1.0: Purpose, Scope, and Authority (NG9-1-1)",
            Self::Terminology => "Section 2.0: NG9-1-1 Terminology and Acronyms",
            Self::Multimedia => "Section 3.0: Multimedia and Non-Voice Call Handling Protocols",
            Self::Location => "Section 4.0: Geospatial Data and Location Management",
            Self::Records => "Section 5.0: Data Retention, Logging, and Interoperability",
            Self::Security => "Section 6.0: Cybersecurity, Resilience, and ESInet Monitoring",
            Self::General => "General",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => "Purpose, Scope, and Authority",
            Self::Terminology => "Definitions and Acronyms",
            Self::Multimedia => "Multimedia and Text/Media Handling",
            Self::Location => "GIS and Location Management",
            Self::Records => "Data and Records",
            Self::Security => "Security and Resilience",
            Self::General => "General",
        }
    }

    fn guidance_template(self) -> &'static str {
        match self {
            Self::PurposeScopeAuthority => NG911_PURPOSE_GUIDANCE,
            Self::Terminology => NG911_TERMINOLOGY_GUIDANCE,
            Self::Multimedia => NG911_MULTIMEDIA_GUIDANCE,
            Self::Location => NG911_LOCATION_GUIDANCE,
            Self::Records => NG911_RECORDS_GUIDANCE,
            Self::Security => NG911_SECURITY_GUIDANCE,
            Self::General => NG911_GENERAL_GUIDANCE,
        }
    }
}

/// The NG9-1-1 form has free-text fields only.
pub(super) const CHOICE_LISTS: &[ChoiceList] = &[];

pub(super) const DEFAULT_INPUTS: &[(&str, &str)] = &[
    ("agency_name", "City of Willow Creek 9-1-1 Emergency Communications Center"),
    ("ahj_name", "Willow Creek County Public Safety Commission"),
    (
        "ng911_program_goal",
        "To fully transition the PSAP to the State ESInet to support all forms of digital communication, enhance system resilience, and improve emergency data sharing.",
    ),
    (
        "state_authority_reference",
        "State 9-1-1 Act, Title 5, Chapter 32 (NG9-1-1 Funding and Governance)",
    ),
    ("future_media_support", "Text, Photos, Video, and real-time sensor data."),
    (
        "local_roles_to_define",
        "ESInet Manager; GIS Data Steward; Cybersecurity Liaison; NENA i3 Compliance Officer.",
    ),
    (
        "text_handling_protocol",
        "Text-to-911 is primary for deaf/hard of hearing or situations where voice is unsafe. Protocols must prioritize RTT over SMS.",
    ),
    (
        "multimedia_policy_guidance",
        "Telecommunicator must request media for verification only, and a supervisor must approve storage/sharing outside the CAD/logging system.",
    ),
    (
        "gis_maintenance_frequency",
        "Monthly update of all road centerlines and annual revalidation of all Emergency Service Boundaries (ESBs).",
    ),
    (
        "location_discrepancy_protocol",
        "If caller location (GIS) and reported location conflict, the Telecommunicator must attempt to confirm the caller's stated location while simultaneously validating the geospatial data.",
    ),
    (
        "retention_period_policy",
        "Ten (10) years for all voice, text, CAD, and multimedia data.",
    ),
    (
        "redaction_protocol",
        "All multimedia (photos/video) must be fully redacted to remove PII prior to release for public records requests.",
    ),
    (
        "cybersecurity_protocol",
        "Mandatory use of multi-factor authentication, annual security training, and compliance with the NENA NG-SEC Standard.",
    ),
    (
        "failover_plan_reference",
        "Referenced in COOP Policy 15.1, requiring immediate failover to the geodiverse alternate PSAP upon ESInet failure detection.",
    ),
    (
        "monitoring_entity",
        "State 9-1-1 Office/System Administrator (SA) is the primary entity for ESInet monitoring and discrepancy reporting.",
    ),
];
