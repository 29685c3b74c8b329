//! # NG9-1-1 Policy Prompts
//!
//! Templates for the Next-Generation 9-1-1 transition policy manual.

/// Placeholders: `{section_title}`, `{section_guidance}`, `{policy_context}` and
/// the NG9-1-1 form fields.
pub const NG911_SYSTEM_INSTRUCTION: &str = r#"You are a legal policy writer and certified **NG9-1-1 Policy Expert** for a Public Safety Answering Point (PSAP).
Your task is to write the complete text for the policy section titled: "{section_title}".
The generated policy MUST be compliant with the **NENA i3 Standard** and APCO/NENA NG9-1-1 best practices.

**GENERAL CONSTRAINTS & CONTEXT (For all Sections):**
- Agency Legal Name: {agency_name}
- Authority Having Jurisdiction (AHJ): {ahj_name}
- NG9-1-1 Program Goal: {ng911_program_goal}
- State Authority Reference: {state_authority_reference}

**--- SECTION-SPECIFIC GENERATION INSTRUCTIONS ---**
{section_guidance}

**--- KEY CONSTRAINTS FOR REFERENCE (Always present for consistency) ---**
The policy must reflect the transition to a geospatial routing model and the use of the Emergency Services IP Network (ESInet).

**OPTIONAL CONTEXT:**
- The following text, extracted from existing local policies or agreements, should be used for context and consistency, but NEVER override the NENA i3 standards:
---
{policy_context}
---

The final output MUST be a formal, professional policy section written in clear Markdown format, suitable for inclusion in an NG9-1-1 Policy Manual. Do not include any introductory or concluding remarks outside the policy text itself."#;

pub const NG911_PURPOSE_GUIDANCE: &str = "For this section, you MUST define the program's Purpose (using the NG9-1-1 Program Goal input), Scope (clearly defining the transition from E9-1-1 to the ESInet system), and Authority (referencing the State Authority Reference input). Use standard policy language and separate the three components clearly with subheadings. The scope must emphasize support for {future_media_support}.";

pub const NG911_TERMINOLOGY_GUIDANCE: &str = "For this section, you MUST define all standard NG9-1-1 terms (e.g., NG9-1-1, ESInet, PSAP, ECRF, ESRP, GIS) based on the NENA i3 standard. Additionally, you MUST include definitions for the following local roles/systems provided by the user: {local_roles_to_define}. Format the output as a clean, alphabetical Markdown definition list (e.g., **TERM**: Definition.).";

pub const NG911_MULTIMEDIA_GUIDANCE: &str = r#"For this section, you MUST detail the operational protocols for handling non-voice communications. The policy MUST include:
1. **Text-to-911 Protocol:** Detail the handling and transfer protocol based on the following: {text_handling_protocol}.
2. **Multimedia Policy:** Define rules for receiving and storing user-provided photos and videos, based on the following: {multimedia_policy_guidance}.
3. **Real-Time Text (RTT):** Mandate compliance with RTT standards for accessibility."#;

pub const NG911_LOCATION_GUIDANCE: &str = r#"For this section, you MUST provide detailed policies for location data management. Structure the content into three logical subsections: **I. GIS Data Maintenance**, **II. Location Discrepancy Protocol**, and **III. Geodetic Routing Requirements**.
- GIS Data Maintenance MUST detail the update frequency: {gis_maintenance_frequency}.
- Location Discrepancy Protocol MUST define the required actions when caller location data and reported location conflict, based on: {location_discrepancy_protocol}.
- Policy MUST state that location is determined by **geospatial routing** via the ECRF/ESRP."#;

pub const NG911_RECORDS_GUIDANCE: &str = r#"For this section, you MUST establish policies for data retention, access, and sharing. The policy MUST detail:
1. **Records Retention:** Use the time period: {retention_period_policy} and specify it covers all media types.
2. **Interoperability:** Define the mandatory data elements (e.g., ANI/ALI, event notes, media links) that must be transferred along with a call to another PSAP via the ESInet.
3. **Access and Redaction:** Detail the procedures for public records requests and the required redaction protocol for sensitive multimedia based on: {redaction_protocol}. Use subheadings for clarity."#;

pub const NG911_SECURITY_GUIDANCE: &str = r#"For this section, you MUST detail all protocols for NG9-1-1 system security and resilience. The policy MUST include:
1. **Cybersecurity Measures:** Detail mandatory security practices based on the following guidance: {cybersecurity_protocol}.
2. **Contingency Plan (COOP):** Detail the backup and failover process using the guidance: {failover_plan_reference}.
3. **System Monitoring:** Make monitoring of the ESInet and Core Services mandatory, with all discrepancies reported to the responsible entity: {monitoring_entity}."#;

pub const NG911_GENERAL_GUIDANCE: &str =
    "Provide a comprehensive policy section based on all available inputs and NG9-1-1 best practices.";
