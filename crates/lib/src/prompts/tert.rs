//! # TERT Policy Prompts
//!
//! Templates for the Telecommunicator Emergency Response Taskforce policy manual.
//! The system instruction always carries the Section 3.0 hard constraints, ahead
//! of the optional document context.

/// Placeholders: `{section_title}`, `{section_guidance}`, `{policy_context}` and
/// the TERT form fields.
pub const TERT_SYSTEM_INSTRUCTION: &str = r#"You are a legal policy writer and certified NJTI-TERT expert for a Public Safety Answering Point (PSAP).
Your task is to write the complete text for the policy section titled: "{section_title}".
The generated policy MUST be compliant with the APCO/NENA ANS 1.105.2-2015 Standard for TERT Deployment.

**GENERAL CONSTRAINTS & CONTEXT (For all Sections):**
- Agency Legal Name: {agency_name}
- Authority Having Jurisdiction (AHJ): {ahj_name}
- TERT Program Goal: {ter_program_goal}
- State Authority Reference: {state_authority_reference}

**--- SECTION-SPECIFIC GENERATION INSTRUCTIONS ---**
{section_guidance}

**--- KEY CONSTRAINTS FOR REFERENCE (Always present for consistency) ---**
**SECTION 3.0 HARD CONSTRAINTS (Qualifications and Training):**
- TERT Telecommunicators MUST have successfully completed: FEMA IS-144, FEMA IS-100, and FEMA IS-700.
- TERT Team Leaders MUST additionally complete: FEMA IS-200 and FEMA IS-800.
- Local Background Check: {background_check}
- Additional Required Training: {additional_training}

**OPTIONAL CONTEXT:**
- The following text, extracted from existing local policies or agreements, should be used for context and consistency, but NEVER override the Hard Constraints:
---
{policy_context}
---

The final output MUST be a formal, professional policy section written in clear Markdown format, suitable for inclusion in a TERT Policy Manual. Do not include any introductory or concluding remarks outside the policy text itself."#;

pub const TERT_PURPOSE_GUIDANCE: &str = "For this section, you MUST define the program's Purpose (using the TERT Program Goal input), Scope (clearly defining what TERT covers and does not cover), and Authority (referencing the State Authority Reference input). Use standard policy language and separate the three components clearly with subheadings.";

pub const TERT_DEFINITIONS_GUIDANCE: &str = "For this section, you MUST define all standard TERT terms (e.g., TERT, PSAP, AHJ, TERT Team Leader, TERT Liaison, EMAC) based on the APCO/NENA standard. Additionally, you MUST include definitions for the following local roles/systems provided by the user: {local_roles_to_define}. Format the output as a clean, alphabetical Markdown definition list (e.g., **TERM**: Definition.).";

pub const TERT_QUALIFICATIONS_GUIDANCE: &str = "For this section, you MUST detail the minimum training and qualification requirements for all TERT personnel (Telecommunicators, Team Leaders, and Supervisors). You must strictly adhere to all SECTION 3.0 HARD CONSTRAINTS listed below. Ensure the local background check and additional local training requirements are clearly integrated.";

pub const TERT_ACTIVATION_GUIDANCE: &str = r#"For this section, you MUST provide a detailed, step-by-step procedure for TERT Activation and Deployment. Structure the content into three logical subsections: **I. Requesting PSAP Role**, **II. Activation Procedures**, and **III. TERT Package Requirements**.
- Activation Procedures MUST detail the process using the Local Request Mechanism: {local_request_mechanism}.
- TERT Package Requirements MUST list the Essential TERT Package Items: {tert_package_items} as provided by the Requesting PSAP.
- Use numbered lists or clear bullet points for all procedural steps."#;

pub const TERT_LOGISTICS_GUIDANCE: &str = r#"For this section, you MUST establish policies for financial management, reimbursement, and equipment. The policy MUST detail:
1. **Reimbursement:** Use the mechanism: {reimbursement_mechanism}
2. **Per Diem/Expenses:** Detail the use of the daily limit of {daily_expense_limit} and the required expense documentation.
3. **Equipment Provisioning:** Clarify who provides equipment based on: {equipment_provision}. Use subheadings for clarity."#;

pub const TERT_SAFETY_GUIDANCE: &str = r#"For this section, you MUST detail all protocols for TERT member safety, wellness, and post-mission procedures. The policy MUST include:
1. **Safety Protocols:** Implement on-site safety using the guidance: {on_site_safety_protocol}.
2. **Critical Incident Stress Management (CISM):** Detail access to CISM services using the reference: {cism_policy_reference}.
3. **Post-Mission Review:** Make the TERT Deployment Review completion mandatory, to be completed within the following timeframe: {post_mission_review_requirement}."#;

pub const TERT_GENERAL_GUIDANCE: &str =
    "Provide a comprehensive policy section based on all available inputs and TERT best practices.";
