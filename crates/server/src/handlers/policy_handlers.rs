//! # Policy Catalogue Handlers
//!
//! Everything a client needs to render the drafting form for a manual: the
//! sections in order, the input fields, the sample agency values and the fixed
//! choice lists.

use super::{wrap_response, ApiResponse, DebugParams};
use comms911::{
    policy::{ChoiceList, PolicySection},
    PolicyKind, SectionInputs,
};
use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Serialize;

// --- API Payloads ---

#[derive(Serialize)]
pub struct PolicySummary {
    pub kind: PolicyKind,
    pub display_name: &'static str,
}

#[derive(Serialize)]
pub struct PolicyCatalog {
    pub kind: PolicyKind,
    pub display_name: &'static str,
    pub sections: Vec<PolicySection>,
    pub input_fields: Vec<&'static str>,
    pub default_inputs: SectionInputs,
    pub choice_lists: &'static [ChoiceList],
    pub export_file_name: &'static str,
}

// --- Handlers ---

/// Lists the policy manuals this server can draft.
pub async fn list_policies_handler(
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<Vec<PolicySummary>>> {
    let policies = PolicyKind::ALL
        .iter()
        .map(|&kind| PolicySummary {
            kind,
            display_name: kind.display_name(),
        })
        .collect();
    wrap_response(policies, debug_params, None)
}

/// Describes one policy manual.
pub async fn policy_catalog_handler(
    Path(kind): Path<PolicyKind>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<PolicyCatalog>> {
    let catalog = PolicyCatalog {
        kind,
        display_name: kind.display_name(),
        sections: kind.sections(),
        input_fields: kind.input_fields(),
        default_inputs: kind.default_inputs(),
        choice_lists: kind.choice_lists(),
        export_file_name: kind.export_file_name(),
    };
    wrap_response(catalog, debug_params, None)
}
