use comms911::{qa::QaMode, PolicyKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// The workflow a session serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Tert,
    Ng911,
    Qa,
}

impl SessionKind {
    pub fn policy_kind(self) -> Option<PolicyKind> {
        match self {
            SessionKind::Tert => Some(PolicyKind::Tert),
            SessionKind::Ng911 => Some(PolicyKind::Ng911),
            SessionKind::Qa => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub kind: SessionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qa_mode: Option<QaMode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
