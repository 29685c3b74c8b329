//! # Comms911 Policy Tools
//!
//! This crate drafts PSAP operating policies (TERT mutual aid, NG9-1-1 transition)
//! and answers questions about uploaded reference documents using an external
//! text-generation service.
//!
//! Every instantiation follows the same flow:
//! template selection → prompt assembly → external call → typed result.
//!
//! - [`generator`] assembles policy prompts and invokes the configured provider.
//! - [`session`] holds the per-user state (reference text, generated sections).
//! - [`store`] keeps generated sections in tag order and renders the export.
//! - [`qa`] and [`retrieval`] implement the document question-answering variant.

pub mod constants;
pub mod errors;
pub mod generator;
pub mod ingest;
pub mod policy;
pub mod prompts;
pub mod providers;
pub mod qa;
pub mod retrieval;
pub mod session;
pub mod store;
pub mod types;

pub use errors::{GenerationError, PromptError, ServiceFailureKind};
pub use generator::{assemble_prompt, invoke, PolicyGenerator};
pub use policy::PolicyKind;
pub use qa::{DocumentQa, QaMode, QaSession};
pub use session::SessionContext;
pub use store::ResultStore;
pub use types::{GenerationRequest, GenerationResult, PromptSpec, SectionInputs};
