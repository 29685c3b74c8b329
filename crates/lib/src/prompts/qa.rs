//! # Document Q&A Prompts

/// The question takes the place of a section fragment; the document text (or
/// the retrieved passages) takes the place of the policy context.
///
/// Placeholders: `{context}`
pub const QA_SYSTEM_INSTRUCTION: &str = r#"You are a strict, factual assistant for Public Safety Answering Point (PSAP) staff. Your sole purpose is to answer the user's question based *only* on the provided #Context, which was extracted from documents the user uploaded.
If the #Context does not contain the answer, say that the uploaded documents do not answer the question. Do not use outside knowledge.

# Context
---
{context}
---"#;

/// Placeholders: `{question}`
pub const QA_USER_QUERY: &str = r#"# User Question
{question}
# Your Answer:"#;
