// Shared prompt fragments. Each feature that calls the LLM keeps its own prompts.rs
// alongside it; this file only holds what is not specific to one of them.

/// Closing instruction for prompts whose output shape is enforced by a response schema.
pub const SCHEMA_FORMAT_INSTRUCTION: &str = "FORMAT: Return raw JSON matching the schema provided.";
