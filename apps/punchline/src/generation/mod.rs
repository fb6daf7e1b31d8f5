// Routine generation: prompt rendering, output schema, and the generator itself.
// All LLM calls go through llm_client, never direct Gemini calls here.

pub mod generator;
pub mod prompts;
pub mod schema;

pub use generator::{GeminiRoutineGenerator, RoutineGenerator};
