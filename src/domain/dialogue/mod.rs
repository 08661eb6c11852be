//! Dialogue module - prompts, generated dialogues and model-output parsing.

mod aggregate;
mod errors;
mod extractor;
mod line;
mod prompt;
mod prompt_builder;

pub use aggregate::{Dialogue, DialogueRecord};
pub use errors::{DialogueError, GenerationError};
pub use extractor::{ExtractionError, ResponseExtractor};
pub use line::DialogueLine;
pub use prompt::{
    DialoguePrompt, Difficulty, Language, PromptInput, Tone, MAX_PARTICIPANTS, MIN_PARTICIPANTS,
};
pub use prompt_builder::{build_instruction, MAX_LINES, MIN_LINES};
