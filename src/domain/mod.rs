//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `dialogue` - Prompts, dialogues, instruction building and reply extraction
//! - `practice` - Learner statistics

pub mod dialogue;
pub mod foundation;
pub mod practice;
