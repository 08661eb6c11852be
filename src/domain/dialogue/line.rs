//! A single exchange in a dialogue.

use serde::{Deserialize, Serialize};

/// One utterance: who says it, what they say, and its English translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    pub translation: String,
}

impl DialogueLine {
    pub fn new(
        speaker: impl Into<String>,
        text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            translation: translation.into(),
        }
    }
}
