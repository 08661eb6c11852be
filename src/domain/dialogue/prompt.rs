//! Dialogue prompt value objects.
//!
//! `PromptInput` is the raw, untrusted request shape. `DialoguePrompt` is the
//! validated form every downstream component works with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Minimum number of speakers in a generated dialogue.
pub const MIN_PARTICIPANTS: u8 = 2;

/// Maximum number of speakers in a generated dialogue.
pub const MAX_PARTICIPANTS: u8 = 6;

/// Target language of a practice dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    French,
    Spanish,
    German,
    Italian,
    Japanese,
    Mandarin,
    Portuguese,
    Russian,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 8] = [
        Language::French,
        Language::Spanish,
        Language::German,
        Language::Italian,
        Language::Japanese,
        Language::Mandarin,
        Language::Portuguese,
        Language::Russian,
    ];

    /// English name of the language, as used in prompts and storage.
    pub fn name(&self) -> &'static str {
        match self {
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Japanese => "Japanese",
            Language::Mandarin => "Mandarin",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
        }
    }

    /// BCP-47 locale used by speech synthesis clients.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::French => "fr-FR",
            Language::Spanish => "es-ES",
            Language::German => "de-DE",
            Language::Italian => "it-IT",
            Language::Japanese => "ja-JP",
            Language::Mandarin => "zh-CN",
            Language::Portuguese => "pt-PT",
            Language::Russian => "ru-RU",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|l| l.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format("language", format!("unsupported language '{}'", s))
            })
    }
}

/// Learner proficiency the dialogue should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "difficulty",
                    format!("unsupported difficulty '{}'", s),
                )
            })
    }
}

/// Register of speech used in the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Casual,
    Formal,
    Business,
    Academic,
    Slang,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Casual,
        Tone::Formal,
        Tone::Business,
        Tone::Academic,
        Tone::Slang,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Casual => "Casual",
            Tone::Formal => "Formal",
            Tone::Business => "Business",
            Tone::Academic => "Academic",
            Tone::Slang => "Slang",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tone {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::invalid_format("tone", format!("unsupported tone '{}'", s)))
    }
}

/// Raw dialogue request as received from a client.
///
/// Every field is optional so that missing values surface as validation
/// errors rather than deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInput {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub participants: Option<i64>,
}

impl PromptInput {
    /// Convenience constructor for the four required fields.
    pub fn new(
        topic: impl Into<String>,
        language: impl Into<String>,
        difficulty: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            topic: Some(topic.into()),
            language: Some(language.into()),
            difficulty: Some(difficulty.into()),
            tone: Some(tone.into()),
            participants: None,
        }
    }

    pub fn with_participants(mut self, participants: i64) -> Self {
        self.participants = Some(participants);
        self
    }
}

/// Validated parameters for one dialogue generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialoguePrompt {
    topic: String,
    language: Language,
    difficulty: Difficulty,
    tone: Tone,
    #[serde(rename = "participants")]
    participant_count: u8,
}

impl DialoguePrompt {
    /// Creates a two-person prompt.
    pub fn new(
        topic: impl Into<String>,
        language: Language,
        difficulty: Difficulty,
        tone: Tone,
    ) -> Result<Self, ValidationError> {
        Self::with_participants(topic, language, difficulty, tone, MIN_PARTICIPANTS)
    }

    /// Creates a prompt with an explicit participant count.
    pub fn with_participants(
        topic: impl Into<String>,
        language: Language,
        difficulty: Difficulty,
        tone: Tone,
        participant_count: u8,
    ) -> Result<Self, ValidationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&participant_count) {
            return Err(ValidationError::out_of_range(
                "participants",
                MIN_PARTICIPANTS as i64,
                MAX_PARTICIPANTS as i64,
                participant_count as i64,
            ));
        }
        Ok(Self {
            topic,
            language,
            difficulty,
            tone,
            participant_count,
        })
    }

    /// Validates raw input, reporting the first offending field.
    ///
    /// Fields are checked in order: topic, language, difficulty, tone,
    /// participants.
    pub fn from_input(input: &PromptInput) -> Result<Self, ValidationError> {
        let topic = required(&input.topic, "topic")?;
        let language: Language = required(&input.language, "language")?.parse()?;
        let difficulty: Difficulty = required(&input.difficulty, "difficulty")?.parse()?;
        let tone: Tone = required(&input.tone, "tone")?.parse()?;
        let participants = match input.participants {
            None => MIN_PARTICIPANTS,
            Some(n) => u8::try_from(n).map_err(|_| {
                ValidationError::out_of_range(
                    "participants",
                    MIN_PARTICIPANTS as i64,
                    MAX_PARTICIPANTS as i64,
                    n,
                )
            })?,
        };

        Self::with_participants(topic, language, difficulty, tone, participants)
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn participant_count(&self) -> u8 {
        self.participant_count
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::empty_field(field)),
    }
}
