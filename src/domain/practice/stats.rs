//! Per-user practice statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::dialogue::Language;
use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Longest single practice session that will be recorded.
pub const MAX_PRACTICE_SECS_PER_RECORD: u64 = 24 * 60 * 60;

/// How a dialogue was practiced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    /// Learner speaks one of the roles.
    Roleplay,
    /// Learner listens to synthesized speech and repeats.
    ListenRepeat,
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeMode::Roleplay => write!(f, "roleplay"),
            PracticeMode::ListenRepeat => write!(f, "listen_repeat"),
        }
    }
}

impl FromStr for PracticeMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "roleplay" => Ok(PracticeMode::Roleplay),
            "listen_repeat" | "listenrepeat" => Ok(PracticeMode::ListenRepeat),
            _ => Err(ValidationError::invalid_format(
                "mode",
                format!("unsupported practice mode '{}'", s),
            )),
        }
    }
}

/// Accumulated practice statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_id: UserId,
    pub dialogues_completed: u32,
    pub total_practice_secs: u64,
    pub languages_practiced: BTreeMap<Language, u32>,
    pub updated_at: Timestamp,
}

impl UserStats {
    /// Stats for a user who has not practiced yet.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            dialogues_completed: 0,
            total_practice_secs: 0,
            languages_practiced: BTreeMap::new(),
            updated_at: Timestamp::now(),
        }
    }

    /// Adds practice time and bumps the language's session count.
    pub fn record_practice(&mut self, secs: u64, language: Option<Language>) {
        self.total_practice_secs = self.total_practice_secs.saturating_add(secs);
        if let Some(language) = language {
            *self.languages_practiced.entry(language).or_insert(0) += 1;
        }
        self.updated_at = Timestamp::now();
    }

    /// Counts one more completed dialogue.
    pub fn record_dialogue_completed(&mut self) {
        self.dialogues_completed = self.dialogues_completed.saturating_add(1);
        self.updated_at = Timestamp::now();
    }

    /// Number of distinct languages practiced.
    pub fn language_count(&self) -> usize {
        self.languages_practiced.len()
    }
}

/// Checks a practice duration before it is recorded.
pub fn validate_practice_secs(secs: i64) -> Result<u64, ValidationError> {
    if secs < 0 || secs as u64 > MAX_PRACTICE_SECS_PER_RECORD {
        return Err(ValidationError::out_of_range(
            "practiceTime",
            0,
            MAX_PRACTICE_SECS_PER_RECORD as i64,
            secs,
        ));
    }
    Ok(secs as u64)
}
