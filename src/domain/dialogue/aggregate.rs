//! Dialogue aggregate.
//!
//! A dialogue starts life unpersisted, straight out of generation. Assigning
//! a record (id, owner, creation time) makes it persisted; only persisted
//! dialogues can be favorited.

use serde::{Deserialize, Serialize};

use super::{DialogueError, DialogueLine, DialoguePrompt};
use crate::domain::foundation::{DialogueId, Timestamp, UserId};

/// Persistence identity of a stored dialogue. All three fields travel together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    pub id: DialogueId,
    pub owner: UserId,
    pub created_at: Timestamp,
}

/// A generated practice dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialogue {
    record: Option<DialogueRecord>,
    prompt: DialoguePrompt,
    lines: Vec<DialogueLine>,
    is_favorite: bool,
}

impl Dialogue {
    /// Creates an unpersisted dialogue from freshly generated lines.
    pub fn generated(prompt: DialoguePrompt, lines: Vec<DialogueLine>) -> Self {
        Self {
            record: None,
            prompt,
            lines,
            is_favorite: false,
        }
    }

    /// Rebuilds a persisted dialogue from storage.
    pub fn reconstitute(
        record: DialogueRecord,
        prompt: DialoguePrompt,
        lines: Vec<DialogueLine>,
        is_favorite: bool,
    ) -> Self {
        Self {
            record: Some(record),
            prompt,
            lines,
            is_favorite,
        }
    }

    /// Assigns a new identity owned by `owner`. Returns the persisted copy.
    pub fn assign_to(mut self, owner: UserId) -> Self {
        self.record = Some(DialogueRecord {
            id: DialogueId::new(),
            owner,
            created_at: Timestamp::now(),
        });
        self
    }

    pub fn record(&self) -> Option<&DialogueRecord> {
        self.record.as_ref()
    }

    pub fn id(&self) -> Option<DialogueId> {
        self.record.as_ref().map(|r| r.id)
    }

    pub fn owner(&self) -> Option<&UserId> {
        self.record.as_ref().map(|r| &r.owner)
    }

    pub fn created_at(&self) -> Option<Timestamp> {
        self.record.as_ref().map(|r| r.created_at)
    }

    pub fn is_persisted(&self) -> bool {
        self.record.is_some()
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner() == Some(user)
    }

    pub fn prompt(&self) -> &DialoguePrompt {
        &self.prompt
    }

    pub fn lines(&self) -> &[DialogueLine] {
        &self.lines
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Sets the favorite flag. Fails for dialogues that were never stored.
    pub fn set_favorite(&mut self, favorite: bool) -> Result<(), DialogueError> {
        if !self.is_persisted() {
            return Err(DialogueError::NotPersisted);
        }
        self.is_favorite = favorite;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{Difficulty, Language, Tone};

    fn sample() -> Dialogue {
        let prompt =
            DialoguePrompt::new("travel", Language::Japanese, Difficulty::Beginner, Tone::Casual)
                .unwrap();
        Dialogue::generated(
            prompt,
            vec![DialogueLine::new("A", "こんにちは", "Hello")],
        )
    }

    #[test]
    fn generated_dialogue_is_unpersisted() {
        let dialogue = sample();
        assert!(!dialogue.is_persisted());
        assert!(dialogue.id().is_none());
        assert!(dialogue.owner().is_none());
        assert!(dialogue.created_at().is_none());
        assert!(!dialogue.is_favorite());
    }

    #[test]
    fn assign_sets_id_owner_and_time_together() {
        let owner = UserId::new("user-1").unwrap();
        let dialogue = sample().assign_to(owner.clone());

        assert!(dialogue.is_persisted());
        assert!(dialogue.id().is_some());
        assert!(dialogue.created_at().is_some());
        assert!(dialogue.is_owned_by(&owner));
        assert!(!dialogue.is_owned_by(&UserId::new("someone-else").unwrap()));
    }

    #[test]
    fn unpersisted_dialogue_cannot_be_favorited() {
        let mut dialogue = sample();
        assert!(matches!(
            dialogue.set_favorite(true),
            Err(DialogueError::NotPersisted)
        ));
        assert!(!dialogue.is_favorite());
    }

    #[test]
    fn persisted_dialogue_toggles_favorite() {
        let mut dialogue = sample().assign_to(UserId::new("user-1").unwrap());
        dialogue.set_favorite(true).unwrap();
        assert!(dialogue.is_favorite());
        dialogue.set_favorite(false).unwrap();
        assert!(!dialogue.is_favorite());
    }
}
