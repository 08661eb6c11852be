//! Request and response shapes for dialogue endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{Dialogue, DialogueLine, DialoguePrompt};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// Body of `PUT /api/dialogues/:id/favorite`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetFavoriteRequest {
    pub is_favorite: bool,
}

/// Query string of `GET /api/dialogues`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDialoguesParams {
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

/// A dialogue as returned to clients.
///
/// `id`, `userId` and `createdAt` are only present once the dialogue has
/// been saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub prompt: DialoguePrompt,
    pub lines: Vec<DialogueLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub is_favorite: bool,
    /// Speech synthesis locale for the dialogue's language.
    pub locale: String,
}

impl From<&Dialogue> for DialogueResponse {
    fn from(dialogue: &Dialogue) -> Self {
        Self {
            id: dialogue.id().map(|id| id.to_string()),
            user_id: dialogue.owner().map(|owner| owner.to_string()),
            prompt: dialogue.prompt().clone(),
            lines: dialogue.lines().to_vec(),
            created_at: dialogue.created_at().map(|t| t.to_rfc3339()),
            is_favorite: dialogue.is_favorite(),
            locale: dialogue.prompt().language().speech_locale().to_string(),
        }
    }
}

/// A list of dialogues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueListResponse {
    pub dialogues: Vec<DialogueResponse>,
    pub count: usize,
}

impl From<Vec<Dialogue>> for DialogueListResponse {
    fn from(dialogues: Vec<Dialogue>) -> Self {
        let dialogues: Vec<DialogueResponse> = dialogues.iter().map(Into::into).collect();
        Self {
            count: dialogues.len(),
            dialogues,
        }
    }
}
