use serde::{Deserialize, Serialize};

/// A stored prompt template plus the metadata the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub is_favorite: bool,
}

/// The user-editable fields of a prompt, used for creation and edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl PromptDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }

    /// Apply the draft's fields on top of an existing record.
    pub fn apply_to(&self, prompt: &Prompt) -> Prompt {
        Prompt {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            ..prompt.clone()
        }
    }
}

/// Split comma separated tag input into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
