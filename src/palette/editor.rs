use crate::error::PaletteError;
use crate::store::{Prompt, PromptDraft, parse_tags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Title,
    Tags,
    Content,
}

impl EditorField {
    pub fn next(self) -> Self {
        match self {
            EditorField::Title => EditorField::Tags,
            EditorField::Tags => EditorField::Content,
            EditorField::Content => EditorField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            EditorField::Title => EditorField::Content,
            EditorField::Tags => EditorField::Title,
            EditorField::Content => EditorField::Tags,
        }
    }
}

/// Unsaved editor state. `editing` holds the id of the prompt being edited,
/// `None` when creating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBuffer {
    pub editing: Option<String>,
    pub title: String,
    pub tags: String,
    pub content: String,
    pub focus: EditorField,
}

impl EditorBuffer {
    pub fn blank() -> Self {
        Self {
            editing: None,
            title: String::new(),
            tags: String::new(),
            content: String::new(),
            focus: EditorField::Title,
        }
    }

    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self {
            editing: Some(prompt.id.clone()),
            title: prompt.title.clone(),
            tags: prompt.tags.join(", "),
            content: prompt.content.clone(),
            focus: EditorField::Title,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            EditorField::Title => &mut self.title,
            EditorField::Tags => &mut self.tags,
            EditorField::Content => &mut self.content,
        }
    }

    pub fn insert(&mut self, ch: char) {
        self.focused_mut().push(ch);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Newline inside the content field, otherwise move to the next field.
    pub fn enter(&mut self) {
        match self.focus {
            EditorField::Content => self.content.push('\n'),
            _ => self.focus = self.focus.next(),
        }
    }

    pub fn draft(&self) -> PromptDraft {
        PromptDraft::new(
            self.title.trim(),
            self.content.clone(),
            parse_tags(&self.tags),
        )
    }

    pub fn validate(&self) -> Result<PromptDraft, PaletteError> {
        if self.title.trim().is_empty() {
            return Err(PaletteError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(PaletteError::Validation("Content is required".to_string()));
        }
        Ok(self.draft())
    }
}
