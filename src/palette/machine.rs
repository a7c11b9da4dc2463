use std::sync::Arc;

use crate::error::PaletteError;
use crate::session::FillSession;
use crate::store::Prompt;
use crate::template;

use super::editor::EditorBuffer;
use super::filter::{filter, is_create_command};
use super::types::{Completion, Effect, Key, Mode, Notice};
use super::viewport::Viewport;

/// Prompt being filled together with its session and the focused variable.
#[derive(Debug, Clone, PartialEq)]
pub struct FillState {
    pub prompt: Prompt,
    pub session: FillSession,
    pub focus: usize,
}

impl FillState {
    pub fn focused_variable(&self) -> &str {
        &self.session.variables()[self.focus]
    }
}

/// Mode controller for search, fill and edit.
///
/// The palette never performs I/O itself. Operations return [`Effect`]s and
/// collaborator results come back through [`Palette::complete`]. The prompt
/// list is only ever swapped for a freshly built list, so a snapshot taken
/// with [`Palette::prompts`] stays consistent.
#[derive(Debug, Clone)]
pub struct Palette {
    prompts: Arc<Vec<Prompt>>,
    mode: Mode,
    query: String,
    selected: usize,
    list_height: usize,
    viewport: Viewport,
    fill: Option<FillState>,
    editor: Option<EditorBuffer>,
    notice: Option<Notice>,
}

impl Palette {
    pub fn new(list_height: usize) -> Self {
        Self {
            prompts: Arc::new(Vec::new()),
            mode: Mode::Search,
            query: String::new(),
            selected: 0,
            list_height,
            viewport: Viewport::new(list_height),
            fill: None,
            editor: None,
            notice: None,
        }
    }

    #[cfg(test)]
    pub fn with_prompts(list_height: usize, prompts: Vec<Prompt>) -> Self {
        let mut palette = Self::new(list_height);
        palette.prompts = Arc::new(prompts);
        palette
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Show at most `rows` list rows, never more than the configured height.
    /// The selected row stays in view.
    pub fn fit_list_to(&mut self, rows: usize) {
        self.viewport.set_height(self.list_height.min(rows));
        self.viewport.clamp(self.filtered().len());
        self.sync_viewport();
    }

    pub fn prompts(&self) -> Arc<Vec<Prompt>> {
        Arc::clone(&self.prompts)
    }

    /// Prompts matching the current query, recomputed on every call.
    pub fn filtered(&self) -> Vec<&Prompt> {
        filter(&self.prompts, &self.query)
    }

    pub fn selected_prompt(&self) -> Option<&Prompt> {
        self.filtered().get(self.selected).copied()
    }

    pub fn fill(&self) -> Option<&FillState> {
        self.fill.as_ref()
    }

    pub fn active_prompt(&self) -> Option<&Prompt> {
        self.fill.as_ref().map(|fill| &fill.prompt)
    }

    pub fn editor(&self) -> Option<&EditorBuffer> {
        self.editor.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True when Enter would open the editor through the reserved command.
    pub fn offers_create(&self) -> bool {
        self.filtered().is_empty() && is_create_command(&self.query)
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        self.notice = None;

        if let Key::Ctrl('c' | 'q') = key {
            return vec![Effect::Quit];
        }

        let effects = match self.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Filling => self.handle_filling_key(key),
            Mode::Editor => self.handle_editor_key(key),
        };
        self.sync_viewport();
        effects
    }

    fn handle_search_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Down => {
                self.select_next();
                Vec::new()
            }
            Key::Up => {
                self.select_previous();
                Vec::new()
            }
            Key::Enter => self.confirm(),
            Key::Esc => {
                if !self.query.is_empty() {
                    self.set_query("");
                }
                Vec::new()
            }
            Key::Backspace => {
                let mut query = self.query.clone();
                if query.pop().is_some() {
                    self.set_query(query);
                }
                Vec::new()
            }
            Key::Char(ch) => {
                let query = format!("{}{ch}", self.query);
                self.set_query(query);
                Vec::new()
            }
            Key::Ctrl('n') => self.open_new_editor(),
            Key::Ctrl('e') => self.open_editor_for_selected(),
            Key::Ctrl('d') => self.request_delete_selected(),
            _ => Vec::new(),
        }
    }

    fn handle_filling_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Esc => self.cancel(),
            Key::Enter => self.confirm(),
            Key::Tab | Key::Down => self.move_variable_focus(true),
            Key::BackTab | Key::Up => self.move_variable_focus(false),
            Key::Char(ch) => {
                self.edit_focused_value(|value| value.push(ch));
                Vec::new()
            }
            Key::Backspace => {
                self.edit_focused_value(|value| {
                    value.pop();
                });
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_editor_key(&mut self, key: Key) -> Vec<Effect> {
        if let Key::Esc = key {
            return self.cancel();
        }
        if let Key::Ctrl('s') = key {
            return self.save();
        }

        if let Some(editor) = self.editor.as_mut() {
            match key {
                Key::Tab => editor.focus = editor.focus.next(),
                Key::BackTab => editor.focus = editor.focus.previous(),
                Key::Enter => editor.enter(),
                Key::Backspace => editor.backspace(),
                Key::Char(ch) => editor.insert(ch),
                _ => {}
            }
        }
        Vec::new()
    }

    /// Replace the query text; the selection returns to the first row.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.selected = 0;
        self.sync_viewport();
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected.min(len - 1) + 1) % len;
        self.sync_viewport();
    }

    pub fn select_previous(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected.min(len - 1) + len - 1) % len;
        self.sync_viewport();
    }

    /// Pointer selection of a row: highlight it and act on it.
    pub fn select_index(&mut self, index: usize) -> Vec<Effect> {
        if self.mode != Mode::Search || index >= self.filtered().len() {
            return Vec::new();
        }
        self.selected = index;
        self.sync_viewport();
        self.confirm()
    }

    /// Enter: select in SEARCH, finish the fill in FILLING, save in EDITOR.
    pub fn confirm(&mut self) -> Vec<Effect> {
        match self.mode {
            Mode::Search => match self.selected_prompt().cloned() {
                Some(prompt) => self.select_prompt(prompt),
                None if is_create_command(&self.query) => self.open_new_editor(),
                None => Vec::new(),
            },
            Mode::Filling => match &self.fill {
                Some(fill) => vec![Effect::Copy {
                    text: fill.session.complete(),
                    prompt: fill.prompt.clone(),
                }],
                None => Vec::new(),
            },
            Mode::Editor => self.save(),
        }
    }

    fn select_prompt(&mut self, prompt: Prompt) -> Vec<Effect> {
        match FillSession::start(prompt.content.clone()) {
            Some(session) => {
                let first = session.first_variable().to_string();
                log::debug!("filling '{}' ({} variables)", prompt.title, session.variables().len());
                self.fill = Some(FillState {
                    prompt,
                    session,
                    focus: 0,
                });
                self.mode = Mode::Filling;
                vec![Effect::FocusVariable(first)]
            }
            None => vec![Effect::Copy {
                text: prompt.content.clone(),
                prompt,
            }],
        }
    }

    /// Universal escape back to SEARCH, dropping any session or editor buffer.
    pub fn cancel(&mut self) -> Vec<Effect> {
        if self.mode == Mode::Search {
            return Vec::new();
        }
        log::debug!("leaving {} without saving", self.mode);
        self.enter_search();
        vec![Effect::FocusSearch]
    }

    fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.fill = None;
        self.editor = None;
        self.sync_viewport();
    }

    #[cfg(test)]
    pub fn set_value(&mut self, identifier: &str, text: impl Into<String>) {
        if let Some(fill) = self.fill.as_mut() {
            fill.session.set_value(identifier, text);
        }
    }

    fn edit_focused_value(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(fill) = self.fill.as_mut() {
            let name = fill.focused_variable().to_string();
            let mut value = fill.session.value(&name).to_string();
            edit(&mut value);
            fill.session.set_value(&name, value);
        }
    }

    fn move_variable_focus(&mut self, forward: bool) -> Vec<Effect> {
        let Some(fill) = self.fill.as_mut() else {
            return Vec::new();
        };
        let len = fill.session.variables().len();
        fill.focus = if forward {
            (fill.focus + 1) % len
        } else {
            (fill.focus + len - 1) % len
        };
        vec![Effect::FocusVariable(fill.focused_variable().to_string())]
    }

    pub fn open_new_editor(&mut self) -> Vec<Effect> {
        self.open_editor(EditorBuffer::blank())
    }

    pub fn open_editor_for_selected(&mut self) -> Vec<Effect> {
        let Some(buffer) = self.selected_prompt().map(EditorBuffer::for_prompt) else {
            return Vec::new();
        };
        self.open_editor(buffer)
    }

    fn open_editor(&mut self, buffer: EditorBuffer) -> Vec<Effect> {
        if self.mode != Mode::Search {
            return Vec::new();
        }
        self.fill = None;
        self.editor = Some(buffer);
        self.mode = Mode::Editor;
        Vec::new()
    }

    #[cfg(test)]
    pub fn editor_mut(&mut self) -> Option<&mut EditorBuffer> {
        self.editor.as_mut()
    }

    /// Validate the editor buffer and ask the host to persist it.
    pub fn save(&mut self) -> Vec<Effect> {
        let Some(editor) = self.editor.as_ref() else {
            return Vec::new();
        };

        let draft = match editor.validate() {
            Ok(draft) => draft,
            Err(error) => {
                self.notice = Some(Notice::error(&error));
                return Vec::new();
            }
        };

        match editor.editing.as_deref() {
            None => vec![Effect::Create(draft)],
            Some(id) => match self.prompts.iter().find(|prompt| prompt.id == id) {
                Some(original) => vec![Effect::Update(draft.apply_to(original))],
                None => {
                    let error = PaletteError::Validation(
                        "This prompt no longer exists".to_string(),
                    );
                    self.notice = Some(Notice::error(&error));
                    Vec::new()
                }
            },
        }
    }

    pub fn request_delete_selected(&mut self) -> Vec<Effect> {
        match self.selected_prompt() {
            Some(prompt) => vec![Effect::Delete(prompt.clone())],
            None => Vec::new(),
        }
    }

    /// Swap in a new prompt list, keeping the selection inside it.
    pub fn replace_prompts(&mut self, prompts: Vec<Prompt>) {
        self.prompts = Arc::new(prompts);
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.viewport.clamp(len);
        self.sync_viewport();
    }

    fn upsert_prompt(&mut self, prompt: Prompt) {
        let exists = self.prompts.iter().any(|existing| existing.id == prompt.id);
        let next: Vec<Prompt> = if exists {
            self.prompts
                .iter()
                .map(|existing| {
                    if existing.id == prompt.id {
                        prompt.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect()
        } else {
            std::iter::once(prompt)
                .chain(self.prompts.iter().cloned())
                .collect()
        };
        self.replace_prompts(next);
    }

    fn replace_existing(&mut self, prompt: Prompt) {
        if self.prompts.iter().any(|existing| existing.id == prompt.id) {
            self.upsert_prompt(prompt);
        }
    }

    fn remove_prompt(&mut self, id: &str) {
        let next: Vec<Prompt> = self
            .prompts
            .iter()
            .filter(|prompt| prompt.id != id)
            .cloned()
            .collect();
        self.replace_prompts(next);
    }

    /// Apply the result of a collaborator call.
    ///
    /// State may have moved on since the call was issued, so every branch
    /// checks the current mode and list before acting.
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        let effects = match completion {
            Completion::Loaded(Ok(prompts)) => {
                self.replace_prompts(prompts);
                Vec::new()
            }
            Completion::Copied {
                prompt,
                result: Ok(()),
            } => self.finish_copy(prompt),
            Completion::Saved(Ok(prompt)) => {
                self.upsert_prompt(prompt);
                self.notice = Some(Notice::info("Saved"));
                if self.mode == Mode::Editor {
                    self.enter_search();
                    vec![Effect::FocusSearch]
                } else {
                    Vec::new()
                }
            }
            Completion::Deleted { id, result: Ok(()) } => {
                self.remove_prompt(&id);
                Vec::new()
            }
            Completion::UsageRecorded(Ok(prompt)) => {
                self.replace_existing(prompt);
                Vec::new()
            }
            Completion::UsageRecorded(Err(error)) => {
                log::warn!("failed to record usage: {error}");
                Vec::new()
            }
            Completion::Loaded(Err(error))
            | Completion::Copied {
                result: Err(error), ..
            }
            | Completion::Saved(Err(error))
            | Completion::Deleted {
                result: Err(error), ..
            } => {
                log::warn!("{error}");
                self.notice = Some(Notice::error(&error));
                Vec::new()
            }
        };
        self.sync_viewport();
        effects
    }

    fn finish_copy(&mut self, prompt: Prompt) -> Vec<Effect> {
        self.notice = Some(Notice::info("Copied to clipboard"));
        let mut effects = vec![Effect::RecordUsage(prompt.clone())];

        let filling_this = self
            .active_prompt()
            .is_some_and(|active| active.id == prompt.id);
        // A variable-free prompt is copied straight from SEARCH. A prompt with
        // variables finishing while SEARCH is showing was cancelled meanwhile.
        let direct_copy = self.mode == Mode::Search && !template::has_variables(&prompt.content);
        if filling_this || direct_copy {
            self.enter_search();
            self.set_query("");
            effects.push(Effect::FocusSearch);
        }
        effects
    }

    fn sync_viewport(&mut self) {
        if self.mode == Mode::Search {
            self.viewport.follow(self.selected);
        }
    }
}
