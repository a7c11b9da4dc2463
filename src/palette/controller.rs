use std::collections::VecDeque;
use std::sync::Arc;

use crate::clipboard::ClipboardWriter;
use crate::confirm::Confirmer;
use crate::error::PaletteError;
use crate::store::RecordStore;

use super::machine::Palette;
use super::types::{Completion, Effect, Key};

const DELETE_QUESTION: &str = "Delete this prompt?";

/// Runs palette effects against the store, clipboard and confirmation prompt.
///
/// Each collaborator call is awaited to completion and fed back into the
/// palette before the next queued effect runs, so the palette only ever sees
/// one event at a time.
pub struct PaletteController {
    palette: Palette,
    store: Arc<dyn RecordStore>,
    clipboard: Arc<dyn ClipboardWriter>,
    confirmer: Box<dyn Confirmer>,
}

impl PaletteController {
    pub fn new(
        palette: Palette,
        store: Arc<dyn RecordStore>,
        clipboard: Arc<dyn ClipboardWriter>,
        confirmer: Box<dyn Confirmer>,
    ) -> Self {
        Self {
            palette,
            store,
            clipboard,
            confirmer,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn set_confirmer(&mut self, confirmer: Box<dyn Confirmer>) {
        self.confirmer = confirmer;
    }

    /// Load the prompt list. A failure leaves an empty list and a notice.
    pub async fn load(&mut self) -> Vec<Effect> {
        let result = self.store.list().await.map_err(PaletteError::store);
        let effects = self.palette.complete(Completion::Loaded(result));
        self.run(effects).await
    }

    /// Dispatch a key press and return the UI signals it produced.
    pub async fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        let effects = self.palette.handle_key(key);
        self.run(effects).await
    }

    /// Pointer selection of a row in the filtered list.
    pub async fn select_index(&mut self, index: usize) -> Vec<Effect> {
        let effects = self.palette.select_index(index);
        self.run(effects).await
    }

    /// Execute collaborator effects until only UI signals remain.
    pub async fn run(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut queue: VecDeque<Effect> = effects.into();
        let mut signals = Vec::new();

        while let Some(effect) = queue.pop_front() {
            if effect.is_ui_signal() {
                signals.push(effect);
                continue;
            }
            if let Some(completion) = self.perform(effect).await {
                queue.extend(self.palette.complete(completion));
            }
        }

        signals
    }

    async fn perform(&self, effect: Effect) -> Option<Completion> {
        match effect {
            Effect::Copy { text, prompt } => {
                log::debug!("copying '{}' ({} bytes)", prompt.title, text.len());
                let result = self
                    .clipboard
                    .write(&text)
                    .await
                    .map_err(PaletteError::from);
                Some(Completion::Copied { prompt, result })
            }
            Effect::Create(draft) => {
                log::debug!("creating prompt '{}'", draft.title);
                let result = self.store.create(draft).await.map_err(PaletteError::store);
                Some(Completion::Saved(result))
            }
            Effect::Update(prompt) => {
                log::debug!("updating prompt {}", prompt.id);
                let result = self.store.update(prompt).await.map_err(PaletteError::store);
                Some(Completion::Saved(result))
            }
            Effect::Delete(prompt) => {
                if !self.confirmer.confirm(DELETE_QUESTION) {
                    log::debug!("delete of {} declined", prompt.id);
                    return None;
                }
                let result = self
                    .store
                    .delete(&prompt.id)
                    .await
                    .map_err(PaletteError::store);
                Some(Completion::Deleted {
                    id: prompt.id,
                    result,
                })
            }
            Effect::RecordUsage(prompt) => {
                let result = self
                    .store
                    .record_usage(prompt)
                    .await
                    .map_err(PaletteError::store);
                Some(Completion::UsageRecorded(result))
            }
            Effect::FocusSearch | Effect::FocusVariable(_) | Effect::Quit => None,
        }
    }
}
