use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::types::{Prompt, PromptDraft};
use super::{RecordStore, new_record, now_millis, sort_recent_first};

/// Volatile store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    prompts: Mutex<Vec<Prompt>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_prompts(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts: Mutex::new(prompts),
        }
    }

    fn with_records<T>(&self, f: impl FnOnce(&mut Vec<Prompt>) -> Result<T>) -> Result<T> {
        let mut guard = self
            .prompts
            .lock()
            .map_err(|_| anyhow!("Prompt store lock poisoned"))?;
        f(&mut guard)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Prompt>> {
        self.with_records(|records| {
            let mut prompts = records.clone();
            sort_recent_first(&mut prompts);
            Ok(prompts)
        })
    }

    async fn create(&self, draft: PromptDraft) -> Result<Prompt> {
        let prompt = new_record(draft);
        self.with_records(|records| {
            records.push(prompt.clone());
            Ok(prompt)
        })
    }

    async fn update(&self, prompt: Prompt) -> Result<Prompt> {
        self.with_records(|records| {
            let slot = records
                .iter_mut()
                .find(|record| record.id == prompt.id)
                .ok_or_else(|| anyhow!("Prompt {} not found", prompt.id))?;
            *slot = Prompt {
                updated_at: now_millis(),
                ..prompt
            };
            Ok(slot.clone())
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.with_records(|records| {
            records.retain(|record| record.id != id);
            Ok(())
        })
    }

    async fn record_usage(&self, prompt: Prompt) -> Result<Prompt> {
        self.with_records(|records| {
            let slot = records
                .iter_mut()
                .find(|record| record.id == prompt.id)
                .ok_or_else(|| anyhow!("Prompt {} not found", prompt.id))?;
            slot.usage_count += 1;
            Ok(slot.clone())
        })
    }
}
