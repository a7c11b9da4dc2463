use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::types::{Prompt, PromptDraft};
use super::{RecordStore, new_record, now_millis, sort_recent_first};

/// Store backed by a single JSON array on disk.
///
/// Every mutation rewrites the whole file through a sibling temp file and a
/// rename, so readers only ever see a complete document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Prompt>> {
        let exists = fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed checking prompt store at {}", self.path.display()))?;
        if !exists {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed reading prompt store at {}", self.path.display()))?;

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing prompt store at {}", self.path.display()))
    }

    async fn write_all(&self, prompts: &[Prompt]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Unable to create store directory {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(prompts).context("Failed to serialize prompts to JSON")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }

    async fn modify<T>(&self, f: impl FnOnce(&mut Vec<Prompt>) -> Result<T> + Send) -> Result<T>
    where
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut prompts = self.read_all().await?;
        let result = f(&mut prompts)?;
        self.write_all(&prompts).await?;
        Ok(result)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Prompt>> {
        let mut prompts = self.read_all().await?;
        sort_recent_first(&mut prompts);
        log::debug!("loaded {} prompts from {}", prompts.len(), self.path.display());
        Ok(prompts)
    }

    async fn create(&self, draft: PromptDraft) -> Result<Prompt> {
        let prompt = new_record(draft);
        self.modify(|prompts| {
            prompts.push(prompt.clone());
            Ok(prompt)
        })
        .await
    }

    async fn update(&self, prompt: Prompt) -> Result<Prompt> {
        self.modify(|prompts| {
            let slot = prompts
                .iter_mut()
                .find(|record| record.id == prompt.id)
                .ok_or_else(|| anyhow!("Prompt {} not found", prompt.id))?;
            *slot = Prompt {
                updated_at: now_millis(),
                ..prompt
            };
            Ok(slot.clone())
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.modify(|prompts| {
            prompts.retain(|record| record.id != id);
            Ok(())
        })
        .await
    }

    async fn record_usage(&self, prompt: Prompt) -> Result<Prompt> {
        self.modify(|prompts| {
            let slot = prompts
                .iter_mut()
                .find(|record| record.id == prompt.id)
                .ok_or_else(|| anyhow!("Prompt {} not found", prompt.id))?;
            slot.usage_count += 1;
            Ok(slot.clone())
        })
        .await
    }
}
