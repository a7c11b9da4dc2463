//! Prompt persistence.
//!
//! The palette only talks to the [`RecordStore`] trait; the JSON file store is
//! what the binary wires in, the memory store backs tests.

mod json;
mod memory;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use types::{Prompt, PromptDraft, parse_tags};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All prompts, most recently updated first.
    async fn list(&self) -> Result<Vec<Prompt>>;

    /// Persist a new prompt, assigning id, timestamps and a zero usage count.
    async fn create(&self, draft: PromptDraft) -> Result<Prompt>;

    /// Replace an existing prompt, refreshing its update timestamp.
    async fn update(&self, prompt: Prompt) -> Result<Prompt>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Increment the usage counter of a prompt.
    async fn record_usage(&self, prompt: Prompt) -> Result<Prompt>;
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn new_record(draft: PromptDraft) -> Prompt {
    let now = now_millis();
    Prompt {
        id: uuid::Uuid::new_v4().to_string(),
        title: draft.title,
        content: draft.content,
        tags: draft.tags,
        created_at: now,
        updated_at: now,
        usage_count: 0,
        is_favorite: false,
    }
}

pub(crate) fn sort_recent_first(prompts: &mut [Prompt]) {
    prompts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}
