//! File-backed prompt template store.
//!
//! Each of the four slots caches its current text behind its own `RwLock`,
//! so editing one template never blocks readers of another. Built-in
//! defaults are compiled into the binary; edits persist to an overrides
//! directory and survive restarts without ever touching the defaults.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::RatingConfig;

use super::defaults;
use super::{PromptError, PromptRole, PromptType};

/// Admin view of one template slot. `file_path` points at the override file
/// when an override is active, otherwise it names the built-in source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSnapshot {
    #[serde(rename = "type")]
    pub prompt_type: PromptType,
    pub role: PromptRole,
    pub content: String,
    pub file_path: String,
    pub cached: bool,
}

struct Slot {
    prompt_type: PromptType,
    role: PromptRole,
    default_text: &'static str,
    state: RwLock<SlotState>,
}

struct SlotState {
    content: String,
    overridden: bool,
}

impl Slot {
    fn new(prompt_type: PromptType, role: PromptRole, default_text: &'static str) -> Self {
        Self {
            prompt_type,
            role,
            default_text,
            state: RwLock::new(SlotState {
                content: default_text.to_string(),
                overridden: false,
            }),
        }
    }
}

pub struct PromptStore {
    overrides_dir: PathBuf,
    slots: [Slot; 4],
}

impl PromptStore {
    /// Builds the store, seeding each slot from its override file when one
    /// exists, else from the built-in default.
    pub async fn load(overrides_dir: &Path) -> Result<Self, PromptError> {
        let store = Self {
            overrides_dir: overrides_dir.to_path_buf(),
            slots: [
                Slot::new(
                    PromptType::Summary,
                    PromptRole::System,
                    defaults::SUMMARY_SYSTEM,
                ),
                Slot::new(PromptType::Summary, PromptRole::User, defaults::SUMMARY_USER),
                Slot::new(
                    PromptType::Rating,
                    PromptRole::System,
                    defaults::RATING_SYSTEM,
                ),
                Slot::new(PromptType::Rating, PromptRole::User, defaults::RATING_USER),
            ],
        };

        store.refresh().await?;
        Ok(store)
    }

    fn slot(&self, prompt_type: PromptType, role: PromptRole) -> &Slot {
        let index = match (prompt_type, role) {
            (PromptType::Summary, PromptRole::System) => 0,
            (PromptType::Summary, PromptRole::User) => 1,
            (PromptType::Rating, PromptRole::System) => 2,
            (PromptType::Rating, PromptRole::User) => 3,
        };
        &self.slots[index]
    }

    fn override_path(&self, prompt_type: PromptType, role: PromptRole) -> PathBuf {
        self.overrides_dir
            .join(prompt_type.as_str())
            .join(format!("{}.txt", role.as_str()))
    }

    fn snapshot_of(&self, slot: &Slot, state: &SlotState) -> PromptSnapshot {
        let file_path = if state.overridden {
            self.override_path(slot.prompt_type, slot.role)
                .display()
                .to_string()
        } else {
            format!("built-in:{}/{}", slot.prompt_type, slot.role)
        };

        PromptSnapshot {
            prompt_type: slot.prompt_type,
            role: slot.role,
            content: state.content.clone(),
            file_path,
            cached: true,
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Reads
    // ────────────────────────────────────────────────────────────────────

    /// Current text of one slot.
    pub async fn content(&self, prompt_type: PromptType, role: PromptRole) -> String {
        self.slot(prompt_type, role)
            .state
            .read()
            .await
            .content
            .clone()
    }

    pub async fn summary_system(&self) -> String {
        self.content(PromptType::Summary, PromptRole::System).await
    }

    pub async fn summary_user(&self) -> String {
        self.content(PromptType::Summary, PromptRole::User).await
    }

    /// Rating system prompt with the scale description substituted in.
    pub async fn rating_system(&self, rating: RatingConfig) -> String {
        self.content(PromptType::Rating, PromptRole::System)
            .await
            .replace("{{rating_range}}", &rating.range_description())
    }

    /// Rating user prompt with the scale placeholders substituted in.
    /// Placeholders the scale does not own pass through untouched.
    pub async fn rating_user(&self, rating: RatingConfig) -> String {
        self.content(PromptType::Rating, PromptRole::User)
            .await
            .replace("{{rating_range}}", &rating.range_description())
            .replace("{{max_rating}}", &rating.max.to_string())
    }

    /// Admin view of one slot.
    pub async fn snapshot(&self, prompt_type: PromptType, role: PromptRole) -> PromptSnapshot {
        let slot = self.slot(prompt_type, role);
        let state = slot.state.read().await;
        self.snapshot_of(slot, &state)
    }

    /// Admin view of all four slots, summary templates first.
    pub async fn all(&self) -> Vec<PromptSnapshot> {
        let mut snapshots = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            let state = slot.state.read().await;
            snapshots.push(self.snapshot_of(slot, &state));
        }
        snapshots
    }

    // ────────────────────────────────────────────────────────────────────
    // Mutations
    // ────────────────────────────────────────────────────────────────────

    /// Replaces a slot's text. Persists to the override file first; the
    /// cache only changes after a successful write.
    pub async fn update(
        &self,
        prompt_type: PromptType,
        role: PromptRole,
        content: &str,
    ) -> Result<PromptSnapshot, PromptError> {
        if content.trim().is_empty() {
            return Err(PromptError::EmptyContent);
        }

        let slot = self.slot(prompt_type, role);
        let path = self.override_path(prompt_type, role);

        let mut state = slot.state.write().await;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, content).await?;
        state.content = content.to_string();
        state.overridden = true;

        info!(
            "Updated {prompt_type}/{role} prompt ({} chars)",
            content.len()
        );

        Ok(self.snapshot_of(slot, &state))
    }

    /// Restores a slot to its built-in default, deleting the override file
    /// if one exists.
    pub async fn reset(
        &self,
        prompt_type: PromptType,
        role: PromptRole,
    ) -> Result<PromptSnapshot, PromptError> {
        let slot = self.slot(prompt_type, role);
        let path = self.override_path(prompt_type, role);

        let mut state = slot.state.write().await;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(PromptError::Io(e)),
        }
        state.content = slot.default_text.to_string();
        state.overridden = false;

        info!("Reset {prompt_type}/{role} prompt to built-in default");

        Ok(self.snapshot_of(slot, &state))
    }

    /// Reloads every slot from storage: override file when present, built-in
    /// default otherwise. Picks up out-of-band edits to override files.
    pub async fn refresh(&self) -> Result<(), PromptError> {
        for slot in &self.slots {
            let path = self.override_path(slot.prompt_type, slot.role);
            let (content, overridden) = match tokio::fs::read_to_string(&path).await {
                Ok(text) => (text, true),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    (slot.default_text.to_string(), false)
                }
                Err(e) => return Err(PromptError::Io(e)),
            };

            let mut state = slot.state.write().await;
            state.content = content;
            state.overridden = overridden;
        }

        debug!("Prompt cache refreshed from storage");
        Ok(())
    }
}
