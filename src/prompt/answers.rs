use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;

/// Answers of keyed prompts from previous runs, persisted as JSON.
#[derive(Debug, Clone)]
pub struct AnswerStore {
    path: Utf8PathBuf,
    answers: IndexMap<String, String>,
}

impl AnswerStore {
    /// Load the store at `path`; a missing file starts an empty store.
    pub fn load<P: AsRef<Utf8Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let answers = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read saved answers: {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse saved answers: {}", path))?
        } else {
            IndexMap::new()
        };

        Ok(Self { path, answers })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    /// Record an answer and write the store to disk.
    pub fn remember(&mut self, key: &str, value: &str) -> Result<()> {
        if self.get(key) == Some(value) {
            return Ok(());
        }

        self.answers.insert(key.to_string(), value.to_string());
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.answers)
            .context("Failed to serialize saved answers")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write saved answers: {}", self.path))?;

        tracing::debug!("Saved answers to {}", self.path);
        Ok(())
    }
}
