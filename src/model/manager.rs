//! Download and cache management for generation models

use crate::config::AvailableModel;
use crate::error::{JobInsightError, Result};
use hf_hub::api::tokio::Api;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;

/// Files every usable model directory must contain
const MODEL_FILES: &[&str] = &["config.json", "tokenizer.json", "model.safetensors"];

/// Manages the local model store under the configured models directory
pub struct ModelManager {
    models_dir: PathBuf,
    registry: Vec<AvailableModel>,
    downloaded: HashSet<String>,
    api: Api,
}

impl ModelManager {
    pub async fn new(models_dir: PathBuf, registry: Vec<AvailableModel>) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                JobInsightError::Model(format!("Failed to create models directory: {}", e))
            })?;
        }

        let api = Api::new()
            .map_err(|e| JobInsightError::Model(format!("Failed to initialize HF API: {}", e)))?;

        let mut manager = Self {
            models_dir,
            registry,
            downloaded: HashSet::new(),
            api,
        };
        manager.scan_downloaded().await?;
        Ok(manager)
    }

    /// Refresh the set of models already present on disk
    async fn scan_downloaded(&mut self) -> Result<()> {
        self.downloaded.clear();
        for model in &self.registry {
            let dir = self.models_dir.join(&model.name);
            let complete = MODEL_FILES.iter().all(|f| dir.join(f).exists());
            if complete {
                self.downloaded.insert(model.name.clone());
            }
        }
        log::debug!("Found {} downloaded models", self.downloaded.len());
        Ok(())
    }

    pub fn list_available(&self) -> &[AvailableModel] {
        &self.registry
    }

    pub fn is_downloaded(&self, name: &str) -> bool {
        self.downloaded.contains(name)
    }

    pub fn model_path(&self, name: &str) -> Option<PathBuf> {
        if self.is_downloaded(name) {
            Some(self.models_dir.join(name))
        } else {
            None
        }
    }

    /// Download a registered model's files from the Hugging Face Hub into
    /// the local store
    pub async fn download(&mut self, name: &str) -> Result<PathBuf> {
        let model = self
            .registry
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| JobInsightError::ModelNotFound(name.to_string()))?
            .clone();

        let target_dir = self.models_dir.join(&model.name);
        fs::create_dir_all(&target_dir).await?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .expect("Invalid progress template"),
        );
        spinner.set_message(format!("Downloading {} ({} MB)", model.name, model.size_mb));

        let repo = self.api.model(model.repo_id.clone());
        for file in MODEL_FILES {
            spinner.set_message(format!("Downloading {}: {}", model.name, file));
            let cached = repo.get(file).await.map_err(|e| {
                JobInsightError::Model(format!(
                    "Failed to download {} from {}: {}",
                    file, model.repo_id, e
                ))
            })?;
            fs::copy(&cached, target_dir.join(file)).await?;
        }
        spinner.finish_with_message(format!("Downloaded {}", model.name));

        self.downloaded.insert(model.name.clone());
        Ok(target_dir)
    }

    /// Remove a model from the local store
    pub async fn remove(&mut self, name: &str) -> Result<()> {
        let dir = self.models_dir.join(name);
        if !dir.exists() {
            return Err(JobInsightError::ModelNotFound(name.to_string()));
        }
        fs::remove_dir_all(&dir).await?;
        self.downloaded.remove(name);
        Ok(())
    }

    /// Prefer the requested default, then any downloaded model, then the
    /// first registry entry (which will need a download)
    pub fn auto_select(&self, default_name: &str) -> Result<String> {
        if self.registry.iter().any(|m| m.name == default_name) {
            return Ok(default_name.to_string());
        }
        if let Some(name) = self.downloaded.iter().next() {
            return Ok(name.clone());
        }
        self.registry
            .first()
            .map(|m| m.name.clone())
            .ok_or_else(|| JobInsightError::Model("Model registry is empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_scan_and_selection() {
        let temp = tempfile::tempdir().unwrap();
        let registry = Config::default().models.available_models;
        let manager = ModelManager::new(temp.path().to_path_buf(), registry)
            .await
            .unwrap();

        assert!(!manager.is_downloaded("flan-t5-base"));
        assert!(manager.model_path("flan-t5-base").is_none());
        assert_eq!(manager.auto_select("flan-t5-base").unwrap(), "flan-t5-base");
    }

    #[tokio::test]
    async fn test_downloaded_model_detected() {
        let temp = tempfile::tempdir().unwrap();
        let registry = Config::default().models.available_models;

        let model_dir = temp.path().join("flan-t5-small");
        std::fs::create_dir_all(&model_dir).unwrap();
        for file in MODEL_FILES {
            std::fs::write(model_dir.join(file), b"stub").unwrap();
        }

        let manager = ModelManager::new(temp.path().to_path_buf(), registry)
            .await
            .unwrap();
        assert!(manager.is_downloaded("flan-t5-small"));
        assert!(manager.model_path("flan-t5-small").is_some());
    }
}
