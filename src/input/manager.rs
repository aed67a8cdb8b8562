//! Input manager for profiles, job offers and free text

use crate::error::{MatcherError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    JsonTextExtractor, MarkdownExtractor, PlainTextExtractor, TextExtractor,
};
use crate::model::{CandidateProfile, JobOffer};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Keys under which a batch file may wrap its list of offers.
const JOB_LIST_KEYS: &[&str] = &["job_offers", "jobs"];

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a JSON document as an untyped value.
    pub async fn load_json(&mut self, path: &Path) -> Result<Value> {
        if FileType::from_path(path) != FileType::Json {
            return Err(MatcherError::UnsupportedFormat(format!(
                "Expected a .json file: {}",
                path.display()
            )));
        }

        let content = self.read_cached(path).await?;
        let value = serde_json::from_str(&content)?;
        Ok(value)
    }

    pub async fn load_profile(&mut self, path: &Path) -> Result<CandidateProfile> {
        let value = self.load_json(path).await?;
        let profile = CandidateProfile::deserialize(&value)?;
        Ok(profile)
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<JobOffer> {
        let value = self.load_json(path).await?;
        let job = JobOffer::deserialize(&value)?;
        Ok(job)
    }

    /// Raw offers of a batch file: a JSON array, or an object wrapping one
    /// under `job_offers` or `jobs`.
    pub async fn load_job_values(&mut self, path: &Path) -> Result<Vec<Value>> {
        let value = self.load_json(path).await?;

        let list = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => JOB_LIST_KEYS
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::Array(items)) => Some(items),
                    _ => None,
                })
                .ok_or_else(|| {
                    MatcherError::InvalidInput(format!(
                        "No list of job offers found in {}",
                        path.display()
                    ))
                })?,
            _ => {
                return Err(MatcherError::InvalidInput(format!(
                    "Expected a list of job offers in {}",
                    path.display()
                )))
            }
        };

        debug!("Loaded {} job offers from {}", list.len(), path.display());
        Ok(list)
    }

    /// Typed offers of a batch file; any malformed offer fails the whole load.
    pub async fn load_jobs(&mut self, path: &Path) -> Result<Vec<JobOffer>> {
        self.load_job_values(path)
            .await?
            .iter()
            .map(|value| JobOffer::deserialize(value).map_err(MatcherError::from))
            .collect()
    }

    /// Free text for skills analysis from a .txt, .md or .json file.
    pub async fn read_text(&mut self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json => {
                info!("Reading text field of JSON file: {}", path.display());
                JsonTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(MatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        Ok(text)
    }

    async fn read_cached(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&path_str) {
                debug!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(MatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).await?;

        if self.enable_cache {
            self.cache.insert(path_str, content.clone());
        }

        Ok(content)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std_fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_profile_and_cache() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "profile.json", r#"{"skills": {"technical": ["Rust"]}}"#);

        let mut manager = InputManager::new();
        let profile = manager.load_profile(&path).await.unwrap();
        assert_eq!(profile.technical_skills(), ["Rust".to_string()]);
        assert_eq!(manager.cache_size(), 1);

        manager.load_profile(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_load_job_values_shapes() {
        let dir = TempDir::new().unwrap();
        let array = write(&dir, "a.json", r#"[{"title": "A"}, {"title": "B"}]"#);
        let wrapped = write(&dir, "b.json", r#"{"job_offers": [{"title": "A"}]}"#);
        let scalar = write(&dir, "c.json", r#""offre""#);

        let mut manager = InputManager::new().with_cache(false);
        assert_eq!(manager.load_job_values(&array).await.unwrap().len(), 2);
        assert_eq!(manager.load_job_values(&wrapped).await.unwrap().len(), 1);
        assert!(manager.load_job_values(&scalar).await.is_err());
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_load_jobs_rejects_malformed_offer() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "jobs.json", r#"[{"title": "A"}, {"required_skills": "sql"}]"#);

        let mut manager = InputManager::new();
        assert!(matches!(
            manager.load_jobs(&path).await,
            Err(MatcherError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_inputs() {
        let dir = TempDir::new().unwrap();
        let pdf = write(&dir, "cv.pdf", "%PDF");

        let mut manager = InputManager::new();
        assert!(matches!(
            manager.read_text(&pdf).await,
            Err(MatcherError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            manager.load_json(&pdf).await,
            Err(MatcherError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            manager.read_text(&dir.path().join("absent.txt")).await,
            Err(MatcherError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_read_markdown_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "offre.md", "## Profil\n\nMaîtrise de *Docker*\n");

        let text = InputManager::new().read_text(&path).await.unwrap();
        assert_eq!(text, "Profil\nMaîtrise de Docker");
    }
}
