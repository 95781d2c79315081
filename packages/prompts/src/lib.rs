// ABOUTME: Centralized prompt management for the brokerage workflows
// ABOUTME: Type-safe prompt lookup, output schemas, and parameter substitution from JSON prompt files

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Prompt files compiled into the binary, overridable from disk
const EMBEDDED_PROMPTS: [(&str, &str); 4] = [
    (
        "system/concierge.json",
        include_str!("../system/concierge.json"),
    ),
    (
        "marketing/listing_suite.json",
        include_str!("../marketing/listing_suite.json"),
    ),
    (
        "vision/room_analysis.json",
        include_str!("../vision/room_analysis.json"),
    ),
    (
        "hunter/propensity.json",
        include_str!("../hunter/propensity.json"),
    ),
];

/// Category subdirectories scanned in an override directory
const CATEGORIES: [&str; 4] = ["system", "marketing", "vision", "hunter"];

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Prompt {0} declares no output schema")]
    NoOutputSchema(String),

    #[error("Failed to read prompt file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse prompt JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid prompt format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub version: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub category: String,
    pub template: String,
    pub parameters: Vec<String>,
    #[serde(rename = "outputSchema", skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PromptMetadata>,
}

#[derive(Debug, Clone)]
pub struct PromptManager {
    prompts_dir: Option<PathBuf>,
    prompts: HashMap<String, Prompt>,
}

impl PromptManager {
    /// Create a PromptManager from the embedded catalog
    ///
    /// If prompts_dir is given, any prompt file found under its category
    /// subdirectories replaces the embedded prompt with the same id.
    pub fn new(prompts_dir: Option<PathBuf>) -> Result<Self, PromptError> {
        let mut manager = Self::embedded()?;

        if let Some(dir) = prompts_dir {
            let mut overridden = 0;
            for category in CATEGORIES {
                let category_dir = dir.join(category);
                if !category_dir.exists() {
                    continue;
                }
                for entry in fs::read_dir(&category_dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|s| s.to_str()) != Some("json") {
                        continue;
                    }
                    let prompt = Self::load_prompt_from_path(&path)?;
                    debug!("Loaded prompt override {} from {}", prompt.id, path.display());
                    manager.prompts.insert(prompt.id.clone(), prompt);
                    overridden += 1;
                }
            }
            info!("Loaded {} prompt override(s) from {}", overridden, dir.display());
            manager.prompts_dir = Some(dir);
        }

        Ok(manager)
    }

    /// Create a PromptManager holding only the embedded catalog
    pub fn embedded() -> Result<Self, PromptError> {
        let mut prompts = HashMap::new();
        for (origin, content) in EMBEDDED_PROMPTS {
            let prompt = Self::parse_prompt(content, origin)?;
            prompts.insert(prompt.id.clone(), prompt);
        }

        Ok(Self {
            prompts_dir: None,
            prompts,
        })
    }

    /// Override directory in use, if any
    pub fn prompts_dir(&self) -> Option<&Path> {
        self.prompts_dir.as_deref()
    }

    /// Get a prompt by ID with parameter substitution
    pub fn get_prompt(&self, prompt_id: &str, parameters: &[(&str, &str)]) -> Result<String, PromptError> {
        let prompt = self.load_prompt(prompt_id)?;

        // Always validate required parameters, even if empty list provided
        self.substitute_parameters(&prompt.template, parameters, &prompt.parameters)
    }

    /// Get a system prompt by ID
    pub fn get_system_prompt(&self, prompt_id: &str) -> Result<String, PromptError> {
        let prompt = self.load_prompt(prompt_id)?;
        if prompt.category != "system" {
            return Err(PromptError::NotFound(format!("system/{}", prompt_id)));
        }
        Ok(prompt.template.clone())
    }

    /// Get the response schema a prompt asks the model to follow
    pub fn get_output_schema(&self, prompt_id: &str) -> Result<serde_json::Value, PromptError> {
        self.load_prompt(prompt_id)?
            .output_schema
            .clone()
            .ok_or_else(|| PromptError::NoOutputSchema(prompt_id.to_string()))
    }

    /// List all prompt ids in a category
    pub fn list_prompts(&self, category: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .prompts
            .values()
            .filter(|p| p.category == category)
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Substitute parameters in a template
    ///
    /// Replacement is single-pass so substituted values are never re-expanded.
    fn substitute_parameters(
        &self,
        template: &str,
        parameters: &[(&str, &str)],
        required_params: &[String],
    ) -> Result<String, PromptError> {
        // Check all required parameters are provided
        let param_map: HashMap<&str, &str> = parameters.iter().copied().collect();

        for required in required_params {
            if !param_map.contains_key(required.as_str()) {
                return Err(PromptError::MissingParameter(required.clone()));
            }
        }

        // Replace {{parameter}} with values
        let mut result = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match after_open.find("}}") {
                Some(end) => {
                    let key = &after_open[..end];
                    match param_map.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push_str("{{");
                            result.push_str(key);
                            result.push_str("}}");
                        }
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        result.push_str(rest);

        Ok(result)
    }

    fn load_prompt(&self, prompt_id: &str) -> Result<&Prompt, PromptError> {
        self.prompts
            .get(prompt_id)
            .ok_or_else(|| PromptError::NotFound(prompt_id.to_string()))
    }

    /// Load a prompt from a specific file path
    fn load_prompt_from_path(path: &Path) -> Result<Prompt, PromptError> {
        let content = fs::read_to_string(path)?;
        Self::parse_prompt(&content, &path.display().to_string())
    }

    fn parse_prompt(content: &str, origin: &str) -> Result<Prompt, PromptError> {
        let prompt: Prompt = serde_json::from_str(content)?;

        // Basic validation
        if prompt.id.is_empty() || prompt.template.is_empty() || prompt.category.is_empty() {
            return Err(PromptError::InvalidFormat(format!(
                "Invalid prompt format in {}",
                origin
            )));
        }

        Ok(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_system_prompt() {
        let manager = PromptManager::embedded().unwrap();
        let prompt = manager.get_system_prompt("concierge").unwrap();
        assert!(prompt.contains("Bionic Brokerage AI Concierge"));
        assert!(prompt.contains("qualifyLead"));
    }

    #[test]
    fn test_non_system_prompt_is_not_a_system_prompt() {
        let manager = PromptManager::embedded().unwrap();
        let result = manager.get_system_prompt("listing_suite");
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }

    #[test]
    fn test_load_prompt_with_parameters() {
        let manager = PromptManager::embedded().unwrap();
        let prompt = manager
            .get_prompt("listing_suite", &[("notes", "4 bed, ocean view")])
            .unwrap();
        assert_eq!(
            prompt,
            "Transform these raw real estate notes into a professional marketing suite: 4 bed, ocean view"
        );
    }

    #[test]
    fn test_substituted_values_are_not_reexpanded() {
        let manager = PromptManager::embedded().unwrap();
        let prompt = manager
            .get_prompt("propensity", &[("count", "{{leads}}"), ("leads", "[]")])
            .unwrap();
        assert!(prompt.contains("Analyze these {{leads}} homeowners"));
        assert!(prompt.contains("Leads Data: []"));
    }

    #[test]
    fn test_missing_parameter_error() {
        let manager = PromptManager::embedded().unwrap();
        let result = manager.get_prompt("propensity", &[("count", "10")]);
        assert!(matches!(result, Err(PromptError::MissingParameter(p)) if p == "leads"));
    }

    #[test]
    fn test_prompt_not_found() {
        let manager = PromptManager::embedded().unwrap();
        let result = manager.get_prompt("nonexistent", &[]);
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }

    #[test]
    fn test_output_schemas() {
        let manager = PromptManager::embedded().unwrap();

        let listing = manager.get_output_schema("listing_suite").unwrap();
        assert_eq!(listing["type"], "OBJECT");
        assert_eq!(listing["properties"]["flyerPoints"]["maxItems"], 3);

        let ranking = manager.get_output_schema("propensity").unwrap();
        assert_eq!(ranking["type"], "ARRAY");
        assert_eq!(
            ranking["items"]["properties"]["category"]["enum"],
            serde_json::json!(["Hot", "Warm"])
        );

        let missing = manager.get_output_schema("concierge");
        assert!(matches!(missing, Err(PromptError::NoOutputSchema(_))));
    }

    #[test]
    fn test_list_prompts() {
        let manager = PromptManager::embedded().unwrap();
        assert_eq!(manager.list_prompts("system"), vec!["concierge".to_string()]);
        assert_eq!(manager.list_prompts("hunter"), vec!["propensity".to_string()]);
        assert!(manager.list_prompts("unknown").is_empty());
    }

    #[test]
    fn test_override_directory_replaces_embedded_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let system_dir = dir.path().join("system");
        fs::create_dir_all(&system_dir).unwrap();
        fs::write(
            system_dir.join("concierge.json"),
            r#"{
                "id": "concierge",
                "name": "Test Concierge",
                "category": "system",
                "template": "You are a test concierge.",
                "parameters": []
            }"#,
        )
        .unwrap();

        let manager = PromptManager::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(
            manager.get_system_prompt("concierge").unwrap(),
            "You are a test concierge."
        );
        assert_eq!(manager.prompts_dir(), Some(dir.path()));

        // Untouched prompts still come from the embedded catalog
        assert!(manager.get_output_schema("room_analysis").is_ok());
    }

    #[test]
    fn test_override_with_invalid_prompt_fails() {
        let dir = tempfile::tempdir().unwrap();
        let vision_dir = dir.path().join("vision");
        fs::create_dir_all(&vision_dir).unwrap();
        fs::write(
            vision_dir.join("broken.json"),
            r#"{"id": "", "name": "x", "category": "vision", "template": "t", "parameters": []}"#,
        )
        .unwrap();

        let result = PromptManager::new(Some(dir.path().to_path_buf()));
        assert!(matches!(result, Err(PromptError::InvalidFormat(_))));
    }
}
