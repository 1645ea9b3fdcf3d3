use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use toml;

#[derive(Debug, Serialize, Deserialize, Default)]
struct SessionData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// Flat key/value store for the signed-in session, kept in a TOML file.
/// This stands in for the browser's local storage: the bearer token lives
/// here and nowhere else.
pub struct SessionStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let session_data: SessionData = toml::from_str(&content)?;
            self.values = session_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session_data = SessionData {
            data: self.values.clone(),
        };
        let content = toml::to_string_pretty(&session_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    // Convenience methods for specific keys
    pub fn user_token(&self) -> Option<&String> {
        self.get("user_token").filter(|t| !t.is_empty())
    }

    pub fn set_user_token(&mut self, token: String) {
        self.set("user_token".to_string(), token);
    }

    pub fn clear_user_token(&mut self) {
        self.remove("user_token");
    }

    pub fn username(&self) -> Option<&String> {
        self.get("username")
    }

    pub fn set_username(&mut self, username: String) {
        self.set("username".to_string(), username);
    }
}
