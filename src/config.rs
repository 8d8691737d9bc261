use std::collections::HashMap;
use std::env;
use std::fs;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

// KEY=VALUE config file with env-var fallback per key. The file path
// comes from CONFIG_FILE; a missing or unreadable file falls back to
// environment-only lookups.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn load() -> Self {
        match env::var("CONFIG_FILE") {
            Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
            Err(_) => AppConfig::default(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            match parse_line(line) {
                Ok(Some((key, value))) => {
                    values.insert(key, value);
                }
                Ok(None) => {}
                Err(reason) => {
                    return Err(format!("invalid config line {}: {}", idx + 1, reason));
                }
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }

    pub fn api_url(&self) -> String {
        self.get("SCHEDULER_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}

// Accepts blank lines, # comments, optional `export ` prefixes, and
// single- or double-quoted values.
fn parse_line(line: &str) -> Result<Option<(String, String)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let Some((key, value)) = trimmed.split_once('=') else {
        return Err(format!("expected KEY=VALUE, got {:?}", line));
    };
    let key = key.trim().to_string();
    let mut value = value.trim().to_string();
    if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
    {
        value = value[1..value.len() - 1].to_string();
    }
    Ok(Some((key, value)))
}
