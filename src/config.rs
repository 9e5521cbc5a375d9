use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENDPOINT_ENV: &str = "AZURE_VISION_ENDPOINT";
pub const KEY_ENV: &str = "AZURE_VISION_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vision_endpoint: Option<String>,
    pub vision_key: Option<String>,
    pub bind: String,
    pub port: u16,
    /// 未設定ならタイムアウトなし
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_endpoint: None,
            vision_key: None,
            bind: "127.0.0.1".into(),
            port: 8050,
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("maize-dashboard").join("config.json"))
    }

    /// エンドポイント（環境変数を優先）
    pub fn endpoint(&self) -> Option<String> {
        env_or(ENDPOINT_ENV, self.vision_endpoint.as_deref())
    }

    /// APIキー（環境変数を優先）
    pub fn api_key(&self) -> Option<String> {
        env_or(KEY_ENV, self.vision_key.as_deref())
    }

    pub fn set_endpoint(&mut self, endpoint: String) -> Result<()> {
        self.vision_endpoint = Some(endpoint);
        self.save()
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.vision_key = Some(key);
        self.save()
    }
}

fn env_or(name: &str, fallback: Option<&str>) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.map(str::to_string))
}
