use crate::domain::query::Query;
use crate::utils::error::{PlayError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "playfinder.toml";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_MODEL: &str = "gemini-pro";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recommender: RecommenderConfig,
    pub search: SearchConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_seconds: Option<u64>,
    /// 在提示中加入隨機情境與種子，讓重複查詢得到不同排序
    pub diversify: bool,
    pub generation: GenerationConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: Some(30),
            diversify: true,
            generation: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_age: i64,
    pub default_minutes: i64,
    /// 「今日遊戲」對應的活動 id
    pub featured_id: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_age: crate::domain::query::DEFAULT_AGE,
            default_minutes: crate::domain::query::DEFAULT_MINUTES,
            featured_id: "5".to_string(),
        }
    }
}

impl SearchConfig {
    /// 今日遊戲查詢；年齡/時間帶入設定的預設值，作為 AI 排序的背景
    pub fn featured_query(&self) -> Query {
        Query::new(self.default_age, self.default_minutes)
            .with_featured_id(Some(self.featured_id.clone()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub key_file: Option<PathBuf>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlayError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        Ok(toml::from_str(&processed_content)?)
    }

    /// 明確指定的檔案必須存在；未指定時預設檔不存在就用內建值
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match explicit_path {
            Some(path) => {
                tracing::debug!("Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    tracing::debug!("Loading configuration from: {}", default_path.display());
                    Self::from_file(default_path)
                } else {
                    tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// 替換環境變數 (例如 ${GEMINI_API_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlayError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 憑證檔位置：設定值優先，其次是平台的本機資料目錄
    pub fn key_file_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.storage.key_file {
            return Ok(path.clone());
        }

        dirs::data_local_dir()
            .map(|dir| dir.join("playfinder").join("credentials.toml"))
            .ok_or_else(|| PlayError::MissingConfigError {
                field: "storage.key_file".to_string(),
            })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("recommender.endpoint", &self.recommender.endpoint)?;
        validation::validate_non_empty_string("recommender.model", &self.recommender.model)?;

        if let Some(timeout) = self.recommender.timeout_seconds {
            validation::validate_positive_number(
                "recommender.timeout_seconds",
                u32::try_from(timeout).unwrap_or(u32::MAX),
                1,
            )?;
        }

        let generation = &self.recommender.generation;
        validation::validate_range(
            "recommender.generation.temperature",
            generation.temperature,
            0.0,
            2.0,
        )?;
        validation::validate_positive_number(
            "recommender.generation.max_output_tokens",
            generation.max_output_tokens,
            1,
        )?;
        validation::validate_range("recommender.generation.top_p", generation.top_p, 0.0, 1.0)?;

        validation::validate_range("search.default_age", self.search.default_age, 1, 12)?;
        validation::validate_range(
            "search.default_minutes",
            self.search.default_minutes,
            5,
            60,
        )?;
        validation::validate_non_empty_string("search.featured_id", &self.search.featured_id)?;

        if let Some(path) = &self.storage.key_file {
            validation::validate_path("storage.key_file", &path.to_string_lossy())?;
        }

        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
