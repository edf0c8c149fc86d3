use crate::core::adapter::UserDetailsMapping;
use crate::core::builder::ReusePolicy;
use crate::core::showcase::Demo;
use crate::core::PartFamily;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_email, validate_non_empty_entries, validate_non_empty_string, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub demos: Vec<Demo>,
    pub order: OrderConfig,
    pub parts: PartsConfig,
    pub builder: BuilderConfig,
    pub comments: CommentsConfig,
    pub accounts: AccountsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    pub customer: String,
    pub email: String,
    /// 船種選擇字串，未知名稱要到下單時才會報錯
    pub ships: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsConfig {
    pub family: PartFamily,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub reuse: ReusePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub spam_markers: Vec<String>,
    pub trim_markers: Vec<String>,
    pub samples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    pub username: String,
    pub password: String,
    /// 目標操作 -> 舊系統欄位
    pub mapping: HashMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            demos: Demo::ALL.to_vec(),
            order: OrderConfig::default(),
            parts: PartsConfig::default(),
            builder: BuilderConfig::default(),
            comments: CommentsConfig::default(),
            accounts: AccountsConfig::default(),
        }
    }
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            customer: "jay".to_string(),
            email: "jay@mail.com".to_string(),
            ships: vec!["whiteship".to_string(), "blackship".to_string()],
        }
    }
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            spam_markers: vec!["http".to_string()],
            trim_markers: vec!["...".to_string()],
            samples: vec![
                "Great write-up on decorators".to_string(),
                "Cheap watches at http://spam.example".to_string(),
                "Thanks... this helped".to_string(),
            ],
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            username: "keesun".to_string(),
            password: "keesun".to_string(),
            mapping: HashMap::from([
                ("username".to_string(), "name".to_string()),
                ("password".to_string(), "password".to_string()),
            ]),
        }
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_EMAIL})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn user_details_mapping(&self) -> Result<UserDetailsMapping> {
        UserDetailsMapping::from_table(&self.accounts.mapping)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("order.customer", &self.order.customer)?;
        validate_email("order.email", &self.order.email)?;
        validate_non_empty_entries("comments.spam_markers", &self.comments.spam_markers)?;
        validate_non_empty_entries("comments.trim_markers", &self.comments.trim_markers)?;
        validate_non_empty_string("accounts.username", &self.accounts.username)?;

        // 對應表不完整時，在啟動階段就失敗
        self.user_details_mapping()?;

        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
