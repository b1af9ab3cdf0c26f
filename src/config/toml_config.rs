use crate::core::manager::{ManagerSettings, UpdatePolicy};
use crate::core::searching::SearchAlgorithm;
use crate::core::sorting::SortAlgorithm;
use crate::core::ConfigProvider;
use crate::domain::model::{SortKey, SortOrder};
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_SNAPSHOT_PATH: &str = "roster.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    pub roster: RosterSection,
    pub defaults: Option<DefaultsConfig>,
    pub update: Option<UpdateConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSection {
    pub name: String,
    pub snapshot_path: Option<String>,
}

impl Default for RosterSection {
    fn default() -> Self {
        Self {
            name: "roster".to_string(),
            snapshot_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub sort_algorithm: Option<String>,
    pub sort_key: Option<String>,
    pub sort_order: Option<String>,
    pub search_algorithm: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateConfig {
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RosterError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("roster.name", &self.roster.name)?;
        if let Some(path) = &self.roster.snapshot_path {
            validate_path("roster.snapshot_path", path)?;
        }

        if let Some(defaults) = &self.defaults {
            check_parses::<SortAlgorithm>("defaults.sort_algorithm", &defaults.sort_algorithm)?;
            check_parses::<SortKey>("defaults.sort_key", &defaults.sort_key)?;
            check_parses::<SortOrder>("defaults.sort_order", &defaults.sort_order)?;
            check_parses::<SearchAlgorithm>(
                "defaults.search_algorithm",
                &defaults.search_algorithm,
            )?;
        }

        if let Some(update) = &self.update {
            check_parses::<UpdatePolicy>("update.policy", &update.policy)?;
        }

        Ok(())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn manager_settings(&self) -> ManagerSettings {
        ManagerSettings::from_provider(self)
    }

    fn default_value<T: FromStr>(&self, pick: impl Fn(&DefaultsConfig) -> Option<&String>) -> Option<T> {
        self.defaults
            .as_ref()
            .and_then(pick)
            .and_then(|value| value.parse().ok())
    }
}

fn check_parses<T>(field: &str, value: &Option<String>) -> Result<()>
where
    T: FromStr<Err = RosterError>,
{
    match value {
        Some(raw) => raw.parse::<T>().map(|_| ()).map_err(|e| RosterError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.clone(),
            reason: e.recovery_suggestion(),
        }),
        None => Ok(()),
    }
}

impl ConfigProvider for RosterConfig {
    fn snapshot_path(&self) -> &str {
        self.roster
            .snapshot_path
            .as_deref()
            .unwrap_or(DEFAULT_SNAPSHOT_PATH)
    }

    fn update_policy(&self) -> UpdatePolicy {
        self.update
            .as_ref()
            .and_then(|u| u.policy.as_deref())
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    fn sort_algorithm(&self) -> SortAlgorithm {
        self.default_value(|d| d.sort_algorithm.as_ref())
            .unwrap_or(ManagerSettings::default().sort_algorithm)
    }

    fn sort_key(&self) -> SortKey {
        self.default_value(|d| d.sort_key.as_ref())
            .unwrap_or(ManagerSettings::default().sort_key)
    }

    fn sort_order(&self) -> SortOrder {
        self.default_value(|d| d.sort_order.as_ref()).unwrap_or_default()
    }

    fn search_algorithm(&self) -> SearchAlgorithm {
        self.default_value(|d| d.search_algorithm.as_ref())
            .unwrap_or(ManagerSettings::default().search_algorithm)
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
