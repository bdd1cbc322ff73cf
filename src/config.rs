use chrono::NaiveDate;
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub planner: PlannerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Dish catalog CSV
    pub input: PathBuf,
    pub days: u32,
    /// Fixed seed for reproducible plans; derived from the clock when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// First planned date; today when absent
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_plan_path")]
    pub plan: PathBuf,
    #[serde(default = "default_shop_path")]
    pub shop: PathBuf,
    #[serde(default = "default_html_path")]
    pub html: PathBuf,
    /// Optional JSON dump of the full plan
    #[serde(default)]
    pub json: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plan: default_plan_path(),
            shop: default_shop_path(),
            html: default_html_path(),
            json: None,
        }
    }
}

fn default_plan_path() -> PathBuf {
    PathBuf::from("meal_plan.csv")
}

fn default_shop_path() -> PathBuf {
    PathBuf::from("shopping_list.csv")
}

fn default_html_path() -> PathBuf {
    PathBuf::from("meal_plan_report.html")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DINNERPLAN__PLANNER__DAYS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("planner.input", "dishes.csv")?
            .set_default("planner.days", 28)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("DINNERPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    ///
    /// Planner values are checked once command-line flags are merged over them.
    pub fn validate(&self) -> Result<(), String> {
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        Ok(())
    }
}
