use crate::configuration::constants::{defaults, env};
use config::{Config, ConfigError, Environment, File};
use regex::Regex;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

/// Settings consumed by the listener, injected at construction.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub results_dir: PathBuf,
    /// Root against which attachment references are resolved.
    pub pages_dir: PathBuf,
    pub result_page_prefix: String,
    #[serde(default)]
    pub suite_name_override: Option<String>,
    #[serde(default)]
    pub skip_special_pages: bool,
    #[serde(default)]
    pub framework: Option<String>,
    #[serde(default, with = "serde_regex")]
    pub attachment_patterns: Vec<Regex>,
    #[serde(default)]
    pub copy_pages_to: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(defaults::RESULTS_DIR),
            pages_dir: PathBuf::from(defaults::PAGES_DIR),
            result_page_prefix: defaults::RESULT_PAGE_PREFIX.to_owned(),
            suite_name_override: None,
            skip_special_pages: false,
            framework: None,
            attachment_patterns: Vec::new(),
            copy_pages_to: None,
        }
    }
}

impl Settings {
    /// Defaults, then `file` when given, then `ALLURE_*` environment variables.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        config.set_default("results_dir", defaults::RESULTS_DIR)?;
        config.set_default("pages_dir", defaults::PAGES_DIR)?;
        config.set_default("result_page_prefix", defaults::RESULT_PAGE_PREFIX)?;
        config.set_default("skip_special_pages", false)?;
        if let Some(file) = file {
            config.merge(File::from(file))?;
        }
        config.merge(Environment::with_prefix(env::PREFIX))?;

        config.try_into()
    }
}
