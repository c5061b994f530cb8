//! CLI configuration loaded with figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. `<config dir>/monoboard/monoboard.toml`
//! 3. `./monoboard.toml`
//! 4. `MONOBOARD_*` environment variables
//! 5. Command line overrides

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "monoboard.toml";
const ENV_PREFIX: &str = "MONOBOARD_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding `monoboard-data.json`
    pub data_dir: PathBuf,
    /// Where `project export` writes by default
    pub export_dir: PathBuf,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("monoboard"),
            export_dir: PathBuf::from("."),
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Defaults, config files and environment, in that order
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = dirs::config_dir() {
            figment = figment.merge(Toml::file(dir.join("monoboard").join(CONFIG_FILE_NAME)));
        }
        figment
            .merge(Toml::file(CONFIG_FILE_NAME))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extract a config, then apply the `--data-dir` override
    pub fn from_figment(
        figment: Figment,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, Box<figment::Error>> {
        let mut config: Self = figment.extract().map_err(Box::new)?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        Ok(config)
    }

    /// Load from every source. A broken source yields the defaults (still with
    /// the override) together with the error, so the caller can warn once
    /// logging is up.
    pub fn load(data_dir: Option<PathBuf>) -> (Self, Option<Box<figment::Error>>) {
        match Self::from_figment(Self::figment(), data_dir.clone()) {
            Ok(config) => (config, None),
            Err(e) => {
                let mut config = Self::default();
                if let Some(dir) = data_dir {
                    config.data_dir = dir;
                }
                (config, Some(e))
            }
        }
    }
}
