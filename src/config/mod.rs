use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{LeaseError, Result},
    lease::{Frequency, PaymentMethod},
};

pub const DEFAULT_TERMINATION_REASON: &str = "Early Termination";

const DEFAULT_DIR_NAME: &str = ".lease_core";
const HOME_ENV: &str = "LEASE_CORE_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_frequency: Frequency,
    pub default_payment_method: PaymentMethod,
    pub termination_reason: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_frequency: Frequency::Month,
            default_payment_method: PaymentMethod::Cash,
            termination_reason: DEFAULT_TERMINATION_REASON.into(),
        }
    }
}

impl Config {
    /// Updates a single setting by name, as the CLI `config set` command does.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "default_frequency" => self.default_frequency = value.parse()?,
            "default_payment_method" => self.default_payment_method = value.parse()?,
            "termination_reason" => self.termination_reason = non_empty(key, value)?,
            other => {
                return Err(LeaseError::Config(format!("unknown setting `{other}`")));
            }
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(LeaseError::Config(format!("`{key}` cannot be empty")));
    }
    Ok(value.to_string())
}

/// Returns the application data directory, defaulting to `~/.lease_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and saves [`Config`] as pretty JSON inside the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
