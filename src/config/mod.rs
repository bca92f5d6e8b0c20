use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::LedgerError,
    utils::{ensure_dir, PathResolver},
};
use crate::domain::{Category, Labelled, PaymentMode};

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set_value`].
pub const CONFIG_KEYS: [&str; 4] = [
    "currency_symbol",
    "default_payment_mode",
    "default_category",
    "chart_width",
];

/// User preferences for the expense shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub currency_symbol: String,
    pub default_payment_mode: PaymentMode,
    pub default_category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_width: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
            default_payment_mode: PaymentMode::Cash,
            default_category: Category::Food,
            chart_width: None,
        }
    }
}

impl Config {
    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    /// Updates a single preference from its textual form.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(LedgerError::Config("currency_symbol must not be empty".into()));
                }
                self.currency_symbol = value.to_string();
            }
            "default_payment_mode" => {
                self.default_payment_mode = PaymentMode::parse_label(value)
                    .map_err(|err| LedgerError::Config(err.to_string()))?;
            }
            "default_category" => {
                self.default_category = Category::parse_label(value)
                    .map_err(|err| LedgerError::Config(err.to_string()))?;
            }
            "chart_width" => {
                self.chart_width = if value.eq_ignore_ascii_case("auto") {
                    None
                } else {
                    let width: u16 = value.parse().map_err(|_| {
                        LedgerError::Config(format!(
                            "chart_width must be a number or `auto`, got `{}`",
                            value
                        ))
                    })?;
                    if width < 20 {
                        return Err(LedgerError::Config("chart_width must be at least 20".into()));
                    }
                    Some(width)
                };
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown key `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            (
                "default_payment_mode",
                self.default_payment_mode.label().to_string(),
            ),
            ("default_category", self.default_category.label().to_string()),
            (
                "chart_width",
                self.chart_width
                    .map(|width| width.to_string())
                    .unwrap_or_else(|| "auto".into()),
            ),
        ]
    }
}

/// Loads and saves [`Config`] under the application data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                LedgerError::Config(format!("`{}`: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
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

fn write_file(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
