//! Serializable backtest configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! config:
//!
//! ```toml
//! [backtest]
//! holding_days = 5
//! initial_capital = 100000.0
//! start_date = "2020-06-01"
//! end_date = "2025-06-01"
//!
//! [strategy]
//! type = "consensus"
//! members = [{ type = "rsi_reversal" }, { type = "macd", fast = 8 }]
//!
//! [data]
//! dir = "data"
//! synthetic = false
//!
//! [batch]
//! parallel = true
//! cagr_thresholds = [12.0, 16.0, 20.0]
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use holdlab_core::data::{CsvDirectoryProvider, PriceProvider, SyntheticProvider};
use holdlab_core::engine::SimulationConfig;
use holdlab_core::signals::{
    Breakout52Week, Consensus, MaCrossover, Macd, RsiReversal, SignalSource, VolumeSpike,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown strategy '{0}' (expected one of: {names})", names = STRATEGY_NAMES)]
    UnknownStrategy(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

const STRATEGY_NAMES: &str = "breakout_52w, ma_crossover, rsi_reversal, volume_spike, macd, consensus:<a>,<b>,...";

/// Top-level backtest configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestConfig {
    pub backtest: BacktestSection,
    pub strategy: StrategyConfig,
    pub data: DataSection,
    pub batch: BatchSection,
}

/// `[backtest]`: simulation parameters and the requested window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestSection {
    pub holding_days: usize,
    pub initial_capital: f64,
    /// Inclusive.
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
}

impl Default for BacktestSection {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            holding_days: defaults.holding_period,
            initial_capital: defaults.initial_capital,
            start_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// `[data]`: where prices come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding `<SYMBOL>.csv` files.
    pub dir: PathBuf,
    /// Generate deterministic random walks instead of reading files.
    pub synthetic: bool,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            synthetic: false,
        }
    }
}

/// `[batch]`: multi-symbol behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchSection {
    pub parallel: bool,
    /// CAGR cutoffs in percent; a symbol lands in every bucket it exceeds.
    pub cagr_thresholds: Vec<f64>,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            parallel: true,
            cagr_thresholds: vec![12.0, 16.0, 20.0],
        }
    }
}

/// Signal source configuration (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    #[serde(rename = "breakout_52w")]
    Breakout52Week {
        #[serde(default = "default_lookback")]
        lookback: usize,
    },
    MaCrossover {
        #[serde(default = "default_short_window")]
        short_window: usize,
        #[serde(default = "default_long_window")]
        long_window: usize,
    },
    RsiReversal {
        #[serde(default = "default_rsi_period")]
        period: usize,
        #[serde(default = "default_rsi_lower")]
        lower: f64,
        #[serde(default = "default_rsi_upper")]
        upper: f64,
    },
    VolumeSpike {
        #[serde(default = "default_volume_window")]
        window: usize,
        #[serde(default = "default_volume_threshold")]
        threshold: f64,
    },
    Macd {
        #[serde(default = "default_macd_fast")]
        fast: usize,
        #[serde(default = "default_macd_slow")]
        slow: usize,
        #[serde(default = "default_macd_signal")]
        signal: usize,
    },
    /// Sum of member signals per date, clamped to [−1, +1].
    Consensus { members: Vec<StrategyConfig> },
}

fn default_lookback() -> usize {
    252
}
fn default_short_window() -> usize {
    50
}
fn default_long_window() -> usize {
    200
}
fn default_rsi_period() -> usize {
    14
}
fn default_rsi_lower() -> f64 {
    30.0
}
fn default_rsi_upper() -> f64 {
    70.0
}
fn default_volume_window() -> usize {
    20
}
fn default_volume_threshold() -> f64 {
    2.0
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Breakout52Week {
            lookback: default_lookback(),
        }
    }
}

impl StrategyConfig {
    /// Default-parameter config for a single named strategy.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let config = match name.trim() {
            "breakout_52w" | "breakout" => Self::Breakout52Week {
                lookback: default_lookback(),
            },
            "ma_crossover" => Self::MaCrossover {
                short_window: default_short_window(),
                long_window: default_long_window(),
            },
            "rsi_reversal" | "rsi" => Self::RsiReversal {
                period: default_rsi_period(),
                lower: default_rsi_lower(),
                upper: default_rsi_upper(),
            },
            "volume_spike" => Self::VolumeSpike {
                window: default_volume_window(),
                threshold: default_volume_threshold(),
            },
            "macd" => Self::Macd {
                fast: default_macd_fast(),
                slow: default_macd_slow(),
                signal: default_macd_signal(),
            },
            other => return Err(ConfigError::UnknownStrategy(other.to_string())),
        };
        Ok(config)
    }

    /// Short stable label, e.g. `macd` or `consensus(rsi_reversal+macd)`.
    pub fn label(&self) -> String {
        match self {
            Self::Breakout52Week { .. } => "breakout_52w".into(),
            Self::MaCrossover { .. } => "ma_crossover".into(),
            Self::RsiReversal { .. } => "rsi_reversal".into(),
            Self::VolumeSpike { .. } => "volume_spike".into(),
            Self::Macd { .. } => "macd".into(),
            Self::Consensus { members } => {
                let names: Vec<String> = members.iter().map(|m| m.label()).collect();
                format!("consensus({})", names.join("+"))
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        match *self {
            Self::Breakout52Week { lookback } if lookback == 0 => {
                invalid("breakout_52w: lookback must be >= 1".into())
            }
            Self::MaCrossover {
                short_window,
                long_window,
            } if short_window == 0 || short_window >= long_window => invalid(format!(
                "ma_crossover: need 1 <= short_window < long_window, got {short_window}/{long_window}"
            )),
            Self::RsiReversal {
                period,
                lower,
                upper,
            } if period == 0 || !(lower < upper) => invalid(format!(
                "rsi_reversal: need period >= 1 and lower < upper, got {period}, {lower}/{upper}"
            )),
            Self::VolumeSpike { window, threshold }
                if window == 0 || !(threshold > 0.0 && threshold.is_finite()) =>
            {
                invalid(format!(
                    "volume_spike: need window >= 1 and a positive threshold, got {window}, {threshold}"
                ))
            }
            Self::Macd { fast, slow, signal } if fast == 0 || signal == 0 || fast >= slow => {
                invalid(format!(
                    "macd: need 1 <= fast < slow and signal >= 1, got {fast}/{slow}/{signal}"
                ))
            }
            Self::Consensus { ref members } => {
                if members.is_empty() {
                    return invalid("consensus: needs at least one member".into());
                }
                members.iter().try_for_each(|m| m.validate())
            }
            _ => Ok(()),
        }
    }

    /// Instantiate the signal source. Validates first.
    pub fn build(&self) -> Result<Box<dyn SignalSource>, ConfigError> {
        self.validate()?;
        Ok(self.build_validated())
    }

    fn build_validated(&self) -> Box<dyn SignalSource> {
        match *self {
            Self::Breakout52Week { lookback } => Box::new(Breakout52Week::new(lookback)),
            Self::MaCrossover {
                short_window,
                long_window,
            } => Box::new(MaCrossover::new(short_window, long_window)),
            Self::RsiReversal {
                period,
                lower,
                upper,
            } => Box::new(RsiReversal::new(period, lower, upper)),
            Self::VolumeSpike { window, threshold } => Box::new(VolumeSpike::new(window, threshold)),
            Self::Macd { fast, slow, signal } => Box::new(Macd::new(fast, slow, signal)),
            Self::Consensus { ref members } => Box::new(Consensus::new(
                members.iter().map(|m| m.build_validated()).collect(),
            )),
        }
    }
}

/// Parses `name` or `consensus:<name>,<name>,...`.
impl FromStr for StrategyConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once(':') {
            Some(("consensus", members)) => {
                let members = members
                    .split(',')
                    .filter(|m| !m.trim().is_empty())
                    .map(Self::from_name)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Consensus { members })
            }
            Some(_) => Err(ConfigError::UnknownStrategy(s.to_string())),
            None => Self::from_name(s),
        }
    }
}

impl BacktestConfig {
    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject contract violations before any data is loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.backtest;
        if b.holding_days == 0 {
            return Err(ConfigError::Invalid("holding_days must be >= 1".into()));
        }
        if !b.initial_capital.is_finite() || b.initial_capital <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_capital must be finite and positive, got {}",
                b.initial_capital
            )));
        }
        if b.start_date >= b.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} must be before end_date {}",
                b.start_date, b.end_date
            )));
        }
        if let Some(t) = self
            .batch
            .cagr_thresholds
            .iter()
            .find(|t| !t.is_finite() || **t < 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "cagr_thresholds must be finite and non-negative, got {t}"
            )));
        }
        self.strategy.validate()
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig::new(self.backtest.holding_days, self.backtest.initial_capital)
    }

    /// Price provider selected by the `[data]` section.
    pub fn provider(&self) -> Box<dyn PriceProvider> {
        if self.data.synthetic {
            Box::new(SyntheticProvider::default())
        } else {
            Box::new(CsvDirectoryProvider::new(self.data.dir.clone()))
        }
    }

    /// Content hash of the configuration (16 hex chars).
    ///
    /// Identical configs share a fingerprint; it names artifact directories.
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string(self)?;
        let hash = blake3::hash(json.as_bytes());
        Ok(hash.to_hex()[..16].to_string())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
