use crate::connect::ConnectMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Editor session settings. Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub playback: PlaybackConfig,
    pub connect_mode: ConnectMode,
    pub canvas: CanvasConfig,
    /// Display hint for renderers: coloured vertices vs. black and white.
    pub show_colors: bool,
    /// Seeds vertex placement and colours. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            connect_mode: ConnectMode::default(),
            canvas: CanvasConfig::default(),
            show_colors: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { interval_ms: 600 }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Area new vertices are placed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 30.0,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| Error::InvalidConfig {
            message: e.to_string(),
        })
    }

    /// Deep-merges a (possibly partial) JSON object onto this configuration.
    pub fn with_overrides(self, overrides: &Value) -> Result<Self> {
        let mut base = self.to_value()?;
        deep_merge_value(&mut base, overrides);
        Self::from_value(base)
    }

    fn validate(&self) -> Result<()> {
        let c = &self.canvas;
        let dims_ok = c.width.is_finite() && c.height.is_finite() && c.margin.is_finite();
        if !dims_ok || c.margin < 0.0 || c.width <= 2.0 * c.margin || c.height <= 2.0 * c.margin
        {
            return Err(Error::InvalidConfig {
                message: format!(
                    "canvas {}x{} leaves no room inside a margin of {}",
                    c.width, c.height, c.margin
                ),
            });
        }
        Ok(())
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
