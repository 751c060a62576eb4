//! Host-supplied editor options.
//!
//! DESIGN
//! ======
//! Every option has a default, so an empty JSON object or an empty
//! environment yields a usable config. Values are validated once at load
//! time; afterwards, out-of-range layer scales are clamped silently.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;
use tracing::warn;

use crate::consts::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_HIT_SPAN, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE,
    DEFAULT_POLYGON_CONNECTION_THRESHOLD, TOUCH_MIN_HIT_WIDTH,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Parse { var: String, value: String },
    #[error("invalid {kind} scale limits: min {min} must be positive and not exceed max {max}")]
    ScaleLimits { kind: &'static str, min: f64, max: f64 },
    #[error("{field} must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive scale range for one layer kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: DEFAULT_MIN_SCALE, max: DEFAULT_MAX_SCALE }
    }
}

impl ScaleLimits {
    /// Clamp `scale` into the range. NaN maps to `min`.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.max(self.min).min(self.max)
    }

    fn validate(&self, kind: &'static str) -> Result<(), ConfigError> {
        let ok = self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max;
        if ok { Ok(()) } else { Err(ConfigError::ScaleLimits { kind, min: self.min, max: self.max }) }
    }
}

/// Numeric options consumed from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Scale range for paint layers.
    pub paint_scale: ScaleLimits,
    /// Scale range for blur/pixelate censor layers.
    pub censor_scale: ScaleLimits,
    /// Distance at which the last polygon vertex snaps onto the first.
    pub polygon_connection_threshold: f64,
    /// Snap hit-span: pixels for axis snapping, degrees for rotation snapping.
    pub hit_span: f64,
    /// Whether the platform is touch-primary.
    pub touch_primary: bool,
    /// Minimum hit width used on touch-primary platforms.
    pub touch_min_hit_width: f64,
    /// Maximum undo operations kept; `0` keeps everything.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            paint_scale: ScaleLimits::default(),
            censor_scale: ScaleLimits::default(),
            polygon_connection_threshold: DEFAULT_POLYGON_CONNECTION_THRESHOLD,
            hit_span: DEFAULT_HIT_SPAN,
            touch_primary: false,
            touch_min_hit_width: TOUCH_MIN_HIT_WIDTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PAINT_MIN_SCALE` / `PAINT_MAX_SCALE`: paint layer scale range
    /// - `PAINT_CENSOR_MIN_SCALE` / `PAINT_CENSOR_MAX_SCALE`: censor layer scale range
    /// - `PAINT_POLYGON_CONNECTION_THRESHOLD`: default 20
    /// - `PAINT_HIT_SPAN`: default 10
    /// - `PAINT_TOUCH_PRIMARY`: `true`/`false`, default false
    /// - `PAINT_TOUCH_MIN_HIT_WIDTH`: default 30
    /// - `PAINT_HISTORY_LIMIT`: default 100
    ///
    /// # Errors
    ///
    /// Returns `Parse` for unparsable values and a validation error for
    /// out-of-range ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => {
                warn!(var = key, error = %e, "ignoring unreadable env var");
                None
            }
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`EditorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let cfg = Self {
            paint_scale: ScaleLimits {
                min: parse_var(&lookup, "PAINT_MIN_SCALE", d.paint_scale.min)?,
                max: parse_var(&lookup, "PAINT_MAX_SCALE", d.paint_scale.max)?,
            },
            censor_scale: ScaleLimits {
                min: parse_var(&lookup, "PAINT_CENSOR_MIN_SCALE", d.censor_scale.min)?,
                max: parse_var(&lookup, "PAINT_CENSOR_MAX_SCALE", d.censor_scale.max)?,
            },
            polygon_connection_threshold: parse_var(
                &lookup,
                "PAINT_POLYGON_CONNECTION_THRESHOLD",
                d.polygon_connection_threshold,
            )?,
            hit_span: parse_var(&lookup, "PAINT_HIT_SPAN", d.hit_span)?,
            touch_primary: parse_var(&lookup, "PAINT_TOUCH_PRIMARY", d.touch_primary)?,
            touch_min_hit_width: parse_var(&lookup, "PAINT_TOUCH_MIN_HIT_WIDTH", d.touch_min_hit_width)?,
            history_limit: parse_var(&lookup, "PAINT_HISTORY_LIMIT", d.history_limit)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON options object. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and a validation error for
    /// out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.paint_scale.validate("paint")?;
        self.censor_scale.validate("censor")?;
        for (field, value) in [
            ("polygon_connection_threshold", self.polygon_connection_threshold),
            ("hit_span", self.hit_span),
            ("touch_min_hit_width", self.touch_min_hit_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Parse { var: var.to_string(), value: raw.clone() }),
    }
}
