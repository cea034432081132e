//! Claim system configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "max_area": 4096, "border": { "interval_ticks": 20 } }
//! ```

use claim_core::MAX_CLAIM_AREA;
use claim_store::DEFAULT_CLAIMS_KEY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse claim config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("border spacing must be positive, got {0}")]
    Spacing(i32),

    #[error("LOD thresholds must satisfy 0 <= near <= far, got near={near} far={far}")]
    Thresholds { near: f64, far: f64 },

    #[error("{0} must be positive")]
    NotPositive(&'static str),
}

/// Top-level claim settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimConfig {
    /// Largest allowed `(maxX - minX) * (maxZ - minZ)`.
    pub max_area: i64,
    /// Item that places selection points when activated.
    pub tool_item: String,
    /// Store key holding the claim document.
    pub storage_key: String,
    pub border: BorderConfig,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            max_area: MAX_CLAIM_AREA,
            tool_item: "minecraft:stick".to_string(),
            storage_key: DEFAULT_CLAIMS_KEY.to_string(),
            border: BorderConfig::default(),
        }
    }
}

impl ClaimConfig {
    /// Parse a JSON config, filling missing fields with defaults.
    ///
    /// # Errors
    /// Returns an error if the JSON is invalid or the values fail [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_area <= 0 {
            return Err(ConfigError::NotPositive("max_area"));
        }
        self.border.validate()
    }
}

/// Border rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Players further than this from a claim's bounds do not see its border.
    pub render_distance: f64,
    /// Engine ticks between render passes.
    pub interval_ticks: u64,
    /// Particle spawned for each border marker.
    pub particle: String,
    pub lod: LodConfig,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            render_distance: 64.0,
            interval_ticks: 10,
            particle: "minecraft:basic_flame_particle".to_string(),
            lod: LodConfig::default(),
        }
    }
}

impl BorderConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.render_distance > 0.0) {
            return Err(ConfigError::NotPositive("border.render_distance"));
        }
        if self.interval_ticks == 0 {
            return Err(ConfigError::NotPositive("border.interval_ticks"));
        }
        self.lod.validate()
    }
}

/// Distance-based marker spacing.
///
/// ```text
///   dist < near          → near_spacing
///   near <= dist < far   → mid_spacing
///   far <= dist          → far_spacing
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    pub near: f64,
    pub far: f64,
    pub near_spacing: i32,
    pub mid_spacing: i32,
    pub far_spacing: i32,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            near: 32.0,
            far: 48.0,
            near_spacing: 2,
            mid_spacing: 4,
            far_spacing: 6,
        }
    }
}

impl LodConfig {
    /// Marker spacing for an observer at LOD distance `dist`.
    #[must_use]
    pub fn spacing(&self, dist: f64) -> i32 {
        if dist < self.near {
            self.near_spacing
        } else if dist < self.far {
            self.mid_spacing
        } else {
            self.far_spacing
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for spacing in [self.near_spacing, self.mid_spacing, self.far_spacing] {
            if spacing <= 0 {
                return Err(ConfigError::Spacing(spacing));
            }
        }
        if !(self.near >= 0.0 && self.near <= self.far) {
            return Err(ConfigError::Thresholds {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}
