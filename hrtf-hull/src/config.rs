//! Hull construction parameters
//!
//! [`HullConfig`] can be built in code through [`HullConfigBuilder`] or
//! loaded from a JSON file; missing fields take their defaults.
//!
//! ```
//! use hrtf_hull::HullConfigBuilder;
//!
//! let config = HullConfigBuilder::new()
//!     .max_faces(100_000)
//!     .seed(7)
//!     .build()
//!     .expect("valid config");
//! assert_eq!(config.max_faces, 100_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{HullError, Result};

/// Default ceiling on the number of hull faces
pub const DEFAULT_MAX_FACES: usize = 50_000;

/// Default perturbation bound, as a fraction of each axis's spread
pub const DEFAULT_NOISE_FRACTION: f64 = 1e-7;

/// Default seed for the perturbation generator
pub const DEFAULT_SEED: u64 = 42;

/// Face count from which the visibility scan runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Parameters of a hull construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    /// Construction aborts once an insertion would leave more faces than
    /// this. Dense but legitimate inputs (several thousand directions) may
    /// need it raised.
    pub max_faces: usize,
    /// Each coordinate is offset by a uniform value in
    /// `[-noise_fraction * spread, noise_fraction * spread]`, where `spread`
    /// is the range of that axis over the input.
    pub noise_fraction: f64,
    /// Seed of the perturbation generator
    pub seed: u64,
    /// Minimum face count for the parallel visibility scan
    pub parallel_threshold: usize,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            max_faces: DEFAULT_MAX_FACES,
            noise_fraction: DEFAULT_NOISE_FRACTION,
            seed: DEFAULT_SEED,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl HullConfig {
    /// Check that every field is in range
    pub fn validate(&self) -> Result<()> {
        if self.max_faces < 4 {
            return Err(HullError::InvalidConfig(format!(
                "max_faces must be at least 4 (a tetrahedron), got {}",
                self.max_faces
            )));
        }
        if !self.noise_fraction.is_finite() || self.noise_fraction < 0.0 {
            return Err(HullError::InvalidConfig(format!(
                "noise_fraction must be finite and >= 0, got {}",
                self.noise_fraction
            )));
        }
        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: HullConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Builder for [`HullConfig`]
#[derive(Debug, Clone, Default)]
pub struct HullConfigBuilder {
    cfg: HullConfig,
}

impl HullConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: HullConfig::default(),
        }
    }

    /// Sets the face-count ceiling.
    pub fn max_faces(mut self, v: usize) -> Self {
        self.cfg.max_faces = v;
        self
    }

    /// Sets the perturbation bound relative to each axis's spread.
    pub fn noise_fraction(mut self, v: f64) -> Self {
        self.cfg.noise_fraction = v;
        self
    }

    /// Sets the perturbation seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = v;
        self
    }

    /// Sets the face count from which visibility is tested in parallel.
    pub fn parallel_threshold(mut self, v: usize) -> Self {
        self.cfg.parallel_threshold = v;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<HullConfig> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HullConfig::default();
        assert_eq!(config.max_faces, 50_000);
        assert_eq!(config.noise_fraction, 1e-7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(matches!(
            HullConfigBuilder::new().max_faces(3).build(),
            Err(HullError::InvalidConfig(_))
        ));
        assert!(matches!(
            HullConfigBuilder::new().noise_fraction(-1e-3).build(),
            Err(HullError::InvalidConfig(_))
        ));
        assert!(matches!(
            HullConfigBuilder::new().noise_fraction(f64::NAN).build(),
            Err(HullError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HullConfig = serde_json::from_str(r#"{ "max_faces": 120000 }"#).unwrap();
        assert_eq!(config.max_faces, 120_000);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "hrtf_hull_config_{}.json",
            std::process::id()
        ));
        let config = HullConfigBuilder::new()
            .seed(1234)
            .noise_fraction(1e-6)
            .build()
            .unwrap();

        config.to_file(&path).unwrap();
        let loaded = HullConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }
}
