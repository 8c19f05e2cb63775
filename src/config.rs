//! Configuration management and validation.
//!
//! Provides configuration structures for descriptor resolution and for the
//! concurrent processing of independent reports.

use crate::constants::{DEFAULT_MAX_CLOUD_LAYERS, MAX_CLOUD_LAYERS_LIMIT};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings that shape how observation records are folded into a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Number of cloud layer groups held by each report
    pub max_cloud_layers: usize,

    /// Force h to the clear-sky state when it is unset and N reports no cloud
    pub infer_clear_sky_height: bool,

    /// Clear ww, W1 and W2 (and demote ix) when none of them is significant
    pub suppress_insignificant_weather: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_cloud_layers: DEFAULT_MAX_CLOUD_LAYERS,
            infer_clear_sky_height: true,
            suppress_insignificant_weather: true,
        }
    }
}

impl ResolverConfig {
    /// Set the number of cloud layer groups
    pub fn with_max_cloud_layers(mut self, layers: usize) -> Self {
        self.max_cloud_layers = layers;
        self
    }

    /// Disable the clear-sky cloud base inference
    pub fn without_clear_sky_inference(mut self) -> Self {
        self.infer_clear_sky_height = false;
        self
    }

    /// Keep insignificant weather codes instead of omitting them
    pub fn keeping_insignificant_weather(mut self) -> Self {
        self.suppress_insignificant_weather = false;
        self
    }

    /// Validate resolver settings
    pub fn validate(&self) -> Result<()> {
        if self.max_cloud_layers == 0 || self.max_cloud_layers > MAX_CLOUD_LAYERS_LIMIT {
            return Err(Error::configuration(format!(
                "max_cloud_layers must be between 1 and {}, got {}",
                MAX_CLOUD_LAYERS_LIMIT, self.max_cloud_layers
            )));
        }
        Ok(())
    }
}

/// Settings for resolving batches of independent reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of reports resolved at the same time
    pub parallel_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_workers: num_cpus::get(),
        }
    }
}

impl PerformanceConfig {
    /// Validate performance settings
    pub fn validate(&self) -> Result<()> {
        if self.parallel_workers == 0 {
            return Err(Error::configuration(
                "parallel_workers must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Descriptor resolution settings
    pub resolver: ResolverConfig,

    /// Batch processing settings
    pub performance: PerformanceConfig,
}

impl Config {
    /// Create configuration with custom resolver settings
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.performance.parallel_workers = workers;
        self
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<()> {
        self.resolver.validate()?;
        self.performance.validate()?;
        debug!(
            "Configuration valid: {} cloud layers, {} workers",
            self.resolver.max_cloud_layers, self.performance.parallel_workers
        );
        Ok(())
    }
}
