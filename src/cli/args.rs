//! Command-line argument definitions for the SYNOP resolver
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{Config, ResolverConfig};
use crate::constants::MAX_CLOUD_LAYERS_LIMIT;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the SYNOP resolver
///
/// Folds decoded BUFR observation records into SYNOP report fields and lists
/// what each report received.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "synop-resolve",
    version,
    about = "Resolve decoded BUFR observations into SYNOP report fields",
    long_about = "Reads decoded BUFR observation records (one value per CSV row), resolves each \
                  subset into a SYNOP report accumulator using the WMO code tables and precedence \
                  rules, and lists the populated sections of every report together with \
                  resolution statistics."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Resolve observation records from a CSV file
    Resolve(ResolveArgs),
}

/// Arguments for the resolve command
#[derive(Debug, Clone, Parser)]
pub struct ResolveArgs {
    /// CSV file of decoded observation records
    ///
    /// Header: subset,descriptor,value,missing,time_significance,layer. The last
    /// three columns are optional. Consecutive rows with the same subset form one report.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "CSV file of decoded observation records"
    )]
    pub input_path: PathBuf,

    /// Number of reports resolved concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help = "Number of reports resolved concurrently"
    )]
    pub workers: Option<usize>,

    /// Number of cloud layer groups held by each report
    #[arg(
        long = "max-cloud-layers",
        value_name = "N",
        help = "Number of cloud layer groups held by each report"
    )]
    pub max_cloud_layers: Option<usize>,

    /// Leave h unset when the sky is reported clear
    #[arg(
        long = "no-clear-sky-inference",
        help = "Do not derive the cloud base code from a clear sky"
    )]
    pub no_clear_sky_inference: bool,

    /// Keep ww, W1 and W2 even when none of them is significant
    #[arg(
        long = "keep-insignificant-weather",
        help = "Keep insignificant present and past weather codes"
    )]
    pub keep_insignificant_weather: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors and the final statistics. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress report listings and log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl ResolveArgs {
    /// Validate the resolve command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input_path.display()
            )));
        }

        if !self.input_path.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.input_path.display()
            )));
        }

        if let Some(layers) = self.max_cloud_layers {
            if layers == 0 || layers > MAX_CLOUD_LAYERS_LIMIT {
                return Err(Error::configuration(format!(
                    "Cloud layers must be between 1 and {}",
                    MAX_CLOUD_LAYERS_LIMIT
                )));
            }
        }

        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Build the configuration, starting from defaults and applying CLI overrides
    pub fn to_config(&self) -> Config {
        let mut resolver = ResolverConfig::default();
        if let Some(layers) = self.max_cloud_layers {
            resolver = resolver.with_max_cloud_layers(layers);
        }
        if self.no_clear_sky_inference {
            resolver = resolver.without_clear_sky_inference();
        }
        if self.keep_insignificant_weather {
            resolver = resolver.keeping_insignificant_weather();
        }

        let config = Config::default().with_resolver(resolver);
        match self.workers {
            Some(workers) => config.with_workers(workers),
            None => config,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => crate::constants::DEFAULT_LOG_LEVEL,
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
