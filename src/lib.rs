//! SYNOP Resolver Library
//!
//! The field-resolution layer of a BUFR to SYNOP/TEMP report encoder. It consumes
//! already-decoded observation values, one at a time and in message order, and folds
//! them into an in-memory report whose leaf fields are fixed-width WMO code groups.
//!
//! This library provides tools for:
//! - Encoding physical quantities (precipitation, cloud cover, cloud base, visibility)
//!   into code-table strings
//! - Resolving each decoded descriptor into the report field it affects, applying
//!   first-writer-wins and WMO precedence rules
//! - Running the cross-field consistency passes of the report form
//! - Resolving many independent reports concurrently
//!
//! # Example
//!
//! ```rust
//! use synop_resolver::app::models::{DescriptorCode, ObservationRecord};
//! use synop_resolver::app::models::report::{Section, WindowKind};
//! use synop_resolver::app::services::resolver::resolve_report;
//! use synop_resolver::config::ResolverConfig;
//!
//! let precipitation = DescriptorCode::new(0, 13, 11);
//! let records = vec![
//!     ObservationRecord::new(precipitation, 0.05).with_time_significance(-3600),
//!     ObservationRecord::new(precipitation, 2.3).with_time_significance(-10800),
//! ];
//!
//! let resolved = resolve_report(records, &ResolverConfig::default());
//! let hourly = &resolved.report.precipitation.hourly;
//! assert_eq!(hourly.occupied_by(), Some(WindowKind::OneHour));
//! assert_eq!(hourly.amount(), Some("990"));
//! assert!(resolved.report.sections.contains(Section::IntermediatePrecipitation));
//! ```

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod batch;
        pub mod encoders;
        pub mod resolver;
    }
    pub mod adapters {
        pub mod record_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::report::SynopReport;
pub use app::models::{DescriptorCode, ObservationRecord, Subset};
pub use config::Config;

/// Result type alias for the resolver
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the edges of the resolver (configuration, input, task management)
///
/// Descriptor resolution itself is total and never fails; its non-fatal outcomes are
/// reported through [`app::services::resolver::Resolution`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Descriptor text could not be parsed as F XX YYY
    #[error("Invalid descriptor '{text}': {message}")]
    InvalidDescriptor { text: String, message: String },

    /// Code string does not match the width its code table requires
    #[error("Invalid code '{code}': expected {expected} characters")]
    CodeWidth { code: String, expected: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A resolution task panicked or was cancelled
    #[error("Resolution task failed: {message}")]
    TaskJoin {
        message: String,
        #[source]
        source: tokio::task::JoinError,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid descriptor error
    pub fn invalid_descriptor(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a code width error
    pub fn code_width(code: impl Into<String>, expected: usize) -> Self {
        Self::CodeWidth {
            code: code.into(),
            expected,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a task join error
    pub fn task_join(message: impl Into<String>, source: tokio::task::JoinError) -> Self {
        Self::TaskJoin {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}
