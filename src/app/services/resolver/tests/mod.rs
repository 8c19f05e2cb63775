//! Test utilities for descriptor resolution
//!
//! Record fixtures and small drivers shared by the resolver test modules.

use crate::app::models::{DescriptorCode, ObservationRecord};
use crate::config::ResolverConfig;
use crate::constants::descriptors;

use super::{ResolvedReport, Resolver, resolve_report};

// Test modules
mod cloud_tests;
mod temp_tests;
mod weather_tests;

/// 0 13 011 with a time significance
pub fn precipitation(seconds: i32, mm: f64) -> ObservationRecord {
    ObservationRecord::new(
        DescriptorCode::element(
            descriptors::CLASS_PRECIPITATION,
            descriptors::TOTAL_PRECIPITATION,
        ),
        mm,
    )
    .with_time_significance(seconds)
}

/// Class 13 descriptor with a fixed window
pub fn fixed_precipitation(y: u16, mm: f64) -> ObservationRecord {
    ObservationRecord::new(
        DescriptorCode::element(descriptors::CLASS_PRECIPITATION, y),
        mm,
    )
}

/// Class 20 code-table value
pub fn phenomenon(y: u16, value: i64) -> ObservationRecord {
    ObservationRecord::from_code_value(
        DescriptorCode::element(descriptors::CLASS_PHENOMENA, y),
        value,
    )
}

/// Class 20 measured value
pub fn measured(y: u16, value: f64) -> ObservationRecord {
    ObservationRecord::new(
        DescriptorCode::element(descriptors::CLASS_PHENOMENA, y),
        value,
    )
}

/// Class 20 value flagged missing
pub fn missing(y: u16) -> ObservationRecord {
    ObservationRecord::missing(DescriptorCode::element(descriptors::CLASS_PHENOMENA, y))
}

/// Resolver with the default configuration
pub fn resolver() -> Resolver {
    Resolver::new(ResolverConfig::default())
}

/// Resolve a full sequence with the default configuration
pub fn resolve(records: &[ObservationRecord]) -> ResolvedReport {
    resolve_report(records, &ResolverConfig::default())
}
