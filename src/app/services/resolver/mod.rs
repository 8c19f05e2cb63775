//! Descriptor resolution for SYNOP reports
//!
//! The resolver folds a sequence of decoded observation records into a
//! [`SynopReport`]. Every record is dispatched on its descriptor to a
//! [`DescriptorHandler`], which decides the field it affects, whether an earlier
//! record already owns that field, and which side flags it raises.
//!
//! # Architecture
//!
//! - [`precipitation`] - window-group precipitation amounts (0 13 011 .. 0 13 023)
//! - [`weather`] - present and past weather and the ix indicator (0 20 003 .. 0 20 005)
//! - [`clouds`] - visibility, cloud cover, amount, genus and base height
//! - [`ground`] - state of the ground (0 20 062)
//! - [`consistency`] - cross-field passes evaluated after every record
//! - [`state`] - side-channel flags scoped to one record sequence
//! - [`stats`] - per-report resolution counters
//! - [`temp`] - first-level cloud data of upper-air reports
//!
//! # Ordering
//!
//! Resolution is a strict left-to-right fold: first writer wins for every field
//! unless a precedence rule says otherwise, so the same records in a different
//! order can produce a different report. Independent reports share nothing and
//! can be folded concurrently (see [`crate::app::services::batch`]).
//!
//! # Example Usage
//!
//! ```rust
//! use synop_resolver::app::models::{DescriptorCode, ObservationRecord};
//! use synop_resolver::app::services::resolver::{Resolution, Resolver};
//! use synop_resolver::config::ResolverConfig;
//!
//! let mut resolver = Resolver::new(ResolverConfig::default());
//! let visibility = ObservationRecord::new(DescriptorCode::element(20, 1), 12000.0);
//!
//! assert_eq!(resolver.resolve(&visibility), Resolution::Applied);
//! assert_eq!(resolver.resolve(&visibility), Resolution::SlotConflict);
//!
//! let resolved = resolver.finish();
//! assert_eq!(resolved.report.surface.vv.code(), Some("62"));
//! ```

pub mod clouds;
pub mod consistency;
pub mod ground;
pub mod precipitation;
pub mod state;
pub mod stats;
pub mod temp;
pub mod weather;

#[cfg(test)]
pub mod tests;

use crate::app::models::report::SynopReport;
use crate::app::models::{ObservationClass, ObservationRecord};
use crate::config::ResolverConfig;
use std::borrow::Borrow;
use tracing::{debug, trace};

pub use state::SubsetState;
pub use stats::ResolutionStats;
pub use temp::TempCloudResolver;

/// Outcome of resolving one observation record
///
/// None of these is an error: the resolver is total over its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// The report or the side-channel state was updated
    Applied,
    /// The value was flagged missing; any per-descriptor flag was raised
    Missing,
    /// No handler is registered for the descriptor
    UnknownCode,
    /// The value falls outside every range its code table defines
    OutOfRange,
    /// The target field already holds a value with equal or higher precedence
    SlotConflict,
    /// The record is valid but does not feed this report (e.g. an unsupported window)
    Ignored,
}

/// Mutable state a handler may touch while resolving one record
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    pub report: &'a mut SynopReport,
    pub state: &'a mut SubsetState,
}

/// A handler for one class of element descriptor
pub trait DescriptorHandler: Sync {
    /// Fold one record into the report
    fn resolve(&self, record: &ObservationRecord, context: &mut ResolutionContext<'_>)
    -> Resolution;
}

/// Handler registered for each observation class
pub fn handler_for(class: ObservationClass) -> &'static dyn DescriptorHandler {
    match class {
        ObservationClass::Precipitation => &precipitation::TIME_SIGNIFICANT,
        ObservationClass::PrecipitationPast1h => &precipitation::PAST_1H,
        ObservationClass::PrecipitationPast3h => &precipitation::PAST_3H,
        ObservationClass::PrecipitationPast6h => &precipitation::PAST_6H,
        ObservationClass::PrecipitationPast12h => &precipitation::PAST_12H,
        ObservationClass::PrecipitationPast24h => &precipitation::PAST_24H,
        ObservationClass::HorizontalVisibility => &clouds::VISIBILITY,
        ObservationClass::PresentWeather => &weather::PRESENT_WEATHER,
        ObservationClass::PastWeather1 => &weather::PAST_WEATHER_1,
        ObservationClass::PastWeather2 => &weather::PAST_WEATHER_2,
        ObservationClass::CloudCover => &clouds::CLOUD_COVER,
        ObservationClass::CloudAmount => &clouds::CLOUD_AMOUNT,
        ObservationClass::CloudType => &clouds::CLOUD_TYPE,
        ObservationClass::CloudBaseHeight => &clouds::CLOUD_BASE_HEIGHT,
        ObservationClass::StateOfGround => &ground::STATE_OF_GROUND,
    }
}

/// A report after its record sequence has been exhausted
#[derive(Debug, Clone)]
pub struct ResolvedReport {
    /// The populated accumulator, ready for rendering
    pub report: SynopReport,
    /// Side-channel flags raised while resolving
    pub state: SubsetState,
    /// Counters of resolution outcomes
    pub stats: ResolutionStats,
}

/// Stateful resolver owning one in-progress report
#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
    report: SynopReport,
    state: SubsetState,
    stats: ResolutionStats,
}

impl Resolver {
    /// Create a resolver with an empty report shaped by `config`
    pub fn new(config: ResolverConfig) -> Self {
        let report = SynopReport::new(config.max_cloud_layers);
        Self {
            config,
            report,
            state: SubsetState::default(),
            stats: ResolutionStats::new(),
        }
    }

    /// Resolve the next record of the sequence
    ///
    /// The consistency passes run after the handler, for every record.
    pub fn resolve(&mut self, record: &ObservationRecord) -> Resolution {
        let outcome = match record.class() {
            Some(class) => {
                let mut context = ResolutionContext {
                    report: &mut self.report,
                    state: &mut self.state,
                };
                handler_for(class).resolve(record, &mut context)
            }
            None => {
                debug!("No handler for descriptor {}, ignoring", record.code);
                Resolution::UnknownCode
            }
        };

        consistency::apply(&mut self.report, &self.state, &self.config);

        trace!(
            "Descriptor {} (layer {}, period {}s) -> {:?}",
            record.code, record.layer_index, record.time_significance, outcome
        );
        self.stats.record(outcome);
        outcome
    }

    /// The report as populated so far
    pub fn report(&self) -> &SynopReport {
        &self.report
    }

    /// Side-channel flags raised so far
    pub fn state(&self) -> &SubsetState {
        &self.state
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    /// Freeze the report and hand it off
    pub fn finish(self) -> ResolvedReport {
        debug!("Report resolved: {}", self.stats.summary());
        ResolvedReport {
            report: self.report,
            state: self.state,
            stats: self.stats,
        }
    }
}

/// Fold a complete record sequence into a new report
pub fn resolve_report<I, R>(records: I, config: &ResolverConfig) -> ResolvedReport
where
    I: IntoIterator<Item = R>,
    R: Borrow<ObservationRecord>,
{
    let mut resolver = Resolver::new(config.clone());
    for record in records {
        resolver.resolve(record.borrow());
    }
    resolver.finish()
}
