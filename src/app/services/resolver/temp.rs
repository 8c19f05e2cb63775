//! First-level cloud data of upper-air reports
//!
//! TEMP part B section 8 repeats the surface cloud observation made at launch
//! time. It uses the same code tables as the SYNOP section 1 cloud fields but has
//! no layer groups, so records above the first level are ignored.

use super::clouds::{apply_cloud_type, cloud_amount_field};
use super::{Resolution, ResolutionStats};
use crate::app::models::temp::{TempCloudReport, TempSection};
use crate::app::models::{ObservationClass, ObservationRecord};
use crate::app::services::encoders::height_to_h;
use tracing::{debug, trace};

/// Stateful resolver for one TEMP section 8
#[derive(Debug, Default)]
pub struct TempCloudResolver {
    report: TempCloudReport,
    stats: ResolutionStats,
}

impl TempCloudResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the next record of the sounding's sequence
    pub fn resolve(&mut self, record: &ObservationRecord) -> Resolution {
        let outcome = match record.class() {
            None => Resolution::UnknownCode,
            Some(_) if record.layer_index != 0 => Resolution::Ignored,
            Some(class) => self.resolve_class(class, record),
        };

        if outcome == Resolution::Applied {
            self.report.mark(TempSection::Clouds);
        }
        trace!("TEMP descriptor {} -> {:?}", record.code, outcome);
        self.stats.record(outcome);
        outcome
    }

    fn resolve_class(&mut self, class: ObservationClass, record: &ObservationRecord) -> Resolution {
        if !class.is_layered() {
            return Resolution::Ignored;
        }
        if !record.has_value() {
            return Resolution::Missing;
        }

        let written = match class {
            ObservationClass::CloudAmount => match cloud_amount_field(record.int_value) {
                Some(amount) => self.report.nh.fill(amount),
                None => {
                    debug!("Cloud amount value {} outside code table", record.int_value);
                    return Resolution::OutOfRange;
                }
            },
            ObservationClass::CloudType => {
                return apply_cloud_type(&mut self.report, record.int_value);
            }
            _ => self.report.h.fill(height_to_h(record.real_value)),
        };

        if written {
            Resolution::Applied
        } else {
            Resolution::SlotConflict
        }
    }

    pub fn report(&self) -> &TempCloudReport {
        &self.report
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    /// Freeze the section and hand it off
    pub fn finish(self) -> (TempCloudReport, ResolutionStats) {
        (self.report, self.stats)
    }
}
