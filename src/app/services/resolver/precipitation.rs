//! Precipitation amounts (class 13)
//!
//! 0 13 011 selects its window from the record's time significance; 0 13 019 to
//! 0 13 023 carry a fixed window. Each window belongs to one slot, and a slot
//! keeps the first amount written to it, except that an explicit 12 hour amount
//! replaces a 6 hour one. A 24 hour amount also feeds the daily total.

use super::{DescriptorHandler, Resolution, ResolutionContext};
use crate::app::models::ObservationRecord;
use crate::app::models::report::{Section, SynopReport, WindowKind};
use crate::app::services::encoders::{precipitation_to_rrr, precipitation_to_rrrr};
use tracing::{debug, trace};

/// 0 13 011, window chosen by time significance
#[derive(Debug)]
pub struct TimeSignificantPrecipitation;

/// 0 13 019 .. 0 13 023, window fixed by the descriptor
#[derive(Debug)]
pub struct FixedWindowPrecipitation {
    kind: WindowKind,
}

impl FixedWindowPrecipitation {
    pub const fn new(kind: WindowKind) -> Self {
        Self { kind }
    }
}

pub static TIME_SIGNIFICANT: TimeSignificantPrecipitation = TimeSignificantPrecipitation;
pub static PAST_1H: FixedWindowPrecipitation = FixedWindowPrecipitation::new(WindowKind::OneHour);
pub static PAST_3H: FixedWindowPrecipitation =
    FixedWindowPrecipitation::new(WindowKind::ThreeHours);
pub static PAST_6H: FixedWindowPrecipitation = FixedWindowPrecipitation::new(WindowKind::SixHours);
pub static PAST_12H: FixedWindowPrecipitation =
    FixedWindowPrecipitation::new(WindowKind::TwelveHours);
pub static PAST_24H: FixedWindowPrecipitation =
    FixedWindowPrecipitation::new(WindowKind::TwentyFourHours);

impl DescriptorHandler for TimeSignificantPrecipitation {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        match WindowKind::from_time_significance(record.time_significance) {
            Some(kind) => store_amount(context.report, kind, record.real_value),
            None => {
                debug!(
                    "Precipitation period {}s has no report group, ignoring",
                    record.time_significance
                );
                Resolution::Ignored
            }
        }
    }
}

impl DescriptorHandler for FixedWindowPrecipitation {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }
        store_amount(context.report, self.kind, record.real_value)
    }
}

/// Write an amount for `kind` into its slot and, for 24 hours, the daily total
///
/// The two targets are guarded independently; the record counts as applied if
/// either of them was written.
pub fn store_amount(report: &mut SynopReport, kind: WindowKind, mm: f64) -> Resolution {
    let group = kind.group();

    let slot_written = report
        .precipitation
        .slot_mut(group)
        .occupy(kind, precipitation_to_rrr(mm));
    if slot_written {
        report.mark(group.section());
        trace!("{}h precipitation {} mm stored in {:?} slot", kind.hours(), mm, group);
    } else {
        debug!(
            "{}h precipitation dropped: {:?} slot already holds {:?}",
            kind.hours(),
            group,
            report.precipitation.slot(group).occupied_by()
        );
    }

    let mut total_written = false;
    if kind == WindowKind::TwentyFourHours {
        total_written = report
            .precipitation
            .daily_total
            .fill(precipitation_to_rrrr(mm).into());
        if total_written {
            report.mark(Section::DailyPrecipitation);
        } else {
            debug!("24h precipitation total already set, keeping first value");
        }
    }

    if slot_written || total_written {
        Resolution::Applied
    } else {
        Resolution::SlotConflict
    }
}
