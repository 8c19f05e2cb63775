//! Present and past weather (0 20 003, 0 20 004, 0 20 005)
//!
//! Manned-station codes (ww 0-99, W 0-9) are copied as they are and mark the
//! station as manned; automatic-station codes (ww 100-199, W 10-19) are reduced
//! to the manned range and mark the station as automatic. The values meaning
//! "no significant weather" leave the report alone and raise a side flag.

use super::{DescriptorHandler, Resolution, ResolutionContext};
use crate::app::models::ObservationRecord;
use crate::app::models::report::{Code, Field, Section, StationOperation, SynopReport};
use crate::app::services::encoders::{DIGIT_WIDTH, PAIR_WIDTH};
use crate::constants::{past_weather, present_weather};
use tracing::{debug, trace};

/// Weather fields of section 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherField {
    /// ww
    Present,
    /// W1
    Past1,
    /// W2
    Past2,
}

impl WeatherField {
    fn field_mut(self, report: &mut SynopReport) -> &mut Field {
        match self {
            Self::Present => &mut report.surface.ww,
            Self::Past1 => &mut report.surface.w1,
            Self::Past2 => &mut report.surface.w2,
        }
    }
}

/// 0 20 003
#[derive(Debug)]
pub struct PresentWeather;

/// 0 20 004 and 0 20 005
#[derive(Debug)]
pub struct PastWeather {
    field: WeatherField,
}

pub static PRESENT_WEATHER: PresentWeather = PresentWeather;
pub static PAST_WEATHER_1: PastWeather = PastWeather {
    field: WeatherField::Past1,
};
pub static PAST_WEATHER_2: PastWeather = PastWeather {
    field: WeatherField::Past2,
};

impl DescriptorHandler for PresentWeather {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            context.state.flag_all_weather();
            return Resolution::Missing;
        }

        let value = record.int_value;
        match value {
            0..=present_weather::MANNED_MAX => write_weather(
                context.report,
                WeatherField::Present,
                Code::digits(value as u32, PAIR_WIDTH),
                StationOperation::ManualIncluded,
            ),
            present_weather::AUTOMATIC_NO_SIGNIFICANT => {
                context.state.no_significant_ww = true;
                set_station_operation(
                    context.report,
                    StationOperation::AutomaticIncludedAutoCodes,
                );
                Resolution::Applied
            }
            101..=present_weather::AUTOMATIC_MAX => write_weather(
                context.report,
                WeatherField::Present,
                Code::digits((value % 100) as u32, PAIR_WIDTH),
                StationOperation::AutomaticIncludedAutoCodes,
            ),
            present_weather::NO_SIGNIFICANT_ANY => {
                context.state.flag_all_weather();
                set_station_operation(
                    context.report,
                    StationOperation::AutomaticIncludedAutoCodes,
                );
                Resolution::Applied
            }
            _ => {
                debug!("Present weather value {} outside code table, ignoring", value);
                Resolution::OutOfRange
            }
        }
    }
}

impl DescriptorHandler for PastWeather {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            self.flag(context);
            return Resolution::Missing;
        }

        let value = record.int_value;
        match value {
            0..=past_weather::MANNED_MAX => write_weather(
                context.report,
                self.field,
                Code::digits(value as u32, DIGIT_WIDTH),
                StationOperation::ManualIncluded,
            ),
            past_weather::AUTOMATIC_NO_SIGNIFICANT => {
                self.flag(context);
                Resolution::Applied
            }
            11..=past_weather::AUTOMATIC_MAX => write_weather(
                context.report,
                self.field,
                Code::digits((value % 10) as u32, DIGIT_WIDTH),
                StationOperation::AutomaticIncludedAutoCodes,
            ),
            _ => {
                debug!("Past weather value {} outside code table, ignoring", value);
                Resolution::OutOfRange
            }
        }
    }
}

impl PastWeather {
    fn flag(&self, context: &mut ResolutionContext<'_>) {
        match self.field {
            WeatherField::Past2 => context.state.no_significant_w2 = true,
            _ => context.state.no_significant_w1 = true,
        }
    }
}

/// Write a weather code (first writer wins) and record the station operation
fn write_weather(
    report: &mut SynopReport,
    field: WeatherField,
    code: Code,
    operation: StationOperation,
) -> Resolution {
    if !field.field_mut(report).fill(code.into()) {
        debug!("{:?} weather already set, keeping first value", field);
        return Resolution::SlotConflict;
    }

    set_station_operation(report, operation);
    report.mark(Section::Surface);
    trace!("{:?} weather stored", field);
    Resolution::Applied
}

/// Set ix unless it already says the weather group is included
///
/// An ix demoted by the insignificant-weather pass is set again, so a later
/// significant code restores the weather group.
fn set_station_operation(report: &mut SynopReport, operation: StationOperation) {
    if report.surface.ix.is_none_or(is_demoted) {
        report.surface.ix = Some(operation);
        report.mark(Section::Surface);
    }
}

fn is_demoted(operation: StationOperation) -> bool {
    matches!(
        operation,
        StationOperation::ManualOmittedNoPhenomena | StationOperation::AutomaticOmittedNoPhenomena
    )
}
