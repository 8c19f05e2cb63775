//! Cross-field consistency passes
//!
//! The passes are evaluated after every record and are idempotent: running
//! them again on an unchanged report changes nothing.

use super::SubsetState;
use crate::app::models::report::{CloudBase, Field, Section, StationOperation, SynopReport};
use crate::config::ResolverConfig;
use crate::constants::{OKTA_CLEAR_SKY, past_weather, present_weather};
use tracing::trace;

/// Run the passes enabled by `config`
pub fn apply(report: &mut SynopReport, state: &SubsetState, config: &ResolverConfig) {
    if config.infer_clear_sky_height && infer_clear_sky_height(report) {
        trace!("Cloud base set from clear sky");
    }
    if config.suppress_insignificant_weather {
        if suppress_insignificant_weather(report) {
            trace!("Insignificant weather suppressed");
        }
        if omit_unreported_weather(report, state) {
            trace!("Weather group omitted, none reported");
        }
    }
}

/// Mark h as implied by a cloudless sky when it is unset and N is 0
///
/// Returns `true` if the report changed.
pub fn infer_clear_sky_height(report: &mut SynopReport) -> bool {
    let surface = &mut report.surface;
    if surface.h.is_set() || surface.n.code() != Some(OKTA_CLEAR_SKY) {
        return false;
    }
    surface.h = CloudBase::ClearSky;
    true
}

/// Omit ww, W1 and W2 when none of them is significant
///
/// ww below 04 and W below 3 describe no significant weather; the report form
/// omits the whole group instead of coding it, and ix is demoted to its
/// "omitted, no significant phenomena" value. Returns `true` if the report changed.
pub fn suppress_insignificant_weather(report: &mut SynopReport) -> bool {
    let surface = &mut report.surface;

    let insignificant = below(&surface.ww, present_weather::SIGNIFICANT_THRESHOLD)
        && below(&surface.w1, past_weather::SIGNIFICANT_THRESHOLD)
        && below(&surface.w2, past_weather::SIGNIFICANT_THRESHOLD);
    if !insignificant {
        return false;
    }

    let mut changed = surface.ww.is_set() || surface.w1.is_set() || surface.w2.is_set();
    surface.ww.clear();
    surface.w1.clear();
    surface.w2.clear();

    if let Some(operation) = surface.ix {
        let demoted = operation.demoted();
        changed |= demoted != operation;
        surface.ix = Some(demoted);
    }
    changed
}

/// Set ix to "omitted, no significant phenomena" when the message flagged all
/// of ww, W1 and W2 and nothing else decided ix
///
/// A later significant weather code replaces the omitted ix. Returns `true` if
/// the report changed.
pub fn omit_unreported_weather(report: &mut SynopReport, state: &SubsetState) -> bool {
    let surface = &mut report.surface;
    if !state.no_significant_weather()
        || surface.ix.is_some()
        || surface.ww.is_set()
        || surface.w1.is_set()
        || surface.w2.is_set()
    {
        return false;
    }
    surface.ix = Some(StationOperation::ManualOmittedNoPhenomena);
    report.mark(Section::Surface);
    true
}

/// Unset, or a code below the significance threshold
///
/// Codes of equal width compare correctly as text.
fn below(field: &Field, threshold: &str) -> bool {
    match field {
        Field::Unset => true,
        Field::Coded(code) => code.as_str() < threshold,
        Field::Indeterminate => false,
    }
}
