//! Tests for present and past weather and the ix indicator

use super::*;
use crate::app::models::report::{Section, StationOperation};
use crate::app::services::resolver::Resolution;

#[test]
fn test_manned_present_weather_copied() {
    let resolved = resolve(&[phenomenon(descriptors::PRESENT_WEATHER, 61)]);
    let surface = &resolved.report.surface;

    assert_eq!(surface.ww.code(), Some("61"));
    assert_eq!(surface.ix, Some(StationOperation::ManualIncluded));
    assert!(resolved.report.sections.contains(Section::Surface));
}

#[test]
fn test_automatic_present_weather_reduced() {
    let resolved = resolve(&[phenomenon(descriptors::PRESENT_WEATHER, 161)]);
    let surface = &resolved.report.surface;

    assert_eq!(surface.ww.code(), Some("61"));
    assert_eq!(surface.ix, Some(StationOperation::AutomaticIncludedAutoCodes));
}

#[test]
fn test_automatic_no_significant_weather_clears_and_demotes() {
    let resolved = resolve(&[phenomenon(descriptors::PRESENT_WEATHER, 100)]);
    let surface = &resolved.report.surface;

    assert!(!surface.ww.is_set());
    assert!(!surface.w1.is_set());
    assert!(!surface.w2.is_set());
    assert_eq!(surface.ix, Some(StationOperation::AutomaticOmittedNoPhenomena));
    assert!(!surface.ix.is_some_and(StationOperation::includes_weather));
    assert!(resolved.state.no_significant_ww);
}

#[test]
fn test_no_significant_weather_of_any_kind_omits_group() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PRESENT_WEATHER, 508)),
        Resolution::Applied
    );
    assert!(resolver.state().no_significant_weather());
    let surface = &resolver.report().surface;
    assert!(!surface.ww.is_set());
    assert_eq!(surface.ix, Some(StationOperation::AutomaticOmittedNoPhenomena));
    assert!(resolver.report().sections.contains(Section::Surface));
}

#[test]
fn test_missing_present_weather_omits_group() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&missing(descriptors::PRESENT_WEATHER)),
        Resolution::Missing
    );
    assert!(resolver.state().no_significant_weather());
    assert_eq!(
        resolver.report().surface.ix,
        Some(StationOperation::ManualOmittedNoPhenomena)
    );
}

#[test]
fn test_significant_weather_after_missing_restores_ix() {
    let resolved = resolve(&[
        missing(descriptors::PRESENT_WEATHER),
        phenomenon(descriptors::PAST_WEATHER_1, 6),
    ]);
    let surface = &resolved.report.surface;

    assert_eq!(surface.w1.code(), Some("6"));
    assert_eq!(surface.ix, Some(StationOperation::ManualIncluded));
}

#[test]
fn test_missing_past_weather_alone_leaves_ix_unset() {
    let resolved = resolve(&[missing(descriptors::PAST_WEATHER_1)]);

    assert!(resolved.state.no_significant_w1);
    assert_eq!(resolved.report.surface.ix, None);
}

#[test]
fn test_unreported_weather_kept_unset_when_suppression_disabled() {
    let config = ResolverConfig::default().keeping_insignificant_weather();
    let resolved = resolve_report(&[missing(descriptors::PRESENT_WEATHER)], &config);

    assert!(resolved.state.no_significant_weather());
    assert_eq!(resolved.report.surface.ix, None);
}

#[test]
fn test_past_weather_codes() {
    let resolved = resolve(&[
        phenomenon(descriptors::PAST_WEATHER_1, 6),
        phenomenon(descriptors::PAST_WEATHER_2, 18),
    ]);
    let surface = &resolved.report.surface;

    assert_eq!(surface.w1.code(), Some("6"));
    assert_eq!(surface.w2.code(), Some("8"));
    // The first writer decides the station type
    assert_eq!(surface.ix, Some(StationOperation::ManualIncluded));
}

#[test]
fn test_past_weather_no_significant_flags_only_its_field() {
    let mut resolver = resolver();

    resolver.resolve(&phenomenon(descriptors::PAST_WEATHER_2, 10));
    resolver.resolve(&missing(descriptors::PAST_WEATHER_1));

    let state = resolver.state();
    assert!(state.no_significant_w1);
    assert!(state.no_significant_w2);
    assert!(!state.no_significant_ww);
}

#[test]
fn test_weather_first_writer_wins() {
    let mut resolver = resolver();

    resolver.resolve(&phenomenon(descriptors::PRESENT_WEATHER, 71));
    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PRESENT_WEATHER, 95)),
        Resolution::SlotConflict
    );
    assert_eq!(resolver.report().surface.ww.code(), Some("71"));
}

#[test]
fn test_weather_out_of_range() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PRESENT_WEATHER, 250)),
        Resolution::OutOfRange
    );
    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PAST_WEATHER_1, 20)),
        Resolution::OutOfRange
    );
    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PAST_WEATHER_1, -1)),
        Resolution::OutOfRange
    );
    assert_eq!(resolver.stats().out_of_range, 3);
}

#[test]
fn test_significant_code_restores_demoted_indicator() {
    let resolved = resolve(&[
        phenomenon(descriptors::PRESENT_WEATHER, 2),
        phenomenon(descriptors::PAST_WEATHER_1, 5),
    ]);
    let surface = &resolved.report.surface;

    // ww 02 was omitted before the significant W1 arrived
    assert!(!surface.ww.is_set());
    assert_eq!(surface.w1.code(), Some("5"));
    assert_eq!(surface.ix, Some(StationOperation::ManualIncluded));
}
