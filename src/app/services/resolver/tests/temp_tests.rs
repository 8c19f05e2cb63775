//! Tests for TEMP part B cloud data

use super::*;
use crate::app::models::temp::TempSection;
use crate::app::services::resolver::{Resolution, TempCloudResolver};

#[test]
fn test_first_level_cloud_group() {
    let mut resolver = TempCloudResolver::new();

    resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 7));
    resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 33));
    resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 27));
    resolver.resolve(&measured(descriptors::CLOUD_BASE_HEIGHT, 400.0));

    let (report, stats) = resolver.finish();
    assert_eq!(report.nh.code(), Some("7"));
    assert_eq!(report.cl.code(), Some("3"));
    assert_eq!(report.cm.code(), Some("7"));
    assert!(!report.ch.is_set());
    assert_eq!(report.h.code(), Some("4"));
    assert!(report.contains(TempSection::Clouds));
    assert_eq!(stats.applied, 4);
}

#[test]
fn test_upper_levels_ignored() {
    let mut resolver = TempCloudResolver::new();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 7).with_layer(2)),
        Resolution::Ignored
    );
    assert!(!resolver.report().nh.is_set());
    assert!(!resolver.report().contains(TempSection::Clouds));
}

#[test]
fn test_sky_not_visible_overrides_amount() {
    let mut resolver = TempCloudResolver::new();

    resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 2));
    resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 59));

    assert!(resolver.report().nh.is_indeterminate());
}

#[test]
fn test_surface_only_descriptors_ignored() {
    let mut resolver = TempCloudResolver::new();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::PRESENT_WEATHER, 61)),
        Resolution::Ignored
    );
    assert_eq!(
        resolver.resolve(&precipitation(-3600, 1.0)),
        Resolution::Ignored
    );
    let unknown = ObservationRecord::new(DescriptorCode::element(12, 101), 280.0);
    assert_eq!(resolver.resolve(&unknown), Resolution::UnknownCode);
    assert_eq!(resolver.stats().records, 3);
}

#[test]
fn test_missing_and_conflicting_values() {
    let mut resolver = TempCloudResolver::new();

    assert_eq!(
        resolver.resolve(&missing(descriptors::CLOUD_AMOUNT)),
        Resolution::Missing
    );
    resolver.resolve(&measured(descriptors::CLOUD_BASE_HEIGHT, 120.0));
    assert_eq!(
        resolver.resolve(&measured(descriptors::CLOUD_BASE_HEIGHT, 2200.0)),
        Resolution::SlotConflict
    );
    assert_eq!(resolver.report().h.code(), Some("2"));
}
