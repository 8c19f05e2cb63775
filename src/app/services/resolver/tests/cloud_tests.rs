//! Tests for visibility and cloud descriptors, including layer routing

use super::*;
use crate::app::models::report::{Field, Section};
use crate::app::services::resolver::Resolution;
use crate::app::services::resolver::clouds::{CloudTier, CloudTypeReading, read_cloud_type};
use proptest::prelude::*;

#[test]
fn test_visibility_encoded() {
    let resolved = resolve(&[measured(descriptors::HORIZONTAL_VISIBILITY, 4000.0)]);
    assert_eq!(resolved.report.surface.vv.code(), Some("40"));
}

#[test]
fn test_total_cloud_cover_encoded() {
    let resolved = resolve(&[measured(descriptors::CLOUD_COVER, 113.0)]);
    assert_eq!(resolved.report.surface.n.code(), Some("9"));
}

#[test]
fn test_surface_cloud_group() {
    let resolved = resolve(&[
        phenomenon(descriptors::CLOUD_AMOUNT, 3),
        phenomenon(descriptors::CLOUD_TYPE, 35),
        phenomenon(descriptors::CLOUD_TYPE, 22),
        phenomenon(descriptors::CLOUD_TYPE, 60),
        measured(descriptors::CLOUD_BASE_HEIGHT, 450.0),
    ]);
    let surface = &resolved.report.surface;

    assert_eq!(surface.nh.code(), Some("3"));
    assert_eq!(surface.cl.code(), Some("5"));
    assert_eq!(surface.cm.code(), Some("2"));
    assert!(surface.ch.is_indeterminate());
    assert_eq!(surface.h.code(), Some("4"));
    assert!(!resolved.report.sections.contains(Section::CloudLayers));
}

#[test]
fn test_sky_not_visible_overrides_amount() {
    let mut resolver = resolver();
    resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 5));

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 59)),
        Resolution::Applied
    );
    assert!(resolver.report().surface.nh.is_indeterminate());
}

#[test]
fn test_repeated_sky_not_visible_conflicts() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 59)),
        Resolution::Applied
    );
    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 59)),
        Resolution::SlotConflict
    );
    assert!(resolver.report().surface.nh.is_indeterminate());
    assert_eq!(resolver.stats().slot_conflicts, 1);
}

#[test]
fn test_sky_not_visible_after_indeterminate_amount_conflicts() {
    let mut resolver = resolver();
    resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 15));

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_TYPE, 59)),
        Resolution::SlotConflict
    );
}

#[test]
fn test_cloud_amount_code_table() {
    let resolved = resolve(&[phenomenon(descriptors::CLOUD_AMOUNT, 10)]);
    assert_eq!(resolved.report.surface.nh.code(), Some("9"));

    let resolved = resolve(&[phenomenon(descriptors::CLOUD_AMOUNT, 15)]);
    assert!(resolved.report.surface.nh.is_indeterminate());

    let mut resolver = resolver();
    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 12)),
        Resolution::OutOfRange
    );
}

#[test]
fn test_cloud_type_reading() {
    assert_eq!(
        read_cloud_type(17),
        Some(CloudTypeReading::Genus(
            CloudTier::High,
            crate::app::models::report::Code::digits(7, 1)
        ))
    );
    assert_eq!(
        read_cloud_type(61),
        Some(CloudTypeReading::TierNotVisible(CloudTier::Middle))
    );
    assert_eq!(read_cloud_type(59), Some(CloudTypeReading::SkyNotVisible));
    assert_eq!(read_cloud_type(5), None);
    assert_eq!(read_cloud_type(45), None);
}

#[test]
fn test_layered_records_fill_layer_groups() {
    let resolved = resolve(&[
        phenomenon(descriptors::CLOUD_AMOUNT, 2).with_layer(1),
        phenomenon(descriptors::CLOUD_TYPE, 38).with_layer(1),
        measured(descriptors::CLOUD_BASE_HEIGHT, 1200.0).with_layer(1),
        phenomenon(descriptors::CLOUD_AMOUNT, 6).with_layer(2),
        measured(descriptors::CLOUD_BASE_HEIGHT, 3000.0).with_layer(2),
    ]);
    let report = &resolved.report;

    let first = report.cloud_layer(1).unwrap();
    assert_eq!(first.ns.code(), Some("2"));
    assert_eq!(first.genus.code(), Some("8"));
    assert_eq!(first.height.code(), Some("40"));

    let second = report.cloud_layer(2).unwrap();
    assert_eq!(second.ns.code(), Some("6"));
    assert_eq!(second.height.code(), Some("60"));

    // Layer records never touch section 1
    assert!(!report.surface.nh.is_set());
    assert!(!report.surface.h.is_set());
    assert!(report.sections.contains(Section::CloudLayers));
    assert!(!report.sections.contains(Section::Surface));
}

#[test]
fn test_layer_beyond_capacity_dropped() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&phenomenon(descriptors::CLOUD_AMOUNT, 4).with_layer(5)),
        Resolution::OutOfRange
    );
    assert!(resolver.report().is_empty());
}

#[test]
fn test_missing_layer_genus_is_indeterminate() {
    let mut resolver = resolver();
    let record = missing(descriptors::CLOUD_TYPE).with_layer(3);

    assert_eq!(resolver.resolve(&record), Resolution::Missing);
    let layer = resolver.report().cloud_layer(3).unwrap();
    assert_eq!(layer.genus, Field::Indeterminate);
    assert!(resolver.report().sections.contains(Section::CloudLayers));
}

#[test]
fn test_layer_genus_not_visible_is_indeterminate() {
    let resolved = resolve(&[phenomenon(descriptors::CLOUD_TYPE, 59).with_layer(1)]);
    assert!(resolved.report.cloud_layer(1).unwrap().genus.is_indeterminate());
}

#[test]
fn test_surface_missing_cloud_type_leaves_fields_unset() {
    let mut resolver = resolver();

    assert_eq!(
        resolver.resolve(&missing(descriptors::CLOUD_TYPE)),
        Resolution::Missing
    );
    assert!(resolver.report().is_empty());
}

proptest! {
    #[test]
    fn prop_layer_records_touch_only_their_layer(
        layer in 1u32..=4,
        (y, record) in prop_oneof![
            (0i64..=8).prop_map(|amount| (
                descriptors::CLOUD_AMOUNT,
                phenomenon(descriptors::CLOUD_AMOUNT, amount),
            )),
            (0i64..=39).prop_map(|genus| (
                descriptors::CLOUD_TYPE,
                phenomenon(descriptors::CLOUD_TYPE, genus),
            )),
            (0.0f64..20_000.0).prop_map(|metres| (
                descriptors::CLOUD_BASE_HEIGHT,
                measured(descriptors::CLOUD_BASE_HEIGHT, metres),
            )),
        ],
    ) {
        let resolved = resolve(&[record.with_layer(layer)]);
        let report = &resolved.report;

        for (position, group) in report.cloud_layers.iter().enumerate() {
            let own_layer = position + 1 == layer as usize;
            prop_assert_eq!(group.ns.is_set(), own_layer && y == descriptors::CLOUD_AMOUNT);
            prop_assert_eq!(group.genus.is_set(), own_layer && y == descriptors::CLOUD_TYPE);
            prop_assert_eq!(
                group.height.is_set(),
                own_layer && y == descriptors::CLOUD_BASE_HEIGHT
            );
        }
        prop_assert!(!report.surface.nh.is_set());
        prop_assert!(!report.surface.cl.is_set());
        prop_assert!(!report.surface.h.is_set());
    }
}
