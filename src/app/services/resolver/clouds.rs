//! Visibility and cloud descriptors (0 20 001, 0 20 010 .. 0 20 013)
//!
//! Cloud amount, type and base height are routed by layer index: layer 0 feeds
//! the section 1 fields (Nh, CL/CM/CH, h) and layer k feeds the k-th 8NsChshs
//! group of section 3. A layer beyond the report's capacity is dropped.

use super::{DescriptorHandler, Resolution, ResolutionContext};
use crate::app::models::ObservationRecord;
use crate::app::models::report::{Code, Field, Section, SurfaceSection};
use crate::app::models::temp::TempCloudReport;
use crate::app::services::encoders::{
    DIGIT_WIDTH, height_to_h, height_to_hshs, percent_to_okta, visibility_to_vv,
};
use crate::constants::{cloud_amount, cloud_type};
use tracing::debug;

// =============================================================================
// Code Table Interpretation
// =============================================================================

/// Cloud levels distinguished by the genus fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudTier {
    High,
    Middle,
    Low,
}

/// What a first-level cloud type value says
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudTypeReading {
    /// Genus code for one tier
    Genus(CloudTier, Code),
    /// Clouds of one tier not visible
    TierNotVisible(CloudTier),
    /// No cloud visible at all; the amount Nh becomes indeterminate
    SkyNotVisible,
}

/// Interpret a cloud amount value (code table 0 20 011) as an okta field
pub fn cloud_amount_field(value: i64) -> Option<Field> {
    match value {
        0..=cloud_amount::OKTA_MAX => Some(Code::digits(value as u32, DIGIT_WIDTH).into()),
        9..=cloud_amount::OBSCURED_MAX => Some(Code::digits(9, DIGIT_WIDTH).into()),
        cloud_amount::INDETERMINATE => Some(Field::Indeterminate),
        _ => None,
    }
}

/// Interpret a first-level cloud type value (code table 0 20 012)
pub fn read_cloud_type(value: i64) -> Option<CloudTypeReading> {
    let genus =
        |tier| CloudTypeReading::Genus(tier, Code::digits((value % 10) as u32, DIGIT_WIDTH));

    match value {
        v if (cloud_type::HIGH_START..cloud_type::MIDDLE_START).contains(&v) => {
            Some(genus(CloudTier::High))
        }
        v if (cloud_type::MIDDLE_START..cloud_type::LOW_START).contains(&v) => {
            Some(genus(CloudTier::Middle))
        }
        v if (cloud_type::LOW_START..cloud_type::LOW_END).contains(&v) => {
            Some(genus(CloudTier::Low))
        }
        cloud_type::NOT_VISIBLE => Some(CloudTypeReading::SkyNotVisible),
        cloud_type::HIGH_NOT_VISIBLE => Some(CloudTypeReading::TierNotVisible(CloudTier::High)),
        cloud_type::MIDDLE_NOT_VISIBLE => {
            Some(CloudTypeReading::TierNotVisible(CloudTier::Middle))
        }
        cloud_type::LOW_NOT_VISIBLE => Some(CloudTypeReading::TierNotVisible(CloudTier::Low)),
        _ => None,
    }
}

/// A report group holding Nh and the three genus fields
pub trait CloudGroup {
    fn amount_mut(&mut self) -> &mut Field;
    fn genus_mut(&mut self, tier: CloudTier) -> &mut Field;
}

impl CloudGroup for SurfaceSection {
    fn amount_mut(&mut self) -> &mut Field {
        &mut self.nh
    }

    fn genus_mut(&mut self, tier: CloudTier) -> &mut Field {
        match tier {
            CloudTier::High => &mut self.ch,
            CloudTier::Middle => &mut self.cm,
            CloudTier::Low => &mut self.cl,
        }
    }
}

impl CloudGroup for TempCloudReport {
    fn amount_mut(&mut self) -> &mut Field {
        &mut self.nh
    }

    fn genus_mut(&mut self, tier: CloudTier) -> &mut Field {
        match tier {
            CloudTier::High => &mut self.ch,
            CloudTier::Middle => &mut self.cm,
            CloudTier::Low => &mut self.cl,
        }
    }
}

/// Apply a first-level cloud type value to a cloud group
///
/// Genus fields keep their first value. "Sky not visible" overrides a coded Nh,
/// since an obscured sky makes any amount reported earlier meaningless.
pub fn apply_cloud_type<G: CloudGroup>(group: &mut G, value: i64) -> Resolution {
    let written = match read_cloud_type(value) {
        Some(CloudTypeReading::Genus(tier, code)) => group.genus_mut(tier).fill(code.into()),
        Some(CloudTypeReading::TierNotVisible(tier)) => {
            group.genus_mut(tier).fill(Field::Indeterminate)
        }
        Some(CloudTypeReading::SkyNotVisible) => {
            let amount = group.amount_mut();
            let changed = !amount.is_indeterminate();
            *amount = Field::Indeterminate;
            changed
        }
        None => {
            debug!("Cloud type value {} outside code table, ignoring", value);
            return Resolution::OutOfRange;
        }
    };

    if written {
        Resolution::Applied
    } else {
        debug!("Cloud genus for value {} already set, keeping first value", value);
        Resolution::SlotConflict
    }
}

fn filled(written: bool) -> Resolution {
    if written {
        Resolution::Applied
    } else {
        Resolution::SlotConflict
    }
}

fn layer_out_of_range(record: &ObservationRecord) -> Resolution {
    debug!(
        "Cloud layer {} beyond report capacity, dropping {}",
        record.layer_index, record.code
    );
    Resolution::OutOfRange
}

// =============================================================================
// Handlers
// =============================================================================

/// 0 20 001 horizontal visibility
#[derive(Debug)]
pub struct Visibility;

/// 0 20 010 total cloud cover
#[derive(Debug)]
pub struct CloudCover;

/// 0 20 011 cloud amount
#[derive(Debug)]
pub struct CloudAmount;

/// 0 20 012 cloud type
#[derive(Debug)]
pub struct CloudType;

/// 0 20 013 height of cloud base
#[derive(Debug)]
pub struct CloudBaseHeight;

pub static VISIBILITY: Visibility = Visibility;
pub static CLOUD_COVER: CloudCover = CloudCover;
pub static CLOUD_AMOUNT: CloudAmount = CloudAmount;
pub static CLOUD_TYPE: CloudType = CloudType;
pub static CLOUD_BASE_HEIGHT: CloudBaseHeight = CloudBaseHeight;

impl DescriptorHandler for Visibility {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        let report = &mut *context.report;
        let written = report
            .surface
            .vv
            .fill(visibility_to_vv(record.real_value).into());
        if written {
            report.mark(Section::Surface);
        }
        filled(written)
    }
}

impl DescriptorHandler for CloudCover {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        let report = &mut *context.report;
        let written = report
            .surface
            .n
            .fill(percent_to_okta(record.real_value).into());
        if written {
            report.mark(Section::Surface);
        }
        filled(written)
    }
}

impl DescriptorHandler for CloudAmount {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        let Some(amount) = cloud_amount_field(record.int_value) else {
            debug!("Cloud amount value {} outside code table, ignoring", record.int_value);
            return Resolution::OutOfRange;
        };

        let report = &mut *context.report;
        if record.layer_index == 0 {
            let written = report.surface.nh.fill(amount);
            if written {
                report.mark(Section::Surface);
            }
            return filled(written);
        }

        let Some(layer) = report.cloud_layer_mut(record.layer_index) else {
            return layer_out_of_range(record);
        };
        let written = layer.ns.fill(amount);
        if written {
            report.mark(Section::CloudLayers);
        }
        filled(written)
    }
}

impl DescriptorHandler for CloudType {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        let report = &mut *context.report;

        if record.layer_index == 0 {
            if !record.has_value() {
                return Resolution::Missing;
            }
            let outcome = apply_cloud_type(&mut report.surface, record.int_value);
            if outcome == Resolution::Applied {
                report.mark(Section::Surface);
            }
            return outcome;
        }

        let Some(layer) = report.cloud_layer_mut(record.layer_index) else {
            return layer_out_of_range(record);
        };

        // A layer reported without a genus still gets its C field, as indeterminate
        if !record.has_value() {
            if layer.genus.fill(Field::Indeterminate) {
                report.mark(Section::CloudLayers);
            }
            return Resolution::Missing;
        }

        let genus = match record.int_value {
            cloud_type::NOT_VISIBLE => Field::Indeterminate,
            v if v >= 0 => Code::digits((v % 10) as u32, DIGIT_WIDTH).into(),
            v => {
                debug!("Cloud type value {} outside code table, ignoring", v);
                return Resolution::OutOfRange;
            }
        };
        let written = layer.genus.fill(genus);
        if written {
            report.mark(Section::CloudLayers);
        }
        filled(written)
    }
}

impl DescriptorHandler for CloudBaseHeight {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        let report = &mut *context.report;
        if record.layer_index == 0 {
            let written = report.surface.h.fill(height_to_h(record.real_value));
            if written {
                report.mark(Section::Surface);
            }
            return filled(written);
        }

        let Some(layer) = report.cloud_layer_mut(record.layer_index) else {
            return layer_out_of_range(record);
        };
        let written = layer.height.fill(height_to_hshs(record.real_value).into());
        if written {
            report.mark(Section::CloudLayers);
        }
        filled(written)
    }
}
