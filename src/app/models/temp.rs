//! Cloud data of an upper-air (TEMP) report
//!
//! Part B of a TEMP report carries the surface cloud observation at launch time in
//! section 8 (41414 NhCLhCMCH). Only the first level feeds it; the section has no
//! per-layer groups.

use super::report::{CloudBase, Field};

/// Sections of a TEMP part that carry a presence flag in this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempSection {
    /// Section 8 of part B, cloud data
    Clouds,
}

/// Section 8 of a TEMP part B report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TempCloudReport {
    /// Nh, amount of the low (or middle) cloud
    pub nh: Field,
    /// CL, low cloud genus
    pub cl: Field,
    /// h, height of the lowest cloud base
    pub h: CloudBase,
    /// CM, middle cloud genus
    pub cm: Field,
    /// CH, high cloud genus
    pub ch: Field,
    clouds_present: bool,
}

impl TempCloudReport {
    /// Record that a field of `section` was written
    pub fn mark(&mut self, section: TempSection) {
        match section {
            TempSection::Clouds => self.clouds_present = true,
        }
    }

    /// Whether `section` received data
    pub fn contains(&self, section: TempSection) -> bool {
        match section {
            TempSection::Clouds => self.clouds_present,
        }
    }
}
