//! Data models for descriptor resolution
//!
//! This module contains the per-value observation record produced by the upstream
//! BUFR decoder and the closed set of element descriptors the resolver handles.
//! The report accumulators live in [`report`] (SYNOP) and [`temp`] (upper-air).

pub mod report;
pub mod temp;

use crate::constants::descriptors;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Descriptor Code
// =============================================================================

/// A BUFR descriptor `F XX YYY`
///
/// Displayed and parsed in the compact six-digit form (`013011`); parsing also
/// accepts the spaced form (`0 13 011`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DescriptorCode {
    /// Descriptor type (0 = element descriptor)
    pub f: u8,
    /// Class
    pub x: u8,
    /// Entry within the class
    pub y: u16,
}

impl DescriptorCode {
    /// Create a descriptor from its three components
    pub const fn new(f: u8, x: u8, y: u16) -> Self {
        Self { f, x, y }
    }

    /// Create an element descriptor (F = 0)
    pub const fn element(x: u8, y: u16) -> Self {
        Self::new(0, x, y)
    }
}

impl fmt::Display for DescriptorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{:03}", self.f, self.x, self.y)
    }
}

impl FromStr for DescriptorCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();

        if compact.len() != 6 || !compact.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_descriptor(
                s,
                "expected six digits in the form FXXYYY",
            ));
        }

        let parse = |range: std::ops::Range<usize>| {
            compact[range]
                .parse::<u16>()
                .map_err(|e| Error::invalid_descriptor(s, e.to_string()))
        };

        let f = parse(0..1)?;
        if f > 3 {
            return Err(Error::invalid_descriptor(s, "F must be between 0 and 3"));
        }
        let x = parse(1..3)?;
        let y = parse(3..6)?;

        Ok(Self::new(f as u8, x as u8, y))
    }
}

impl TryFrom<String> for DescriptorCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DescriptorCode> for String {
    fn from(code: DescriptorCode) -> Self {
        code.to_string()
    }
}

// =============================================================================
// Observation Class
// =============================================================================

/// The closed set of element descriptors with a registered handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationClass {
    /// 0 13 011, window selected by time significance
    Precipitation,
    /// 0 13 019
    PrecipitationPast1h,
    /// 0 13 020
    PrecipitationPast3h,
    /// 0 13 021
    PrecipitationPast6h,
    /// 0 13 022
    PrecipitationPast12h,
    /// 0 13 023
    PrecipitationPast24h,
    /// 0 20 001
    HorizontalVisibility,
    /// 0 20 003
    PresentWeather,
    /// 0 20 004
    PastWeather1,
    /// 0 20 005
    PastWeather2,
    /// 0 20 010
    CloudCover,
    /// 0 20 011
    CloudAmount,
    /// 0 20 012
    CloudType,
    /// 0 20 013
    CloudBaseHeight,
    /// 0 20 062
    StateOfGround,
}

impl ObservationClass {
    /// Every handled class, in descriptor order
    pub const ALL: [ObservationClass; 15] = [
        ObservationClass::Precipitation,
        ObservationClass::PrecipitationPast1h,
        ObservationClass::PrecipitationPast3h,
        ObservationClass::PrecipitationPast6h,
        ObservationClass::PrecipitationPast12h,
        ObservationClass::PrecipitationPast24h,
        ObservationClass::HorizontalVisibility,
        ObservationClass::PresentWeather,
        ObservationClass::PastWeather1,
        ObservationClass::PastWeather2,
        ObservationClass::CloudCover,
        ObservationClass::CloudAmount,
        ObservationClass::CloudType,
        ObservationClass::CloudBaseHeight,
        ObservationClass::StateOfGround,
    ];

    /// Look up the class of a descriptor; `None` for descriptors without a handler
    pub fn from_descriptor(code: DescriptorCode) -> Option<Self> {
        if code.f != 0 {
            return None;
        }

        match (code.x, code.y) {
            (descriptors::CLASS_PRECIPITATION, descriptors::TOTAL_PRECIPITATION) => {
                Some(Self::Precipitation)
            }
            (descriptors::CLASS_PRECIPITATION, descriptors::PRECIPITATION_PAST_1H) => {
                Some(Self::PrecipitationPast1h)
            }
            (descriptors::CLASS_PRECIPITATION, descriptors::PRECIPITATION_PAST_3H) => {
                Some(Self::PrecipitationPast3h)
            }
            (descriptors::CLASS_PRECIPITATION, descriptors::PRECIPITATION_PAST_6H) => {
                Some(Self::PrecipitationPast6h)
            }
            (descriptors::CLASS_PRECIPITATION, descriptors::PRECIPITATION_PAST_12H) => {
                Some(Self::PrecipitationPast12h)
            }
            (descriptors::CLASS_PRECIPITATION, descriptors::PRECIPITATION_PAST_24H) => {
                Some(Self::PrecipitationPast24h)
            }
            (descriptors::CLASS_PHENOMENA, descriptors::HORIZONTAL_VISIBILITY) => {
                Some(Self::HorizontalVisibility)
            }
            (descriptors::CLASS_PHENOMENA, descriptors::PRESENT_WEATHER) => {
                Some(Self::PresentWeather)
            }
            (descriptors::CLASS_PHENOMENA, descriptors::PAST_WEATHER_1) => Some(Self::PastWeather1),
            (descriptors::CLASS_PHENOMENA, descriptors::PAST_WEATHER_2) => Some(Self::PastWeather2),
            (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_COVER) => Some(Self::CloudCover),
            (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_AMOUNT) => Some(Self::CloudAmount),
            (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_TYPE) => Some(Self::CloudType),
            (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_BASE_HEIGHT) => {
                Some(Self::CloudBaseHeight)
            }
            (descriptors::CLASS_PHENOMENA, descriptors::STATE_OF_GROUND) => {
                Some(Self::StateOfGround)
            }
            _ => None,
        }
    }

    /// The descriptor this class is registered for
    pub fn descriptor(self) -> DescriptorCode {
        let (x, y) = match self {
            Self::Precipitation => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::TOTAL_PRECIPITATION,
            ),
            Self::PrecipitationPast1h => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::PRECIPITATION_PAST_1H,
            ),
            Self::PrecipitationPast3h => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::PRECIPITATION_PAST_3H,
            ),
            Self::PrecipitationPast6h => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::PRECIPITATION_PAST_6H,
            ),
            Self::PrecipitationPast12h => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::PRECIPITATION_PAST_12H,
            ),
            Self::PrecipitationPast24h => (
                descriptors::CLASS_PRECIPITATION,
                descriptors::PRECIPITATION_PAST_24H,
            ),
            Self::HorizontalVisibility => (
                descriptors::CLASS_PHENOMENA,
                descriptors::HORIZONTAL_VISIBILITY,
            ),
            Self::PresentWeather => (descriptors::CLASS_PHENOMENA, descriptors::PRESENT_WEATHER),
            Self::PastWeather1 => (descriptors::CLASS_PHENOMENA, descriptors::PAST_WEATHER_1),
            Self::PastWeather2 => (descriptors::CLASS_PHENOMENA, descriptors::PAST_WEATHER_2),
            Self::CloudCover => (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_COVER),
            Self::CloudAmount => (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_AMOUNT),
            Self::CloudType => (descriptors::CLASS_PHENOMENA, descriptors::CLOUD_TYPE),
            Self::CloudBaseHeight => (
                descriptors::CLASS_PHENOMENA,
                descriptors::CLOUD_BASE_HEIGHT,
            ),
            Self::StateOfGround => (descriptors::CLASS_PHENOMENA, descriptors::STATE_OF_GROUND),
        };
        DescriptorCode::element(x, y)
    }

    /// Whether records of this class are routed by cloud layer index
    pub fn is_layered(self) -> bool {
        matches!(
            self,
            Self::CloudAmount | Self::CloudType | Self::CloudBaseHeight
        )
    }
}

// =============================================================================
// Observation Record
// =============================================================================

/// One decoded value handed over by the upstream BUFR decoder
///
/// Records are immutable once produced; the builder methods consume and return
/// the record so they can be chained at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    /// Element descriptor of the value
    pub code: DescriptorCode,

    /// Decoded value in its physical unit
    pub real_value: f64,

    /// Decoded value as an integer, used by code-table descriptors
    pub int_value: i64,

    /// The value is flagged missing in the message
    pub is_missing: bool,

    /// Time significance in seconds (negative = trailing period), 0 if not applicable
    pub time_significance: i32,

    /// Current vertical layer; 0 is the surface / first level
    pub layer_index: u32,
}

impl ObservationRecord {
    /// Create a record from a real value; the integer form is the rounded value
    pub fn new(code: DescriptorCode, value: f64) -> Self {
        Self {
            code,
            real_value: value,
            int_value: if value.is_finite() {
                value.round() as i64
            } else {
                0
            },
            is_missing: false,
            time_significance: 0,
            layer_index: 0,
        }
    }

    /// Create a record for a code-table value
    pub fn from_code_value(code: DescriptorCode, value: i64) -> Self {
        Self {
            code,
            real_value: value as f64,
            int_value: value,
            is_missing: false,
            time_significance: 0,
            layer_index: 0,
        }
    }

    /// Create a record whose value is flagged missing
    pub fn missing(code: DescriptorCode) -> Self {
        Self {
            code,
            real_value: 0.0,
            int_value: 0,
            is_missing: true,
            time_significance: 0,
            layer_index: 0,
        }
    }

    /// Attach a time significance (seconds)
    pub fn with_time_significance(mut self, seconds: i32) -> Self {
        self.time_significance = seconds;
        self
    }

    /// Attach a vertical layer index
    pub fn with_layer(mut self, layer_index: u32) -> Self {
        self.layer_index = layer_index;
        self
    }

    /// Handler class of this record, if any
    pub fn class(&self) -> Option<ObservationClass> {
        ObservationClass::from_descriptor(self.code)
    }

    /// Whether the record carries a usable value
    ///
    /// Non-finite real values are treated the same as an explicit missing flag.
    pub fn has_value(&self) -> bool {
        !self.is_missing && self.real_value.is_finite()
    }
}

// =============================================================================
// Subset
// =============================================================================

/// The record sequence of one BUFR subset, which resolves to one report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subset {
    /// Identifier of the subset within its source (station or message position)
    pub id: String,
    /// Records in message order
    pub records: Vec<ObservationRecord>,
}

impl Subset {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ObservationRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
