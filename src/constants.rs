//! Application constants for the SYNOP resolver
//!
//! This module contains the BUFR descriptor identifiers the resolver understands,
//! the time-significance windows used to select precipitation groups, code-table
//! thresholds and the default configuration values.

// =============================================================================
// BUFR Element Descriptors (F = 0)
// =============================================================================

/// Element descriptors handled by the resolver, as (X, Y) pairs of `0 XX YYY`
pub mod descriptors {
    /// Class 13: hydrographic and hydrological elements
    pub const CLASS_PRECIPITATION: u8 = 13;

    /// Class 20: observed phenomena
    pub const CLASS_PHENOMENA: u8 = 20;

    /// 0 13 011 Total precipitation / total water equivalent of snow
    pub const TOTAL_PRECIPITATION: u16 = 11;
    /// 0 13 019 Total precipitation past 1 hour
    pub const PRECIPITATION_PAST_1H: u16 = 19;
    /// 0 13 020 Total precipitation past 3 hours
    pub const PRECIPITATION_PAST_3H: u16 = 20;
    /// 0 13 021 Total precipitation past 6 hours
    pub const PRECIPITATION_PAST_6H: u16 = 21;
    /// 0 13 022 Total precipitation past 12 hours
    pub const PRECIPITATION_PAST_12H: u16 = 22;
    /// 0 13 023 Total precipitation past 24 hours
    pub const PRECIPITATION_PAST_24H: u16 = 23;

    /// 0 20 001 Horizontal visibility
    pub const HORIZONTAL_VISIBILITY: u16 = 1;
    /// 0 20 003 Present weather
    pub const PRESENT_WEATHER: u16 = 3;
    /// 0 20 004 Past weather (1)
    pub const PAST_WEATHER_1: u16 = 4;
    /// 0 20 005 Past weather (2)
    pub const PAST_WEATHER_2: u16 = 5;
    /// 0 20 010 Cloud cover (total)
    pub const CLOUD_COVER: u16 = 10;
    /// 0 20 011 Cloud amount
    pub const CLOUD_AMOUNT: u16 = 11;
    /// 0 20 012 Cloud type
    pub const CLOUD_TYPE: u16 = 12;
    /// 0 20 013 Height of base of cloud
    pub const CLOUD_BASE_HEIGHT: u16 = 13;
    /// 0 20 062 State of the ground (with or without snow)
    pub const STATE_OF_GROUND: u16 = 62;
}

// =============================================================================
// Time Significance Windows (seconds, negative = trailing period)
// =============================================================================

/// Time periods in seconds selecting a precipitation accumulation window
pub mod time_significance {
    pub const PAST_1H: i32 = -3600;
    pub const PAST_2H: i32 = -2 * 3600;
    pub const PAST_3H: i32 = -3 * 3600;
    pub const PAST_6H: i32 = -6 * 3600;
    pub const PAST_9H: i32 = -9 * 3600;
    pub const PAST_12H: i32 = -12 * 3600;
    pub const PAST_15H: i32 = -15 * 3600;
    pub const PAST_18H: i32 = -18 * 3600;
    pub const PAST_24H: i32 = -24 * 3600;
}

// =============================================================================
// Code Table Values
// =============================================================================

/// Values of BUFR code table 0 20 003 (present weather)
pub mod present_weather {
    /// Upper bound (inclusive) of manned-station ww codes
    pub const MANNED_MAX: i64 = 99;
    /// Automatic station: no significant weather observed
    pub const AUTOMATIC_NO_SIGNIFICANT: i64 = 100;
    /// Upper bound (inclusive) of automatic-station ww codes
    pub const AUTOMATIC_MAX: i64 = 199;
    /// No significant weather, past weather 1 or past weather 2
    pub const NO_SIGNIFICANT_ANY: i64 = 508;
    /// ww below this value is not significant and is omitted from the report
    pub const SIGNIFICANT_THRESHOLD: &str = "04";
}

/// Values of BUFR code tables 0 20 004 and 0 20 005 (past weather)
pub mod past_weather {
    /// Upper bound (inclusive) of manned-station W codes
    pub const MANNED_MAX: i64 = 9;
    /// Automatic station: no significant past weather
    pub const AUTOMATIC_NO_SIGNIFICANT: i64 = 10;
    /// Upper bound (inclusive) of automatic-station W codes
    pub const AUTOMATIC_MAX: i64 = 19;
    /// W below this value is not significant and is omitted from the report
    pub const SIGNIFICANT_THRESHOLD: &str = "3";
}

/// Values of BUFR code table 0 20 011 (cloud amount)
pub mod cloud_amount {
    /// Largest value copied verbatim as an okta digit
    pub const OKTA_MAX: i64 = 8;
    /// Values up to this one (sky obscured, scattered...) encode as okta 9
    pub const OBSCURED_MAX: i64 = 10;
    /// Cloud amount cannot be estimated
    pub const INDETERMINATE: i64 = 15;
}

/// Values of BUFR code table 0 20 012 (cloud type)
pub mod cloud_type {
    /// First code of the high cloud (CH) range
    pub const HIGH_START: i64 = 10;
    /// First code of the middle cloud (CM) range
    pub const MIDDLE_START: i64 = 20;
    /// First code of the low cloud (CL) range
    pub const LOW_START: i64 = 30;
    /// One past the last code of the low cloud range
    pub const LOW_END: i64 = 40;
    /// Cloud not visible owing to darkness, fog, duststorm, sandstorm or other phenomena
    pub const NOT_VISIBLE: i64 = 59;
    /// CH clouds not visible
    pub const HIGH_NOT_VISIBLE: i64 = 60;
    /// CM clouds not visible
    pub const MIDDLE_NOT_VISIBLE: i64 = 61;
    /// CL clouds not visible
    pub const LOW_NOT_VISIBLE: i64 = 62;
}

/// Values of BUFR code table 0 20 062 (state of the ground)
pub mod state_of_ground {
    /// Upper bound (inclusive) of E codes (ground without snow)
    pub const WITHOUT_SNOW_MAX: i64 = 9;
    /// Upper bound (inclusive) of E' codes (ground with snow or ice)
    pub const WITH_SNOW_MAX: i64 = 19;
}

/// Okta digit meaning no cloud, used by the clear-sky height inference
pub const OKTA_CLEAR_SKY: &str = "0";

// =============================================================================
// Report Layout and Defaults
// =============================================================================

/// Default number of cloud layer groups (333 8NsChshs) held by a report
pub const DEFAULT_MAX_CLOUD_LAYERS: usize = 4;

/// Largest number of cloud layer groups a configuration may request
pub const MAX_CLOUD_LAYERS_LIMIT: usize = 8;

/// Default log level for the CLI
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Crate name used as the tracing filter target
pub const LOG_TARGET: &str = "synop_resolver";
