//! Quantity encoders
//!
//! Pure conversions from a measured quantity to the fixed-width code string of
//! its WMO code table. Each encoder is total: values outside the table saturate
//! to the nearest defined code. Missing values never reach an encoder; the
//! resolver filters them first.

use crate::app::models::report::Code;

/// Width of the RRR precipitation code (code table 3590)
pub const RRR_WIDTH: usize = 3;
/// Width of the RRRR / R24R24R24R24 precipitation codes
pub const RRRR_WIDTH: usize = 4;
/// Width of okta and single-digit cloud codes
pub const DIGIT_WIDTH: usize = 1;
/// Width of the hshs and VV codes
pub const PAIR_WIDTH: usize = 2;

/// Largest whole-millimetre amount RRR can carry ("989 mm or more")
const RRR_MAX_MM: u32 = 989;
/// RRR code for a trace or an amount below 0.1 mm
const RRR_TRACE: u32 = 990;
/// RRRR code for a trace
const RRRR_TRACE: u32 = 9999;
/// RRRR code for 999.8 mm or more
const RRRR_OVERFLOW: u32 = 9998;
/// Highest amount in mm RRRR encodes in tenths
const RRRR_MAX_MM: f64 = 999.8;

/// Precipitation amount in mm to RRR
///
/// 0 is "000", amounts below 0.1 mm (and negative trace values) are "990",
/// tenths below 1 mm are "991".."999", whole millimetres otherwise.
pub fn precipitation_to_rrr(mm: f64) -> Code {
    let value = if mm == 0.0 {
        0
    } else if mm < 0.1 {
        RRR_TRACE
    } else if mm < 1.0 {
        RRR_TRACE + (mm * 10.0) as u32
    } else {
        (mm as u32).min(RRR_MAX_MM)
    };
    Code::digits(value, RRR_WIDTH)
}

/// Precipitation amount in mm to RRRR, tenths of a millimetre
///
/// Used for both the 1 hour and the 24 hour (R24R24R24R24) groups.
/// Negative values and amounts below 0.1 mm are the trace code "9999";
/// anything above 999.8 mm saturates to "9998".
pub fn precipitation_to_rrrr(mm: f64) -> Code {
    let value = if mm < 0.0 || (mm > 0.0 && mm < 0.1) {
        RRRR_TRACE
    } else if mm <= RRRR_MAX_MM {
        (mm * 10.0) as u32
    } else {
        RRRR_OVERFLOW
    };
    Code::digits(value, RRRR_WIDTH)
}

/// Cloud cover in percent to okta (code table 2700)
///
/// 113 is the BUFR value for a sky obscured by fog or other phenomena and maps
/// to 9; values between 112.5 and 113 saturate to 8, values above 113 to 9.
pub fn percent_to_okta(percent: f64) -> Code {
    const BREAKPOINTS: [f64; 8] = [12.5, 25.0, 37.5, 50.0, 62.5, 75.0, 87.5, 100.0];

    let okta = match BREAKPOINTS.iter().position(|limit| percent < *limit) {
        Some(okta) => okta as u32,
        None if percent <= 112.5 => 8,
        None if percent == 113.0 => 9,
        None if percent < 113.0 => 8,
        None => 9,
    };
    Code::digits(okta, DIGIT_WIDTH)
}

/// Height of the lowest cloud base in metres to h (code table 1600)
pub fn height_to_h(metres: f64) -> Code {
    const BREAKPOINTS: [f64; 9] = [
        50.0, 100.0, 200.0, 300.0, 600.0, 1000.0, 1500.0, 2000.0, 2500.0,
    ];

    let h = BREAKPOINTS
        .iter()
        .position(|limit| metres < *limit)
        .unwrap_or(BREAKPOINTS.len());
    Code::digits(h as u32, DIGIT_WIDTH)
}

/// Height of a cloud layer base in metres to hshs (code table 1677)
///
/// Heights are truncated to whole metres; negative heights clamp to "00".
pub fn height_to_hshs(metres: f64) -> Code {
    let height = (metres as i64).max(0);

    let hshs = if height <= 1500 {
        height / 30
    } else if height <= 9000 {
        height / 300 + 50
    } else if height <= 21000 {
        height / 500 + 50
    } else {
        89
    };
    Code::digits(hshs as u32, PAIR_WIDTH)
}

/// Horizontal visibility in metres to VV (code table 4377)
pub fn visibility_to_vv(metres: f64) -> Code {
    // 0.1 m guards against values decoded a hair below a code boundary
    let vv = if metres < 100.0 {
        0
    } else if metres <= 5000.0 {
        (metres + 0.1) as i64 / 100
    } else if metres <= 30000.0 {
        (metres + 0.1) as i64 / 1000 + 50
    } else if metres <= 70000.0 {
        (metres - 30000.0) as i64 / 5000 + 80
    } else {
        89
    };
    Code::digits(vv as u32, PAIR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rrr(mm: f64) -> String {
        precipitation_to_rrr(mm).to_string()
    }

    fn rrrr(mm: f64) -> String {
        precipitation_to_rrrr(mm).to_string()
    }

    #[test]
    fn test_rrr_table() {
        assert_eq!(rrr(0.0), "000");
        assert_eq!(rrr(0.05), "990");
        assert_eq!(rrr(0.099), "990");
        assert_eq!(rrr(0.1), "991");
        assert_eq!(rrr(0.55), "995");
        assert_eq!(rrr(0.95), "999");
        assert_eq!(rrr(1.0), "001");
        assert_eq!(rrr(2.3), "002");
        assert_eq!(rrr(125.9), "125");
    }

    #[test]
    fn test_rrr_trace_and_overflow() {
        assert_eq!(rrr(-0.1), "990");
        assert_eq!(rrr(989.0), "989");
        assert_eq!(rrr(1500.0), "989");
        assert_eq!(precipitation_to_rrr(1500.0).width(), RRR_WIDTH);
    }

    #[test]
    fn test_rrrr_table() {
        assert_eq!(rrrr(0.0), "0000");
        assert_eq!(rrrr(0.05), "9999");
        assert_eq!(rrrr(-0.1), "9999");
        assert_eq!(rrrr(0.1), "0001");
        assert_eq!(rrrr(12.5), "0125");
        assert_eq!(rrrr(999.8), "9998");
        assert_eq!(rrrr(999.9), "9998");
        assert_eq!(rrrr(1000.0), "9998");
    }

    #[test]
    fn test_okta_table() {
        assert_eq!(percent_to_okta(0.0).as_str(), "0");
        assert_eq!(percent_to_okta(12.4).as_str(), "0");
        assert_eq!(percent_to_okta(12.5).as_str(), "1");
        assert_eq!(percent_to_okta(50.0).as_str(), "4");
        assert_eq!(percent_to_okta(99.9).as_str(), "7");
        assert_eq!(percent_to_okta(100.0).as_str(), "8");
        assert_eq!(percent_to_okta(112.5).as_str(), "8");
        assert_eq!(percent_to_okta(113.0).as_str(), "9");
    }

    #[test]
    fn test_okta_out_of_range_saturates() {
        assert_eq!(percent_to_okta(-5.0).as_str(), "0");
        assert_eq!(percent_to_okta(112.8).as_str(), "8");
        assert_eq!(percent_to_okta(150.0).as_str(), "9");
    }

    #[test]
    fn test_h_table() {
        let cases = [
            (0.0, "0"),
            (49.9, "0"),
            (50.0, "1"),
            (150.0, "2"),
            (250.0, "3"),
            (599.0, "4"),
            (600.0, "5"),
            (1200.0, "6"),
            (1999.0, "7"),
            (2400.0, "8"),
            (2500.0, "9"),
            (8000.0, "9"),
        ];
        for (metres, expected) in cases {
            assert_eq!(height_to_h(metres).as_str(), expected, "height {metres}");
        }
    }

    #[test]
    fn test_hshs_table() {
        assert_eq!(height_to_hshs(0.0).as_str(), "00");
        assert_eq!(height_to_hshs(29.0).as_str(), "00");
        assert_eq!(height_to_hshs(300.0).as_str(), "10");
        assert_eq!(height_to_hshs(1500.0).as_str(), "50");
        assert_eq!(height_to_hshs(1800.0).as_str(), "56");
        assert_eq!(height_to_hshs(9000.0).as_str(), "80");
        assert_eq!(height_to_hshs(10000.0).as_str(), "70");
        assert_eq!(height_to_hshs(25000.0).as_str(), "89");
        assert_eq!(height_to_hshs(-20.0).as_str(), "00");
    }

    #[test]
    fn test_vv_table() {
        assert_eq!(visibility_to_vv(99.0).as_str(), "00");
        assert_eq!(visibility_to_vv(100.0).as_str(), "01");
        assert_eq!(visibility_to_vv(4999.95).as_str(), "50");
        assert_eq!(visibility_to_vv(5000.0).as_str(), "50");
        assert_eq!(visibility_to_vv(10000.0).as_str(), "60");
        assert_eq!(visibility_to_vv(30000.0).as_str(), "80");
        assert_eq!(visibility_to_vv(45000.0).as_str(), "83");
        assert_eq!(visibility_to_vv(70000.0).as_str(), "88");
        assert_eq!(visibility_to_vv(70001.0).as_str(), "89");
    }

    proptest! {
        #[test]
        fn okta_is_monotonic(a in 0.0f64..112.5, b in 0.0f64..112.5) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(percent_to_okta(low).as_str() <= percent_to_okta(high).as_str());
        }

        #[test]
        fn okta_below_eighth_is_zero(p in 0.0f64..12.5) {
            let okta = percent_to_okta(p);
            prop_assert_eq!(okta.as_str(), "0");
        }

        #[test]
        fn rrr_below_tenth_is_trace(mm in 0.000_001f64..0.1) {
            let rrr = precipitation_to_rrr(mm);
            prop_assert_eq!(rrr.as_str(), "990");
        }

        #[test]
        fn rrr_has_fixed_width(mm in -10.0f64..100_000.0) {
            prop_assert_eq!(precipitation_to_rrr(mm).width(), RRR_WIDTH);
        }

        #[test]
        fn rrrr_has_fixed_width(mm in -10.0f64..100_000.0) {
            prop_assert_eq!(precipitation_to_rrrr(mm).width(), RRRR_WIDTH);
        }

        #[test]
        fn h_is_monotonic(a in 0.0f64..5000.0, b in 0.0f64..5000.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(height_to_h(low).as_str() <= height_to_h(high).as_str());
        }

        #[test]
        fn pair_codes_have_fixed_width(metres in -100.0f64..200_000.0) {
            prop_assert_eq!(height_to_hshs(metres).width(), PAIR_WIDTH);
            prop_assert_eq!(visibility_to_vv(metres).width(), PAIR_WIDTH);
        }
    }
}
