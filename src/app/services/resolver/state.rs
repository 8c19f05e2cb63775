//! Side-channel state scoped to one record sequence
//!
//! These flags record what the message said explicitly about weather that is
//! absent from the report. They live beside the report, not in it, and are read
//! by later descriptors of the same sequence and by the renderer.

/// Flags raised while resolving one report's records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubsetState {
    /// Present weather explicitly reported as not significant (or missing)
    pub no_significant_ww: bool,
    /// Past weather 1 explicitly reported as not significant (or missing)
    pub no_significant_w1: bool,
    /// Past weather 2 explicitly reported as not significant (or missing)
    pub no_significant_w2: bool,
}

impl SubsetState {
    /// Raise all three weather flags
    pub fn flag_all_weather(&mut self) {
        self.no_significant_ww = true;
        self.no_significant_w1 = true;
        self.no_significant_w2 = true;
    }

    /// Whether the message reported no significant present or past weather at all
    pub fn no_significant_weather(&self) -> bool {
        self.no_significant_ww && self.no_significant_w1 && self.no_significant_w2
    }
}
