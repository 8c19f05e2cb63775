//! Resolution statistics
//!
//! Counters of how each record of a report was resolved. Dropped records are
//! never errors, so these counters are the only place they become visible.

use super::Resolution;

/// Outcome counters for one report (or a batch, after [`ResolutionStats::merge`])
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Total records seen
    pub records: usize,
    /// Records that updated the report or its side flags
    pub applied: usize,
    /// Records flagged missing
    pub missing: usize,
    /// Records whose descriptor has no handler
    pub unknown_codes: usize,
    /// Records with values outside their code table
    pub out_of_range: usize,
    /// Records dropped because their field was already taken
    pub slot_conflicts: usize,
    /// Valid records that do not feed the report
    pub ignored: usize,
}

impl ResolutionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome
    pub fn record(&mut self, outcome: Resolution) {
        self.records += 1;
        match outcome {
            Resolution::Applied => self.applied += 1,
            Resolution::Missing => self.missing += 1,
            Resolution::UnknownCode => self.unknown_codes += 1,
            Resolution::OutOfRange => self.out_of_range += 1,
            Resolution::SlotConflict => self.slot_conflicts += 1,
            Resolution::Ignored => self.ignored += 1,
        }
    }

    /// Add the counters of another report
    pub fn merge(&mut self, other: &ResolutionStats) {
        self.records += other.records;
        self.applied += other.applied;
        self.missing += other.missing;
        self.unknown_codes += other.unknown_codes;
        self.out_of_range += other.out_of_range;
        self.slot_conflicts += other.slot_conflicts;
        self.ignored += other.ignored;
    }

    /// Share of records that updated the report, as a percentage
    pub fn applied_rate(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            (self.applied as f64 / self.records as f64) * 100.0
        }
    }

    /// Get summary string for logging
    pub fn summary(&self) -> String {
        format!(
            "{} records ({:.1}% applied) | missing: {} | unknown: {} | \
             out of range: {} | conflicts: {} | ignored: {}",
            self.records,
            self.applied_rate(),
            self.missing,
            self.unknown_codes,
            self.out_of_range,
            self.slot_conflicts,
            self.ignored
        )
    }
}
