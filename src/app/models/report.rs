//! Report accumulator for SYNOP (FM 12) reports
//!
//! A [`SynopReport`] is created empty for each report, filled by the descriptor
//! resolver one observation record at a time, and then handed to the renderer.
//! Leaf fields never hold the '/' solidus: an unknown or indeterminate value is a
//! variant of its own and the renderer chooses how to print it.

use crate::constants::DEFAULT_MAX_CLOUD_LAYERS;
use crate::{Error, Result};
use std::fmt;

// =============================================================================
// Leaf Values
// =============================================================================

/// A fixed-width string of code-table digits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    /// Create a code from text, checking it is exactly `width` ASCII digits
    pub fn new(text: impl Into<String>, width: usize) -> Result<Self> {
        let text = text.into();
        if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::code_width(text, width));
        }
        Ok(Self(text))
    }

    /// Zero-pad a non-negative number to `width` digits
    ///
    /// Callers guarantee the number fits; encoders saturate before calling.
    pub(crate) fn digits(value: u32, width: usize) -> Self {
        let text = format!("{:0width$}", value, width = width);
        debug_assert_eq!(text.len(), width, "code {text} exceeds width {width}");
        Self(text)
    }

    /// The code text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code
    pub fn width(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A report field: unset, a code, or explicitly indeterminate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    /// No descriptor has written this field yet
    #[default]
    Unset,
    /// A code-table value
    Coded(Code),
    /// Reported, but the quantity could not be observed
    Indeterminate,
}

impl Field {
    pub fn is_set(&self) -> bool {
        !matches!(self, Field::Unset)
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Field::Indeterminate)
    }

    /// The code text when the field holds a code
    pub fn code(&self) -> Option<&str> {
        match self {
            Field::Coded(code) => Some(code.as_str()),
            _ => None,
        }
    }

    /// Write `value` only when the field is unset (first writer wins)
    ///
    /// Returns `true` if the field was written.
    pub fn fill(&mut self, value: Field) -> bool {
        if self.is_set() {
            return false;
        }
        *self = value;
        true
    }

    pub fn clear(&mut self) {
        *self = Field::Unset;
    }
}

impl From<Code> for Field {
    fn from(code: Code) -> Self {
        Field::Coded(code)
    }
}

/// Height of the base of the lowest cloud (h, code table 1600)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CloudBase {
    #[default]
    Unset,
    /// Height measured by a cloud-base descriptor
    Observed(Code),
    /// Not measured, but implied by a cloudless sky (N = 0); encoded as 9
    ClearSky,
}

impl CloudBase {
    /// Code text for the field; the clear-sky state encodes as "9"
    pub fn code(&self) -> Option<&str> {
        match self {
            CloudBase::Unset => None,
            CloudBase::Observed(code) => Some(code.as_str()),
            CloudBase::ClearSky => Some("9"),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, CloudBase::Unset)
    }

    /// Store a measured height unless one is already stored
    ///
    /// A measurement replaces the clear-sky inference.
    pub fn fill(&mut self, code: Code) -> bool {
        match self {
            CloudBase::Observed(_) => false,
            _ => {
                *self = CloudBase::Observed(code);
                true
            }
        }
    }
}

/// Indicator ix: type of station operation and weather group inclusion (code table 1860)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationOperation {
    /// 1: manned, 7wwW1W2 included
    ManualIncluded,
    /// 2: manned, omitted (no significant phenomena)
    ManualOmittedNoPhenomena,
    /// 3: manned, omitted (no observation)
    ManualNotObserved,
    /// 4: automatic, included using manned-station code tables
    AutomaticIncluded,
    /// 5: automatic, omitted (no significant phenomena)
    AutomaticOmittedNoPhenomena,
    /// 6: automatic, omitted (no observation)
    AutomaticNotObserved,
    /// 7: automatic, included using automatic-station code tables
    AutomaticIncludedAutoCodes,
}

impl StationOperation {
    /// The ix digit
    pub fn code(self) -> char {
        match self {
            Self::ManualIncluded => '1',
            Self::ManualOmittedNoPhenomena => '2',
            Self::ManualNotObserved => '3',
            Self::AutomaticIncluded => '4',
            Self::AutomaticOmittedNoPhenomena => '5',
            Self::AutomaticNotObserved => '6',
            Self::AutomaticIncludedAutoCodes => '7',
        }
    }

    /// Whether the weather group is included for this ix
    pub fn includes_weather(self) -> bool {
        matches!(
            self,
            Self::ManualIncluded | Self::AutomaticIncluded | Self::AutomaticIncludedAutoCodes
        )
    }

    /// The "omitted, no significant phenomena" counterpart of an including ix
    pub fn demoted(self) -> Self {
        match self {
            Self::ManualIncluded => Self::ManualOmittedNoPhenomena,
            Self::AutomaticIncluded | Self::AutomaticIncludedAutoCodes => {
                Self::AutomaticOmittedNoPhenomena
            }
            other => other,
        }
    }
}

// =============================================================================
// Precipitation Windows
// =============================================================================

/// Accumulation period of a precipitation amount (tR, code table 4019)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WindowKind {
    OneHour,
    TwoHours,
    ThreeHours,
    SixHours,
    NineHours,
    TwelveHours,
    FifteenHours,
    EighteenHours,
    TwentyFourHours,
}

impl WindowKind {
    /// Window selected by a time significance in seconds, if it is a supported period
    pub fn from_time_significance(seconds: i32) -> Option<Self> {
        use crate::constants::time_significance as ts;

        match seconds {
            ts::PAST_1H => Some(Self::OneHour),
            ts::PAST_2H => Some(Self::TwoHours),
            ts::PAST_3H => Some(Self::ThreeHours),
            ts::PAST_6H => Some(Self::SixHours),
            ts::PAST_9H => Some(Self::NineHours),
            ts::PAST_12H => Some(Self::TwelveHours),
            ts::PAST_15H => Some(Self::FifteenHours),
            ts::PAST_18H => Some(Self::EighteenHours),
            ts::PAST_24H => Some(Self::TwentyFourHours),
            _ => None,
        }
    }

    /// Length of the period in hours
    pub fn hours(self) -> u32 {
        match self {
            Self::OneHour => 1,
            Self::TwoHours => 2,
            Self::ThreeHours => 3,
            Self::SixHours => 6,
            Self::NineHours => 9,
            Self::TwelveHours => 12,
            Self::FifteenHours => 15,
            Self::EighteenHours => 18,
            Self::TwentyFourHours => 24,
        }
    }

    /// The tR digit stored beside the amount
    pub fn indicator(self) -> char {
        match self {
            Self::SixHours => '1',
            Self::TwelveHours => '2',
            Self::EighteenHours => '3',
            Self::TwentyFourHours => '4',
            Self::OneHour => '5',
            Self::TwoHours => '6',
            Self::ThreeHours => '7',
            Self::NineHours => '8',
            Self::FifteenHours => '9',
        }
    }

    /// The slot this window is accumulated into
    pub fn group(self) -> WindowGroup {
        match self {
            Self::OneHour | Self::TwoHours => WindowGroup::Hourly,
            Self::ThreeHours | Self::NineHours | Self::FifteenHours => WindowGroup::Intermediate,
            Self::SixHours | Self::TwelveHours | Self::EighteenHours | Self::TwentyFourHours => {
                WindowGroup::Synoptic
            }
        }
    }

    /// Whether this window may replace an amount already stored for `existing`
    ///
    /// Only an explicit 12-hour amount supersedes a 6-hour one.
    pub fn supersedes(self, existing: WindowKind) -> bool {
        self == Self::TwelveHours && existing == Self::SixHours
    }
}

/// Precipitation slots of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowGroup {
    /// 1 and 2 hour amounts
    Hourly,
    /// 3, 9 and 15 hour amounts
    Intermediate,
    /// 6, 12, 18 and 24 hour amounts of section 1
    Synoptic,
}

impl WindowGroup {
    /// Presence flag of the slot
    pub fn section(self) -> Section {
        match self {
            Self::Hourly => Section::HourlyPrecipitation,
            Self::Intermediate => Section::IntermediatePrecipitation,
            Self::Synoptic => Section::SynopticPrecipitation,
        }
    }
}

/// One 6RRRtR precipitation group, tagged with the window that filled it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecipitationSlot {
    occupied_by: Option<WindowKind>,
    amount: Option<Code>,
}

impl PrecipitationSlot {
    /// Window whose amount is stored
    pub fn occupied_by(&self) -> Option<WindowKind> {
        self.occupied_by
    }

    /// RRR code of the stored amount
    pub fn amount(&self) -> Option<&str> {
        self.amount.as_ref().map(Code::as_str)
    }

    /// tR digit of the stored amount
    pub fn indicator(&self) -> Option<char> {
        self.occupied_by.map(WindowKind::indicator)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied_by.is_some()
    }

    /// Whether an amount for `kind` would be stored
    pub fn accepts(&self, kind: WindowKind) -> bool {
        match self.occupied_by {
            None => true,
            Some(existing) => kind.supersedes(existing),
        }
    }

    /// Store an amount for `kind` if the slot accepts it
    pub fn occupy(&mut self, kind: WindowKind, amount: Code) -> bool {
        if !self.accepts(kind) {
            return false;
        }
        self.occupied_by = Some(kind);
        self.amount = Some(amount);
        true
    }
}

// =============================================================================
// Section Presence
// =============================================================================

/// Logical sections of a report that carry their own presence flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Section 1 surface fields (ix, VV, N, Nh, h, ww, W1, W2, CL, CM, CH)
    Surface,
    /// 1 and 2 hour precipitation group
    HourlyPrecipitation,
    /// 3, 9 and 15 hour precipitation group
    IntermediatePrecipitation,
    /// 6 to 24 hour precipitation group of section 1
    SynopticPrecipitation,
    /// 24 hour total, 7R24R24R24R24
    DailyPrecipitation,
    /// Individual cloud layers, 8NsChshs
    CloudLayers,
    /// State of the ground, E and E'
    GroundState,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Surface,
        Section::HourlyPrecipitation,
        Section::IntermediatePrecipitation,
        Section::SynopticPrecipitation,
        Section::DailyPrecipitation,
        Section::CloudLayers,
        Section::GroundState,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// The set of sections that received at least one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionSet {
    bits: u8,
}

impl SectionSet {
    pub fn insert(&mut self, section: Section) {
        self.bits |= section.bit();
    }

    pub fn contains(&self, section: Section) -> bool {
        self.bits & section.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Populated sections in report order
    pub fn iter(&self) -> impl Iterator<Item = Section> + '_ {
        Section::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

// =============================================================================
// Report Sections
// =============================================================================

/// Section 1 fields resolved from surface (layer 0) descriptors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSection {
    /// ix, unset until a weather descriptor reveals the station type
    pub ix: Option<StationOperation>,
    /// VV, horizontal visibility
    pub vv: Field,
    /// N, total cloud cover in okta
    pub n: Field,
    /// Nh, amount of the low (or middle) cloud
    pub nh: Field,
    /// h, height of the lowest cloud base
    pub h: CloudBase,
    /// ww, present weather
    pub ww: Field,
    /// W1, past weather
    pub w1: Field,
    /// W2, past weather
    pub w2: Field,
    /// CL, low cloud genus
    pub cl: Field,
    /// CM, middle cloud genus
    pub cm: Field,
    /// CH, high cloud genus
    pub ch: Field,
}

/// Precipitation groups of sections 1 and 3
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecipitationSection {
    pub hourly: PrecipitationSlot,
    pub intermediate: PrecipitationSlot,
    pub synoptic: PrecipitationSlot,
    /// R24R24R24R24, 24 hour total in tenths of mm
    pub daily_total: Field,
}

impl PrecipitationSection {
    pub fn slot(&self, group: WindowGroup) -> &PrecipitationSlot {
        match group {
            WindowGroup::Hourly => &self.hourly,
            WindowGroup::Intermediate => &self.intermediate,
            WindowGroup::Synoptic => &self.synoptic,
        }
    }

    pub fn slot_mut(&mut self, group: WindowGroup) -> &mut PrecipitationSlot {
        match group {
            WindowGroup::Hourly => &mut self.hourly,
            WindowGroup::Intermediate => &mut self.intermediate,
            WindowGroup::Synoptic => &mut self.synoptic,
        }
    }
}

/// One 8NsChshs group of section 3
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudLayer {
    /// Ns, amount of the layer
    pub ns: Field,
    /// C, genus of the layer
    pub genus: Field,
    /// hshs, height of the layer base
    pub height: Field,
}

impl CloudLayer {
    pub fn is_empty(&self) -> bool {
        !self.ns.is_set() && !self.genus.is_set() && !self.height.is_set()
    }
}

/// State of the ground group 3EjjjE'sss, section 3
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundSection {
    /// E, ground without snow or measurable ice cover
    pub without_snow: Field,
    /// E', ground with snow or measurable ice cover
    pub with_snow: Field,
}

/// The in-progress SYNOP report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynopReport {
    /// Sections that carry at least one written field
    pub sections: SectionSet,
    pub surface: SurfaceSection,
    pub precipitation: PrecipitationSection,
    /// Cloud layer groups; layer index k lives at position k - 1
    pub cloud_layers: Vec<CloudLayer>,
    pub ground: GroundSection,
}

impl SynopReport {
    /// Create an empty report with room for `max_cloud_layers` layer groups
    pub fn new(max_cloud_layers: usize) -> Self {
        Self {
            sections: SectionSet::default(),
            surface: SurfaceSection::default(),
            precipitation: PrecipitationSection::default(),
            cloud_layers: vec![CloudLayer::default(); max_cloud_layers],
            ground: GroundSection::default(),
        }
    }

    /// Cloud layer for a 1-based layer index
    pub fn cloud_layer(&self, layer_index: u32) -> Option<&CloudLayer> {
        let position = (layer_index as usize).checked_sub(1)?;
        self.cloud_layers.get(position)
    }

    /// Mutable cloud layer for a 1-based layer index
    pub fn cloud_layer_mut(&mut self, layer_index: u32) -> Option<&mut CloudLayer> {
        let position = (layer_index as usize).checked_sub(1)?;
        self.cloud_layers.get_mut(position)
    }

    /// Record that a field of `section` was written
    pub fn mark(&mut self, section: Section) {
        self.sections.insert(section);
    }

    /// Whether no descriptor has written anything yet
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SynopReport {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CLOUD_LAYERS)
    }
}
