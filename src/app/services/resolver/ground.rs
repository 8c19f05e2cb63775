//! State of the ground (0 20 062)

use super::{DescriptorHandler, Resolution, ResolutionContext};
use crate::app::models::ObservationRecord;
use crate::app::models::report::{Code, Section};
use crate::app::services::encoders::DIGIT_WIDTH;
use crate::constants::state_of_ground;
use tracing::debug;

/// 0 20 062, values 0-9 feed E and 10-19 feed E'
#[derive(Debug)]
pub struct StateOfGround;

pub static STATE_OF_GROUND: StateOfGround = StateOfGround;

impl DescriptorHandler for StateOfGround {
    fn resolve(
        &self,
        record: &ObservationRecord,
        context: &mut ResolutionContext<'_>,
    ) -> Resolution {
        if !record.has_value() {
            return Resolution::Missing;
        }

        let value = record.int_value;
        let ground = &mut context.report.ground;
        let field = match value {
            0..=state_of_ground::WITHOUT_SNOW_MAX => &mut ground.without_snow,
            10..=state_of_ground::WITH_SNOW_MAX => &mut ground.with_snow,
            _ => {
                debug!("State of ground value {} outside code table, ignoring", value);
                return Resolution::OutOfRange;
            }
        };

        if field.fill(Code::digits((value % 10) as u32, DIGIT_WIDTH).into()) {
            context.report.mark(Section::GroundState);
            Resolution::Applied
        } else {
            Resolution::SlotConflict
        }
    }
}
