use crate::config::EngineConfig;
use crate::demand::DemandIndex;
use crate::error::EngineError;
use crate::ilp::{self, IlpOutcome};
use crate::lecturer;
use crate::model::{InputModel, ScheduleResult, ScheduleStatus};
use crate::{fallback, validation};
use log::{info, warn};

/// The engine's one operation (spec §6): normalise demand, try the ILP,
/// fall back to the heuristic if it's unusable, then derive lecturer
/// schedules the same way regardless of which solver ran.
pub fn schedule(input: &InputModel, config: &EngineConfig) -> Result<ScheduleResult, EngineError> {
    info!(
        "scheduling {} students over {} courses, {} rooms, {} blocks",
        input.students.len(),
        input.courses.len(),
        input.rooms.len(),
        input.blocks.len()
    );

    let warnings = validation::validate_input(input)?;
    let demand = DemandIndex::build(input);

    // Nothing was ever requested: there is no request to fail to satisfy,
    // so this is vacuously optimal rather than a zero-objective failure
    // that would otherwise trigger the fallback (spec §8 boundary
    // scenario 1).
    if demand.requested_set.is_empty() {
        info!("no requested courses in the requested set; returning an empty optimal schedule");
        let mut result = ScheduleResult::empty(ScheduleStatus::Optimal);
        result.warnings = warnings;
        return Ok(result);
    }

    let mut result = match ilp::solve(input, &demand, config)? {
        IlpOutcome::Usable { result, objective, optimal } => {
            info!("ILP produced a usable schedule, objective = {objective}");
            ScheduleResult {
                status: if optimal { ScheduleStatus::Optimal } else { ScheduleStatus::Feasible },
                ..result
            }
        }
        IlpOutcome::Unusable { reason } => {
            warn!("ILP result unusable ({reason}); invoking the fallback heuristic");
            fallback::solve(input, &demand)
        }
    };

    result.lecturer_schedules = lecturer::derive(input, &result.course_blocks);
    result.warnings = warnings;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, Lecturer, RequestBuckets, Room, RoomType, Student};

    fn single_request_fixture() -> InputModel {
        InputModel {
            courses: vec![Course {
                code: "MATH".into(),
                title: "Algebra".into(),
                credits: 3,
                department: "Math".into(),
                length: 1,
                min_size: 1,
                target_size: 5,
                max_size: 10,
                num_sections: 1,
                available_blocks: vec!["1A".into(), "1B".into()],
                forbidden_blocks: vec![],
            }],
            students: vec![Student {
                id: "s1".into(),
                year: "2026".into(),
                requests: RequestBuckets {
                    required: vec!["MATH".into()],
                    requested: vec![],
                    recommended: vec![],
                },
            }],
            lecturers: vec![Lecturer {
                id: "L1".into(),
                name: "Prof".into(),
                department: "Math".into(),
                courses: vec!["MATH".into()],
            }],
            rooms: vec![Room {
                room_number: "101".into(),
                capacity: 10,
                room_type: RoomType::Standard,
                building: "Main".into(),
            }],
            blocks: vec!["1A".into(), "1B".into()],
        }
    }

    #[test]
    fn empty_requests_yield_trivially_optimal_empty_schedule() {
        let mut input = single_request_fixture();
        input.students.clear();
        let result = schedule(&input, &EngineConfig::default()).unwrap();
        assert_eq!(result.status, ScheduleStatus::Optimal);
        assert!(result.student_schedules.is_empty());
        assert!(result.course_blocks.is_empty());
    }

    #[test]
    fn fatal_validation_error_short_circuits_scheduling() {
        let mut input = single_request_fixture();
        input.blocks.clear();
        let result = schedule(&input, &EngineConfig::default());
        assert!(result.is_err());
    }
}
