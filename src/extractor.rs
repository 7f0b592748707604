use crate::error::EngineError;
use crate::model::{BlockId, CourseCode, RoomId, ScheduleResult, ScheduleStatus};
use crate::registry::VariableRegistry;
use good_lp::Solution;
use log::error;
use std::collections::{BTreeMap, HashMap};

/// Rounding tolerance for binary decision variables (spec §4.5).
const BINARY_TOLERANCE: f64 = 0.5;

/// Walks every solved `y[c,b,r]` and `x[s,c,b]` above the binary tolerance
/// and builds the five schedule indices. `x` above tolerance with no
/// scheduled `y` for the same `(c,b)` means constraint C4 was violated -
/// an implementation bug, not a recoverable condition (spec §4.5, §7
/// `InternalConsistency`).
pub fn extract<S: Solution>(registry: &VariableRegistry, solution: &S) -> Result<ScheduleResult, EngineError> {
    let mut course_blocks: BTreeMap<CourseCode, Vec<BlockId>> = BTreeMap::new();
    let mut course_rooms: BTreeMap<CourseCode, BTreeMap<BlockId, RoomId>> = BTreeMap::new();
    let mut room_schedules: BTreeMap<RoomId, BTreeMap<BlockId, CourseCode>> = BTreeMap::new();
    let mut scheduled: HashMap<(CourseCode, BlockId), RoomId> = HashMap::new();

    for ((course, block, room), var) in &registry.y {
        if solution.value(*var) > BINARY_TOLERANCE {
            scheduled.insert((course.clone(), block.clone()), room.clone());
            course_rooms
                .entry(course.clone())
                .or_default()
                .insert(block.clone(), room.clone());
            room_schedules
                .entry(room.clone())
                .or_default()
                .insert(block.clone(), course.clone());
        }
    }

    for (course, blocks) in &course_rooms {
        course_blocks.insert(course.clone(), blocks.keys().cloned().collect());
    }

    let mut student_schedules: BTreeMap<String, BTreeMap<BlockId, CourseCode>> = BTreeMap::new();
    for ((student, course, block), var) in &registry.x {
        if solution.value(*var) > BINARY_TOLERANCE {
            if !scheduled.contains_key(&(course.clone(), block.clone())) {
                let msg = format!(
                    "x[{student},{course},{block}] is set but no y[{course},{block},*] is scheduled (C4 violated)"
                );
                error!("{msg}");
                return Err(EngineError::InternalConsistency(msg));
            }
            student_schedules
                .entry(student.clone())
                .or_default()
                .insert(block.clone(), course.clone());
        }
    }

    Ok(ScheduleResult {
        course_blocks,
        course_rooms,
        student_schedules,
        room_schedules,
        lecturer_schedules: BTreeMap::new(),
        status: ScheduleStatus::Optimal,
        warnings: Vec::new(),
    })
}
