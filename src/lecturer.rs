use crate::model::{BlockId, CourseCode, InputModel, LecturerId};
use std::collections::BTreeMap;

/// Derives `lecturer_schedules` from `course_blocks` after either solver
/// has run (spec §4.7). Identical regardless of which solver produced the
/// schedule.
///
/// This does not enforce lecturer conflicts: nothing here forbids two
/// courses taught by the same lecturer from landing in the same block
/// unless `EngineConfig::enforce_lecturer_conflict` added the optional ILP
/// constraint (spec §9, acknowledged design limitation carried over from
/// the source system).
pub fn derive(
    input: &InputModel,
    course_blocks: &BTreeMap<CourseCode, Vec<BlockId>>,
) -> BTreeMap<LecturerId, BTreeMap<BlockId, CourseCode>> {
    let mut lecturer_schedules: BTreeMap<LecturerId, BTreeMap<BlockId, CourseCode>> = BTreeMap::new();

    for lecturer in &input.lecturers {
        for code in &lecturer.courses {
            let Some(blocks) = course_blocks.get(code) else {
                continue;
            };
            let entry = lecturer_schedules.entry(lecturer.id.clone()).or_default();
            for block in blocks {
                entry.insert(block.clone(), code.clone());
            }
        }
    }

    lecturer_schedules
}
