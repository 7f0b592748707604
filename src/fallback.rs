use crate::demand::DemandIndex;
use crate::model::{BlockId, CourseCode, InputModel, RoomId, ScheduleResult, ScheduleStatus, StudentId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Greedy demand-sorted block/room packer paired with a first-fit student
/// assignment pass, used when the ILP produces no usable result (spec
/// §4.6). Tie-breaking is pinned to `(load, block_index)` for blocks and
/// `(capacity, room_index)` for rooms so identical inputs yield identical
/// schedules across runs.
pub fn solve(input: &InputModel, demand: &DemandIndex) -> ScheduleResult {
    let (course_blocks, course_rooms, room_schedules) = phase_f1_place_courses(input, demand);
    let student_schedules = phase_f2_assign_students(input, &course_blocks);

    let status = if course_blocks.is_empty() {
        ScheduleStatus::Empty
    } else {
        ScheduleStatus::Fallback
    };

    ScheduleResult {
        course_blocks,
        course_rooms,
        student_schedules,
        room_schedules,
        lecturer_schedules: BTreeMap::new(),
        status,
        warnings: Vec::new(),
    }
}

/// Phase F1: rank requested courses by total demand descending, place each
/// into the least-loaded block with a not-yet-used room whose capacity
/// meets the course's minimum size.
fn phase_f1_place_courses(
    input: &InputModel,
    demand: &DemandIndex,
) -> (
    BTreeMap<CourseCode, Vec<BlockId>>,
    BTreeMap<CourseCode, BTreeMap<BlockId, RoomId>>,
    BTreeMap<RoomId, BTreeMap<BlockId, CourseCode>>,
) {
    let block_index: HashMap<&str, usize> = input.blocks.iter().enumerate().map(|(i, b)| (b.as_str(), i)).collect();
    let room_index: HashMap<&str, usize> = input
        .rooms
        .iter()
        .enumerate()
        .map(|(i, r)| (r.room_number.as_str(), i))
        .collect();

    let mut block_load: HashMap<BlockId, u32> = input.blocks.iter().map(|b| (b.clone(), 0)).collect();
    let mut room_taken_in_block: HashMap<BlockId, HashSet<RoomId>> = HashMap::new();

    let mut course_blocks: BTreeMap<CourseCode, Vec<BlockId>> = BTreeMap::new();
    let mut course_rooms: BTreeMap<CourseCode, BTreeMap<BlockId, RoomId>> = BTreeMap::new();
    let mut room_schedules: BTreeMap<RoomId, BTreeMap<BlockId, CourseCode>> = BTreeMap::new();

    for code in demand.course_demand_sorted() {
        let Some(course) = input.course(&code) else {
            continue;
        };

        let mut blocks_by_load: Vec<&BlockId> = input.blocks.iter().collect();
        blocks_by_load.sort_by_key(|b| (block_load[b.as_str()], block_index[b.as_str()]));

        let mut rooms_by_fit: Vec<&crate::model::Room> = input.rooms.iter().collect();
        rooms_by_fit.sort_by_key(|r| (r.capacity, room_index[r.room_number.as_str()]));

        'blocks: for block in blocks_by_load {
            let taken = room_taken_in_block.entry(block.clone()).or_default();
            for room in &rooms_by_fit {
                if room.capacity < course.min_size {
                    continue;
                }
                if taken.contains(&room.room_number) {
                    continue;
                }
                taken.insert(room.room_number.clone());
                *block_load.get_mut(block.as_str()).unwrap() += 1;
                course_blocks.entry(code.clone()).or_default().push(block.clone());
                course_rooms
                    .entry(code.clone())
                    .or_default()
                    .insert(block.clone(), room.room_number.clone());
                room_schedules
                    .entry(room.room_number.clone())
                    .or_default()
                    .insert(block.clone(), code.clone());
                break 'blocks;
            }
        }
    }

    (course_blocks, course_rooms, room_schedules)
}

/// Phase F2: for each student, in required/requested/recommended order,
/// assign the first placed block of each requested course that doesn't
/// already conflict with something else in the student's schedule.
fn phase_f2_assign_students(
    input: &InputModel,
    course_blocks: &BTreeMap<CourseCode, Vec<BlockId>>,
) -> BTreeMap<StudentId, BTreeMap<BlockId, CourseCode>> {
    let mut student_schedules: BTreeMap<StudentId, BTreeMap<BlockId, CourseCode>> = BTreeMap::new();

    for student in &input.students {
        let mut assigned_blocks: HashSet<BlockId> = HashSet::new();
        let mut schedule: BTreeMap<BlockId, CourseCode> = BTreeMap::new();

        for (code, _priority) in student.requests.iter() {
            let Some(blocks) = course_blocks.get(code) else {
                continue;
            };
            for block in blocks {
                if !assigned_blocks.contains(block) {
                    assigned_blocks.insert(block.clone());
                    schedule.insert(block.clone(), code.clone());
                    break;
                }
            }
        }

        if !schedule.is_empty() {
            student_schedules.insert(student.id.clone(), schedule);
        }
    }

    student_schedules
}
