use crate::demand::DemandIndex;
use crate::model::{BlockId, CourseCode, InputModel, RoomId, StudentId};
use good_lp::{variable, ProblemVariables, Variable};
use std::collections::{HashMap, HashSet};

pub type XKey = (StudentId, CourseCode, BlockId);
pub type YKey = (CourseCode, BlockId, RoomId);

/// Deterministic enumeration of the decision variables `x[s,c,b]` and
/// `y[c,b,r]`, restricted to `demand.requested_set` (spec §4.2).
///
/// Besides the flat `x`/`y` maps, the registry precomputes the groupings
/// the constraint builder needs (all `x` for a student+block, all `y` for a
/// course+block, etc.) so that every constraint family in §4.3 probes the
/// registry in amortised O(1) instead of re-scanning the full variable set.
pub struct VariableRegistry {
    pub x: HashMap<XKey, Variable>,
    pub y: HashMap<YKey, Variable>,

    /// (student, block) -> [(course, var)], for C1.
    pub x_by_student_block: HashMap<(StudentId, BlockId), Vec<(CourseCode, Variable)>>,
    /// (course, block) -> [(student, var)], for C4/C5/C6 enrolment sums.
    pub x_by_course_block: HashMap<(CourseCode, BlockId), Vec<(StudentId, Variable)>>,
    /// (course, block) -> [(room, var)], for C2/C4/C5/C6 "is scheduled" sums.
    pub y_by_course_block: HashMap<(CourseCode, BlockId), Vec<(RoomId, Variable)>>,
    /// (room, block) -> [(course, var)], for C3.
    pub y_by_room_block: HashMap<(RoomId, BlockId), Vec<(CourseCode, Variable)>>,
}

impl VariableRegistry {
    pub fn build(problem: &mut ProblemVariables, input: &InputModel, demand: &DemandIndex) -> VariableRegistry {
        let mut x: HashMap<XKey, Variable> = HashMap::new();
        let mut y: HashMap<YKey, Variable> = HashMap::new();

        let mut x_by_student_block: HashMap<(StudentId, BlockId), Vec<(CourseCode, Variable)>> = HashMap::new();
        let mut x_by_course_block: HashMap<(CourseCode, BlockId), Vec<(StudentId, Variable)>> = HashMap::new();
        let mut y_by_course_block: HashMap<(CourseCode, BlockId), Vec<(RoomId, Variable)>> = HashMap::new();
        let mut y_by_room_block: HashMap<(RoomId, BlockId), Vec<(CourseCode, Variable)>> = HashMap::new();

        // x[s,c,b]: union of a student's three request buckets, restricted
        // to the requested set, one variable per (student, code, block).
        for student in &input.students {
            let mut seen: HashSet<&CourseCode> = HashSet::new();
            let mut codes: Vec<&CourseCode> = Vec::new();
            for (code, _priority) in student.requests.iter() {
                if demand.requested_set.contains(code) && seen.insert(code) {
                    codes.push(code);
                }
            }
            for code in codes {
                for block in &input.blocks {
                    let key: XKey = (student.id.clone(), code.clone(), block.clone());
                    if x.contains_key(&key) {
                        // Registering the same key twice would be a bug;
                        // the dedupe above should make this unreachable.
                        continue;
                    }
                    let var = problem.add(variable().binary());
                    x.insert(key.clone(), var);
                    x_by_student_block
                        .entry((student.id.clone(), block.clone()))
                        .or_default()
                        .push((code.clone(), var));
                    x_by_course_block
                        .entry((code.clone(), block.clone()))
                        .or_default()
                        .push((student.id.clone(), var));
                }
            }
        }

        // y[c,b,r]: only courses referenced by at least one request.
        for course in &input.courses {
            if !demand.requested_set.contains(&course.code) {
                continue;
            }
            for block in &input.blocks {
                for room in &input.rooms {
                    let key: YKey = (course.code.clone(), block.clone(), room.room_number.clone());
                    if y.contains_key(&key) {
                        continue;
                    }
                    let var = problem.add(variable().binary());
                    y.insert(key.clone(), var);
                    y_by_course_block
                        .entry((course.code.clone(), block.clone()))
                        .or_default()
                        .push((room.room_number.clone(), var));
                    y_by_room_block
                        .entry((room.room_number.clone(), block.clone()))
                        .or_default()
                        .push((course.code.clone(), var));
                }
            }
        }

        VariableRegistry {
            x,
            y,
            x_by_student_block,
            x_by_course_block,
            y_by_course_block,
            y_by_room_block,
        }
    }

    pub fn x_var(&self, student: &str, code: &str, block: &str) -> Option<Variable> {
        self.x
            .get(&(student.to_string(), code.to_string(), block.to_string()))
            .copied()
    }

    pub fn y_var(&self, code: &str, block: &str, room: &str) -> Option<Variable> {
        self.y
            .get(&(code.to_string(), block.to_string(), room.to_string()))
            .copied()
    }
}
