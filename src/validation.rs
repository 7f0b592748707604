use crate::error::EngineError;
use crate::model::InputModel;
use std::collections::HashSet;

/// Loader-facing validation (spec §6, §7). Fatal invariant violations are
/// returned as `Err`; everything recoverable (an unknown course code in a
/// request) is returned as a warning string for the caller to surface
/// however it likes - the engine itself never writes to stderr/stdout for
/// semantic purposes.
pub fn validate_input(input: &InputModel) -> Result<Vec<String>, EngineError> {
    if input.blocks.is_empty() {
        return Err(EngineError::InputInvariantViolation(
            "block list is empty".to_string(),
        ));
    }

    let mut seen_courses = HashSet::new();
    for course in &input.courses {
        if !seen_courses.insert(course.code.as_str()) {
            return Err(EngineError::InputInvariantViolation(format!(
                "duplicate course code: {}",
                course.code
            )));
        }
        if !course.size_invariant_holds() {
            return Err(EngineError::InputInvariantViolation(format!(
                "course {} violates min_size <= target_size <= max_size ({} <= {} <= {})",
                course.code, course.min_size, course.target_size, course.max_size
            )));
        }
    }

    let block_set: HashSet<&str> = input.blocks.iter().map(|b| b.as_str()).collect();
    for course in &input.courses {
        for block in &course.available_blocks {
            if !block_set.contains(block.as_str()) {
                return Err(EngineError::InputInvariantViolation(format!(
                    "course {} lists unknown block {} in available_blocks",
                    course.code, block
                )));
            }
        }
    }

    let mut seen_students = HashSet::new();
    for student in &input.students {
        if !seen_students.insert(student.id.as_str()) {
            return Err(EngineError::InputInvariantViolation(format!(
                "duplicate student id: {}",
                student.id
            )));
        }
    }

    let mut seen_lecturers = HashSet::new();
    for lecturer in &input.lecturers {
        if !seen_lecturers.insert(lecturer.id.as_str()) {
            return Err(EngineError::InputInvariantViolation(format!(
                "duplicate lecturer id: {}",
                lecturer.id
            )));
        }
    }

    let mut seen_rooms = HashSet::new();
    for room in &input.rooms {
        if !seen_rooms.insert(room.room_number.as_str()) {
            return Err(EngineError::InputInvariantViolation(format!(
                "duplicate room number: {}",
                room.room_number
            )));
        }
        if room.capacity < 1 {
            return Err(EngineError::InputInvariantViolation(format!(
                "room {} has non-positive capacity", room.room_number
            )));
        }
    }

    let mut warnings = Vec::new();
    let course_codes: HashSet<&str> = input.courses.iter().map(|c| c.code.as_str()).collect();
    for student in &input.students {
        for (code, priority) in student.requests.iter() {
            if !course_codes.contains(code.as_str()) {
                warnings.push(format!(
                    "student {} requested unknown course code {} ({priority})",
                    student.id, code
                ));
            }
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Course, RequestBuckets, Room, RoomType, Student};

    fn course(code: &str) -> Course {
        Course {
            code: code.into(),
            title: code.into(),
            credits: 1,
            department: "Gen".into(),
            length: 1,
            min_size: 1,
            target_size: 5,
            max_size: 10,
            num_sections: 1,
            available_blocks: vec!["1A".into()],
            forbidden_blocks: vec![],
        }
    }

    fn base() -> InputModel {
        InputModel {
            courses: vec![course("MATH")],
            students: vec![],
            lecturers: vec![],
            rooms: vec![Room {
                room_number: "101".into(),
                capacity: 10,
                room_type: RoomType::Standard,
                building: "Main".into(),
            }],
            blocks: vec!["1A".into()],
        }
    }

    #[test]
    fn empty_block_list_is_fatal() {
        let mut input = base();
        input.blocks.clear();
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn duplicate_course_code_is_fatal() {
        let mut input = base();
        input.courses.push(course("MATH"));
        assert!(validate_input(&input).is_err());
    }

    #[test]
    fn unknown_course_reference_is_a_warning_not_an_error() {
        let mut input = base();
        input.students.push(Student {
            id: "s1".into(),
            year: "2026".into(),
            requests: RequestBuckets {
                required: vec!["GHOST".into()],
                requested: vec![],
                recommended: vec![],
            },
        });
        let warnings = validate_input(&input).expect("should not be fatal");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("GHOST"));
    }

    #[test]
    fn zero_capacity_room_is_fatal() {
        let mut input = base();
        input.rooms[0].capacity = 0;
        assert!(validate_input(&input).is_err());
    }
}
