use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// Type aliases for clarity, following the same convention as string/numeric
// ids elsewhere in the codebase: the domain is string-keyed end to end
// (course codes, room numbers, block tags all arrive from a spreadsheet
// upstream of this crate).
pub type CourseCode = String;
pub type StudentId = String;
pub type LecturerId = String;
pub type RoomId = String;
pub type BlockId = String;

/// One of the three request buckets a student can place a course in.
/// Weights are the objective coefficients used throughout the constraint
/// model (spec §3, §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Required,
    Requested,
    Recommended,
}

impl Priority {
    pub fn weight(self) -> i32 {
        match self {
            Priority::Required => 10,
            Priority::Requested => 5,
            Priority::Recommended => 1,
        }
    }

    pub const ALL: [Priority; 3] = [Priority::Required, Priority::Requested, Priority::Recommended];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Required => "required",
            Priority::Requested => "requested",
            Priority::Recommended => "recommended",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Priority {
    type Err = String;

    // The source data mixes "Required" and "required"; normalise to lower
    // case here so the rest of the engine never has to think about casing
    // again (spec §9, "ambiguous source behaviour").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "required" => Ok(Priority::Required),
            "requested" => Ok(Priority::Requested),
            "recommended" => Ok(Priority::Recommended),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// Room type. Not load-bearing for any constraint today, but carried
/// through from input to schedule so a downstream reporter can group by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Standard,
    Lab,
    Studio,
    LectureHall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_number: RoomId,
    pub capacity: u32,
    pub room_type: RoomType,
    pub building: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    pub title: String,
    pub credits: u32,
    pub department: String,
    pub length: u32,
    pub min_size: u32,
    pub target_size: u32,
    pub max_size: u32,
    pub num_sections: u32,
    pub available_blocks: Vec<BlockId>,
    #[serde(default)]
    pub forbidden_blocks: Vec<BlockId>,
}

impl Course {
    /// Checks the size invariant of spec §3: `min_size <= target_size <= max_size`.
    pub fn size_invariant_holds(&self) -> bool {
        self.min_size <= self.target_size && self.target_size <= self.max_size
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBuckets {
    #[serde(default)]
    pub required: Vec<CourseCode>,
    #[serde(default)]
    pub requested: Vec<CourseCode>,
    #[serde(default)]
    pub recommended: Vec<CourseCode>,
}

impl RequestBuckets {
    pub fn bucket(&self, priority: Priority) -> &[CourseCode] {
        match priority {
            Priority::Required => &self.required,
            Priority::Requested => &self.requested,
            Priority::Recommended => &self.recommended,
        }
    }

    /// `(course_code, priority)` pairs across all three buckets, in
    /// required-then-requested-then-recommended order (spec §4.6 phase F2).
    pub fn iter(&self) -> impl Iterator<Item = (&CourseCode, Priority)> {
        Priority::ALL
            .into_iter()
            .flat_map(move |p| self.bucket(p).iter().map(move |c| (c, p)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub year: String,
    pub requests: RequestBuckets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    pub department: String,
    pub courses: Vec<CourseCode>,
}

/// The engine's sole input. Constructed once by an external loader,
/// immutable for the duration of a `schedule()` call (spec §3 "Lifecycle").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputModel {
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
    pub lecturers: Vec<Lecturer>,
    pub rooms: Vec<Room>,
    pub blocks: Vec<BlockId>,
}

impl InputModel {
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }
}

/// Status of a completed scheduling run. Callers cannot otherwise tell
/// whether the primary solver or the fallback heuristic produced a given
/// schedule (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleStatus {
    Optimal,
    Feasible,
    Fallback,
    Empty,
}

/// The five output indices of spec §3, plus the status tag and a warnings
/// side-channel (spec §7 propagation policy).
///
/// `BTreeMap` is used everywhere a `HashMap` would otherwise do: spec §5
/// requires byte-identical output on byte-identical input (P6), and a
/// sorted map gives that for free at serialization time without needing a
/// separate deterministic-ordering pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub course_blocks: BTreeMap<CourseCode, Vec<BlockId>>,
    pub course_rooms: BTreeMap<CourseCode, BTreeMap<BlockId, RoomId>>,
    pub student_schedules: BTreeMap<StudentId, BTreeMap<BlockId, CourseCode>>,
    pub room_schedules: BTreeMap<RoomId, BTreeMap<BlockId, CourseCode>>,
    pub lecturer_schedules: BTreeMap<LecturerId, BTreeMap<BlockId, CourseCode>>,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ScheduleResult {
    pub fn empty(status: ScheduleStatus) -> Self {
        ScheduleResult {
            course_blocks: BTreeMap::new(),
            course_rooms: BTreeMap::new(),
            student_schedules: BTreeMap::new(),
            room_schedules: BTreeMap::new(),
            lecturer_schedules: BTreeMap::new(),
            status,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_weights_match_spec() {
        assert_eq!(Priority::Required.weight(), 10);
        assert_eq!(Priority::Requested.weight(), 5);
        assert_eq!(Priority::Recommended.weight(), 1);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("REQUIRED".parse::<Priority>().unwrap(), Priority::Required);
        assert_eq!("Requested".parse::<Priority>().unwrap(), Priority::Requested);
        assert_eq!("recommended".parse::<Priority>().unwrap(), Priority::Recommended);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn course_size_invariant() {
        let mut course = Course {
            code: "MATH101".into(),
            title: "Algebra".into(),
            credits: 3,
            department: "Math".into(),
            length: 1,
            min_size: 5,
            target_size: 20,
            max_size: 30,
            num_sections: 1,
            available_blocks: vec!["1A".into()],
            forbidden_blocks: vec![],
        };
        assert!(course.size_invariant_holds());
        course.target_size = 3;
        assert!(!course.size_invariant_holds());
    }

    #[test]
    fn request_buckets_iterate_in_priority_order() {
        let buckets = RequestBuckets {
            required: vec!["A".into()],
            requested: vec!["B".into(), "C".into()],
            recommended: vec!["D".into()],
        };
        let order: Vec<_> = buckets.iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }
}
