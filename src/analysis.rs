use crate::demand::DemandIndex;
use crate::model::{CourseCode, InputModel, Priority, ScheduleResult};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityStat {
    pub total: u32,
    pub resolved: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityBreakdown {
    pub required: PriorityStat,
    pub requested: PriorityStat,
    pub recommended: PriorityStat,
}

impl PriorityBreakdown {
    fn stat_mut(&mut self, priority: Priority) -> &mut PriorityStat {
        match priority {
            Priority::Required => &mut self.required,
            Priority::Requested => &mut self.requested,
            Priority::Recommended => &mut self.recommended,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseStat {
    pub total: u32,
    pub resolved: u32,
    pub unresolved: u32,
    pub rate: f64,
}

/// Post-solve resolution statistics (spec §4.8).
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleAnalysis {
    pub total_requests: u32,
    pub resolved_requests: u32,
    pub unresolved_requests: u32,
    pub priority_stats: PriorityBreakdown,
    pub course_stats: HashMap<CourseCode, CourseStat>,
    /// Courses ordered by resolution rate descending, ties broken by code.
    pub courses_by_resolution_rate: Vec<CourseCode>,
}

/// A request `(s, c, ·)` is resolved iff the student's schedule contains
/// `c` in some block (spec §4.8). A code appearing in more than one
/// priority bucket (tolerated, see §3) is counted once per occurrence.
/// A request naming a code absent from the catalog is an
/// `UnknownCourseReference` (spec §7) and is dropped from every
/// denominator here, the same as it is dropped from variable enumeration
/// (`demand.rs`'s `requested_set`).
pub fn analyze(input: &InputModel, schedule: &ScheduleResult) -> ScheduleAnalysis {
    let mut total_requests = 0u32;
    let mut resolved_requests = 0u32;
    let mut unresolved_requests = 0u32;
    let mut priority_stats = PriorityBreakdown::default();
    let mut course_stats: HashMap<CourseCode, CourseStat> = HashMap::new();
    let catalog: HashSet<&str> = input.courses.iter().map(|c| c.code.as_str()).collect();

    for student in &input.students {
        let attended: HashSet<&CourseCode> = schedule
            .student_schedules
            .get(&student.id)
            .map(|m| m.values().collect())
            .unwrap_or_default();

        for (code, priority) in student.requests.iter() {
            if !catalog.contains(code.as_str()) {
                continue;
            }
            total_requests += 1;
            let p_stat = priority_stats.stat_mut(priority);
            p_stat.total += 1;
            let c_stat = course_stats.entry(code.clone()).or_default();
            c_stat.total += 1;

            if attended.contains(code) {
                resolved_requests += 1;
                p_stat.resolved += 1;
                c_stat.resolved += 1;
            } else {
                unresolved_requests += 1;
                c_stat.unresolved += 1;
            }
        }
    }

    for stat in [
        &mut priority_stats.required,
        &mut priority_stats.requested,
        &mut priority_stats.recommended,
    ] {
        if stat.total > 0 {
            stat.percentage = (stat.resolved as f64 / stat.total as f64) * 100.0;
        }
    }

    for stat in course_stats.values_mut() {
        if stat.total > 0 {
            stat.rate = (stat.resolved as f64 / stat.total as f64) * 100.0;
        }
    }

    let mut courses_by_resolution_rate: Vec<CourseCode> = course_stats.keys().cloned().collect();
    courses_by_resolution_rate.sort_by(|a, b| {
        let ra = course_stats[a].rate;
        let rb = course_stats[b].rate;
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.cmp(b))
    });

    ScheduleAnalysis {
        total_requests,
        resolved_requests,
        unresolved_requests,
        priority_stats,
        course_stats,
        courses_by_resolution_rate,
    }
}

/// Pre-solve insights derived purely from demand, useful for a caller's
/// report writer (out of scope here, but the data should exist for one to
/// consume - mirrors the source system's pre-solve analysis pass).
#[derive(Debug, Clone, Serialize)]
pub struct PreSolveAnalysis {
    pub top_requested_courses: Vec<CourseCode>,
    pub priority_counts: PriorityCounts,
    pub average_requests_per_student: f64,
    pub potential_conflicts: Vec<CourseCode>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityCounts {
    pub required: u32,
    pub requested: u32,
    pub recommended: u32,
}

pub fn analyze_demand(input: &InputModel, demand: &DemandIndex) -> PreSolveAnalysis {
    let ranked = demand.course_demand_sorted();
    let top_requested_courses = ranked.into_iter().take(10).collect();

    let mut priority_counts = PriorityCounts::default();
    for d in demand.demand.values() {
        priority_counts.required += d.required;
        priority_counts.requested += d.requested;
        priority_counts.recommended += d.recommended;
    }

    let total_requests: usize = input
        .students
        .iter()
        .map(|s| s.requests.required.len() + s.requests.requested.len() + s.requests.recommended.len())
        .sum();
    let average_requests_per_student = if input.students.is_empty() {
        0.0
    } else {
        total_requests as f64 / input.students.len() as f64
    };

    PreSolveAnalysis {
        top_requested_courses,
        priority_counts,
        average_requests_per_student,
        potential_conflicts: demand.potential_conflicts.clone(),
    }
}
