use crate::model::{CourseCode, InputModel, Priority};
use std::collections::{HashMap, HashSet};

/// Per-course request tallies by priority, as built by
/// `DemandIndex::build`. Mirrors the `course_demand` dict the source
/// system computes before scheduling (spec §4.1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demand {
    pub required: u32,
    pub requested: u32,
    pub recommended: u32,
    pub total: u32,
}

impl Demand {
    fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Required => self.required += 1,
            Priority::Requested => self.requested += 1,
            Priority::Recommended => self.recommended += 1,
        }
        self.total += 1;
    }
}

/// The demand index: per-course tallies, the set of codes any student
/// actually asked for, and an advisory list of courses whose demand
/// outstrips their total capacity.
#[derive(Debug, Clone, Default)]
pub struct DemandIndex {
    pub demand: HashMap<CourseCode, Demand>,
    pub requested_set: HashSet<CourseCode>,
    pub potential_conflicts: Vec<CourseCode>,
}

impl DemandIndex {
    /// Walks every student once. Variable count downstream is dominated by
    /// `|students| * |codes| * |blocks|`, so restricting everything to
    /// `requested_set` can shrink the ILP model by an order of magnitude
    /// without changing its optimal value (spec §4.1).
    pub fn build(input: &InputModel) -> DemandIndex {
        let catalog: HashSet<&str> = input.courses.iter().map(|c| c.code.as_str()).collect();
        let mut demand: HashMap<CourseCode, Demand> = HashMap::new();
        let mut requested_set: HashSet<CourseCode> = HashSet::new();

        // Requests naming a code absent from the catalog are dropped here
        // and never materialise a variable; the loader is responsible for
        // surfacing them as `UnknownCourseReference` warnings (spec §7).
        for student in &input.students {
            for (code, priority) in student.requests.iter() {
                if !catalog.contains(code.as_str()) {
                    continue;
                }
                demand.entry(code.clone()).or_default().record(priority);
                requested_set.insert(code.clone());
            }
        }

        let mut potential_conflicts = Vec::new();
        for course in &input.courses {
            if let Some(d) = demand.get(&course.code) {
                let capacity = course.max_size.saturating_mul(course.num_sections.max(1));
                if d.total > capacity {
                    potential_conflicts.push(course.code.clone());
                }
            }
        }
        // Stable, input-order-independent ordering for determinism (P6):
        // sort by code once tallies are final.
        potential_conflicts.sort();

        DemandIndex {
            demand,
            requested_set,
            potential_conflicts,
        }
    }

    /// Requested course codes sorted by total demand descending, ties
    /// broken lexicographically by code so fallback scheduling (spec
    /// §4.6 phase F1) is deterministic across runs.
    pub fn course_demand_sorted(&self) -> Vec<CourseCode> {
        let mut codes: Vec<CourseCode> = self.requested_set.iter().cloned().collect();
        codes.sort_by(|a, b| {
            let da = self.demand.get(a).map(|d| d.total).unwrap_or(0);
            let db = self.demand.get(b).map(|d| d.total).unwrap_or(0);
            db.cmp(&da).then_with(|| a.cmp(b))
        });
        codes
    }

    pub fn total_for(&self, code: &str) -> u32 {
        self.demand.get(code).map(|d| d.total).unwrap_or(0)
    }
}
