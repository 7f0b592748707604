use crate::config::EngineConfig;
use crate::model::InputModel;
use crate::registry::VariableRegistry;
use good_lp::{constraint, Expression, SolverModel};
use std::collections::{HashMap, HashSet};

/// Relaxation constants from spec §4.3/§9. These are part of the contract,
/// not tuning knobs: changing them changes the schedule produced on
/// otherwise-identical input.
pub const CAPACITY_FLOOR: u32 = 5;
pub const MIN_SIZE_RELAXATION: u32 = 3;
pub const MAX_SIZE_RELAXATION: u32 = 5;

/// `maximise Σ weight(priority(s,c)) * x[s,c,b]` over every registered `x`,
/// counting a `(student, course)` pair once per bucket it appears in (the
/// same tolerant-but-discouraged double-counting the source system
/// performs when a code is placed in more than one bucket, spec §3).
pub fn build_objective(input: &InputModel, registry: &VariableRegistry) -> Expression {
    let mut terms: Vec<Expression> = Vec::new();
    for student in &input.students {
        for (code, priority) in student.requests.iter() {
            let weight = priority.weight() as f64;
            for block in &input.blocks {
                if let Some(var) = registry.x_var(&student.id, code, block) {
                    terms.push(weight * var);
                }
            }
        }
    }
    terms.into_iter().sum()
}

/// Emits constraint families C1-C6 of spec §4.3 against an already-built
/// model. A constraint that would quantify over an empty set of variables
/// is skipped rather than emitted as a degenerate `0 <= bound` (spec §9).
///
/// Every family below walks `input`'s entity vectors (students, courses,
/// rooms, blocks) rather than the registry's `HashMap`s directly: a
/// `HashMap`'s iteration order is randomised per process, and emitting rows
/// to the ILP in a different order on byte-identical input can make HiGHS
/// land on a different optimal vertex when the model has alternative optima
/// (spec §5, "constraint emission iterate[s] entities in their input
/// order"; P6). The registry is only ever probed by key here, never
/// iterated.
pub fn add_constraints<M: SolverModel>(
    model: &mut M,
    input: &InputModel,
    registry: &VariableRegistry,
    config: &EngineConfig,
) {
    // C1: student conflict.
    for student in &input.students {
        for block in &input.blocks {
            let Some(terms) = registry.x_by_student_block.get(&(student.id.clone(), block.clone())) else {
                continue;
            };
            if terms.is_empty() {
                continue;
            }
            let sum: Expression = terms.iter().map(|(_, var)| *var).sum();
            model.add_constraint(constraint!(sum <= 1));
        }
    }

    // C2: a course occupies at most one room per block.
    for course in &input.courses {
        for block in &input.blocks {
            let Some(terms) = registry.y_by_course_block.get(&(course.code.clone(), block.clone())) else {
                continue;
            };
            if terms.is_empty() {
                continue;
            }
            let sum: Expression = terms.iter().map(|(_, var)| *var).sum();
            model.add_constraint(constraint!(sum <= 1));
        }
    }

    // C3: a room hosts at most one course per block.
    for room in &input.rooms {
        for block in &input.blocks {
            let Some(terms) = registry.y_by_room_block.get(&(room.room_number.clone(), block.clone())) else {
                continue;
            };
            if terms.is_empty() {
                continue;
            }
            let sum: Expression = terms.iter().map(|(_, var)| *var).sum();
            model.add_constraint(constraint!(sum <= 1));
        }
    }

    // C4: attendance linkage, x[s,c,b] <= sum_r y[c,b,r].
    for student in &input.students {
        let mut seen: HashSet<&str> = HashSet::new();
        for (code, _priority) in student.requests.iter() {
            if !seen.insert(code.as_str()) {
                continue;
            }
            for block in &input.blocks {
                let Some(x_var) = registry.x_var(&student.id, code, block) else {
                    continue;
                };
                let Some(room_terms) = registry.y_by_course_block.get(&(code.clone(), block.clone())) else {
                    // No y variables exist for this (course, block) at all
                    // (e.g. the room list is empty) - nothing to link
                    // against, so skip.
                    continue;
                };
                if room_terms.is_empty() {
                    continue;
                }
                let sched: Expression = room_terms.iter().map(|(_, var)| *var).sum();
                model.add_constraint(constraint!(x_var <= sched));
            }
        }
    }

    let room_capacity: HashMap<&str, u32> = input
        .rooms
        .iter()
        .map(|r| (r.room_number.as_str(), r.capacity))
        .collect();

    // C5: capacity, relaxed with a floor so small seminars can still run in
    // undersized rooms (spec §4.3, §9).
    for course in &input.courses {
        for block in &input.blocks {
            let Some(students) = registry.x_by_course_block.get(&(course.code.clone(), block.clone())) else {
                continue;
            };
            if students.is_empty() {
                continue;
            }
            for room in &input.rooms {
                let Some(y_var) = registry.y_var(&course.code, block, &room.room_number) else {
                    continue;
                };
                let capacity = room_capacity.get(room.room_number.as_str()).copied().unwrap_or(0);
                let effective_capacity = capacity.max(CAPACITY_FLOOR) as f64;
                let enrol: Expression = students.iter().map(|(_, var)| *var).sum();
                model.add_constraint(constraint!(enrol <= effective_capacity * y_var));
            }
        }
    }

    // C6: size bounds, relaxed by -3/+5 to avoid trivially infeasible
    // instances driven by small tails (spec §4.3, §9).
    for course in &input.courses {
        for block in &input.blocks {
            let Some(room_terms) = registry.y_by_course_block.get(&(course.code.clone(), block.clone())) else {
                continue;
            };
            if room_terms.is_empty() {
                continue;
            }
            let Some(students) = registry.x_by_course_block.get(&(course.code.clone(), block.clone())) else {
                continue;
            };
            if students.is_empty() {
                continue;
            }

            let min_bound = (course.min_size.saturating_sub(MIN_SIZE_RELAXATION)).max(1);
            let max_bound = course.max_size + MAX_SIZE_RELAXATION;

            let sched: Expression = room_terms.iter().map(|(_, var)| *var).sum();
            let enrol: Expression = students.iter().map(|(_, var)| *var).sum();

            model.add_constraint(constraint!(enrol.clone() <= max_bound as f64 * sched.clone()));

            if students.len() as u32 >= min_bound {
                model.add_constraint(constraint!(enrol >= min_bound as f64 * sched));
            }
        }
    }

    // Optional, off by default: forbid a lecturer from being scheduled in
    // two courses in the same block. Not part of the baseline model (spec
    // §4.7, §9) - exposed for callers who opt in via `EngineConfig`.
    if config.enforce_lecturer_conflict {
        for lecturer in &input.lecturers {
            for block in &input.blocks {
                let mut sched_terms: Vec<Expression> = Vec::new();
                for code in &lecturer.courses {
                    if let Some(room_terms) = registry.y_by_course_block.get(&(code.clone(), block.clone())) {
                        if !room_terms.is_empty() {
                            sched_terms.push(room_terms.iter().map(|(_, var)| *var).sum());
                        }
                    }
                }
                if sched_terms.len() < 2 {
                    continue;
                }
                let total: Expression = sched_terms.into_iter().sum();
                model.add_constraint(constraint!(total <= 1));
            }
        }
    }
}
