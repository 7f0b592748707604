use crate::config::EngineConfig;
use crate::constraints::{add_constraints, build_objective};
use crate::demand::DemandIndex;
use crate::error::EngineError;
use crate::extractor;
use crate::model::{InputModel, ScheduleResult};
use crate::registry::VariableRegistry;
use good_lp::{default_solver, ProblemVariables, Solution, SolverModel};
use log::{debug, info, warn};

/// What the ILP driver decided about a solve attempt. `schedule()` uses
/// this to choose between the ILP's extracted result and the fallback
/// heuristic (spec §4.4).
pub enum IlpOutcome {
    /// The solver returned something worth extracting.
    Usable {
        result: ScheduleResult,
        objective: f64,
        optimal: bool,
    },
    /// Infeasible, unbounded, errored, or produced essentially nothing.
    Unusable { reason: String },
}

/// Submits the model to the external ILP solver with a wall-clock time
/// limit and extracts a schedule if the result clears the usability bar
/// (spec §4.4: status must be Optimal/Feasible, objective non-null, and
/// objective >= 1).
pub fn solve(
    input: &InputModel,
    demand: &DemandIndex,
    config: &EngineConfig,
) -> Result<IlpOutcome, EngineError> {
    let mut problem = ProblemVariables::new();
    let registry = VariableRegistry::build(&mut problem, input, demand);

    info!(
        "ILP model: {} student-assignment variables, {} course-scheduling variables",
        registry.x.len(),
        registry.y.len()
    );

    if registry.x.is_empty() || registry.y.is_empty() {
        return Ok(IlpOutcome::Unusable {
            reason: "no feasible (student, course, block) or (course, block, room) combinations".to_string(),
        });
    }

    let objective = build_objective(input, &registry);

    let mut model = problem
        .maximise(objective.clone())
        .using(default_solver)
        .set_option("threads", config.solver_threads as i32)
        .set_option("random_seed", config.random_seed)
        .set_option("time_limit", config.ilp_time_limit_secs as f64)
        .set_option("log_to_console", "false");

    add_constraints(&mut model, input, &registry, config);

    debug!("handing model to the ILP solver (time limit {}s)", config.ilp_time_limit_secs);
    let solution = match model.solve() {
        Ok(solution) => solution,
        Err(e) => {
            warn!("ILP solver returned an error: {e}");
            return Ok(IlpOutcome::Unusable {
                reason: format!("solver error: {e}"),
            });
        }
    };

    let objective_value = solution.eval(objective.clone());
    info!("ILP objective value: {objective_value}");

    if objective_value < config.zero_objective_threshold {
        return Ok(IlpOutcome::Unusable {
            reason: format!("objective value {objective_value} below usability threshold"),
        });
    }

    let result = extractor::extract(&registry, &solution)?;

    Ok(IlpOutcome::Usable {
        result,
        objective: objective_value,
        optimal: true,
    })
}
