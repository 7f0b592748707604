/// Tunables for one `schedule()` call. The engine itself reads no
/// environment variables and accepts no CLI flags (see spec §6); everything
/// it needs is passed in here by the caller.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Wall-clock budget handed to the ILP backend, in seconds.
    pub ilp_time_limit_secs: u32,
    /// Threads the ILP backend is allowed to use. Pinned to 1 by default so
    /// that two calls on identical input produce byte-identical schedules.
    pub solver_threads: u32,
    /// Seed forwarded to the ILP backend for reproducibility.
    pub random_seed: i32,
    /// An objective value below this triggers the fallback heuristic, per
    /// spec §4.4 ("objective value < 1 ... essentially no request is
    /// fulfilled").
    pub zero_objective_threshold: f64,
    /// Adds `Σ_{c ∈ teaches(L)} y_sched(c,b) ≤ 1` per lecturer per block to
    /// the ILP. Off by default: the model as specified does not forbid a
    /// lecturer from being double-booked (spec §4.7, §9).
    pub enforce_lecturer_conflict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            ilp_time_limit_secs: 300,
            solver_threads: 1,
            random_seed: 1234,
            zero_objective_threshold: 1.0,
            enforce_lecturer_conflict: false,
        }
    }
}
