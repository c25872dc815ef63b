use crate::environment::ScopeResolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub scope_resolution: ScopeResolution,
    /// Report scan anomalies instead of silently dropping them.
    pub report_scan_errors: bool,
    /// Upper bound on the number of times a single `while` body may run.
    pub max_loop_iterations: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope_resolution: ScopeResolution::TwoLevel,
            report_scan_errors: true,
            max_loop_iterations: None,
        }
    }
}
