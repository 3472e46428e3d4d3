//! Solver invocation parameters.

use std::time::Duration;

/// Configuration for one `solve` invocation.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Number of distinct best solutions to return (at least 1).
    pub solutions: usize,
    /// Number of worker threads to run (at least 1).
    pub num_workers: usize,
    /// Wall-clock budget for the whole search (None = unbounded).
    pub time_limit: Option<Duration>,
    /// How often each worker logs search progress.
    pub progress_interval: Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            solutions: 1,
            num_workers: num_cpus::get(),
            time_limit: None,
            progress_interval: Duration::from_secs(5),
        }
    }
}

impl SolverConfig {
    /// Set the number of solutions to find.
    pub fn with_solutions(mut self, solutions: usize) -> Self {
        self.solutions = solutions.max(1);
        self
    }

    /// Set the number of worker threads.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Set the wall-clock budget from an Option.
    pub fn with_time_limit_option(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Set the wall-clock budget in whole seconds, where 0 means unbounded.
    pub fn with_time_limit_secs(mut self, seconds: u64) -> Self {
        self.time_limit = (seconds > 0).then(|| Duration::from_secs(seconds));
        self
    }

    /// Set the progress logging interval.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.solutions, 1);
        assert!(config.num_workers >= 1);
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = SolverConfig::default()
            .with_solutions(3)
            .with_workers(4)
            .with_time_limit(Duration::from_secs(60));

        assert_eq!(config.solutions, 3);
        assert_eq!(config.num_workers, 4);
        assert_eq!(config.time_limit, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_minimums_are_clamped() {
        let config = SolverConfig::default().with_solutions(0).with_workers(0);
        assert_eq!(config.solutions, 1);
        assert_eq!(config.num_workers, 1);
    }

    #[test]
    fn test_zero_seconds_means_unbounded() {
        let config = SolverConfig::default().with_time_limit_secs(0);
        assert!(config.time_limit.is_none());

        let config = SolverConfig::default().with_time_limit_secs(30);
        assert_eq!(config.time_limit, Some(Duration::from_secs(30)));
    }
}
