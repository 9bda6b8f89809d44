//! Configuration for the group search.

use std::fmt;
use std::time::Duration;

/// Default number of units in a group
pub const DEFAULT_GROUP_SIZE: usize = 7;

/// Default number of traits a group must activate
pub const DEFAULT_MIN_ACTIVE_TRAITS: usize = 8;

/// Upper-bound estimate used to prune partial groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundStrategy {
    /// Counts every trait the remaining pool could still complete, ignoring
    /// how many picks are left
    #[default]
    Loose,
    /// Additionally caps the estimate by the number of remaining slots and
    /// the trait increments the best remaining picks can supply
    SlotCapped,
}

impl fmt::Display for BoundStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loose => write!(f, "loose"),
            Self::SlotCapped => write!(f, "slot-capped"),
        }
    }
}

/// Configuration for a search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of units in every group
    pub group_size: usize,

    /// Minimum number of active traits for a group to qualify
    pub min_active_traits: usize,

    /// Drop units left without activatable traits from the pool. When false
    /// they stay in the pool as filler members.
    pub exclude_traitless_units: bool,

    /// Pruning bound
    pub bound_strategy: BoundStrategy,

    /// Explore top-level branches in parallel
    pub use_parallel: bool,

    /// Draw progress bars while searching
    pub show_progress: bool,

    /// Abort the search once this much time has passed
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
            min_active_traits: DEFAULT_MIN_ACTIVE_TRAITS,
            exclude_traitless_units: true,
            bound_strategy: BoundStrategy::Loose,
            use_parallel: false,
            show_progress: false,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a search configuration
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Default configuration with overrides from the environment
    ///
    /// Reads `SYNERGY_GROUP_SIZE`, `SYNERGY_MIN_ACTIVE_TRAITS` and
    /// `SYNERGY_TIME_LIMIT_SECS`. Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(size) = env_usize("SYNERGY_GROUP_SIZE") {
            config.group_size = size;
        }
        if let Some(min) = env_usize("SYNERGY_MIN_ACTIVE_TRAITS") {
            config.min_active_traits = min;
        }
        if let Some(secs) = env_usize("SYNERGY_TIME_LIMIT_SECS") {
            config.time_limit = Some(Duration::from_secs(secs as u64));
        }
        config
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<usize>().ok())
}

impl fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Configuration:")?;
        writeln!(f, "  Group Size: {}", self.group_size)?;
        writeln!(f, "  Min Active Traits: {}", self.min_active_traits)?;
        writeln!(f, "  Exclude Traitless Units: {}", self.exclude_traitless_units)?;
        writeln!(f, "  Bound Strategy: {}", self.bound_strategy)?;
        writeln!(f, "  Parallel: {}", self.use_parallel)?;
        if let Some(limit) = self.time_limit {
            writeln!(f, "  Time Limit: {limit:?}")?;
        }
        Ok(())
    }
}

/// Builder for constructing a search configuration
#[derive(Debug, Clone)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub const fn from_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Set the group size
    #[must_use]
    pub const fn group_size(mut self, size: usize) -> Self {
        self.config.group_size = size;
        self
    }

    /// Set the minimum number of active traits
    #[must_use]
    pub const fn min_active_traits(mut self, min: usize) -> Self {
        self.config.min_active_traits = min;
        self
    }

    /// Set whether units without activatable traits are dropped
    #[must_use]
    pub const fn exclude_traitless_units(mut self, exclude: bool) -> Self {
        self.config.exclude_traitless_units = exclude;
        self
    }

    /// Set the pruning bound
    #[must_use]
    pub const fn bound_strategy(mut self, strategy: BoundStrategy) -> Self {
        self.config.bound_strategy = strategy;
        self
    }

    /// Set whether to use parallel processing
    #[must_use]
    pub const fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Set whether progress bars are drawn
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Set the time limit
    #[must_use]
    pub const fn time_limit(mut self, limit: Duration) -> Self {
        self.config.time_limit = Some(limit);
        self
    }

    /// Build the search configuration
    #[must_use]
    pub const fn build(self) -> SearchConfig {
        self.config
    }
}
