//! Type definitions for the group search

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One member of a qualifying group
///
/// Serializes with the `Name`/`Traits` keys of the results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionMember {
    /// Unit name
    #[serde(rename = "Name")]
    pub name: String,
    /// Activatable traits retained by the activation filter
    #[serde(rename = "Traits")]
    pub traits: Vec<String>,
}

/// A group of exactly the target size that activates enough traits
///
/// Members are listed in selection order, which follows the pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Group members
    pub members: Vec<SolutionMember>,
    /// Traits active in the group, in interning order
    pub active_traits: Vec<String>,
}

impl Solution {
    /// Member names in selection order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of active traits
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_traits.len()
    }
}

/// How a search run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    /// The whole search space was covered
    Complete,
    /// The run was cancelled; the solutions found so far are valid but the
    /// list may be missing groups
    Cancelled,
}

/// Counters collected during a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes entered
    pub nodes_visited: u64,
    /// Nodes abandoned by the bound or for lack of remaining units
    pub branches_pruned: u64,
    /// Full-size groups whose active traits were counted
    pub groups_evaluated: u64,
    /// Wall-clock time of the run
    pub elapsed: Duration,
    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self {
            nodes_visited: 0,
            branches_pruned: 0,
            groups_evaluated: 0,
            elapsed: Duration::ZERO,
            started_at: Utc::now(),
        }
    }
}

impl SearchStats {
    /// Add the counters of another run
    pub fn absorb(&mut self, other: &Self) {
        self.nodes_visited += other.nodes_visited;
        self.branches_pruned += other.branches_pruned;
        self.groups_evaluated += other.groups_evaluated;
    }
}

/// Result of a search run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Qualifying groups in discovery order
    pub solutions: Vec<Solution>,
    /// Whether the run covered the whole search space
    pub status: SearchStatus,
    /// Counters
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// A completed run without solutions
    #[must_use]
    pub fn empty() -> Self {
        Self {
            solutions: Vec::new(),
            status: SearchStatus::Complete,
            stats: SearchStats::default(),
        }
    }

    /// Whether the run covered the whole search space
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SearchStatus::Complete
    }
}
