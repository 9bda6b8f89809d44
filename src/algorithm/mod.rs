//! Algorithm implementations
//!
//! Currently the synergy group search: activation filtering, bound
//! estimation and the branch-and-bound enumerator.

pub mod search;
