// src/resolution/config.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::strategy::implementations::{
    ExhaustiveMinimumCost, GreedyEfficiency, MAX_ENUMERABLE_CANDIDATES,
};
use crate::strategy::traits::AllocationStrategy;

/// Candidate cap applied to the exhaustive search when the caller sets none.
pub const DEFAULT_EXHAUSTIVE_CANDIDATE_CAP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Greedy,
    Exhaustive,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "exhaustive" => Ok(Self::Exhaustive),
            other => Err(format!(
                "unknown strategy '{other}', expected 'greedy' or 'exhaustive'"
            )),
        }
    }
}

/// Bounds on the exhaustive search. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustiveLimits {
    /// Refuse to search more candidates than this (defaults to 20).
    pub max_candidates: Option<usize>,
    /// Abort after evaluating this many subsets.
    pub max_steps: Option<u64>,
    /// Abort once the search has run this long.
    pub time_budget_ms: Option<u64>,
}

impl ExhaustiveLimits {
    /// Effective candidate cap, never above what a subset mask can hold.
    pub fn candidate_cap(&self) -> usize {
        self.max_candidates
            .unwrap_or(DEFAULT_EXHAUSTIVE_CANDIDATE_CAP)
            .min(MAX_ENUMERABLE_CANDIDATES)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub strategy: StrategyKind,
    pub exhaustive: ExhaustiveLimits,
}

impl ResolverConfig {
    pub fn greedy() -> Self {
        Self::default()
    }

    pub fn exhaustive(limits: ExhaustiveLimits) -> Self {
        Self {
            strategy: StrategyKind::Exhaustive,
            exhaustive: limits,
        }
    }

    pub fn build_strategy(&self) -> Box<dyn AllocationStrategy> {
        match self.strategy {
            StrategyKind::Greedy => Box::new(GreedyEfficiency::new()),
            StrategyKind::Exhaustive => Box::new(ExhaustiveMinimumCost::new(self.exhaustive.clone())),
        }
    }
}
