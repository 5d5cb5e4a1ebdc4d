// src/strategy/implementations.rs

use std::time::{Duration, Instant};

use crate::error::{ResolveError, Result};
use crate::resolution::catalog::SourceCandidate;
use crate::resolution::config::ExhaustiveLimits;
use crate::resolution::detector::Shortage;
use crate::strategy::optimization::{efficiency_order, proximity_order};
use crate::strategy::traits::{AllocationPlan, AllocationStrategy, Assignment};

/// Largest candidate set a 64-bit subset mask can enumerate.
pub const MAX_ENUMERABLE_CANDIDATES: usize = 63;

/// How many subsets pass between wall-clock checks.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Fills `deficit` from `ordered` front to back, taking as much as each donor
/// can give.
fn fill_in_order<'a, I>(shortage: &Shortage, ordered: I) -> Result<AllocationPlan>
where
    I: IntoIterator<Item = &'a SourceCandidate>,
{
    let mut remaining = shortage.deficit;
    let mut assignments = Vec::new();

    for candidate in ordered {
        if remaining == 0 {
            break;
        }
        let quantity = remaining.min(candidate.deliverable);
        assignments.push(Assignment {
            donor: candidate.donor.clone(),
            product: shortage.product.clone(),
            quantity,
            distance_km: candidate.distance_km,
        });
        remaining -= quantity;
    }

    AllocationPlan::from_assignments(shortage.clone(), assignments)
}

// =========================================================================
// 1. Greedy Efficiency (default)
// =========================================================================

/// Ranks donors by kilometers per deliverable unit and takes from the best
/// ones until the deficit is covered or donors run out.
///
/// O(n log n) in the number of candidates. Not always cost-optimal: a large
/// stockpile far away can outrank a small one next door.
#[derive(Debug, Clone, Default)]
pub struct GreedyEfficiency;

impl GreedyEfficiency {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationStrategy for GreedyEfficiency {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn allocate(
        &self,
        shortage: &Shortage,
        candidates: &[SourceCandidate],
    ) -> Result<AllocationPlan> {
        let mut ordered: Vec<&SourceCandidate> =
            candidates.iter().filter(|c| c.deliverable > 0).collect();
        ordered.sort_by(|a, b| efficiency_order(a, b));

        fill_in_order(shortage, ordered)
    }
}

// =========================================================================
// 2. Exhaustive Minimum Distance Per Unit
// =========================================================================

/// Tries every donor subset that can cover the deficit and keeps the one
/// with the lowest distance per supplied unit.
///
/// Exponential (2^n subsets), so the candidate count is capped before any
/// work starts, and optional step/time budgets abort long searches. Within a
/// subset, nearer donors are drawn from first. When no subset covers the
/// deficit, every donor is drained nearest first and the rest is residual.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveMinimumCost {
    limits: ExhaustiveLimits,
}

impl ExhaustiveMinimumCost {
    pub fn new(limits: ExhaustiveLimits) -> Self {
        Self { limits }
    }

    fn check_budget(&self, steps: u64, started: Instant) -> Result<()> {
        if let Some(max_steps) = self.limits.max_steps {
            if steps > max_steps {
                return Err(ResolveError::Aborted {
                    steps,
                    reason: format!("step budget of {max_steps} exhausted"),
                });
            }
        }
        if let Some(budget_ms) = self.limits.time_budget_ms {
            if steps % CLOCK_CHECK_INTERVAL == 0
                && started.elapsed() > Duration::from_millis(budget_ms)
            {
                return Err(ResolveError::Aborted {
                    steps,
                    reason: format!("time budget of {budget_ms} ms exhausted"),
                });
            }
        }
        Ok(())
    }
}

/// Nearest-first fill of the donors selected by `mask`.
/// Returns (weighted cost, units supplied).
fn evaluate_subset(pool: &[&SourceCandidate], mask: u64, deficit: u32) -> (f64, u32) {
    let mut remaining = deficit;
    let mut cost = 0.0;

    for (i, candidate) in pool.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if mask & (1 << i) == 0 {
            continue;
        }
        let quantity = remaining.min(candidate.deliverable);
        cost += candidate.distance_km * f64::from(quantity);
        remaining -= quantity;
    }

    (cost, deficit - remaining)
}

fn subset_capacity(pool: &[&SourceCandidate], mask: u64) -> u64 {
    pool.iter()
        .enumerate()
        .filter(|&(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| u64::from(c.deliverable))
        .sum()
}

impl AllocationStrategy for ExhaustiveMinimumCost {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn allocate(
        &self,
        shortage: &Shortage,
        candidates: &[SourceCandidate],
    ) -> Result<AllocationPlan> {
        let mut pool: Vec<&SourceCandidate> =
            candidates.iter().filter(|c| c.deliverable > 0).collect();

        let cap = self.limits.candidate_cap();
        if pool.len() > cap {
            return Err(ResolveError::TooManyCandidates {
                count: pool.len(),
                cap,
            });
        }

        pool.sort_by(|a, b| proximity_order(a, b));

        let deficit = u64::from(shortage.deficit);
        let total: u64 = pool.iter().map(|c| u64::from(c.deliverable)).sum();
        if deficit == 0 || total < deficit {
            // No subset can cover it; the full set supplies the most possible.
            return fill_in_order(shortage, pool.iter().copied());
        }

        let started = Instant::now();
        let mut steps: u64 = 0;
        let mut best: Option<(f64, u64)> = None;

        for mask in 1..(1u64 << pool.len()) {
            steps += 1;
            self.check_budget(steps, started)?;

            if subset_capacity(&pool, mask) < deficit {
                continue;
            }

            let (cost, units) = evaluate_subset(&pool, mask, shortage.deficit);
            let per_unit = cost / f64::from(units);
            if best.map_or(true, |(best_per_unit, _)| per_unit < best_per_unit) {
                best = Some((per_unit, mask));
            }
        }

        tracing::debug!(
            entity = %shortage.entity,
            product = %shortage.product,
            candidates = pool.len(),
            steps,
            "exhaustive_search_finished"
        );

        // total >= deficit guarantees the full mask is feasible.
        let mask = best.map_or(u64::MAX, |(_, mask)| mask);
        let chosen = pool
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| *c);

        fill_in_order(shortage, chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortage(deficit: u32) -> Shortage {
        Shortage {
            entity: "H".into(),
            product: "A".into(),
            deficit,
        }
    }

    fn candidate(donor: &str, distance_km: f64, deliverable: u32) -> SourceCandidate {
        SourceCandidate {
            donor: donor.into(),
            distance_km,
            deliverable,
        }
    }

    fn quantities(plan: &AllocationPlan) -> Vec<(&str, u32)> {
        plan.assignments
            .iter()
            .map(|a| (a.donor.as_str(), a.quantity))
            .collect()
    }

    #[test]
    fn greedy_ranks_by_cost_per_unit() {
        let candidates = vec![
            candidate("near-small", 1.0, 5), // 0.2 km/unit
            candidate("far-big", 10.0, 100), // 0.1 km/unit
        ];
        let plan = GreedyEfficiency::new()
            .allocate(&shortage(20), &candidates)
            .unwrap();
        assert_eq!(quantities(&plan), vec![("far-big", 20)]);
        assert_eq!(plan.residual, 0);
    }

    #[test]
    fn greedy_leaves_residual_when_stock_runs_out() {
        let candidates = vec![candidate("S", 3.0, 7)];
        let plan = GreedyEfficiency::new()
            .allocate(&shortage(10), &candidates)
            .unwrap();
        assert_eq!(quantities(&plan), vec![("S", 7)]);
        assert_eq!(plan.residual, 3);
    }

    #[test]
    fn exhaustive_beats_greedy_when_greedy_is_fooled() {
        let candidates = vec![
            candidate("near-small", 1.0, 5),
            candidate("far-big", 10.0, 100),
        ];
        let greedy = GreedyEfficiency::new()
            .allocate(&shortage(20), &candidates)
            .unwrap();
        let exact = ExhaustiveMinimumCost::default()
            .allocate(&shortage(20), &candidates)
            .unwrap();

        assert_eq!(quantities(&exact), vec![("near-small", 5), ("far-big", 15)]);
        assert!(exact.weighted_cost() < greedy.weighted_cost());
    }

    #[test]
    fn exhaustive_tops_up_nearest_donor_from_next_nearest() {
        let candidates = vec![
            candidate("far", 50.0, 100),
            candidate("mid", 5.0, 100),
            candidate("near", 1.0, 3),
        ];
        let plan = ExhaustiveMinimumCost::default()
            .allocate(&shortage(10), &candidates)
            .unwrap();
        assert_eq!(quantities(&plan), vec![("near", 3), ("mid", 7)]);
    }

    #[test]
    fn exhaustive_drains_everything_when_uncoverable() {
        let candidates = vec![candidate("B", 2.0, 4), candidate("A", 1.0, 3)];
        let plan = ExhaustiveMinimumCost::default()
            .allocate(&shortage(10), &candidates)
            .unwrap();
        assert_eq!(quantities(&plan), vec![("A", 3), ("B", 4)]);
        assert_eq!(plan.residual, 3);
    }

    #[test]
    fn exhaustive_rejects_oversized_pool_up_front() {
        let candidates: Vec<_> = (0..25)
            .map(|i| candidate(&format!("S{i:02}"), f64::from(i), 1))
            .collect();
        let err = ExhaustiveMinimumCost::default()
            .allocate(&shortage(5), &candidates)
            .unwrap_err();
        assert_eq!(err, ResolveError::TooManyCandidates { count: 25, cap: 20 });
    }

    #[test]
    fn exhaustive_respects_step_budget() {
        let candidates: Vec<_> = (0..10)
            .map(|i| candidate(&format!("S{i}"), f64::from(i), 10))
            .collect();
        let limits = ExhaustiveLimits {
            max_steps: Some(100),
            ..ExhaustiveLimits::default()
        };
        let err = ExhaustiveMinimumCost::new(limits)
            .allocate(&shortage(15), &candidates)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Aborted { steps: 101, .. }));
    }

    #[test]
    fn exhaustive_respects_time_budget_at_clock_checks() {
        let candidates: Vec<_> = (0..16)
            .map(|i| candidate(&format!("S{i:02}"), f64::from(i), 10))
            .collect();
        let limits = ExhaustiveLimits {
            time_budget_ms: Some(0),
            ..ExhaustiveLimits::default()
        };
        let err = ExhaustiveMinimumCost::new(limits)
            .allocate(&shortage(15), &candidates)
            .unwrap_err();
        match err {
            ResolveError::Aborted { steps, reason } => {
                assert_eq!(steps, CLOCK_CHECK_INTERVAL);
                assert!(reason.contains("time budget"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_candidates_yield_full_residual() {
        for strategy in [
            Box::new(GreedyEfficiency::new()) as Box<dyn AllocationStrategy>,
            Box::new(ExhaustiveMinimumCost::default()),
        ] {
            let plan = strategy.allocate(&shortage(8), &[]).unwrap();
            assert!(plan.assignments.is_empty());
            assert_eq!(plan.residual, 8);
        }
    }
}
