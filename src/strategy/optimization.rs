// src/strategy/optimization.rs

//! Cost arithmetic and orderings shared by the allocation strategies.
//!
//! The objective throughout is transport effort: kilometers travelled times
//! units moved. Orderings always end on the donor name so equal-cost inputs
//! still sort the same way every time.

use std::cmp::Ordering;

use crate::resolution::catalog::SourceCandidate;

/// Σ distance × quantity over `(distance_km, quantity)` pairs.
pub fn weighted_cost<I>(legs: I) -> f64
where
    I: IntoIterator<Item = (f64, u32)>,
{
    legs.into_iter()
        .map(|(distance, quantity)| distance * f64::from(quantity))
        .sum()
}

/// Average km per unit, 0 when no units move.
pub fn distance_per_unit(weighted_cost: f64, units: u32) -> f64 {
    if units == 0 {
        return 0.0;
    }
    weighted_cost / f64::from(units)
}

/// Greedy ranking: cost per unit, then distance, then donor name.
pub fn efficiency_order(a: &SourceCandidate, b: &SourceCandidate) -> Ordering {
    a.cost_per_unit()
        .total_cmp(&b.cost_per_unit())
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.donor.cmp(&b.donor))
}

/// Nearest first, then donor name.
///
/// Filling a fixed donor set in this order minimizes its weighted cost, since
/// every unit costs exactly its donor's distance.
pub fn proximity_order(a: &SourceCandidate, b: &SourceCandidate) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| a.donor.cmp(&b.donor))
}
