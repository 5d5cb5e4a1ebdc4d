pub mod implementations;
pub mod optimization;
pub mod traits;

pub use implementations::{ExhaustiveMinimumCost, GreedyEfficiency, MAX_ENUMERABLE_CANDIDATES};
pub use traits::{AllocationPlan, AllocationStrategy, Assignment};
