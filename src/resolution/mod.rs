pub mod applier;
pub mod catalog;
pub mod config;
pub mod detector;
pub mod disruption;
pub mod engine;

pub use applier::{apply, AllocationReport, AppliedTransfer, UnresolvedShortage};
pub use catalog::{build_candidates, SourceCandidate};
pub use config::{ExhaustiveLimits, ResolverConfig, StrategyKind, DEFAULT_EXHAUSTIVE_CANDIDATE_CAP};
pub use detector::{detect, Shortage};
pub use disruption::ExclusionImpact;
pub use engine::{ResolutionEngine, ResolutionReport};
