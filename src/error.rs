// src/error.rs

use thiserror::Error;

/// Every failure the resolution engine can report.
///
/// A shortage that cannot be fully covered is *not* an error: it shows up as a
/// residual on the plan and as an unresolved record in the report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("entity '{entity}' is malformed: {reason}")]
    MalformedEntity { entity: String, reason: String },

    #[error("entity name '{0}' appears more than once in the network")]
    DuplicateEntity(String),

    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("exhaustive search over {count} candidates exceeds the cap of {cap}")]
    TooManyCandidates { count: usize, cap: usize },

    #[error("exhaustive search aborted after {steps} subsets: {reason}")]
    Aborted { steps: u64, reason: String },

    #[error(
        "donor '{donor}' holds {available} units of '{product}' but the plan assigns {requested}"
    )]
    InsufficientDonorStock {
        donor: String,
        product: String,
        available: u32,
        requested: u32,
    },

    #[error("plan for '{entity}' is short of '{expected}' but assigns '{found}' from '{donor}'")]
    MismatchedProduct {
        entity: String,
        expected: String,
        found: String,
        donor: String,
    },

    #[error("plan for '{entity}' assigns {supplied} units of '{product}' against a deficit of {deficit}")]
    OverAllocation {
        entity: String,
        product: String,
        deficit: u32,
        supplied: u32,
    },
}

impl ResolveError {
    pub fn malformed(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
