// src/strategy/traits.rs

use std::fmt::{self, Debug};

use serde::Serialize;

use crate::error::{ResolveError, Result};
use crate::model::entity::ProductId;
use crate::resolution::catalog::SourceCandidate;
use crate::resolution::detector::Shortage;
use crate::strategy::optimization;

/// One donor → recipient movement inside a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub donor: String,
    pub product: ProductId,
    pub quantity: u32,
    pub distance_km: f64,
}

/// The solver's answer for a single shortage.
///
/// `assigned + residual == shortage.deficit` always holds; constructors only
/// go through [`AllocationPlan::from_assignments`], which derives the residual.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationPlan {
    pub shortage: Shortage,
    pub assignments: Vec<Assignment>,
    pub residual: u32,
}

impl AllocationPlan {
    /// Builds a plan and derives the residual. Zero-quantity assignments are
    /// dropped.
    ///
    /// Fails with `MismatchedProduct` when an assignment moves a product other
    /// than the one short, and with `OverAllocation` when the assignments add
    /// up to more than the deficit.
    pub fn from_assignments(shortage: Shortage, assignments: Vec<Assignment>) -> Result<Self> {
        let assignments: Vec<Assignment> =
            assignments.into_iter().filter(|a| a.quantity > 0).collect();
        let supplied = assignments.iter().map(|a| u64::from(a.quantity)).sum::<u64>();
        let residual = u64::from(shortage.deficit).saturating_sub(supplied) as u32;

        let plan = Self {
            shortage,
            assignments,
            residual,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Checks that every assignment targets the short product and that the
    /// assignments stay within the deficit.
    pub fn validate(&self) -> Result<()> {
        let shortage = &self.shortage;
        if let Some(stray) = self
            .assignments
            .iter()
            .find(|a| a.product != shortage.product)
        {
            return Err(ResolveError::MismatchedProduct {
                entity: shortage.entity.clone(),
                expected: shortage.product.clone(),
                found: stray.product.clone(),
                donor: stray.donor.clone(),
            });
        }

        let supplied = self
            .assignments
            .iter()
            .map(|a| u64::from(a.quantity))
            .sum::<u64>();
        if supplied > u64::from(shortage.deficit) {
            return Err(ResolveError::OverAllocation {
                entity: shortage.entity.clone(),
                product: shortage.product.clone(),
                deficit: shortage.deficit,
                supplied: u32::try_from(supplied).unwrap_or(u32::MAX),
            });
        }
        Ok(())
    }

    pub fn supplied(&self) -> u32 {
        self.assignments.iter().map(|a| a.quantity).sum()
    }

    pub fn is_resolved(&self) -> bool {
        self.residual == 0
    }

    /// Σ distance × quantity, in km·units.
    pub fn weighted_cost(&self) -> f64 {
        optimization::weighted_cost(
            self.assignments
                .iter()
                .map(|a| (a.distance_km, a.quantity)),
        )
    }

    /// Average kilometers per supplied unit, 0 when nothing was supplied.
    pub fn distance_per_unit(&self) -> f64 {
        optimization::distance_per_unit(self.weighted_cost(), self.supplied())
    }
}

impl fmt::Display for AllocationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shortage = &self.shortage;
        if self.is_resolved() {
            writeln!(
                f,
                "{} shortage of {} resolved ({} units)",
                shortage.entity, shortage.product, shortage.deficit
            )?;
        } else {
            writeln!(
                f,
                "{} still short by {} units of {}",
                shortage.entity, self.residual, shortage.product
            )?;
        }
        for assignment in &self.assignments {
            writeln!(
                f,
                "  - {} supplied {} units at {:.2} km",
                assignment.donor, assignment.quantity, assignment.distance_km
            )?;
        }
        if !self.assignments.is_empty() {
            write!(
                f,
                "  average distance per unit: {:.2} km",
                self.distance_per_unit()
            )?;
        }
        Ok(())
    }
}

/// Decides which donors cover a shortage and by how much.
///
/// Implementations must be deterministic: identical shortage and candidates
/// always produce the identical plan. They never mutate anything; applying the
/// plan is the applier's job.
pub trait AllocationStrategy: Debug + Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Produces a plan for `shortage` from `candidates`.
    ///
    /// Partial coverage is not an error; it shows up as a non-zero residual.
    fn allocate(
        &self,
        shortage: &Shortage,
        candidates: &[SourceCandidate],
    ) -> Result<AllocationPlan>;
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

    fn assignment(donor: &str, product: &str, quantity: u32) -> Assignment {
        Assignment {
            donor: donor.into(),
            product: product.into(),
            quantity,
            distance_km: 4.0,
        }
    }

    #[test]
    fn residual_is_derived_and_zero_rows_dropped() {
        let plan = AllocationPlan::from_assignments(
            shortage(10),
            vec![assignment("S1", "A", 6), assignment("S2", "A", 0)],
        )
        .unwrap();
        assert_eq!(plan.assignments.len(), 1);
        assert_eq!(plan.supplied(), 6);
        assert_eq!(plan.residual, 4);
        assert!(!plan.is_resolved());
        assert!((plan.distance_per_unit() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn empty_plan_leaves_whole_deficit() {
        let plan = AllocationPlan::from_assignments(shortage(8), Vec::new()).unwrap();
        assert_eq!(plan.residual, 8);
        assert_eq!(plan.distance_per_unit(), 0.0);
        assert_eq!(plan.to_string(), "H still short by 8 units of A\n");
    }

    #[test]
    fn over_allocation_is_rejected() {
        let err = AllocationPlan::from_assignments(
            shortage(5),
            vec![assignment("S1", "A", 4), assignment("S2", "A", 3)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::OverAllocation {
                entity: "H".into(),
                product: "A".into(),
                deficit: 5,
                supplied: 7,
            }
        );
    }

    #[test]
    fn assignment_for_another_product_is_rejected() {
        let err = AllocationPlan::from_assignments(shortage(5), vec![assignment("S", "B", 5)])
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MismatchedProduct { ref found, .. } if found == "B"
        ));
    }
}
