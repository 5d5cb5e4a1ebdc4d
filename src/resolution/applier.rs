// src/resolution/applier.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ResolveError, Result};
use crate::model::entity::ProductId;
use crate::model::network::NetworkModel;
use crate::strategy::traits::AllocationPlan;

/// A transfer that was actually carried out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedTransfer {
    pub donor: String,
    pub recipient: String,
    pub product: ProductId,
    pub quantity: u32,
    pub distance_km: f64,
}

/// Part of a shortage nobody could cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedShortage {
    pub entity: String,
    pub product: ProductId,
    pub remaining: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationReport {
    pub transfers: Vec<AppliedTransfer>,
    pub unresolved: Vec<UnresolvedShortage>,
}

impl AllocationReport {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn units_moved(&self) -> u64 {
        self.transfers.iter().map(|t| u64::from(t.quantity)).sum()
    }

    pub fn weighted_cost(&self) -> f64 {
        self.transfers
            .iter()
            .map(|t| t.distance_km * f64::from(t.quantity))
            .sum()
    }

    pub fn merge(&mut self, other: AllocationReport) {
        self.transfers.extend(other.transfers);
        self.unresolved.extend(other.unresolved);
    }
}

/// Moves stock as `plan` says and reports what happened.
///
/// The plan itself and every assignment against current donor stock are
/// checked before anything changes, so a failing plan leaves the network
/// untouched. Not idempotent: applying the same plan twice moves the stock
/// twice.
pub fn apply(plan: &AllocationPlan, network: &mut NetworkModel) -> Result<AllocationReport> {
    let recipient = plan.shortage.entity.as_str();
    let product = plan.shortage.product.as_str();

    if network.get(recipient).is_none() {
        return Err(ResolveError::UnknownEntity(recipient.to_string()));
    }
    plan.validate()?;

    // Same donor may appear more than once; check the running total.
    let mut committed: HashMap<(&str, &str), u32> = HashMap::new();
    for assignment in &plan.assignments {
        let donor = network
            .get(&assignment.donor)
            .ok_or_else(|| ResolveError::UnknownEntity(assignment.donor.clone()))?;
        let already = committed
            .entry((assignment.donor.as_str(), assignment.product.as_str()))
            .or_insert(0);
        let available = donor.stock(&assignment.product).saturating_sub(*already);
        if available < assignment.quantity {
            return Err(ResolveError::InsufficientDonorStock {
                donor: assignment.donor.clone(),
                product: assignment.product.clone(),
                available,
                requested: assignment.quantity,
            });
        }
        *already += assignment.quantity;
    }

    let mut report = AllocationReport::default();
    for assignment in &plan.assignments {
        network
            .get_mut(&assignment.donor)?
            .release(&assignment.product, assignment.quantity)?;
        network
            .get_mut(recipient)?
            .receive(&assignment.product, assignment.quantity);

        tracing::debug!(
            donor = %assignment.donor,
            recipient,
            product = %assignment.product,
            quantity = assignment.quantity,
            distance_km = assignment.distance_km,
            "transfer_applied"
        );
        report.transfers.push(AppliedTransfer {
            donor: assignment.donor.clone(),
            recipient: recipient.to_string(),
            product: assignment.product.clone(),
            quantity: assignment.quantity,
            distance_km: assignment.distance_km,
        });
    }

    let remaining = plan.shortage.deficit - plan.supplied();
    if remaining > 0 {
        tracing::warn!(entity = recipient, product, remaining, "shortage_unresolved");
        report.unresolved.push(UnresolvedShortage {
            entity: recipient.to_string(),
            product: product.to_string(),
            remaining,
        });
    }

    Ok(report)
}
