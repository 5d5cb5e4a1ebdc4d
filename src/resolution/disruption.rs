// src/resolution/disruption.rs

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::Result;
use crate::model::entity::ProductId;
use crate::model::network::NetworkModel;
use crate::resolution::applier::UnresolvedShortage;
use crate::resolution::engine::{ResolutionEngine, ResolutionReport};

/// What changes when some entities drop out of the network.
#[derive(Debug, Clone, Serialize)]
pub struct ExclusionImpact {
    pub excluded: Vec<String>,
    /// Spare stock (above own floor) the excluded entities held, per product.
    pub withdrawn_supply: BTreeMap<ProductId, u32>,
    /// Run over the full network.
    pub baseline: ResolutionReport,
    /// Run over the network without the excluded entities.
    pub scenario: ResolutionReport,
    /// Shortages left open, or left larger, only because of the exclusion.
    pub newly_unresolved: Vec<UnresolvedShortage>,
}

impl ExclusionImpact {
    pub fn has_impact(&self) -> bool {
        !self.newly_unresolved.is_empty()
    }

    pub fn impacted_products(&self) -> BTreeSet<ProductId> {
        self.newly_unresolved
            .iter()
            .map(|u| u.product.clone())
            .collect()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let who = self.excluded.join(", ");
        let mut lines = Vec::new();

        if self.withdrawn_supply.is_empty() {
            lines.push(format!("Excluding {who} withdraws no spare stock."));
        } else {
            let supply: Vec<String> = self
                .withdrawn_supply
                .iter()
                .map(|(product, units)| format!("{units} units of {product}"))
                .collect();
            lines.push(format!("Excluding {who} withdraws {}.", supply.join(", ")));
        }

        if !self.has_impact() {
            lines.push("No shortage gets worse.".to_string());
        }
        for open in &self.newly_unresolved {
            lines.push(format!(
                "{} would be left short by {} units of {}",
                open.entity, open.remaining, open.product
            ));
        }
        lines
    }
}

impl ResolutionEngine {
    /// Resolves `network` twice, once as is and once without `excluded`, and
    /// reports the shortages only the reduced network leaves open.
    ///
    /// Both runs work on copies; `network` itself is never changed.
    pub fn assess_exclusion(
        &self,
        network: &NetworkModel,
        excluded: &[&str],
    ) -> Result<ExclusionImpact> {
        let mut reduced = network.without(excluded)?;

        let mut withdrawn_supply = BTreeMap::new();
        for entity in network
            .entities()
            .iter()
            .filter(|entity| excluded.contains(&entity.name.as_str()))
        {
            for product in entity.inventory.keys() {
                let spare = entity.deliverable(product);
                if spare > 0 {
                    *withdrawn_supply.entry(product.clone()).or_insert(0) += spare;
                }
            }
        }

        let baseline = self.run(&mut network.clone())?;
        let scenario = self.run(&mut reduced)?;

        let before: BTreeMap<(&str, &str), u32> = baseline
            .allocation
            .unresolved
            .iter()
            .map(|u| ((u.entity.as_str(), u.product.as_str()), u.remaining))
            .collect();
        let newly_unresolved: Vec<UnresolvedShortage> = scenario
            .allocation
            .unresolved
            .iter()
            .filter(|u| {
                let was = before
                    .get(&(u.entity.as_str(), u.product.as_str()))
                    .copied()
                    .unwrap_or(0);
                u.remaining > was
            })
            .cloned()
            .collect();

        tracing::info!(
            excluded = excluded.len(),
            newly_unresolved = newly_unresolved.len(),
            "exclusion_assessed"
        );

        Ok(ExclusionImpact {
            excluded: excluded.iter().map(|name| name.to_string()).collect(),
            withdrawn_supply,
            baseline,
            scenario,
            newly_unresolved,
        })
    }
}
