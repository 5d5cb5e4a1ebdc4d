// src/resolution/engine.rs

use serde::Serialize;

use crate::error::Result;
use crate::model::network::NetworkModel;
use crate::resolution::applier::{self, AllocationReport};
use crate::resolution::catalog;
use crate::resolution::config::ResolverConfig;
use crate::resolution::detector::{self, Shortage};
use crate::strategy::traits::{AllocationPlan, AllocationStrategy};

/// Everything one run found and did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolutionReport {
    pub strategy: String,
    /// Shortages as detected before any transfer.
    pub detected: Vec<Shortage>,
    /// One plan per shortage still open when its turn came, in order.
    pub plans: Vec<AllocationPlan>,
    pub allocation: AllocationReport,
}

impl ResolutionReport {
    pub fn is_fully_resolved(&self) -> bool {
        self.allocation.is_fully_resolved()
    }

    /// Σ distance × quantity over every applied transfer.
    pub fn total_weighted_cost(&self) -> f64 {
        self.allocation.weighted_cost()
    }

    /// Human-readable lines, one block per plan.
    pub fn summary_lines(&self) -> Vec<String> {
        if self.detected.is_empty() {
            return vec!["All entities are sufficiently supplied.".to_string()];
        }
        self.plans.iter().map(|plan| plan.to_string()).collect()
    }
}

/// Drives detect → catalog → solve → apply over one network snapshot.
///
/// Plans are applied as soon as they are computed, so each later shortage
/// sees donor stock as the earlier transfers left it.
#[derive(Debug)]
pub struct ResolutionEngine {
    strategy: Box<dyn AllocationStrategy>,
}

impl ResolutionEngine {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            strategy: config.build_strategy(),
        }
    }

    /// Uses a caller-supplied strategy instead of one from config.
    pub fn with_strategy(strategy: Box<dyn AllocationStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Solves one shortage against the current network without changing it.
    pub fn plan(&self, shortage: &Shortage, network: &NetworkModel) -> Result<AllocationPlan> {
        let candidates = catalog::build_candidates(shortage, network.entities())?;
        self.strategy.allocate(shortage, &candidates)
    }

    pub fn run(&self, network: &mut NetworkModel) -> Result<ResolutionReport> {
        let detected = detector::detect(network.entities());
        tracing::info!(
            strategy = self.strategy.name(),
            entities = network.len(),
            shortages = detected.len(),
            "resolution_started"
        );

        let mut report = ResolutionReport {
            strategy: self.strategy.name().to_string(),
            detected: detected.clone(),
            ..ResolutionReport::default()
        };

        for shortage in detected {
            // Earlier transfers may already have touched this entity.
            let deficit = network
                .get(&shortage.entity)
                .map_or(0, |entity| entity.deficit(&shortage.product));
            if deficit == 0 {
                continue;
            }
            let shortage = Shortage { deficit, ..shortage };

            let plan = self.plan(&shortage, network)?;
            let applied = applier::apply(&plan, network)?;

            report.allocation.merge(applied);
            report.plans.push(plan);
        }

        tracing::info!(
            strategy = self.strategy.name(),
            transfers = report.allocation.transfers.len(),
            units_moved = report.allocation.units_moved(),
            unresolved = report.allocation.unresolved.len(),
            weighted_cost_km_units = report.total_weighted_cost(),
            "resolution_finished"
        );

        Ok(report)
    }
}
