// src/resolution/catalog.rs

use serde::Serialize;

use crate::error::{ResolveError, Result};
use crate::model::entity::Entity;
use crate::resolution::detector::Shortage;

/// A donor that could cover part of a shortage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceCandidate {
    pub donor: String,
    /// Great-circle distance from the short entity to the donor, in km.
    pub distance_km: f64,
    /// Donor stock above its own floor for the shortage's product.
    pub deliverable: u32,
}

impl SourceCandidate {
    /// Kilometers travelled per unit if this donor gave everything it can.
    pub fn cost_per_unit(&self) -> f64 {
        self.distance_km / f64::from(self.deliverable)
    }
}

/// Lists every entity other than the short one that has surplus of the
/// shortage's product, with its distance. Donors are never drained below
/// their own floor. Candidates come out in entity order.
pub fn build_candidates(shortage: &Shortage, entities: &[Entity]) -> Result<Vec<SourceCandidate>> {
    let recipient = entities
        .iter()
        .find(|entity| entity.name == shortage.entity)
        .ok_or_else(|| ResolveError::UnknownEntity(shortage.entity.clone()))?;

    let candidates: Vec<SourceCandidate> = entities
        .iter()
        .filter(|donor| donor.name != recipient.name)
        .filter_map(|donor| {
            let deliverable = donor.deliverable(&shortage.product);
            (deliverable > 0).then(|| SourceCandidate {
                donor: donor.name.clone(),
                distance_km: recipient.coordinates.distance_to(&donor.coordinates),
                deliverable,
            })
        })
        .collect();

    tracing::debug!(
        entity = %shortage.entity,
        product = %shortage.product,
        candidates = candidates.len(),
        "source_catalog_built"
    );

    Ok(candidates)
}
