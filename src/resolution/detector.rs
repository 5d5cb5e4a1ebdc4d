// src/resolution/detector.rs

use serde::Serialize;

use crate::model::entity::{Entity, ProductId};

/// One product at one entity sitting below its floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortage {
    pub entity: String,
    pub product: ProductId,
    pub deficit: u32,
}

/// Scans `entities` and reports every (entity, product) whose stock is below
/// its floor.
///
/// Entities come out in the order given; within an entity, products come out
/// in lexicographic order. Pure read.
pub fn detect(entities: &[Entity]) -> Vec<Shortage> {
    let mut shortages = Vec::new();

    for entity in entities {
        for product in entity.floor.keys() {
            let deficit = entity.deficit(product);
            if deficit > 0 {
                tracing::debug!(
                    entity = %entity.name,
                    product = %product,
                    stock = entity.stock(product),
                    floor = entity.floor_for(product),
                    deficit,
                    "shortage_detected"
                );
                shortages.push(Shortage {
                    entity: entity.name.clone(),
                    product: product.clone(),
                    deficit,
                });
            }
        }
    }

    shortages
}
