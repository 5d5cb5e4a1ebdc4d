// src/model/entity.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::model::geo::Coordinates;

/// Product identifier (e.g. "A", "Gloves").
pub type ProductId = String;

/// What kind of node this is. Only used for reporting; the engine treats
/// hospitals and suppliers the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Hospital,
    Supplier,
}

/// A single node in the supply network.
///
/// Products live in ordered maps so every iteration over them is lexicographic
/// and reproducible. A supplier without declared floors simply has an empty
/// floor map, which reads as a zero floor for every product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    // Identity
    pub name: String,
    pub kind: EntityKind,
    pub coordinates: Coordinates,

    // State
    pub inventory: BTreeMap<ProductId, u32>,
    pub floor: BTreeMap<ProductId, u32>,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            kind,
            coordinates,
            inventory: BTreeMap::new(),
            floor: BTreeMap::new(),
        }
    }

    pub fn hospital(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self::new(name, EntityKind::Hospital, coordinates)
    }

    pub fn supplier(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self::new(name, EntityKind::Supplier, coordinates)
    }

    /// Sets on-hand stock for `product`, leaving its floor untouched.
    pub fn with_stock(mut self, product: impl Into<ProductId>, quantity: u32) -> Self {
        self.inventory.insert(product.into(), quantity);
        self
    }

    /// Sets both on-hand stock and the required minimum for `product`.
    pub fn with_stock_and_floor(
        mut self,
        product: impl Into<ProductId>,
        quantity: u32,
        floor: u32,
    ) -> Self {
        let product = product.into();
        self.inventory.insert(product.clone(), quantity);
        self.floor.insert(product, floor);
        self
    }

    pub fn stock(&self, product: &str) -> u32 {
        self.inventory.get(product).copied().unwrap_or(0)
    }

    pub fn floor_for(&self, product: &str) -> u32 {
        self.floor.get(product).copied().unwrap_or(0)
    }

    /// Amount by which stock sits below the floor, 0 when satisfied.
    pub fn deficit(&self, product: &str) -> u32 {
        self.floor_for(product).saturating_sub(self.stock(product))
    }

    /// Stock above this entity's own floor, i.e. what it can give away.
    pub fn deliverable(&self, product: &str) -> u32 {
        self.stock(product).saturating_sub(self.floor_for(product))
    }

    /// Checks that every floor key also exists in the inventory.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ResolveError::malformed(&self.name, "entity name is empty"));
        }
        if let Some(product) = self
            .floor
            .keys()
            .find(|product| !self.inventory.contains_key(*product))
        {
            return Err(ResolveError::malformed(
                &self.name,
                format!("floor references product '{product}' missing from inventory"),
            ));
        }
        Ok(())
    }

    pub(crate) fn receive(&mut self, product: &str, quantity: u32) {
        *self.inventory.entry(product.to_string()).or_insert(0) += quantity;
    }

    /// Removes `quantity` of `product`, refusing to go below zero.
    pub(crate) fn release(&mut self, product: &str, quantity: u32) -> Result<()> {
        let available = self.stock(product);
        if available < quantity {
            return Err(ResolveError::InsufficientDonorStock {
                donor: self.name.clone(),
                product: product.to_string(),
                available,
                requested: quantity,
            });
        }
        if let Some(stock) = self.inventory.get_mut(product) {
            *stock -= quantity;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Coordinates {
        Coordinates::new(0.0, 0.0).unwrap()
    }

    #[test]
    fn deficit_and_deliverable_use_own_floor() {
        let h = Entity::hospital("H", origin()).with_stock_and_floor("A", 40, 100);
        assert_eq!(h.deficit("A"), 60);
        assert_eq!(h.deliverable("A"), 0);

        let s = Entity::supplier("S", origin()).with_stock_and_floor("A", 150, 100);
        assert_eq!(s.deficit("A"), 0);
        assert_eq!(s.deliverable("A"), 50);
    }

    #[test]
    fn supplier_without_floor_can_give_everything() {
        let s = Entity::supplier("S", origin()).with_stock("A", 75);
        assert_eq!(s.deliverable("A"), 75);
        assert_eq!(s.deliverable("B"), 0);
    }

    #[test]
    fn floor_without_inventory_entry_is_malformed() {
        let mut h = Entity::hospital("H", origin()).with_stock("A", 1);
        h.floor.insert("B".to_string(), 5);
        let err = h.validate().unwrap_err();
        assert!(matches!(err, ResolveError::MalformedEntity { .. }));
    }

    #[test]
    fn release_refuses_to_overdraw() {
        let mut s = Entity::supplier("S", origin()).with_stock("A", 3);
        assert!(s.release("A", 4).is_err());
        assert_eq!(s.stock("A"), 3);
        s.release("A", 3).unwrap();
        assert_eq!(s.stock("A"), 0);
    }
}
