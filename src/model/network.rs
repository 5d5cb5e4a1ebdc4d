// src/model/network.rs

use std::collections::HashMap;

use crate::error::{ResolveError, Result};
use crate::model::entity::Entity;

/// Run-scoped owner of every entity in one supply network snapshot.
///
/// Entities keep the order the caller supplied; lookups by name go through an
/// index built at construction time. Only the allocation applier mutates
/// inventories, through `&mut` access, so a run can never interleave writes.
#[derive(Debug, Clone, Default)]
pub struct NetworkModel {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl NetworkModel {
    /// Validates and takes ownership of `entities`.
    pub fn new(entities: Vec<Entity>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            entity.validate()?;
            if index.insert(entity.name.clone(), position).is_some() {
                return Err(ResolveError::DuplicateEntity(entity.name.clone()));
            }
        }

        tracing::debug!(entities = entities.len(), "network_model_built");
        Ok(Self { entities, index })
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.index.get(name).map(|&i| &self.entities[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Result<&mut Entity> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.entities[i]),
            None => Err(ResolveError::UnknownEntity(name.to_string())),
        }
    }

    /// Snapshot of this network with the named entities taken out, e.g. to
    /// ask what happens when a supplier drops out. `self` is left as is.
    pub fn without(&self, names: &[&str]) -> Result<Self> {
        if let Some(missing) = names.iter().find(|name| !self.index.contains_key(**name)) {
            return Err(ResolveError::UnknownEntity(missing.to_string()));
        }
        let kept = self
            .entities
            .iter()
            .filter(|entity| !names.contains(&entity.name.as_str()))
            .cloned()
            .collect();
        Self::new(kept)
    }
}
