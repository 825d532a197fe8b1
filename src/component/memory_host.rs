//! In-memory host registries
//!
//! A self-contained host for headless servers, tools and tests. Values are
//! shared through `Arc` and registered at most once per identifier.

use super::{ComponentKind, HostRegistrar, HostRegistries};
use crate::capability::FireTyped;
use crate::error::{FireError, FireResult};
use crate::identifier::Identifier;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Block stored in the in-memory host
#[derive(Debug)]
pub struct HostBlock {
    id: Identifier,
    fire_type: RwLock<Identifier>,
    particle: Option<Arc<HostParticle>>,
}

impl HostBlock {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            fire_type: RwLock::new(Identifier::default_fire_type()),
            particle: None,
        }
    }

    /// Block emitting `particle` (torches)
    pub fn with_particle(id: Identifier, particle: Arc<HostParticle>) -> Self {
        Self {
            particle: Some(particle),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn particle(&self) -> Option<&Arc<HostParticle>> {
        self.particle.as_ref()
    }

    fn bind(&self, fire_type: &Identifier) {
        *self.fire_type.write() = fire_type.clone();
    }
}

impl FireTyped for HostBlock {
    fn fire_type(&self) -> Identifier {
        self.fire_type.read().clone()
    }
}

/// Item stored in the in-memory host, placing one or more blocks
#[derive(Debug)]
pub struct HostItem {
    id: Identifier,
    places: Vec<Arc<HostBlock>>,
}

impl HostItem {
    pub fn new(id: Identifier, places: Vec<Arc<HostBlock>>) -> Self {
        Self { id, places }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Blocks this item places (standing first, wall variant second)
    pub fn places(&self) -> &[Arc<HostBlock>] {
        &self.places
    }
}

#[derive(Debug)]
pub struct HostParticle {
    id: Identifier,
}

impl HostParticle {
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

#[derive(Debug)]
pub struct HostEnchantment {
    id: Identifier,
}

impl HostEnchantment {
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

/// Host registries backed by concurrent maps
#[derive(Debug, Default)]
pub struct InMemoryHost {
    blocks: DashMap<Identifier, Arc<HostBlock>>,
    items: DashMap<Identifier, Arc<HostItem>>,
    particles: DashMap<Identifier, Arc<HostParticle>>,
    enchantments: DashMap<Identifier, Arc<HostEnchantment>>,
    baseline: Vec<(ComponentKind, Identifier)>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose default fire uses `baseline` components
    pub fn with_baseline(baseline: Vec<(ComponentKind, Identifier)>) -> Self {
        Self {
            baseline,
            ..Self::default()
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

fn insert_once<V: Clone>(map: &DashMap<Identifier, V>, id: Identifier, value: V) -> FireResult<V> {
    match map.entry(id) {
        Entry::Occupied(entry) => Err(FireError::HostRegistration {
            id: entry.key().clone(),
            reason: "identifier already registered".to_string(),
        }),
        Entry::Vacant(entry) => {
            entry.insert(value.clone());
            Ok(value)
        }
    }
}

impl HostRegistries for InMemoryHost {
    type Block = Arc<HostBlock>;
    type Item = Arc<HostItem>;
    type Particle = Arc<HostParticle>;
    type Enchantment = Arc<HostEnchantment>;

    fn block(&self, id: &Identifier) -> Option<Self::Block> {
        self.blocks.get(id).map(|block| Arc::clone(&block))
    }

    fn item(&self, id: &Identifier) -> Option<Self::Item> {
        self.items.get(id).map(|item| Arc::clone(&item))
    }

    fn particle(&self, id: &Identifier) -> Option<Self::Particle> {
        self.particles.get(id).map(|particle| Arc::clone(&particle))
    }

    fn enchantment(&self, id: &Identifier) -> Option<Self::Enchantment> {
        self.enchantments
            .get(id)
            .map(|enchantment| Arc::clone(&enchantment))
    }

    fn bind_fire_type(&self, block: &Self::Block, fire_type: &Identifier) {
        block.bind(fire_type);
    }

    fn baseline_components(&self) -> Vec<(ComponentKind, Identifier)> {
        self.baseline.clone()
    }
}

impl HostRegistrar for InMemoryHost {
    fn register_block(&self, id: Identifier, block: Self::Block) -> FireResult<Self::Block> {
        insert_once(&self.blocks, id, block)
    }

    fn register_item(&self, id: Identifier, item: Self::Item) -> FireResult<Self::Item> {
        insert_once(&self.items, id, item)
    }

    fn register_particle(&self, id: Identifier, particle: Self::Particle) -> FireResult<Self::Particle> {
        insert_once(&self.particles, id, particle)
    }

    fn register_enchantment(
        &self,
        id: Identifier,
        enchantment: Self::Enchantment,
    ) -> FireResult<Self::Enchantment> {
        insert_once(&self.enchantments, id, enchantment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_duplicates() {
        let host = InMemoryHost::new();
        let id = Identifier::new("mymod", "blue_fire");
        host.register_block(id.clone(), Arc::new(HostBlock::new(id.clone())))
            .expect("first registration");
        let second = host.register_block(id.clone(), Arc::new(HostBlock::new(id.clone())));
        assert!(matches!(second, Err(FireError::HostRegistration { .. })));
        assert_eq!(host.block_count(), 1);
    }

    #[test]
    fn test_bind_fire_type() {
        let host = InMemoryHost::new();
        let id = Identifier::new("mymod", "blue_fire");
        let block = host
            .register_block(id.clone(), Arc::new(HostBlock::new(id)))
            .expect("register block");
        assert!(block.fire_type().is_default());

        host.bind_fire_type(&block, &Identifier::new("mymod", "blue"));
        assert_eq!(block.fire_type(), Identifier::new("mymod", "blue"));
    }
}
