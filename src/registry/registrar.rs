//! Component registration helpers
//!
//! Publish the host values behind a registered fire's components under the
//! identifiers the fire declares. Dependent values must come after what they
//! depend on:
//!
//! 1. register the fire
//! 2. source block, campfire block, lantern block, flame particle (any order)
//! 3. torch and wall torch blocks (need the flame particle)
//! 4. campfire, lantern and torch items (need their blocks)
//!
//! Each helper fails with `MissingComponent` or `UnresolvedComponent` when a
//! step it depends on was skipped.

use super::FireRegistry;
use crate::component::{
    BlockComponent, ComponentKind, HostRegistrar, HostRegistries, ParticleComponent,
};
use crate::error::{FireError, FireResult, OptionExt};
use crate::fire::GateKind;
use crate::identifier::Identifier;

type Block<H> = <H as HostRegistries>::Block;
type Item<H> = <H as HostRegistries>::Item;
type Particle<H> = <H as HostRegistries>::Particle;
type Enchantment<H> = <H as HostRegistries>::Enchantment;

/// Registers the host values of fire components
pub struct ComponentRegistrar<'a, H: HostRegistrar> {
    registry: &'a FireRegistry<H>,
}

impl<'a, H: HostRegistrar> ComponentRegistrar<'a, H> {
    pub fn new(registry: &'a FireRegistry<H>) -> Self {
        Self { registry }
    }

    /// Register the fire block of `fire_type`
    pub fn register_fire_source<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Block<H>>
    where
        F: FnOnce(&Identifier) -> Block<H>,
    {
        self.register_typed_block(fire_type, ComponentKind::SourceBlock, make)
    }

    /// Register the campfire block of `fire_type`
    pub fn register_campfire<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Block<H>>
    where
        F: FnOnce(&Identifier) -> Block<H>,
    {
        self.register_typed_block(fire_type, ComponentKind::CampfireBlock, make)
    }

    /// Register the campfire item placing the already registered campfire block
    pub fn register_campfire_item<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Item<H>>
    where
        F: FnOnce(Block<H>) -> Item<H>,
    {
        let id = self.declared_id(fire_type, ComponentKind::CampfireItem)?;
        let campfire = self
            .registry
            .require_component(fire_type, &BlockComponent::<H>::CAMPFIRE_BLOCK)?;
        let item = self.registry.host().register_item(id.clone(), make(campfire))?;
        log::info!("Registered campfire item '{}' for fire [{}]", id, fire_type);
        Ok(item)
    }

    /// Register the flame particle of `fire_type`
    pub fn register_particle<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Particle<H>>
    where
        F: FnOnce() -> Particle<H>,
    {
        let id = self.declared_id(fire_type, ComponentKind::FlameParticle)?;
        let particle = self.registry.host().register_particle(id.clone(), make())?;
        log::info!("Registered flame particle '{}' for fire [{}]", id, fire_type);
        Ok(particle)
    }

    /// Register the standing and wall torch blocks, both emitting the flame particle
    pub fn register_torch<T, W>(
        &self,
        fire_type: &Identifier,
        make_torch: T,
        make_wall_torch: W,
    ) -> FireResult<(Block<H>, Block<H>)>
    where
        T: FnOnce(&Identifier, Particle<H>) -> Block<H>,
        W: FnOnce(&Identifier, Particle<H>) -> Block<H>,
    {
        let torch_id = self.declared_id(fire_type, ComponentKind::TorchBlock)?;
        let wall_torch_id = self.declared_id(fire_type, ComponentKind::WallTorchBlock)?;
        let particle = self
            .registry
            .require_component(fire_type, &ParticleComponent::<H>::FLAME_PARTICLE)?;

        let host = self.registry.host();
        let torch = host.register_block(torch_id.clone(), make_torch(&torch_id, particle.clone()))?;
        let wall_torch =
            host.register_block(wall_torch_id.clone(), make_wall_torch(&wall_torch_id, particle))?;
        log::info!(
            "Registered torch '{}' and wall torch '{}' for fire [{}]",
            torch_id,
            wall_torch_id,
            fire_type
        );
        Ok((torch, wall_torch))
    }

    /// Register the torch item placing the already registered torch blocks
    pub fn register_torch_item<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Item<H>>
    where
        F: FnOnce(Block<H>, Block<H>) -> Item<H>,
    {
        let id = self.declared_id(fire_type, ComponentKind::TorchItem)?;
        let torch = self
            .registry
            .require_component(fire_type, &BlockComponent::<H>::TORCH_BLOCK)?;
        let wall_torch = self
            .registry
            .require_component(fire_type, &BlockComponent::<H>::WALL_TORCH_BLOCK)?;
        let item = self
            .registry
            .host()
            .register_item(id.clone(), make(torch, wall_torch))?;
        log::info!("Registered torch item '{}' for fire [{}]", id, fire_type);
        Ok(item)
    }

    /// Register the lantern block of `fire_type`
    pub fn register_lantern<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Block<H>>
    where
        F: FnOnce(&Identifier) -> Block<H>,
    {
        let id = self.declared_id(fire_type, ComponentKind::LanternBlock)?;
        let lantern = self.registry.host().register_block(id.clone(), make(&id))?;
        log::info!("Registered lantern '{}' for fire [{}]", id, fire_type);
        Ok(lantern)
    }

    /// Register the lantern item placing the already registered lantern block
    pub fn register_lantern_item<F>(&self, fire_type: &Identifier, make: F) -> FireResult<Item<H>>
    where
        F: FnOnce(Block<H>) -> Item<H>,
    {
        let id = self.declared_id(fire_type, ComponentKind::LanternItem)?;
        let lantern = self
            .registry
            .require_component(fire_type, &BlockComponent::<H>::LANTERN_BLOCK)?;
        let item = self.registry.host().register_item(id.clone(), make(lantern))?;
        log::info!("Registered lantern item '{}' for fire [{}]", id, fire_type);
        Ok(item)
    }

    /// Register the enchantment behind one of the fire's enchantment gates
    pub fn register_enchantment<F>(
        &self,
        fire_type: &Identifier,
        gate: GateKind,
        make: F,
    ) -> FireResult<Enchantment<H>>
    where
        F: FnOnce(&Identifier) -> Enchantment<H>,
    {
        let id = self.declared_id(fire_type, gate.component_kind())?;
        let enchantment = self.registry.host().register_enchantment(id.clone(), make(&id))?;
        log::info!("Registered {:?} enchantment '{}' for fire [{}]", gate, id, fire_type);
        Ok(enchantment)
    }

    /// Source and campfire blocks also get the fire type stamped on them
    fn register_typed_block<F>(
        &self,
        fire_type: &Identifier,
        kind: ComponentKind,
        make: F,
    ) -> FireResult<Block<H>>
    where
        F: FnOnce(&Identifier) -> Block<H>,
    {
        let id = self.declared_id(fire_type, kind)?;
        let host = self.registry.host();
        let block = host.register_block(id.clone(), make(&id))?;
        host.bind_fire_type(&block, fire_type);
        log::info!("Registered {} '{}' for fire [{}]", kind, id, fire_type);
        Ok(block)
    }

    /// Identifier the registered, non-default fire declares for `kind`
    fn declared_id(&self, fire_type: &Identifier, kind: ComponentKind) -> FireResult<Identifier> {
        if fire_type.is_default() || !self.registry.is_registered(fire_type) {
            return Err(FireError::InvalidFireType {
                fire_type: fire_type.to_string(),
                reason: "components can only be registered for a registered custom fire".to_string(),
            });
        }
        self.registry
            .component_id(fire_type, kind)
            .ok_or_fire(|| FireError::MissingComponent {
                fire_type: fire_type.clone(),
                kind,
            })
    }
}
