//! Host capability traits
//!
//! The host game owns blocks, items, particles and enchantments. Hearth Fire
//! only needs to look them up by identifier, late-bind a fire type onto
//! fire-typed blocks, and (for the registration helpers) publish new values.

use super::ComponentKind;
use crate::error::FireResult;
use crate::identifier::Identifier;

/// Read access to the host registries that fire components resolve against
pub trait HostRegistries: Send + Sync {
    type Block: Clone + Send + Sync;
    type Item: Clone + Send + Sync;
    type Particle: Clone + Send + Sync;
    type Enchantment: Clone + Send + Sync;

    fn block(&self, id: &Identifier) -> Option<Self::Block>;

    fn item(&self, id: &Identifier) -> Option<Self::Item>;

    fn particle(&self, id: &Identifier) -> Option<Self::Particle>;

    fn enchantment(&self, id: &Identifier) -> Option<Self::Enchantment>;

    /// Stamp `fire_type` onto a block built before its owning fire was registered.
    ///
    /// Called by `FireRegistry::register` for source and campfire blocks.
    fn bind_fire_type(&self, block: &Self::Block, fire_type: &Identifier);

    /// Components of the default fire (the host's own fire, campfire, torch...)
    fn baseline_components(&self) -> Vec<(ComponentKind, Identifier)> {
        Vec::new()
    }
}

/// Write access used by the component registration helpers
pub trait HostRegistrar: HostRegistries {
    fn register_block(&self, id: Identifier, block: Self::Block) -> FireResult<Self::Block>;

    fn register_item(&self, id: Identifier, item: Self::Item) -> FireResult<Self::Item>;

    fn register_particle(&self, id: Identifier, particle: Self::Particle) -> FireResult<Self::Particle>;

    fn register_enchantment(
        &self,
        id: Identifier,
        enchantment: Self::Enchantment,
    ) -> FireResult<Self::Enchantment>;
}
