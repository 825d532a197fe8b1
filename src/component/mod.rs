//! Fire components
//!
//! A component is one optional sub-registration of a fire: a block, an item,
//! a particle or an enchantment gate living in one of the host's registries.
//! A fire only stores the identifier of each component it has; the live host
//! value is resolved on demand through a typed [`Component`] descriptor.

pub mod host;
pub mod memory_host;

pub use host::{HostRegistrar, HostRegistries};
pub use memory_host::{HostBlock, HostEnchantment, HostItem, HostParticle, InMemoryHost};

use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host registry a component lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Block,
    Item,
    Particle,
    Enchantment,
}

/// Closed set of component kinds a fire can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    SourceBlock,
    CampfireBlock,
    CampfireItem,
    LanternBlock,
    LanternItem,
    TorchBlock,
    TorchItem,
    WallTorchBlock,
    FlameParticle,
    FireAspectEnchantment,
    FlameEnchantment,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 11] = [
        ComponentKind::SourceBlock,
        ComponentKind::CampfireBlock,
        ComponentKind::CampfireItem,
        ComponentKind::LanternBlock,
        ComponentKind::LanternItem,
        ComponentKind::TorchBlock,
        ComponentKind::TorchItem,
        ComponentKind::WallTorchBlock,
        ComponentKind::FlameParticle,
        ComponentKind::FireAspectEnchantment,
        ComponentKind::FlameEnchantment,
    ];

    /// Host registry this kind resolves against
    pub fn registry(self) -> RegistryKind {
        match self {
            ComponentKind::SourceBlock
            | ComponentKind::CampfireBlock
            | ComponentKind::LanternBlock
            | ComponentKind::TorchBlock
            | ComponentKind::WallTorchBlock => RegistryKind::Block,
            ComponentKind::CampfireItem | ComponentKind::LanternItem | ComponentKind::TorchItem => {
                RegistryKind::Item
            }
            ComponentKind::FlameParticle => RegistryKind::Particle,
            ComponentKind::FireAspectEnchantment | ComponentKind::FlameEnchantment => {
                RegistryKind::Enchantment
            }
        }
    }

    /// Whether the host value carries a fire type that registration must stamp
    pub fn carries_fire_type(self) -> bool {
        matches!(self, ComponentKind::SourceBlock | ComponentKind::CampfireBlock)
    }

    /// Path suffix of the conventional component identifier
    fn suffix(self) -> &'static str {
        match self {
            ComponentKind::SourceBlock => "fire",
            ComponentKind::CampfireBlock | ComponentKind::CampfireItem => "campfire",
            ComponentKind::LanternBlock | ComponentKind::LanternItem => "lantern",
            ComponentKind::TorchBlock | ComponentKind::TorchItem => "torch",
            ComponentKind::WallTorchBlock => "wall_torch",
            ComponentKind::FlameParticle | ComponentKind::FlameEnchantment => "flame",
            ComponentKind::FireAspectEnchantment => "fire_aspect",
        }
    }

    /// Conventional identifier of this component for `fire_type`.
    ///
    /// `mymod:blue` gives `mymod:blue_campfire` for both campfire kinds, since
    /// a block and its item share one identifier in different registries.
    pub fn conventional_id(self, fire_type: &Identifier) -> Identifier {
        fire_type.with_path(&format!("{}_{}", fire_type.path(), self.suffix()))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::SourceBlock => "source block",
            ComponentKind::CampfireBlock => "campfire block",
            ComponentKind::CampfireItem => "campfire item",
            ComponentKind::LanternBlock => "lantern block",
            ComponentKind::LanternItem => "lantern item",
            ComponentKind::TorchBlock => "torch block",
            ComponentKind::TorchItem => "torch item",
            ComponentKind::WallTorchBlock => "wall torch block",
            ComponentKind::FlameParticle => "flame particle",
            ComponentKind::FireAspectEnchantment => "fire aspect enchantment",
            ComponentKind::FlameEnchantment => "flame enchantment",
        };
        f.write_str(name)
    }
}

/// Typed descriptor for one component kind.
///
/// Pairs the kind with the host lookup that turns a component identifier
/// into a live host value of type `T`.
pub struct Component<H: HostRegistries, T> {
    kind: ComponentKind,
    resolve: fn(&H, &Identifier) -> Option<T>,
}

impl<H: HostRegistries, T> Component<H, T> {
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Look `id` up in the host registry this component lives in
    pub fn resolve(&self, host: &H, id: &Identifier) -> Option<T> {
        (self.resolve)(host, id)
    }
}

impl<H: HostRegistries, T> Clone for Component<H, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: HostRegistries, T> Copy for Component<H, T> {}

impl<H: HostRegistries, T> fmt::Debug for Component<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component").field("kind", &self.kind).finish()
    }
}

/// Descriptor of a component living in the host block registry
pub type BlockComponent<H> = Component<H, <H as HostRegistries>::Block>;
/// Descriptor of a component living in the host item registry
pub type ItemComponent<H> = Component<H, <H as HostRegistries>::Item>;
/// Descriptor of a component living in the host particle registry
pub type ParticleComponent<H> = Component<H, <H as HostRegistries>::Particle>;
/// Descriptor of a component living in the host enchantment registry
pub type EnchantmentComponent<H> = Component<H, <H as HostRegistries>::Enchantment>;

impl<H: HostRegistries> Component<H, H::Block> {
    pub const SOURCE_BLOCK: Self = Self {
        kind: ComponentKind::SourceBlock,
        resolve: H::block,
    };
    pub const CAMPFIRE_BLOCK: Self = Self {
        kind: ComponentKind::CampfireBlock,
        resolve: H::block,
    };
    pub const LANTERN_BLOCK: Self = Self {
        kind: ComponentKind::LanternBlock,
        resolve: H::block,
    };
    pub const TORCH_BLOCK: Self = Self {
        kind: ComponentKind::TorchBlock,
        resolve: H::block,
    };
    pub const WALL_TORCH_BLOCK: Self = Self {
        kind: ComponentKind::WallTorchBlock,
        resolve: H::block,
    };
}

impl<H: HostRegistries> Component<H, H::Item> {
    pub const CAMPFIRE_ITEM: Self = Self {
        kind: ComponentKind::CampfireItem,
        resolve: H::item,
    };
    pub const LANTERN_ITEM: Self = Self {
        kind: ComponentKind::LanternItem,
        resolve: H::item,
    };
    pub const TORCH_ITEM: Self = Self {
        kind: ComponentKind::TorchItem,
        resolve: H::item,
    };
}

impl<H: HostRegistries> Component<H, H::Particle> {
    pub const FLAME_PARTICLE: Self = Self {
        kind: ComponentKind::FlameParticle,
        resolve: H::particle,
    };
}

impl<H: HostRegistries> Component<H, H::Enchantment> {
    pub const FIRE_ASPECT_ENCHANTMENT: Self = Self {
        kind: ComponentKind::FireAspectEnchantment,
        resolve: H::enchantment,
    };
    pub const FLAME_ENCHANTMENT: Self = Self {
        kind: ComponentKind::FlameEnchantment,
        resolve: H::enchantment,
    };
}
