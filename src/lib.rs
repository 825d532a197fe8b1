// Hearth Fire - custom fire types for voxel game hosts
//
// Third parties describe fire variants (damage, light, damage sources,
// optional blocks/items/particles/enchantments) and publish them into a
// concurrent registry. Host code queries the registry by identifier and runs
// the damage/heal procedure against it every tick.
//
// - identifier / component / fire: the data model
// - registry: publication, lookup and canonicalization (`ensure`)
// - damage / persistence: per-tick and save/load consumers of the registry

// Constants module
pub mod constants;

// Core modules
pub mod capability;
pub mod component;
pub mod error;
pub mod fire;
pub mod identifier;
pub mod registry;

// Consumers
pub mod config;
pub mod damage;
pub mod persistence;

pub use capability::{BurningEntity, FireTypeChanger, FireTyped};
pub use component::{
    BlockComponent, Component, ComponentKind, EnchantmentComponent, HostRegistrar,
    HostRegistries, InMemoryHost, ItemComponent, ParticleComponent, RegistryKind,
};
pub use config::{FireSettings, GateField, GateSettings, Toggle};
pub use damage::{apply_burn, damage_in_fire, damage_on_fire, ignite, BurnOutcome};
pub use error::{FireError, FireResult, OptionExt};
pub use fire::{
    Behavior, DamageSourceKind, DamageSourceRef, EnchantmentGate, EnchantmentGateBuilder, Fire,
    FireBuilder, GateKind,
};
pub use identifier::{sanitize, sanitize_parts, Identifier};
pub use persistence::{read_tag, write_tag, CompoundTag};
pub use registry::{
    ComponentRegistrar, DataFireLoader, FireDefinition, FireRegistry, RegistrationOutcomes,
};
