//! Fire definitions
//!
//! A [`Fire`] is immutable once built. It is shared through `Arc` by the
//! registry, so every reader sees the same fully constructed value.

pub mod builder;

pub use builder::{EnchantmentGateBuilder, FireBuilder};

use crate::capability::BurningEntity;
use crate::component::ComponentKind;
use crate::config::Toggle;
use crate::constants::{DEFAULT_DAMAGE, DEFAULT_INVERT_HEAL_AND_HARM, DEFAULT_LIGHT};
use crate::identifier::Identifier;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether a fire affects an entity at all
pub type Behavior = Arc<dyn Fn(&dyn BurningEntity) -> bool + Send + Sync>;

/// Which of the two burn situations caused the damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSourceKind {
    /// Standing inside a fire block
    InFire,
    /// Burning after having been set on fire
    OnFire,
}

/// Damage source a fire hurts with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageSourceRef {
    /// The host's own in-fire/on-fire source
    Baseline(DamageSourceKind),
    /// A host damage type registered under this identifier
    Custom(Identifier),
}

/// The two enchantment gates a fire can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    FireAspect,
    Flame,
}

impl GateKind {
    /// Component kind naming the enchantment behind this gate
    pub fn component_kind(self) -> ComponentKind {
        match self {
            GateKind::FireAspect => ComponentKind::FireAspectEnchantment,
            GateKind::Flame => ComponentKind::FlameEnchantment,
        }
    }
}

/// Live switches controlling a fire enchantment
#[derive(Debug, Clone)]
pub struct EnchantmentGate {
    enabled: Toggle,
    discoverable: Toggle,
    tradeable: Toggle,
    treasure: Toggle,
}

impl EnchantmentGate {
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Whether the enchantment can show up in enchanting tables and loot
    pub fn is_discoverable(&self) -> bool {
        self.discoverable.get()
    }

    pub fn is_tradeable(&self) -> bool {
        self.tradeable.get()
    }

    pub fn is_treasure(&self) -> bool {
        self.treasure.get()
    }
}

/// Immutable fire definition
pub struct Fire {
    fire_type: Identifier,
    light: u8,
    damage: f32,
    invert_heal_and_harm: bool,
    is_default: bool,
    in_fire: DamageSourceRef,
    on_fire: DamageSourceRef,
    behavior: Behavior,
    components: FxHashMap<ComponentKind, Identifier>,
    fire_aspect: EnchantmentGate,
    flame: EnchantmentGate,
}

impl Fire {
    /// The sentinel fire standing for baseline burning
    pub(crate) fn default_fire(components: FxHashMap<ComponentKind, Identifier>) -> Self {
        Self {
            fire_type: Identifier::default_fire_type(),
            light: DEFAULT_LIGHT,
            damage: DEFAULT_DAMAGE,
            invert_heal_and_harm: DEFAULT_INVERT_HEAL_AND_HARM,
            is_default: true,
            in_fire: DamageSourceRef::Baseline(DamageSourceKind::InFire),
            on_fire: DamageSourceRef::Baseline(DamageSourceKind::OnFire),
            behavior: always(),
            components,
            fire_aspect: EnchantmentGateBuilder::default().build(),
            flame: EnchantmentGateBuilder::default().build(),
        }
    }

    pub fn fire_type(&self) -> &Identifier {
        &self.fire_type
    }

    /// Light level emitted, `0..=15`
    pub fn light(&self) -> u8 {
        self.light
    }

    /// Damage per hit. Negative values heal.
    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Whether entities with inverted heal and harm are healed by this fire
    pub fn invert_heal_and_harm(&self) -> bool {
        self.invert_heal_and_harm
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn in_fire_source(&self) -> &DamageSourceRef {
        &self.in_fire
    }

    pub fn on_fire_source(&self) -> &DamageSourceRef {
        &self.on_fire
    }

    pub fn damage_source(&self, kind: DamageSourceKind) -> &DamageSourceRef {
        match kind {
            DamageSourceKind::InFire => &self.in_fire,
            DamageSourceKind::OnFire => &self.on_fire,
        }
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Run the behavior predicate for `entity`
    pub fn affects(&self, entity: &dyn BurningEntity) -> bool {
        (self.behavior)(entity)
    }

    pub fn component(&self, kind: ComponentKind) -> Option<&Identifier> {
        self.components.get(&kind)
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentKind, &Identifier)> {
        self.components.iter().map(|(kind, id)| (*kind, id))
    }

    pub fn gate(&self, gate: GateKind) -> &EnchantmentGate {
        match gate {
            GateKind::FireAspect => &self.fire_aspect,
            GateKind::Flame => &self.flame,
        }
    }

    pub fn fire_aspect(&self) -> &EnchantmentGate {
        &self.fire_aspect
    }

    pub fn flame(&self) -> &EnchantmentGate {
        &self.flame
    }
}

impl fmt::Debug for Fire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components: Vec<_> = self.components().collect();
        components.sort_by_key(|(kind, _)| *kind);
        f.debug_struct("Fire")
            .field("fire_type", &self.fire_type)
            .field("light", &self.light)
            .field("damage", &self.damage)
            .field("invert_heal_and_harm", &self.invert_heal_and_harm)
            .field("is_default", &self.is_default)
            .field("in_fire", &self.in_fire)
            .field("on_fire", &self.on_fire)
            .field("components", &components)
            .finish_non_exhaustive()
    }
}

fn always() -> Behavior {
    Arc::new(|_: &dyn BurningEntity| true)
}
