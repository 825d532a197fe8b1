//! Fire builder
//!
//! Assembles a [`Fire`] from a fire type plus optional overrides. Unset
//! fields take the defaults in [`crate::constants`]. `build` is the only
//! place invalid input is rejected instead of degraded to the default fire.

use super::{Behavior, DamageSourceKind, DamageSourceRef, EnchantmentGate, Fire, GateKind};
use crate::capability::BurningEntity;
use crate::component::ComponentKind;
use crate::config::{FireSettings, GateField, Toggle};
use crate::constants::{DEFAULT_DAMAGE, DEFAULT_INVERT_HEAL_AND_HARM, DEFAULT_LIGHT, MAX_LIGHT};
use crate::error::{FireError, FireResult};
use crate::identifier::{is_valid_namespace, is_valid_path, Identifier};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Builder for the switches of one enchantment gate
#[derive(Debug, Clone)]
pub struct EnchantmentGateBuilder {
    enabled: Toggle,
    discoverable: Toggle,
    tradeable: Toggle,
    treasure: Toggle,
}

impl Default for EnchantmentGateBuilder {
    fn default() -> Self {
        Self {
            enabled: Toggle::constant(true),
            discoverable: Toggle::constant(true),
            tradeable: Toggle::constant(true),
            treasure: Toggle::constant(false),
        }
    }
}

impl EnchantmentGateBuilder {
    pub fn with_enabled(mut self, enabled: impl Into<Toggle>) -> Self {
        self.enabled = enabled.into();
        self
    }

    pub fn with_discoverable(mut self, discoverable: impl Into<Toggle>) -> Self {
        self.discoverable = discoverable.into();
        self
    }

    pub fn with_tradeable(mut self, tradeable: impl Into<Toggle>) -> Self {
        self.tradeable = tradeable.into();
        self
    }

    pub fn with_treasure(mut self, treasure: impl Into<Toggle>) -> Self {
        self.treasure = treasure.into();
        self
    }

    /// Bind all four switches to the live operator settings for this gate
    pub fn bound_to(self, settings: &FireSettings, fire_type: &Identifier, gate: GateKind) -> Self {
        self.with_enabled(settings.toggle(fire_type, gate, GateField::Enabled))
            .with_discoverable(settings.toggle(fire_type, gate, GateField::Discoverable))
            .with_tradeable(settings.toggle(fire_type, gate, GateField::Tradeable))
            .with_treasure(settings.toggle(fire_type, gate, GateField::Treasure))
    }

    pub fn build(self) -> EnchantmentGate {
        EnchantmentGate {
            enabled: self.enabled,
            discoverable: self.discoverable,
            tradeable: self.tradeable,
            treasure: self.treasure,
        }
    }
}

/// Builder for [`Fire`]
pub struct FireBuilder {
    fire_type: Identifier,
    light: u8,
    damage: f32,
    invert_heal_and_harm: bool,
    in_fire: DamageSourceRef,
    on_fire: DamageSourceRef,
    behavior: Behavior,
    components: FxHashMap<ComponentKind, Identifier>,
    fire_aspect: EnchantmentGateBuilder,
    flame: EnchantmentGateBuilder,
}

impl FireBuilder {
    pub fn new(fire_type: Identifier) -> Self {
        Self {
            fire_type,
            light: DEFAULT_LIGHT,
            damage: DEFAULT_DAMAGE,
            invert_heal_and_harm: DEFAULT_INVERT_HEAL_AND_HARM,
            in_fire: DamageSourceRef::Baseline(DamageSourceKind::InFire),
            on_fire: DamageSourceRef::Baseline(DamageSourceKind::OnFire),
            behavior: Arc::new(|_: &dyn BurningEntity| true),
            components: FxHashMap::default(),
            fire_aspect: EnchantmentGateBuilder::default(),
            flame: EnchantmentGateBuilder::default(),
        }
    }

    /// Builder for `namespace:path`
    pub fn from_parts(namespace: &str, path: &str) -> Self {
        Self::new(Identifier::new(namespace, path))
    }

    pub fn fire_type(&self) -> &Identifier {
        &self.fire_type
    }

    /// Light level, clamped to `0..=15`
    pub fn with_light(mut self, light: u8) -> Self {
        if light > MAX_LIGHT {
            log::warn!(
                "Light {} for fire [{}] exceeds {}, clamping",
                light,
                self.fire_type,
                MAX_LIGHT
            );
        }
        self.light = light.min(MAX_LIGHT);
        self
    }

    /// Damage per hit. Negative values heal, zero disables harm and heal.
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_invert_heal_and_harm(mut self, invert: bool) -> Self {
        self.invert_heal_and_harm = invert;
        self
    }

    pub fn with_in_fire_source(mut self, source: DamageSourceRef) -> Self {
        self.in_fire = source;
        self
    }

    pub fn with_on_fire_source(mut self, source: DamageSourceRef) -> Self {
        self.on_fire = source;
        self
    }

    /// Predicate deciding whether the fire affects an entity at all
    pub fn with_behavior<F>(mut self, behavior: F) -> Self
    where
        F: Fn(&dyn BurningEntity) -> bool + Send + Sync + 'static,
    {
        self.behavior = Arc::new(behavior);
        self
    }

    /// Set the identifier of one component, replacing any previous one
    pub fn with_component(mut self, kind: ComponentKind, id: Identifier) -> Self {
        self.components.insert(kind, id);
        self
    }

    /// Set one component to its conventional identifier
    pub fn with_default_component(self, kind: ComponentKind) -> Self {
        let id = kind.conventional_id(&self.fire_type);
        self.with_component(kind, id)
    }

    /// Set every component kind to its conventional identifier
    pub fn with_default_components(self) -> Self {
        ComponentKind::ALL
            .iter()
            .fold(self, |builder, kind| builder.with_default_component(*kind))
    }

    pub fn without_component(mut self, kind: ComponentKind) -> Self {
        self.components.remove(&kind);
        self
    }

    pub fn with_fire_aspect<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(EnchantmentGateBuilder) -> EnchantmentGateBuilder,
    {
        self.fire_aspect = configure(self.fire_aspect);
        self
    }

    pub fn with_flame<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(EnchantmentGateBuilder) -> EnchantmentGateBuilder,
    {
        self.flame = configure(self.flame);
        self
    }

    /// Bind both enchantment gates to the live operator settings of this fire
    pub fn with_settings(self, settings: &FireSettings) -> Self {
        let fire_type = self.fire_type.clone();
        self.with_fire_aspect(|gate| gate.bound_to(settings, &fire_type, GateKind::FireAspect))
            .with_flame(|gate| gate.bound_to(settings, &fire_type, GateKind::Flame))
    }

    /// Validate and freeze into an immutable [`Fire`]
    pub fn build(self) -> FireResult<Fire> {
        if self.fire_type.is_default() {
            return Err(FireError::InvalidFireType {
                fire_type: self.fire_type.to_string(),
                reason: "the default fire type is reserved".to_string(),
            });
        }
        if !is_valid_namespace(self.fire_type.namespace()) {
            return Err(FireError::InvalidFireType {
                fire_type: self.fire_type.to_string(),
                reason: "namespace must be non-empty and use [a-z0-9_.-]".to_string(),
            });
        }
        if !is_valid_path(self.fire_type.path()) {
            return Err(FireError::InvalidFireType {
                fire_type: self.fire_type.to_string(),
                reason: "path must be non-empty and use [a-z0-9_.-/]".to_string(),
            });
        }
        if !self.damage.is_finite() {
            return Err(FireError::InvalidDamage {
                fire_type: self.fire_type,
                damage: self.damage,
            });
        }

        log::debug!(
            "Built fire [{}] (light {}, damage {}, {} components)",
            self.fire_type,
            self.light,
            self.damage,
            self.components.len()
        );

        Ok(Fire {
            fire_type: self.fire_type,
            light: self.light,
            damage: self.damage,
            invert_heal_and_harm: self.invert_heal_and_harm,
            is_default: false,
            in_fire: self.in_fire,
            on_fire: self.on_fire,
            behavior: self.behavior,
            components: self.components,
            fire_aspect: self.fire_aspect.build(),
            flame: self.flame.build(),
        })
    }
}
