//! Damage/heal engine
//!
//! Runs every tick for every burning entity. No allocation beyond `Arc`
//! clones, no I/O, and nothing logged above `trace`.

use crate::capability::BurningEntity;
use crate::component::HostRegistries;
use crate::fire::DamageSourceKind;
use crate::identifier::Identifier;
use crate::registry::FireRegistry;

/// What one burn tick did to an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurnOutcome {
    /// Behavior declined the entity, or the fire deals no damage
    NoEffect,
    /// Entity was healed by this amount
    Healed(f32),
    /// Entity was hurt by this amount
    Harmed(f32),
    /// Harm was attempted but the host refused it (immunity, cooldown...)
    Blocked,
}

impl BurnOutcome {
    /// Whether the entity took damage
    pub fn was_damaged(&self) -> bool {
        matches!(self, BurnOutcome::Harmed(_))
    }
}

/// Harm or heal `entity` with the fire registered for `fire_type`.
///
/// The entity's fire type is first set to the ensured `fire_type`. Damage,
/// inversion and damage source come from that fire; the behavior predicate
/// comes from the fire the entity now carries.
pub fn apply_burn<H: HostRegistries>(
    registry: &FireRegistry<H>,
    entity: &mut dyn BurningEntity,
    fire_type: &Identifier,
    kind: DamageSourceKind,
) -> BurnOutcome {
    entity.set_fire_type(registry.ensure(fire_type));

    let fire = registry.get(fire_type);
    let damage = fire.damage();
    let invert = fire.invert_heal_and_harm();
    let behavior = registry.get(&entity.fire_type());

    if !behavior.affects(entity) || damage == 0.0 {
        log::trace!("Fire [{}] has no effect", fire.fire_type());
        return BurnOutcome::NoEffect;
    }

    let inverted = invert && entity.is_inverted_heal_and_harm();
    let source = fire.damage_source(kind);
    match (damage > 0.0, inverted) {
        (true, false) | (false, true) => {
            let amount = damage.abs();
            if entity.hurt(source, amount) {
                BurnOutcome::Harmed(amount)
            } else {
                BurnOutcome::Blocked
            }
        }
        (true, true) | (false, false) => {
            let amount = damage.abs();
            entity.heal(amount);
            BurnOutcome::Healed(amount)
        }
    }
}

/// Burn tick for an entity standing inside a fire block
pub fn damage_in_fire<H: HostRegistries>(
    registry: &FireRegistry<H>,
    entity: &mut dyn BurningEntity,
    fire_type: &Identifier,
) -> BurnOutcome {
    apply_burn(registry, entity, fire_type, DamageSourceKind::InFire)
}

/// Burn tick for an entity that is on fire
pub fn damage_on_fire<H: HostRegistries>(
    registry: &FireRegistry<H>,
    entity: &mut dyn BurningEntity,
    fire_type: &Identifier,
) -> BurnOutcome {
    apply_burn(registry, entity, fire_type, DamageSourceKind::OnFire)
}

/// Set `entity` on fire for `seconds` with the ensured `fire_type`
pub fn ignite<H: HostRegistries>(
    registry: &FireRegistry<H>,
    entity: &mut dyn BurningEntity,
    seconds: u32,
    fire_type: &Identifier,
) {
    entity.set_seconds_on_fire(seconds);
    entity.set_fire_type(registry.ensure(fire_type));
}
