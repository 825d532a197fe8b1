//! Capability traits host types implement to take part in fire handling
//!
//! Host entities, blocks and items are composed with these traits at
//! construction time; Hearth Fire never reaches into host internals.

use crate::fire::DamageSourceRef;
use crate::identifier::Identifier;

/// Something that knows which fire type it belongs to or burns with
pub trait FireTyped {
    fn fire_type(&self) -> Identifier;
}

/// A fire-typed value whose fire type can be changed
pub trait FireTypeChanger: FireTyped {
    fn set_fire_type(&mut self, fire_type: Identifier);
}

/// Entity capability consumed by the damage/heal engine
pub trait BurningEntity: FireTypeChanger {
    /// Whether healing hurts this entity and harming heals it (undead-like)
    fn is_inverted_heal_and_harm(&self) -> bool {
        false
    }

    /// Apply `amount` of harm from `source`. Returns whether harm was applied.
    fn hurt(&mut self, source: &DamageSourceRef, amount: f32) -> bool;

    /// Heal by `amount`
    fn heal(&mut self, amount: f32);

    /// Start or extend burning for `seconds`
    fn set_seconds_on_fire(&mut self, seconds: u32);
}
