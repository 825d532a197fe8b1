//! Shared constants for fire definitions and persistence

/// Key of the string field that persists an entity's fire type
pub const FIRE_TYPE_TAG: &str = "FireType";

/// Separator between namespace and path in the string form of an identifier
pub const IDENTIFIER_SEPARATOR: char = ':';

/// Maximum light level a fire can emit
pub const MAX_LIGHT: u8 = 15;

/// Light level used when a builder does not set one (full light)
pub const DEFAULT_LIGHT: u8 = MAX_LIGHT;

/// Damage per hit used when a builder does not set one
pub const DEFAULT_DAMAGE: f32 = 1.0;

/// Whether heal and harm are inverted when a builder does not say otherwise
pub const DEFAULT_INVERT_HEAL_AND_HARM: bool = false;
