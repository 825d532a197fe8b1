//! Fire type persistence
//!
//! Entities save their fire type as one string field of their compound
//! tag. Reading never fails: a missing, malformed or unregistered value
//! loads as the default fire type.

use crate::component::HostRegistries;
use crate::constants::FIRE_TYPE_TAG;
use crate::identifier::Identifier;
use crate::registry::FireRegistry;
use serde_json::{Map, Value};

/// String-keyed compound tag
pub type CompoundTag = Map<String, Value>;

/// Write the ensured `fire_type` under the `"FireType"` key
pub fn write_tag<H: HostRegistries>(
    registry: &FireRegistry<H>,
    tag: &mut CompoundTag,
    fire_type: &Identifier,
) {
    let fire_type = registry.ensure(fire_type);
    tag.insert(
        FIRE_TYPE_TAG.to_string(),
        Value::String(fire_type.to_string()),
    );
}

/// Read the fire type stored under the `"FireType"` key
pub fn read_tag<H: HostRegistries>(registry: &FireRegistry<H>, tag: &CompoundTag) -> Identifier {
    let stored = tag
        .get(FIRE_TYPE_TAG)
        .and_then(Value::as_str)
        .and_then(Identifier::parse);
    match stored {
        Some(fire_type) => registry.ensure(&fire_type),
        None => {
            log::trace!("No readable fire type in tag, using the default");
            Identifier::default_fire_type()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::InMemoryHost;
    use crate::fire::FireBuilder;
    use serde_json::json;
    use std::sync::Arc;

    fn registry() -> FireRegistry<InMemoryHost> {
        let registry = FireRegistry::new(Arc::new(InMemoryHost::new()));
        registry
            .register(FireBuilder::from_parts("mymod", "blue").build().expect("valid fire"))
            .expect("first registration");
        registry
    }

    fn tag_with(value: Value) -> CompoundTag {
        let mut tag = CompoundTag::new();
        tag.insert(FIRE_TYPE_TAG.to_string(), value);
        tag
    }

    #[test]
    fn test_registered_type_round_trips() {
        let registry = registry();
        let blue = Identifier::new("mymod", "blue");
        let mut tag = CompoundTag::new();
        tag.insert("Health".to_string(), json!(20.0));

        write_tag(&registry, &mut tag, &blue);
        assert_eq!(tag.get(FIRE_TYPE_TAG), Some(&json!("mymod:blue")));
        assert_eq!(tag.get("Health"), Some(&json!(20.0)));
        assert_eq!(read_tag(&registry, &tag), blue);
    }

    #[test]
    fn test_unregistered_type_is_written_as_default() {
        let registry = registry();
        let mut tag = CompoundTag::new();
        write_tag(&registry, &mut tag, &Identifier::new("mymod", "missing"));
        assert_eq!(tag.get(FIRE_TYPE_TAG), Some(&json!(":")));
        assert!(read_tag(&registry, &tag).is_default());
    }

    #[test]
    fn test_bad_values_read_as_default() {
        let registry = registry();
        let cases = [
            json!("mymod:missing"),
            json!("not an identifier"),
            json!("Bad:Fire"),
            json!(""),
            json!(42),
            Value::Null,
        ];
        for value in cases {
            let tag = tag_with(value.clone());
            assert!(read_tag(&registry, &tag).is_default(), "{} should read as default", value);
        }
        assert!(read_tag(&registry, &CompoundTag::new()).is_default());
    }

    #[test]
    fn test_tag_survives_json_text() {
        let registry = registry();
        let mut tag = CompoundTag::new();
        write_tag(&registry, &mut tag, &Identifier::new("mymod", "blue"));

        let text = serde_json::to_string(&tag).expect("serialize tag");
        let loaded: CompoundTag = serde_json::from_str(&text).expect("deserialize tag");
        assert_eq!(read_tag(&registry, &loaded), Identifier::new("mymod", "blue"));
    }
}
