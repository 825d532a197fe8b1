//! Data-driven fires
//!
//! Fires described in JSON are built with [`FireBuilder`] and published like
//! any other fire. A reload replaces the previously loaded data fires through
//! unregister + register; fires registered from code are never touched.

use super::{FireRegistry, RegistrationOutcomes};
use crate::component::{ComponentKind, HostRegistries};
use crate::config::FireSettings;
use crate::error::{FireError, FireResult};
use crate::fire::{DamageSourceRef, Fire, FireBuilder};
use crate::identifier::Identifier;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// JSON form of a fire
///
/// ```json
/// {
///   "fire_type": "mymod:blue",
///   "light": 10,
///   "damage": 3.0,
///   "default_components": ["source_block", "campfire_block"],
///   "components": { "lantern_block": "othermod:blue_lantern" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FireDefinition {
    pub fire_type: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert_heal_and_harm: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_fire_source: Option<DamageSourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_fire_source: Option<DamageSourceRef>,
    /// Kinds that use their conventional identifier
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_components: Vec<ComponentKind>,
    /// Kinds with an explicit identifier, applied after `default_components`
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub components: HashMap<ComponentKind, Identifier>,
}

impl FireDefinition {
    pub fn from_json(text: &str) -> FireResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse either a single definition or an array of definitions
    pub fn list_from_json(text: &str) -> FireResult<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<FireDefinition>),
            One(FireDefinition),
        }

        match serde_json::from_str(text)? {
            OneOrMany::Many(definitions) => Ok(definitions),
            OneOrMany::One(definition) => Ok(vec![definition]),
        }
    }

    /// Builder carrying every field this definition sets
    pub fn to_builder(&self) -> FireBuilder {
        let mut builder = FireBuilder::new(self.fire_type.clone());
        if let Some(light) = self.light {
            builder = builder.with_light(light);
        }
        if let Some(damage) = self.damage {
            builder = builder.with_damage(damage);
        }
        if let Some(invert) = self.invert_heal_and_harm {
            builder = builder.with_invert_heal_and_harm(invert);
        }
        if let Some(source) = &self.in_fire_source {
            builder = builder.with_in_fire_source(source.clone());
        }
        if let Some(source) = &self.on_fire_source {
            builder = builder.with_on_fire_source(source.clone());
        }
        for kind in &self.default_components {
            builder = builder.with_default_component(*kind);
        }
        for (kind, id) in &self.components {
            builder = builder.with_component(*kind, id.clone());
        }
        builder
    }

    pub fn build(&self) -> FireResult<Fire> {
        self.to_builder().build()
    }
}

/// Read every `*.json` file of `dir`, in file name order
pub fn load_dir(dir: impl AsRef<Path>) -> FireResult<Vec<FireDefinition>> {
    let dir = dir.as_ref();
    let io_error = |path: &Path, e: std::io::Error| FireError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut definitions = Vec::new();
    for path in &paths {
        let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let parsed = FireDefinition::list_from_json(&text).map_err(|e| {
            FireError::Definition(format!("{}: {}", path.display(), e))
        })?;
        definitions.extend(parsed);
    }

    log::info!(
        "Read {} fire definitions from {} files in {}",
        definitions.len(),
        paths.len(),
        dir.display()
    );
    Ok(definitions)
}

/// Tracks the fires published from data so they can be replaced on reload
#[derive(Debug, Default)]
pub struct DataFireLoader {
    loaded: Mutex<FxHashSet<Identifier>>,
    settings: Option<Arc<FireSettings>>,
}

impl DataFireLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader binding the enchantment gates of every data fire to `settings`
    pub fn with_settings(settings: Arc<FireSettings>) -> Self {
        Self {
            loaded: Mutex::new(FxHashSet::default()),
            settings: Some(settings),
        }
    }

    /// Fire types currently published by this loader
    pub fn loaded(&self) -> Vec<Identifier> {
        let mut loaded: Vec<_> = self.loaded.lock().iter().cloned().collect();
        loaded.sort();
        loaded
    }

    /// Replace the previously loaded data fires with `definitions`.
    ///
    /// Every definition is built before the registry is touched, so an
    /// invalid definition leaves the current fires in place.
    pub fn reload<H: HostRegistries>(
        &self,
        registry: &FireRegistry<H>,
        definitions: &[FireDefinition],
    ) -> FireResult<RegistrationOutcomes> {
        let fires = definitions
            .iter()
            .map(|definition| self.build(definition))
            .collect::<FireResult<Vec<_>>>()?;

        let mut loaded = self.loaded.lock();
        for fire_type in loaded.drain() {
            registry.unregister(&fire_type);
        }

        let outcomes = registry.register_batch(fires);
        loaded.extend(
            outcomes
                .iter()
                .filter(|(_, outcome)| outcome.is_some())
                .map(|(fire_type, _)| fire_type.clone()),
        );

        log::info!(
            "Reloaded data fires: {} of {} registered",
            loaded.len(),
            definitions.len()
        );
        Ok(outcomes)
    }

    /// [`reload`](Self::reload) from the `*.json` files of `dir`
    pub fn reload_dir<H: HostRegistries>(
        &self,
        registry: &FireRegistry<H>,
        dir: impl AsRef<Path>,
    ) -> FireResult<RegistrationOutcomes> {
        let definitions = load_dir(dir)?;
        self.reload(registry, &definitions)
    }

    fn build(&self, definition: &FireDefinition) -> FireResult<Fire> {
        let builder = definition.to_builder();
        match &self.settings {
            Some(settings) => builder.with_settings(settings).build(),
            None => builder.build(),
        }
    }
}
