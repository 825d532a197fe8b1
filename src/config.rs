//! Operator configuration
//!
//! Enchantment gates of a fire are read through [`Toggle`]s rather than
//! frozen booleans. Binding a toggle to [`FireSettings`] lets operators flip
//! a gate (from TOML, a console, a remote admin) without re-registering the
//! fire that owns it.

use crate::error::{FireError, FireResult};
use crate::fire::GateKind;
use crate::identifier::{is_valid_type, Identifier};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Boolean re-evaluated every time it is read
#[derive(Clone)]
pub struct Toggle(Arc<dyn Fn() -> bool + Send + Sync>);

impl Toggle {
    pub fn constant(value: bool) -> Self {
        Self(Arc::new(move || value))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Toggle reading a shared flag
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self(Arc::new(move || flag.load(Ordering::Acquire)))
    }

    pub fn get(&self) -> bool {
        (self.0)()
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Toggle::constant(value)
    }
}

impl From<Arc<AtomicBool>> for Toggle {
    fn from(flag: Arc<AtomicBool>) -> Self {
        Toggle::from_flag(flag)
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toggle({})", self.get())
    }
}

/// One switch of an enchantment gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateField {
    Enabled,
    Discoverable,
    Tradeable,
    Treasure,
}

/// Settings of one enchantment gate as written in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    pub enabled: bool,
    pub discoverable: bool,
    pub tradeable: bool,
    pub treasure: bool,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            discoverable: true,
            tradeable: true,
            treasure: false,
        }
    }
}

/// Settings of both gates of one fire as written in TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireGateSettings {
    pub fire_aspect: GateSettings,
    pub flame: GateSettings,
}

/// TOML document layout:
///
/// ```toml
/// [fires."mymod:blue".fire_aspect]
/// enabled = false
/// treasure = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub fires: HashMap<String, FireGateSettings>,
}

/// Live flags backing the toggles of one gate
#[derive(Debug)]
struct GateFlags {
    enabled: Arc<AtomicBool>,
    discoverable: Arc<AtomicBool>,
    tradeable: Arc<AtomicBool>,
    treasure: Arc<AtomicBool>,
}

impl GateFlags {
    fn new(settings: &GateSettings) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(settings.enabled)),
            discoverable: Arc::new(AtomicBool::new(settings.discoverable)),
            tradeable: Arc::new(AtomicBool::new(settings.tradeable)),
            treasure: Arc::new(AtomicBool::new(settings.treasure)),
        }
    }

    fn flag(&self, field: GateField) -> &Arc<AtomicBool> {
        match field {
            GateField::Enabled => &self.enabled,
            GateField::Discoverable => &self.discoverable,
            GateField::Tradeable => &self.tradeable,
            GateField::Treasure => &self.treasure,
        }
    }

    fn store(&self, settings: &GateSettings) {
        self.enabled.store(settings.enabled, Ordering::Release);
        self.discoverable.store(settings.discoverable, Ordering::Release);
        self.tradeable.store(settings.tradeable, Ordering::Release);
        self.treasure.store(settings.treasure, Ordering::Release);
    }
}

/// Operator-controlled enchantment gate settings shared by all fires
#[derive(Debug, Default)]
pub struct FireSettings {
    gates: DashMap<(Identifier, GateKind), GateFlags>,
}

impl FireSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a TOML string
    pub fn from_toml(text: &str) -> FireResult<Self> {
        let settings = Self::new();
        settings.apply_toml(text)?;
        Ok(settings)
    }

    /// Read settings from a TOML file
    pub fn load_from_path(path: impl AsRef<Path>) -> FireResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FireError::Io {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let settings = Self::from_toml(&text)?;
        log::info!("Loaded fire settings from {}", path.display());
        Ok(settings)
    }

    /// Update settings in place from a TOML string.
    ///
    /// Toggles already handed out observe the new values. Returns how many
    /// fires the document configured.
    pub fn apply_toml(&self, text: &str) -> FireResult<usize> {
        let document: SettingsDocument = toml::from_str(text)?;
        let mut parsed = Vec::with_capacity(document.fires.len());
        for (key, gates) in &document.fires {
            let fire_type = Identifier::parse(key)
                .filter(|id| is_valid_type(id) && !id.is_default())
                .ok_or_else(|| FireError::Config(format!("'{}' is not a valid fire type", key)))?;
            parsed.push((fire_type, gates));
        }

        for (fire_type, gates) in &parsed {
            self.store(fire_type, GateKind::FireAspect, &gates.fire_aspect);
            self.store(fire_type, GateKind::Flame, &gates.flame);
            log::debug!("Applied gate settings for fire [{}]", fire_type);
        }
        Ok(parsed.len())
    }

    /// Set one switch of one gate
    pub fn set(&self, fire_type: &Identifier, gate: GateKind, field: GateField, value: bool) {
        self.gates
            .entry((fire_type.clone(), gate))
            .or_insert_with(|| GateFlags::new(&GateSettings::default()))
            .flag(field)
            .store(value, Ordering::Release);
    }

    /// Live toggle for one switch of one gate, defaulted when never configured
    pub fn toggle(&self, fire_type: &Identifier, gate: GateKind, field: GateField) -> Toggle {
        let entry = self
            .gates
            .entry((fire_type.clone(), gate))
            .or_insert_with(|| GateFlags::new(&GateSettings::default()));
        Toggle::from_flag(Arc::clone(entry.flag(field)))
    }

    /// Current values of one gate
    pub fn snapshot(&self, fire_type: &Identifier, gate: GateKind) -> GateSettings {
        match self.gates.get(&(fire_type.clone(), gate)) {
            Some(flags) => GateSettings {
                enabled: flags.enabled.load(Ordering::Acquire),
                discoverable: flags.discoverable.load(Ordering::Acquire),
                tradeable: flags.tradeable.load(Ordering::Acquire),
                treasure: flags.treasure.load(Ordering::Acquire),
            },
            None => GateSettings::default(),
        }
    }

    fn store(&self, fire_type: &Identifier, gate: GateKind, settings: &GateSettings) {
        self.gates
            .entry((fire_type.clone(), gate))
            .or_insert_with(|| GateFlags::new(settings))
            .store(settings);
    }
}
