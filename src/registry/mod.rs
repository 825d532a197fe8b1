//! Fire registry
//!
//! Concurrent store of every registered [`Fire`], keyed by fire type. The
//! default fire is published on construction and can never be removed, so
//! every lookup has something to fall back to.

pub mod registrar;
pub mod reload;

#[cfg(test)]
mod tests;

pub use registrar::ComponentRegistrar;
pub use reload::{DataFireLoader, FireDefinition};

use crate::component::{Component, ComponentKind, HostRegistries};
use crate::error::{FireError, FireResult, OptionExt};
use crate::fire::{DamageSourceKind, DamageSourceRef, Fire};
use crate::identifier::{is_valid_namespace, is_valid_path, Identifier};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of each registration attempt in a batch, by fire type
pub type RegistrationOutcomes = HashMap<Identifier, Option<Arc<Fire>>>;

/// Registry of fire types
pub struct FireRegistry<H: HostRegistries> {
    fires: DashMap<Identifier, Arc<Fire>>,
    default_fire: Arc<Fire>,
    host: Arc<H>,
    /// Shared by registrations, exclusive for unregister
    reload_guard: RwLock<()>,
}

impl<H: HostRegistries> FireRegistry<H> {
    pub fn new(host: Arc<H>) -> Self {
        let components: FxHashMap<ComponentKind, Identifier> =
            host.baseline_components().into_iter().collect();
        let default_fire = Arc::new(Fire::default_fire(components));

        let fires = DashMap::new();
        fires.insert(default_fire.fire_type().clone(), Arc::clone(&default_fire));

        log::info!(
            "Fire registry initialized with {} baseline components",
            default_fire.components().count()
        );

        Self {
            fires,
            default_fire,
            host,
            reload_guard: RwLock::new(()),
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// The sentinel fire every failed lookup resolves to
    pub fn default_fire(&self) -> Arc<Fire> {
        Arc::clone(&self.default_fire)
    }

    /// Publish `fire` unless its fire type is already registered.
    ///
    /// On success the source and campfire blocks of the fire, if the host
    /// already knows them, are stamped with the fire type. On collision the
    /// existing entry is left untouched and `None` is returned.
    pub fn register(&self, fire: Fire) -> Option<Arc<Fire>> {
        let _guard = self.reload_guard.read();

        let fire = match self.fires.entry(fire.fire_type().clone()) {
            Entry::Occupied(entry) => {
                log::error!(
                    "Fire [{}] was already registered with the following value: {:?}",
                    entry.key(),
                    entry.get()
                );
                return None;
            }
            Entry::Vacant(entry) => {
                let fire = Arc::new(fire);
                entry.insert(Arc::clone(&fire));
                fire
            }
        };

        self.bind_fire_typed_components(&fire);
        log::info!("Registered fire [{}]", fire.fire_type());
        Some(fire)
    }

    /// Register each fire independently. Failures do not roll back earlier
    /// successes; a fire type repeated in `fires` keeps its first outcome.
    pub fn register_batch<I>(&self, fires: I) -> RegistrationOutcomes
    where
        I: IntoIterator<Item = Fire>,
    {
        let mut outcomes = RegistrationOutcomes::new();
        for fire in fires {
            let fire_type = fire.fire_type().clone();
            let outcome = self.register(fire);
            outcomes.entry(fire_type).or_insert(outcome);
        }
        outcomes
    }

    /// Same as [`register_batch`](Self::register_batch), registering on the rayon pool
    pub fn register_parallel(&self, fires: Vec<Fire>) -> RegistrationOutcomes {
        let attempts: Vec<(Identifier, Option<Arc<Fire>>)> = fires
            .into_par_iter()
            .map(|fire| {
                let fire_type = fire.fire_type().clone();
                (fire_type, self.register(fire))
            })
            .collect();

        let mut outcomes = RegistrationOutcomes::with_capacity(attempts.len());
        for (fire_type, outcome) in attempts {
            outcomes.entry(fire_type).or_insert(outcome);
        }
        outcomes
    }

    /// Remove a fire. Reserved for reloads and tests.
    ///
    /// The default fire cannot be removed. Host values published for the
    /// removed fire stay registered with the host.
    pub fn unregister(&self, fire_type: &Identifier) -> Option<Arc<Fire>> {
        if fire_type.is_default() {
            log::warn!("Refusing to unregister the default fire");
            return None;
        }

        let _guard = self.reload_guard.write();
        // TODO: retract host values published through ComponentRegistrar once
        // HostRegistrar grows an unregister hook.
        let removed = self.fires.remove(fire_type).map(|(_, fire)| fire);
        if removed.is_some() {
            log::info!("Unregistered fire [{}]", fire_type);
        }
        removed
    }

    /// Registered fire for `fire_type`, or the default fire
    pub fn get(&self, fire_type: &Identifier) -> Arc<Fire> {
        self.fires
            .get(fire_type)
            .map(|fire| Arc::clone(&fire))
            .unwrap_or_else(|| self.default_fire())
    }

    /// Registered fire for raw, untrimmed parts, or the default fire
    pub fn get_parts(&self, namespace: &str, path: &str) -> Arc<Fire> {
        self.get(&self.ensure_parts(namespace, path))
    }

    /// Snapshot of every registered fire, default included
    pub fn list(&self) -> Vec<Arc<Fire>> {
        self.fires.iter().map(|entry| Arc::clone(entry.value())).collect()
    }

    pub fn list_types(&self) -> Vec<Identifier> {
        self.fires.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Paths of every registered fire type
    pub fn list_ids(&self) -> Vec<String> {
        self.fires
            .iter()
            .map(|entry| entry.key().path().to_string())
            .collect()
    }

    /// Distinct namespaces of every registered fire type
    pub fn list_namespaces(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        self.fires
            .iter()
            .filter_map(|entry| {
                let namespace = entry.key().namespace();
                seen.insert(namespace.to_string())
                    .then(|| namespace.to_string())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fires.len()
    }

    /// Always false: the default fire is always registered
    pub fn is_empty(&self) -> bool {
        self.fires.is_empty()
    }

    /// Project one property of the fire registered for `fire_type` (or the default)
    pub fn property<T, F>(&self, fire_type: &Identifier, projection: F) -> T
    where
        F: FnOnce(&Fire) -> T,
    {
        projection(&self.get(fire_type))
    }

    /// Project one property of every registered fire
    pub fn property_list<T, F>(&self, projection: F) -> Vec<T>
    where
        F: Fn(&Fire) -> T,
    {
        self.fires.iter().map(|entry| projection(entry.value())).collect()
    }

    /// Identifiers of `kind` across all fires that have one
    pub fn component_id_list(&self, kind: ComponentKind) -> Vec<Identifier> {
        self.fires
            .iter()
            .filter_map(|entry| entry.value().component(kind).cloned())
            .collect()
    }

    /// Host values of `component` across all fires whose component resolves
    pub fn component_list<T>(&self, component: &Component<H, T>) -> Vec<T> {
        self.fires
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .component(component.kind())
                    .and_then(|id| component.resolve(&self.host, id))
            })
            .collect()
    }

    pub fn is_registered(&self, fire_type: &Identifier) -> bool {
        self.fires.contains_key(fire_type)
    }

    /// Whether `path` is valid and some registered fire type uses it
    pub fn is_registered_path(&self, path: &str) -> bool {
        is_valid_path(path) && self.fires.iter().any(|entry| entry.key().path() == path)
    }

    /// Whether `namespace` is valid and some registered fire type uses it
    pub fn is_registered_namespace(&self, namespace: &str) -> bool {
        is_valid_namespace(namespace)
            && self
                .fires
                .iter()
                .any(|entry| entry.key().namespace() == namespace)
    }

    /// Identifier of the `kind` component of `fire_type` (or of the default fire)
    pub fn component_id(&self, fire_type: &Identifier, kind: ComponentKind) -> Option<Identifier> {
        self.get(fire_type).component(kind).cloned()
    }

    /// Host value of `component` for `fire_type`, `None` when absent or unresolved
    pub fn component<T>(&self, fire_type: &Identifier, component: &Component<H, T>) -> Option<T> {
        self.component_id(fire_type, component.kind())
            .and_then(|id| component.resolve(&self.host, &id))
    }

    /// Host value of a component the registration order guarantees.
    ///
    /// Fails with `MissingComponent` when the fire has no such component and
    /// with `UnresolvedComponent` when the host does not know its identifier.
    pub fn require_component<T>(
        &self,
        fire_type: &Identifier,
        component: &Component<H, T>,
    ) -> FireResult<T> {
        let fire = self.get(fire_type);
        let kind = component.kind();
        let id = fire
            .component(kind)
            .ok_or_fire(|| FireError::MissingComponent {
                fire_type: fire.fire_type().clone(),
                kind,
            })?;
        component
            .resolve(&self.host, id)
            .ok_or_fire(|| FireError::UnresolvedComponent {
                fire_type: fire.fire_type().clone(),
                kind,
                id: id.clone(),
            })
    }

    pub fn in_fire_source(&self, fire_type: &Identifier) -> DamageSourceRef {
        self.damage_source(fire_type, DamageSourceKind::InFire)
    }

    pub fn on_fire_source(&self, fire_type: &Identifier) -> DamageSourceRef {
        self.damage_source(fire_type, DamageSourceKind::OnFire)
    }

    pub fn damage_source(&self, fire_type: &Identifier, kind: DamageSourceKind) -> DamageSourceRef {
        self.get(fire_type).damage_source(kind).clone()
    }

    /// `fire_type` if it is registered, the default fire type otherwise
    pub fn ensure(&self, fire_type: &Identifier) -> Identifier {
        if self.is_registered(fire_type) {
            fire_type.clone()
        } else {
            Identifier::default_fire_type()
        }
    }

    /// Trim raw parts, then [`ensure`](Self::ensure) the resulting identifier
    pub fn ensure_parts(&self, namespace: &str, path: &str) -> Identifier {
        let (namespace, path) = (namespace.trim(), path.trim());
        if is_valid_namespace(namespace) && is_valid_path(path) {
            self.ensure(&Identifier::new(namespace, path))
        } else {
            Identifier::default_fire_type()
        }
    }

    fn bind_fire_typed_components(&self, fire: &Fire) {
        for kind in ComponentKind::ALL.iter().filter(|kind| kind.carries_fire_type()) {
            let Some(id) = fire.component(*kind) else {
                continue;
            };
            match self.host.block(id) {
                Some(block) => self.host.bind_fire_type(&block, fire.fire_type()),
                None => log::debug!(
                    "Fire [{}] {} '{}' is not registered with the host yet",
                    fire.fire_type(),
                    kind,
                    id
                ),
            }
        }
    }
}
