use super::*;
use crate::capability::FireTyped;
use crate::component::{BlockComponent, HostBlock, HostRegistrar, InMemoryHost, ItemComponent};
use crate::fire::FireBuilder;
use crate::identifier::sanitize;
use std::sync::Barrier;
use std::thread;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn new_registry() -> FireRegistry<InMemoryHost> {
    init_logging();
    FireRegistry::new(Arc::new(InMemoryHost::new()))
}

fn fire(namespace: &str, path: &str) -> Fire {
    FireBuilder::from_parts(namespace, path)
        .build()
        .expect("valid fire type")
}

fn blue() -> Identifier {
    Identifier::new("mymod", "blue")
}

#[test]
fn test_default_fire_is_always_registered() {
    let registry = new_registry();
    let default = Identifier::default_fire_type();
    assert!(registry.is_registered(&default));
    assert!(registry.get(&default).is_default());
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_default_fire_uses_host_baseline() {
    init_logging();
    let host = InMemoryHost::with_baseline(vec![(
        ComponentKind::SourceBlock,
        Identifier::new("host", "fire"),
    )]);
    let registry = FireRegistry::new(Arc::new(host));
    assert_eq!(
        registry.component_id(&Identifier::default_fire_type(), ComponentKind::SourceBlock),
        Some(Identifier::new("host", "fire"))
    );
}

#[test]
fn test_register_and_lookup_scenario() {
    let registry = new_registry();
    let blue_fire = FireBuilder::new(blue())
        .with_damage(3.0)
        .with_light(10)
        .build()
        .expect("valid fire");
    registry.register(blue_fire).expect("first registration");

    let found = registry.get(&blue());
    assert_eq!(found.damage(), 3.0);
    assert_eq!(found.light(), 10);

    let missing = registry.get(&Identifier::new("mymod", "missing"));
    assert!(missing.is_default());
    assert_eq!(missing.damage(), 1.0);
}

#[test]
fn test_double_register_keeps_first() {
    let registry = new_registry();
    let first = FireBuilder::new(blue())
        .with_damage(3.0)
        .build()
        .expect("valid fire");
    let second = FireBuilder::new(blue())
        .with_damage(9.0)
        .build()
        .expect("valid fire");

    assert!(registry.register(first).is_some());
    assert!(registry.register(second).is_none());
    assert_eq!(registry.get(&blue()).damage(), 3.0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_register_returns_published_fire() {
    let registry = new_registry();
    let published = registry.register(fire("mymod", "blue")).expect("first registration");
    assert!(Arc::ptr_eq(&published, &registry.get(&blue())));
}

#[test]
fn test_concurrent_registration_single_winner() {
    let registry = Arc::new(new_registry());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let fire = FireBuilder::new(blue())
                    .with_damage(i as f32 + 1.0)
                    .build()
                    .expect("valid fire");
                barrier.wait();
                registry.register(fire).map(|published| published.damage())
            })
        })
        .collect();

    let outcomes: Vec<Option<f32>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("registration thread panicked"))
        .collect();

    let winners: Vec<f32> = outcomes.into_iter().flatten().collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(registry.get(&blue()).damage(), winners[0]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_concurrent_batches_single_winner() {
    let registry = Arc::new(new_registry());
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let batch = vec![fire("mymod", "blue"), fire("mymod", "green")];
                barrier.wait();
                registry.register_batch(batch)
            })
        })
        .collect();

    let outcomes: Vec<RegistrationOutcomes> = handles
        .into_iter()
        .map(|handle| handle.join().expect("batch thread panicked"))
        .collect();

    for fire_type in [blue(), Identifier::new("mymod", "green")] {
        let successes = outcomes
            .iter()
            .filter(|batch| batch[&fire_type].is_some())
            .count();
        assert_eq!(successes, 1, "{} registered more than once", fire_type);
    }
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_batch_partial_success() {
    let registry = new_registry();
    registry.register(fire("mymod", "blue")).expect("first registration");

    let outcomes = registry.register_batch(vec![
        fire("mymod", "blue"),
        fire("mymod", "green"),
        fire("mymod", "green"),
    ]);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[&blue()].is_none());
    // Repeated key keeps its first outcome
    assert!(outcomes[&Identifier::new("mymod", "green")].is_some());
    assert!(registry.is_registered(&Identifier::new("mymod", "green")));
}

#[test]
fn test_register_parallel() {
    let registry = new_registry();
    let fires: Vec<Fire> = (0..64).map(|i| fire("mymod", &format!("fire_{}", i))).collect();
    let outcomes = registry.register_parallel(fires);
    assert_eq!(outcomes.len(), 64);
    assert!(outcomes.values().all(|outcome| outcome.is_some()));
    assert_eq!(registry.len(), 65);

    let again = registry.register_parallel(vec![fire("mymod", "fire_0")]);
    assert!(again[&Identifier::new("mymod", "fire_0")].is_none());
}

#[test]
fn test_unregister() {
    let registry = new_registry();
    registry.register(fire("mymod", "blue")).expect("first registration");

    let removed = registry.unregister(&blue()).expect("blue was registered");
    assert_eq!(removed.fire_type(), &blue());
    assert!(!registry.is_registered(&blue()));
    assert!(registry.unregister(&blue()).is_none());

    // A removed fire type can be registered again
    assert!(registry.register(fire("mymod", "blue")).is_some());
}

#[test]
fn test_default_fire_cannot_be_unregistered() {
    let registry = new_registry();
    assert!(registry.unregister(&Identifier::default_fire_type()).is_none());
    assert!(registry.is_registered(&Identifier::default_fire_type()));
}

#[test]
#[ignore = "unregister does not retract host registrations yet"]
fn test_unregister_retracts_host_blocks() {
    let registry = new_registry();
    let fire = FireBuilder::new(blue())
        .with_default_component(ComponentKind::SourceBlock)
        .build()
        .expect("valid fire");
    registry.register(fire).expect("first registration");
    ComponentRegistrar::new(&registry)
        .register_fire_source(&blue(), |id| Arc::new(HostBlock::new(id.clone())))
        .expect("Failed to register fire source");

    registry.unregister(&blue());
    assert_eq!(registry.host().block_count(), 0);
}

#[test]
fn test_ensure() {
    let registry = new_registry();
    let blue = blue();
    assert!(registry.ensure(&blue).is_default());

    registry.register(fire("mymod", "blue")).expect("first registration");
    assert_eq!(registry.ensure(&blue), blue);
    assert!(registry.ensure(&Identifier::default_fire_type()).is_default());
    assert!(registry.ensure(&Identifier::new("Bad", "Fire")).is_default());
}

#[test]
fn test_ensure_is_stronger_than_sanitize() {
    let registry = new_registry();
    registry.register(fire("mymod", "blue")).expect("first registration");

    let candidates = [
        blue(),
        Identifier::new("mymod", "green"),
        Identifier::new("", "blue"),
        Identifier::new("my mod", "blue"),
        Identifier::default_fire_type(),
    ];
    for id in &candidates {
        let ensured = registry.ensure(id);
        assert!(ensured == sanitize(id) || ensured.is_default());
        assert!(registry.is_registered(&ensured));
    }
}

#[test]
fn test_ensure_parts_trims() {
    let registry = new_registry();
    registry.register(fire("mymod", "blue")).expect("first registration");
    assert_eq!(registry.ensure_parts("  mymod ", " blue\n"), blue());
    assert!(registry.ensure_parts("mymod", "").is_default());
    assert!(registry.ensure_parts("mymod", "green").is_default());
    assert_eq!(registry.get_parts(" mymod", "blue ").fire_type(), &blue());
}

#[test]
fn test_listing() {
    let registry = new_registry();
    registry.register_batch(vec![
        fire("mymod", "blue"),
        fire("mymod", "green"),
        fire("othermod", "blue"),
    ]);

    assert_eq!(registry.list().len(), 4);
    assert_eq!(registry.list_types().len(), 4);

    let mut ids = registry.list_ids();
    ids.sort();
    assert_eq!(ids, vec!["", "blue", "blue", "green"]);

    let mut namespaces = registry.list_namespaces();
    namespaces.sort();
    assert_eq!(namespaces, vec!["", "mymod", "othermod"]);

    assert!(registry.is_registered_path("green"));
    assert!(!registry.is_registered_path("red"));
    assert!(!registry.is_registered_path(""));
    assert!(registry.is_registered_namespace("othermod"));
    assert!(!registry.is_registered_namespace(""));
}

#[test]
fn test_property_projections() {
    let registry = new_registry();
    registry.register(
        FireBuilder::new(blue())
            .with_light(10)
            .with_default_component(ComponentKind::LanternBlock)
            .build()
            .expect("valid fire"),
    );

    assert_eq!(registry.property(&blue(), |fire| fire.light()), 10);
    assert_eq!(
        registry.property(&Identifier::new("mymod", "missing"), |fire| fire.light()),
        15
    );

    let mut lights = registry.property_list(|fire| fire.light());
    lights.sort();
    assert_eq!(lights, vec![10, 15]);

    assert_eq!(
        registry.component_id_list(ComponentKind::LanternBlock),
        vec![Identifier::new("mymod", "blue_lantern")]
    );
}

#[test]
fn test_component_lookup() {
    let registry = new_registry();
    registry
        .register(
            FireBuilder::new(blue())
                .with_default_component(ComponentKind::LanternBlock)
                .with_default_component(ComponentKind::LanternItem)
                .build()
                .expect("valid fire"),
        )
        .expect("first registration");

    let lantern = BlockComponent::<InMemoryHost>::LANTERN_BLOCK;
    assert!(registry.component(&blue(), &lantern).is_none());
    assert!(registry.component_list(&lantern).is_empty());

    let id = Identifier::new("mymod", "blue_lantern");
    registry
        .host()
        .register_block(id.clone(), Arc::new(HostBlock::new(id.clone())))
        .expect("register lantern block");

    let resolved = registry.component(&blue(), &lantern).expect("lantern resolves");
    assert_eq!(resolved.id(), &id);
    assert_eq!(registry.component_list(&lantern).len(), 1);
    assert!(registry.require_component(&blue(), &lantern).is_ok());

    let torch = registry.require_component(&blue(), &BlockComponent::<InMemoryHost>::TORCH_BLOCK);
    assert!(matches!(
        torch,
        Err(FireError::MissingComponent {
            kind: ComponentKind::TorchBlock,
            ..
        })
    ));

    let item = registry.require_component(&blue(), &ItemComponent::<InMemoryHost>::LANTERN_ITEM);
    assert!(matches!(item, Err(FireError::UnresolvedComponent { .. })));
}

#[test]
fn test_register_stamps_existing_fire_typed_blocks() {
    let registry = new_registry();
    let source_id = Identifier::new("mymod", "blue_fire");
    let lantern_id = Identifier::new("mymod", "blue_lantern");
    let host = registry.host();
    let source = host
        .register_block(source_id.clone(), Arc::new(HostBlock::new(source_id)))
        .expect("register source block");
    let lantern = host
        .register_block(lantern_id.clone(), Arc::new(HostBlock::new(lantern_id)))
        .expect("register lantern block");

    registry
        .register(
            FireBuilder::new(blue())
                .with_default_component(ComponentKind::SourceBlock)
                .with_default_component(ComponentKind::LanternBlock)
                .build()
                .expect("valid fire"),
        )
        .expect("first registration");

    assert_eq!(source.fire_type(), blue());
    assert!(lantern.fire_type().is_default());
}

#[test]
fn test_damage_sources() {
    let registry = new_registry();
    let custom = DamageSourceRef::Custom(Identifier::new("mymod", "in_blue_fire"));
    registry
        .register(
            FireBuilder::new(blue())
                .with_in_fire_source(custom.clone())
                .build()
                .expect("valid fire"),
        )
        .expect("first registration");

    assert_eq!(registry.in_fire_source(&blue()), custom);
    assert_eq!(
        registry.on_fire_source(&blue()),
        DamageSourceRef::Baseline(DamageSourceKind::OnFire)
    );
    assert_eq!(
        registry.damage_source(&Identifier::new("mymod", "missing"), DamageSourceKind::InFire),
        DamageSourceRef::Baseline(DamageSourceKind::InFire)
    );
}

#[test]
fn test_startup_flow() -> anyhow::Result<()> {
    let registry = new_registry();
    let settings = Arc::new(crate::config::FireSettings::from_toml(
        "[fires.\"mymod:blue\".flame]\nenabled = false\n",
    )?);

    let blue_fire = FireBuilder::new(blue())
        .with_damage(3.0)
        .with_default_component(ComponentKind::SourceBlock)
        .with_default_component(ComponentKind::LanternBlock)
        .with_default_component(ComponentKind::LanternItem)
        .with_settings(&settings)
        .build()?;
    registry
        .register(blue_fire)
        .ok_or_else(|| anyhow::anyhow!("mymod:blue was already registered"))?;

    let registrar = ComponentRegistrar::new(&registry);
    let source = registrar.register_fire_source(&blue(), |id| Arc::new(HostBlock::new(id.clone())))?;
    registrar.register_lantern(&blue(), |id| Arc::new(HostBlock::new(id.clone())))?;
    let item = registrar.register_lantern_item(&blue(), |lantern| {
        Arc::new(crate::component::HostItem::new(
            Identifier::new("mymod", "blue_lantern"),
            vec![lantern],
        ))
    })?;

    assert_eq!(source.fire_type(), blue());
    assert_eq!(item.places().len(), 1);
    assert!(!registry.get(&blue()).flame().is_enabled());
    assert!(registry.get(&blue()).fire_aspect().is_enabled());
    Ok(())
}
