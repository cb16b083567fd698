use udf_model::SpecialType;
use udf_registry::{CollisionPolicy, RegistryError, SpecialTypeRegistry};

#[test]
fn register_lookup_and_clear() {
    let mut registry = SpecialTypeRegistry::new();
    let summary = registry
        .register(vec![SpecialType::new(5, "X")])
        .expect("register");
    assert_eq!(summary.added, 1);

    assert_eq!(registry.get_by_value(5).map(|s| s.name.as_str()), Some("X"));
    assert_eq!(registry.get_by_name("X").map(|s| s.value), Some(5));
    assert!(registry.has(5));

    registry.clear();
    assert!(!registry.has(5));
    assert!(registry.get_by_value(5).is_none());
    assert!(registry.get_by_name("X").is_none());
    assert!(registry.get_all().is_empty());
}

#[test]
fn lookups_miss_without_panicking() {
    let registry = SpecialTypeRegistry::new();
    assert!(registry.get_by_value(42).is_none());
    assert!(registry.get_by_name("nothing").is_none());
    assert!(!registry.has(42));
}

#[test]
fn identical_registration_is_idempotent() {
    let mut registry = SpecialTypeRegistry::with_policy(CollisionPolicy::Reject);
    registry
        .register(vec![SpecialType::new(1, "Cost center")])
        .expect("first registration");
    let summary = registry
        .register(vec![SpecialType::new(1, "Cost center")])
        .expect("second registration");
    assert_eq!(summary.unchanged, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn default_policy_overwrites_with_warning() {
    let mut registry = SpecialTypeRegistry::new();
    assert_eq!(registry.policy(), CollisionPolicy::Warn);
    registry
        .register(vec![SpecialType::new(3, "Old")])
        .expect("register");
    let summary = registry
        .register(vec![SpecialType::new(3, "New")])
        .expect("re-register");
    assert_eq!(summary.replaced, 1);
    assert_eq!(registry.get_by_value(3).map(|s| s.name.as_str()), Some("New"));
    assert!(registry.get_by_name("Old").is_none());
}

#[test]
fn reject_policy_leaves_registry_unchanged() {
    let mut registry = SpecialTypeRegistry::from_types(
        CollisionPolicy::Reject,
        vec![SpecialType::new(3, "Old")],
    )
    .expect("initial registry");

    let err = registry
        .register(vec![SpecialType::new(4, "Other"), SpecialType::new(3, "New")])
        .unwrap_err();
    assert!(matches!(err, RegistryError::Collision { value: 3, .. }));
    assert!(!registry.has(4));
    assert_eq!(registry.get_by_value(3).map(|s| s.name.as_str()), Some("Old"));
}

#[test]
fn policy_reads_from_config_strings() {
    let policy: CollisionPolicy = serde_json::from_str("\"reject\"").expect("parse policy");
    assert_eq!(policy, CollisionPolicy::Reject);
}
