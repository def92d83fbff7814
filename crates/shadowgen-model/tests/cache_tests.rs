use super::*;
use crate::builder::ModelBuilder;
use crate::options::ModelOptions;
use crate::types::Visibility;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

fn build_model(shadow_name: &str) -> Result<BindingModel, ModelError> {
    let mut builder = ModelBuilder::new(ModelOptions::default());
    let types = builder.types_mut();
    types.declare_namespace("java.lang");
    let actual = types.declare_top_level("android.app", "Activity", Visibility::Public);
    let shadow = types.declare_top_level("org.robolectric.shadows", shadow_name, Visibility::Public);
    builder.add_shadow_binding(shadow, actual, true, false, true)?;
    builder.build()
}

#[test]
fn test_builds_once_per_key() {
    let cache: ModelCache<&'static str> = ModelCache::new();
    let builds = AtomicUsize::new(0);

    let first = cache
        .get_or_build("unit-a", || {
            builds.fetch_add(1, Ordering::SeqCst);
            build_model("ShadowActivity")
        })
        .expect("built");
    let second = cache
        .get_or_build("unit-a", || {
            builds.fetch_add(1, Ordering::SeqCst);
            build_model("ShadowOther")
        })
        .expect("cached");

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(
        second
            .binding_for("org.robolectric.shadows.ShadowActivity")
            .is_some()
    );
}

#[test]
fn test_distinct_keys_get_distinct_models() {
    let cache = ModelCache::new();
    let a = cache
        .get_or_build(1_u32, || build_model("ShadowA"))
        .expect("built");
    let b = cache
        .get_or_build(2_u32, || build_model("ShadowB"))
        .expect("built");

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 2);
    assert!(cache.get(&1).is_some());
    assert!(cache.get(&3).is_none());
}

#[test]
fn test_failed_build_is_not_cached() {
    let cache = ModelCache::new();

    let err = cache
        .get_or_build("unit", || Err(ModelError::AlreadyBuilt))
        .expect_err("build fails");
    assert_eq!(err, ModelError::AlreadyBuilt);
    assert!(cache.get(&"unit").is_none());
    assert!(cache.is_empty());

    cache
        .get_or_build("unit", || build_model("ShadowActivity"))
        .expect("retry succeeds");
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_concurrent_callers_share_one_build() {
    let cache: ModelCache<String> = ModelCache::new();
    let builds = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                cache
                    .get_or_build("shared".to_string(), || {
                        builds.fetch_add(1, Ordering::SeqCst);
                        build_model("ShadowActivity")
                    })
                    .expect("built")
            });
        }
    });

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert_eq!(cache.teardown(), 1);
}
