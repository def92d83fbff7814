//! Whole-model properties checked through the public API.

use shadowgen_model::{BindingModel, ModelBuilder, ModelOptions, TypeArena, TypeId, Visibility};
use std::collections::{BTreeMap, HashSet};

/// One declared type: (namespace, enclosing simple names, simple name).
type Decl = (&'static str, &'static [&'static str], &'static str);

const ACTUALS: &[Decl] = &[
    ("android.widget", &[], "TextView"),
    ("android.text", &[], "TextView"),
    ("android.view", &["View"], "OnClickListener"),
    ("android.widget", &["AdapterView"], "OnClickListener"),
    ("android.app", &["Notification"], "Builder"),
    ("android.app", &["AlertDialog"], "Builder"),
    ("android.net", &["Uri"], "Builder"),
    ("android.os", &[], "Handler"),
    ("org.robolectric.internal", &[], "Sandbox"),
    ("com.example.app", &[], "Handler"),
];

fn declare(types: &mut TypeArena, (namespace, enclosing, simple): Decl) -> TypeId {
    let mut scope: Option<TypeId> = None;
    for outer in enclosing {
        scope = Some(match scope {
            None => types.declare_top_level(namespace, outer, Visibility::Public),
            Some(parent) => types
                .declare_nested(parent, outer, Visibility::Public)
                .expect("parent declared"),
        });
    }
    match scope {
        None => types.declare_top_level(namespace, simple, Visibility::Public),
        Some(parent) => types
            .declare_nested(parent, simple, Visibility::Public)
            .expect("parent declared"),
    }
}

/// Build a model with the bindings registered in `order`.
fn build_in_order(order: &[usize]) -> BindingModel {
    let mut builder = ModelBuilder::new(ModelOptions::default());
    builder.types_mut().declare_namespace("java.lang");

    for &i in order {
        let actual = declare(builder.types_mut(), ACTUALS[i]);
        let shadow_name = format!("Shadow{}{}", ACTUALS[i].2, i);
        let shadow = builder.types_mut().declare_top_level(
            "org.robolectric.shadows",
            &shadow_name,
            Visibility::Public,
        );
        builder
            .add_shadow_binding(shadow, actual, i % 3 != 0, false, true)
            .expect("binding");
        if i % 2 == 0 {
            builder
                .add_resetter_binding(shadow, "reset", -1, -1)
                .expect("hook");
        }
    }
    builder.build().expect("build")
}

fn referents_by_name(model: &BindingModel) -> BTreeMap<String, String> {
    model
        .types()
        .iter()
        .filter_map(|(id, desc)| {
            model
                .referent_of(id)
                .map(|referent| (desc.qualified_name.clone(), referent.to_string()))
        })
        .collect()
}

fn forward() -> Vec<usize> {
    (0..ACTUALS.len()).collect()
}

#[test]
fn test_referents_are_unique() {
    let model = build_in_order(&forward());
    let referents = referents_by_name(&model);

    let distinct: HashSet<&String> = referents.values().collect();
    assert_eq!(distinct.len(), referents.len());
    // Every bound actual and shadow type got a referent.
    assert_eq!(referents.len(), ACTUALS.len() * 2);
}

#[test]
fn test_build_is_independent_of_registration_order() {
    let forward_model = build_in_order(&forward());
    let reversed: Vec<usize> = forward().into_iter().rev().collect();
    let reversed_model = build_in_order(&reversed);
    let rotated: Vec<usize> = (0..ACTUALS.len())
        .map(|i| (i + 4) % ACTUALS.len())
        .collect();
    let rotated_model = build_in_order(&rotated);

    for other in [&reversed_model, &rotated_model] {
        assert_eq!(forward_model.imports(), other.imports());
        assert_eq!(referents_by_name(&forward_model), referents_by_name(other));
        assert_eq!(
            forward_model.shadowed_namespaces(),
            other.shadowed_namespaces()
        );
        let lhs: Vec<_> = forward_model.all_bindings().collect();
        let rhs: Vec<_> = other.all_bindings().collect();
        assert_eq!(lhs.len(), rhs.len());
        for (a, b) in lhs.iter().zip(rhs.iter()) {
            assert_eq!(a.shadow_name, b.shadow_name);
            assert_eq!(a.actual_referent, b.actual_referent);
            assert_eq!(a.shadow_referent, b.shadow_referent);
        }
    }
}

#[test]
fn test_expected_referents() {
    let model = build_in_order(&forward());

    assert_eq!(
        model.referent_of_name("android.widget.TextView"),
        Some("android.widget.TextView")
    );
    assert_eq!(
        model.referent_of_name("android.view.View.OnClickListener"),
        Some("View.OnClickListener")
    );
    assert_eq!(
        model.referent_of_name("android.app.AlertDialog.Builder"),
        Some("AlertDialog.Builder")
    );
    assert_eq!(
        model.referent_of_name("android.net.Uri.Builder"),
        Some("Uri.Builder")
    );
    assert_eq!(
        model.referent_of_name("com.example.app.Handler"),
        Some("com.example.app.Handler")
    );
    assert_eq!(model.referent_of_name("android.view.View"), None);
}

#[test]
fn test_imports_are_sorted_and_unique() {
    let model = build_in_order(&forward());
    let imports = model.imports();

    let mut sorted = imports.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(imports, sorted.as_slice());
    assert!(imports.contains(&"android.view.View".to_string()));
    assert!(imports.contains(&"java.util.Map".to_string()));
    assert!(!imports.contains(&"android.widget.TextView".to_string()));
}

#[test]
fn test_shadowed_namespaces_never_contain_self_namespace() {
    let model = build_in_order(&forward());

    assert!(
        model
            .shadowed_namespaces()
            .iter()
            .all(|ns| !ns.starts_with("org.robolectric"))
    );
    assert!(
        model
            .shadowed_namespaces()
            .contains(&"com.example.app".to_string())
    );
}

#[test]
fn test_active_resetters_match_bound_shadows() {
    let model = build_in_order(&forward());

    for resetter in model.resetters() {
        assert!(model.binding_for(&resetter.shadow_name).is_some());
        assert_eq!(
            model.invocation_text_for(resetter),
            format!("{}.reset()", resetter.shadow_referent)
        );
    }
    assert_eq!(model.resetters().count(), ACTUALS.len().div_ceil(2));
}
