use super::args::CliArgs;
use super::driver::{build_model, render, run};
use super::manifest::Manifest;
use clap::Parser;
use shadowgen_model::ModelOptions;
use std::ffi::OsStr;

const MANIFEST: &str = r#"{
    "namespaces": ["java.lang"],
    "types": [
        { "qualifiedName": "android.widget.TextView", "enclosing": { "namespace": "android.widget" } },
        { "qualifiedName": "android.text.TextView", "enclosing": { "namespace": "android.text" } },
        { "qualifiedName": "android.view.View", "enclosing": { "namespace": "android.view" } },
        { "qualifiedName": "android.view.View.OnClickListener",
          "enclosing": { "type": "android.view.View" } },
        { "qualifiedName": "android.widget.AdapterView", "enclosing": { "namespace": "android.widget" } },
        { "qualifiedName": "android.widget.AdapterView.OnClickListener",
          "enclosing": { "type": "android.widget.AdapterView" } },
        { "qualifiedName": "org.robolectric.shadows.ShadowAdapterClickListener",
          "enclosing": { "namespace": "org.robolectric.shadows" } },
        { "qualifiedName": "org.robolectric.shadows.ShadowTextView",
          "enclosing": { "namespace": "org.robolectric.shadows" } },
        { "qualifiedName": "org.robolectric.shadows.ShadowTextLayout",
          "enclosing": { "namespace": "org.robolectric.shadows" } },
        { "qualifiedName": "org.robolectric.shadows.ShadowOnClickListener",
          "enclosing": { "namespace": "org.robolectric.shadows" } }
    ],
    "shadows": [
        { "shadow": "org.robolectric.shadows.ShadowTextView", "actual": "android.widget.TextView" },
        { "shadow": "org.robolectric.shadows.ShadowTextLayout", "actual": "android.text.TextView" },
        { "shadow": "org.robolectric.shadows.ShadowOnClickListener",
          "actual": "android.view.View.OnClickListener", "core": false },
        { "shadow": "org.robolectric.shadows.ShadowAdapterClickListener",
          "actual": "android.widget.AdapterView.OnClickListener", "core": false },
        { "shadow": "org.robolectric.shadows.ShadowTextView", "actual": "android.text.TextView" }
    ],
    "resetters": [
        { "shadow": "org.robolectric.shadows.ShadowTextView", "method": "reset", "minVersion": 21 }
    ],
    "extraShadows": [
        { "actual": "android.os.SystemProperties", "shadow": "org.robolectric.shadows.ShadowSystemProperties" }
    ],
    "docs": {
        "packages": [ { "name": "android.widget", "documentation": "Widgets." } ],
        "types": [ { "type": "android.widget.TextView", "documentation": "Displays text." } ],
        "methods": [
            { "type": "android.widget.TextView", "name": "setText", "params": ["CharSequence"],
              "returnType": "void", "minVersion": 1 }
        ]
    }
}"#;

fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}

#[test]
fn test_build_model_collects_rejected_bindings() {
    let manifest = Manifest::parse(MANIFEST).expect("parse");
    let outcome = build_model(&manifest, ModelOptions::default()).expect("build");

    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.model.all_bindings().count(), 4);
    assert_eq!(outcome.model.core_bindings().count(), 2);
    assert_eq!(
        outcome.model.referent_of_name("android.widget.TextView"),
        Some("android.widget.TextView")
    );
    assert_eq!(
        outcome.model.referent_of_name("android.view.View.OnClickListener"),
        Some("View.OnClickListener")
    );
    assert_eq!(
        outcome.model.referent_of_name("android.widget.AdapterView.OnClickListener"),
        Some("AdapterView.OnClickListener")
    );
    let imports = outcome.model.imports();
    assert!(imports.contains(&"android.view.View".to_string()));
    assert!(imports.contains(&"android.widget.AdapterView".to_string()));
    assert!(!imports.iter().any(|i| i.ends_with(".OnClickListener")));
}

#[test]
fn test_missing_implicit_namespace_fails_the_build() {
    let manifest = Manifest::parse(r#"{ "types": [] }"#).expect("parse");
    let err = build_model(&manifest, ModelOptions::default()).expect_err("no java.lang");
    assert!(format!("{err:#}").contains("java.lang"));
}

#[test]
fn test_render_emits_camel_case_report() {
    let manifest = Manifest::parse(MANIFEST).expect("parse");
    let outcome = build_model(&manifest, ModelOptions::default()).expect("build");

    let json: serde_json::Value =
        serde_json::from_str(&render(&outcome.model, false).expect("render")).expect("json");
    assert_eq!(
        json["shadowedNamespaces"],
        serde_json::json!(["android.text", "android.view", "android.widget"])
    );
    assert_eq!(json["resetters"][0]["invocation"], "ShadowTextView.reset()");
    assert_eq!(json["resetters"][0]["minVersion"], 21);
    assert_eq!(
        json["extraShadows"]["org.robolectric.shadows.ShadowSystemProperties"],
        "android.os.SystemProperties"
    );
    assert_eq!(
        json["documentation"]["android.widget"]["types"]["android.widget.TextView"]["methods"]
            ["setText"]["returnType"],
        "void"
    );
}

#[test]
fn test_pretty_output_is_indented() {
    let manifest = Manifest::parse(MANIFEST).expect("parse");
    let outcome = build_model(&manifest, ModelOptions::default()).expect("build");

    let compact = render(&outcome.model, false).expect("render");
    let pretty = render(&outcome.model, true).expect("render");
    assert!(!compact.contains('\n'));
    assert!(pretty.contains("\n  \"imports\""));
}

#[test]
fn test_run_writes_model_to_output_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let manifest = write(&dir, "decls.json", MANIFEST);
    let output = dir.path().join("model.json");
    let args = CliArgs::parse_from([
        OsStr::new("shadowgen"),
        manifest.as_os_str(),
        OsStr::new("--output"),
        output.as_os_str(),
    ]);

    let outcome = run(&args).expect("run");
    assert_eq!(outcome.rejected.len(), 1);

    let written = std::fs::read_to_string(&output).expect("model written");
    let json: serde_json::Value = serde_json::from_str(&written).expect("json");
    assert_eq!(json["bindings"].as_array().map(Vec::len), Some(4));
}

#[test]
fn test_run_honours_config_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let manifest = write(&dir, "decls.json", r#"{ "types": [] }"#);
    let output = dir.path().join("model.json");
    let args = CliArgs::parse_from([
        OsStr::new("shadowgen"),
        manifest.as_os_str(),
        OsStr::new("--no-implicit-namespace"),
        OsStr::new("-o"),
        output.as_os_str(),
    ]);

    let outcome = run(&args).expect("run without java.lang");
    assert_eq!(outcome.model.all_bindings().count(), 0);
    assert!(output.exists());
}
