//! Tests for the evalexpr-based compiler

use cbl_domain::error::{Error, ExecutionError};
use cbl_domain::ports::Compiler;
use cbl_domain::render::{CapabilitySet, RenderScope};
use cbl_providers::ExpressionCompiler;
use cbl_providers::compiler::prop_variable;
use serde_json::json;

fn compile(source: &str) -> Result<cbl_domain::ports::ExecutableComponent, ExecutionError> {
    ExpressionCompiler::new().compile(source, "HERO", &CapabilitySet::standard())
}

#[test]
fn test_renders_body_with_props() {
    let component = compile(r#"component = "\"<h1>\" + props_title + \"</h1>\"""#).unwrap();

    let html = component
        .render(&json!({"title": "Welcome"}), &RenderScope::new())
        .unwrap();

    assert_eq!(html, "<h1>Welcome</h1>");
    assert_eq!(component.identifier(), "HERO");
}

#[test]
fn test_module_bindings_are_visible_to_body() {
    let component = compile(
        r#"
        greeting = "Hello, ";
        component = "greeting + props_name"
        "#,
    )
    .unwrap();

    let html = component
        .render(&json!({"name": "Ada"}), &RenderScope::new())
        .unwrap();

    assert_eq!(html, "Hello, Ada");
}

#[test]
fn test_non_string_result_uses_display_form() {
    let component = compile(r#"component = "props_price * 2""#).unwrap();

    let html = component
        .render(&json!({"price": 21}), &RenderScope::new())
        .unwrap();

    assert_eq!(html, "42");
}

#[test]
fn test_use_state_keeps_value_across_renders() {
    let component = compile(r#"component = "use_state(\"count\", 41) + 1""#).unwrap();
    let scope = RenderScope::new();

    assert_eq!(component.render(&json!({}), &scope).unwrap(), "42");
    scope.set_state("count", json!(1));
    assert_eq!(component.render(&json!({}), &scope).unwrap(), "2");
}

#[test]
fn test_use_effect_records_pending_effect() {
    let component = compile(r#"component = "use_effect(\"track\"); \"<div/>\"""#).unwrap();
    let scope = RenderScope::new();

    let html = component.render(&json!({}), &scope).unwrap();

    assert_eq!(html, "<div/>");
    assert_eq!(scope.take_effects(), vec!["track".to_string()]);
}

#[test]
fn test_use_callback_returns_stable_handle() {
    let component = compile(r#"component = "use_callback(\"submit\", \"onSubmit\")""#).unwrap();
    let scope = RenderScope::new();

    let first = component.render(&json!({}), &scope).unwrap();
    let second = component.render(&json!({}), &scope).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("submit"));
}

#[test]
fn test_capabilities_are_not_bound_while_evaluating_module() {
    let error = compile(r#"x = use_state("count", 0); component = "x""#).unwrap_err();
    assert!(matches!(error, ExecutionError::Evaluation { .. }));
}

#[test]
fn test_syntax_error_is_evaluation_failure() {
    let error = compile("component = (").unwrap_err();

    assert!(matches!(error, ExecutionError::Evaluation { .. }));
    assert_eq!(error.identifier(), "HERO");
}

#[test]
fn test_missing_export_is_no_export() {
    let error = compile(r#"title = "nothing exported""#).unwrap_err();

    assert_eq!(
        error,
        ExecutionError::NoExport {
            identifier: "HERO".to_string(),
            binding: "component".to_string(),
        }
    );
}

#[test]
fn test_blank_export_is_no_export() {
    let error = compile(r#"component = "   ""#).unwrap_err();
    assert!(matches!(error, ExecutionError::NoExport { .. }));
}

#[test]
fn test_non_string_export_is_not_callable() {
    let error = compile("component = 42").unwrap_err();

    match error {
        ExecutionError::NotCallable { identifier, found } => {
            assert_eq!(identifier, "HERO");
            assert!(found.contains("int"));
        }
        other => panic!("expected NotCallable, got {other:?}"),
    }
}

#[test]
fn test_uncompilable_body_is_not_callable() {
    let error = compile(r#"component = "(((""#).unwrap_err();
    assert!(matches!(error, ExecutionError::NotCallable { .. }));
}

#[test]
fn test_missing_prop_is_render_error() {
    let component = compile(r#"component = "props_title""#).unwrap();

    let error = component.render(&json!({}), &RenderScope::new()).unwrap_err();

    assert!(matches!(error, Error::Render { ref identifier, .. } if identifier == "HERO"));
}

#[test]
fn test_prop_names_are_sanitized() {
    assert_eq!(prop_variable("title"), "props_title");
    assert_eq!(prop_variable("cta-label"), "props_cta_label");
    assert_eq!(prop_variable("a.b c"), "props_a_b_c");
}

#[test]
fn test_compiler_name() {
    assert_eq!(ExpressionCompiler::new().compiler_name(), "evalexpr");
}
