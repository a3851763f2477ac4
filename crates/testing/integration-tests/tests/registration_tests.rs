//! End-to-end registration scenarios

#![allow(
    clippy::tests_outside_test_module,
    clippy::unwrap_used,
    reason = "Integration tests are top-level test functions over known-good fixtures"
)]

use cg_graph::{Collection, DeclKind, Insertion, ReplacementPolicy};
use cg_scopes::{Anchor, ConstructKind, Registration, RegistrationConfig, RegistrationError};
use integration_tests::Unit;

#[test]
fn test_record_end_to_end() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let record = unit.declare("R", DeclKind::Record);
    let scope = unit.scopes.enter_declaration(&unit.graph, record).unwrap();

    let c1 = unit.register("R", DeclKind::Constructor);
    let m1 = unit.register("run", DeclKind::Method);
    let f1 = unit.register("x", DeclKind::Field);
    let m2 = unit.register("run", DeclKind::Method);

    let container = unit.graph.container_of(record).unwrap();
    assert_eq!(unit.graph.entries(container, Collection::RecordConstructors), &[c1]);
    assert_eq!(unit.graph.entries(container, Collection::RecordMethods), &[m2]);
    assert_eq!(unit.graph.entries(container, Collection::RecordFields), &[f1]);
    assert!(!unit.graph.entries(container, Collection::RecordMethods).contains(&m1));
    assert_eq!(
        unit.scopes.tree().get(scope).value_declarations(),
        &[c1, m1, f1, m2]
    );
    assert!(unit.scopes.diagnostics().is_empty());
}

#[test]
fn test_flat_log_keeps_call_order_across_no_ops() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let namespace = unit.declare("pkg", DeclKind::Namespace);
    let scope = unit.scopes.enter_declaration(&unit.graph, namespace).unwrap();

    let names = ["a", "b", "c", "d", "e"];
    let kinds = [
        DeclKind::Field,
        DeclKind::Parameter,
        DeclKind::Function,
        DeclKind::Variable,
        DeclKind::Parameter,
    ];
    let decls: Vec<_> = names
        .iter()
        .zip(kinds)
        .map(|(name, kind)| unit.register(name, kind))
        .collect();

    assert_eq!(unit.scopes.tree().get(scope).value_declarations(), decls.as_slice());
    assert_eq!(unit.names(namespace, Collection::NamespaceFields), ["a"]);
    assert_eq!(unit.names(namespace, Collection::NamespaceFunctions), ["c"]);
}

#[test]
fn test_global_scope_only_logs() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let global = unit.scopes.current();

    let main = unit.declare("main", DeclKind::Function);
    let value = unit.graph.value_decl(main).unwrap();
    let outcome = unit.scopes.add_value_declaration(&mut unit.graph, value);

    assert_eq!(outcome, Registration::Unanchored);
    assert_eq!(unit.scopes.tree().get(global).value_declarations(), &[main]);
    let main_container = unit.graph.container_of(main).unwrap();
    assert!(unit
        .graph
        .entries(main_container, Collection::FunctionParameters)
        .is_empty());
}

#[test]
fn test_nested_functions_and_blocks() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let namespace = unit.declare("app", DeclKind::Namespace);
    unit.scopes.enter_declaration(&unit.graph, namespace).unwrap();

    let handler = unit.register("handle", DeclKind::Function);
    unit.scopes.enter_declaration(&unit.graph, handler).unwrap();
    unit.register("req", DeclKind::Parameter);
    unit.register("res", DeclKind::Parameter);

    let loop_scope = unit
        .scopes
        .enter_scope(&unit.graph, Some(Anchor::Construct(ConstructKind::ForEach)))
        .unwrap();
    let item = unit.register("item", DeclKind::Variable);
    // A parameter-kind declaration under a loop anchor is logged only.
    unit.register("shadow", DeclKind::Parameter);
    unit.scopes.leave_scope();
    unit.scopes.leave_scope();

    unit.register("helper", DeclKind::Function);

    assert_eq!(unit.names(handler, Collection::FunctionParameters), ["req", "res"]);
    assert_eq!(unit.names(namespace, Collection::NamespaceFunctions), ["handle", "helper"]);
    assert_eq!(unit.scopes.tree().get(loop_scope).value_declarations()[0], item);
    assert_eq!(unit.scopes.tree().get(loop_scope).value_declarations().len(), 2);
}

#[test]
fn test_package_level_methods_are_logged_not_published() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let namespace = unit.declare("shapes", DeclKind::Namespace);
    let scope = unit.scopes.enter_declaration(&unit.graph, namespace).unwrap();

    let area = unit.register("Area", DeclKind::Method);
    let build = unit.register("New", DeclKind::Constructor);
    let helper = unit.register("helper", DeclKind::Function);

    assert_eq!(unit.names(namespace, Collection::NamespaceFunctions), ["helper"]);
    assert!(unit.names(namespace, Collection::NamespaceFields).is_empty());
    assert_eq!(
        unit.scopes.tree().get(scope).value_declarations(),
        &[area, build, helper]
    );
    assert!(unit.scopes.diagnostics().is_empty());
}

#[test]
fn test_structural_declarations_are_reported_not_fatal() {
    let mut unit = Unit::new(RegistrationConfig::default());
    let namespace = unit.declare("pkg", DeclKind::Namespace);
    let scope = unit.scopes.enter_declaration(&unit.graph, namespace).unwrap();

    let nested = unit.declare("inner", DeclKind::Namespace);
    let include = unit.declare("fmt", DeclKind::Include);
    assert_eq!(unit.scopes.add_declaration(&mut unit.graph, nested), None);
    assert_eq!(unit.scopes.add_declaration(&mut unit.graph, include), None);
    let field = unit.register("version", DeclKind::Field);

    let diagnostics: Vec<_> = unit.scopes.diagnostics().iter().collect();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|diagnostic| diagnostic.scope == scope));
    assert!(matches!(
        diagnostics[1].error,
        RegistrationError::NotAValueDeclaration {
            kind: DeclKind::Include,
            location: Some(_),
            ..
        }
    ));
    assert_eq!(unit.scopes.tree().get(scope).value_declarations(), &[field]);
}

#[test]
fn test_keep_overloads_config() -> anyhow::Result<()> {
    let config = RegistrationConfig::from_toml_str(r#"replacement = "keep-overloads""#)?;
    assert_eq!(config.replacement, ReplacementPolicy::KeepOverloads);

    let mut unit = Unit::new(config);
    let record = unit.declare("Buffer", DeclKind::Record);
    unit.scopes.enter_declaration(&unit.graph, record)?;
    let first = unit.register("write", DeclKind::Method);
    let second = unit.declare("write", DeclKind::Method);
    let value = unit.graph.value_decl(second).unwrap();
    let outcome = unit.scopes.add_value_declaration(&mut unit.graph, value);

    let container = unit.graph.container_of(record).unwrap();
    assert_eq!(
        outcome,
        Registration::Published {
            container,
            collection: Collection::RecordMethods,
            insertion: Insertion::Appended,
        }
    );
    assert_eq!(
        unit.graph.entries(container, Collection::RecordMethods),
        &[first, second]
    );
    Ok(())
}

#[test]
fn test_units_share_interner_but_not_trees() {
    let mut first = Unit::new(RegistrationConfig::default());
    let mut second = Unit::with_interner(first.interner.clone(), RegistrationConfig::default());

    let in_first = first.register("shared", DeclKind::Function);
    let in_second = second.register("shared", DeclKind::Function);

    assert_eq!(first.graph.decl(in_first).name, second.graph.decl(in_second).name);
    assert_eq!(first.scopes.tree().len(), 1);
    assert_eq!(second.scopes.tree().len(), 1);
}
