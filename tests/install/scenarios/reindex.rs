//! Reindex decision scenarios
//!
//! - A definition changed by the package is flagged for reindexing
//! - A definition rewritten unchanged keeps its recorded properties
//! - Deep changes and child deletions count as changes

use reindex_hook::hook::{HookState, ReindexInstallHook};
use reindex_hook::store::{MemorySession, PropertyStore, PropertyValue};

use crate::install::fixtures::*;
use crate::install::harness::*;

/// Session holding `/oak:index/jcrMimeType` with `reindex=false, reindexCount=1`
fn installed_property_index() -> MemorySession {
    let mut session = MemorySession::new();
    install_with_hook(
        &mut session,
        &property_index_v1(),
        &mut ReindexInstallHook::default(),
        None,
    )
    .unwrap();
    run_reindexer(&mut session, &[MIME_TYPE_INDEX]);
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), Some(1)));
    session
}

fn installed_lucene_index(package: &Package) -> MemorySession {
    let mut session = MemorySession::new();
    install_with_hook(&mut session, package, &mut ReindexInstallHook::default(), None).unwrap();
    run_reindexer(&mut session, &[NT_FILE_INDEX]);
    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(false), Some(1)));
    session
}

#[test]
fn test_changed_definition_is_flagged() {
    let mut session = installed_property_index();
    let mut hook = ReindexInstallHook::default();

    install_with_hook(&mut session, &property_index_v2(), &mut hook, None).unwrap();

    assert_eq!(hook.state(), HookState::Restored);
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(true), Some(1)));
    assert!(hook.last_report().unwrap().is_marked(MIME_TYPE_INDEX));

    run_reindexer(&mut session, &[MIME_TYPE_INDEX]);
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), Some(2)));
}

#[test]
fn test_unchanged_definition_is_not_flagged() {
    let mut session = installed_property_index();
    let mut hook = ReindexInstallHook::default();

    install_with_hook(&mut session, &property_index_v1(), &mut hook, None).unwrap();

    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), Some(1)));
    let report = hook.last_report().unwrap();
    assert!(report.marked.is_empty());
    assert_eq!(report.restored.len(), 1);

    run_reindexer(&mut session, &[MIME_TYPE_INDEX]);
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), Some(1)));
}

#[test]
fn test_update_event_below_definition() {
    // The exact sequence: strip, one update below the root, restore
    let mut session = installed_property_index();
    let mut hook = ReindexInstallHook::default();
    let package = property_index_v1().node(
        &format!("{}/someChild", MIME_TYPE_INDEX),
        &[("flag", PropertyValue::Boolean(true))],
    );
    session.add_node(&format!("{}/someChild", MIME_TYPE_INDEX));
    session.commit().unwrap();

    install_with_hook(&mut session, &package, &mut hook, None).unwrap();

    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(true), Some(1)));
}

#[test]
fn test_deep_definition_change_is_flagged() {
    let mut session = installed_lucene_index(&lucene_index_v1());

    install_with_hook(&mut session, &lucene_index_v2(), &mut ReindexInstallHook::default(), None)
        .unwrap();
    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(true), Some(1)));

    run_reindexer(&mut session, &[NT_FILE_INDEX]);
    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(false), Some(2)));
}

#[test]
fn test_deleted_definition_child_is_flagged() {
    let mut session = installed_lucene_index(&lucene_index_v2());

    install_with_hook(&mut session, &lucene_index_v1(), &mut ReindexInstallHook::default(), None)
        .unwrap();

    assert!(!session
        .node_exists(&format!("{}/aggregates", NT_FILE_INDEX))
        .unwrap());
    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(true), Some(1)));
}

#[test]
fn test_unchanged_deep_definition_is_not_flagged() {
    let mut session = installed_lucene_index(&lucene_index_v1());

    install_with_hook(&mut session, &lucene_index_v1(), &mut ReindexInstallHook::default(), None)
        .unwrap();

    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(false), Some(1)));
}

#[test]
fn test_only_changed_definition_is_flagged() {
    let mut session = MemorySession::new();
    let both_v1 = Package {
        nodes: property_index_v1()
            .nodes
            .into_iter()
            .chain(lucene_index_v1().nodes)
            .collect(),
        ..property_index_v1()
    };
    install_with_hook(&mut session, &both_v1, &mut ReindexInstallHook::default(), None).unwrap();
    run_reindexer(&mut session, &[MIME_TYPE_INDEX, NT_FILE_INDEX]);

    let mixed = Package {
        nodes: property_index_v2()
            .nodes
            .into_iter()
            .chain(lucene_index_v1().nodes)
            .collect(),
        ..property_index_v1()
    };
    install_with_hook(&mut session, &mixed, &mut ReindexInstallHook::default(), None).unwrap();

    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(true), Some(1)));
    assert_eq!(maintenance_state(&session, NT_FILE_INDEX), (Some(false), Some(1)));
}

#[test]
fn test_repeated_noop_installs_are_idempotent() {
    let mut session = installed_property_index();

    install_with_hook(&mut session, &property_index_v1(), &mut ReindexInstallHook::default(), None)
        .unwrap();
    let first = maintenance_state(&session, MIME_TYPE_INDEX);

    install_with_hook(&mut session, &property_index_v1(), &mut ReindexInstallHook::default(), None)
        .unwrap();
    let second = maintenance_state(&session, MIME_TYPE_INDEX);

    assert_eq!(first, second);
    assert_eq!(first, (Some(false), Some(1)));
}

#[test]
fn test_definition_without_maintenance_properties() {
    let mut session = MemorySession::new();
    session.add_node("/oak:index");
    session.add_node(MIME_TYPE_INDEX);
    for (name, value) in &property_index_v1().nodes[MIME_TYPE_INDEX] {
        session.set_property(MIME_TYPE_INDEX, name, value.clone()).unwrap();
    }
    session.commit().unwrap();

    let mut hook = ReindexInstallHook::default();
    install_with_hook(&mut session, &property_index_v1(), &mut hook, None).unwrap();

    // Flag written as false, no counter invented
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), None));
}

#[test]
fn test_definition_deleted_by_package_is_skipped() {
    let mut session = installed_property_index();
    let empty = Package::new("/oak:index").node("/oak:index", &[]);
    let mut hook = ReindexInstallHook::default();

    install_with_hook(&mut session, &empty, &mut hook, None).unwrap();

    assert!(!session.node_exists(MIME_TYPE_INDEX).unwrap());
    let report = hook.last_report().unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].root.as_str(), MIME_TYPE_INDEX);
}

#[test]
fn test_prepare_failure_leaves_session_untouched() {
    let mut session = installed_property_index();
    session.inject_access_failure(MIME_TYPE_INDEX);
    let mut hook = ReindexInstallHook::default();

    let err = install_with_hook(&mut session, &property_index_v2(), &mut hook, None).unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(hook.state(), HookState::Aborted);
    assert!(!session.has_pending_changes());
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(false), Some(1)));
}

#[test]
fn test_failed_commit_keeps_content_uncommitted() {
    let mut session = installed_property_index();
    session.set_commit_failure(true);
    let mut hook = ReindexInstallHook::default();

    let err = install_with_hook(&mut session, &property_index_v2(), &mut hook, None).unwrap_err();

    assert!(!err.is_fatal());
    assert_eq!(hook.state(), HookState::Restored);
    // The pending restore is still in the session for the host to retry
    assert_eq!(
        session.get_property(MIME_TYPE_INDEX, "reindex").unwrap(),
        Some(PropertyValue::Boolean(true))
    );
}
