//! Listener composition scenarios
//!
//! The hook only adds its tracker to the installation's listener slot;
//! whatever the host registered keeps receiving every event.

use std::sync::Arc;

use reindex_hook::definition::PathClassifier;
use reindex_hook::hook::{HookState, ReindexInstallHook};
use reindex_hook::listener::{
    ActionCode, ChangeTracker, CompoundListener, ListenerError, ListenerResult, ListenerSlot, Mode,
    ProgressListener,
};
use reindex_hook::store::MemorySession;

use crate::install::fixtures::*;
use crate::install::harness::*;

/// Listener that rejects every event
struct Failing;

impl ProgressListener for Failing {
    fn on_message(&self, _mode: Mode, _action: &ActionCode, path: &str) -> ListenerResult<()> {
        Err(ListenerError::delivery(path, "rejected"))
    }

    fn on_error(&self, _mode: Mode, path: &str, _error: &ListenerError) -> ListenerResult<()> {
        Err(ListenerError::delivery(path, "rejected"))
    }
}

fn installed(package: &Package) -> MemorySession {
    let mut session = MemorySession::new();
    install_with_hook(&mut session, package, &mut ReindexInstallHook::default(), None).unwrap();
    run_reindexer(&mut session, &[MIME_TYPE_INDEX]);
    session
}

#[test]
fn test_host_listener_sees_every_event() {
    let mut session = installed(&property_index_v1());
    let host = Arc::new(RecordingListener::default());

    install_with_hook(
        &mut session,
        &property_index_v2(),
        &mut ReindexInstallHook::default(),
        Some(host.clone()),
    )
    .unwrap();

    assert_eq!(
        host.messages(),
        vec![
            (ActionCode::Unchanged, "/oak:index".to_string()),
            (ActionCode::Updated, MIME_TYPE_INDEX.to_string()),
        ]
    );
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(true), Some(1)));
}

#[test]
fn test_host_listener_does_not_see_stripping() {
    // Properties are removed before any installer event: the host only
    // ever hears about package content
    let mut session = installed(&property_index_v1());
    let host = Arc::new(RecordingListener::default());

    install_with_hook(
        &mut session,
        &property_index_v1(),
        &mut ReindexInstallHook::default(),
        Some(host.clone()),
    )
    .unwrap();

    assert!(host.paths_with(ActionCode::Updated).is_empty());
    assert_eq!(host.paths_with(ActionCode::Unchanged).len(), 2);
}

#[test]
fn test_prepare_keeps_host_listener_first() {
    let mut session = installed(&property_index_v1());
    let coverage = coverage_for(&session, &property_index_v1());
    let host: Arc<dyn ProgressListener> = Arc::new(RecordingListener::default());
    let mut slot = ListenerSlot::with_listener(host.clone());
    let mut hook = ReindexInstallHook::default();

    hook.prepare(&mut session, &coverage, &mut slot).unwrap();

    let compound = slot.listener().unwrap().as_compound().unwrap();
    assert_eq!(compound.len(), 2);
    assert!(Arc::ptr_eq(&compound.listeners()[0], &host));
    assert_eq!(hook.state(), HookState::Prepared);
}

#[test]
fn test_nested_composition_is_flat() {
    let a: Arc<dyn ProgressListener> = Arc::new(RecordingListener::default());
    let b: Arc<dyn ProgressListener> = Arc::new(RecordingListener::default());
    let c: Arc<dyn ProgressListener> = Arc::new(RecordingListener::default());

    let inner: Arc<dyn ProgressListener> = Arc::new(CompoundListener::create([a, b]));
    let outer = CompoundListener::create([inner, c]);

    assert_eq!(outer.len(), 3);
    assert!(outer.listeners().iter().all(|l| l.as_compound().is_none()));
}

#[test]
fn test_repeated_compose_stays_flat() {
    let mut slot = ListenerSlot::new();
    for _ in 0..4 {
        slot.compose(Arc::new(RecordingListener::default()));
    }

    assert_eq!(slot.leaf_count(), 4);
    let compound = slot.listener().unwrap().as_compound().unwrap();
    assert!(compound.listeners().iter().all(|l| l.as_compound().is_none()));
}

#[test]
fn test_failing_host_listener_does_not_hide_changes() {
    let mut session = installed(&property_index_v1());
    let mut hook = ReindexInstallHook::default();

    install_with_hook(
        &mut session,
        &property_index_v2(),
        &mut hook,
        Some(Arc::new(Failing)),
    )
    .unwrap();

    assert!(hook.last_report().unwrap().is_marked(MIME_TYPE_INDEX));
    assert_eq!(maintenance_state(&session, MIME_TYPE_INDEX), (Some(true), Some(1)));
}

#[test]
fn test_errors_reach_every_listener() {
    let first = Arc::new(RecordingListener::default());
    let second = Arc::new(RecordingListener::default());
    let mut slot = ListenerSlot::with_listener(first.clone());
    slot.compose(Arc::new(Failing));
    slot.compose(second.clone());

    let error = ListenerError::installer(MIME_TYPE_INDEX, "constraint violation");
    slot.deliver_error(Mode::Text, MIME_TYPE_INDEX, &error).unwrap();

    assert_eq!(*first.errors.lock().unwrap(), vec![MIME_TYPE_INDEX.to_string()]);
    assert_eq!(*second.errors.lock().unwrap(), vec![MIME_TYPE_INDEX.to_string()]);
}

#[test]
fn test_stripped_properties_would_otherwise_look_changed() {
    // Without the hook's strip, rewriting an identical definition over one
    // carrying maintenance properties is reported as an update
    let mut session = installed(&property_index_v1());
    let tracker = Arc::new(ChangeTracker::new(
        PathClassifier::default(),
        ["A", "U", "D"]
            .iter()
            .map(|c| c.parse::<ActionCode>().unwrap())
            .collect(),
    ));
    let slot = ListenerSlot::with_listener(tracker.clone());

    import_content(&mut session, &property_index_v1(), &slot);

    assert!(tracker.has_changed(MIME_TYPE_INDEX));
}
