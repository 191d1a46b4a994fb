use mill_plugin_metrics::{
    CapabilityKind, FeatureRegistrationTracker, LanguageFeatureRegistry, RegistrationError,
};
use mill_test_support::{
    expected_call, invoke_registration, mock_registry, plugin, rust_selector, RecordingRegistry,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::sync::Arc;

#[test]
fn test_acme_completion_hover_overwrite_scenario() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let acme = plugin("acme.lang");

    invoke_registration(&tracker, CapabilityKind::Completion, 7, &acme).unwrap();
    assert_eq!(
        tracker.snapshot().handle("acme.lang", CapabilityKind::Completion),
        Some(7)
    );

    invoke_registration(&tracker, CapabilityKind::Hover, 9, &acme).unwrap();
    assert_eq!(
        tracker.snapshot().get("acme.lang").cloned(),
        Some(BTreeMap::from([
            (CapabilityKind::Completion, 7),
            (CapabilityKind::Hover, 9),
        ]))
    );

    invoke_registration(&tracker, CapabilityKind::Completion, 42, &acme).unwrap();
    assert_eq!(
        tracker.snapshot().get("acme.lang").cloned(),
        Some(BTreeMap::from([
            (CapabilityKind::Completion, 42),
            (CapabilityKind::Hover, 9),
        ]))
    );
}

#[test]
fn test_two_plugins_register_definition_independently() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());

    invoke_registration(&tracker, CapabilityKind::Definition, 1, &plugin("a")).unwrap();
    invoke_registration(&tracker, CapabilityKind::Definition, 2, &plugin("b")).unwrap();

    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.plugin_count(), 2);
    assert_eq!(
        snapshot.get("a").cloned(),
        Some(BTreeMap::from([(CapabilityKind::Definition, 1)]))
    );
    assert_eq!(
        snapshot.get("b").cloned(),
        Some(BTreeMap::from([(CapabilityKind::Definition, 2)]))
    );
}

#[test]
fn test_workspace_symbol_without_selector_is_recorded() {
    let registry = Arc::new(RecordingRegistry::new());
    let tracker = FeatureRegistrationTracker::from_shared(Arc::clone(&registry));

    tracker
        .register_workspace_symbol_provider(3, &plugin("x"))
        .unwrap();

    assert_eq!(
        tracker.snapshot().handle("x", CapabilityKind::WorkspaceSymbol),
        Some(3)
    );
    let calls = registry.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].selector, None);
}

#[test]
fn test_every_entry_point_records_and_forwards_verbatim() {
    let registry = Arc::new(RecordingRegistry::new());
    let tracker = FeatureRegistrationTracker::from_shared(Arc::clone(&registry));
    let owner = plugin("all.features");

    let mut expected = Vec::new();
    for (offset, kind) in CapabilityKind::ALL.into_iter().enumerate() {
        let handle = 100 + offset as u64;
        invoke_registration(&tracker, kind, handle, &owner).unwrap();

        // Recorded synchronously, before the next call
        assert_eq!(tracker.snapshot().handle("all.features", kind), Some(handle));
        expected.push(expected_call(kind, handle, &owner));
    }

    assert_eq!(registry.calls(), expected);
    assert_eq!(tracker.snapshot().registration_count(), 20);
}

#[test]
fn test_recording_isolates_other_kinds_and_plugins() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let a = plugin("a");
    let b = plugin("b");

    for (offset, kind) in CapabilityKind::ALL.into_iter().enumerate() {
        invoke_registration(&tracker, kind, offset as u64, &a).unwrap();
        invoke_registration(&tracker, kind, 1_000 + offset as u64, &b).unwrap();
    }
    let before = tracker.snapshot();

    invoke_registration(&tracker, CapabilityKind::Rename, 5_000, &a).unwrap();
    let after = tracker.snapshot();

    assert_eq!(after.get("b"), before.get("b"));
    for kind in CapabilityKind::ALL {
        let expected = if kind == CapabilityKind::Rename {
            Some(5_000)
        } else {
            before.handle("a", kind)
        };
        assert_eq!(after.handle("a", kind), expected, "kind {}", kind);
    }
}

#[test]
fn test_delegate_error_propagates_and_record_remains() {
    let registry = Arc::new(RecordingRegistry::new());
    let rejection = RegistrationError::rejected(CapabilityKind::QuickFix, "no code actions");
    registry.fail_with(13, rejection.clone());
    let tracker = FeatureRegistrationTracker::from_shared(Arc::clone(&registry));

    for kind in CapabilityKind::ALL {
        let result = invoke_registration(&tracker, kind, 13, &plugin("flaky"));
        assert_eq!(result, Err(rejection.clone()), "kind {}", kind);
    }

    let snapshot = tracker.snapshot();
    for kind in CapabilityKind::ALL {
        assert_eq!(snapshot.handle("flaky", kind), Some(13));
    }
    assert_eq!(registry.calls().len(), 20);
}

#[test]
fn test_snapshot_twice_without_records_is_equal() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    invoke_registration(&tracker, CapabilityKind::Outline, 4, &plugin("p")).unwrap();

    assert_eq!(tracker.snapshot(), tracker.snapshot());
}

#[test]
fn test_mock_receives_exact_arguments_once() {
    let mut mock = mock_registry();
    let expected_selector = rust_selector();
    mock.expect_register_rename_provider()
        .withf(move |handle, plugin, selector, supports_resolve_location| {
            *handle == 21
                && plugin.id.as_str() == "acme.lang"
                && selector == expected_selector.as_slice()
                && *supports_resolve_location
        })
        .times(1)
        .returning(|_, _, _, _| Err(RegistrationError::DuplicateHandle(21)));

    let tracker = FeatureRegistrationTracker::new(mock);
    let result = invoke_registration(&tracker, CapabilityKind::Rename, 21, &plugin("acme.lang"));

    assert_eq!(result, Err(RegistrationError::DuplicateHandle(21)));
    assert_eq!(
        tracker.snapshot().handle("acme.lang", CapabilityKind::Rename),
        Some(21)
    );
}

#[test]
fn test_mock_workspace_symbol_forwarded_once() {
    let mut mock = mock_registry();
    mock.expect_register_workspace_symbol_provider()
        .withf(|handle, plugin| *handle == 3 && plugin.id.as_str() == "x")
        .times(1)
        .returning(|_, _| Ok(()));

    let tracker = FeatureRegistrationTracker::new(mock);
    assert!(tracker
        .register_workspace_symbol_provider(3, &plugin("x"))
        .is_ok());
}
