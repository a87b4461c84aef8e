//! End-to-end scenarios across storage and core.

use proptest::prelude::*;
use webstash_core::{
    generate_identifier, BackendKind, CoreError, FormBinding, KeyManager, MapForm, StashConfig,
    ValueCodec,
};
use webstash_testkit::prelude::*;

#[test]
fn local_storage_set_then_get() {
    let d = memory_dispatcher();
    d.set_item("localStorage", "user", "alice").unwrap();
    assert_eq!(
        d.get_item("localStorage", "user").unwrap().as_deref(),
        Some("alice")
    );
}

#[test]
fn encrypted_set_bootstraps_and_persists_key() {
    let fixture = TestStash::memory(StashConfig::new().encrypt(true));
    assert_eq!(
        fixture.dispatcher().get_item("localStorage", "key").unwrap(),
        None
    );

    fixture.set("user", "alice").unwrap();

    let key = fixture
        .dispatcher()
        .get_item("localStorage", "key")
        .unwrap()
        .expect("key persisted under reserved name");
    let stored = fixture
        .dispatcher()
        .get_item("localStorage", "user")
        .unwrap()
        .unwrap();
    assert_eq!(
        ValueCodec::default().decode(&stored, &key, true).unwrap(),
        "alice"
    );
    assert_eq!(fixture.get("user").unwrap().as_deref(), Some("alice"));
}

#[test]
fn bogus_backend_behaves_like_cookie() {
    let d = memory_dispatcher();
    d.set_item("bogus", "user", "alice").unwrap();

    assert_eq!(d.get_item("cookie", "user").unwrap().as_deref(), Some("alice"));
    assert_eq!(d.get_item("bogus", "user").unwrap().as_deref(), Some("alice"));
    assert_eq!(d.get_item("localStorage", "user").unwrap(), None);
}

#[test]
fn missing_cookie_collaborator_degrades_to_failure() {
    let d = dispatcher_without_cookies();
    assert!(!d.set_item_flag("cookie", "user", "alice"));
    assert_eq!(d.get_item_flag("cookie", "user"), None);
    assert!(d.get_item("bogus", "user").unwrap_err().is_unavailable());

    // The other backends are unaffected.
    d.set_item("sessionStorage", "user", "alice").unwrap();
    assert_eq!(
        d.get_item("sessionStorage", "user").unwrap().as_deref(),
        Some("alice")
    );
}

#[test]
fn ensure_key_twice_yields_same_key() {
    let d = memory_dispatcher();
    let keys = KeyManager::default();
    for backend in BackendKind::ALL {
        let first = keys.ensure_key(&d, backend.name()).unwrap();
        let second = keys.ensure_key(&d, backend.name()).unwrap();
        assert_eq!(first, second, "key regenerated on {backend}");
    }
}

#[test]
fn key_survives_reopen_of_file_store() {
    let config = StashConfig::new().encrypt(true);
    let fixture = TestStash::file(config.clone());
    fixture.set("token", "s3cr3t").unwrap();
    let key = fixture.resolved_key().unwrap();

    let reopened = fixture.reopen(config).unwrap();
    assert_eq!(reopened.resolved_key().unwrap(), key);
    assert_eq!(reopened.get("token").unwrap().as_deref(), Some("s3cr3t"));
}

#[test]
fn switching_backends_orphans_encrypted_values() {
    let fixture = TestStash::memory(StashConfig::new().encrypt(true));
    fixture.set("token", "s3cr3t").unwrap();
    let stored = fixture
        .dispatcher()
        .get_item("localStorage", "token")
        .unwrap()
        .unwrap();

    // Each backend bootstraps its own key.
    let session_key = KeyManager::default()
        .ensure_key(fixture.dispatcher(), "sessionStorage")
        .unwrap();
    assert!(matches!(
        ValueCodec::default().decode(&stored, &session_key, true),
        Err(CoreError::DecryptionFailed { .. })
    ));
}

#[test]
fn form_binding_through_file_store() {
    with_file_stash(StashConfig::new().form_element_id("profile"), |stash| {
        let binding = FormBinding::new(stash);
        let form = MapForm::default()
            .with_value("name", "Alice")
            .with_value("city", "Paris");
        assert_eq!(binding.save(&form).unwrap(), 2);

        let mut blank = MapForm::with_fields(["name", "city"]);
        binding.load(&mut blank).unwrap();
        assert_eq!(blank, form);
    });
}

#[test]
fn generated_identifier_layout() {
    let id = generate_identifier(None);
    let bytes = id.as_bytes();
    assert_eq!(id.len(), 36);
    for pos in [8, 13, 18, 23] {
        assert_eq!(bytes[pos], b'-');
    }
    assert_eq!(bytes[14], b'4');
    assert!(matches!(bytes[19], b'8' | b'9' | b'a' | b'b'));
}

proptest! {
    #[test]
    fn unknown_backends_match_explicit_fallback(
        bogus in bogus_backend_name_strategy(),
        key in storage_key_strategy(),
        value in value_strategy(),
    ) {
        let via_bogus = memory_dispatcher();
        let via_cookie = memory_dispatcher();

        via_bogus.set_item(&bogus, &key, &value).unwrap();
        via_cookie.set_item("cookie", &key, &value).unwrap();

        prop_assert_eq!(
            via_bogus.get_item("cookie", &key).unwrap(),
            via_cookie.get_item(&bogus, &key).unwrap()
        );
    }

    #[test]
    fn encrypted_stash_roundtrips(
        backend in backend_name_strategy(),
        key in storage_key_strategy(),
        value in value_strategy(),
    ) {
        let stash = Stash::in_memory(StashConfig::new().backend_name(backend).encrypt(true));
        stash.set(&key, &value).unwrap();
        prop_assert_eq!(stash.get(&key).unwrap(), Some(value));
    }
}
