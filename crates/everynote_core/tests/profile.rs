use everynote_core::db::open_db_in_memory;
use everynote_core::{
    MemoryProfileStore, ProfileError, ProfileInput, ProfileSession, ProfileStore,
    SqliteProfileStore,
};

fn sample_input() -> ProfileInput {
    ProfileInput {
        name: "Maya".to_string(),
        photo_url: "content://media/external/images/42".to_string(),
        email: "maya@example.com".to_string(),
        password: "hunter2-but-longer".to_string(),
    }
}

#[test]
fn save_and_reload_round_trips_the_profile() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProfileStore::try_new(&conn).unwrap();
    {
        let mut session = ProfileSession::load(&store).unwrap();
        session.save(sample_input()).unwrap();
        assert!(session.is_signed_in());
    }

    let reloaded = ProfileSession::load(&store).unwrap();
    assert_eq!(reloaded.profile().name, "Maya");
    assert_eq!(reloaded.profile().email, "maya@example.com");
    assert!(reloaded.verify_password("hunter2-but-longer"));
}

#[test]
fn password_is_stored_as_argon2_hash_never_plaintext() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();
    session.save(sample_input()).unwrap();

    let stored = store.load_profile().unwrap();
    assert!(stored.password_hash.starts_with("$argon2"));
    assert!(!stored.password_hash.contains("hunter2-but-longer"));
}

#[test]
fn verify_accepts_the_original_password_and_rejects_others() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();
    session.save(sample_input()).unwrap();

    assert!(session.verify_password("hunter2-but-longer"));
    assert!(!session.verify_password("hunter2"));
    assert!(!session.verify_password(""));
}

#[test]
fn verify_is_false_when_no_credentials_are_stored() {
    let store = MemoryProfileStore::new();
    let session = ProfileSession::load(&store).unwrap();

    assert!(!session.is_signed_in());
    assert!(!session.verify_password("anything"));
}

#[test]
fn logout_overwrites_every_field_with_empty_strings() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();
    session.save(sample_input()).unwrap();

    session.logout().unwrap();
    assert!(!session.is_signed_in());
    assert!(store.load_profile().unwrap().is_empty());
    assert!(!session.verify_password("hunter2-but-longer"));
}

#[test]
fn save_rejects_malformed_email() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();

    let mut input = sample_input();
    input.email = "not-an-address".to_string();
    let err = session.save(input).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidEmail(_)));
    assert!(!session.is_signed_in());
}

#[test]
fn empty_email_and_password_are_allowed() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();

    let input = ProfileInput {
        name: "Guest".to_string(),
        ..ProfileInput::default()
    };
    session.save(input).unwrap();

    assert!(session.is_signed_in());
    assert!(store.load_profile().unwrap().password_hash.is_empty());
}

#[test]
fn each_save_overwrites_the_previous_profile_wholesale() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();
    session.save(sample_input()).unwrap();

    let replacement = ProfileInput {
        name: "M".to_string(),
        ..ProfileInput::default()
    };
    session.save(replacement).unwrap();

    let stored = store.load_profile().unwrap();
    assert_eq!(stored.name, "M");
    assert!(stored.photo_url.is_empty());
    assert!(stored.email.is_empty());
    assert!(stored.password_hash.is_empty());
}

#[test]
fn revision_bumps_on_save_and_logout() {
    let store = MemoryProfileStore::new();
    let mut session = ProfileSession::load(&store).unwrap();
    assert_eq!(session.revision(), 0);

    session.save(sample_input()).unwrap();
    assert_eq!(session.revision(), 1);
    session.logout().unwrap();
    assert_eq!(session.revision(), 2);
}
