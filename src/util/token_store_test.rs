use super::*;
use crate::util::storage::MemoryStorage;
use time::macros::datetime;

fn store() -> (TokenStore, MemoryStorage, MemoryStorage) {
    let durable = MemoryStorage::new();
    let session = MemoryStorage::new();
    let store = TokenStore::new(vec![
        (TierKind::Durable, Arc::new(durable.clone())),
        (TierKind::Session, Arc::new(session.clone())),
    ]);
    (store, durable, session)
}

const NOW: OffsetDateTime = datetime!(2026-03-01 12:00 UTC);

// =============================================================
// Durable tier
// =============================================================

#[test]
fn remembered_token_loads_back() {
    let (store, durable, session) = store();
    store.save("tok-1", true, NOW);
    assert_eq!(store.load(NOW), Some("tok-1".to_owned()));
    assert_eq!(durable.len(), 2);
    assert!(session.is_empty());
}

#[test]
fn remembered_token_expires_after_thirty_days() {
    let (store, durable, _) = store();
    store.save("tok-1", true, NOW);
    assert_eq!(store.load(NOW + Duration::days(30)), Some("tok-1".to_owned()));
    assert_eq!(store.load(NOW + Duration::days(30) + Duration::seconds(1)), None);
    assert!(durable.is_empty());
}

#[test]
fn durable_record_uses_json_token_and_rfc3339_expiry() {
    let (store, durable, _) = store();
    store.save("tok-1", true, NOW);
    assert_eq!(durable.get(TOKEN_KEY).as_deref(), Some("\"tok-1\""));
    let record = store.record(TierKind::Durable).unwrap();
    assert_eq!(record.expires_at, Some(NOW + DURABLE_TTL));
}

// =============================================================
// Session tier
// =============================================================

#[test]
fn session_token_expires_after_thirty_minutes() {
    let (store, durable, session) = store();
    store.save("tok-2", false, NOW);
    assert!(durable.is_empty());
    assert_eq!(store.load(NOW + Duration::minutes(29)), Some("tok-2".to_owned()));
    assert_eq!(store.load(NOW + Duration::minutes(31)), None);
    assert!(session.is_empty());
}

#[test]
fn save_does_not_touch_other_tier() {
    let (store, durable, _) = store();
    store.save("long", true, NOW);
    store.save("short", false, NOW);
    assert_eq!(durable.get(TOKEN_KEY).as_deref(), Some("\"long\""));
    assert_eq!(store.record(TierKind::Session).unwrap().token, "short");
}

// =============================================================
// Precedence
// =============================================================

#[test]
fn durable_tier_wins_when_both_valid() {
    let (store, _, _) = store();
    store.save("short", false, NOW);
    store.save("long", true, NOW);
    assert_eq!(store.load(NOW), Some("long".to_owned()));
}

#[test]
fn expired_durable_falls_through_to_session() {
    let (store, durable, _) = store();
    store.save("long", true, NOW - Duration::days(31));
    store.save("short", false, NOW);
    assert_eq!(store.load(NOW), Some("short".to_owned()));
    assert!(durable.is_empty());
}

#[test]
fn token_without_expiration_is_accepted() {
    let (store, durable, _) = store();
    durable.set(TOKEN_KEY, "\"legacy\"");
    assert_eq!(store.load(NOW), Some("legacy".to_owned()));
}

// =============================================================
// Malformed data
// =============================================================

#[test]
fn malformed_token_is_purged() {
    let (store, durable, _) = store();
    durable.set(TOKEN_KEY, "not-json");
    durable.set(EXPIRATION_KEY, "2099-01-01T00:00:00Z");
    assert_eq!(store.load(NOW), None);
    assert!(durable.is_empty());
}

#[test]
fn malformed_expiration_is_purged() {
    let (store, _, session) = store();
    session.set(TOKEN_KEY, "\"tok\"");
    session.set(EXPIRATION_KEY, "tomorrow");
    assert_eq!(store.load(NOW), None);
    assert!(session.is_empty());
}

#[test]
fn millisecond_iso_timestamps_parse() {
    let (store, durable, _) = store();
    durable.set(TOKEN_KEY, "\"tok\"");
    durable.set(EXPIRATION_KEY, "2026-03-02T08:30:00.000Z");
    assert_eq!(store.load(NOW), Some("tok".to_owned()));
}

// =============================================================
// Clear
// =============================================================

#[test]
fn clear_empties_both_tiers() {
    let (store, durable, session) = store();
    store.save("a", true, NOW);
    store.save("b", false, NOW);
    store.clear();
    assert!(durable.is_empty());
    assert!(session.is_empty());
    assert_eq!(store.load(NOW), None);
}

#[test]
fn missing_tier_is_ignored_on_save() {
    let durable = MemoryStorage::new();
    let store = TokenStore::new(vec![(TierKind::Durable, Arc::new(durable.clone()))]);
    store.save("tok", false, NOW);
    assert!(durable.is_empty());
    assert_eq!(store.load(NOW), None);
}
