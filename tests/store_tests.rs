//! Configuration and persistence tests.
//!
//! A match is configured from a `ConfigStore`, played, and recorded into
//! a `GameDb` that survives a save and load.

use serde_json::json;

use mystery_guess::store::DEBUG_USER;
use mystery_guess::{
    ConfigError, ConfigStore, GameConfig, GameDb, GameError, MatchBuilder, MatchId, PlayerId,
};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("mystery-guess-{}-{}.bin", name, std::process::id()))
}

/// Test that the default bags produce the default match configuration.
#[test]
fn test_default_store_config() {
    let store = ConfigStore::with_defaults();
    let config = GameConfig::from_store(&store).unwrap();

    assert_eq!(config.level, 5);
    assert_eq!(config.level_base, 5);
    assert!(config.is_debug);
    assert_eq!(config.max_rounds, None);
}

/// Test that store overrides flow into the engine.
#[test]
fn test_store_overrides_reach_engine() {
    let mut store = ConfigStore::with_defaults();
    store.set("GameConfig", "Level", 2).unwrap();
    store.set("GameConfig", "Seed", 1234).unwrap();
    store.set("GameConfig", "MaxRounds", 50).unwrap();

    let config = GameConfig::from_store(&store).unwrap();
    assert_eq!(config.seed, 1234);

    let engine = MatchBuilder::new(config).quiet().bots(1).build().unwrap();
    assert_eq!(engine.level().id(), 2);
    assert_eq!(engine.level().upper(), 128);
    assert_eq!(engine.config().max_rounds, Some(50));
}

/// Test that a bad level in the store is reported rather than clamped.
#[test]
fn test_store_bad_values() {
    let mut store = ConfigStore::with_defaults();
    store.set("GameConfig", "Level", 300).unwrap();
    assert!(matches!(GameConfig::from_store(&store), Err(GameError::InvalidArgument(_))));

    store.set("GameConfig", "Level", "five").unwrap();
    assert!(matches!(
        GameConfig::from_store(&store),
        Err(GameError::Config(ConfigError::WrongType { .. }))
    ));
}

/// Test lookups through linked bags and the url form.
#[test]
fn test_linked_lookup() {
    let mut store = ConfigStore::with_defaults();
    store.set("SQLConfig", "Host", json!("localhost")).unwrap();

    assert_eq!(store.get_str("GameConfig/SQLConfig/Host").unwrap(), "localhost");
    assert_eq!(store.resolve("config://GameConfig/Level").unwrap(), json!(5));
    assert!(matches!(store.resolve("http://GameConfig/Level"), Err(ConfigError::BadScheme(_))));
}

/// Test that rollback restores the last committed bags.
#[test]
fn test_commit_and_rollback() {
    let mut store = ConfigStore::with_defaults();
    store.commit();
    store.set("GameConfig", "Level", 9).unwrap();
    assert_eq!(store.get_u64("GameConfig/Level").unwrap(), 9);

    assert!(store.rollback());
    assert_eq!(store.get_u64("GameConfig/Level").unwrap(), 5);
}

/// Test recording a finished two-seat match.
#[test]
fn test_record_match() {
    let config = GameConfig::default().with_level(0).with_seed(5);
    let mut engine = MatchBuilder::new(config).quiet().bots(2).build().unwrap();
    let summary = engine.start().unwrap();

    let mut db = GameDb::new();
    let a = db.add_user("Ann");
    let b = db.add_user("Bob");
    db.record_match(MatchId(1), a, b, &summary).unwrap();

    let record = db.get_history(MatchId(1)).unwrap();
    assert_eq!(record.mystery, summary.mystery);
    let expected = if summary.is_winner(PlayerId::new(0)) { 0 } else { 1 };
    assert_eq!(record.winner, expected);

    assert!(matches!(
        db.record_match(MatchId(1), a, b, &summary),
        Err(GameError::DuplicateHistory(MatchId(1)))
    ));
}

/// Test that a non-debug store is loaded back from its snapshot.
#[test]
fn test_save_and_open() {
    let path = temp_path("save");
    let mut db = GameDb::new();
    let ann = db.add_user("Ann");
    db.add_history(MatchId(3), ann, ann, -1, 17).unwrap();
    db.save(&path).unwrap();

    let persistent = GameConfig::default().with_debug(false);
    let loaded = GameDb::open(&persistent, &path).unwrap();
    assert_eq!(loaded.get_user(ann).unwrap().name, "Ann");
    assert_eq!(loaded.get_history(MatchId(3)).unwrap().mystery, 17);

    let debug = GameDb::open(&GameConfig::default(), &path).unwrap();
    assert_eq!(debug.user_ids().len(), 1);
    assert_eq!(debug.get_user(debug.user_ids()[0]).unwrap().name, DEBUG_USER);

    std::fs::remove_file(&path).unwrap();
}

/// Test that a missing snapshot opens a fresh store.
#[test]
fn test_open_missing_snapshot() {
    let path = temp_path("missing");
    let db = GameDb::open(&GameConfig::default().with_debug(false), &path).unwrap();
    assert_eq!(db.user_ids().len(), 1);
}
