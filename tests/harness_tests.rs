//! Team building flows using EffectStoreTestHarness
//!
//! Team mutations must emit a persistence effect; the second half replays
//! those effects against a file-backed store and restores a fresh session.

use std::collections::BTreeMap;

use pokedex_team::{
    action::Action,
    effect::Effect,
    reducer::reducer,
    state::{AppState, Record, Stats},
    storage::{FileStore, TeamStorage},
    team::MAX_TEAM_SIZE,
};
use pretty_assertions::assert_eq;
use tui_dispatch::EffectStore;
use tui_dispatch::testing::*;

fn record(id: u32, name: &str, types: &[&str]) -> Record {
    Record {
        id,
        name: name.to_string(),
        image: format!("https://img.example/{id}.png"),
        types: types.iter().map(|name| name.to_string()).collect(),
        abilities: Vec::new(),
        stats: Stats::default(),
        weight: 1.0,
        height: 1.0,
        cry: None,
        evolution_from: None,
        moves: Vec::new(),
    }
}

fn roster() -> Vec<Record> {
    vec![
        record(1, "bulbasaur", &["grass", "poison"]),
        record(4, "charmander", &["fire"]),
        record(7, "squirtle", &["water"]),
        record(25, "pikachu", &["electric"]),
        record(39, "jigglypuff", &["normal", "fairy"]),
        record(52, "meowth", &["normal"]),
        record(54, "psyduck", &["water"]),
    ]
}

fn state_with_roster() -> AppState {
    let mut state = AppState::default();
    state.pokedex.merge(roster());
    state.rebuild_projection();
    state.sync_detail();
    state
}

/// Applies persistence effects the way the runtime does.
fn persist(storage: &mut TeamStorage<FileStore>, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::PersistTeam { members } => storage.save_current(&members).unwrap(),
            Effect::PersistSnapshots { snapshots } => storage.save_snapshots(&snapshots).unwrap(),
            _ => {}
        }
    }
}

// ============================================================================
// EffectStoreTestHarness Tests
// ============================================================================

#[test]
fn test_team_add_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(), reducer);

    harness.dispatch_collect(Action::TeamAdd);
    harness.assert_state(|s| s.team.len() == 1 && s.team.contains(1));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::PersistTeam { members } if members.len() == 1),
    );

    // same record again
    harness.dispatch_collect(Action::TeamAdd);
    harness.assert_state(|s| s.team.len() == 1);
    harness.assert_state(|s| {
        s.message.as_deref() == Some("Team full or already contains bulbasaur")
    });
    harness.drain_effects().effects_count(0);
}

#[test]
fn test_team_caps_at_six() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(), reducer);

    for index in 0..roster().len() {
        harness.complete_action(Action::DexSelect(index));
        harness.complete_action(Action::TeamAdd);
    }
    harness.process_emitted();

    harness.assert_state(|s| s.team.len() == MAX_TEAM_SIZE);
    harness.assert_state(|s| !s.team.contains(54));
}

#[test]
fn test_snapshot_save_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(), reducer);
    harness.dispatch_collect(Action::TeamAdd);
    harness.drain_effects();

    harness.dispatch_collect(Action::SavePromptStart);
    for ch in "  starters ".chars() {
        harness.dispatch_collect(Action::SavePromptInput(ch));
    }
    harness.dispatch_collect(Action::SavePromptSubmit);

    harness.assert_state(|s| !s.prompt.active);
    harness.assert_state(|s| s.team.names() == vec!["starters".to_string()]);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::PersistSnapshots { .. }));
}

#[test]
fn test_removing_members_updates_weaknesses() {
    let mut harness = EffectStoreTestHarness::new(state_with_roster(), reducer);
    let results = harness.dispatch_all([
        Action::DexSelect(1),
        Action::TeamAdd,
        Action::DexSelect(2),
        Action::TeamAdd,
    ]);
    assert_eq!(results, vec![true, true, true, true]);
    harness.assert_state(|s| s.team.types() == vec!["fire".to_string(), "water".to_string()]);

    harness.dispatch_collect(Action::TeamRemove(4));
    harness.assert_state(|s| s.team.types() == vec!["water".to_string()]);
    harness.assert_state(|s| {
        let names: Vec<String> = s
            .team
            .weaknesses()
            .into_iter()
            .map(|weakness| weakness.type_name)
            .collect();
        names == vec!["electric".to_string(), "grass".to_string()]
    });
}

// ============================================================================
// Persistence round trip
// ============================================================================

#[test]
fn test_team_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = TeamStorage::new(FileStore::new(dir.path()));

    let mut store = EffectStore::new(state_with_roster(), reducer);
    let mut effects = Vec::new();
    effects.extend(store.dispatch(Action::TeamAdd).effects);
    effects.extend(store.dispatch(Action::DexSelect(3)).effects);
    effects.extend(store.dispatch(Action::TeamAdd).effects);
    effects.extend(store.dispatch(Action::SavePromptStart).effects);
    for ch in "duo".chars() {
        effects.extend(store.dispatch(Action::SavePromptInput(ch)).effects);
    }
    effects.extend(store.dispatch(Action::SavePromptSubmit).effects);
    effects.extend(store.dispatch(Action::TeamClear).effects);
    persist(&mut storage, effects);

    let restored = TeamStorage::new(FileStore::new(dir.path())).restore();
    assert!(restored.is_empty());
    let saved_ids: Vec<u32> = restored.saved["duo"].iter().map(|m| m.id).collect();
    assert_eq!(saved_ids, vec![1, 25]);

    let mut session = AppState::default();
    session.team = restored;
    let mut store = EffectStore::new(session, reducer);
    let result = store.dispatch(Action::SnapshotLoad);
    assert!(result.changed);
    let loaded: Vec<u32> = store.state().team.current.iter().map(|m| m.id).collect();
    assert_eq!(loaded, vec![1, 25]);
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::PersistTeam { members }] if members.len() == 2
    ));
}

#[test]
fn test_snapshot_keeps_members_as_added() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = TeamStorage::new(FileStore::new(dir.path()));

    let mut store = EffectStore::new(state_with_roster(), reducer);
    let effects = store.dispatch(Action::TeamAdd).effects;
    persist(&mut storage, effects);

    let current = storage.load_current().unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].name, "bulbasaur");
    assert_eq!(current[0].types, vec!["grass".to_string(), "poison".to_string()]);
    assert_eq!(storage.load_snapshots().unwrap(), BTreeMap::new());
}

#[test]
fn test_corrupt_saved_teams_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("team.saved.json"), "{ not json").unwrap();
    std::fs::write(dir.path().join("team.current.json"), "[]").unwrap();

    let restored = TeamStorage::new(FileStore::new(dir.path())).restore();
    assert!(restored.is_empty());
    assert!(restored.saved.is_empty());
}
