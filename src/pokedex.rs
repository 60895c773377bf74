use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::Record;

/// Every record fetched during a session, deduplicated by id.
///
/// Insertion order is first-fetched order. Entries are never replaced or
/// removed, so indices handed out by [`Pokedex::position`] stay valid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct Pokedex {
    records: Vec<Record>,
    index: HashMap<u32, usize>,
}

impl Pokedex {
    /// Appends records whose id is not cached yet. Returns how many were added.
    pub fn merge<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let mut added = 0;
        for record in records {
            if self.index.contains_key(&record.id) {
                continue;
            }
            self.index.insert(record.id, self.records.len());
            self.records.push(record);
            added += 1;
        }
        added
    }

    pub fn get(&self, id: u32) -> Option<&Record> {
        self.index.get(&id).and_then(|idx| self.records.get(*idx))
    }

    pub fn get_index(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records naming `id` as their predecessor. Always derived from
    /// `evolution_from`, never stored.
    pub fn children_of(&self, id: u32) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |record| record.evolution_from == Some(id))
    }
}

impl From<Vec<Record>> for Pokedex {
    fn from(records: Vec<Record>) -> Self {
        let mut pokedex = Pokedex::default();
        pokedex.merge(records);
        pokedex
    }
}

impl From<Pokedex> for Vec<Record> {
    fn from(pokedex: Pokedex) -> Self {
        pokedex.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::{evolved, record};

    #[test]
    fn merge_keeps_first_seen_data() {
        let mut dex = Pokedex::default();
        assert_eq!(dex.merge(vec![record(1, "bulbasaur", &["grass"])]), 1);

        let mut changed = record(1, "not-bulbasaur", &["fire"]);
        changed.stats.hp = 999;
        assert_eq!(dex.merge(vec![changed, record(4, "charmander", &["fire"])]), 1);

        assert_eq!(dex.len(), 2);
        assert_eq!(dex.get(1).map(|r| r.name.as_str()), Some("bulbasaur"));
        assert_eq!(dex.get(1).map(|r| r.stats.hp), Some(45));
    }

    #[test]
    fn merge_dedups_within_one_batch() {
        let mut dex = Pokedex::default();
        let added = dex.merge(vec![
            record(25, "pikachu", &["electric"]),
            record(25, "raichu", &["electric"]),
        ]);
        assert_eq!(added, 1);
        assert_eq!(dex.all()[0].name, "pikachu");
    }

    #[test]
    fn merge_is_idempotent() {
        let batch = vec![
            record(1, "bulbasaur", &["grass"]),
            record(2, "ivysaur", &["grass"]),
        ];
        let mut dex = Pokedex::default();
        dex.merge(batch.clone());
        let before = dex.clone();
        assert_eq!(dex.merge(batch), 0);
        assert_eq!(dex, before);
    }

    #[test]
    fn ids_stay_unique_across_many_merges() {
        let mut dex = Pokedex::default();
        for round in 0..5u32 {
            let batch = (1..=10u32)
                .map(|id| record(id * (round % 2 + 1), &format!("mon-{round}-{id}"), &["normal"]))
                .collect::<Vec<_>>();
            dex.merge(batch);
        }
        let mut ids: Vec<u32> = dex.all().iter().map(|r| r.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(dex.get(2).map(|r| r.name.as_str()), Some("mon-0-2"));
    }

    #[test]
    fn children_are_derived_from_parents() {
        let mut dex = Pokedex::default();
        dex.merge(vec![
            record(133, "eevee", &["normal"]),
            evolved(134, "vaporeon", &["water"], 133),
            evolved(135, "jolteon", &["electric"], 133),
            record(1, "bulbasaur", &["grass"]),
        ]);
        let children: Vec<u32> = dex.children_of(133).map(|r| r.id).collect();
        assert_eq!(children, vec![134, 135]);
        assert_eq!(dex.children_of(1).count(), 0);
    }

    #[test]
    fn deserialize_rebuilds_index() {
        let mut dex = Pokedex::default();
        dex.merge(vec![record(7, "squirtle", &["water"])]);
        let json = serde_json::to_string(&dex).expect("serialize");
        let restored: Pokedex = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.position(7), Some(0));
        assert!(restored.contains(7));
    }
}
