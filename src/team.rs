use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::TeamError;
use crate::state::{Record, TeamMember};
use crate::types::weaknesses_of;

pub const MAX_TEAM_SIZE: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub type_name: String,
    pub count: u32,
}

/// The current team plus independently named snapshots.
///
/// Pure in-memory state; the reducer emits persistence effects after each
/// mutation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStore {
    pub current: Vec<TeamMember>,
    pub saved: BTreeMap<String, Vec<TeamMember>>,
}

impl TeamStore {
    pub fn new(current: Vec<TeamMember>, saved: BTreeMap<String, Vec<TeamMember>>) -> Self {
        Self {
            current: sanitize(current),
            saved,
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.current.len() >= MAX_TEAM_SIZE
    }

    pub fn contains(&self, id: u32) -> bool {
        self.current.iter().any(|member| member.id == id)
    }

    pub fn add(&mut self, record: &Record) -> Result<(), TeamError> {
        if self.is_full() {
            return Err(TeamError::Full);
        }
        if self.contains(record.id) {
            return Err(TeamError::Duplicate);
        }
        self.current.push(TeamMember::from(record));
        Ok(())
    }

    /// Returns whether a member was removed.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.current.len();
        self.current.retain(|member| member.id != id);
        self.current.len() != before
    }

    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Distinct type tags across the team, in first-seen order.
    pub fn types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for member in &self.current {
            for type_name in &member.types {
                if !types.contains(type_name) {
                    types.push(type_name.clone());
                }
            }
        }
        types
    }

    /// Raw exposure count per attacking type, highest first.
    ///
    /// Every type of every member contributes, so three fire members count
    /// water three times. Ties are ordered by type name.
    pub fn weaknesses(&self) -> Vec<Weakness> {
        let mut counts: HashMap<&'static str, u32> = HashMap::new();
        for member in &self.current {
            for type_name in &member.types {
                for weak in weaknesses_of(&type_name.to_ascii_lowercase()) {
                    *counts.entry(*weak).or_insert(0) += 1;
                }
            }
        }
        let mut weaknesses: Vec<Weakness> = counts
            .into_iter()
            .map(|(type_name, count)| Weakness {
                type_name: type_name.to_string(),
                count,
            })
            .collect();
        weaknesses.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.type_name.cmp(&b.type_name))
        });
        weaknesses
    }

    /// Stores a copy of the current team, overwriting an existing snapshot of
    /// the same name.
    pub fn save_named(&mut self, name: &str) -> Result<String, TeamError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TeamError::EmptyName);
        }
        self.saved.insert(name.to_string(), self.current.clone());
        Ok(name.to_string())
    }

    /// Replaces the current team with a copy of the snapshot. Unknown names
    /// leave the team untouched.
    pub fn load_named(&mut self, name: &str) -> bool {
        match self.saved.get(name) {
            Some(members) => {
                self.current = sanitize(members.clone());
                true
            }
            None => false,
        }
    }

    pub fn delete_named(&mut self, name: &str) -> bool {
        self.saved.remove(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.saved.keys().cloned().collect()
    }
}

/// Enforces the size bound and id uniqueness on data read back from storage.
fn sanitize(members: Vec<TeamMember>) -> Vec<TeamMember> {
    let mut result: Vec<TeamMember> = Vec::with_capacity(MAX_TEAM_SIZE);
    for member in members {
        if result.len() >= MAX_TEAM_SIZE {
            break;
        }
        if result.iter().any(|existing| existing.id == member.id) {
            continue;
        }
        result.push(member);
    }
    result
}
