use serde::{Deserialize, Serialize};

use crate::pokedex::Pokedex;
use crate::state::Record;

/// Type filter value that means "no type filter".
pub const ALL_TYPES: &str = "all";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    Insertion,
    IdAscending,
    IdDescending,
    Name,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Insertion => SortMode::IdAscending,
            SortMode::IdAscending => SortMode::IdDescending,
            SortMode::IdDescending => SortMode::Name,
            SortMode::Name => SortMode::Insertion,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Insertion => "DEFAULT",
            SortMode::IdAscending => "ID ↑",
            SortMode::IdDescending => "ID ↓",
            SortMode::Name => "A-Z",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub type_filter: Option<String>,
    pub sort: SortMode,
}

impl Query {
    pub fn has_type_filter(&self) -> bool {
        self.type_filter
            .as_deref()
            .map(|name| !name.is_empty() && !name.eq_ignore_ascii_case(ALL_TYPES))
            .unwrap_or(false)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_text(record) && self.matches_type(record)
    }

    fn matches_text(&self, record: &Record) -> bool {
        let needle = self.text.trim().to_lowercase();
        needle.is_empty() || record.name.to_lowercase().contains(&needle)
    }

    fn matches_type(&self, record: &Record) -> bool {
        if !self.has_type_filter() {
            return true;
        }
        self.type_filter
            .as_deref()
            .map(|name| record.has_type(name))
            .unwrap_or(true)
    }
}

/// Filters and orders cached records, returning indices into `cache`.
///
/// `scope` restricts the candidates to the given ids (in that order); `None`
/// considers the whole cache in insertion order. Sorting is stable.
pub fn recompute(cache: &Pokedex, scope: Option<&[u32]>, query: &Query) -> Vec<usize> {
    let candidates: Vec<usize> = match scope {
        Some(ids) => ids.iter().filter_map(|id| cache.position(*id)).collect(),
        None => (0..cache.len()).collect(),
    };

    let mut matched: Vec<usize> = candidates
        .into_iter()
        .filter(|idx| {
            cache
                .get_index(*idx)
                .map(|record| query.matches(record))
                .unwrap_or(false)
        })
        .collect();

    match query.sort {
        SortMode::Insertion => {}
        SortMode::IdAscending => matched.sort_by_key(|idx| record_id(cache, *idx)),
        SortMode::IdDescending => {
            matched.sort_by_key(|idx| std::cmp::Reverse(record_id(cache, *idx)))
        }
        SortMode::Name => matched.sort_by_cached_key(|idx| {
            cache
                .get_index(*idx)
                .map(|record| record.name.to_lowercase())
                .unwrap_or_default()
        }),
    }
    matched
}

/// Id to look up remotely when a numeric search found nothing.
///
/// Never fires while a type filter is active: an empty result for a type is a
/// real answer and must not be replaced by an unrelated id lookup.
pub fn fallback_id(query: &Query, matched: usize) -> Option<u32> {
    if matched > 0 || query.has_type_filter() {
        return None;
    }
    let text = query.text.trim();
    if text.is_empty() || !text.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    text.parse::<u32>().ok().filter(|id| *id > 0)
}

fn record_id(cache: &Pokedex, idx: usize) -> u32 {
    cache.get_index(idx).map(|record| record.id).unwrap_or(0)
}
