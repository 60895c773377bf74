use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::filter::{self, Query};
use crate::pagination::Pagination;
use crate::pokedex::Pokedex;
use crate::team::TeamStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub speed: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: Option<u16>,
}

/// A catalog entry as normalized by the api layer. Immutable once cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub types: Vec<String>,
    pub abilities: Vec<String>,
    pub stats: Stats,
    /// Kilograms.
    pub weight: f32,
    /// Meters.
    pub height: f32,
    pub cry: Option<String>,
    pub evolution_from: Option<u32>,
    pub moves: Vec<Move>,
}

impl Record {
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(type_name))
    }
}

/// Snapshot of a record taken when it joins a team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub types: Vec<String>,
    pub moves: Vec<Move>,
}

impl From<&Record> for TeamMember {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            image: record.image.clone(),
            types: record.types.clone(),
            moves: record.moves.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationKind {
    EvolvesFrom,
    EvolvesTo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub id: u32,
    /// `None` while the related record is not cached yet.
    pub name: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    DexList,
    Evolution,
    Team,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NamePrompt {
    pub active: bool,
    pub input: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub focus: FocusArea,

    pub pokedex: Pokedex,
    /// Indices into `pokedex`, in display order.
    pub projection: Vec<usize>,
    /// Ids of the page currently shown, `None` until a page has loaded.
    pub page_ids: Option<Vec<u32>>,
    pub query: Query,
    pub search: SearchState,
    pub search_generation: u64,
    pub id_search: Option<u32>,

    pub selected_index: usize,
    pub detail_id: Option<u32>,
    pub relation_index: usize,
    pub record_loading: Option<u32>,

    pub team: TeamStore,
    pub team_index: usize,
    pub snapshot_index: usize,
    pub prompt: NamePrompt,

    pub pagination: Pagination,
    pub preload_count: u32,
    pub preload_loading: bool,

    pub message: Option<String>,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Pagination::default(), 0, TeamStore::default())
    }
}

impl AppState {
    pub fn new(pagination: Pagination, preload_count: u32, team: TeamStore) -> Self {
        Self {
            terminal_size: (80, 24),
            focus: FocusArea::DexList,
            pokedex: Pokedex::default(),
            projection: Vec::new(),
            page_ids: None,
            query: Query::default(),
            search: SearchState::default(),
            search_generation: 0,
            id_search: None,
            selected_index: 0,
            detail_id: None,
            relation_index: 0,
            record_loading: None,
            team,
            team_index: 0,
            snapshot_index: 0,
            prompt: NamePrompt::default(),
            pagination,
            preload_count,
            preload_loading: false,
            message: None,
            tick: 0,
        }
    }

    pub fn projection_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.projection
            .iter()
            .filter_map(|index| self.pokedex.get_index(*index))
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.projection
            .get(self.selected_index)
            .and_then(|index| self.pokedex.get_index(*index))
    }

    pub fn detail_record(&self) -> Option<&Record> {
        self.detail_id.and_then(|id| self.pokedex.get(id))
    }

    pub fn set_selected_index(&mut self, index: usize) -> bool {
        if self.projection.is_empty() {
            self.selected_index = 0;
            return false;
        }
        let bounded = index.min(self.projection.len() - 1);
        if bounded != self.selected_index {
            self.selected_index = bounded;
            return true;
        }
        false
    }

    /// Recomputes the projection after a query change or cache growth.
    ///
    /// A non-empty text query searches every cached record; otherwise the
    /// current page (if any) is the source. A numeric query with no name
    /// match shows the record with that id when it is cached.
    pub fn rebuild_projection(&mut self) {
        let scope = if self.query.text.trim().is_empty() {
            self.page_ids.as_deref()
        } else {
            None
        };
        self.projection = filter::recompute(&self.pokedex, scope, &self.query);
        if let Some(id) = filter::fallback_id(&self.query, self.projection.len()) {
            self.projection = self.pokedex.position(id).into_iter().collect();
        }
        self.clamp_selection();
    }

    /// Id the remote lookup should fetch: the fallback fired and the record
    /// is not cached yet.
    pub fn pending_fallback(&self) -> Option<u32> {
        filter::fallback_id(&self.query, self.projection.len())
            .filter(|id| !self.pokedex.contains(*id))
    }

    /// Makes `ids` the current page and rebuilds the projection.
    ///
    /// Scope follows `rebuild_projection`: the page is the source only while
    /// the text query is empty, a text query always searches the whole cache.
    /// A page load and a later cache growth therefore agree for the same query.
    pub fn show_page(&mut self, ids: Vec<u32>) {
        self.page_ids = Some(ids);
        self.selected_index = 0;
        self.rebuild_projection();
    }

    pub fn sync_detail(&mut self) {
        let next = self.selected_record().map(|record| record.id);
        if next != self.detail_id {
            self.detail_id = next;
            self.relation_index = 0;
        }
    }

    /// Predecessor first, then successors in cache order.
    pub fn relations(&self) -> Vec<Relation> {
        let Some(record) = self.detail_record() else {
            return Vec::new();
        };
        let mut relations = Vec::new();
        if let Some(parent) = record.evolution_from.filter(|parent| *parent != record.id) {
            relations.push(Relation {
                kind: RelationKind::EvolvesFrom,
                id: parent,
                name: self.pokedex.get(parent).map(|found| found.name.clone()),
            });
        }
        for child in self.pokedex.children_of(record.id) {
            if child.id == record.id {
                continue;
            }
            relations.push(Relation {
                kind: RelationKind::EvolvesTo,
                id: child.id,
                name: Some(child.name.clone()),
            });
        }
        relations
    }

    pub fn busy(&self) -> bool {
        self.pagination.is_loading()
            || self.preload_loading
            || self.id_search.is_some()
            || self.record_loading.is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FocusArea::DexList => FocusArea::Evolution,
            FocusArea::Evolution => FocusArea::Team,
            FocusArea::Team => FocusArea::DexList,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FocusArea::DexList => FocusArea::Team,
            FocusArea::Evolution => FocusArea::DexList,
            FocusArea::Team => FocusArea::Evolution,
        };
    }

    pub fn clamp_team_selection(&mut self) {
        self.team_index = self.team_index.min(self.team.len().saturating_sub(1));
        self.snapshot_index = self
            .snapshot_index
            .min(self.team.saved.len().saturating_sub(1));
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.projection.len() {
            self.selected_index = 0;
        }
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Dex")
                .entry("cached", ron_string(&self.pokedex.len()))
                .entry("shown", ron_string(&self.projection.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("detail", ron_string(&self.detail_id)),
            DebugSection::new("Filters")
                .entry("text", ron_string(&self.query.text))
                .entry("type", ron_string(&self.query.type_filter))
                .entry("sort", ron_string(&self.query.sort))
                .entry("search_active", ron_string(&self.search.active))
                .entry("focus", ron_string(&self.focus)),
            DebugSection::new("Pages")
                .entry("page", ron_string(&self.pagination.current_page))
                .entry("has_more", ron_string(&self.pagination.has_more))
                .entry("status", ron_string(&self.pagination.status))
                .entry("generation", ron_string(&self.pagination.generation)),
            DebugSection::new("Team")
                .entry("members", ron_string(&self.team.current.len()))
                .entry("snapshots", ron_string(&self.team.names()))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
