use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::pagination::{PageOutcome, PageRequest};
use crate::state::{AppState, Record};
use crate::types::TYPE_NAMES;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.message = None;
            let mut effects = Vec::new();
            if let Some(request) = state.pagination.request_current() {
                effects.push(load_page(request));
            }
            if state.preload_count > 0 {
                state.preload_loading = true;
                effects.push(Effect::PreloadCatalog {
                    ids: (1..=state.preload_count).collect(),
                });
            }
            DispatchResult::changed_with_many(effects)
        }

        Action::PageNext => page_request(state.pagination.next()),
        Action::PagePrev => page_request(state.pagination.prev()),
        Action::PageGoto(page) => page_request(state.pagination.request(page)),

        Action::PageDidLoad {
            page,
            generation,
            records,
        } => {
            let empty = records.is_empty();
            match state.pagination.complete(generation, empty) {
                None => {
                    tracing::debug!(page, generation, "discarding stale page");
                    DispatchResult::unchanged()
                }
                Some(PageOutcome::Exhausted(page)) => {
                    tracing::info!(page, "catalog exhausted");
                    state.message = Some(format!("Page {page} is empty, no more pages"));
                    DispatchResult::changed()
                }
                Some(PageOutcome::Shown(_)) => {
                    let ids: Vec<u32> = records.iter().map(|record| record.id).collect();
                    state.pokedex.merge(records);
                    state.show_page(ids);
                    state.sync_detail();
                    state.message = None;
                    DispatchResult::changed()
                }
            }
        }

        Action::PageDidError {
            page,
            generation,
            error,
        } => {
            if !state.pagination.fail(generation) {
                return DispatchResult::unchanged();
            }
            state.message = Some(format!("Page {page} error: {error}"));
            DispatchResult::changed()
        }

        Action::CatalogDidLoad(records) => {
            state.preload_loading = false;
            let inserted = state.pokedex.merge(records);
            tracing::info!(inserted, total = state.pokedex.len(), "catalog preloaded");
            state.rebuild_projection();
            state.sync_detail();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.preload_loading = false;
            state.message = Some(format!("Catalog error: {error}"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.query.text.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.query.text.clear();
            apply_query(state)
        }

        Action::SearchSubmit => {
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.query.text.push(ch);
            apply_query(state)
        }

        Action::SearchBackspace => {
            if state.query.text.pop().is_none() {
                return DispatchResult::unchanged();
            }
            apply_query(state)
        }

        Action::TypeFilterNext => cycle_type_filter(state, 1),
        Action::TypeFilterPrev => cycle_type_filter(state, -1),

        Action::TypeFilterClear => {
            if state.query.type_filter.is_none() {
                return DispatchResult::unchanged();
            }
            state.query.type_filter = None;
            apply_query(state)
        }

        Action::SortNext => {
            state.query.sort = state.query.sort.next();
            state.rebuild_projection();
            state.sync_detail();
            DispatchResult::changed()
        }

        Action::IdSearchDidLoad { generation, record } => {
            if generation != state.search_generation {
                tracing::debug!(generation, id = record.id, "discarding stale id search");
                return DispatchResult::unchanged();
            }
            state.id_search = None;
            state.pokedex.merge([record]);
            state.rebuild_projection();
            state.sync_detail();
            DispatchResult::changed()
        }

        Action::IdSearchDidError {
            generation,
            id,
            error,
            not_found,
        } => {
            if generation != state.search_generation {
                return DispatchResult::unchanged();
            }
            state.id_search = None;
            if !not_found {
                state.message = Some(format!("Search #{id} failed: {error}"));
            }
            DispatchResult::changed()
        }

        Action::SelectionMove(delta) => {
            let index = (state.selected_index as i64 + delta as i64).max(0) as usize;
            select_index(state, index)
        }

        Action::DexSelect(index) => select_index(state, index),

        Action::RelationSelect(index) => {
            let count = state.relations().len();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let index = index.min(count - 1);
            if index == state.relation_index {
                return DispatchResult::unchanged();
            }
            state.relation_index = index;
            DispatchResult::changed()
        }

        Action::RelationOpen => {
            let Some(relation) = state.relations().get(state.relation_index).cloned() else {
                return DispatchResult::unchanged();
            };
            if state.pokedex.contains(relation.id) {
                state.detail_id = Some(relation.id);
                state.relation_index = 0;
                return DispatchResult::changed();
            }
            state.record_loading = Some(relation.id);
            DispatchResult::changed_with(Effect::LoadRecord { id: relation.id })
        }

        Action::RecordDidLoad(record) => {
            let id = record.id;
            state.pokedex.merge([record]);
            if state.record_loading == Some(id) {
                state.record_loading = None;
                state.detail_id = Some(id);
                state.relation_index = 0;
            }
            state.rebuild_projection();
            DispatchResult::changed()
        }

        Action::RecordDidError { id, error } => {
            if state.record_loading == Some(id) {
                state.record_loading = None;
            }
            state.message = Some(format!("#{id} load error: {error}"));
            DispatchResult::changed()
        }

        Action::TeamAdd => {
            let Some(record) = state.detail_record().cloned() else {
                return DispatchResult::unchanged();
            };
            team_add(state, &record)
        }

        // Team writes go out even when nothing changed, which also repairs a
        // stored team after an earlier failed write.
        Action::TeamRemove(id) => {
            if state.team.remove(id) {
                state.clamp_team_selection();
            }
            DispatchResult::changed_with(persist_team(state))
        }

        Action::TeamSelect(index) => {
            let index = index.min(state.team.len().saturating_sub(1));
            if index == state.team_index {
                return DispatchResult::unchanged();
            }
            state.team_index = index;
            DispatchResult::changed()
        }

        Action::TeamClear => {
            state.team.clear();
            state.team_index = 0;
            state.message = Some("Team cleared".to_string());
            DispatchResult::changed_with(persist_team(state))
        }

        Action::SavePromptStart => {
            if state.prompt.active {
                return DispatchResult::unchanged();
            }
            state.prompt.active = true;
            state.prompt.input.clear();
            DispatchResult::changed()
        }

        Action::SavePromptCancel => {
            if !state.prompt.active {
                return DispatchResult::unchanged();
            }
            state.prompt.active = false;
            state.prompt.input.clear();
            DispatchResult::changed()
        }

        Action::SavePromptInput(ch) => {
            if !state.prompt.active {
                return DispatchResult::unchanged();
            }
            state.prompt.input.push(ch);
            DispatchResult::changed()
        }

        Action::SavePromptBackspace => {
            if state.prompt.input.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::SavePromptSubmit => {
            if !state.prompt.active {
                return DispatchResult::unchanged();
            }
            match state.team.save_named(&state.prompt.input) {
                Ok(name) => {
                    state.prompt.active = false;
                    state.prompt.input.clear();
                    state.snapshot_index = state
                        .team
                        .names()
                        .iter()
                        .position(|saved| *saved == name)
                        .unwrap_or(0);
                    state.message = Some(format!("Saved team \"{name}\""));
                    DispatchResult::changed_with(persist_snapshots(state))
                }
                Err(err) => {
                    state.message = Some(err.to_string());
                    DispatchResult::changed()
                }
            }
        }

        Action::SnapshotSelect(index) => {
            let index = index.min(state.team.saved.len().saturating_sub(1));
            if index == state.snapshot_index {
                return DispatchResult::unchanged();
            }
            state.snapshot_index = index;
            DispatchResult::changed()
        }

        Action::SnapshotLoad => {
            let Some(name) = selected_snapshot(state) else {
                return DispatchResult::unchanged();
            };
            if !state.team.load_named(&name) {
                return DispatchResult::unchanged();
            }
            state.team_index = 0;
            state.message = Some(format!("Loaded team \"{name}\""));
            DispatchResult::changed_with(persist_team(state))
        }

        Action::SnapshotDelete => {
            let Some(name) = selected_snapshot(state) else {
                return DispatchResult::unchanged();
            };
            if !state.team.delete_named(&name) {
                return DispatchResult::unchanged();
            }
            state.clamp_team_selection();
            state.message = Some(format!("Deleted team \"{name}\""));
            DispatchResult::changed_with(persist_snapshots(state))
        }

        Action::FocusNext => {
            if state.search.active || state.prompt.active {
                return DispatchResult::unchanged();
            }
            state.focus_next();
            DispatchResult::changed()
        }

        Action::FocusPrev => {
            if state.search.active || state.prompt.active {
                return DispatchResult::unchanged();
            }
            state.focus_prev();
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if !state.busy() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn load_page(request: PageRequest) -> Effect {
    Effect::LoadPage {
        page: request.page,
        generation: request.generation,
    }
}

fn page_request(request: Option<PageRequest>) -> DispatchResult<Effect> {
    match request {
        Some(request) => DispatchResult::changed_with(load_page(request)),
        None => DispatchResult::unchanged(),
    }
}

/// Recomputes the projection for a changed query and starts a remote id
/// lookup when the numeric fallback applies.
fn apply_query(state: &mut AppState) -> DispatchResult<Effect> {
    state.search_generation = state.search_generation.wrapping_add(1);
    state.id_search = None;
    state.rebuild_projection();
    state.sync_detail();
    match state.pending_fallback() {
        Some(id) => {
            state.id_search = Some(id);
            DispatchResult::changed_with(Effect::SearchById {
                id,
                generation: state.search_generation,
            })
        }
        None => DispatchResult::changed(),
    }
}

/// Steps through `None` followed by every known type.
fn cycle_type_filter(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let slots = TYPE_NAMES.len() as i16 + 1;
    let current = state
        .query
        .type_filter
        .as_deref()
        .and_then(|name| TYPE_NAMES.iter().position(|candidate| *candidate == name))
        .map(|index| index as i16 + 1)
        .unwrap_or(0);
    let next = (current + step).rem_euclid(slots);
    state.query.type_filter = if next == 0 {
        None
    } else {
        Some(TYPE_NAMES[(next - 1) as usize].to_string())
    };
    apply_query(state)
}

fn select_index(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if !state.set_selected_index(index) {
        return DispatchResult::unchanged();
    }
    state.sync_detail();
    DispatchResult::changed()
}

fn team_add(state: &mut AppState, record: &Record) -> DispatchResult<Effect> {
    match state.team.add(record) {
        Ok(()) => {
            state.team_index = state.team.len() - 1;
            state.message = Some(format!("{} joined the team", record.name));
            DispatchResult::changed_with(persist_team(state))
        }
        Err(err) if err.is_full_or_duplicate() => {
            state.message = Some(format!("Team full or already contains {}", record.name));
            DispatchResult::changed()
        }
        Err(err) => {
            state.message = Some(err.to_string());
            DispatchResult::changed()
        }
    }
}

fn selected_snapshot(state: &AppState) -> Option<String> {
    state.team.names().into_iter().nth(state.snapshot_index)
}

fn persist_team(state: &AppState) -> Effect {
    Effect::PersistTeam {
        members: state.team.current.clone(),
    }
}

fn persist_snapshots(state: &AppState) -> Effect {
    Effect::PersistSnapshots {
        snapshots: state.team.saved.clone(),
    }
}
