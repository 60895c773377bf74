use serde::{Deserialize, Serialize};

use crate::state::Record;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    PageNext,
    PagePrev,
    PageGoto(u32),
    PageDidLoad {
        page: u32,
        generation: u64,
        records: Vec<Record>,
    },
    PageDidError {
        page: u32,
        generation: u64,
        error: String,
    },

    CatalogDidLoad(Vec<Record>),
    CatalogDidError(String),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,
    SortNext,

    IdSearchDidLoad {
        generation: u64,
        record: Record,
    },
    IdSearchDidError {
        generation: u64,
        id: u32,
        error: String,
        not_found: bool,
    },

    SelectionMove(i16),
    DexSelect(usize),

    RelationSelect(usize),
    RelationOpen,
    RecordDidLoad(Record),
    RecordDidError { id: u32, error: String },

    TeamAdd,
    TeamRemove(u32),
    TeamSelect(usize),
    TeamClear,

    SavePromptStart,
    SavePromptCancel,
    SavePromptSubmit,
    SavePromptInput(char),
    SavePromptBackspace,

    SnapshotSelect(usize),
    SnapshotLoad,
    SnapshotDelete,

    FocusNext,
    FocusPrev,

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
