use std::collections::BTreeMap;

use crate::state::TeamMember;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadPage { page: u32, generation: u64 },
    PreloadCatalog { ids: Vec<u32> },
    SearchById { id: u32, generation: u64 },
    LoadRecord { id: u32 },
    PersistTeam { members: Vec<TeamMember> },
    PersistSnapshots {
        snapshots: BTreeMap<String, Vec<TeamMember>>,
    },
}
