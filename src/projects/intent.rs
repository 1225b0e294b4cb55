use std::num::NonZeroU32;

use crate::mvi::Intent;

use super::state::{ProjectId, ProjectPatch};

#[derive(Debug, Clone)]
pub enum ProjectIntent {
    /// Prepend a new project. The id is generated by the caller.
    Add {
        id: ProjectId,
        name: String,
        target_row: Option<NonZeroU32>,
    },
    Update {
        id: ProjectId,
        patch: ProjectPatch,
    },
    Delete {
        id: ProjectId,
    },
    IncrementRow {
        id: ProjectId,
    },
    /// Step back one row, floored at zero. Un-completes the project when it
    /// drops below its target.
    DecrementRow {
        id: ProjectId,
    },
    /// Back to row zero; always clears completion.
    ResetRow {
        id: ProjectId,
    },
}

impl Intent for ProjectIntent {}
