use std::num::NonZeroU32;

use crate::store::{Committed, Store};

use super::intent::ProjectIntent;
use super::reducer::{ProjectChange, ProjectReducer};
use super::state::{ProjectId, ProjectPatch};

pub type ProjectStore = Store<ProjectReducer>;

impl Store<ProjectReducer> {
    /// Create a project at row zero and put it first in the collection.
    ///
    /// The name is taken as given; rejecting blank names is up to the caller.
    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        target_row: Option<NonZeroU32>,
    ) -> Committed<ProjectId> {
        let id = ProjectId::generate();
        let committed = self.dispatch(ProjectIntent::Add {
            id: id.clone(),
            name: name.into(),
            target_row,
        });
        tracing::debug!(project = %id, "Project added");
        committed.map(|_| id)
    }

    pub fn update_project(&mut self, id: &ProjectId, patch: ProjectPatch) -> Committed<ProjectChange> {
        self.dispatch(ProjectIntent::Update {
            id: id.clone(),
            patch,
        })
    }

    pub fn delete_project(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        let committed = self.dispatch(ProjectIntent::Delete { id: id.clone() });
        if *committed.value() == ProjectChange::Deleted {
            tracing::debug!(project = %id, "Project deleted");
        }
        committed
    }

    /// Knit one row. Returns `true` only for the increment that first
    /// reaches the project's target.
    pub fn increment_row(&mut self, id: &ProjectId) -> Committed<bool> {
        let committed = self.dispatch(ProjectIntent::IncrementRow { id: id.clone() });
        let completed = *committed.value() == ProjectChange::Completed;
        if completed {
            tracing::info!(project = %id, "Project completed");
        }
        committed.map(|_| completed)
    }

    pub fn decrement_row(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        let committed = self.dispatch(ProjectIntent::DecrementRow { id: id.clone() });
        if *committed.value() == ProjectChange::Reopened {
            tracing::info!(project = %id, "Project dropped below target");
        }
        committed
    }

    pub fn reset_row(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        self.dispatch(ProjectIntent::ResetRow { id: id.clone() })
    }
}
