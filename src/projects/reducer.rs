//! Reducer for the project collection.

use crate::clock::Clock;
use crate::mvi::Reducer;

use super::intent::ProjectIntent;
use super::state::{Project, ProjectId, ProjectsState};

/// What a project intent did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectChange {
    Added,
    /// An `Add` carried an id that is already in use.
    IdTaken,
    Updated,
    Deleted,
    /// The counter reached the target for the first time.
    Completed,
    /// The project lost its completion (decrement, reset or an edit that
    /// leaves the target unmet).
    Reopened,
    NotFound,
}

/// Reducer for the project collection.
///
/// Every transition builds a new `Vec`; an intent for an unknown id returns
/// an equal copy so the store treats it as a no-op.
pub struct ProjectReducer;

impl Reducer for ProjectReducer {
    type State = ProjectsState;
    type Intent = ProjectIntent;
    type Output = ProjectChange;

    fn reduce(
        state: &Self::State,
        intent: Self::Intent,
        clock: &dyn Clock,
    ) -> (Self::State, Self::Output) {
        match intent {
            ProjectIntent::Add {
                id,
                name,
                target_row,
            } => {
                if state.get(&id).is_some() {
                    return (state.clone(), ProjectChange::IdTaken);
                }
                let project = Project::new(id, name, target_row, clock.now());
                let projects = std::iter::once(project)
                    .chain(state.projects.iter().cloned())
                    .collect();
                (ProjectsState { projects }, ProjectChange::Added)
            }

            ProjectIntent::Update { id, patch } => map_project(state, &id, |p| {
                let mut next = p.clone();
                patch.apply_to(&mut next);
                next.updated_at = clock.now();

                // An edit may only take completion away; stamping it stays
                // with IncrementRow.
                let still_met = next
                    .target_row
                    .is_some_and(|t| next.current_row >= t.get());
                if next.completed_at.is_some() && !still_met {
                    next.completed_at = None;
                    return (next, ProjectChange::Reopened);
                }
                (next, ProjectChange::Updated)
            }),

            ProjectIntent::Delete { id } => {
                if state.get(&id).is_none() {
                    return (state.clone(), ProjectChange::NotFound);
                }
                let projects = state
                    .projects
                    .iter()
                    .filter(|p| p.id != id)
                    .cloned()
                    .collect();
                (ProjectsState { projects }, ProjectChange::Deleted)
            }

            ProjectIntent::IncrementRow { id } => map_project(state, &id, |p| {
                let now = clock.now();
                let current_row = p.current_row.saturating_add(1);
                let completes = p.completed_at.is_none()
                    && p.target_row.is_some_and(|t| current_row >= t.get());

                let next = Project {
                    current_row,
                    updated_at: now,
                    completed_at: if completes { Some(now) } else { p.completed_at },
                    ..p.clone()
                };
                let change = if completes {
                    ProjectChange::Completed
                } else {
                    ProjectChange::Updated
                };
                (next, change)
            }),

            ProjectIntent::DecrementRow { id } => map_project(state, &id, |p| {
                let current_row = p.current_row.saturating_sub(1);
                let reopens = p.completed_at.is_some()
                    && p.target_row.is_some_and(|t| current_row < t.get());

                let next = Project {
                    current_row,
                    updated_at: clock.now(),
                    completed_at: if reopens { None } else { p.completed_at },
                    ..p.clone()
                };
                let change = if reopens {
                    ProjectChange::Reopened
                } else {
                    ProjectChange::Updated
                };
                (next, change)
            }),

            ProjectIntent::ResetRow { id } => map_project(state, &id, |p| {
                let change = if p.is_completed() {
                    ProjectChange::Reopened
                } else {
                    ProjectChange::Updated
                };
                let next = Project {
                    current_row: 0,
                    completed_at: None,
                    updated_at: clock.now(),
                    ..p.clone()
                };
                (next, change)
            }),
        }
    }
}

/// Rebuild the collection with the project `id` replaced by `f`'s result.
fn map_project(
    state: &ProjectsState,
    id: &ProjectId,
    f: impl FnOnce(&Project) -> (Project, ProjectChange),
) -> (ProjectsState, ProjectChange) {
    let Some(index) = state.projects.iter().position(|p| &p.id == id) else {
        return (state.clone(), ProjectChange::NotFound);
    };

    let (replacement, change) = f(&state.projects[index]);
    let mut projects = state.projects.clone();
    projects[index] = replacement;
    (ProjectsState { projects }, change)
}
