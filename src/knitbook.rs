//! Application context tying the three stores together.
//!
//! Built once at startup and handed to whatever drives the app (the CLI,
//! tests). It owns the stores outright; there is no global state.

use std::num::NonZeroU32;
use std::sync::Arc;

use thiserror::Error;

use crate::achievements::{Achievement, AchievementStore, AchievementsState};
use crate::clock::{Clock, SystemClock};
use crate::favorites::{FavoriteStore, FavoritesState};
use crate::projects::{Project, ProjectChange, ProjectId, ProjectPatch, ProjectStore, ProjectsState};
use crate::storage::{FileStorage, KeyValueStorage, StorageError};
use crate::store::Committed;

#[derive(Debug, Error)]
pub enum KnitbookError {
    #[error("Project name must not be empty")]
    EmptyName,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of knitting one row through [`Knitbook::knit_row`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowKnitted {
    /// The project existed and its counter moved.
    pub found: bool,
    /// This row brought the project to its target for the first time.
    pub completed: bool,
    /// Achievements unlocked by this row, in catalog order.
    pub unlocked: Vec<Achievement>,
}

pub struct Knitbook {
    projects: ProjectStore,
    achievements: AchievementStore,
    favorites: FavoriteStore,
}

impl Knitbook {
    /// Open all stores on `storage`, using `clock` for timestamps.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, KnitbookError> {
        Ok(Self {
            projects: ProjectStore::open(Arc::clone(&storage), Arc::clone(&clock))?,
            achievements: AchievementStore::open(Arc::clone(&storage), Arc::clone(&clock))?,
            favorites: FavoriteStore::open(storage, clock)?,
        })
    }

    /// Open file-backed stores in `dir` with the wall clock.
    pub fn open_dir(dir: impl Into<std::path::PathBuf>) -> Result<Self, KnitbookError> {
        let storage = FileStorage::new(dir);
        tracing::debug!(dir = %storage.dir().display(), "Opening knitbook");
        Self::open(Arc::new(storage), Arc::new(SystemClock))
    }

    pub fn projects(&self) -> &ProjectsState {
        self.projects.state()
    }

    pub fn achievements(&self) -> &AchievementsState {
        self.achievements.state()
    }

    pub fn favorites(&self) -> &FavoritesState {
        self.favorites.state()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.state().get(id)
    }

    pub fn project_store(&mut self) -> &mut ProjectStore {
        &mut self.projects
    }

    pub fn achievement_store(&mut self) -> &mut AchievementStore {
        &mut self.achievements
    }

    pub fn favorite_store(&mut self) -> &mut FavoriteStore {
        &mut self.favorites
    }

    /// Create a project from user input. Surrounding whitespace is trimmed
    /// and a blank name is rejected before the store sees it.
    pub fn create_project(
        &mut self,
        name: &str,
        target_row: Option<NonZeroU32>,
    ) -> Result<Committed<ProjectId>, KnitbookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KnitbookError::EmptyName);
        }
        Ok(self.projects.add_project(name, target_row))
    }

    /// Knit one row on `id` and credit it to the lifetime counters.
    ///
    /// The row is always credited to the total; completing a project also
    /// credits one project. Unknown ids change nothing.
    pub fn knit_row(&mut self, id: &ProjectId) -> Committed<RowKnitted> {
        if self.project(id).is_none() {
            return Committed::unchanged(RowKnitted::default());
        }

        let (completed, mut persist_error) = self.projects.increment_row(id).into_parts();

        let (mut unlocked, err) = self.achievements.increment_total_rows(1).into_parts();
        persist_error = persist_error.or(err);

        if completed {
            let (more, err) = self.achievements.increment_project_count().into_parts();
            unlocked.extend(more);
            persist_error = persist_error.or(err);
        }

        Committed::new(
            RowKnitted {
                found: true,
                completed,
                unlocked,
            },
            persist_error,
        )
    }

    /// Take one row back. Lifetime counters are never reduced.
    pub fn unknit_row(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        self.projects.decrement_row(id)
    }

    pub fn reset_row(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        self.projects.reset_row(id)
    }

    pub fn rename(&mut self, id: &ProjectId, name: &str) -> Result<Committed<ProjectChange>, KnitbookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(KnitbookError::EmptyName);
        }
        Ok(self
            .projects
            .update_project(id, ProjectPatch::new().name(name)))
    }

    pub fn set_target(&mut self, id: &ProjectId, target_row: Option<NonZeroU32>) -> Committed<ProjectChange> {
        self.projects
            .update_project(id, ProjectPatch::new().target_row(target_row))
    }

    /// Replace the memo; a blank memo clears it.
    pub fn set_memo(&mut self, id: &ProjectId, memo: &str) -> Committed<ProjectChange> {
        let memo = memo.trim();
        let memo = (!memo.is_empty()).then(|| memo.to_string());
        self.projects.update_project(id, ProjectPatch::new().memo(memo))
    }

    pub fn delete_project(&mut self, id: &ProjectId) -> Committed<ProjectChange> {
        self.projects.delete_project(id)
    }

    pub fn toggle_favorite(&mut self, symbol_id: &str) -> Committed<bool> {
        self.favorites.toggle_favorite(symbol_id)
    }

    pub fn is_favorite(&self, symbol_id: &str) -> bool {
        self.favorites.is_favorite(symbol_id)
    }
}
