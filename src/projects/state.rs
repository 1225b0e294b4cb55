use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::mvi::StoreState;

use super::error::ProjectLookupError;

/// Opaque project identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A knitting project and its row counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub current_row: u32,
    /// Goal row count. Zero in older records is read as "no target".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_target_row"
    )]
    pub target_row: Option<NonZeroU32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Set when the counter first reaches the target; cleared when it drops
    /// back below it or is reset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn deserialize_target_row<'de, D>(deserializer: D) -> Result<Option<NonZeroU32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.and_then(NonZeroU32::new))
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: String,
        target_row: Option<NonZeroU32>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            current_row: 0,
            target_row,
            memo: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Rows left until the target, floored at zero. `None` without a target.
    pub fn remaining_rows(&self) -> Option<u32> {
        self.target_row
            .map(|target| target.get().saturating_sub(self.current_row))
    }

    /// Progress toward the target in percent, capped at 100.
    pub fn progress_percent(&self) -> Option<f64> {
        self.target_row.map(|target| {
            let ratio = f64::from(self.current_row) / f64::from(target.get());
            (ratio * 100.0).min(100.0)
        })
    }
}

/// Partial update for [`Project`]. `None` leaves a field untouched; for the
/// optional fields `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub current_row: Option<u32>,
    pub target_row: Option<Option<NonZeroU32>>,
    pub memo: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn current_row(mut self, row: u32) -> Self {
        self.current_row = Some(row);
        self
    }

    pub fn target_row(mut self, target: Option<NonZeroU32>) -> Self {
        self.target_row = Some(target);
        self
    }

    pub fn memo(mut self, memo: Option<String>) -> Self {
        self.memo = Some(memo);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `project`. Timestamps are left to the caller.
    pub(crate) fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(row) = self.current_row {
            project.current_row = row;
        }
        if let Some(target) = self.target_row {
            project.target_row = target;
        }
        if let Some(memo) = self.memo {
            project.memo = memo;
        }
    }
}

/// Persisted collection of projects, newest created first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsState {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl StoreState for ProjectsState {
    const STORAGE_KEY: &'static str = "knitting-projects";

    fn normalize(mut self) -> Self {
        let mut seen = HashSet::new();
        self.projects.retain(|p| seen.insert(p.id.clone()));
        self
    }
}

impl ProjectsState {
    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects ordered by most recent change first.
    pub fn by_recent_activity(&self) -> Vec<&Project> {
        let mut sorted: Vec<&Project> = self.projects.iter().collect();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sorted
    }

    /// Find the single project whose id starts with `prefix`.
    ///
    /// An exact id match wins even when it is also a prefix of another id.
    pub fn resolve_prefix(&self, prefix: &str) -> Result<&Project, ProjectLookupError> {
        if let Some(exact) = self.projects.iter().find(|p| p.id.as_str() == prefix) {
            return Ok(exact);
        }

        let mut matches = self
            .projects
            .iter()
            .filter(|p| !prefix.is_empty() && p.id.as_str().starts_with(prefix));

        match (matches.next(), matches.count()) {
            (Some(project), 0) => Ok(project),
            (Some(_), rest) => Err(ProjectLookupError::Ambiguous {
                prefix: prefix.to_string(),
                matches: rest + 1,
            }),
            (None, _) => Err(ProjectLookupError::NotFound {
                prefix: prefix.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn project(id: &str, hour: u32) -> Project {
        Project::new(ProjectId::from(id), format!("p-{id}"), None, at(hour))
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let json = serde_json::to_value(project("a", 9)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("targetRow"));
        assert!(!obj.contains_key("memo"));
        assert!(!obj.contains_key("completedAt"));
        assert_eq!(obj["currentRow"], 0);
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn zero_or_null_target_reads_as_none() {
        let base = r#""id":"x","name":"Hat","currentRow":2,"createdAt":"2024-03-01T09:00:00Z","updatedAt":"2024-03-01T09:00:00Z""#;
        let zero: Project = serde_json::from_str(&format!("{{{base},\"targetRow\":0}}")).unwrap();
        let null: Project = serde_json::from_str(&format!("{{{base},\"targetRow\":null}}")).unwrap();
        assert_eq!(zero.target_row, None);
        assert_eq!(null.target_row, None);
    }

    #[test]
    fn remaining_and_progress_follow_target() {
        let mut p = project("a", 9);
        assert_eq!(p.remaining_rows(), None);
        assert_eq!(p.progress_percent(), None);

        p.target_row = NonZeroU32::new(8);
        p.current_row = 2;
        assert_eq!(p.remaining_rows(), Some(6));
        assert_eq!(p.progress_percent(), Some(25.0));

        p.current_row = 12;
        assert_eq!(p.remaining_rows(), Some(0));
        assert_eq!(p.progress_percent(), Some(100.0));
    }

    #[test]
    fn normalize_drops_duplicate_ids() {
        let state = ProjectsState {
            projects: vec![project("a", 9), project("a", 10), project("b", 11)],
        }
        .normalize();
        assert_eq!(state.len(), 2);
        assert_eq!(state.projects[0].created_at, at(9));
    }

    #[test]
    fn by_recent_activity_sorts_descending() {
        let state = ProjectsState {
            projects: vec![project("a", 9), project("b", 12), project("c", 10)],
        };
        let ids: Vec<_> = state
            .by_recent_activity()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn resolve_prefix_cases() {
        let state = ProjectsState {
            projects: vec![project("abc", 9), project("abd", 9), project("ab", 9)],
        };
        assert_eq!(state.resolve_prefix("abc").unwrap().id.as_str(), "abc");
        assert_eq!(state.resolve_prefix("ab").unwrap().id.as_str(), "ab");
        assert_eq!(
            state.resolve_prefix("a"),
            Err(ProjectLookupError::Ambiguous {
                prefix: "a".to_string(),
                matches: 3
            })
        );
        assert!(matches!(
            state.resolve_prefix("z"),
            Err(ProjectLookupError::NotFound { .. })
        ));
        assert!(matches!(
            state.resolve_prefix(""),
            Err(ProjectLookupError::NotFound { .. })
        ));
    }

    #[test]
    fn patch_builder_and_apply() {
        let mut p = project("a", 9);
        assert!(ProjectPatch::new().is_empty());
        ProjectPatch::new()
            .name("Mittens")
            .memo(Some("use 4mm".to_string()))
            .target_row(NonZeroU32::new(40))
            .apply_to(&mut p);
        assert_eq!(p.name, "Mittens");
        assert_eq!(p.memo.as_deref(), Some("use 4mm"));
        assert_eq!(p.target_row, NonZeroU32::new(40));

        ProjectPatch::new().memo(None).apply_to(&mut p);
        assert_eq!(p.memo, None);
        assert_eq!(p.name, "Mittens");
    }
}
