use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mvi::StoreState;

use super::catalog::{builtin_catalog, AchievementDef};

/// Unlock condition of an achievement.
///
/// Persisted as `{"type": "total_rows", "value": 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementCondition {
    /// Cumulative rows knitted across all projects.
    TotalRows {
        #[serde(rename = "value")]
        threshold: u32,
    },
    /// Cumulative projects credited.
    ProjectCount {
        #[serde(rename = "value")]
        threshold: u32,
    },
}

impl AchievementCondition {
    pub fn threshold(&self) -> u32 {
        match self {
            Self::TotalRows { threshold } | Self::ProjectCount { threshold } => *threshold,
        }
    }

    /// The counter this condition is measured against.
    pub fn current(&self, progress: &AchievementProgress) -> u32 {
        match self {
            Self::TotalRows { .. } => progress.total_rows,
            Self::ProjectCount { .. } => progress.project_count,
        }
    }

    pub fn is_met(&self, progress: &AchievementProgress) -> bool {
        self.current(progress) >= self.threshold()
    }

    /// Unit label used when rendering progress.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::TotalRows { .. } => "段",
            Self::ProjectCount { .. } => "個",
        }
    }
}

/// Cumulative counters. Neither ever decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub project_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub condition: AchievementCondition,
    #[serde(default)]
    pub unlocked: bool,
    /// Set exactly once, when `unlocked` flips to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Locked achievement built from its catalog definition.
    pub fn from_def(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.to_string(),
            icon: def.icon.to_string(),
            condition: def.condition,
            unlocked: false,
            unlocked_at: None,
        }
    }
}

/// How far the counters are toward one achievement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionProgress {
    /// Current counter value, capped at the threshold.
    pub current: u32,
    pub threshold: u32,
    /// 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementsState {
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub progress: AchievementProgress,
}

impl Default for AchievementsState {
    fn default() -> Self {
        Self {
            achievements: builtin_catalog().iter().map(Achievement::from_def).collect(),
            progress: AchievementProgress::default(),
        }
    }
}

impl StoreState for AchievementsState {
    const STORAGE_KEY: &'static str = "achievement-storage";

    /// Rebuild the list from the shipped catalog, carrying over unlock state
    /// by id. Catalog text always wins; ids the catalog no longer knows are
    /// dropped.
    fn normalize(self) -> Self {
        let achievements = builtin_catalog()
            .iter()
            .map(|def| {
                let mut achievement = Achievement::from_def(def);
                if let Some(stored) = self
                    .achievements
                    .iter()
                    .find(|a| a.id == def.id && a.unlocked)
                {
                    achievement.unlocked = true;
                    achievement.unlocked_at = stored.unlocked_at;
                }
                achievement
            })
            .collect();

        Self {
            achievements,
            progress: self.progress,
        }
    }
}

impl AchievementsState {
    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    /// Share of unlocked achievements, rounded to a whole percent.
    pub fn completion_percent(&self) -> u32 {
        if self.achievements.is_empty() {
            return 0;
        }
        let ratio = self.unlocked_count() as f64 / self.achievements.len() as f64;
        (ratio * 100.0).round() as u32
    }

    pub fn progress_for(&self, achievement: &Achievement) -> ConditionProgress {
        let threshold = achievement.condition.threshold();
        let current = achievement.condition.current(&self.progress);
        let percent = if threshold == 0 {
            100.0
        } else {
            (f64::from(current) / f64::from(threshold) * 100.0).min(100.0)
        };
        ConditionProgress {
            current: current.min(threshold),
            threshold,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_uses_type_and_value_keys() {
        let json = serde_json::to_string(&AchievementCondition::TotalRows { threshold: 10 }).unwrap();
        assert_eq!(json, r#"{"type":"total_rows","value":10}"#);

        let parsed: AchievementCondition =
            serde_json::from_str(r#"{"type":"project_count","value":3}"#).unwrap();
        assert_eq!(parsed, AchievementCondition::ProjectCount { threshold: 3 });
    }

    #[test]
    fn unknown_condition_type_is_rejected() {
        let parsed = serde_json::from_str::<AchievementCondition>(r#"{"type":"streak","value":3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn default_state_is_locked_catalog() {
        let state = AchievementsState::default();
        assert_eq!(state.achievements.len(), 10);
        assert_eq!(state.unlocked_count(), 0);
        assert_eq!(state.progress, AchievementProgress::default());
    }

    #[test]
    fn locked_achievement_omits_unlocked_at() {
        let json = serde_json::to_value(&AchievementsState::default().achievements[0]).unwrap();
        assert!(json.get("unlockedAt").is_none());
        assert_eq!(json["unlocked"], false);
    }

    #[test]
    fn normalize_keeps_unlocks_and_refreshes_text() {
        let mut stored = AchievementsState::default();
        stored.achievements[1].unlocked = true;
        stored.achievements[1].unlocked_at = Some(Utc::now());
        stored.achievements[1].title = "old title".to_string();
        stored.achievements.remove(5);
        stored.achievements.push(Achievement {
            id: "legacy".to_string(),
            ..stored.achievements[0].clone()
        });
        stored.progress.total_rows = 12;

        let merged = stored.clone().normalize();
        assert_eq!(merged.achievements.len(), 10);
        assert!(merged.get("legacy").is_none());
        let second = merged.get("2").unwrap();
        assert!(second.unlocked);
        assert_eq!(second.title, "10段達成");
        assert_eq!(second.unlocked_at, stored.achievements[1].unlocked_at);
        assert!(!merged.get("6").unwrap().unlocked);
        assert_eq!(merged.progress.total_rows, 12);
    }

    #[test]
    fn progress_for_caps_at_threshold() {
        let mut state = AchievementsState::default();
        state.progress.total_rows = 75;
        let fifty = state.get("3").unwrap().clone();
        let hundred = state.get("4").unwrap().clone();

        let p = state.progress_for(&fifty);
        assert_eq!((p.current, p.threshold), (50, 50));
        assert_eq!(p.percent, 100.0);

        let p = state.progress_for(&hundred);
        assert_eq!((p.current, p.threshold), (75, 100));
        assert_eq!(p.percent, 75.0);
    }

    #[test]
    fn completion_percent_rounds() {
        let mut state = AchievementsState::default();
        for a in state.achievements.iter_mut().take(3) {
            a.unlocked = true;
        }
        assert_eq!(state.completion_percent(), 30);
    }
}
