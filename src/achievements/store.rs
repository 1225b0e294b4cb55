use crate::store::{Committed, Store};

use super::intent::AchievementIntent;
use super::reducer::AchievementReducer;
use super::state::Achievement;

pub type AchievementStore = Store<AchievementReducer>;

impl Store<AchievementReducer> {
    /// Unlock whatever the current counters already qualify for.
    ///
    /// Idempotent: a second call right after the first returns nothing and
    /// writes nothing.
    pub fn check_achievements(&mut self) -> Committed<Vec<Achievement>> {
        self.run(AchievementIntent::Check)
    }

    /// Add `rows` knitted rows to the lifetime total.
    pub fn increment_total_rows(&mut self, rows: u32) -> Committed<Vec<Achievement>> {
        self.run(AchievementIntent::IncrementTotalRows { rows })
    }

    pub fn increment_project_count(&mut self) -> Committed<Vec<Achievement>> {
        self.run(AchievementIntent::IncrementProjectCount)
    }

    fn run(&mut self, intent: AchievementIntent) -> Committed<Vec<Achievement>> {
        let committed = self.dispatch(intent);
        for achievement in committed.value() {
            tracing::info!(
                achievement = %achievement.id,
                title = %achievement.title,
                "Achievement unlocked"
            );
        }
        committed
    }
}
