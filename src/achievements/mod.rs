//! Achievement store: a fixed catalog of milestones unlocked by cumulative
//! progress counters.

mod catalog;
mod intent;
mod reducer;
mod state;
mod store;

pub use catalog::{builtin_catalog, AchievementDef};
pub use intent::AchievementIntent;
pub use reducer::AchievementReducer;
pub use state::{
    Achievement, AchievementCondition, AchievementProgress, AchievementsState, ConditionProgress,
};
pub use store::AchievementStore;
