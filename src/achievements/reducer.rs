//! Reducer for achievements and their progress counters.

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::mvi::Reducer;

use super::intent::AchievementIntent;
use super::state::{Achievement, AchievementsState};

/// Reducer for the achievement store.
///
/// Every intent ends with the same scan over all locked achievements, so a
/// counter that jumps past several thresholds unlocks all of them at once.
/// Unlocking is one-way: nothing here ever re-locks an achievement.
pub struct AchievementReducer;

impl Reducer for AchievementReducer {
    type State = AchievementsState;
    type Intent = AchievementIntent;
    /// Achievements unlocked by this intent, in catalog order.
    type Output = Vec<Achievement>;

    fn reduce(
        state: &Self::State,
        intent: Self::Intent,
        clock: &dyn Clock,
    ) -> (Self::State, Self::Output) {
        let mut progress = state.progress;
        match intent {
            AchievementIntent::Check => {}
            AchievementIntent::IncrementTotalRows { rows } => {
                progress.total_rows = progress.total_rows.saturating_add(rows);
            }
            AchievementIntent::IncrementProjectCount => {
                progress.project_count = progress.project_count.saturating_add(1);
            }
        }

        let next = AchievementsState {
            achievements: state.achievements.clone(),
            progress,
        };
        check(next, clock)
    }
}

/// Unlock every locked achievement whose condition holds for `state.progress`.
///
/// Stamps within one batch are strictly increasing even if the clock does
/// not move between reads.
fn check(state: AchievementsState, clock: &dyn Clock) -> (AchievementsState, Vec<Achievement>) {
    let progress = state.progress;
    let mut newly_unlocked = Vec::new();
    let mut last_stamp: Option<DateTime<Utc>> = None;

    let achievements = state
        .achievements
        .into_iter()
        .map(|achievement| {
            if achievement.unlocked || !achievement.condition.is_met(&progress) {
                return achievement;
            }

            let mut stamp = clock.now();
            if let Some(prev) = last_stamp {
                if stamp <= prev {
                    stamp = prev + Duration::microseconds(1);
                }
            }
            last_stamp = Some(stamp);

            let unlocked = Achievement {
                unlocked: true,
                unlocked_at: Some(stamp),
                ..achievement
            };
            newly_unlocked.push(unlocked.clone());
            unlocked
        })
        .collect();

    (
        AchievementsState {
            achievements,
            progress,
        },
        newly_unlocked,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::TimeZone;

    fn frozen() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap())
    }

    fn ids(list: &[Achievement]) -> Vec<&str> {
        list.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn check_on_fresh_state_unlocks_nothing() {
        let clock = frozen();
        let state = AchievementsState::default();
        let (next, unlocked) = AchievementReducer::reduce(&state, AchievementIntent::Check, &clock);
        assert!(unlocked.is_empty());
        assert_eq!(next, state);
    }

    #[test]
    fn first_project_unlocks_debut() {
        let clock = frozen();
        let (next, unlocked) = AchievementReducer::reduce(
            &AchievementsState::default(),
            AchievementIntent::IncrementProjectCount,
            &clock,
        );
        assert_eq!(ids(&unlocked), vec!["1"]);
        assert_eq!(next.progress.project_count, 1);
        assert!(next.get("1").unwrap().unlocked);
    }

    #[test]
    fn jump_unlocks_every_crossed_threshold_in_catalog_order() {
        let clock = frozen();
        let (next, unlocked) = AchievementReducer::reduce(
            &AchievementsState::default(),
            AchievementIntent::IncrementTotalRows { rows: 150 },
            &clock,
        );
        assert_eq!(ids(&unlocked), vec!["2", "3", "4"]);
        assert_eq!(next.unlocked_count(), 3);

        let stamps: Vec<_> = unlocked.iter().map(|a| a.unlocked_at.unwrap()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn already_unlocked_are_not_reported_again() {
        let clock = frozen();
        let (state, _) = AchievementReducer::reduce(
            &AchievementsState::default(),
            AchievementIntent::IncrementTotalRows { rows: 10 },
            &clock,
        );
        let first_stamp = state.get("2").unwrap().unlocked_at;

        let (next, unlocked) = AchievementReducer::reduce(
            &state,
            AchievementIntent::IncrementTotalRows { rows: 5 },
            &clock,
        );
        assert!(unlocked.is_empty());
        assert_eq!(next.get("2").unwrap().unlocked_at, first_stamp);
        assert_eq!(next.progress.total_rows, 15);
    }

    #[test]
    fn stale_progress_is_caught_up_by_check() {
        let clock = frozen();
        let mut state = AchievementsState::default();
        state.progress.total_rows = 600;
        state.progress.project_count = 4;

        let (_, unlocked) = AchievementReducer::reduce(&state, AchievementIntent::Check, &clock);
        assert_eq!(ids(&unlocked), vec!["1", "2", "3", "4", "5", "7"]);
    }

    #[test]
    fn counters_saturate() {
        let clock = frozen();
        let mut state = AchievementsState::default();
        state.progress.total_rows = u32::MAX - 1;
        let (next, _) = AchievementReducer::reduce(
            &state,
            AchievementIntent::IncrementTotalRows { rows: 10 },
            &clock,
        );
        assert_eq!(next.progress.total_rows, u32::MAX);
    }
}
