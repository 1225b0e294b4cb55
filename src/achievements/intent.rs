use crate::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementIntent {
    /// Re-evaluate every locked achievement against the current progress.
    Check,
    /// Credit rows just knitted, then check.
    IncrementTotalRows { rows: u32 },
    /// Credit one more project, then check.
    IncrementProjectCount,
}

impl Intent for AchievementIntent {}
