//! Reducer trait for the store layer.

use super::intent::Intent;
use super::state::StoreState;
use crate::clock::Clock;

/// Reducer derives the next state from the current one.
///
/// The reducer is the only place where state transitions happen. It borrows
/// the current snapshot and returns a new one, never touching the original,
/// together with whatever the caller needs to know about the transition.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Value reported back to the caller (completion flag, unlocked list, ...).
    type Output;

    /// Process an intent and return the new state plus its output.
    ///
    /// Timestamps come from `clock`; no other side effects are allowed.
    fn reduce(
        state: &Self::State,
        intent: Self::Intent,
        clock: &dyn Clock,
    ) -> (Self::State, Self::Output);
}
