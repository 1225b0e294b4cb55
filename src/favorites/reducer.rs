use crate::clock::Clock;
use crate::mvi::Reducer;

use super::intent::FavoriteIntent;
use super::state::FavoritesState;

pub struct FavoriteReducer;

impl Reducer for FavoriteReducer {
    type State = FavoritesState;
    type Intent = FavoriteIntent;
    /// Whether the symbol is a favorite after the intent.
    type Output = bool;

    fn reduce(
        state: &Self::State,
        intent: Self::Intent,
        _clock: &dyn Clock,
    ) -> (Self::State, Self::Output) {
        match intent {
            FavoriteIntent::Toggle { symbol_id } => {
                if state.contains(&symbol_id) {
                    let favorites = state
                        .favorites
                        .iter()
                        .filter(|f| **f != symbol_id)
                        .cloned()
                        .collect();
                    (FavoritesState { favorites }, false)
                } else {
                    let mut favorites = state.favorites.clone();
                    favorites.push(symbol_id);
                    (FavoritesState { favorites }, true)
                }
            }
        }
    }
}
