use crate::store::{Committed, Store};

use super::intent::FavoriteIntent;
use super::reducer::FavoriteReducer;

pub type FavoriteStore = Store<FavoriteReducer>;

impl Store<FavoriteReducer> {
    /// Flip membership of `symbol_id`. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, symbol_id: &str) -> Committed<bool> {
        self.dispatch(FavoriteIntent::Toggle {
            symbol_id: symbol_id.to_string(),
        })
    }

    pub fn is_favorite(&self, symbol_id: &str) -> bool {
        self.state().contains(symbol_id)
    }
}
