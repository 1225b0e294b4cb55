//! Favorite store: the set of chart symbols the user starred.

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::FavoriteIntent;
pub use reducer::FavoriteReducer;
pub use state::FavoritesState;
pub use store::FavoriteStore;
