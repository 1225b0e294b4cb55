use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::mvi::StoreState;

/// Starred symbol ids, in the order they were starred.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesState {
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl StoreState for FavoritesState {
    const STORAGE_KEY: &'static str = "knitting-favorites";

    fn normalize(mut self) -> Self {
        let mut seen = HashSet::new();
        self.favorites.retain(|id| seen.insert(id.clone()));
        self
    }
}

impl FavoritesState {
    /// Exact-match membership test.
    pub fn contains(&self, symbol_id: &str) -> bool {
        self.favorites.iter().any(|f| f == symbol_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }
}
