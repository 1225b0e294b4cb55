use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteIntent {
    /// Add the symbol if absent, remove it if present.
    Toggle { symbol_id: String },
}

impl Intent for FavoriteIntent {}
