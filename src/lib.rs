//! Row counting for knitting projects.
//!
//! Three small persisted stores (projects, achievements, favorite symbols)
//! built on one reducer/store pattern, plus the [`knitbook::Knitbook`]
//! context that composes them the way the app uses them.

pub mod achievements;
pub mod clock;
pub mod config;
pub mod favorites;
pub mod knitbook;
pub mod logging;
pub mod mvi;
pub mod projects;
pub mod storage;
pub mod store;

pub use knitbook::{Knitbook, KnitbookError, RowKnitted};
pub use store::{Committed, Store};
