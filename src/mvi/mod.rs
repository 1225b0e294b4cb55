//! State/intent/reducer primitives shared by every persisted store.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Storage
//!    ↑                     │
//!    └──── UI snapshot ────┘
//! ```
//!
//! - **State**: Immutable snapshot of one store, serialized verbatim
//! - **Intent**: A mutation request coming from the UI layer
//! - **Reducer**: Function that derives the next snapshot from the current one

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;
