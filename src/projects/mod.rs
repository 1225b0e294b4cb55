//! Project store: knitting projects and their row counters.

mod error;
mod intent;
mod reducer;
mod state;
mod store;

pub use error::ProjectLookupError;
pub use intent::ProjectIntent;
pub use reducer::{ProjectChange, ProjectReducer};
pub use state::{Project, ProjectId, ProjectPatch, ProjectsState};
pub use store::ProjectStore;
