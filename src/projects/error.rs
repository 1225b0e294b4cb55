use thiserror::Error;

/// Failure to turn a user-typed id prefix into exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectLookupError {
    #[error("No project matches '{prefix}'")]
    NotFound { prefix: String },

    #[error("'{prefix}' matches {matches} projects, use a longer prefix")]
    Ambiguous { prefix: String, matches: usize },
}
