/// All domain errors for auditrail.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum AuditrailError {
    #[error(
        "Invalid relation '{path}': '{entity_type}' has no relation '{field}'\n\n  \
         Every component of a dotted relation path must name a relational\n  \
         field on the type reached by the previous components."
    )]
    InvalidRelation {
        path: String,
        entity_type: String,
        field: String,
    },

    #[error(
        "Actor context is already active for '{actor}'\n\n  \
         Call end() before beginning a new context. Nested or leaked\n  \
         contexts would misattribute changes."
    )]
    ContextActive { actor: String },

    #[error("Audit store error: {detail}")]
    Persistence { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AuditrailError>;
