//! Failure taxonomy shared by the navigators and the persistence layer.
//! Every operation boundary catches one of these, publishes a human-readable
//! message on the notification channel, and leaves state either untouched or
//! freshly reloaded. Keeping the classes distinct lets callers branch on
//! "fix your input" versus "the store misbehaved" without string matching.

use thiserror::Error;

/// Errors surfaced by record operations. Nothing here is fatal to the
/// process; the navigator reports the message and carries on.
#[derive(Debug, Error)]
pub enum OpError {
    /// A required field was empty or a value failed to parse. The form is
    /// left exactly as the user typed it.
    #[error("{0}")]
    Validation(String),

    /// A display string did not map to a stable identifier. `kind` names the
    /// entity that could not be found so the message pinpoints the field.
    #[error("{kind} \"{name}\" not found")]
    Resolution { kind: &'static str, name: String },

    /// The store rejected a read or write. `context` names the operation
    /// ("adding receipt", "updating reader") so the surfaced message says
    /// what was being attempted.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: rusqlite::Error,
    },
}

impl OpError {
    /// Shorthand for a validation failure with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        OpError::Validation(message.into())
    }

    /// Shorthand for an unresolved display string.
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        OpError::Resolution {
            kind,
            name: name.into(),
        }
    }

    /// True when the failure came from the store itself rather than from
    /// the user's input.
    pub fn is_store(&self) -> bool {
        matches!(self, OpError::Store { .. })
    }
}

/// Extension that attaches an operation label to a raw SQLite error, giving
/// the same ergonomics as the `anyhow::Context` chains used elsewhere while
/// keeping the error typed.
pub trait StoreContext<T> {
    fn store_context(self, context: &str) -> Result<T, OpError>;
}

impl<T> StoreContext<T> for Result<T, rusqlite::Error> {
    fn store_context(self, context: &str) -> Result<T, OpError> {
        self.map_err(|source| OpError::Store {
            context: context.to_string(),
            source,
        })
    }
}
