//! Success/failure envelope for external-I/O operations.
//!
//! Every fallible call against an external collaborator (TMDB, Slack) returns an
//! [`Outcome`] instead of bubbling an error type up through the shell. Callers
//! branch on the variant before reading the payload. Internal pure computations
//! (command parsing, query compiling) never use it.

/// Result of a call to an external collaborator.
///
/// # Variants
///
/// * `Success` - The call completed and carries its payload.
/// * `Failure` - The call failed; `error` holds the underlying error rendered as
///   text, `message` optionally identifies which call failed and with what inputs.
///
/// # Examples
///
/// ```
/// let outcome = Outcome::success(42);
/// match outcome {
///     Outcome::Success { data } => assert_eq!(data, 42),
///     Outcome::Failure { .. } => panic!("expected success"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation completed with a payload
    Success {
        /// Payload of the successful call
        data: T,
    },
    /// The operation failed
    Failure {
        /// Underlying error rendered as text
        error: String,
        /// Optional human-readable context identifying the failing call
        message: Option<String>,
    },
}

impl<T> Outcome<T> {
    /// Wraps a payload in a successful outcome.
    pub fn success(data: T) -> Self {
        Outcome::Success { data }
    }

    /// Builds a failed outcome from an error and an optional context message.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error, rendered as text
    /// * `message` - Context identifying the failing call, if any
    pub fn failure(error: impl Into<String>, message: Option<String>) -> Self {
        Outcome::Failure {
            error: error.into(),
            message,
        }
    }

    /// Returns `true` for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}
