//! Slash-command parsing and response formatting.
//!
//! This module turns the free text of a `/madmovie` slash command into either a
//! short-circuit [`Directive`] (help or list output, no catalog query) or an
//! ordered list of [`Preference`] filters that the query compiler translates
//! into TMDB parameters.
//!
//! # Flow
//!
//! ```text
//! command text → parse() → ParsedCommand
//!                             ├── directive: Some(..)  → shell renders the text, done
//!                             └── preferences: [..]    → QueryCompiler → RandomSelector
//! ```
//!
//! Parsing is pure: it never posts to Slack itself. The shell executes whatever
//! directive comes back, which keeps the parser testable without a live chat
//! collaborator.

pub mod command;
pub mod markdown_response;

pub use command::parse;

/// One user-specified filter constraint.
///
/// A preference names a dimension (`filter`), how multiple values combine
/// (`match_type`) and the literal user-supplied values, case preserved.
///
/// # Invariants
///
/// `values` is never empty, and `filter`/`match_type` are never blank: the
/// parser applies the `genre`/`any` defaults instead of leaving holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    /// Filter dimension, e.g. `genre`
    pub filter: String,
    /// Combination semantics: `any`, `all`, `any!` or `all!`
    pub match_type: String,
    /// User-supplied values in the order they were typed, duplicates preserved
    pub values: Vec<String>,
}

/// Outcome of parsing one slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Set when the command is fully handled without a catalog query
    pub directive: Option<Directive>,
    /// Filters to compile into the catalog query, left-to-right
    pub preferences: Vec<Preference>,
}

impl ParsedCommand {
    /// Whether the shell should go on and query the catalog.
    ///
    /// `false` means the parser fully resolved the command (help/list) and the
    /// shell only has to render the directive.
    pub fn should_continue(&self) -> bool {
        self.directive.is_none()
    }
}

/// A parser outcome that resolves the command without querying the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Show the command help
    Help,
    /// Show one of the informational listings
    List(ListTopic),
}

/// Sub-topics of the `list` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTopic {
    /// Known genre names
    Genres,
    /// Supported filter dimensions
    Filters,
    /// Supported match types
    MatchTypes,
    /// Supported commands
    Commands,
    /// Anything else after `list`, kept for the error message
    Unknown(String),
}
