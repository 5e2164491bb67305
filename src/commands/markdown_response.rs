//! Markdown response formatters for bot commands.
//!
//! This module provides functions to format bot responses in Slack-flavored
//! Markdown. The shell posts whatever these return; nothing here talks to
//! Slack itself.

use crate::commands::{Directive, ListTopic};
use crate::tmdb::genres::GENRES;

/// Formats the help message showing the command syntax.
///
/// # Returns
///
/// A Markdown-formatted string containing the help message.
///
/// # Examples
///
/// ```
/// let help = format_help();
/// assert!(help.contains("Usage"));
/// ```
pub fn format_help() -> String {
    let body = "Usage: `/madmovie [preference ...]`\n\
        - no preference: a random well-rated movie\n\
        - `<genre>`: a random movie of that genre, e.g. `/madmovie horror`\n\
        - `<filter>[:<match_type>]=<value>[|<value>...]`: a filtered pick, \
        e.g. `/madmovie genre:all=action|comedy`\n\
        - `list genres|filters|matchtypes|commands`: show what is available\n\
        - `help`: show this help message\n\n\
        > *madmovie* is a free open source movie suggestion bot. Source code is available on [Github](https://github.com/madltd/madmovie).";

    body.to_owned()
}

/// Formats the response for a list directive.
///
/// Dispatches on the requested [`ListTopic`].
///
/// # Arguments
///
/// * `topic` - The listing the user asked for
pub fn format_list(topic: &ListTopic) -> String {
    match topic {
        ListTopic::Genres => format_genres(),
        ListTopic::Filters => format_filters(),
        ListTopic::MatchTypes => format_match_types(),
        ListTopic::Commands => format_commands(),
        ListTopic::Unknown(topic) => format_unknown_topic(topic),
    }
}

/// Formats the text of a [`Directive`].
pub fn format_directive(directive: &Directive) -> String {
    match directive {
        Directive::Help => format_help(),
        Directive::List(topic) => format_list(topic),
    }
}

/// Formats the list of known genre names.
///
/// # Examples
///
/// ```
/// let genres = format_genres();
/// assert!(genres.contains("Horror"));
/// ```
pub fn format_genres() -> String {
    let names = GENRES
        .iter()
        .map(|genre| genre.name)
        .collect::<Vec<&str>>()
        .join(", ");

    format!("Genres: {}", names)
}

/// Formats the list of supported filters.
pub fn format_filters() -> String {
    "Filters:\n- `genre`: filter by genre name, see `list genres`".to_owned()
}

/// Formats the list of supported match types.
pub fn format_match_types() -> String {
    "Match types:\n\
        - `any`: at least one of the values matches (default)\n\
        - `all`: every value matches\n\
        - `any!`: none of the values matches\n\
        - `all!`: not all of the values match together"
        .to_owned()
}

/// Formats the list of supported commands.
pub fn format_commands() -> String {
    "Commands: `help`, `list genres`, `list filters`, `list matchtypes`, `list commands`"
        .to_owned()
}

/// Formats a response for an unknown list topic.
///
/// # Arguments
///
/// * `topic` - The topic the user asked for
pub fn format_unknown_topic(topic: &str) -> String {
    format!(
        "Unknown topic '{}'. Try `list genres`, `list filters`, `list matchtypes` or `list commands`.",
        topic
    )
}

/// Formats the placeholder posted while the catalog is queried.
pub fn format_fetching() -> String {
    "Fetching a mad movie for you...".to_owned()
}

/// Formats the apology shown when the catalog query fails.
///
/// The underlying error is logged by the shell, never shown to the user.
pub fn format_apology() -> String {
    "Sorry, no movie this time. The catalog did not answer, try again in a moment.".to_owned()
}
