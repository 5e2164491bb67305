//! Slash-command text parsing.
//!
//! This module converts the raw text of a slash command into a
//! [`ParsedCommand`]. Parsing is best-effort and never fails: malformed tokens
//! degrade into whatever [`Preference`] fields could be extracted instead of
//! aborting the whole command.

use log::debug;

use crate::commands::{Directive, ListTopic, ParsedCommand, Preference};

/// Filter applied when a token names no filter of its own.
pub const DEFAULT_FILTER: &str = "genre";
/// Match type applied when a filter spec names no match type.
pub const DEFAULT_MATCH_TYPE: &str = "any";

/// First tokens treated as a request for help, case-sensitive.
///
/// Includes the misspellings users actually type.
const HELP_ALIASES: [&str; 7] = ["help", "h", "--help", "-h", "-help", "hepl", "halp"];

/// First tokens treated as a request for one of the listings, case-sensitive.
const LIST_ALIASES: [&str; 5] = ["list", "l", "--list", "-l", "-list"];

/// Parses slash-command text into a [`ParsedCommand`].
///
/// The parser is pure with respect to catalog and chat state: help and list
/// requests come back as a [`Directive`] for the shell to render, they are not
/// posted from here.
///
/// # Grammar
///
/// ```text
/// command     := directive | preference_list
/// directive   := help_alias | list_alias list_topic?
/// preference_list := preference (SPACE preference)*
/// preference  := literal_value | filterspec '=' values
/// filterspec  := filter_name (':' match_type)?
/// values      := value ('|' value)*
/// ```
///
/// Empty text means "no filters": the shell runs a default random query.
///
/// # Arguments
///
/// * `text` - Raw command text, without the `/madmovie` trigger (Slack strips it)
///
/// # Examples
///
/// ```
/// let parsed = parse("genre:all=action|comedy");
/// assert!(parsed.should_continue());
/// assert_eq!(parsed.preferences[0].match_type, "all");
/// ```
pub fn parse(text: &str) -> ParsedCommand {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.is_empty() {
        return ParsedCommand {
            directive: None,
            preferences: vec![],
        };
    }

    if HELP_ALIASES.contains(&tokens[0]) {
        debug!("help directive from token {:?}", tokens[0]);
        return ParsedCommand {
            directive: Some(Directive::Help),
            preferences: vec![],
        };
    }

    if LIST_ALIASES.contains(&tokens[0]) {
        let topic = match tokens.get(1).copied() {
            Some("genres") => ListTopic::Genres,
            Some("filters") => ListTopic::Filters,
            Some("matchtypes") => ListTopic::MatchTypes,
            Some("commands") | None => ListTopic::Commands,
            Some(other) => ListTopic::Unknown(other.to_string()),
        };
        debug!("list directive with topic {:?}", topic);
        return ParsedCommand {
            directive: Some(Directive::List(topic)),
            preferences: vec![],
        };
    }

    // Every remaining token is an independent preference, left-to-right. No
    // merging across tokens with the same filter name, the compiler combines
    // them.
    let preferences = tokens.iter().map(|token| parse_preference(token)).collect();

    ParsedCommand {
        directive: None,
        preferences,
    }
}

/// Parses one whitespace-separated token into a [`Preference`].
///
/// A token without `=` is a single literal genre value with the `any` match
/// type. Otherwise the text left of the first `=` is the filter spec and the
/// values are the *second* `=`-segment only: anything after a second `=` is
/// dropped. That mirrors the historical behavior and is kept on purpose.
fn parse_preference(token: &str) -> Preference {
    if !token.contains('=') {
        return Preference {
            filter: DEFAULT_FILTER.to_string(),
            match_type: DEFAULT_MATCH_TYPE.to_string(),
            values: vec![token.to_string()],
        };
    }

    let mut segments = token.split('=');
    let filter_spec = segments.next().unwrap_or_default();
    let raw_values = segments.next().unwrap_or_default();

    let (filter, match_type) = match filter_spec.split_once(':') {
        Some((name, match_type)) => (name, match_type),
        None => (filter_spec, DEFAULT_MATCH_TYPE),
    };

    let preference = Preference {
        // Blank pieces fall back to the defaults, they are never left empty
        filter: match filter.is_empty() {
            true => DEFAULT_FILTER.to_string(),
            false => filter.to_string(),
        },
        match_type: match match_type.is_empty() {
            true => DEFAULT_MATCH_TYPE.to_string(),
            false => match_type.to_string(),
        },
        values: raw_values.split('|').map(str::to_string).collect(),
    };

    debug!("parsed token {:?} -> {:?}", token, preference);

    preference
}
