//! Compilation of user preferences into TMDB `discover/movie` parameters.
//!
//! This module owns the baseline quality thresholds of every discover query and
//! the translation of [`Preference`] lists into `with_genres`/`without_genres`
//! parameters. Compilation is pure: the same preferences always yield the same
//! parameter map, and the page parameter is deliberately absent here (the
//! selector owns pagination).

use std::collections::BTreeMap;

use log::debug;

use crate::commands::Preference;
use crate::tmdb::genres;

/// Minimum average rating of suggested movies.
pub const MIN_VOTE_AVERAGE: &str = "5.5";
/// Minimum vote count behind the rating, filters out obscure entries.
pub const MIN_VOTE_COUNT: &str = "20";
/// Oldest accepted release date.
pub const MIN_RELEASE_DATE: &str = "1990-01-01";
/// Sort order of the discover query.
pub const SORT_BY: &str = "vote_average.desc";

/// TMDB parameter holding included genre ids.
pub const PARAM_WITH_GENRES: &str = "with_genres";
/// TMDB parameter holding excluded genre ids.
pub const PARAM_WITHOUT_GENRES: &str = "without_genres";

/// Compiles preferences into a `discover/movie` parameter map.
///
/// Starts from the fixed baseline (language, rating, vote count, release date,
/// sort order) and folds every `genre` preference in, left to right. Unknown
/// filters are ignored so that new dimensions can be introduced without
/// breaking old clients, and unresolvable genre names are silently dropped.
///
/// # Match types
///
/// * `any` - ids joined with `|` (TMDB OR). When a previous preference already
///   wrote `with_genres`, the new ids are appended after a comma instead of
///   replacing the value. This asymmetry is historical and kept as-is.
/// * `all` - ids joined with `,` (TMDB AND), replacing any previous inclusion.
/// * `any!` / `all!` - same joins, written to `without_genres`.
/// * anything else - treated as `any`.
///
/// # Arguments
///
/// * `preferences` - Parsed preferences in the order they were typed
///
/// # Examples
///
/// ```
/// let preferences = vec![Preference {
///     filter: "genre".to_string(),
///     match_type: "all".to_string(),
///     values: vec!["action".to_string(), "comedy".to_string()],
/// }];
/// let params = compile(&preferences);
/// assert_eq!(params["with_genres"], "28,35");
/// ```
pub fn compile(preferences: &[Preference]) -> BTreeMap<String, String> {
    let mut params = baseline_params();

    for preference in preferences {
        if preference.filter != "genre" {
            debug!("ignoring preference with filter {:?}", preference.filter);
            continue;
        }

        // Unresolvable names are dropped, not errored: the joined list may
        // legitimately end up empty.
        let ids: Vec<String> = preference
            .values
            .iter()
            .filter_map(|name| genres::id_by_name(name))
            .map(|id| id.to_string())
            .collect();

        match preference.match_type.as_str() {
            "all" => {
                params.insert(PARAM_WITH_GENRES.to_string(), ids.join(","));
            }
            "any!" => {
                params.insert(PARAM_WITHOUT_GENRES.to_string(), ids.join("|"));
            }
            "all!" => {
                params.insert(PARAM_WITHOUT_GENRES.to_string(), ids.join(","));
            }
            // "any" and every unrecognized match type
            _ => {
                let joined = ids.join("|");
                match params.get_mut(PARAM_WITH_GENRES) {
                    // Historical asymmetry: across preferences the accumulation
                    // is comma-separated even though values within one
                    // preference are pipe-separated.
                    Some(existing) => {
                        existing.push(',');
                        existing.push_str(&joined);
                    }
                    None => {
                        params.insert(PARAM_WITH_GENRES.to_string(), joined);
                    }
                }
            }
        }
    }

    debug!("compiled {} preference(s) -> {:?}", preferences.len(), params);

    params
}

/// Baseline parameters of every discover query.
fn baseline_params() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("language".to_string(), "en-US".to_string()),
        ("vote_average.gte".to_string(), MIN_VOTE_AVERAGE.to_string()),
        ("vote_count.gte".to_string(), MIN_VOTE_COUNT.to_string()),
        ("release_date.gte".to_string(), MIN_RELEASE_DATE.to_string()),
        ("sort_by".to_string(), SORT_BY.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;

    fn genre_preference(match_type: &str, values: &[&str]) -> Preference {
        Preference {
            filter: "genre".to_string(),
            match_type: match_type.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_compile_no_preferences_is_baseline() {
        let params = compile(&[]);
        assert_eq!(params["language"], "en-US");
        assert_eq!(params["vote_average.gte"], "5.5");
        assert_eq!(params["vote_count.gte"], "20");
        assert_eq!(params["release_date.gte"], "1990-01-01");
        assert_eq!(params["sort_by"], "vote_average.desc");
        assert!(!params.contains_key("page"));
        assert!(!params.contains_key(PARAM_WITH_GENRES));
    }

    #[test]
    fn test_compile_any_joins_with_pipe() {
        let params = compile(&[genre_preference("any", &["thriller", "crime"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "53|80");
    }

    #[test]
    fn test_compile_all_joins_with_comma() {
        let params = compile(&[genre_preference("all", &["action", "comedy"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "28,35");
    }

    #[test]
    fn test_compile_any_negated_excludes_with_pipe() {
        let params = compile(&[genre_preference("any!", &["horror"])]);
        assert_eq!(params[PARAM_WITHOUT_GENRES], "27");
        assert!(!params.contains_key(PARAM_WITH_GENRES));
    }

    #[test]
    fn test_compile_all_negated_excludes_with_comma() {
        let params = compile(&[genre_preference("all!", &["war", "western"])]);
        assert_eq!(params[PARAM_WITHOUT_GENRES], "10752,37");
    }

    #[test]
    fn test_compile_unrecognized_match_type_falls_back_to_any() {
        let params = compile(&[genre_preference("some", &["drama", "crime"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "18|80");
    }

    #[test]
    fn test_compile_unknown_genre_writes_empty_inclusion() {
        // Not an error: the unknown name is dropped and the parameter is empty
        let params = compile(&[genre_preference("any", &["not-a-genre"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "");
    }

    #[test]
    fn test_compile_mixed_known_and_unknown_genres() {
        let params = compile(&[genre_preference("any", &["action", "nope", "comedy"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "28|35");
    }

    #[test]
    fn test_compile_genre_resolution_is_case_insensitive() {
        let params = compile(&[genre_preference("all", &["ACTION", "CoMeDy"])]);
        assert_eq!(params[PARAM_WITH_GENRES], "28,35");
    }

    #[test]
    fn test_compile_any_accumulates_with_comma_across_preferences() {
        // Historical asymmetry: pipe within one preference, comma across them
        let params = compile(&[
            genre_preference("any", &["action", "comedy"]),
            genre_preference("any", &["drama"]),
        ]);
        assert_eq!(params[PARAM_WITH_GENRES], "28|35,18");
    }

    #[test]
    fn test_compile_all_replaces_prior_inclusion() {
        let params = compile(&[
            genre_preference("any", &["action"]),
            genre_preference("all", &["drama", "crime"]),
        ]);
        assert_eq!(params[PARAM_WITH_GENRES], "18,80");
    }

    #[test]
    fn test_compile_ignores_unknown_filter() {
        let preference = Preference {
            filter: "decade".to_string(),
            match_type: "any".to_string(),
            values: vec!["1990".to_string()],
        };
        let params = compile(&[preference]);
        assert_eq!(params, compile(&[]));
    }

    #[test]
    fn test_compile_is_idempotent() {
        let preferences = vec![
            genre_preference("any", &["thriller", "crime"]),
            genre_preference("any!", &["horror"]),
        ];
        assert_eq!(compile(&preferences), compile(&preferences));
    }

    #[test]
    fn test_compile_parsed_command_end_to_end() {
        let parsed = parse("genre:any=thriller|crime");
        assert!(parsed.should_continue());
        let params = compile(&parsed.preferences);
        assert_eq!(params[PARAM_WITH_GENRES], "53|80");
        assert_eq!(params["sort_by"], "vote_average.desc");
    }
}
