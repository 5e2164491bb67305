//! Randomized movie selection over the paginated discover catalog.
//!
//! TMDB only exposes page-at-a-time access with a fixed page size and no
//! arbitrary-offset random access, so picking a uniformly random movie takes
//! two round trips: one to learn the number of matching pages, one to fetch a
//! uniformly drawn page and pick a uniformly drawn item from it. The two calls
//! are strictly sequential, the second depends on the first.

use std::collections::BTreeMap;

use log::{debug, info};
use rand::Rng;

use crate::tmdb::outcome::Outcome;
use crate::tmdb::requester::Requester;
use crate::tmdb::response_structs::Movie;

/// Hard cap on addressable discover pages.
///
/// TMDB rejects `page` values above 500 even when `total_pages` reports more.
const MAX_PAGE: u32 = 500;

/// Selects one movie uniformly at random among the results matching `params`.
///
/// # Algorithm
///
/// 1. Issue the query without a page parameter (the provider defaults to page
///    1) to learn `total_pages`.
/// 2. Draw a page uniformly from `[1, total_pages]` (clamped to the provider
///    cap) and re-issue the same query for that page.
/// 3. Draw an item uniformly from the returned page.
///
/// # Failures
///
/// * Either network call failing, or its body failing to parse, yields an
///   [`Outcome::Failure`] naming which phase failed.
/// * An empty item list on the drawn page yields a failure as well. There is
///   no automatic retry; the operator decides whether to re-run the command.
///
/// # Arguments
///
/// * `requester` - The TMDB client to query
/// * `params` - Compiled discover parameters, without a page entry
pub async fn select(
    requester: &impl Requester,
    params: &BTreeMap<String, String>,
) -> Outcome<Movie> {
    // Phase 1: learn the size of the result set.
    let first_page = match requester.discover(params, None).await {
        Ok(response) => response,
        Err(error) => {
            return Outcome::failure(
                error.to_string(),
                Some("discover page-count request failed".to_string()),
            );
        }
    };

    let total_pages = first_page.total_pages.clamp(1, MAX_PAGE);
    let page = rand::thread_rng().gen_range(1..=total_pages);
    info!(
        "drew page {} of {} ({} results)",
        page, total_pages, first_page.total_results
    );

    // Phase 2: fetch the drawn page.
    let drawn_page = match requester.discover(params, Some(page)).await {
        Ok(response) => response,
        Err(error) => {
            return Outcome::failure(
                error.to_string(),
                Some(format!("discover request for page {} failed", page)),
            );
        }
    };

    if drawn_page.results.is_empty() {
        // TODO: bounded retry on another page when the drawn one comes back empty
        return Outcome::failure(
            "no movies matched the compiled query".to_string(),
            Some(format!("discover page {} returned no results", page)),
        );
    }

    // The last page is usually shorter than the provider page size, so the
    // index is drawn from the actual length and clamped as a guard.
    let index = rand::thread_rng().gen_range(0..drawn_page.results.len());
    let index = index.min(drawn_page.results.len() - 1);
    debug!("drew index {} of {}", index, drawn_page.results.len());

    Outcome::success(drawn_page.results[index].clone())
}
