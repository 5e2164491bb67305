//! Response structures for TMDB API endpoints.
//!
//! This module contains structures for deserializing JSON responses from
//! TheMovieDB API (`discover/movie` and `movie/{id}`).

use serde::Deserialize;
use std::fmt;

/// Response from `discover/movie`.
///
/// The endpoint is paginated with a provider-fixed page size (20 items) and a
/// hard cap of 500 addressable pages; `total_pages` may report more but pages
/// beyond the cap are rejected by the provider.
#[derive(Deserialize, Debug, Clone)]
pub struct DiscoverResponse {
    /// 1-indexed page this response covers.
    pub page: u32,
    /// Total number of pages matching the query.
    pub total_pages: u32,
    /// Total number of results matching the query.
    pub total_results: u32,
    /// Items of this page, at most one provider page size.
    pub results: Vec<Movie>,
}

impl fmt::Display for DiscoverResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "page={}/{}, total_results={}, results={}",
            self.page,
            self.total_pages,
            self.total_results,
            self.results.len()
        )
    }
}

/// One movie from a `discover/movie` page.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    /// TMDB movie identifier.
    pub id: u64,
    /// Display title.
    pub title: String,
    /// Short plot summary.
    #[serde(default)]
    pub overview: String,
    /// Poster image path, relative to the TMDB image host.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Average community rating, 0-10.
    #[serde(default)]
    pub vote_average: f64,
    /// Number of votes behind the average.
    #[serde(default)]
    pub vote_count: u64,
    /// Release date, `YYYY-MM-DD`.
    #[serde(default)]
    pub release_date: String,
    /// TMDB genre ids of the movie.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, vote_average={}, release_date={}",
            self.id, self.title, self.vote_average, self.release_date
        )
    }
}

/// Response from `movie/{id}`.
///
/// Only the fields needed to build the chat message are kept; the endpoint
/// returns many more.
#[derive(Deserialize, Debug, Clone)]
pub struct MovieDetail {
    /// TMDB movie identifier.
    pub id: u64,
    /// IMDb identifier (`tt1234567`), used for the message title link.
    #[serde(default)]
    pub imdb_id: Option<String>,
    /// Display title.
    pub title: String,
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, title={}, imdb_id={:?}",
            self.id, self.title, self.imdb_id
        )
    }
}
