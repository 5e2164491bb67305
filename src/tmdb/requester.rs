//! HTTP client for TheMovieDB API.
//!
//! This module provides the [`TmdbRequester`] struct for making HTTP requests
//! to TMDB, covering the paginated `discover/movie` endpoint and the per-movie
//! detail endpoint.

use std::collections::BTreeMap;

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, Error};

use crate::tmdb::response_structs::{DiscoverResponse, MovieDetail};

/// HTTP client for requesting data from TheMovieDB.
///
/// The api key is supplied at construction and threaded into every request;
/// there is no process-wide credential state.
///
/// # Examples
///
/// ```no_run
/// let requester = TmdbRequester::new("https://api.themoviedb.org/3", "api_key");
/// let page = requester.discover(&params, None).await.unwrap();
/// println!("Total pages: {}", page.total_pages);
/// ```
pub struct TmdbRequester {
    /// TMDB api base url, without trailing slash
    url: String,
    /// TMDB api key
    api_key: String,
    /// HTTP client
    client: Client,
}

/// Trait for making requests to TMDB.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Fetches one page of the discover catalog for the compiled parameters.
    ///
    /// `page` is 1-indexed; `None` lets the provider default to page 1, which
    /// is how the selector learns the page count.
    async fn discover(
        &self,
        params: &BTreeMap<String, String>,
        page: Option<u32>,
    ) -> Result<DiscoverResponse, Error>;

    /// Fetches detailed information about a specific movie.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, Error>;
}

impl TmdbRequester {
    /// Create a new [TmdbRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the TMDB api, e.g. `https://api.themoviedb.org/3`.
    /// * `api_key` - The TMDB api key.
    pub fn new(url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::new();
        TmdbRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }
}

impl Requester for TmdbRequester {
    /// Request `/discover/movie` with the compiled query parameters.
    ///
    /// This api call returns a paginated json object:
    /// ```
    /// {
    ///   page: 1,
    ///   total_pages: 42,
    ///   total_results: 825,
    ///   results: [ { id: 603, title: "The Matrix", ... }, ... ]
    /// }
    /// ```
    /// This method transforms this json into a [`DiscoverResponse`]. At most
    /// one provider page (20 items) comes back per call.
    async fn discover(
        &self,
        params: &BTreeMap<String, String>,
        page: Option<u32>,
    ) -> Result<DiscoverResponse, Error> {
        let url = format!("{}/discover/movie", &self.url);
        info!("request discover page {:?}", page);

        let mut query: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        for (name, value) in params {
            query.push((name, value.clone()));
        }
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }

        debug!("request {} with {:?}", &url, &params);

        let discover_response: DiscoverResponse = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &discover_response);

        Ok(discover_response)
    }

    /// Request `/movie/{movie_id}` to get the details of a specific movie.
    ///
    /// The detail payload carries the IMDb id used for the message title link;
    /// discover results do not include it.
    ///
    /// # Arguments
    ///
    /// * `movie_id` - The TMDB identifier of the movie.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail, Error> {
        let url = format!("{}/movie/{}", &self.url, movie_id);
        info!("request details of movie {}", movie_id);
        debug!("request {}", &url);

        let movie_detail: MovieDetail = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {}", &url, &movie_detail);

        Ok(movie_detail)
    }
}
