//! TheMovieDB integration.
//!
//! This module contains everything that touches the external movie catalog:
//! the static genre table, the compilation of user preferences into discover
//! query parameters, the HTTP requester and the two-phase random selection.
//!
//! # Pipeline
//!
//! ```text
//! Vec<Preference> → query::compile() → parameters
//!                                         │
//!                  selector::select() ◄───┘
//!                     │  (two discover round trips)
//!                     ▼
//!                 Outcome<Movie>
//! ```
//!
//! The selector is the only place that sets the `page` parameter; the compiled
//! parameter map never contains one.

pub mod genres;
pub mod outcome;
pub mod query;
pub mod requester;
pub mod response_structs;
pub mod selector;

pub use outcome::Outcome;
pub use requester::{Requester, TmdbRequester};
pub use response_structs::{DiscoverResponse, Movie, MovieDetail};
