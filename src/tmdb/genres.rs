//! Static catalog of TMDB movie genres.
//!
//! TMDB identifies genres by numeric ids in `discover/movie` queries while users
//! type genre names. This module holds the bidirectional mapping between the two.
//! The table mirrors `GET /genre/movie/list` for the movie catalog and changes so
//! rarely that it is compiled in rather than fetched at startup.

/// One entry of the genre catalog.
///
/// Ids are unique and names are unique case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenreEntry {
    /// TMDB genre identifier
    pub id: u32,
    /// Human-readable genre name
    pub name: &'static str,
}

/// The 19 TMDB movie genres, as returned by `genre/movie/list` (en-US).
pub const GENRES: [GenreEntry; 19] = [
    GenreEntry { id: 28, name: "Action" },
    GenreEntry { id: 12, name: "Adventure" },
    GenreEntry { id: 16, name: "Animation" },
    GenreEntry { id: 35, name: "Comedy" },
    GenreEntry { id: 80, name: "Crime" },
    GenreEntry { id: 99, name: "Documentary" },
    GenreEntry { id: 18, name: "Drama" },
    GenreEntry { id: 10751, name: "Family" },
    GenreEntry { id: 14, name: "Fantasy" },
    GenreEntry { id: 36, name: "History" },
    GenreEntry { id: 27, name: "Horror" },
    GenreEntry { id: 10402, name: "Music" },
    GenreEntry { id: 9648, name: "Mystery" },
    GenreEntry { id: 10749, name: "Romance" },
    GenreEntry { id: 878, name: "Science Fiction" },
    GenreEntry { id: 10770, name: "TV Movie" },
    GenreEntry { id: 53, name: "Thriller" },
    GenreEntry { id: 10752, name: "War" },
    GenreEntry { id: 37, name: "Western" },
];

/// Resolves a genre name to its TMDB id, case-insensitively.
///
/// Returns `None` for names that are not in the catalog; the query compiler drops
/// those silently instead of failing the whole command.
///
/// # Arguments
///
/// * `name` - Genre name as typed by the user
pub fn id_by_name(name: &str) -> Option<u32> {
    GENRES
        .iter()
        .find(|genre| genre.name.eq_ignore_ascii_case(name))
        .map(|genre| genre.id)
}

/// Resolves a TMDB genre id to its display name.
///
/// # Arguments
///
/// * `id` - TMDB genre identifier
pub fn name_by_id(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|genre| genre.id == id)
        .map(|genre| genre.name)
}

/// Resolves a list of TMDB genre ids to display names.
///
/// Unknown ids are skipped. Used to render the genre field of a movie card from
/// the `genre_ids` array of a discover result.
pub fn names_by_ids(ids: &[u32]) -> Vec<&'static str> {
    ids.iter().filter_map(|id| name_by_id(*id)).collect()
}
