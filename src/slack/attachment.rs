//! Slack message attachment structures and the movie card builder.
//!
//! Attachments follow the legacy Slack attachment format the bot has always
//! posted: a title linking to IMDb, the poster image and a handful of fields
//! (overview, rating, genres, year).

use serde::Serialize;

use crate::tmdb::response_structs::{Movie, MovieDetail};
use crate::tmdb::genres;

/// TMDB image host for full-size posters.
const POSTER_HOST: &str = "https://image.tmdb.org/t/p/w500";
/// TMDB image host for thumbnails.
const THUMB_HOST: &str = "https://image.tmdb.org/t/p/w200";

/// One Slack message attachment.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Attachment {
    /// Plain-text summary shown when the rich attachment cannot be rendered
    pub fallback: String,
    /// Attachment title
    pub title: String,
    /// Link wrapped around the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    /// Body text of the attachment
    pub text: String,
    /// Full-size image url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Thumbnail image url
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    /// Short labelled fields rendered as a table
    pub fields: Vec<AttachmentField>,
    /// Footer line
    pub footer: String,
    /// Author line shown above the title
    pub author_name: String,
}

/// One field of an [`Attachment`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AttachmentField {
    /// Field label
    pub title: String,
    /// Field content
    pub value: String,
    /// Whether the field is short enough to share a row
    pub short: bool,
}

/// Builds the message posted for a selected movie.
///
/// Returns the message text (the link Slack unfurls) and the movie card
/// attachment. The title links to IMDb when the detail lookup produced an IMDb
/// id and falls back to the TMDB page otherwise, so a failed detail call never
/// blocks the suggestion.
///
/// # Arguments
///
/// * `movie` - The selected movie from the discover page
/// * `detail` - Detail payload with the IMDb id, when the lookup succeeded
pub fn build_movie_message(movie: &Movie, detail: Option<&MovieDetail>) -> (String, Attachment) {
    let title_link = match detail.and_then(|detail| detail.imdb_id.as_deref()) {
        Some(imdb_id) => format!("https://www.imdb.com/title/{}", imdb_id),
        None => format!("https://www.themoviedb.org/movie/{}", movie.id),
    };

    let genre_names = genres::names_by_ids(&movie.genre_ids);
    let genre_names = match genre_names.is_empty() {
        true => "unknown".to_string(),
        false => genre_names.join(", "),
    };

    // Release dates are YYYY-MM-DD; an empty or malformed one shows as-is
    let year = movie.release_date.get(..4).unwrap_or(&movie.release_date);

    let attachment = Attachment {
        fallback: format!("Suggested movie: {}", movie.title),
        title: movie.title.clone(),
        title_link: Some(title_link.clone()),
        text: String::new(),
        image_url: movie
            .poster_path
            .as_ref()
            .map(|path| format!("{}{}", POSTER_HOST, path)),
        thumb_url: movie
            .poster_path
            .as_ref()
            .map(|path| format!("{}{}", THUMB_HOST, path)),
        fields: vec![
            AttachmentField {
                title: "Overview".to_string(),
                value: movie.overview.clone(),
                short: false,
            },
            AttachmentField {
                title: "TMDB rating".to_string(),
                value: format!("{} (votes: {})", movie.vote_average, movie.vote_count),
                short: false,
            },
            AttachmentField {
                title: "Genres".to_string(),
                value: genre_names,
                short: false,
            },
            AttachmentField {
                title: "Year".to_string(),
                value: year.to_string(),
                short: false,
            },
        ],
        footer: "Brought to you by MadLtd.".to_string(),
        author_name: "MadMovie".to_string(),
    };

    (title_link, attachment)
}
