//! Per-invocation orchestration.
//!
//! One inbound slash command means one [`Bot::handle_command`] call: resolve
//! the team token, parse the text, then either render a directive or run the
//! compile → select → post pipeline. Invocations share nothing mutable, so any
//! number of them can run concurrently. Every failure is scoped to its own
//! invocation: the user gets an apology in the channel and the underlying
//! error goes to the log, never to the chat.

use log::{debug, error, info, warn};

use crate::commands::{self, markdown_response};
use crate::slack::{Responder, SlackResponder, attachment};
use crate::teams::TokenLookup;
use crate::tmdb::{Movie, Outcome, Requester, query, selector};

/// Everything identifying one slash-command invocation.
///
/// Mirrors the fields of the Slack slash-command payload the bot cares about.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// Slack team the command came from
    pub team_id: String,
    /// Channel to answer in
    pub channel: String,
    /// User who issued the command
    pub user: String,
    /// Command text, without the slash trigger (Slack strips it)
    pub text: String,
}

/// How one invocation ended, for the caller's log line.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A help/list directive was rendered, no catalog query happened
    Directive,
    /// A movie card was posted
    Suggestion(Movie),
    /// The invocation failed; the apology went out and this is the error
    Failed(String),
}

/// Orchestrates slash commands against the catalog and chat collaborators.
///
/// Generic over the collaborators so tests run against [`mockall`] mocks. The
/// Slack token is resolved per invocation through the [`TokenLookup`] and
/// handed to a fresh responder, there is no process-wide credential state.
pub struct Bot<R: Requester, L: TokenLookup> {
    /// TMDB client
    requester: R,
    /// Team-token lookup collaborator
    token_lookup: L,
    /// Slack Web API base url used to build per-invocation responders
    slack_api_url: String,
}

impl<R: Requester, L: TokenLookup> Bot<R, L> {
    /// Create a new [Bot].
    ///
    /// # Arguments
    ///
    /// * `requester` - TMDB client
    /// * `token_lookup` - Resolves team ids to Slack tokens
    /// * `slack_api_url` - Slack Web API base url
    pub fn new(requester: R, token_lookup: L, slack_api_url: &str) -> Self {
        Bot {
            requester,
            token_lookup,
            slack_api_url: slack_api_url.to_string(),
        }
    }

    /// Handles one slash command end to end.
    ///
    /// Resolves the team token, builds a responder for this invocation and
    /// runs the pipeline. A failed token lookup ends the invocation before
    /// anything is posted: without a token there is no way to answer.
    pub async fn handle_command(&self, request: &CommandRequest) -> CommandOutcome {
        let token = match self.token_lookup.lookup(&request.team_id).await {
            Outcome::Success { data } => data,
            Outcome::Failure { error, message } => {
                error!(
                    "token lookup for team {} failed: {} ({:?})",
                    request.team_id, error, message
                );
                return CommandOutcome::Failed(error);
            }
        };

        let responder = SlackResponder::new(&self.slack_api_url, &token);
        self.run(&responder, request).await
    }

    /// Runs the pipeline with an already-built responder.
    ///
    /// # Pipeline
    ///
    /// 1. Parse the text. A directive short-circuits into one ephemeral post.
    /// 2. Compile the preferences into discover parameters.
    /// 3. Post the "fetching" placeholder, select a random movie.
    /// 4. Fetch the movie details for the IMDb link, best effort.
    /// 5. Post the movie card, then clean up the placeholder.
    pub async fn run(
        &self,
        responder: &impl Responder,
        request: &CommandRequest,
    ) -> CommandOutcome {
        let parsed = commands::parse(&request.text);

        if let Some(directive) = &parsed.directive {
            info!("directive {:?} for user {}", directive, request.user);
            let text = markdown_response::format_directive(directive);
            if let Outcome::Failure { error, message } = responder
                .post_ephemeral(&request.channel, &request.user, &text)
                .await
            {
                error!("unable to render directive: {} ({:?})", error, message);
                return CommandOutcome::Failed(error);
            }
            return CommandOutcome::Directive;
        }

        let params = query::compile(&parsed.preferences);
        debug!("compiled params for {:?}: {:?}", request.text, params);

        // Posted before the two catalog round trips so the user sees progress;
        // a failure here is not worth aborting the suggestion for.
        let placeholder = responder
            .post_ephemeral(
                &request.channel,
                &request.user,
                &markdown_response::format_fetching(),
            )
            .await;

        let movie = match selector::select(&self.requester, &params).await {
            Outcome::Success { data } => data,
            Outcome::Failure { error, message } => {
                error!("random selection failed: {} ({:?})", error, message);
                if let Outcome::Failure { error, .. } = responder
                    .post_ephemeral(
                        &request.channel,
                        &request.user,
                        &markdown_response::format_apology(),
                    )
                    .await
                {
                    error!("unable to post the apology: {}", error);
                }
                return CommandOutcome::Failed(error);
            }
        };

        info!("selected movie {} for user {}", movie, request.user);

        // Best effort: a missing detail payload only costs the IMDb link.
        let detail = match self.requester.movie_details(movie.id).await {
            Ok(detail) => Some(detail),
            Err(error) => {
                warn!("movie details for {} failed: {}", movie.id, error);
                None
            }
        };

        let (text, card) = attachment::build_movie_message(&movie, detail.as_ref());
        if let Outcome::Failure { error, message } = responder
            .post_message(&request.channel, &text, &[card])
            .await
        {
            error!("unable to post the movie card: {} ({:?})", error, message);
            return CommandOutcome::Failed(error);
        }

        // The placeholder served its purpose, drop it. Slack refuses to delete
        // some ephemeral messages, which is fine to ignore.
        if let Outcome::Success { data } = placeholder {
            if let Outcome::Failure { error, .. } = responder.delete_message(&data).await {
                debug!("placeholder cleanup failed: {}", error);
            }
        }

        CommandOutcome::Suggestion(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::{MessageRef, MockResponder};
    use crate::teams::MockTokenLookup;
    use crate::tmdb::requester::MockRequester;
    use crate::tmdb::response_structs::{DiscoverResponse, MovieDetail};

    fn request(text: &str) -> CommandRequest {
        CommandRequest {
            team_id: "T012345".to_string(),
            channel: "C012345".to_string(),
            user: "U067890".to_string(),
            text: text.to_string(),
        }
    }

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: "overview".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            vote_average: 7.5,
            vote_count: 500,
            release_date: "2004-02-14".to_string(),
            genre_ids: vec![35],
        }
    }

    fn single_page(movies: Vec<Movie>) -> DiscoverResponse {
        DiscoverResponse {
            page: 1,
            total_pages: 1,
            total_results: movies.len() as u32,
            results: movies,
        }
    }

    fn message_ref() -> MessageRef {
        MessageRef {
            channel: "C012345".to_string(),
            ts: "1503435956.000247".to_string(),
        }
    }

    fn bot_with(requester: MockRequester) -> Bot<MockRequester, MockTokenLookup> {
        Bot::new(requester, MockTokenLookup::new(), "https://slack.test/api")
    }

    #[tokio::test]
    async fn test_run_help_posts_one_ephemeral_and_stops() {
        let mut requester = MockRequester::new();
        requester.expect_discover().times(0);

        let mut responder = MockResponder::new();
        responder
            .expect_post_ephemeral()
            .withf(|channel, user, text| {
                channel == "C012345" && user == "U067890" && text.contains("Usage")
            })
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder.expect_post_message().times(0);

        let bot = bot_with(requester);
        let outcome = bot.run(&responder, &request("help")).await;
        assert_eq!(outcome, CommandOutcome::Directive);
    }

    #[tokio::test]
    async fn test_run_list_genres_renders_catalog() {
        let mut responder = MockResponder::new();
        responder
            .expect_post_ephemeral()
            .withf(|_, _, text| text.contains("Horror"))
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));

        let bot = bot_with(MockRequester::new());
        let outcome = bot.run(&responder, &request("list genres")).await;
        assert_eq!(outcome, CommandOutcome::Directive);
    }

    #[tokio::test]
    async fn test_run_posts_movie_card() {
        let selected = movie(603, "The Matrix");
        let first = single_page(vec![selected.clone()]);
        let second = single_page(vec![selected.clone()]);

        let mut requester = MockRequester::new();
        requester
            .expect_discover()
            .withf(|params, page| {
                params.get("with_genres").is_some_and(|v| v == "53|80") && page.is_none()
            })
            .times(1)
            .return_once(move |_, _| Ok(first));
        requester
            .expect_discover()
            .withf(|_, page| *page == Some(1))
            .times(1)
            .return_once(move |_, _| Ok(second));
        requester
            .expect_movie_details()
            .withf(|id| *id == 603)
            .times(1)
            .returning(|_| {
                Ok(MovieDetail {
                    id: 603,
                    imdb_id: Some("tt0133093".to_string()),
                    title: "The Matrix".to_string(),
                })
            });

        let mut responder = MockResponder::new();
        responder
            .expect_post_ephemeral()
            .withf(|_, _, text| text.contains("Fetching"))
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder
            .expect_post_message()
            .withf(|channel, text, attachments| {
                channel == "C012345"
                    && text == "https://www.imdb.com/title/tt0133093"
                    && attachments.len() == 1
                    && attachments[0].title == "The Matrix"
            })
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder
            .expect_delete_message()
            .times(1)
            .returning(|_| Outcome::success(()));

        let bot = bot_with(requester);
        let outcome = bot.run(&responder, &request("genre:any=thriller|crime")).await;
        assert_eq!(outcome, CommandOutcome::Suggestion(selected));
    }

    #[tokio::test]
    async fn test_run_detail_failure_degrades_to_tmdb_link() {
        let selected = movie(42, "Obscure");
        let first = single_page(vec![selected.clone()]);
        let second = single_page(vec![selected]);

        let mut requester = MockRequester::new();
        requester
            .expect_discover()
            .times(2)
            .returning(move |_, page| match page {
                None => Ok(first.clone()),
                Some(_) => Ok(second.clone()),
            });
        let detail_error = connection_error().await;
        requester
            .expect_movie_details()
            .times(1)
            .return_once(move |_| Err(detail_error));

        let mut responder = MockResponder::new();
        responder
            .expect_post_ephemeral()
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder
            .expect_post_message()
            .withf(|_, text, _| text == "https://www.themoviedb.org/movie/42")
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder
            .expect_delete_message()
            .times(1)
            .returning(|_| Outcome::success(()));

        let bot = bot_with(requester);
        let outcome = bot.run(&responder, &request("comedy")).await;
        assert!(matches!(outcome, CommandOutcome::Suggestion(_)));
    }

    #[tokio::test]
    async fn test_run_selector_failure_posts_apology() {
        let first = single_page(vec![]);
        let second = single_page(vec![]);

        let mut requester = MockRequester::new();
        requester
            .expect_discover()
            .times(2)
            .returning(move |_, page| match page {
                None => Ok(first.clone()),
                Some(_) => Ok(second.clone()),
            });
        requester.expect_movie_details().times(0);

        let mut responder = MockResponder::new();
        responder
            .expect_post_ephemeral()
            .withf(|_, _, text| text.contains("Fetching"))
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder
            .expect_post_ephemeral()
            .withf(|_, _, text| text.contains("Sorry"))
            .times(1)
            .returning(|_, _, _| Outcome::success(message_ref()));
        responder.expect_post_message().times(0);

        let bot = bot_with(requester);
        let outcome = bot.run(&responder, &request("genre=not-a-genre")).await;
        assert!(matches!(outcome, CommandOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_handle_command_unknown_team_posts_nothing() {
        let mut token_lookup = MockTokenLookup::new();
        token_lookup
            .expect_lookup()
            .withf(|team_id| team_id == "T012345")
            .times(1)
            .returning(|team_id| {
                Outcome::failure(format!("no token stored for team {}", team_id), None)
            });

        let bot = Bot::new(
            MockRequester::new(),
            token_lookup,
            "https://slack.test/api",
        );
        let outcome = bot.handle_command(&request("help")).await;
        assert!(matches!(outcome, CommandOutcome::Failed(_)));
    }

    /// Builds a real `reqwest::Error` by connecting to a port nothing listens on.
    async fn connection_error() -> reqwest::Error {
        reqwest::Client::new()
            .get("http://127.0.0.1:9")
            .send()
            .await
            .unwrap_err()
    }
}
