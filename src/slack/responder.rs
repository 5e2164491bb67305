//! Slack Web API client.
//!
//! Implements [`Responder`] over `chat.postEphemeral`, `chat.postMessage` and
//! `chat.delete`. The bearer token is supplied at construction: the shell
//! resolves the team token first and builds a responder for the one
//! invocation, there is no process-wide credential.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::slack::{Attachment, MessageRef, Responder};
use crate::tmdb::Outcome;

/// Client posting to the Slack Web API.
///
/// # Examples
///
/// ```no_run
/// let responder = SlackResponder::new("https://slack.com/api", "xoxb-token");
/// responder.post_ephemeral("C012345", "U067890", "Fetching...").await;
/// ```
pub struct SlackResponder {
    /// Slack Web API base url, without trailing slash
    url: String,
    /// Bearer token of the workspace this invocation belongs to
    token: String,
    /// HTTP client
    client: reqwest::Client,
}

/// Body of a `chat.postMessage` call.
#[derive(Serialize, Debug)]
struct PostMessageBody<'a> {
    channel: &'a str,
    text: &'a str,
    attachments: &'a [Attachment],
}

/// Body of a `chat.postEphemeral` call.
#[derive(Serialize, Debug)]
struct PostEphemeralBody<'a> {
    channel: &'a str,
    user: &'a str,
    text: &'a str,
}

/// Body of a `chat.delete` call.
#[derive(Serialize, Debug)]
struct DeleteBody<'a> {
    channel: &'a str,
    ts: &'a str,
}

/// Envelope every Slack Web API method answers with.
#[derive(Deserialize, Debug)]
struct SlackApiResponse {
    ok: bool,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    message_ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl SlackResponder {
    /// Create a new [SlackResponder].
    ///
    /// # Arguments
    ///
    /// * `url` - Slack Web API base url, e.g. `https://slack.com/api`.
    /// * `token` - Bearer token resolved for the requesting team.
    pub fn new(url: &str, token: &str) -> Self {
        SlackResponder {
            url: url.to_string(),
            token: token.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Posts `body` to `{url}/{method}` and checks the Slack `ok` flag.
    ///
    /// Slack reports failures in a 200 response with `ok: false`, so both the
    /// transport error and the api error collapse into an [`Outcome::Failure`]
    /// naming the method.
    async fn call<B: Serialize + std::fmt::Debug>(
        &self,
        method: &str,
        body: &B,
    ) -> Outcome<SlackApiResponse> {
        let url = format!("{}/{}", &self.url, method);
        info!("slack call {}", method);
        debug!("request {} with {:?}", &url, body);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await;

        let api_response: SlackApiResponse = match response {
            Ok(response) => match response.json().await {
                Ok(parsed) => parsed,
                Err(error) => {
                    return Outcome::failure(
                        error.to_string(),
                        Some(format!("unable to parse the {} response", method)),
                    );
                }
            },
            Err(error) => {
                return Outcome::failure(
                    error.to_string(),
                    Some(format!("unable to reach slack for {}", method)),
                );
            }
        };

        if !api_response.ok {
            let error = api_response
                .error
                .unwrap_or_else(|| "unknown slack error".to_string());
            return Outcome::failure(error, Some(format!("slack rejected {}", method)));
        }

        Outcome::success(api_response)
    }
}

impl Responder for SlackResponder {
    /// Posts a message only `user` sees in `channel` via `chat.postEphemeral`.
    async fn post_ephemeral(
        &self,
        channel: &str,
        user: &str,
        text: &str,
    ) -> Outcome<MessageRef> {
        let body = PostEphemeralBody { channel, user, text };
        match self.call("chat.postEphemeral", &body).await {
            Outcome::Success { data } => Outcome::success(MessageRef {
                channel: channel.to_string(),
                ts: data.message_ts.or(data.ts).unwrap_or_default(),
            }),
            Outcome::Failure { error, message } => Outcome::failure(error, message),
        }
    }

    /// Posts a message with attachments to `channel` via `chat.postMessage`.
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        attachments: &[Attachment],
    ) -> Outcome<MessageRef> {
        let body = PostMessageBody {
            channel,
            text,
            attachments,
        };
        match self.call("chat.postMessage", &body).await {
            Outcome::Success { data } => Outcome::success(MessageRef {
                channel: channel.to_string(),
                ts: data.ts.unwrap_or_default(),
            }),
            Outcome::Failure { error, message } => Outcome::failure(error, message),
        }
    }

    /// Deletes a previously posted message via `chat.delete`.
    async fn delete_message(&self, message: &MessageRef) -> Outcome<()> {
        let body = DeleteBody {
            channel: &message.channel,
            ts: &message.ts,
        };
        match self.call("chat.delete", &body).await {
            Outcome::Success { .. } => Outcome::success(()),
            Outcome::Failure { error, message } => Outcome::failure(error, message),
        }
    }
}
