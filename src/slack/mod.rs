//! Slack collaborator interface.
//!
//! The core returns data; this module is the thin boundary that actually posts
//! it. The [`Responder`] trait covers the three chat operations the shell
//! needs, and [`SlackResponder`] implements them against the Slack Web API.
//! Everything returns an [`Outcome`] so the shell decides what a failed post
//! means for the invocation.

use mockall::automock;

use crate::tmdb::Outcome;

pub mod attachment;
pub mod responder;

pub use attachment::{Attachment, AttachmentField};
pub use responder::SlackResponder;

/// Reference to a posted message, enough to delete it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    /// Channel the message was posted to
    pub channel: String,
    /// Slack message timestamp, the message id within the channel
    pub ts: String,
}

/// Trait for posting to the chat platform.
///
/// This trait abstracts the Slack Web API calls for easier testing with mocks.
#[automock]
pub trait Responder {
    /// Posts a message only the given user sees.
    async fn post_ephemeral(&self, channel: &str, user: &str, text: &str)
    -> Outcome<MessageRef>;

    /// Posts a message with optional attachments to a channel.
    async fn post_message(
        &self,
        channel: &str,
        text: &str,
        attachments: &[Attachment],
    ) -> Outcome<MessageRef>;

    /// Deletes a previously posted message.
    async fn delete_message(&self, message: &MessageRef) -> Outcome<()>;
}
