//! Team-token lookup.
//!
//! Slack installs the bot per workspace, each with its own access token. The
//! shell resolves the token for the requesting team before the core runs and
//! threads it into the Slack responder as an explicit parameter. Only the
//! lookup interface lives here; persistence backends are out of scope, and the
//! bundled implementation serves a single configured workspace.

use mockall::automock;

use crate::tmdb::Outcome;

/// Trait resolving a team id to its Slack access token.
#[automock]
pub trait TokenLookup {
    /// Looks up the access token of a team.
    ///
    /// # Arguments
    ///
    /// * `team_id` - Slack team id from the slash-command payload
    async fn lookup(&self, team_id: &str) -> Outcome<String>;
}

/// Single-workspace lookup backed by the configuration file.
///
/// Serves the configured token for the configured team and fails for any
/// other team id.
pub struct ConfigTokenLookup {
    /// Team id the configured token belongs to
    team_id: String,
    /// Slack access token of that team
    token: String,
}

impl ConfigTokenLookup {
    /// Create a new [ConfigTokenLookup].
    pub fn new(team_id: &str, token: &str) -> Self {
        ConfigTokenLookup {
            team_id: team_id.to_string(),
            token: token.to_string(),
        }
    }
}

impl TokenLookup for ConfigTokenLookup {
    async fn lookup(&self, team_id: &str) -> Outcome<String> {
        if team_id == self.team_id {
            return Outcome::success(self.token.clone());
        }

        Outcome::failure(
            format!("no token stored for team {}", team_id),
            Some("token lookup failed".to_string()),
        )
    }
}
