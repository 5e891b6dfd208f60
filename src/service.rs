//! Client side of the guess-validation service.
//!
//! The service owns the hidden word. The client only ever sends complete
//! guesses and receives the per-letter verdicts, and the session that ties
//! consecutive calls together is kept in the HTTP client's cookie jar.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ServiceError;
use crate::wordle::Feedback;

/// Verdict for one submitted guess.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub feedback: Feedback,
    pub game_over: bool,
}

/// The two operations the game needs from the outside world.
#[async_trait]
pub trait GuessService: Send + Sync {
    /// Check a guess of exactly `WORD_LENGTH` uppercase letters
    async fn check_guess(&self, guess: &str) -> Result<CheckResponse, ServiceError>;

    /// Start a new game in the current session
    async fn restart(&self) -> Result<(), ServiceError>;
}

#[derive(Serialize)]
struct CheckRequest<'a> {
    guess: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct RestartBody {
    #[serde(default)]
    message: Option<String>,
}

/// [`GuessService`] talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGuessService {
    base_url: String,
    client: Client,
}

impl HttpGuessService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        info!(%base_url, ?timeout, "Created guess service client");
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl GuessService for HttpGuessService {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn check_guess(&self, guess: &str) -> Result<CheckResponse, ServiceError> {
        debug!("Checking guess");
        let response = self
            .client
            .post(self.endpoint("check"))
            .json(&CheckRequest { guess })
            .send()
            .await?;
        let verdict: CheckResponse = read_json(response).await?;
        debug!(feedback = ?verdict.feedback, game_over = verdict.game_over, "Got verdict");
        Ok(verdict)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn restart(&self) -> Result<(), ServiceError> {
        debug!("Restarting game");
        let response = self.client.post(self.endpoint("restart")).send().await?;
        // Only the status matters, the message is informational
        match read_json::<RestartBody>(response).await {
            Ok(body) => info!(reply = body.message.as_deref(), "Game restarted"),
            Err(ServiceError::Malformed(reason)) => {
                warn!(%reason, "Restart acknowledged with unexpected body")
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => err.error,
            Err(_) => body,
        };
        warn!(status = status.as_u16(), reason = %message, "Guess service returned an error");
        return Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
