//! Downloading puzzle inputs and submitting answers.
//!
//! The site answers submissions with an HTML page, so the result of a submission is found by
//! looking for known phrases in it; see [`classify_response`].

use std::thread;
use std::time::Duration;

use aoc_framework::PartKind;
use reqwest::blocking::{Client, Response};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, InvalidHeaderValue};
use thiserror::Error;
use tracing::{debug, info, warn};

/// The puzzle site.
pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (personal puzzle runner)"
);

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("session token is not a valid header value")]
    InvalidToken(#[from] InvalidHeaderValue),

    #[error("unknown response! {body}")]
    UnclassifiedResponse { body: String },

    #[error("failed to fetch input after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<RemoteError>,
    },
}

/// What the site said about a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Correct,
    Incorrect,
    AlreadyCompleted,
    PleaseWait,
    /// None of the known phrases were found.
    Unknown,
}

const CORRECT: &str = "That's the right answer!";
const INCORRECT: &str = "That's not the right answer";
const ALREADY_COMPLETED: &str = "Did you already complete it?";
const PLEASE_WAIT: &str = "You gave an answer too recently";

/// Classify a submission response by the phrases it contains.
///
/// Phrases are checked in a fixed order, so a page containing several gets the first match.
#[must_use]
pub fn classify_response(body: &str) -> SubmissionStatus {
    [
        (CORRECT, SubmissionStatus::Correct),
        (INCORRECT, SubmissionStatus::Incorrect),
        (ALREADY_COMPLETED, SubmissionStatus::AlreadyCompleted),
        (PLEASE_WAIT, SubmissionStatus::PleaseWait),
    ]
    .into_iter()
    .find_map(|(phrase, status)| body.contains(phrase).then_some(status))
    .unwrap_or(SubmissionStatus::Unknown)
}

/// Settings of the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Limit for each request, connecting and reading included.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// How often, and how patiently, to try downloading an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Fixed pause between failed attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// A source of puzzle inputs.
pub trait InputSource {
    /// Download the input of a puzzle.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoteError`] if the input can't be downloaded.
    fn fetch_input(&self, year: u16, day: u8) -> Result<String, RemoteError>;
}

/// Download an input, trying again after a fixed delay when an attempt fails.
///
/// Returns as soon as an attempt succeeds. An `attempts` of zero is treated as one.
///
/// # Errors
///
/// Returns [`RemoteError::RetriesExhausted`], sourcing the last failure, once every attempt failed.
pub fn fetch_input_with_retry<S>(
    source: &S,
    year: u16,
    day: u8,
    policy: &RetryPolicy,
) -> Result<String, RemoteError>
where
    S: InputSource + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match source.fetch_input(year, day) {
            Ok(input) => return Ok(input),
            Err(error) if attempt >= attempts => {
                return Err(RemoteError::RetriesExhausted {
                    attempts,
                    last: Box::new(error),
                });
            }
            Err(error) => {
                warn!(
                    %error,
                    attempt,
                    attempts,
                    delay_secs = policy.delay.as_secs_f32(),
                    "failed to fetch input, retrying"
                );
                thread::sleep(policy.delay);
                attempt += 1;
            }
        }
    }
}

/// An authenticated client of the puzzle site.
pub struct RemoteClient {
    http: Client,
    base_url: String,
}

impl RemoteClient {
    /// Build a client sending `token` as the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::InvalidToken`] if the token can't be sent as a header, or
    /// [`RemoteError::Http`] if the client can't be built.
    pub fn new(token: &str, config: &ClientConfig) -> Result<Self, RemoteError> {
        let mut cookie = HeaderValue::from_str(&format!("session={token}"))?;
        cookie.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn day_url(&self, year: u16, day: u8, endpoint: &str) -> String {
        day_url(&self.base_url, year, day, endpoint)
    }

    /// Submit an answer. Submissions are never retried.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] for failed requests and [`RemoteError::UnclassifiedResponse`]
    /// with the page text if the response matches no known phrase.
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: PartKind,
        answer: &str,
    ) -> Result<SubmissionStatus, RemoteError> {
        let url = self.day_url(year, day, "answer");
        info!(%url, %part, answer, "submitting answer");
        let level = part.number().to_string();
        let body = self
            .http
            .post(&url)
            .form(&[("level", level.as_str()), ("answer", answer)])
            .send()
            .and_then(Response::error_for_status)?
            .text()?;

        match classify_response(&body) {
            SubmissionStatus::Unknown => Err(RemoteError::UnclassifiedResponse { body }),
            status => {
                debug!(?status, "classified submission response");
                Ok(status)
            }
        }
    }
}

impl InputSource for RemoteClient {
    fn fetch_input(&self, year: u16, day: u8) -> Result<String, RemoteError> {
        let url = self.day_url(year, day, "input");
        info!(%url, "fetching input");
        let input = self
            .http
            .get(&url)
            .send()
            .and_then(Response::error_for_status)?
            .text()?;
        Ok(input)
    }
}

fn day_url(base_url: &str, year: u16, day: u8, endpoint: &str) -> String {
    format!("{base_url}/{year}/day/{day}/{endpoint}")
}
