//! Client side of the task tracker.
//!
//! - [`api::ApiClient`] speaks the HTTP API and holds the bearer token.
//! - [`board::TaskBoard`] caches the task list, filters it locally, runs
//!   mutations, invalidates the cache after each success and records a
//!   transient [`board::Notice`] for every outcome.
//! - [`view`] turns tasks into text cards and collects form input for
//!   creating or editing a task.

pub mod api;
pub mod board;
pub mod view;

use std::fmt;

pub use api::ApiClient;
pub use board::{Notice, NoticeKind, TaskBoard};
pub use view::{render_board, render_card, FormSubmission, TaskForm};

#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response (connection, TLS, timeout).
    Transport(reqwest::Error),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body did not have the expected shape.
    Decode(String),
    /// The call needs a token and none is set.
    NotAuthenticated,
    /// Local input was rejected before any request was made.
    Invalid(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "Request failed: {}", e),
            ClientError::Api { status, message } => write!(f, "HTTP {}: {}", status, message),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ClientError::NotAuthenticated => write!(f, "Not logged in"),
            ClientError::Invalid(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Transport(error)
        }
    }
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
