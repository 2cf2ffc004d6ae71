//! Chat client for the answer service
//!
//! Thin boundary shim used by terminal or widget consumers: posts the
//! question to the configured endpoint and keeps "backend unreachable"
//! distinguishable from other failures in the user-facing messages.

use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::{Error, Result};

/// Fallback answer when the response carries no recognizable field
const COULD_NOT_PROCESS: &str = "Sorry, I could not process your request.";

/// User-facing message for a backend that cannot be reached
const UNREACHABLE_MESSAGE: &str =
    "The documentation assistant is unreachable right now. Please try again later.";

/// Client for the answer service's `/query` endpoint
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

/// The answer arrives under either of two keys depending on the
/// backend version; empty strings fall through to the fallback.
#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    response: Option<String>,
}

impl ChatResponse {
    fn into_answer(self) -> String {
        self.answer
            .filter(|a| !a.is_empty())
            .or(self.response.filter(|a| !a.is_empty()))
            .unwrap_or_else(|| COULD_NOT_PROCESS.to_string())
    }
}

impl ChatClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// The endpoint queries are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `query` and return the assistant's answer
    pub async fn ask(&self, query: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { query })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    Error::ChatUnreachable(format!("cannot reach {}: {}", self.endpoint, e))
                } else {
                    Error::ChatRequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::ChatRequestFailed(format!(
                "API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            )));
        }

        // A 2xx body with neither answer key is "could not process",
        // not a transport error.
        let parsed: ChatResponse = response.json().await.unwrap_or_default();
        Ok(parsed.into_answer())
    }

    /// Message shown to the end user for a failed request
    pub fn user_message(error: &Error) -> String {
        match error {
            Error::ChatUnreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            other => format!("Sorry, an error occurred: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ChatResponse {
        serde_json::from_str(body).unwrap_or_default()
    }

    #[test]
    fn answer_key_wins_over_response_key() {
        let answer = parse(r#"{"answer":"from answer","response":"from response"}"#).into_answer();
        assert_eq!(answer, "from answer");
    }

    #[test]
    fn response_key_is_the_fallback() {
        let answer = parse(r#"{"response":"from response"}"#).into_answer();
        assert_eq!(answer, "from response");
    }

    #[test]
    fn empty_answer_falls_through_to_response() {
        let answer = parse(r#"{"answer":"","response":"still here"}"#).into_answer();
        assert_eq!(answer, "still here");
    }

    #[test]
    fn unknown_shape_becomes_could_not_process() {
        assert_eq!(parse(r#"{"result":"nope"}"#).into_answer(), COULD_NOT_PROCESS);
        assert_eq!(parse("not even json").into_answer(), COULD_NOT_PROCESS);
    }

    #[test]
    fn unreachable_message_is_distinct_from_other_failures() {
        let unreachable =
            ChatClient::user_message(&Error::ChatUnreachable("connection refused".to_string()));
        let failed =
            ChatClient::user_message(&Error::ChatRequestFailed("API error: 500".to_string()));
        assert_ne!(unreachable, failed);
        assert_eq!(unreachable, UNREACHABLE_MESSAGE);
        assert!(failed.starts_with("Sorry, an error occurred:"));
    }
}
