//! HTTP client for the reply and feedback endpoints
//!
//! Both endpoints take a JSON body over POST. A reply is only accepted from a
//! 2xx response whose body decodes as `{"response": "..."}`; everything else
//! is reported as a `ClientError`.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::validation::validate_endpoint_url;

/// Upper bound on a single request, so a hung server still frees the input box
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

/// Body of a successful reply
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Reply {
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    rating: u8,
    comment: &'a str,
}

/// Talks to the assistant's HTTP endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    reply_url: String,
    feedback_url: String,
}

impl ApiClient {
    pub fn new(reply_url: &str, feedback_url: &str) -> Result<Self, ClientError> {
        let reply_url = validate_endpoint_url(reply_url).map_err(ClientError::InvalidEndpoint)?;
        let feedback_url =
            validate_endpoint_url(feedback_url).map_err(ClientError::InvalidEndpoint)?;

        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            reply_url: reply_url.to_string(),
            feedback_url: feedback_url.to_string(),
        })
    }

    pub fn reply_url(&self) -> &str {
        &self.reply_url
    }

    /// POST the user's message and decode the generated reply.
    pub async fn generate_reply(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<Reply, ClientError> {
        let response = self
            .http
            .post(&self.reply_url)
            .json(&ReplyRequest {
                message,
                session_id,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_reply(&body)
    }

    /// POST a rating and comment. The response body is not inspected.
    pub async fn submit_feedback(&self, rating: u8, comment: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(&self.feedback_url)
            .json(&FeedbackRequest { rating, comment })
            .send()
            .await?;

        check_status(response.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), ClientError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Status(status.as_u16()))
    }
}

/// Decode a reply body; a missing or non-string `response` field is malformed.
pub fn decode_reply(body: &str) -> Result<Reply, ClientError> {
    serde_json::from_str::<Reply>(body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reply() {
        let reply = decode_reply(r#"{"response":"Hi!","timestamp":"09:15 AM"}"#).unwrap();
        assert_eq!(reply.response, "Hi!");
        assert_eq!(reply.timestamp.as_deref(), Some("09:15 AM"));

        let reply = decode_reply(r#"{"response":"No time"}"#).unwrap();
        assert_eq!(reply.timestamp, None);
    }

    #[test]
    fn test_decode_reply_rejects_malformed_bodies() {
        assert!(matches!(decode_reply("<html>"), Err(ClientError::Decode(_))));
        assert!(matches!(decode_reply(r#"{"reply":"x"}"#), Err(ClientError::Decode(_))));
        assert!(matches!(decode_reply(r#"{"response":42}"#), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::NO_CONTENT).is_ok());
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ClientError::Status(500))
        ));
    }

    #[test]
    fn test_new_rejects_invalid_endpoints() {
        assert!(matches!(
            ApiClient::new("nope", "http://127.0.0.1/feedback"),
            Err(ClientError::InvalidEndpoint(_))
        ));
        assert!(ApiClient::new("http://127.0.0.1/reply", "http://127.0.0.1/feedback").is_ok());
    }

    #[test]
    fn test_request_bodies_match_wire_contract() {
        let body = serde_json::to_value(ReplyRequest {
            message: "hello",
            session_id: "session_1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"message": "hello", "session_id": "session_1"}));

        let body = serde_json::to_value(FeedbackRequest {
            rating: 4,
            comment: "nice",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"rating": 4, "comment": "nice"}));
    }
}
