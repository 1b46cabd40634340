use async_trait::async_trait;
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::types::{ReplyMessage, ReplyRequest};

pub const LINE_REPLY_ENDPOINT: &str = "https://api.line.me/v2/bot/message/reply";

/// Sends an ordered batch of messages against one reply token.
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: Vec<ReplyMessage>) -> Result<()>;
}

/// Reply client for the LINE Messaging API.
#[derive(Debug, Clone)]
pub struct LineClient {
    http: reqwest::Client,
    endpoint: String,
    channel_access_token: String,
}

impl LineClient {
    pub fn new(channel_access_token: impl Into<String>) -> Self {
        Self::with_endpoint(LINE_REPLY_ENDPOINT, channel_access_token)
    }

    pub fn with_endpoint(
        endpoint: impl Into<String>,
        channel_access_token: impl Into<String>,
    ) -> Self {
        LineClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            channel_access_token: channel_access_token.into(),
        }
    }
}

#[async_trait]
impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<ReplyMessage>) -> Result<()> {
        if reply_token.trim().is_empty() {
            return Err(Error::EmptyReplyToken);
        }

        let reply_request = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.channel_access_token))
            .header("Content-Type", "application/json")
            .json(&reply_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("LINE API error ({}): {}", status, error_text);

            if error_text.contains("Invalid reply token") {
                warn!("Reply token is invalid, expired or already used");
            }

            return Err(Error::Api {
                status: status.as_u16(),
                body: error_text,
            });
        }

        Ok(())
    }
}
