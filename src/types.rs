use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default, deserialize_with = "lenient_events")]
    pub events: Vec<WebhookEvent>,
}

/// One entry of the webhook `events` array, keyed by its `type` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken")]
        reply_token: Option<String>,
        message: Message,
    },
    Postback {
        #[serde(rename = "replyToken")]
        reply_token: Option<String>,
        postback: Postback,
    },
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// The reply token, if the event carries a usable one.
    pub fn reply_token(&self) -> Option<&str> {
        let token = match self {
            WebhookEvent::Message { reply_token, .. } => reply_token.as_deref(),
            WebhookEvent::Postback { reply_token, .. } => reply_token.as_deref(),
            WebhookEvent::Other => None,
        };
        token.filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Postback {
    #[serde(default)]
    pub data: String,
}

// A malformed event becomes `Other` instead of failing the whole batch.
fn lenient_events<'de, D>(deserializer: D) -> Result<Vec<WebhookEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?
        .unwrap_or_default();

    Ok(raw
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).unwrap_or_else(|e| {
                debug!("Treating malformed event as unhandled: {}", e);
                WebhookEvent::Other
            })
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyMessage {
            message_type: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyRequest {
    #[serde(rename = "replyToken")]
    pub reply_token: String,
    pub messages: Vec<ReplyMessage>,
}
