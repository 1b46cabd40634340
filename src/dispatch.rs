use futures::future::join_all;
use tracing::{error, info};

use crate::client::ReplySender;
use crate::shop;
use crate::types::WebhookEvent;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub replied: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Replies to every matching event concurrently and waits for all of them.
///
/// A failed reply is logged and counted; it never cancels its siblings.
pub async fn dispatch_events(sender: &dyn ReplySender, events: &[WebhookEvent]) -> DispatchReport {
    let pending = events.iter().enumerate().filter_map(|(index, event)| {
        let (reply_token, reply_set) = shop::plan_reply(event)?;

        Some(async move {
            match sender.reply(reply_token, reply_set.messages()).await {
                Ok(()) => {
                    info!("Sent {} reply for event #{}", reply_set, index);
                    true
                }
                Err(e) => {
                    error!("Failed to send {} reply for event #{}: {}", reply_set, index, e);
                    false
                }
            }
        })
    });

    let outcomes = join_all(pending).await;
    let replied = outcomes.iter().filter(|ok| **ok).count();

    DispatchReport {
        replied,
        failed: outcomes.len() - replied,
        skipped: events.len() - outcomes.len(),
    }
}
