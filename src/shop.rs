use std::fmt;

use crate::types::{Message, ReplyMessage, WebhookEvent};

/// Normalized text that opens the storefront: "shop now" in English and Thai.
pub const SHOP_TRIGGERS: [&str; 2] = ["shop now", "ดูสินค้า"];

/// Postback data sent by the rich menu's shop button.
pub const SHOP_SELECT_POSTBACK: &str = "action=shop_select";

const SHOP_GREETING: &str = "✨ ขอบคุณที่สนใจสินค้าของเรา ✨\nสามารถเลือกช้อปเครื่องเงินแท้ “Gin Ou Shou Kai (กิงโอะ)” ได้จากร้านค้าออนไลน์ของเราในทุกแพลตฟอร์มด้านล่างนี้ค่ะ 💍";

const STOREFRONTS: [(&str, &str); 3] = [
    ("Shopee", "https://shopee.co.th/faciex"),
    (
        "Lazada",
        "https://www.lazada.co.th/shop/bvge1p4d?path=index.htm&lang=en&pageTypeId=1",
    ),
    (
        "TikTok",
        "https://www.tiktok.com/@ginou.official?_t=ZS-90hUJRZwPKB&_r=1",
    ),
];

const SHOP_SELECT_LINKS: [&str; 3] = ["A", "B", "C"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySet {
    /// Greeting followed by one link per storefront.
    Shop,
    /// Placeholder links for the rich menu postback.
    ShopSelect,
}

impl ReplySet {
    pub fn messages(self) -> Vec<ReplyMessage> {
        match self {
            ReplySet::Shop => std::iter::once(ReplyMessage::text(SHOP_GREETING))
                .chain(
                    STOREFRONTS
                        .iter()
                        .map(|(name, url)| ReplyMessage::text(format!("🛒 {}: {}", name, url))),
                )
                .collect(),
            ReplySet::ShopSelect => SHOP_SELECT_LINKS
                .iter()
                .map(|label| ReplyMessage::text(format!("link: {}", label)))
                .collect(),
        }
    }
}

impl fmt::Display for ReplySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplySet::Shop => f.write_str("shop"),
            ReplySet::ShopSelect => f.write_str("shop_select"),
        }
    }
}

// ECMAScript `trim` whitespace: Unicode White_Space plus U+FEFF, without U+0085.
fn is_trimmable(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

pub fn is_shop_trigger(text: &str) -> bool {
    let normalized = text.trim_matches(is_trimmable).to_lowercase();
    SHOP_TRIGGERS.contains(&normalized.as_str())
}

/// Decides whether `event` gets a reply, and which one.
///
/// Events without a reply token are never answered, whatever they contain.
pub fn plan_reply(event: &WebhookEvent) -> Option<(&str, ReplySet)> {
    let reply_token = event.reply_token()?;

    let reply_set = match event {
        WebhookEvent::Message {
            message: Message::Text { text },
            ..
        } if is_shop_trigger(text) => ReplySet::Shop,
        WebhookEvent::Postback { postback, .. } if postback.data == SHOP_SELECT_POSTBACK => {
            ReplySet::ShopSelect
        }
        _ => return None,
    };

    Some((reply_token, reply_set))
}
