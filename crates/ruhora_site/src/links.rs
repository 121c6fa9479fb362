//! Outbound links: the order message deep link and the footer profiles

use crate::error::Result;
use url::Url;

/// Business number the order messages are addressed to
pub const ORDER_PHONE: &str = "9724277883";

const ORDER_ENDPOINT: &str = "https://api.whatsapp.com/send/";

/// A social profile linked from the footer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    /// Short lowercase name, used in element labels
    pub kind: &'static str,
    pub href: &'static str,
    pub aria_label: &'static str,
}

static SOCIAL: [SocialLink; 3] = [
    SocialLink {
        kind: "whatsapp",
        href: "https://wa.me/9724277883",
        aria_label: "Connect on WhatsApp",
    },
    SocialLink {
        kind: "instagram",
        href: "https://instagram.com/ruhora.in",
        aria_label: "Follow on Instagram",
    },
    SocialLink {
        kind: "facebook",
        href: "https://facebook.com/profile.php?id=61584106618581",
        aria_label: "Follow on Facebook",
    },
];

pub fn social_links() -> &'static [SocialLink] {
    &SOCIAL
}

impl SocialLink {
    pub fn url(&self) -> Result<Url> {
        Ok(Url::parse(self.href)?)
    }
}

/// Deep link that opens a chat with `message` prefilled
pub fn order_link(message: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        ORDER_ENDPOINT,
        &[("phone", ORDER_PHONE), ("text", message)],
    )?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::products;

    #[test]
    fn test_order_link_encodes_message() {
        let url = order_link("Hello ✨\nI'd like to order").unwrap();
        assert_eq!(url.host_str(), Some("api.whatsapp.com"));
        assert_eq!(url.path(), "/send/");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("phone".into(), ORDER_PHONE.into()));
        assert_eq!(pairs[1].1, "Hello ✨\nI'd like to order");

        let raw = url.query().unwrap();
        assert!(!raw.contains('\n'));
        assert!(!raw.contains(' '));
    }

    #[test]
    fn test_every_product_message_builds_a_link() {
        for product in products() {
            let url = order_link(product.order_message).unwrap();
            let text = url
                .query_pairs()
                .find(|(k, _)| k == "text")
                .map(|(_, v)| v.into_owned());
            assert_eq!(text.as_deref(), Some(product.order_message));
        }
    }

    #[test]
    fn test_social_links_parse() {
        let kinds: Vec<&str> = social_links().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec!["whatsapp", "instagram", "facebook"]);
        for link in social_links() {
            assert_eq!(link.url().unwrap().scheme(), "https");
        }
    }
}
