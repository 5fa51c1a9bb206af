use serde::{Deserialize, Serialize};

/// Shopping platform for outbound search links. Unrecognized platform names
/// parse to `Web`, which produces a plain web-search URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Amazon,
    Flipkart,
    Web,
}

impl Platform {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "amazon" => Self::Amazon,
            "flipkart" => Self::Flipkart,
            _ => Self::Web,
        }
    }
}

/// Builds a platform search URL for a product query, appending the partner
/// identifier when one is supplied. Total: always returns a valid URL string.
pub fn affiliate_link(platform: Platform, query: &str, partner_tag: Option<&str>) -> String {
    let encoded_query = urlencoding::encode(query);
    let tag = partner_tag.map(str::trim).filter(|value| !value.is_empty());

    match platform {
        Platform::Amazon => {
            let base = format!("https://www.amazon.in/s?k={encoded_query}");
            match tag {
                Some(tag) => format!("{base}&tag={}", urlencoding::encode(tag)),
                None => base,
            }
        }
        Platform::Flipkart => {
            let base = format!("https://www.flipkart.com/search?q={encoded_query}");
            match tag {
                Some(tag) => format!("{base}&affid={}", urlencoding::encode(tag)),
                None => base,
            }
        }
        Platform::Web => format!("https://www.google.com/search?q={encoded_query}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{affiliate_link, Platform};

    #[test]
    fn amazon_link_encodes_query_and_appends_tag() {
        let link = affiliate_link(Platform::Amazon, "vitamin C serum", Some("tag123"));

        assert_eq!(link, "https://www.amazon.in/s?k=vitamin%20C%20serum&tag=tag123");
    }

    #[test]
    fn flipkart_link_uses_affid_parameter() {
        let link = affiliate_link(Platform::Flipkart, "ceramide moisturizer", Some("glow-01"));

        assert!(link.starts_with("https://www.flipkart.com/search?q=ceramide%20moisturizer"));
        assert!(link.ends_with("&affid=glow-01"));
    }

    #[test]
    fn empty_tag_is_treated_as_absent() {
        let link = affiliate_link(Platform::Amazon, "sunscreen", Some("  "));

        assert_eq!(link, "https://www.amazon.in/s?k=sunscreen");
    }

    #[test]
    fn unknown_platform_falls_back_to_web_search_without_partner_parameter() {
        let platform = Platform::parse("unknown-platform");
        let link = affiliate_link(platform, "niacinamide 5% serum", Some("tag123"));

        assert_eq!(platform, Platform::Web);
        assert_eq!(link, "https://www.google.com/search?q=niacinamide%205%25%20serum");
    }

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!(Platform::parse("Amazon"), Platform::Amazon);
        assert_eq!(Platform::parse(" FLIPKART "), Platform::Flipkart);
    }
}
