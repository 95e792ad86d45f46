use crate::error::BgpmapError;
use crate::models::Target;
use crate::ris::messages::LookingGlassResponse;
use crate::ris::{LookingGlass, LookingGlassResult};
use log::{debug, info};
use reqwest::blocking::Client;
use std::time::Duration;

pub const LOOKING_GLASS_URL: &str = "https://stat.ripe.net/data/looking-glass/data.json";

/// Identifies this tool to RIPEstat, see <https://stat.ripe.net/docs/data-api/ripestat-data-api#rules-of-usage>
pub const SOURCE_APP: &str = "ris-bgpmap";

/// Blocking RIPEstat looking-glass client. One GET per query, no retries.
pub struct RipeStatClient {
    client: Client,
    url: String,
}

impl RipeStatClient {
    pub fn new(timeout: Duration) -> Result<Self, BgpmapError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ris-bgpmap/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(RipeStatClient {
            client,
            url: LOOKING_GLASS_URL.to_string(),
        })
    }

    /// Point the client at another endpoint serving the same schema.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Query string sent with every request. `soft_limit=ignore` lifts the default cap on the
    /// number of returned peers.
    pub fn query_params(target: &Target) -> [(&'static str, String); 3] {
        [
            ("resource", target.to_string()),
            ("sourceapp", SOURCE_APP.to_string()),
            ("soft_limit", "ignore".to_string()),
        ]
    }
}

impl LookingGlass for RipeStatClient {
    fn query(&self, target: &Target) -> Result<LookingGlassResult, BgpmapError> {
        info!("contacting RIPE NCC RIS looking glass for {}...", target);
        let response = self
            .client
            .get(&self.url)
            .query(&Self::query_params(target))
            .send()?;

        let status = response.status();
        debug!("looking glass answered {} for {}", status, response.url());
        let body = response.text()?;

        if !status.is_success() {
            // RIPEstat explains most rejections in its message list
            let reason = serde_json::from_str::<LookingGlassResponse>(&body)
                .ok()
                .and_then(|r| r.messages.into_iter().find(|m| m.is_error()))
                .map(|m| m.1)
                .unwrap_or_else(|| format!("HTTP status {}", status));
            return Err(BgpmapError::Api(reason));
        }

        let parsed: LookingGlassResponse = serde_json::from_str(&body)?;
        parsed.into_result(&target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_query_params() {
        let target = Target::from_str("193.0.0.0/21").unwrap();
        let params = RipeStatClient::query_params(&target);
        assert_eq!(params[0], ("resource", "193.0.0.0/21".to_string()));
        assert_eq!(params[1], ("sourceapp", SOURCE_APP.to_string()));
        assert_eq!(params[2], ("soft_limit", "ignore".to_string()));
    }

    #[test]
    fn test_unreachable_endpoint() {
        // nothing listens on the discard port of localhost
        let client = RipeStatClient::new(Duration::from_secs(2))
            .unwrap()
            .with_url("http://127.0.0.1:9/data.json");
        let target = Target::from_str("193.0.0.0/21").unwrap();
        assert!(matches!(
            client.query(&target),
            Err(BgpmapError::Network(_))
        ));
    }
}
