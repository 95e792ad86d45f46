//! RIPEstat looking-glass payload.
//!
//! Documentation: <https://stat.ripe.net/docs/data-api/api-endpoints/looking-glass>
use crate::error::BgpmapError;
use crate::models::{AsPath, Collector};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level looking-glass response.
///
/// ```json
/// {"messages": [["info", "..."]], "data": {"rrcs": [...], "parameters": {"resource": "..."}}}
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct LookingGlassResponse {
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub data: Option<LookingGlassData>,
    pub status: Option<String>,
    pub status_code: Option<u16>,
}

/// A `[severity, text]` pair, severity being one of `info`, `warning` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage(pub String, pub String);

impl ApiMessage {
    pub fn is_error(&self) -> bool {
        self.0.eq_ignore_ascii_case("error")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LookingGlassData {
    #[serde(default)]
    pub rrcs: Vec<Rrc>,
    pub parameters: Option<Parameters>,
    pub query_time: Option<String>,
    pub latest_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Parameters {
    pub resource: Option<String>,
}

/// Per route collector entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Rrc {
    pub rrc: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub peers: Vec<Peer>,
}

/// One route as seen by one collector peer.
#[derive(Debug, Serialize, Deserialize)]
pub struct Peer {
    #[serde(with = "as_str")]
    pub as_path: AsPath,
    pub asn_origin: Option<Value>,
    pub prefix: Option<String>,
    pub peer: Option<String>,
    pub origin: Option<String>,
    pub next_hop: Option<String>,
    pub community: Option<String>,
    pub last_updated: Option<String>,
}

/// Collectors reporting the queried resource, and the resource as echoed by the looking glass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookingGlassResult {
    pub resource: String,
    pub collectors: Vec<Collector>,
}

impl LookingGlassResponse {
    /// Validate the response and group peer paths per collector, sorted by collector name.
    ///
    /// `requested` is used as the resource label when the response does not echo one.
    pub fn into_result(self, requested: &str) -> Result<LookingGlassResult, BgpmapError> {
        for message in &self.messages {
            if message.is_error() {
                return Err(BgpmapError::Api(message.1.clone()));
            }
            info!("RIPE {}: {}", message.0, message.1);
        }

        let data = self
            .data
            .ok_or_else(|| BgpmapError::Api("response carries no data".to_string()))?;

        let resource = data
            .parameters
            .and_then(|p| p.resource)
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| requested.to_string());

        if data.rrcs.is_empty() {
            return Err(BgpmapError::NotFound(resource));
        }

        let mut grouped: BTreeMap<String, Collector> = BTreeMap::new();
        for rrc in data.rrcs {
            let collector = grouped
                .entry(rrc.rrc.clone())
                .or_insert_with(|| Collector::new(rrc.rrc.clone(), rrc.location.clone()));
            for peer in rrc.peers {
                if peer.as_path.is_empty() {
                    warn!(
                        "{}: skipping empty AS path from peer {}",
                        rrc.rrc,
                        peer.peer.as_deref().unwrap_or("?")
                    );
                    continue;
                }
                collector.paths.push(peer.as_path);
            }
        }

        let collectors: Vec<Collector> = grouped
            .into_values()
            .filter(|c| {
                if c.paths.is_empty() {
                    warn!("{}: no usable AS path, collector dropped", c.name);
                }
                !c.paths.is_empty()
            })
            .collect();
        if collectors.is_empty() {
            return Err(BgpmapError::NotFound(resource));
        }

        Ok(LookingGlassResult {
            resource,
            collectors,
        })
    }
}

mod as_str {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::borrow::Cow;
    use std::fmt::Display;
    use std::str::FromStr;

    pub fn serialize<S, T>(this: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.collect_str(this)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        <T as FromStr>::Err: Display,
    {
        let str_repr = <Cow<'de, str>>::deserialize(deserializer)?;
        str_repr.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"
    {"messages": [["info", "Results exclude routes with very low visibility."]],
     "see_also": [], "version": "2.1",
     "data": {
        "rrcs": [
            {"rrc": "RRC01", "location": "London, United Kingdom", "peers": [
                {"asn_origin": "3333", "as_path": "8218 1299 3333 3333", "community": "8218:102",
                 "last_updated": "2024-01-01T00:00:00", "prefix": "193.0.0.0/21",
                 "peer": "5.57.80.210", "origin": "IGP", "next_hop": "5.57.80.210",
                 "latest_time": "2024-01-02T00:00:00"}
            ]},
            {"rrc": "RRC00", "location": "Amsterdam, Netherlands", "peers": [
                {"asn_origin": "3333", "as_path": "3257 1299 3333", "prefix": "193.0.0.0/21",
                 "peer": "2001:7f8:1::a500:3257:1"},
                {"asn_origin": "3333", "as_path": "34549 3333", "prefix": "193.0.0.0/21"}
            ]}
        ],
        "query_time": "2024-01-02T00:00:00", "latest_time": "2024-01-02T00:00:00",
        "parameters": {"resource": "193.0.0.0/21", "look_back_limit": 86400, "cache": null}
     },
     "query_id": "20240102000000-abc", "process_time": 77, "server_id": "app140",
     "build_version": "live.2024.1.1.1", "status": "ok", "status_code": 200, "time": "2024-01-02T00:00:00"}
    "#;

    #[test]
    fn test_deserialize_response() {
        let response: LookingGlassResponse = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(response.messages.len(), 1);
        assert!(!response.messages[0].is_error());
        assert_eq!(response.status_code, Some(200));

        let data = response.data.as_ref().unwrap();
        assert_eq!(data.rrcs.len(), 2);
        assert_eq!(data.rrcs[0].peers[0].as_path.to_string(), "8218 1299 3333");
    }

    #[test]
    fn test_into_result() {
        let response: LookingGlassResponse = serde_json::from_str(RESPONSE).unwrap();
        let result = response.into_result("193.0.0.1").unwrap();
        assert_eq!(result.resource, "193.0.0.0/21");

        let names: Vec<_> = result.collectors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["RRC00", "RRC01"]);
        assert_eq!(result.collectors[0].paths.len(), 2);
        assert_eq!(result.collectors[0].location, "Amsterdam, Netherlands");
    }

    #[test]
    fn test_error_message() {
        let msg = r#"{"messages": [["error", "Invalid resource"]], "data": {"rrcs": []}}"#;
        let response: LookingGlassResponse = serde_json::from_str(msg).unwrap();
        let err = response.into_result("1.1.1.1").unwrap_err();
        assert!(matches!(err, BgpmapError::Api(ref m) if m == "Invalid resource"));
    }

    #[test]
    fn test_not_found() {
        let msg = r#"{"messages": [], "data": {"rrcs": [], "parameters": {"resource": "10.0.0.0/8"}}}"#;
        let response: LookingGlassResponse = serde_json::from_str(msg).unwrap();
        let err = response.into_result("10.0.0.0/8").unwrap_err();
        assert!(matches!(err, BgpmapError::NotFound(ref r) if r == "10.0.0.0/8"));
    }

    #[test]
    fn test_missing_data() {
        let response: LookingGlassResponse = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert!(matches!(
            response.into_result("1.1.1.1"),
            Err(BgpmapError::Api(_))
        ));
    }

    #[test]
    fn test_duplicate_collector_entries_merged() {
        let msg = r#"{"data": {"rrcs": [
            {"rrc": "RRC00", "location": "Amsterdam", "peers": [{"as_path": "1 2"}]},
            {"rrc": "RRC00", "location": "Amsterdam", "peers": [{"as_path": "3 2"}, {"as_path": ""}]}
        ]}}"#;
        let response: LookingGlassResponse = serde_json::from_str(msg).unwrap();
        let result = response.into_result("192.0.2.0/24").unwrap();
        assert_eq!(result.resource, "192.0.2.0/24");
        assert_eq!(result.collectors.len(), 1);
        assert_eq!(result.collectors[0].paths.len(), 2);
    }

    #[test]
    fn test_collectors_without_usable_paths() {
        let msg = r#"{"data": {"rrcs": [
            {"rrc": "RRC00", "location": "Amsterdam", "peers": [{"as_path": ""}, {"as_path": "{1,2}"}]}
        ], "parameters": {"resource": "192.0.2.0/24"}}}"#;
        let response: LookingGlassResponse = serde_json::from_str(msg).unwrap();
        let err = response.into_result("192.0.2.0/24").unwrap_err();
        assert!(matches!(err, BgpmapError::NotFound(ref r) if r == "192.0.2.0/24"));

        let msg = r#"{"data": {"rrcs": [
            {"rrc": "RRC00", "location": "Amsterdam", "peers": [{"as_path": "{1,2}"}]},
            {"rrc": "RRC01", "location": "London", "peers": [{"as_path": "3 4"}]}
        ]}}"#;
        let response: LookingGlassResponse = serde_json::from_str(msg).unwrap();
        let result = response.into_result("192.0.2.0/24").unwrap();
        let names: Vec<_> = result.collectors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["RRC01"]);
    }
}
