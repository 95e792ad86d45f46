//! Access to RIPE NCC RIS looking-glass data.
//!
//! [RipeStatClient] queries the live RIPEstat endpoint, [SavedResponse] replays a response saved
//! to disk. Both implement [LookingGlass], which is all the pipeline depends on.
use crate::error::BgpmapError;
use crate::models::{Collector, Target};
use log::{info, warn};
use std::io::Read;
use std::str::FromStr;

pub mod client;
pub mod messages;

pub use client::RipeStatClient;
pub use messages::{LookingGlassResponse, LookingGlassResult};

/// Source of per-collector BGP paths for a target.
pub trait LookingGlass {
    fn query(&self, target: &Target) -> Result<LookingGlassResult, BgpmapError>;
}

impl<T: LookingGlass + ?Sized> LookingGlass for Box<T> {
    fn query(&self, target: &Target) -> Result<LookingGlassResult, BgpmapError> {
        (**self).query(target)
    }
}

/// A looking-glass response previously saved to a local (optionally gzip compressed) file.
pub struct SavedResponse {
    path: String,
}

impl SavedResponse {
    pub fn new(path: impl Into<String>) -> Self {
        SavedResponse { path: path.into() }
    }
}

impl LookingGlass for SavedResponse {
    fn query(&self, target: &Target) -> Result<LookingGlassResult, BgpmapError> {
        info!("reading saved looking glass response from {}", self.path);
        let mut reader = oneio::get_reader(&self.path)?;
        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        let parsed: LookingGlassResponse = serde_json::from_str(&body)?;
        parsed.into_result(&target.to_string())
    }
}

/// Which collectors to draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RrcSelection {
    #[default]
    All,
    /// Collector names, e.g. `RRC00`.
    Only(Vec<String>),
}

/// Parses collector ids: `"1"` selects `RRC01`, `"0,1,21"` selects `RRC00`, `RRC01` and `RRC21`.
/// Entries that are not numbers are dropped; if nothing valid remains every collector is used.
impl FromStr for RrcSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<String> = s
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter_map(|id| match id.parse::<u32>() {
                Ok(n) => Some(format!("RRC{:02}", n)),
                Err(_) => {
                    warn!("ignoring invalid collector id {:?}", id);
                    None
                }
            })
            .collect();

        Ok(match names.is_empty() {
            true => RrcSelection::All,
            false => RrcSelection::Only(names),
        })
    }
}

impl RrcSelection {
    /// Keep the selected collectors. Requested collectors missing from the result are skipped;
    /// when none of them is present the full list is returned.
    pub fn apply(&self, collectors: Vec<Collector>) -> Vec<Collector> {
        let wanted = match self {
            RrcSelection::All => {
                info!("processing all {} available collectors", collectors.len());
                return collectors;
            }
            RrcSelection::Only(names) => names,
        };

        for name in wanted {
            if !collectors.iter().any(|c| &c.name == name) {
                warn!("{} is either invalid or not found, skipping...", name);
            }
        }

        let (selected, rest): (Vec<_>, Vec<_>) = collectors
            .into_iter()
            .partition(|c| wanted.contains(&c.name));

        if selected.is_empty() {
            warn!("none of the specified collectors are in the result list, using all of them");
            let mut all = rest;
            all.sort_by(|a, b| a.name.cmp(&b.name));
            return all;
        }
        selected
    }
}
