use crate::models::AsPath;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A RIS route collector together with the paths its peers reported for the queried resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collector {
    /// Collector name as reported by the looking glass, e.g. `RRC00`.
    pub name: String,
    /// Free-form location, e.g. `Amsterdam, Netherlands`.
    pub location: String,
    pub paths: Vec<AsPath>,
}

impl Collector {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Collector {
            name: name.into(),
            location: location.into(),
            paths: vec![],
        }
    }

    pub fn with_paths(mut self, paths: Vec<AsPath>) -> Self {
        self.paths = paths;
        self
    }
}

impl Display for Collector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.location.is_empty() {
            true => write!(f, "{}", self.name),
            false => write!(f, "{} - {}", self.name, self.location),
        }
    }
}
