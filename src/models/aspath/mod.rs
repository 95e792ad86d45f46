use crate::models::*;
use itertools::Itertools;
use log::warn;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// One BGP path as reported by a collector peer, ordered from the peer towards the origin.
///
/// Prepends are collapsed on construction: consecutive duplicate ASNs are kept once, so
/// `1 1 2 3 3 3` is stored as `1 2 3`. Non-consecutive repeats are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AsPath {
    asns: Vec<Asn>,
}

impl AsPath {
    pub fn new() -> Self {
        AsPath::default()
    }

    /// Shorthand for creating a path from plain AS numbers.
    pub fn from_sequence<S: AsRef<[u32]>>(seq: S) -> Self {
        seq.as_ref().iter().copied().map(Asn::from).collect()
    }

    /// Appends an ASN to the end of the path unless it repeats the last one.
    pub fn push(&mut self, asn: Asn) {
        if self.asns.last() != Some(&asn) {
            self.asns.push(asn);
        }
    }

    pub fn asns(&self) -> &[Asn] {
        &self.asns
    }

    pub fn len(&self) -> usize {
        self.asns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asns.is_empty()
    }

    /// The AS the collector peers with.
    pub fn first_hop(&self) -> Option<Asn> {
        self.asns.first().copied()
    }

    /// The AS originating the route.
    pub fn origin(&self) -> Option<Asn> {
        self.asns.last().copied()
    }

    /// Iterate over the AS adjacencies of this path, one edge per adjacent pair.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.asns
            .iter()
            .tuple_windows()
            .map(|(from, to)| Edge::new(*from, *to))
    }
}

impl FromIterator<Asn> for AsPath {
    fn from_iter<T: IntoIterator<Item = Asn>>(iter: T) -> Self {
        AsPath {
            asns: iter.into_iter().dedup().collect(),
        }
    }
}

/// Parses the space separated path notation used by the RIPEstat looking glass, e.g.
/// `"3333 1103 1103 12654"`.
///
/// Tokens which are not plain AS numbers (AS-set notation like `{64512,64513}`) cannot be placed
/// on a single graph node and are skipped with a warning.
impl FromStr for AsPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split_whitespace()
            .filter_map(|token| match token.parse::<Asn>() {
                Ok(asn) => Some(asn),
                Err(_) => {
                    warn!("skipping unsupported AS path token {:?} in {:?}", token, s);
                    None
                }
            })
            .collect())
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asns.iter().join(" "))
    }
}
