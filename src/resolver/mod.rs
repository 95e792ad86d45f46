//! AS number to display name resolution.
//!
//! Lookups are best-effort: [NameCache] absorbs every failure and leaves the node with its
//! `AS<n>` placeholder label, so a broken resolver never ends a run.
use crate::error::BgpmapError;
use crate::models::{Asn, Graph};
use log::{debug, info};
use std::collections::HashMap;

pub mod cymru;

pub use cymru::CymruResolver;

/// Source of AS names.
pub trait AsnLookup {
    fn lookup(&self, asn: Asn) -> Result<String, BgpmapError>;
}

/// Lookup used when name resolution is disabled or unavailable.
pub struct NoLookup;

impl AsnLookup for NoLookup {
    fn lookup(&self, asn: Asn) -> Result<String, BgpmapError> {
        Err(BgpmapError::Resolution {
            asn: asn.to_u32(),
            reason: "name resolution disabled".to_string(),
        })
    }
}

impl<L: AsnLookup + ?Sized> AsnLookup for Box<L> {
    fn lookup(&self, asn: Asn) -> Result<String, BgpmapError> {
        (**self).lookup(asn)
    }
}

/// Per-run memo of AS names. Every distinct AS is looked up at most once, failures included.
pub struct NameCache<L> {
    lookup: L,
    names: HashMap<Asn, Option<String>>,
}

impl<L: AsnLookup> NameCache<L> {
    pub fn new(lookup: L) -> Self {
        NameCache {
            lookup,
            names: HashMap::new(),
        }
    }

    /// Name of `asn`, or `None` if it could not be resolved.
    pub fn name(&mut self, asn: Asn) -> Option<&str> {
        let lookup = &self.lookup;
        self.names
            .entry(asn)
            .or_insert_with(|| match lookup.lookup(asn) {
                Ok(name) => Some(name),
                Err(e) => {
                    debug!("{}", e);
                    None
                }
            })
            .as_deref()
    }

    /// Fill in the names of all nodes of `graph`.
    pub fn annotate(&mut self, graph: &mut Graph) {
        let mut resolved = 0;
        for node in graph.nodes_mut() {
            node.name = self.name(node.asn).map(str::to_string);
            if node.name.is_some() {
                resolved += 1;
            }
        }
        info!(
            "resolved {} of {} AS names ({} cached)",
            resolved,
            graph.nodes().count(),
            self.names.len()
        );
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
