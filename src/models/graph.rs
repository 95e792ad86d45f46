//! The AS adjacency graph drawn for one query.
//!
//! A [Graph] holds one [AsNode] per distinct AS and one [Edge] per distinct adjacency. Paths are
//! fed in through a [GraphBuilder]; since every [AsPath] has its prepends collapsed already, an
//! edge never connects an AS to itself.
use crate::models::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Directed AS adjacency, oriented from the collector peer towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Edge {
    pub from: Asn,
    pub to: Asn,
}

impl Edge {
    pub const fn new(from: Asn, to: Asn) -> Self {
        Edge { from, to }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// An AS on the graph. `name` stays `None` until resolved, and also when resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsNode {
    pub asn: Asn,
    pub name: Option<String>,
}

impl AsNode {
    pub fn new(asn: Asn) -> Self {
        AsNode { asn, name: None }
    }

    /// `AS3333 | RIPE-NCC-AS Reseaux IP Europeens Network Coordination Centre (RIPE NCC), NL`
    /// once resolved, `AS3333` otherwise.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("AS{} | {}", self.asn, name),
            None => self.asn.fallback_label(),
        }
    }
}

/// A collector drawn as the starting point of the paths it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorAnchor {
    pub label: String,
    /// First hops of the paths reported by this collector's peers, with the index of the first
    /// path seen through each.
    pub peers: BTreeMap<Asn, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// The queried resource, drawn as the terminal node after every origin.
    pub resource: String,
    nodes: BTreeMap<Asn, AsNode>,
    edges: BTreeSet<Edge>,
    collectors: BTreeMap<String, CollectorAnchor>,
    origins: BTreeSet<Asn>,
    /// The first path added, highlighted when drawn.
    primary: Option<(String, AsPath)>,
    /// Index of the first path each edge was observed on, used to colour edges per path.
    #[serde(skip)]
    first_seen: BTreeMap<Edge, usize>,
}

impl Graph {
    /// Build a graph from bare paths, without collector anchors.
    pub fn from_paths<'a, I>(resource: impl Into<String>, paths: I) -> Graph
    where
        I: IntoIterator<Item = &'a AsPath>,
    {
        let mut builder = GraphBuilder::new(resource);
        for path in paths {
            builder.add_path(None, path);
        }
        builder.build()
    }

    /// Build one graph from the paths of all given collectors.
    pub fn from_collectors<'a, I>(resource: impl Into<String>, collectors: I) -> Graph
    where
        I: IntoIterator<Item = &'a Collector>,
    {
        let mut builder = GraphBuilder::new(resource);
        for collector in collectors {
            builder.add_collector(collector);
        }
        builder.build()
    }

    pub fn node(&self, asn: Asn) -> Option<&AsNode> {
        self.nodes.get(&asn)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &AsNode> {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut AsNode> {
        self.nodes.values_mut()
    }

    pub fn asns(&self) -> impl Iterator<Item = Asn> + '_ {
        self.nodes.keys().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    pub fn collectors(&self) -> impl Iterator<Item = &CollectorAnchor> {
        self.collectors.values()
    }

    pub fn is_origin(&self, asn: Asn) -> bool {
        self.origins.contains(&asn)
    }

    pub fn origins(&self) -> impl Iterator<Item = Asn> + '_ {
        self.origins.iter().copied()
    }

    /// Whether the edge lies on the first path added to the graph.
    pub fn is_primary(&self, edge: &Edge) -> bool {
        match &self.primary {
            Some((_, path)) => path.edges().any(|e| &e == edge),
            None => false,
        }
    }

    /// Whether the collector anchor edge `collector -> peer` starts the first path.
    pub fn is_primary_anchor(&self, collector: &str, peer: Asn) -> bool {
        match &self.primary {
            Some((label, path)) => label == collector && path.first_hop() == Some(peer),
            None => false,
        }
    }

    pub fn first_seen(&self, edge: &Edge) -> Option<usize> {
        self.first_seen.get(edge).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Accumulates paths into a [Graph].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    paths_added: usize,
}

impl GraphBuilder {
    pub fn new(resource: impl Into<String>) -> Self {
        GraphBuilder {
            graph: Graph {
                resource: resource.into(),
                ..Default::default()
            },
            paths_added: 0,
        }
    }

    /// Add every path of a collector, anchored at the collector node.
    pub fn add_collector(&mut self, collector: &Collector) -> &mut Self {
        let label = collector.to_string();
        self.graph
            .collectors
            .entry(label.clone())
            .or_insert_with(|| CollectorAnchor {
                label: label.clone(),
                peers: BTreeMap::new(),
            });
        for path in &collector.paths {
            self.add_path(Some(label.as_str()), path);
        }
        self
    }

    /// Add a single path. Empty paths are ignored.
    pub fn add_path(&mut self, collector: Option<&str>, path: &AsPath) -> &mut Self {
        let (Some(first_hop), Some(origin)) = (path.first_hop(), path.origin()) else {
            return self;
        };
        let graph = &mut self.graph;

        for asn in path.asns() {
            graph.nodes.entry(*asn).or_insert_with(|| AsNode::new(*asn));
        }
        for edge in path.edges() {
            debug_assert_ne!(edge.from, edge.to);
            graph.edges.insert(edge);
            graph.first_seen.entry(edge).or_insert(self.paths_added);
        }
        graph.origins.insert(origin);

        if let Some(label) = collector {
            if let Some(anchor) = graph.collectors.get_mut(label) {
                anchor.peers.entry(first_hop).or_insert(self.paths_added);
            }
        }
        if graph.primary.is_none() {
            graph.primary = Some((collector.unwrap_or_default().to_string(), path.clone()));
        }

        self.paths_added += 1;
        self
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
