/*!
ris-bgpmap draws maps of the BGP AS paths that RIPE NCC's Routing Information Service (RIS)
collectors see towards an address or prefix.

A run queries the [RIPEstat looking glass](https://stat.ripe.net/docs/data-api/api-endpoints/looking-glass),
collapses prepends in every reported path, merges the paths into a graph of AS adjacencies, names
each AS through [Team Cymru](https://www.team-cymru.org/IP-ASN-mapping.html)'s DNS service and
renders the graph with Graphviz.

# Example

```no_run
use ris_bgpmap::render::Graphviz;
use ris_bgpmap::resolver::CymruResolver;
use ris_bgpmap::ris::RipeStatClient;
use ris_bgpmap::{Bgpmap, BgpmapConfig};
use std::time::Duration;

let client = RipeStatClient::new(Duration::from_secs(30)).unwrap();
let resolver = CymruResolver::new(Duration::from_secs(5)).unwrap();
let mut bgpmap = Bgpmap::new(client, resolver, Graphviz::new(), BgpmapConfig::default());
for rendered in bgpmap.run_input("193.0.0.0/21").unwrap() {
    println!("{:?}", rendered.images);
}
```

The graph can also be built without any network access:

```
use ris_bgpmap::models::{AsPath, Graph};

let paths = [
    AsPath::from_sequence([1, 2, 3]),
    AsPath::from_sequence([1, 2, 2, 4]),
];
let graph = Graph::from_paths("192.0.2.0/24", &paths);
assert_eq!(graph.edges().count(), 3);
```
*/

pub mod bgpmap;
pub mod error;
pub mod models;
pub mod render;
pub mod resolver;
pub mod ris;

pub use bgpmap::{Bgpmap, BgpmapConfig, NamedGraph, RenderedGraph};
pub use error::BgpmapError;
