/*!
models module defines the data model shared by the looking-glass client, the graph builder and
the renderer.
*/
mod aspath;
mod collector;
mod graph;
mod network;

pub use aspath::*;
pub use collector::*;
pub use graph::*;
pub use network::*;
