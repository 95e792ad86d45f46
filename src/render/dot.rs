//! Graphviz DOT serialization of a [Graph].
//!
//! Collectors, origins and the queried resource are drawn as filled boxes, transit ASes as
//! ellipses. Edges of the first path are bold red, every other path gets its own dashed colour.
use crate::models::{AsNode, Graph};
use std::fmt::Write;

const HIGHLIGHT: &str = "#F5A9A9";
const PREFIX_NODE: &str = "prefix";

/// Serialize `graph` into a DOT digraph.
pub fn to_dot(graph: &Graph) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_dot(&mut out, graph);
    out
}

fn write_dot(out: &mut String, graph: &Graph) -> std::fmt::Result {
    writeln!(out, "digraph BGPMAP {{")?;
    writeln!(out, "  node [style=filled, fontsize=10];")?;
    writeln!(out, "  edge [fontsize=7];")?;

    for anchor in graph.collectors() {
        writeln!(
            out,
            "  {} [label={}, shape=box, fillcolor=\"{}\"];",
            quote(&collector_id(&anchor.label)),
            html_label(&[anchor.label.as_str()]),
            HIGHLIGHT
        )?;
    }

    for node in graph.nodes() {
        let on_primary = graph
            .edges()
            .any(|e| graph.is_primary(e) && (e.from == node.asn || e.to == node.asn))
            || graph
                .collectors()
                .any(|c| graph.is_primary_anchor(&c.label, node.asn));
        let (shape, fill) = match (graph.is_origin(node.asn), on_primary) {
            (true, _) => ("box", HIGHLIGHT),
            (false, true) => ("ellipse", HIGHLIGHT),
            (false, false) => ("ellipse", "white"),
        };
        writeln!(
            out,
            "  {} [label={}, shape={}, fillcolor=\"{}\"];",
            quote(&node.asn.fallback_label()),
            html_label(&node_lines(node)),
            shape,
            fill
        )?;
    }

    if graph.origins().next().is_some() {
        writeln!(
            out,
            "  {} [label={}, shape=box, fillcolor=\"{}\"];",
            quote(PREFIX_NODE),
            html_label(&[graph.resource.as_str()]),
            HIGHLIGHT
        )?;
    }

    for anchor in graph.collectors() {
        for (peer, index) in &anchor.peers {
            let primary = graph.is_primary_anchor(&anchor.label, *peer);
            let label = match primary {
                true => format!("{}*", peer),
                false => peer.to_string(),
            };
            writeln!(
                out,
                "  {} -> {} [label={}, {}];",
                quote(&collector_id(&anchor.label)),
                quote(&peer.fallback_label()),
                quote(&label),
                edge_style(primary, *index)
            )?;
        }
    }

    for edge in graph.edges() {
        writeln!(
            out,
            "  {} -> {} [{}];",
            quote(&edge.from.fallback_label()),
            quote(&edge.to.fallback_label()),
            edge_style(graph.is_primary(edge), graph.first_seen(edge).unwrap_or(0))
        )?;
    }

    for origin in graph.origins() {
        writeln!(
            out,
            "  {} -> {} [style=bold, color=red];",
            quote(&origin.fallback_label()),
            quote(PREFIX_NODE)
        )?;
    }

    writeln!(out, "}}")
}

/// Style of an edge first seen on the `index`-th path.
fn edge_style(primary: bool, index: usize) -> String {
    if primary {
        return "style=bold, color=red".to_string();
    }
    format!("style=dashed, color=\"{}\"", path_color(index))
}

/// Stable, well spread colour for the n-th path.
pub fn path_color(index: usize) -> String {
    let rgb = (index as u32).wrapping_add(1).wrapping_mul(0x9E37_79B1) >> 8;
    format!("#{:06x}", rgb & 0x00FF_FFFF)
}

/// `AS3333 | RIPE-NCC-AS`, then the rest of the name on a second line.
fn node_lines(node: &AsNode) -> Vec<String> {
    let label = node.label();
    match &node.name {
        Some(name) => match name.split_once(' ') {
            Some((first, rest)) => vec![format!("AS{} | {}", node.asn, first), rest.to_string()],
            None => vec![label],
        },
        None => vec![label],
    }
}

fn collector_id(label: &str) -> String {
    format!("collector {}", label)
}

/// Quote a DOT identifier.
pub fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Escape text for use inside an HTML-like label.
pub fn escape(label: &str) -> String {
    label
        .replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

fn html_label<S: AsRef<str>>(lines: &[S]) -> String {
    let body = lines
        .iter()
        .map(|l| escape(l.as_ref()))
        .collect::<Vec<_>>()
        .join("<BR/>");
    format!(
        "<<TABLE CELLBORDER=\"0\" BORDER=\"0\" CELLPADDING=\"0\" CELLSPACING=\"0\"><TR><TD ALIGN=\"CENTER\">{}</TD></TR></TABLE>>",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AsPath, Asn, Collector};

    fn sample() -> Graph {
        let rrc = Collector::new("RRC00", "Amsterdam, Netherlands").with_paths(vec![
            AsPath::from_sequence([1, 2, 3]),
            AsPath::from_sequence([4, 2, 3]),
        ]);
        Graph::from_collectors("193.0.0.0/21", [&rrc])
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("A&B <x>"), "A&amp;B &lt;x&gt;");
        assert_eq!(quote(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }

    #[test]
    fn test_dot_document() {
        let dot = to_dot(&sample());
        assert!(dot.starts_with("digraph BGPMAP {"));
        assert!(dot.trim_end().ends_with('}'));

        assert!(dot.contains("\"collector RRC00 - Amsterdam, Netherlands\" [label=<"));
        assert!(dot.contains("\"AS1\" -> \"AS2\" [style=bold, color=red];"));
        assert!(dot.contains("\"AS2\" -> \"AS3\" [style=bold, color=red];"));
        assert!(dot.contains(&format!(
            "\"AS4\" -> \"AS2\" [style=dashed, color=\"{}\"];",
            path_color(1)
        )));
        assert!(dot.contains("\"AS3\" -> \"prefix\" [style=bold, color=red];"));
        assert!(dot.contains(
            "\"collector RRC00 - Amsterdam, Netherlands\" -> \"AS1\" [label=\"1*\", style=bold, color=red];"
        ));
        assert!(dot.contains("193.0.0.0/21"));

        // origin drawn as a box, transit AS off the primary path as a white ellipse
        assert!(dot.contains("shape=box, fillcolor=\"#F5A9A9\"];\n  \"AS4\""));
        assert!(dot.contains("shape=ellipse, fillcolor=\"white\"];"));
    }

    #[test]
    fn test_node_labels_escaped() {
        let mut graph = sample();
        for node in graph.nodes_mut() {
            if node.asn == Asn::new(2) {
                node.name = Some("AT&T-AS <transit>".to_string());
            }
        }
        let dot = to_dot(&graph);
        assert!(dot.contains("AS2 | AT&amp;T-AS<BR/>&lt;transit&gt;"));
        assert!(dot.contains(">AS3</TD>"));
    }

    #[test]
    fn test_anchor_edges_use_path_color() {
        let rrc = Collector::new("RRC00", "Amsterdam").with_paths(vec![
            AsPath::from_sequence([1, 3]),
            AsPath::from_sequence([4, 3]),
            AsPath::from_sequence([5, 3]),
        ]);
        let dot = to_dot(&Graph::from_collectors("192.0.2.0/24", [&rrc]));
        for (peer, index) in [(4, 1), (5, 2)] {
            let anchor = format!(
                "\"collector RRC00 - Amsterdam\" -> \"AS{}\" [label=\"{}\", style=dashed, color=\"{}\"];",
                peer,
                peer,
                path_color(index)
            );
            assert!(dot.contains(&anchor), "{}", dot);
            assert!(dot.contains(&format!(
                "\"AS{}\" -> \"AS3\" [style=dashed, color=\"{}\"];",
                peer,
                path_color(index)
            )));
        }
    }

    #[test]
    fn test_path_colors_differ() {
        assert_ne!(path_color(0), path_color(1));
        assert_eq!(path_color(3), path_color(3));
        assert_eq!(path_color(5).len(), 7);
    }
}
