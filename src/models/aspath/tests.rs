use crate::models::*;
use itertools::Itertools;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn test_prepends_collapsed() {
    let path = AsPath::from_sequence([100, 100, 200, 300, 300, 300]);
    assert_eq!(path, AsPath::from_sequence([100, 200, 300]));
    assert_eq!(path.len(), 3);

    let edges = path.edges().collect_vec();
    assert_eq!(
        edges,
        vec![
            Edge::new(Asn::new(100), Asn::new(200)),
            Edge::new(Asn::new(200), Asn::new(300))
        ]
    );
}

#[test]
fn test_no_self_loops() {
    let paths: [Vec<u32>; 5] = [
        vec![1, 1, 1, 1],
        vec![5, 6, 6, 5, 5],
        vec![7],
        vec![],
        vec![9, 9, 8, 8, 9, 9, 8],
    ];
    for seq in paths {
        let path = AsPath::from_sequence(&seq);
        for edge in path.edges() {
            assert_ne!(edge.from, edge.to, "self loop in {:?}", seq);
        }
    }
}

#[test]
fn test_non_consecutive_repeats_kept() {
    let path = AsPath::from_sequence([1, 2, 1, 3]);
    assert_eq!(path.to_string(), "1 2 1 3");
    assert_eq!(path.edges().count(), 3);
}

#[test]
fn test_push() {
    let mut path = AsPath::new();
    path.push(Asn::new(1));
    path.push(Asn::new(1));
    path.push(Asn::new(2));
    assert_eq!(path.asns(), &[Asn::new(1), Asn::new(2)]);
    assert_eq!(path.first_hop(), Some(Asn::new(1)));
    assert_eq!(path.origin(), Some(Asn::new(2)));
}

#[test]
fn test_parse_looking_glass_path() {
    let path = AsPath::from_str("3333 1103 1103 12654").unwrap();
    assert_eq!(path.to_string(), "3333 1103 12654");

    // AS-set tokens are dropped, and the remaining neighbours still collapse
    let path = AsPath::from_str("1 2 {64512,64513} 2 3").unwrap();
    assert_eq!(path.to_string(), "1 2 3");

    let path = AsPath::from_str("   ").unwrap();
    assert!(path.is_empty());
    assert_eq!(path.origin(), None);
    assert_eq!(path.edges().count(), 0);
}

#[test]
fn test_edges_form_set() {
    let a = AsPath::from_sequence([1, 2, 3]);
    let b = AsPath::from_sequence([1, 2, 4]);
    let edges: HashSet<Edge> = a.edges().chain(b.edges()).collect();
    assert_eq!(edges.len(), 3);
}
