use strata::graph::{EdgeId, HasLength, NodeId, SegmentData, Subgraph};
use strata::{CancellationToken, Error, Layering, LayoutConfig, layering, position};

fn add_segments(g: &mut Subgraph, lengths: &[u64]) -> Vec<NodeId> {
    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| g.add_segment(SegmentData::new(i as u32, format!("s{i}"), len)))
        .collect()
}

/// `0 -> 1 -> {2, 3} -> 4 -> 5`, positioned.
fn positioned_diamond() -> (Subgraph, Vec<NodeId>, Vec<EdgeId>) {
    let mut g = Subgraph::new();
    let n = add_segments(&mut g, &[10, 700, 500, 1400, 1200, 10]);
    let e = vec![
        g.add_edge(n[0], n[1]),
        g.add_edge(n[1], n[2]),
        g.add_edge(n[1], n[3]),
        g.add_edge(n[2], n[4]),
        g.add_edge(n[3], n[4]),
        g.add_edge(n[4], n[5]),
    ];
    position::run(&mut g, &LayoutConfig::default()).unwrap();
    (g, n, e)
}

fn run(g: &mut Subgraph) -> Layering {
    layering::run(g, &LayoutConfig::default(), &CancellationToken::new())
        .unwrap()
        .unwrap()
}

fn ids(layer: &[Option<NodeId>]) -> Vec<u32> {
    layer.iter().map(|s| s.map_or(u32::MAX, |v| v.0)).collect()
}

#[test]
fn layering_of_an_empty_subgraph_is_empty() {
    let mut g = Subgraph::new();
    let layering = run(&mut g);
    assert!(layering.is_empty());
    assert!(layering.dummy_chains().is_empty());
}

#[test]
fn layering_places_nodes_in_the_first_common_open_slot_and_splices_dummies() {
    let (mut g, _, _) = positioned_diamond();
    let layering = run(&mut g);

    let got: Vec<Vec<u32>> = layering.layers().iter().map(|l| ids(l.slots())).collect();
    assert_eq!(
        got,
        vec![
            vec![0],
            vec![6],
            vec![1],
            vec![7, 8],
            vec![2, 3],
            vec![9, 3],
            vec![10, 11],
            vec![4],
            vec![4],
            vec![12],
            vec![5],
        ]
    );
    assert_eq!(layering.origin(), 0);
    assert_eq!(g.node_count(), 13);
}

#[test]
fn layering_membership_follows_the_band_formula() {
    let (mut g, n, _) = positioned_diamond();
    let layering = run(&mut g);
    let width = 1000i64;
    let ceil = |v: i64| (v + width - 1).div_euclid(width);

    for &v in &n {
        let node = g.node(v).unwrap();
        let x = node.x_position.unwrap();
        let start = ceil(x) - layering.origin();
        let end = (ceil(x + i64::from(node.length())) - layering.origin() - 1).max(start);
        let expected: Vec<usize> = (start as usize..=end as usize).collect();
        assert_eq!(layering.layers_of(v), expected, "node {v}");
    }
}

#[test]
fn layering_never_repeats_a_node_within_a_layer() {
    let (mut g, _, _) = positioned_diamond();
    let layering = run(&mut g);
    for layer in layering.layers() {
        let mut seen: Vec<NodeId> = layer.nodes().collect();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(total, layer.len(), "capacity is exact");
    }
}

#[test]
fn layering_lengthy_nodes_occupy_every_layer_they_span() {
    let (mut g, n, _) = positioned_diamond();
    let layering = run(&mut g);
    assert_eq!(layering.layers_of(n[3]), vec![4, 5]);
    assert_eq!(layering.layers_of(n[4]), vec![7, 8]);
    assert_eq!(layering.layers_of(n[2]), vec![4]);
}

#[test]
fn layering_keeps_a_lengthy_node_in_one_slot_across_its_span() {
    let mut g = Subgraph::new();
    // n1 takes slot 0 of layer 2 only, so n2 (layers 2..=4) must start at slot 1 everywhere.
    let n = add_segments(&mut g, &[10, 10, 2500, 10, 10, 10]);
    g.add_edge(n[0], n[1]);
    g.add_edge(n[0], n[2]);
    g.add_edge(n[1], n[3]);
    g.add_edge(n[1], n[4]);
    g.add_edge(n[3], n[5]);
    g.add_edge(n[4], n[5]);
    g.add_edge(n[2], n[5]);
    position::run(&mut g, &LayoutConfig::default()).unwrap();
    let layering = run(&mut g);

    assert_eq!(layering.layers_of(n[2]), vec![2, 3, 4]);
    for ix in 2..=4 {
        assert_eq!(layering.layer(ix).unwrap().position(n[2]), Some(1), "layer {ix}");
    }
    assert_eq!(layering.layer(4).unwrap().position(n[3]), Some(0));
    assert_eq!(layering.layer(4).unwrap().position(n[4]), Some(2));
}

#[test]
fn layering_grows_layers_to_find_a_common_slot() {
    let mut g = Subgraph::new();
    let n = add_segments(&mut g, &[10, 10, 10, 1500]);
    g.node_mut(n[0]).unwrap().x_position = Some(0);
    g.node_mut(n[1]).unwrap().x_position = Some(1_000);
    g.node_mut(n[2]).unwrap().x_position = Some(1_000);
    g.node_mut(n[3]).unwrap().x_position = Some(0);

    let layering = run(&mut g);
    assert_eq!(layering.layer(0).unwrap().slots(), &[Some(n[0]), None, Some(n[3])]);
    assert_eq!(layering.layer(1).unwrap().slots(), &[Some(n[1]), Some(n[2]), Some(n[3])]);
}

#[test]
fn layering_requires_positioned_nodes() {
    let mut g = Subgraph::new();
    add_segments(&mut g, &[10, 10]);
    assert!(matches!(
        layering::run(&mut g, &LayoutConfig::default(), &CancellationToken::new()),
        Err(Error::EmptyCollection { .. })
    ));
}

#[test]
fn layering_dummy_chain_has_one_node_per_skipped_layer() {
    let (mut g, n, e) = positioned_diamond();
    let layering = run(&mut g);

    // 2 -> 4 skips layers 5 and 6.
    let original = e[3];
    assert!(g.edge(original).unwrap().is_retired());
    let hops: Vec<_> = g
        .edges()
        .filter(|x| x.original() == Some(original))
        .collect();
    assert_eq!(hops.len(), 3);
    let dummies: Vec<NodeId> = g
        .nodes()
        .filter(|x| x.as_dummy().is_some_and(|d| d.original == original))
        .map(|x| x.id())
        .collect();
    assert_eq!(dummies.len(), 2);

    for w in hops.windows(2) {
        assert_eq!(w[0].to(), w[1].from());
    }
    assert_eq!(hops[0].from(), n[2]);
    assert_eq!(hops[2].to(), n[4]);

    for &d in &dummies {
        let data = g.node(d).unwrap().as_dummy().copied().unwrap();
        assert_eq!((data.source, data.destination), (n[2], n[4]));
        assert_eq!(g.node(d).unwrap().length(), 0);
    }
    assert_eq!(g.node(dummies[0]).unwrap().x_position, Some(5_000));
    assert_eq!(g.node(dummies[1]).unwrap().x_position, Some(6_000));
    assert!(layering.dummy_chains().contains(&dummies[0]));
    assert_eq!(layering.dummy_chains().len(), 6);
}

#[test]
fn layering_keeps_adjacent_edges_untouched() {
    let mut g = Subgraph::new();
    let n = add_segments(&mut g, &[10, 10]);
    let e = g.add_edge(n[0], n[1]);
    let config = LayoutConfig {
        edge_gap: 0,
        ..Default::default()
    };
    position::run(&mut g, &config).unwrap();
    let layering = layering::run(&mut g, &config, &CancellationToken::new())
        .unwrap()
        .unwrap();

    assert_eq!(layering.len(), 2);
    assert!(layering.dummy_chains().is_empty());
    assert!(!g.edge(e).unwrap().is_retired());
    assert_eq!(g.node_count(), 2);
}

#[test]
fn layering_origin_is_the_minimum_band() {
    let mut g = Subgraph::new();
    let n = add_segments(&mut g, &[10, 10]);
    g.add_edge(n[0], n[1]);
    g.node_mut(n[0]).unwrap().x_position = Some(3_000);
    g.node_mut(n[1]).unwrap().x_position = Some(4_000);

    let layering = run(&mut g);
    assert_eq!(layering.origin(), 3);
    assert_eq!(layering.layers_of(n[0]), vec![0]);
    assert_eq!(layering.layers_of(n[1]), vec![1]);
}

#[test]
fn layering_stops_when_cancelled() {
    let (mut g, _, _) = positioned_diamond();
    let cancel = CancellationToken::new();
    cancel.cancel();
    let out = layering::run(&mut g, &LayoutConfig::default(), &cancel).unwrap();
    assert!(out.is_none());
}
