use graph_embed::{
    Bounds, CircularEmbedding, Dimension, Embedding, Graph, GridEmbedding, LayeredEmbedding,
    LinearEmbedding, Node, RandomEmbedding, SpectralEmbedding, SpringEmbedding, Vector2,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use test_log::test;

fn cycle(size: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..size {
        graph.add_node(Node::new(format!("n{i}")));
    }
    for i in 0..size {
        graph.add_edge_between(i, (i + 1) % size);
    }
    graph
}

/// A cycle with a tail and a chord, connected and not too regular
fn kite() -> Graph {
    [
        ("a", "b"),
        ("b", "c"),
        ("c", "d"),
        ("d", "a"),
        ("a", "c"),
        ("d", "e"),
        ("e", "f"),
    ]
    .into_iter()
    .collect()
}

fn all_embeddings() -> Vec<(&'static str, Box<dyn Embedding>)> {
    vec![
        ("grid", Box::new(GridEmbedding::default())),
        ("circular", Box::new(CircularEmbedding)),
        ("linear", Box::new(LinearEmbedding)),
        ("random", Box::new(RandomEmbedding::default())),
        ("random 3D", Box::new(RandomEmbedding::new(Dimension::Three))),
        ("spring", Box::new(SpringEmbedding::default())),
        ("spring 3D", Box::new(SpringEmbedding::new(Dimension::Three))),
        ("spectral", Box::new(SpectralEmbedding::default())),
        ("spectral 3D", Box::new(SpectralEmbedding::new(Dimension::Three))),
        ("layered", Box::new(LayeredEmbedding::default())),
    ]
}

fn assert_longer_axis_spans_unit_interval(graph: &Graph) {
    let bounds = Bounds::of(graph.nodes().map(|node| node.position)).unwrap();
    let extent = bounds.extent();
    assert!(bounds.min.x().abs() < 1e-9 && bounds.min.y().abs() < 1e-9, "{bounds:?}");
    assert!((extent.x().max(extent.y()) - 1.0).abs() < 1e-9, "{bounds:?}");
}

#[test]
fn test_positions_stay_in_unit_square() {
    for (name, embedding) in all_embeddings() {
        let mut graph = kite();
        embedding.embed(&mut graph);
        for node in graph.nodes() {
            let (x, y) = (node.x(), node.y());
            assert!(
                (-1e-9..=1.0 + 1e-9).contains(&x) && (-1e-9..=1.0 + 1e-9).contains(&y),
                "{name} placed {} at ({x}, {y})",
                node.name()
            );
        }
    }
}

#[test]
fn test_topology_is_untouched() {
    for (name, embedding) in all_embeddings() {
        let mut graph = kite();
        let names: Vec<String> = graph.nodes().map(|node| node.name().to_owned()).collect();
        let edges: Vec<_> = graph.edges().collect();

        embedding.embed(&mut graph);
        let after: Vec<String> = graph.nodes().map(|node| node.name().to_owned()).collect();
        assert_eq!(after, names, "{name}");
        assert_eq!(graph.edges().collect::<Vec<_>>(), edges, "{name}");
    }
}

#[test]
fn test_empty_graph_is_a_no_op() {
    for (_, embedding) in all_embeddings() {
        let mut graph = Graph::new();
        embedding.embed(&mut graph);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}

#[test]
fn test_rescaled_layouts_fill_the_unit_square() {
    let mut rng = StdRng::seed_from_u64(42);
    for dimension in [Dimension::Two, Dimension::Three] {
        let mut graph = kite();
        SpringEmbedding::new(dimension).run_with_rng(&mut graph, &mut rng);
        assert_longer_axis_spans_unit_interval(&graph);
    }

    let mut graph = kite();
    SpectralEmbedding::new(Dimension::Three).embed(&mut graph);
    assert_longer_axis_spans_unit_interval(&graph);
}

#[test]
fn test_deterministic_layouts_are_repeatable() {
    let embeddings: Vec<Box<dyn Embedding>> = vec![
        Box::new(GridEmbedding::default()),
        Box::new(CircularEmbedding),
        Box::new(LinearEmbedding),
        Box::new(SpringEmbedding::default()),
        Box::new(SpectralEmbedding::default()),
        Box::new(LayeredEmbedding::default()),
    ];
    for embedding in embeddings {
        let mut first = kite();
        embedding.embed(&mut first);

        let mut second = kite();
        RandomEmbedding::default().embed(&mut second);
        embedding.embed(&mut second);

        let positions = |graph: &Graph| graph.nodes().map(|node| node.position).collect::<Vec<_>>();
        assert_eq!(positions(&first), positions(&second));
    }
}

#[test]
fn test_spectral_falls_back_for_small_graphs() {
    for size in 1..4 {
        let mut spectral = cycle(size);
        SpectralEmbedding::default().embed(&mut spectral);
        let mut spring = cycle(size);
        SpringEmbedding::default().embed(&mut spring);

        let spectral: Vec<Vector2> = spectral.nodes().map(|node| node.position).collect();
        let spring: Vec<Vector2> = spring.nodes().map(|node| node.position).collect();
        assert_eq!(spectral, spring, "{size} nodes");
    }
}

#[test]
fn test_rotating_the_view_keeps_the_layout() {
    let mut graph = cycle(6);
    let mut spectral = SpectralEmbedding::new(Dimension::Three);
    spectral.embed(&mut graph);
    let before: Vec<_> = graph.nodes().map(|node| node.position_3d()).collect();

    spectral
        .plane
        .rotate_view(&mut graph, graph_embed::PlaneAxis::X, graph_embed::ROTATION_STEP);
    let after: Vec<_> = graph.nodes().map(|node| node.position_3d()).collect();
    assert_eq!(before, after);
    assert_longer_axis_spans_unit_interval(&graph);
}
