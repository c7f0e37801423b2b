use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use tracing::warn;

/// Assign layers by repeatedly peeling off the nodes without incoming edges
///
/// Each layer holds the nodes that became sources once the previous layers
/// were removed, in ascending order. The graph is expected to be acyclic; any
/// node still on a cycle ends up in one last layer.
pub(crate) fn assign_layers(graph: &DiGraphMap<usize, ()>) -> Vec<Vec<usize>> {
    let mut remaining = graph.clone();
    let mut layers = Vec::new();

    loop {
        let mut sources: Vec<usize> = remaining
            .nodes()
            .filter(|&node| {
                remaining
                    .neighbors_directed(node, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect();
        if sources.is_empty() {
            break;
        }

        sources.sort_unstable();
        for &node in &sources {
            remaining.remove_node(node);
        }
        layers.push(sources);
    }

    if remaining.node_count() > 0 {
        warn!(
            "{} nodes are still on a cycle, placing them on the last layer",
            remaining.node_count()
        );
        let mut rest: Vec<usize> = remaining.nodes().collect();
        rest.sort_unstable();
        layers.push(rest);
    }

    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn graph_of(size: usize, edges: &[(usize, usize)]) -> DiGraphMap<usize, ()> {
        let mut graph = DiGraphMap::new();
        for node in 0..size {
            graph.add_node(node);
        }
        for &(from, to) in edges {
            graph.add_edge(from, to, ());
        }
        graph
    }

    #[test]
    fn test_chain() {
        let graph = graph_of(3, &[(2, 1), (1, 0)]);
        assert_eq!(assign_layers(&graph), vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn test_longest_path_wins() {
        // 3 sits below 1 even though 0 reaches it directly
        let graph = graph_of(4, &[(0, 1), (1, 3), (0, 3), (2, 3)]);
        assert_eq!(
            assign_layers(&graph),
            vec![vec![0, 2], vec![1], vec![3]]
        );
    }

    #[test]
    fn test_layers_are_sorted() {
        let graph = graph_of(4, &[(3, 1), (3, 0), (2, 0)]);
        assert_eq!(assign_layers(&graph), vec![vec![2, 3], vec![0, 1]]);
    }

    #[test]
    fn test_cycle_goes_last() {
        let graph = graph_of(3, &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(assign_layers(&graph), vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(assign_layers(&DiGraphMap::new()).is_empty());
    }
}
