use std::collections::BTreeSet;

/// Edges to reverse so that the graph becomes acyclic
///
/// Repeatedly strips every node without outgoing edges or without incoming
/// edges, along with its edges. Whatever survives lies on a cycle: the first
/// remaining edge is picked for reversal and removed, and stripping resumes.
/// Self-loops are expected to be filtered out beforehand.
pub(crate) fn feedback_edges(size: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut nodes: BTreeSet<usize> = (0..size).collect();
    let mut edges = edges.to_vec();
    let mut feedback = Vec::new();

    loop {
        strip(&mut nodes, &mut edges);
        if edges.is_empty() {
            break;
        }
        feedback.push(edges.remove(0));
    }

    feedback
}

fn strip(nodes: &mut BTreeSet<usize>, edges: &mut Vec<(usize, usize)>) {
    loop {
        let removable: Vec<usize> = nodes
            .iter()
            .copied()
            .filter(|&node| {
                let leaf = edges.iter().all(|&(from, _)| from != node);
                let source = edges.iter().all(|&(_, to)| to != node);
                leaf || source
            })
            .collect();

        if removable.is_empty() {
            return;
        }

        for node in &removable {
            nodes.remove(node);
        }
        edges.retain(|(from, to)| nodes.contains(from) && nodes.contains(to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_acyclic_graph() {
        let edges = [(0, 1), (1, 2), (0, 2), (3, 2)];
        assert!(feedback_edges(4, &edges).is_empty());
        assert!(feedback_edges(0, &[]).is_empty());
    }

    #[test]
    fn test_cycle() {
        let edges = [(0, 1), (1, 2), (2, 0)];
        assert_eq!(feedback_edges(3, &edges), vec![(0, 1)]);
    }

    #[test]
    fn test_cycle_behind_a_tail() {
        // 0 -> 1 -> 2 -> 3 -> 1, the tail gets stripped first
        let edges = [(0, 1), (1, 2), (2, 3), (3, 1)];
        assert_eq!(feedback_edges(4, &edges), vec![(1, 2)]);
    }

    #[test]
    fn test_two_cycles() {
        let edges = [(0, 1), (1, 0), (2, 3), (3, 2), (1, 2)];
        assert_eq!(feedback_edges(4, &edges), vec![(0, 1), (2, 3)]);
    }
}
