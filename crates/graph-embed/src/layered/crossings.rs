use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

/// Sort each layer so that fewer edges from the layer above cross
///
/// Layers are processed top to bottom. Within a layer, two neighbors are
/// swapped whenever that strictly lowers the crossings between their incoming
/// edges, until a full pass swaps nothing. This only reaches a local optimum.
pub(crate) fn reduce_crossings(graph: &DiGraphMap<usize, ()>, layers: &mut [Vec<usize>]) {
    for i in 1..layers.len() {
        let (above, below) = layers.split_at_mut(i);
        let upper = &above[i - 1];
        let lower = &mut below[0];

        let mut swapped = true;
        while swapped {
            swapped = false;
            for j in 0..lower.len().saturating_sub(1) {
                let (a, b) = (lower[j], lower[j + 1]);
                if pair_crossings(graph, upper, a, b) > pair_crossings(graph, upper, b, a) {
                    lower.swap(j, j + 1);
                    swapped = true;
                }
            }
        }
    }
}

/// Number of crossings between the edges of every pair of adjacent layers
///
/// Edges skipping a layer are not counted.
pub(crate) fn count_crossings(graph: &DiGraphMap<usize, ()>, layers: &[Vec<usize>]) -> usize {
    layers
        .windows(2)
        .map(|pair| {
            let (upper, lower) = (&pair[0], &pair[1]);
            lower
                .iter()
                .enumerate()
                .map(|(j, &a)| {
                    lower[j + 1..]
                        .iter()
                        .map(|&b| pair_crossings(graph, upper, a, b))
                        .sum::<usize>()
                })
                .sum::<usize>()
        })
        .sum()
}

/// Crossings between the edges entering `a` and `b` from `upper` when `a` is
/// placed left of `b`
fn pair_crossings(graph: &DiGraphMap<usize, ()>, upper: &[usize], a: usize, b: usize) -> usize {
    let sources = |node: usize| -> Vec<usize> {
        graph
            .neighbors_directed(node, Direction::Incoming)
            .filter_map(|source| upper.iter().position(|&n| n == source))
            .collect()
    };

    let (left, right) = (sources(a), sources(b));
    left.iter()
        .map(|&l| right.iter().filter(|&&r| l > r).count())
        .sum()
}
