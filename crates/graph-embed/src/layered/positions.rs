use crate::Graph;

/// Place layer `i` of `L` at `y = i / (L - 1)` and spread its nodes evenly
/// over the width, keeping a margin of one slot on both sides
///
/// A single layer is placed at mid height.
pub(crate) fn place_layers(layers: &[Vec<usize>], graph: &mut Graph) {
    let last = layers.len().saturating_sub(1);

    for (i, layer) in layers.iter().enumerate() {
        let y = if last == 0 {
            0.5
        } else {
            i as f64 / last as f64
        };

        let slots = (layer.len() + 1) as f64;
        for (j, &index) in layer.iter().enumerate() {
            if let Some(node) = graph.node_mut(index) {
                node.place((j + 1) as f64 / slots, y);
            }
        }
    }
}
