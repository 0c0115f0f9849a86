use crate::value::{Value, ValueId};
use num_traits::Float;

/// Builds a topological order of the nodes reachable from `root`.
///
/// Depth-first, predecessors in operand order, each node appended after all
/// of its predecessors and exactly once no matter how many paths reach it.
/// The walk uses an explicit stack so deep graphs (long sums, many layers)
/// cannot overflow the call stack.
///
/// `root` must be a valid index into `nodes`.
pub(crate) fn topological_sort<T: Float>(nodes: &[Value<T>], root: ValueId) -> Vec<ValueId> {
    let mut visited = vec![false; root.0 + 1];
    let mut sorted = Vec::new();
    // (node, predecessors already pushed)
    let mut stack = vec![(root, false)];

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            sorted.push(id);
            continue;
        }
        if visited[id.0] {
            continue;
        }
        visited[id.0] = true;
        stack.push((id, true));
        // Reversed so the first operand is visited first
        for pred in nodes[id.0].predecessors().rev() {
            if !visited[pred.0] {
                stack.push((pred, false));
            }
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_topological_sort_diamond() {
        // r = a*b + a ; a is reached through two paths
        let mut graph: Graph = Graph::new();
        let a = graph.leaf(2.0);
        let b = graph.leaf(3.0);
        let ab = graph.mul(a, b).unwrap();
        let r = graph.add(ab, a).unwrap();

        let order = topological_sort(&graph.nodes, r);
        assert_eq!(order, vec![a, b, ab, r]);
    }

    #[test]
    fn test_topological_sort_skips_unreachable() {
        let mut graph: Graph = Graph::new();
        let a = graph.leaf(1.0);
        let unrelated = graph.leaf(5.0);
        let t = graph.tanh(a).unwrap();

        let order = topological_sort(&graph.nodes, t);
        assert_eq!(order, vec![a, t]);
        assert!(!order.contains(&unrelated));
    }

    #[test]
    fn test_topological_sort_leaf_root() {
        let mut graph: Graph = Graph::new();
        let a = graph.leaf(1.0);
        assert_eq!(topological_sort(&graph.nodes, a), vec![a]);
    }

    #[test]
    fn test_topological_sort_deep_chain() {
        let mut graph: Graph = Graph::new();
        let mut x = graph.leaf(0.0);
        for _ in 0..100_000 {
            x = graph.add(x, 1.0).unwrap();
        }
        let order = topological_sort(&graph.nodes, x);
        assert_eq!(order.len(), graph.len());
        assert_eq!(order.last(), Some(&x));
    }
}
