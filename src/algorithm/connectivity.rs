//! 强连通性检测
//!
//! 对每个顶点做一次深度优先可达性遍历，任一顶点无法到达全部顶点即判定为非强连通。
//! 总代价 O(V·(V+E))。

use crate::error::{Error, Result};
use crate::graph::{Digraph, VertexId};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// 连通性检测器
pub struct Connectivity<'a, V, E> {
    graph: &'a Digraph<V, E>,
}

impl<'a, V, E> Connectivity<'a, V, E> {
    /// 创建检测器
    pub fn new(graph: &'a Digraph<V, E>) -> Self {
        Self { graph }
    }

    /// 任意两点是否互相可达。空图和单顶点图视为强连通。
    pub fn is_strongly_connected(&self) -> bool {
        let total = self.graph.vertex_count();

        for &start in self.graph.vertex_map().keys() {
            let reached = self.dfs(start);
            if reached.len() < total {
                debug!(
                    %start,
                    reached = reached.len(),
                    total,
                    "graph is not strongly connected"
                );
                return false;
            }
            trace!(%start, "reaches every vertex");
        }

        debug!(total, "graph is strongly connected");
        true
    }

    /// 从起点可达的所有顶点（含起点）
    pub fn reachable_from(&self, start: VertexId) -> Result<BTreeSet<VertexId>> {
        if !self.graph.contains_vertex(start) {
            return Err(Error::VertexNotFound {
                op: "reachable_from",
                id: start,
            });
        }
        Ok(self.dfs(start))
    }

    /// 迭代式深度优先遍历，`start` 必须存在
    fn dfs(&self, start: VertexId) -> BTreeSet<VertexId> {
        let vertices = self.graph.vertex_map();
        let mut visited = BTreeSet::new();
        let mut stack = vec![start];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(vertex) = vertices.get(&current) {
                for edge in vertex.edges().iter().rev() {
                    if !visited.contains(&edge.to()) {
                        stack.push(edge.to());
                    }
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn graph_with(vertices: &[VertexId], edges: &[(VertexId, VertexId)]) -> Digraph<(), ()> {
        let mut graph = Digraph::new();
        for &v in vertices {
            graph.add_vertex(v, ()).unwrap();
        }
        for &(from, to) in edges {
            graph.add_edge(from, to, ()).unwrap();
        }
        graph
    }

    /// 传递闭包，用于校验
    fn closure_says_strongly_connected(graph: &Digraph<(), ()>) -> bool {
        let ids = graph.vertices();
        let n = ids.len();
        let index = |id: VertexId| ids.iter().position(|&v| v == id).unwrap();
        let mut reach = vec![vec![false; n]; n];
        for (i, row) in reach.iter_mut().enumerate() {
            row[i] = true;
        }
        for (from, to) in graph.edges() {
            reach[index(from)][index(to)] = true;
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if reach[i][k] && reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }
        reach.iter().all(|row| row.iter().all(|&r| r))
    }

    #[test]
    fn test_empty_and_single_vertex() {
        assert!(graph_with(&[], &[]).is_strongly_connected());
        assert!(graph_with(&[5], &[]).is_strongly_connected());
    }

    #[test]
    fn test_two_vertices() {
        let mut graph = graph_with(&[1, 2], &[(1, 2)]);
        assert!(!graph.is_strongly_connected());

        graph.add_edge(2, 1, ()).unwrap();
        assert!(graph.is_strongly_connected());
    }

    #[test]
    fn test_directed_cycle() {
        for n in 2..8_i64 {
            let vertices: Vec<VertexId> = (0..n).map(|i| i * 10).collect();
            let edges: Vec<(VertexId, VertexId)> = (0..n)
                .map(|i| (i * 10, ((i + 1) % n) * 10))
                .collect();
            let mut graph = graph_with(&vertices, &edges);
            assert!(graph.is_strongly_connected(), "cycle of {} vertices", n);

            graph.remove_edge((n - 1) * 10, 0).unwrap();
            assert!(!graph.is_strongly_connected(), "broken cycle of {} vertices", n);
        }
    }

    #[test]
    fn test_isolated_vertex_breaks_connectivity() {
        let graph = graph_with(&[1, 2, 3], &[(1, 2), (2, 1)]);
        assert!(!graph.is_strongly_connected());
    }

    #[test]
    fn test_reachable_from() {
        // 1 -> 2 -> 3, 4 -> 1
        let graph = graph_with(&[1, 2, 3, 4], &[(1, 2), (2, 3), (4, 1)]);

        let reached = graph.reachable_from(1).unwrap();
        assert_eq!(reached.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);

        let reached = graph.reachable_from(3).unwrap();
        assert_eq!(reached.into_iter().collect::<Vec<_>>(), vec![3]);

        assert!(graph.reachable_from(9).unwrap_err().is_vertex_not_found());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 100_000_i64;
        let mut graph: Digraph<(), ()> = Digraph::new();
        for i in 0..n {
            graph.add_vertex(i, ()).unwrap();
        }
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1, ()).unwrap();
        }

        assert_eq!(graph.reachable_from(0).unwrap().len(), n as usize);
        assert!(!graph.is_strongly_connected());
    }

    #[test]
    fn test_matches_transitive_closure() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let n: i64 = rng.gen_range(1..7);
            let vertices: Vec<VertexId> = (0..n).collect();
            let mut edges = Vec::new();
            for from in 0..n {
                for to in 0..n {
                    if rng.gen_bool(0.35) {
                        edges.push((from, to));
                    }
                }
            }
            let graph = graph_with(&vertices, &edges);

            assert_eq!(
                graph.is_strongly_connected(),
                closure_says_strongly_connected(&graph),
                "edges: {:?}",
                edges
            );
        }
    }
}
