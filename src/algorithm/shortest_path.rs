//! Dijkstra 单源最短路径
//!
//! 最小优先队列不支持 decrease-key：距离被改进的顶点会再次入队，
//! 每个顶点第一次出队时标记为已确定，之后出队的过期条目直接跳过。

use crate::error::{Error, Result};
use crate::graph::{Digraph, VertexId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use tracing::{debug, trace};

/// 最短路径树
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathTree {
    /// 起点
    source: VertexId,
    /// 每个顶点的前驱（起点与不可达顶点指向自身）
    predecessors: BTreeMap<VertexId, VertexId>,
    /// 可达顶点的最短距离
    distances: BTreeMap<VertexId, f64>,
}

impl ShortestPathTree {
    /// 起点
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// 所有顶点的前驱
    pub fn predecessors(&self) -> &BTreeMap<VertexId, VertexId> {
        &self.predecessors
    }

    pub fn into_predecessors(self) -> BTreeMap<VertexId, VertexId> {
        self.predecessors
    }

    /// 指定顶点的前驱，顶点不在图中时返回 None
    pub fn predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessors.get(&vertex).copied()
    }

    /// 最短距离，不可达时返回 None
    pub fn distance(&self, vertex: VertexId) -> Option<f64> {
        self.distances.get(&vertex).copied()
    }

    /// 可达顶点的最短距离
    pub fn distances(&self) -> &BTreeMap<VertexId, f64> {
        &self.distances
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.distances.contains_key(&vertex)
    }

    /// 重构从起点到 `target` 的路径（含两端），不可达时返回 None
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            let prev = self.predecessor(current)?;
            if prev == current {
                return None;
            }
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// 优先队列条目，按 (距离, 顶点 ID) 升序出队
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap 是最大堆，反转比较得到最小堆
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// 单个顶点的求解状态
#[derive(Debug, Clone, Copy)]
struct VertexState {
    settled: bool,
    distance: f64,
    predecessor: VertexId,
}

/// Dijkstra 求解器
///
/// `edge_weight` 把边负载映射为非负权重；遇到负数或 NaN 权重时返回
/// [`Error::InvalidWeight`]。
pub struct Dijkstra<'a, V, E, F> {
    graph: &'a Digraph<V, E>,
    edge_weight: F,
}

impl<'a, V, E, F> Dijkstra<'a, V, E, F>
where
    F: Fn(&E) -> f64,
{
    /// 创建求解器
    pub fn new(graph: &'a Digraph<V, E>, edge_weight: F) -> Self {
        Self { graph, edge_weight }
    }

    /// 计算从 `start` 出发的最短路径树
    pub fn run(&self, start: VertexId) -> Result<ShortestPathTree> {
        let vertices = self.graph.vertex_map();
        if !vertices.contains_key(&start) {
            return Err(Error::VertexNotFound {
                op: "find_shortest_paths",
                id: start,
            });
        }

        let mut states: BTreeMap<VertexId, VertexState> = vertices
            .keys()
            .map(|&id| {
                let state = VertexState {
                    settled: false,
                    distance: if id == start { 0.0 } else { f64::INFINITY },
                    predecessor: id,
                };
                (id, state)
            })
            .collect();

        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            distance: 0.0,
            vertex: start,
        });

        let mut settled_count = 0usize;
        while let Some(QueueEntry { distance, vertex }) = queue.pop() {
            let Some(state) = states.get_mut(&vertex) else {
                continue;
            };
            if state.settled {
                trace!(%vertex, distance, "skipping stale queue entry");
                continue;
            }
            state.settled = true;
            settled_count += 1;
            let base = state.distance;
            trace!(%vertex, distance = base, "settled");

            let Some(source) = vertices.get(&vertex) else {
                continue;
            };
            for edge in source.edges() {
                let weight = (self.edge_weight)(edge.info());
                if weight.is_nan() || weight < 0.0 {
                    return Err(Error::InvalidWeight {
                        from: vertex,
                        to: edge.to(),
                        weight,
                    });
                }

                let to = edge.to();
                let candidate = base + weight;
                if let Some(target) = states.get_mut(&to) {
                    if !target.settled && candidate < target.distance {
                        target.distance = candidate;
                        target.predecessor = vertex;
                        queue.push(QueueEntry {
                            distance: candidate,
                            vertex: to,
                        });
                        trace!(from = %vertex, %to, distance = candidate, "relaxed");
                    }
                }
            }
        }

        debug!(
            %start,
            settled = settled_count,
            total = vertices.len(),
            "shortest paths computed"
        );

        let mut predecessors = BTreeMap::new();
        let mut distances = BTreeMap::new();
        for (id, state) in states {
            predecessors.insert(id, state.predecessor);
            if state.distance.is_finite() {
                distances.insert(id, state.distance);
            }
        }

        Ok(ShortestPathTree {
            source: start,
            predecessors,
            distances,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn weighted(vertices: &[VertexId], edges: &[(VertexId, VertexId, f64)]) -> Digraph<(), f64> {
        let mut graph = Digraph::new();
        for &v in vertices {
            graph.add_vertex(v, ()).unwrap();
        }
        for &(from, to, w) in edges {
            graph.add_edge(from, to, w).unwrap();
        }
        graph
    }

    fn identity(w: &f64) -> f64 {
        *w
    }

    #[test]
    fn test_two_hops_beat_direct_edge() {
        let graph = weighted(&[1, 2, 3], &[(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)]);

        let preds = graph.find_shortest_paths(1, identity).unwrap();
        assert_eq!(preds, BTreeMap::from([(1, 1), (2, 1), (3, 2)]));

        let tree = Dijkstra::new(&graph, identity).run(1).unwrap();
        assert_eq!(tree.source(), 1);
        assert_eq!(tree.distance(3), Some(2.0));
        assert_eq!(tree.path_to(3), Some(vec![1, 2, 3]));
        assert_eq!(tree.path_to(1), Some(vec![1]));
    }

    #[test]
    fn test_unreachable_vertex_maps_to_itself() {
        let graph = weighted(&[1, 2, 3, 4], &[(1, 2, 1.0), (2, 3, 1.0), (4, 1, 1.0)]);

        let tree = Dijkstra::new(&graph, identity).run(1).unwrap();
        assert_eq!(tree.predecessor(4), Some(4));
        assert!(!tree.is_reachable(4));
        assert_eq!(tree.distance(4), None);
        assert_eq!(tree.path_to(4), None);
        assert_eq!(tree.predecessors().len(), 4);
    }

    #[test]
    fn test_missing_start_vertex() {
        let graph = weighted(&[1], &[]);
        let err = graph.find_shortest_paths(2, identity).unwrap_err();
        assert!(matches!(err, Error::VertexNotFound { op: "find_shortest_paths", id: 2 }));
    }

    #[test]
    fn test_equal_cost_keeps_first_predecessor() {
        // 1 -> 2 直接为 2，经 3 也为 2，后到的相等距离不覆盖前驱
        let graph = weighted(&[1, 2, 3], &[(1, 2, 2.0), (1, 3, 1.0), (3, 2, 1.0)]);

        let preds = graph.find_shortest_paths(1, identity).unwrap();
        assert_eq!(preds[&2], 1);
    }

    #[test]
    fn test_equal_distance_pops_lowest_id_first() {
        // 菱形：2 和 3 距离相同，2 先出队，因此 4 的前驱为 2
        for edges in [
            vec![(1, 2, 1.0), (1, 3, 1.0), (2, 4, 1.0), (3, 4, 1.0)],
            vec![(1, 3, 1.0), (1, 2, 1.0), (3, 4, 1.0), (2, 4, 1.0)],
        ] {
            let graph = weighted(&[1, 2, 3, 4], &edges);
            let preds = graph.find_shortest_paths(1, identity).unwrap();
            assert_eq!(preds[&4], 2);
        }
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let graph = weighted(&[1, 2], &[(1, 2, -1.0)]);
        let err = graph.find_shortest_paths(1, identity).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { from: 1, to: 2, .. }));

        let graph = weighted(&[1, 2], &[(1, 2, f64::NAN)]);
        assert!(matches!(
            graph.find_shortest_paths(1, identity).unwrap_err(),
            Error::InvalidWeight { .. }
        ));
    }

    #[test]
    fn test_huge_weights_never_wrap() {
        let graph = weighted(
            &[1, 2, 3, 4],
            &[
                (1, 2, f64::MAX),
                (2, 3, f64::MAX),
                (1, 4, f64::INFINITY),
            ],
        );

        let tree = Dijkstra::new(&graph, identity).run(1).unwrap();
        assert_eq!(tree.distance(2), Some(f64::MAX));
        assert!(!tree.is_reachable(3));
        assert_eq!(tree.predecessor(3), Some(3));
        assert!(!tree.is_reachable(4));
        assert_eq!(tree.predecessor(4), Some(4));
    }

    #[test]
    fn test_weight_function_uses_payload() {
        #[derive(Clone)]
        struct Road {
            km: u32,
        }

        let mut graph: Digraph<&str, Road> = Digraph::new();
        graph.add_vertex(1, "a").unwrap();
        graph.add_vertex(2, "b").unwrap();
        graph.add_vertex(3, "c").unwrap();
        graph.add_edge(1, 3, Road { km: 10 }).unwrap();
        graph.add_edge(1, 2, Road { km: 3 }).unwrap();
        graph.add_edge(2, 3, Road { km: 4 }).unwrap();

        let preds = graph
            .find_shortest_paths(1, |road: &Road| road.km as f64)
            .unwrap();
        assert_eq!(preds[&3], 2);

        // 按跳数计算时直连更短
        let preds = graph.find_shortest_paths(1, |_: &Road| 1.0).unwrap();
        assert_eq!(preds[&3], 1);
    }

    #[test]
    fn test_tree_serialization() {
        let graph = weighted(&[1, 2, 3], &[(1, 2, 1.5)]);
        let tree = Dijkstra::new(&graph, identity).run(1).unwrap();

        let json = serde_json::to_string(&tree).unwrap();
        let restored: ShortestPathTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_matches_floyd_warshall() {
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..100 {
            let n: i64 = rng.gen_range(1..9);
            let vertices: Vec<VertexId> = (0..n).collect();
            let mut edges = Vec::new();
            for from in 0..n {
                for to in 0..n {
                    if rng.gen_bool(0.3) {
                        edges.push((from, to, rng.gen_range(0..10) as f64));
                    }
                }
            }
            let graph = weighted(&vertices, &edges);

            let size = n as usize;
            let mut best = vec![vec![f64::INFINITY; size]; size];
            for (i, row) in best.iter_mut().enumerate() {
                row[i] = 0.0;
            }
            for &(from, to, w) in &edges {
                let cell = &mut best[from as usize][to as usize];
                if w < *cell {
                    *cell = w;
                }
            }
            for k in 0..size {
                for i in 0..size {
                    for j in 0..size {
                        let via = best[i][k] + best[k][j];
                        if via < best[i][j] {
                            best[i][j] = via;
                        }
                    }
                }
            }

            let tree = Dijkstra::new(&graph, identity).run(0).unwrap();
            for v in 0..n {
                let expected = best[0][v as usize];
                match tree.distance(v) {
                    Some(d) => {
                        assert_eq!(d, expected, "edges: {:?}", edges);
                        let path = tree.path_to(v).unwrap();
                        assert_eq!(path.first(), Some(&0));
                        assert_eq!(path.last(), Some(&v));
                    }
                    None => {
                        assert!(expected.is_infinite(), "edges: {:?}", edges);
                        assert_eq!(tree.predecessor(v), Some(v));
                    }
                }
            }
        }
    }
}
