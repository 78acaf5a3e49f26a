//! 图数据结构
//!
//! 以有序映射存储顶点（按 ID 升序），每个顶点持有自己的出边列表。
//! 不维护入边索引，删除顶点时需要扫描全部出边列表。

use super::edge::Edge;
use super::vertex::{Vertex, VertexId};
use crate::algorithm::{Connectivity, Dijkstra};
use crate::error::{Error, Result};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// 重复边策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateEdgePolicy {
    /// 允许同一 (from, to) 存在多条边，按插入顺序保存
    #[default]
    Allow,
    /// 拒绝重复的 (from, to) 边
    Reject,
}

/// 图配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphConfig {
    /// 重复边策略
    pub duplicate_edges: DuplicateEdgePolicy,
}

impl GraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置重复边策略
    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.duplicate_edges = policy;
        self
    }
}

/// 有向图
///
/// `V` 是顶点负载类型，`E` 是边负载类型。`Clone` 产生完全独立的深拷贝。
#[derive(Debug, Clone, PartialEq)]
pub struct Digraph<V, E> {
    /// 顶点 ID -> 顶点
    vertices: BTreeMap<VertexId, Vertex<V, E>>,
    /// 配置
    config: GraphConfig,
}

impl<V, E> Default for Digraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Digraph<V, E> {
    /// 创建空图
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// 使用指定配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            vertices: BTreeMap::new(),
            config,
        }
    }

    /// 获取配置
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// 转移全部内容，原图变为空图（保留配置）
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::with_config(self.config))
    }

    /// 清空所有顶点和边
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    pub fn add_vertex(&mut self, id: VertexId, info: V) -> Result<()> {
        match self.vertices.entry(id) {
            Entry::Occupied(_) => Err(Error::DuplicateVertex(id)),
            Entry::Vacant(slot) => {
                slot.insert(Vertex::new(info));
                debug!(vertex = %id, "added vertex");
                Ok(())
            }
        }
    }

    /// 删除顶点，同时删除所有指向它的边
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        let removed = self
            .vertices
            .remove(&id)
            .ok_or(Error::VertexNotFound {
                op: "remove_vertex",
                id,
            })?;

        let incoming: usize = self
            .vertices
            .values_mut()
            .map(|v| v.remove_all_edges_to(id))
            .sum();

        debug!(
            vertex = %id,
            outgoing = removed.out_degree(),
            incoming,
            "removed vertex"
        );
        Ok(())
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<V, E>> {
        self.vertices.get(&id)
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// 获取顶点负载
    pub fn vertex_info(&self, id: VertexId) -> Result<&V> {
        self.get_vertex("vertex_info", id).map(Vertex::info)
    }

    /// 所有顶点 ID（升序）
    pub fn vertices(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, info: E) -> Result<()> {
        let reject_duplicates = self.config.duplicate_edges == DuplicateEdgePolicy::Reject;
        let to_exists = self.vertices.contains_key(&to);
        let source = self
            .vertices
            .get_mut(&from)
            .ok_or(Error::VertexNotFound {
                op: "add_edge",
                id: from,
            })?;
        if !to_exists {
            return Err(Error::VertexNotFound { op: "add_edge", id: to });
        }

        if reject_duplicates && source.find_edge(to).is_some() {
            return Err(Error::DuplicateEdge { from, to });
        }

        source.push_edge(Edge::new(from, to, info));
        debug!(%from, %to, "added edge");
        Ok(())
    }

    /// 删除第一条 from -> to 的边
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        let source = self
            .vertices
            .get_mut(&from)
            .ok_or(Error::VertexNotFound {
                op: "remove_edge",
                id: from,
            })?;

        source
            .remove_first_edge_to(to)
            .ok_or(Error::EdgeNotFound {
                op: "remove_edge",
                from,
                to,
            })?;

        debug!(%from, %to, "removed edge");
        Ok(())
    }

    /// 获取第一条 from -> to 边的负载
    pub fn edge_info(&self, from: VertexId, to: VertexId) -> Result<&E> {
        self.get_vertex("edge_info", from)?
            .find_edge(to)
            .map(Edge::info)
            .ok_or(Error::EdgeNotFound {
                op: "edge_info",
                from,
                to,
            })
    }

    /// 是否存在 from -> to 的边
    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.vertex(from)
            .map(|v| v.find_edge(to).is_some())
            .unwrap_or(false)
    }

    /// 所有边的 (from, to)，按起点升序、同一起点内按插入顺序
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.vertices
            .values()
            .flat_map(|v| v.edges().iter().map(Edge::endpoints))
            .collect()
    }

    /// 指定顶点出边的 (from, to)
    pub fn edges_of(&self, id: VertexId) -> Result<Vec<(VertexId, VertexId)>> {
        Ok(self
            .get_vertex("edges", id)?
            .edges()
            .iter()
            .map(Edge::endpoints)
            .collect())
    }

    /// 指定顶点的出边
    pub fn out_edges(&self, id: VertexId) -> Result<&[Edge<E>]> {
        self.get_vertex("out_edges", id).map(Vertex::edges)
    }

    /// 指定顶点的后继（出边终点，按插入顺序，可能重复）
    pub fn successors(&self, id: VertexId) -> Result<Vec<VertexId>> {
        Ok(self
            .get_vertex("successors", id)?
            .edges()
            .iter()
            .map(Edge::to)
            .collect())
    }

    /// 边总数
    pub fn edge_count(&self) -> usize {
        self.vertices.values().map(Vertex::out_degree).sum()
    }

    /// 指定顶点的出边数量
    pub fn edge_count_of(&self, id: VertexId) -> Result<usize> {
        self.get_vertex("edge_count", id).map(Vertex::out_degree)
    }

    // ==================== 图算法 ====================

    /// 是否强连通（任意两点互相可达）
    pub fn is_strongly_connected(&self) -> bool {
        Connectivity::new(self).is_strongly_connected()
    }

    /// 从起点可达的所有顶点（含起点）
    pub fn reachable_from(&self, start: VertexId) -> Result<BTreeSet<VertexId>> {
        Connectivity::new(self).reachable_from(start)
    }

    /// Dijkstra 单源最短路径，返回每个顶点的前驱。
    ///
    /// 起点和不可达顶点的前驱是其自身。
    pub fn find_shortest_paths<F>(
        &self,
        start: VertexId,
        edge_weight: F,
    ) -> Result<BTreeMap<VertexId, VertexId>>
    where
        F: Fn(&E) -> f64,
    {
        Dijkstra::new(self, edge_weight)
            .run(start)
            .map(|tree| tree.into_predecessors())
    }

    pub(crate) fn vertex_map(&self) -> &BTreeMap<VertexId, Vertex<V, E>> {
        &self.vertices
    }

    fn get_vertex(&self, op: &'static str, id: VertexId) -> Result<&Vertex<V, E>> {
        self.vertices
            .get(&id)
            .ok_or(Error::VertexNotFound { op, id })
    }
}
