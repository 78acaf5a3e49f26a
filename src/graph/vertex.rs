//! 顶点定义
//!
//! 顶点由调用方指定的整数 ID 标识，携带一个任意类型的负载和有序的出边列表

use crate::graph::edge::Edge;

/// 顶点 ID（由调用方指定，不要求连续或从零开始）
pub type VertexId = i64;

/// 顶点
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<V, E> {
    /// 顶点负载
    info: V,
    /// 出边（按插入顺序）
    edges: Vec<Edge<E>>,
}

impl<V, E> Vertex<V, E> {
    /// 创建没有出边的顶点
    pub fn new(info: V) -> Self {
        Self {
            info,
            edges: Vec::new(),
        }
    }

    /// 获取顶点负载
    pub fn info(&self) -> &V {
        &self.info
    }

    /// 获取所有出边
    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    /// 出度
    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }

    /// 查找第一条指向 `to` 的出边
    pub fn find_edge(&self, to: VertexId) -> Option<&Edge<E>> {
        self.edges.iter().find(|e| e.to() == to)
    }

    pub(crate) fn push_edge(&mut self, edge: Edge<E>) {
        self.edges.push(edge);
    }

    /// 移除第一条指向 `to` 的出边
    pub(crate) fn remove_first_edge_to(&mut self, to: VertexId) -> Option<Edge<E>> {
        let pos = self.edges.iter().position(|e| e.to() == to)?;
        Some(self.edges.remove(pos))
    }

    /// 移除所有指向 `to` 的出边，返回移除数量
    pub(crate) fn remove_all_edges_to(&mut self, to: VertexId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| e.to() != to);
        before - self.edges.len()
    }
}
