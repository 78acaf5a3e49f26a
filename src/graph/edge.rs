//! 边定义
//!
//! 有向边只记录端点 ID 和负载，归属于起点顶点的出边列表

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<E> {
    /// 起点顶点 ID
    from: VertexId,
    /// 终点顶点 ID
    to: VertexId,
    /// 边负载
    info: E,
}

impl<E> Edge<E> {
    /// 创建新边
    pub fn new(from: VertexId, to: VertexId, info: E) -> Self {
        Self { from, to, info }
    }

    /// 获取起点顶点 ID
    pub fn from(&self) -> VertexId {
        self.from
    }

    /// 获取终点顶点 ID
    pub fn to(&self) -> VertexId {
        self.to
    }

    /// 获取边负载
    pub fn info(&self) -> &E {
        &self.info
    }

    /// (from, to) 端点对
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.from, self.to)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
