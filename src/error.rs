//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("顶点已存在: {0}")]
    DuplicateVertex(VertexId),

    #[error("{op}: 顶点不存在: {id}")]
    VertexNotFound { op: &'static str, id: VertexId },

    #[error("{op}: 边不存在: {from} -> {to}")]
    EdgeNotFound {
        op: &'static str,
        from: VertexId,
        to: VertexId,
    },

    #[error("边已存在: {from} -> {to}")]
    DuplicateEdge { from: VertexId, to: VertexId },

    #[error("无效的边权重: {from} -> {to} = {weight}")]
    InvalidWeight {
        from: VertexId,
        to: VertexId,
        weight: f64,
    },

    #[error("导入错误 (第 {line} 行): {reason}")]
    ImportError { line: usize, reason: String },

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// 是否为“顶点不存在”错误
    pub fn is_vertex_not_found(&self) -> bool {
        matches!(self, Error::VertexNotFound { .. })
    }

    /// 是否为“边不存在”错误
    pub fn is_edge_not_found(&self) -> bool {
        matches!(self, Error::EdgeNotFound { .. })
    }
}
