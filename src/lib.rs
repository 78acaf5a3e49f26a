//! Digraph - 通用内存有向图
//!
//! 以整数 ID 标识顶点的有向图引擎，支持：
//! - 顶点和边的增删查，删除顶点时级联删除指向它的边
//! - 强连通性检测
//! - 基于 Dijkstra 算法的单源最短路径
//! - 从 CSV / JSON Lines 边列表导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;

// 重导出常用类型
pub use algorithm::{Connectivity, Dijkstra, ShortestPathTree};
pub use error::{Error, Result};
pub use graph::{Digraph, DuplicateEdgePolicy, Edge, GraphConfig, Vertex, VertexId};
pub use import::{EdgeListImporter, ImportFormat, ImportStats, WeightedGraph};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
