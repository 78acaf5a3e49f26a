//! 图算法模块
//!
//! 包含强连通性检测和 Dijkstra 最短路径算法，均为只读操作

mod connectivity;
mod shortest_path;

pub use connectivity::Connectivity;
pub use shortest_path::{Dijkstra, ShortestPathTree};
