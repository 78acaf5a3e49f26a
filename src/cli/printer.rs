//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::ShortestPathTree;
use crate::graph::{Digraph, VertexId};
use prettytable::{format, row, Cell, Row, Table};
use serde_json::{json, Value};
use std::collections::BTreeSet;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印通用结果
    pub fn print_result(
        &self,
        columns: &[String],
        rows: &[Vec<String>],
        execution_time_ms: u64,
    ) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set ({} ms)\n", execution_time_ms);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!(
            "{}\n{} row(s) in set ({} ms)\n",
            output,
            rows.len(),
            execution_time_ms
        )
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印图统计信息
    pub fn print_stats<V, E>(&self, graph: &Digraph<V, E>) -> String {
        let self_loops = graph.edges().iter().filter(|(f, t)| f == t).count();
        let max_out_degree = graph
            .vertices()
            .into_iter()
            .filter_map(|v| graph.edge_count_of(v).ok())
            .max()
            .unwrap_or(0);

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        table.add_row(row!["Self Loops", self_loops.to_string()]);
        table.add_row(row!["Max Out Degree", max_out_degree.to_string()]);
        table.to_string()
    }

    /// 打印可达顶点集合
    pub fn print_reachable(&self, start: VertexId, reached: &BTreeSet<VertexId>) -> String {
        let columns = vec!["Vertex".to_string()];
        let rows: Vec<Vec<String>> = reached.iter().map(|v| vec![v.to_string()]).collect();
        let mut output = self.print_result(&columns, &rows, 0);
        output.push_str(&format!("{} vertex(es) reachable from {}\n", reached.len(), start));
        output
    }

    /// 打印最短路径树，`only` 不为空时只打印该顶点
    pub fn print_shortest_paths(
        &self,
        tree: &ShortestPathTree,
        only: Option<VertexId>,
        execution_time_ms: u64,
    ) -> String {
        let columns: Vec<String> = ["Vertex", "Predecessor", "Distance", "Path"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        let rows: Vec<Vec<String>> = tree
            .predecessors()
            .iter()
            .filter(|(v, _)| only.map_or(true, |target| **v == target))
            .map(|(&vertex, &pred)| {
                let distance = tree
                    .distance(vertex)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "unreachable".to_string());
                let path = tree
                    .path_to(vertex)
                    .map(format_path)
                    .unwrap_or_else(|| "-".to_string());
                vec![vertex.to_string(), pred.to_string(), distance, path]
            })
            .collect();

        self.print_result(&columns, &rows, execution_time_ms)
    }
}

/// 单个顶点的最短路径结果，用于 JSON 输出
pub fn shortest_path_json(tree: &ShortestPathTree, vertex: VertexId) -> Value {
    json!({
        "vertex": vertex,
        "predecessor": tree.predecessor(vertex),
        "distance": tree.distance(vertex),
        "path": tree.path_to(vertex),
    })
}

/// 路径格式化为 `1 -> 2 -> 3`
pub fn format_path(path: Vec<VertexId>) -> String {
    path.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
