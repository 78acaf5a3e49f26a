//! 数据导入模块
//!
//! 从 CSV 边列表或 JSON Lines 记录构建内存中的带权有向图。
//! 只负责读取，不提供写回格式。

use crate::error::{Error, Result};
use crate::graph::{Digraph, DuplicateEdgePolicy, GraphConfig, VertexId};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// 导入得到的图：顶点负载为标签，边负载为权重
pub type WeightedGraph = Digraph<String, f64>;

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub duration_ms: u64,
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Jsonl,
}

impl ImportFormat {
    /// 根据扩展名推断格式，无法识别时返回 None
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "jsonl" | "ndjson" | "json" => Some(Self::Jsonl),
            _ => None,
        }
    }
}

impl FromStr for ImportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "jsonl" | "json" | "ndjson" => Ok(Self::Jsonl),
            other => Err(format!("不支持的格式: {}", other)),
        }
    }
}

/// CSV 行：`from,to[,weight]`
#[derive(Debug, Deserialize)]
struct EdgeRow {
    from: VertexId,
    to: VertexId,
    #[serde(default)]
    weight: Option<f64>,
}

/// JSON Lines 记录
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record {
    Vertex {
        id: VertexId,
        #[serde(default)]
        label: String,
    },
    Edge {
        from: VertexId,
        to: VertexId,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

fn default_weight() -> f64 {
    1.0
}

/// 边列表导入器
#[derive(Debug, Clone)]
pub struct EdgeListImporter {
    config: GraphConfig,
    auto_create_vertices: bool,
}

impl Default for EdgeListImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new() -> Self {
        Self {
            config: GraphConfig::default(),
            auto_create_vertices: true,
        }
    }

    /// 设置重复边策略
    pub fn with_duplicate_edges(mut self, policy: DuplicateEdgePolicy) -> Self {
        self.config = self.config.with_duplicate_edges(policy);
        self
    }

    /// 边引用未知顶点时是否自动创建（标签为空）
    pub fn with_auto_create_vertices(mut self, enabled: bool) -> Self {
        self.auto_create_vertices = enabled;
        self
    }

    /// 按格式导入文件
    pub fn import_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: ImportFormat,
    ) -> Result<(WeightedGraph, ImportStats)> {
        let path = path.as_ref();
        info!(path = %path.display(), ?format, "importing graph");
        let file = File::open(path)?;
        match format {
            ImportFormat::Csv => self.read_csv(file),
            ImportFormat::Jsonl => self.read_jsonl(BufReader::new(file)),
        }
    }

    /// 从 CSV 读取，首行为表头 `from,to,weight`
    pub fn read_csv<R: Read>(&self, reader: R) -> Result<(WeightedGraph, ImportStats)> {
        let start = Instant::now();
        let mut graph = WeightedGraph::with_config(self.config);
        let mut stats = ImportStats::default();

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (index, row) in csv_reader.deserialize::<EdgeRow>().enumerate() {
            let row = row?;
            // 第 1 行是表头
            let line = index + 2;
            self.import_edge(
                &mut graph,
                &mut stats,
                line,
                row.from,
                row.to,
                row.weight.unwrap_or_else(default_weight),
            )?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(?stats, "csv import finished");
        Ok((graph, stats))
    }

    /// 从 JSON Lines 读取，空行跳过
    pub fn read_jsonl<R: BufRead>(&self, reader: R) -> Result<(WeightedGraph, ImportStats)> {
        let start = Instant::now();
        let mut graph = WeightedGraph::with_config(self.config);
        let mut stats = ImportStats::default();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: Record = serde_json::from_str(&line).map_err(|e| Error::ImportError {
                line: line_no,
                reason: format!("JSON 解析错误: {}", e),
            })?;

            match record {
                Record::Vertex { id, label } => {
                    graph
                        .add_vertex(id, label)
                        .map_err(|e| import_error(line_no, e))?;
                    stats.vertices_imported += 1;
                }
                Record::Edge { from, to, weight } => {
                    self.import_edge(&mut graph, &mut stats, line_no, from, to, weight)?;
                }
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(?stats, "jsonl import finished");
        Ok((graph, stats))
    }

    fn import_edge(
        &self,
        graph: &mut WeightedGraph,
        stats: &mut ImportStats,
        line: usize,
        from: VertexId,
        to: VertexId,
        weight: f64,
    ) -> Result<()> {
        if self.auto_create_vertices {
            for id in [from, to] {
                if !graph.contains_vertex(id) {
                    graph
                        .add_vertex(id, String::new())
                        .map_err(|e| import_error(line, e))?;
                    stats.vertices_imported += 1;
                }
            }
        }

        graph
            .add_edge(from, to, weight)
            .map_err(|e| import_error(line, e))?;
        stats.edges_imported += 1;
        Ok(())
    }
}

fn import_error(line: usize, err: Error) -> Error {
    Error::ImportError {
        line,
        reason: err.to_string(),
    }
}
