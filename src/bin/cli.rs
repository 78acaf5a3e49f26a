//! Digraph CLI 工具
//!
//! 从边列表文件加载有向图，执行统计、强连通性检测和最短路径计算

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use digraph::cli::{format_path, shortest_path_json, PrintMode, Printer};
use digraph::{Dijkstra, DuplicateEdgePolicy, EdgeListImporter, ImportFormat, VertexId};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "digraph-cli")]
#[command(about = "Digraph 有向图分析工具", version)]
struct Args {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 输入格式: csv, jsonl（默认按扩展名推断）
    #[arg(short, long)]
    format: Option<ImportFormat>,

    /// 拒绝重复的 (from, to) 边
    #[arg(long)]
    reject_duplicates: bool,

    /// 边引用未知顶点时报错，而不是自动创建
    #[arg(long)]
    no_auto_create: bool,

    /// 垂直显示结果
    #[arg(long)]
    vertical: bool,

    /// 以 JSON 输出结果
    #[arg(long)]
    json: bool,

    /// 输出调试日志（RUST_LOG 优先）
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示图统计信息
    Stats,
    /// 检测图是否强连通
    Connectivity,
    /// 列出从起点可达的顶点
    Reach {
        /// 起点 ID
        #[arg(long, allow_hyphen_values = true)]
        from: VertexId,
    },
    /// 计算单源最短路径（边负载即权重）
    ShortestPaths {
        /// 起点 ID
        #[arg(long, allow_hyphen_values = true)]
        from: VertexId,

        /// 只显示到该顶点的结果
        #[arg(long, allow_hyphen_values = true)]
        to: Option<VertexId>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let format = match args.format {
        Some(format) => format,
        None => ImportFormat::from_path(&args.input).with_context(|| {
            format!("无法从扩展名推断格式，请使用 --format: {:?}", args.input)
        })?,
    };

    let policy = if args.reject_duplicates {
        DuplicateEdgePolicy::Reject
    } else {
        DuplicateEdgePolicy::Allow
    };
    let importer = EdgeListImporter::new()
        .with_duplicate_edges(policy)
        .with_auto_create_vertices(!args.no_auto_create);

    let (graph, stats) = importer
        .import_file(&args.input, format)
        .with_context(|| format!("导入失败: {:?}", args.input))?;
    tracing::info!(
        vertices = stats.vertices_imported,
        edges = stats.edges_imported,
        duration_ms = stats.duration_ms,
        "graph loaded"
    );

    let mode = if args.vertical {
        PrintMode::Vertical
    } else {
        PrintMode::Table
    };
    let printer = Printer::new(mode);

    match args.command {
        Command::Stats => {
            if args.json {
                let value = json!({
                    "vertex_count": graph.vertex_count(),
                    "edge_count": graph.edge_count(),
                    "import_ms": stats.duration_ms,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", printer.print_stats(&graph));
            }
        }
        Command::Connectivity => {
            let connected = graph.is_strongly_connected();
            if args.json {
                println!("{}", json!({ "strongly_connected": connected }));
            } else if connected {
                println!("{}", "图是强连通的".green());
            } else {
                println!("{}", "图不是强连通的".red());
            }
        }
        Command::Reach { from } => {
            let reached = graph.reachable_from(from)?;
            if args.json {
                println!("{}", serde_json::to_string(&reached)?);
            } else {
                print!("{}", printer.print_reachable(from, &reached));
            }
        }
        Command::ShortestPaths { from, to } => {
            let start = Instant::now();
            let tree = Dijkstra::new(&graph, |weight: &f64| *weight).run(from)?;
            let elapsed = start.elapsed().as_millis() as u64;

            if let Some(target) = to {
                if !graph.contains_vertex(target) {
                    anyhow::bail!("顶点不存在: {}", target);
                }
            }

            match (args.json, to) {
                (true, Some(target)) => {
                    let value = shortest_path_json(&tree, target);
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                (true, None) => println!("{}", serde_json::to_string_pretty(&tree)?),
                (false, Some(target)) => {
                    match (tree.path_to(target), tree.distance(target)) {
                        (Some(path), Some(distance)) => {
                            println!("{} (distance {})", format_path(path).bold(), distance);
                        }
                        _ => println!("{}", format!("{} 从 {} 不可达", target, from).yellow()),
                    }
                    print!("{}", printer.print_shortest_paths(&tree, Some(target), elapsed));
                }
                (false, None) => {
                    print!("{}", printer.print_shortest_paths(&tree, None, elapsed));
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
