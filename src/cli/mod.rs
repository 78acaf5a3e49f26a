//! 命令行辅助模块

pub mod printer;

pub use printer::{format_path, shortest_path_json, PrintMode, Printer};
