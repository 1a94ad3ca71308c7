//! CLI 模块
//!
//! 终端展示：表格打印与子命令执行

pub mod commands;
pub mod printer;

pub use commands::{
    list_scenarios, load_graph, run_algorithm, show_representations, GraphSource, LoadedGraph,
};
pub use printer::{PrintMode, Printer};
