//! 子命令执行
//!
//! 载入图、运行算法并交给打印器；所有函数返回待输出的文本

use crate::algorithm::{run, AlgorithmKind};
use crate::cli::printer::{PrintMode, Printer};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::import;
use crate::representation::represent;
use crate::scenario::{self, Scenario};
use crate::types::NodeId;
use std::path::PathBuf;

/// 图的来源
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// JSON 快照文件
    Json(PathBuf),
    /// CSV 边列表
    Csv { path: PathBuf, directed: bool },
    /// 内置场景
    Scenario(String),
}

impl Default for GraphSource {
    fn default() -> Self {
        GraphSource::Scenario("default".to_string())
    }
}

/// 载入后的图，以及场景自带的建议参数
pub struct LoadedGraph {
    pub graph: Graph,
    pub scenario: Option<Scenario>,
}

impl LoadedGraph {
    /// 命令行参数优先，其次是场景建议的端点
    pub fn endpoints(
        &self,
        start: Option<NodeId>,
        end: Option<NodeId>,
    ) -> (Option<NodeId>, Option<NodeId>) {
        let suggested = self.scenario.as_ref();
        (
            start.or_else(|| suggested.and_then(|s| s.start.clone())),
            end.or_else(|| suggested.and_then(|s| s.end.clone())),
        )
    }
}

/// 按来源载入图
pub fn load_graph(source: &GraphSource) -> Result<LoadedGraph> {
    match source {
        GraphSource::Json(path) => Ok(LoadedGraph {
            graph: import::load_json(path)?,
            scenario: None,
        }),
        GraphSource::Csv { path, directed } => Ok(LoadedGraph {
            graph: import::load_edges_csv(path, *directed)?,
            scenario: None,
        }),
        GraphSource::Scenario(id) => {
            let scenario = scenario::find(id)?
                .ok_or_else(|| Error::ParseError(format!("未知场景: {}", id)))?;
            Ok(LoadedGraph {
                graph: scenario.graph.clone(),
                scenario: Some(scenario),
            })
        }
    }
}

/// scenarios 子命令
pub fn list_scenarios(printer: &Printer) -> Result<String> {
    Ok(printer.print_scenarios(&scenario::builtin()?))
}

/// repr 子命令
pub fn show_representations(loaded: &LoadedGraph, printer: &Printer) -> Result<String> {
    let graph = &loaded.graph;
    let repr = printer.print_representations(&represent(graph))?;
    if printer.mode() == PrintMode::Json {
        return Ok(repr);
    }
    Ok(format!(
        "{}\n{}",
        printer.print_stats(graph.node_count(), graph.edge_count(), graph.is_directed()),
        repr
    ))
}

/// run 子命令；未指定算法时使用场景建议的算法
pub fn run_algorithm(
    loaded: &LoadedGraph,
    kind: Option<AlgorithmKind>,
    start: Option<NodeId>,
    end: Option<NodeId>,
    printer: &Printer,
) -> Result<String> {
    let kind = kind
        .or_else(|| loaded.scenario.as_ref().map(|s| s.algorithm))
        .ok_or_else(|| Error::ParseError("需要指定算法".to_string()))?;
    let (start, end) = loaded.endpoints(start, end);

    tracing::info!(algorithm = %kind, "执行算法");
    let outcome = run(&loaded.graph, kind, start.as_ref(), end.as_ref())?;
    printer.print_outcome(&outcome)
}
