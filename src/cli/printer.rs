//! 结果打印器
//!
//! 把算法结果渲染为框线表格或 JSON

use crate::algorithm::{Bipartition, Outcome};
use crate::error::{Error, Result};
use crate::representation::Representations;
use crate::scenario::Scenario;
use crate::types::NodeId;
use prettytable::{format, row, Cell, Row, Table};
use serde::Serialize;

/// JSON 模式下的失败记录
#[derive(Serialize)]
struct ErrorRecord<'a> {
    message: String,
    #[serde(flatten)]
    detail: &'a Error,
}

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// JSON（供展示层消费）
    Json,
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

fn join(ids: &[NodeId], sep: &str) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(sep)
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// 打印算法结果
    pub fn print_outcome(&self, outcome: &Outcome) -> Result<String> {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }

        let output = match outcome {
            Outcome::Traversal(t) => {
                let rows: Vec<Vec<String>> = t
                    .visit_order
                    .iter()
                    .enumerate()
                    .map(|(i, id)| {
                        let parent = t
                            .predecessor
                            .get(id)
                            .and_then(|p| p.as_ref())
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "-".to_string());
                        vec![(i + 1).to_string(), id.to_string(), parent]
                    })
                    .collect();
                let tree: Vec<String> = t
                    .tree_edges()
                    .map(|(parent, child)| format!("{}-{}", parent, child))
                    .collect();
                format!(
                    "{}{} 个节点可达\n遍历树: {}\n",
                    self.format_table(&["#", "节点", "前驱"], &rows),
                    rows.len(),
                    tree.join(", ")
                )
            }
            Outcome::ShortestPath(sp) => self.format_properties(&[
                ("路径", join(&sp.path, " -> ")),
                ("总权重", sp.cost.to_string()),
                ("边数", sp.hops().to_string()),
                ("确定顺序", join(&sp.visit_order, ", ")),
            ]),
            Outcome::SpanningTree(tree) => {
                let rows: Vec<Vec<String>> = tree
                    .mst_edges
                    .iter()
                    .map(|e| vec![e.from.to_string(), e.to.to_string(), e.weight.to_string()])
                    .collect();
                format!(
                    "{}总权重: {}\n",
                    self.format_table(&["起点", "终点", "权重"], &rows),
                    tree.cost
                )
            }
            Outcome::MaxFlow(flow) => {
                let rows: Vec<Vec<String>> = flow
                    .flow_edges
                    .iter()
                    .map(|e| {
                        vec![
                            e.from.to_string(),
                            e.to.to_string(),
                            format!("{}/{}", e.flow, e.capacity),
                            if e.is_saturated() { "*" } else { "" }.to_string(),
                        ]
                    })
                    .collect();
                format!(
                    "{}最大流: {}\n最小割源侧: {{ {} }}\n",
                    self.format_table(&["起点", "终点", "流量/容量", "饱和"], &rows),
                    flow.max_flow,
                    join(&flow.source_side, ", ")
                )
            }
            Outcome::Euler(walk) => self.format_properties(&[
                ("类型", format!("{:?}", walk.kind)),
                ("路径", join(&walk.path, " -> ")),
                ("边数", walk.path.len().saturating_sub(1).to_string()),
            ]),
            Outcome::Bipartite(Bipartition::Bipartite { set_a, set_b }) => self.format_properties(&[
                ("二分图", "是".to_string()),
                ("集合 A", join(set_a, ", ")),
                ("集合 B", join(set_b, ", ")),
            ]),
            Outcome::Bipartite(Bipartition::NotBipartite { conflict_node }) => self
                .format_properties(&[
                    ("二分图", "否".to_string()),
                    ("冲突节点", conflict_node.to_string()),
                ]),
        };

        Ok(output)
    }

    /// 打印失败；JSON 模式输出 `{"error": {...}}`，保留错误携带的数据
    pub fn print_error(&self, err: &Error) -> Result<String> {
        if self.mode == PrintMode::Table {
            return Ok(err.to_string());
        }
        let record = ErrorRecord {
            message: err.to_string(),
            detail: err,
        };
        Ok(serde_json::to_string_pretty(&serde_json::json!({ "error": record }))?)
    }

    /// 打印三种文本视图
    pub fn print_representations(&self, repr: &Representations) -> Result<String> {
        if self.mode == PrintMode::Json {
            return Ok(serde_json::to_string_pretty(repr)?);
        }
        Ok(format!(
            "邻接矩阵:\n{}\n邻接表:\n{}\n边列表:\n{}",
            repr.matrix, repr.adjacency_list, repr.edge_list
        ))
    }

    /// 打印场景列表
    pub fn print_scenarios(&self, scenarios: &[Scenario]) -> String {
        let rows: Vec<Vec<String>> = scenarios
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.to_string(),
                    s.algorithm.to_string(),
                    format!("{}/{}", s.graph.node_count(), s.graph.edge_count()),
                    s.description.to_string(),
                ]
            })
            .collect();
        self.format_table(&["ID", "名称", "建议算法", "节点/边", "说明"], &rows)
    }

    /// 打印统计信息
    pub fn print_stats(&self, node_count: usize, edge_count: usize, directed: bool) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Node Count", node_count.to_string()]);
        table.add_row(row!["Edge Count", edge_count.to_string()]);
        table.add_row(row!["Directed", directed.to_string()]);
        table.to_string()
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
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

    /// 两列的属性表
    fn format_properties(&self, pairs: &[(&str, String)]) -> String {
        let rows: Vec<Vec<String>> = pairs
            .iter()
            .map(|(k, v)| vec![k.to_string(), v.clone()])
            .collect();
        self.format_table(&["Property", "Value"], &rows)
    }
}
