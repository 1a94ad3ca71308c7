//! 图的文本表示
//!
//! 邻接矩阵、邻接表、边列表三种视图。节点按 `NodeId` 的全序排列
//! （数字 id 按数值，其余按字典序）。

use crate::graph::{Edge, Graph};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write;

/// 三种文本视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representations {
    pub matrix: String,
    pub adjacency_list: String,
    pub edge_list: String,
}

/// 生成三种视图；自环照常显示
pub fn represent(graph: &Graph) -> Representations {
    let mut ids: Vec<&NodeId> = graph.nodes().map(|n| n.id()).collect();
    ids.sort();

    Representations {
        matrix: format_matrix(graph, &ids),
        adjacency_list: format_adjacency_list(graph, &ids),
        edge_list: format_edge_list(graph),
    }
}

fn endpoints<'g>(graph: &'g Graph, edge: &Edge) -> Option<(&'g NodeId, &'g NodeId)> {
    Some((graph.id_of(edge.from())?, graph.id_of(edge.to())?))
}

fn format_adjacency_list(graph: &Graph, ids: &[&NodeId]) -> String {
    let mut out = String::new();
    for &id in ids {
        // BTreeSet 同时去重并排序
        let mut neighbors: BTreeSet<&NodeId> = BTreeSet::new();
        for (from, to) in graph.edges().iter().filter_map(|e| endpoints(graph, e)) {
            if from == id {
                neighbors.insert(to);
            }
            if !graph.is_directed() && to == id {
                neighbors.insert(from);
            }
        }

        let list = if neighbors.is_empty() {
            "{ }".to_string()
        } else {
            let joined: Vec<&str> = neighbors.iter().map(|n| n.as_str()).collect();
            format!("{{ {} }}", joined.join(", "))
        };
        let _ = writeln!(out, "{:<4} ->  {}", id, list);
    }
    out
}

fn format_matrix(graph: &Graph, ids: &[&NodeId]) -> String {
    let mut out = String::from("      ");
    for id in ids {
        let _ = write!(out, "{:<3}", id);
    }
    out.push('\n');
    let _ = writeln!(out, "      {}", "-".repeat(ids.len() * 3));

    for &row in ids {
        let _ = write!(out, "{:<4}| ", row);
        for &col in ids {
            let found = graph.edges().iter().find(|edge| match endpoints(graph, edge) {
                Some((from, to)) => {
                    (from == row && to == col)
                        || (!graph.is_directed() && from == col && to == row)
                }
                None => false,
            });
            // 有边但无权重（或权重为 0）时显示 1
            let cell = match found {
                Some(edge) => edge.raw_weight().filter(|w| *w != 0.0).unwrap_or(1.0).to_string(),
                None => "0".to_string(),
            };
            let _ = write!(out, "{:<3}", cell);
        }
        out.push('\n');
    }
    out
}

fn format_edge_list(graph: &Graph) -> String {
    let mut edges: Vec<(&NodeId, &NodeId, f64)> = graph
        .edges()
        .iter()
        .filter_map(|edge| endpoints(graph, edge).map(|(from, to)| (from, to, edge.weight())))
        .collect();
    edges.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    let mut out = String::new();
    for (from, to, weight) in edges {
        let _ = writeln!(out, "({}, {})    Weight: {}", from, to, weight);
    }
    out
}
