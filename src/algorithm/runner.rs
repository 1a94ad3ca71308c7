//! 算法调度
//!
//! 投影图快照、校验端点参数，然后恰好调用一个算法

use super::{
    bfs, check_bipartite, dfs, dijkstra, fleury, hierholzer, kruskal, prim, Bipartition,
    EdmondsKarp, EulerWalk, MaxFlow, ShortestPath, SpanningTree, Traversal,
};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可调度的算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    Dijkstra,
    Prim,
    Kruskal,
    MaxFlow,
    Fleury,
    Hierholzer,
    Bipartite,
}

impl AlgorithmKind {
    /// 全部算法（展示顺序）
    pub const ALL: [AlgorithmKind; 9] = [
        AlgorithmKind::Bfs,
        AlgorithmKind::Dfs,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::Prim,
        AlgorithmKind::Kruskal,
        AlgorithmKind::MaxFlow,
        AlgorithmKind::Fleury,
        AlgorithmKind::Hierholzer,
        AlgorithmKind::Bipartite,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::Prim => "prim",
            AlgorithmKind::Kruskal => "kruskal",
            AlgorithmKind::MaxFlow => "max-flow",
            AlgorithmKind::Fleury => "fleury",
            AlgorithmKind::Hierholzer => "hierholzer",
            AlgorithmKind::Bipartite => "bipartite",
        }
    }

    /// 是否需要起点（BFS/DFS 的起点、Dijkstra 的起点、最大流的源点）
    pub fn needs_start(&self) -> bool {
        matches!(
            self,
            AlgorithmKind::Bfs
                | AlgorithmKind::Dfs
                | AlgorithmKind::Dijkstra
                | AlgorithmKind::MaxFlow
        )
    }

    /// 是否需要终点（Dijkstra 的终点、最大流的汇点）
    pub fn needs_end(&self) -> bool {
        matches!(self, AlgorithmKind::Dijkstra | AlgorithmKind::MaxFlow)
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::ParseError(format!("未知算法: {}", s)))
    }
}

/// 一次算法调用的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum Outcome {
    Traversal(Traversal),
    ShortestPath(ShortestPath),
    SpanningTree(SpanningTree),
    MaxFlow(MaxFlow),
    Euler(EulerWalk),
    Bipartite(Bipartition),
}

/// 运行指定算法
#[tracing::instrument(skip_all, fields(algorithm = %kind))]
pub fn run(
    graph: &Graph,
    kind: AlgorithmKind,
    start: Option<&NodeId>,
    end: Option<&NodeId>,
) -> Result<Outcome> {
    let start = if kind.needs_start() {
        Some(start.ok_or(Error::MissingEndpoint("start"))?)
    } else {
        None
    };
    let end = if kind.needs_end() {
        Some(end.ok_or(Error::MissingEndpoint("end"))?)
    } else {
        None
    };

    let adj = graph.project();
    tracing::debug!(
        nodes = adj.node_count(),
        edges = adj.edge_count(),
        directed = adj.is_directed(),
        "开始执行算法"
    );

    let outcome = match (kind, start, end) {
        (AlgorithmKind::Bfs, Some(s), _) => Outcome::Traversal(bfs(&adj, s)?),
        (AlgorithmKind::Dfs, Some(s), _) => Outcome::Traversal(dfs(&adj, s)?),
        (AlgorithmKind::Dijkstra, Some(s), Some(t)) => Outcome::ShortestPath(dijkstra(&adj, s, t)?),
        (AlgorithmKind::MaxFlow, Some(s), Some(t)) => {
            Outcome::MaxFlow(EdmondsKarp::new(&adj).max_flow(s, t)?)
        }
        (AlgorithmKind::Prim, ..) => Outcome::SpanningTree(prim(&adj)),
        (AlgorithmKind::Kruskal, ..) => Outcome::SpanningTree(kruskal(&adj)),
        (AlgorithmKind::Fleury, ..) => Outcome::Euler(fleury(&adj)?),
        (AlgorithmKind::Hierholzer, ..) => Outcome::Euler(hierholzer(&adj)?),
        (AlgorithmKind::Bipartite, ..) => Outcome::Bipartite(check_bipartite(&adj)),
        (_, None, _) => return Err(Error::MissingEndpoint("start")),
        (_, _, None) => return Err(Error::MissingEndpoint("end")),
    };

    Ok(outcome)
}
