//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson），边权视为容量

use super::IterationGuard;
use crate::error::{Error, Result};
use crate::graph::{AdjacencyMap, NodeIndex};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 单条原始边上的流量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub flow: f64,
    pub capacity: f64,
}

impl FlowEdge {
    /// 流量是否已占满容量
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0.0 && (self.capacity - self.flow).abs() < 1e-9
    }
}

/// 最大流结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub max_flow: f64,
    /// 每条原始边的流量分配（包括零流量边）
    pub flow_edges: Vec<FlowEdge>,
    /// 最小割的源侧节点（残量图中从源点可达）
    pub source_side: Vec<NodeId>,
}

impl MaxFlow {
    /// 瓶颈边：流量等于容量的边
    pub fn saturated_edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.flow_edges.iter().filter(|e| e.is_saturated())
    }
}

/// Edmonds-Karp 最大流算法
pub struct EdmondsKarp<'a> {
    adj: &'a AdjacencyMap,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(adj: &'a AdjacencyMap) -> Self {
        Self { adj }
    }

    /// 计算从 source 到 sink 的最大流
    #[tracing::instrument(skip_all, fields(source = %source, sink = %sink))]
    pub fn max_flow(&self, source: &NodeId, sink: &NodeId) -> Result<MaxFlow> {
        let adj = self.adj;
        let s = adj.require(source)?;
        let t = adj.require(sink)?;
        if s == t {
            return Err(Error::SameEndpoint(source.clone()));
        }
        if let Some(edge) = adj.edges().iter().find(|e| e.weight < 0.0) {
            return Err(Error::NegativeWeight {
                from: adj.id(edge.from).clone(),
                to: adj.id(edge.to).clone(),
                weight: edge.weight,
            });
        }
        if !adj.is_directed() {
            tracing::warn!("最大流通常用于有向图，无向边按双向容量处理");
        }

        let n = adj.node_count();

        // 构建容量矩阵（残量初值即容量）
        let mut capacity = vec![vec![0.0_f64; n]; n];
        for u in adj.nodes() {
            for neighbor in adj.neighbors(u) {
                capacity[u.0][neighbor.node.0] += neighbor.weight;
            }
        }
        let mut residual = capacity.clone();

        // 残量图邻接表：正向边 + 反向边（用于撤销流量）
        let mut graph: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];
        for u in adj.nodes() {
            for neighbor in adj.neighbors(u) {
                let v = neighbor.node;
                if !graph[u.0].contains(&v) {
                    graph[u.0].push(v);
                }
                if !graph[v.0].contains(&u) {
                    graph[v.0].push(u);
                }
            }
        }

        // 每次增广都使某条边的最短路距离单调不减，增广次数为 O(VE)
        let mut guard = IterationGuard::new("max_flow", n * adj.entry_count().max(1) + 1);
        let mut max_flow_value = 0.0;

        // Edmonds-Karp: 重复 BFS 找增广路径
        while let Some((path, bottleneck)) = Self::bfs_find_path(s, t, &residual, &graph) {
            guard.tick()?;

            // 沿路径增广
            for pair in path.windows(2) {
                let (u, v) = (pair[0].0, pair[1].0);
                residual[u][v] -= bottleneck;
                residual[v][u] += bottleneck;
            }

            max_flow_value += bottleneck;
            tracing::trace!(bottleneck, hops = path.len() - 1, "增广路径");
        }

        // 每条原始边的流量 = 原容量 - 剩余残量（取正向部分）
        let flow_edges = adj
            .edges()
            .iter()
            .map(|edge| {
                let (u, v) = (edge.from.0, edge.to.0);
                let net = capacity[u][v] - residual[u][v];
                let (from, to, flow) = if adj.is_directed() || net >= 0.0 {
                    (edge.from, edge.to, net.max(0.0))
                } else {
                    (edge.to, edge.from, -net)
                };
                FlowEdge {
                    from: adj.id(from).clone(),
                    to: adj.id(to).clone(),
                    flow,
                    capacity: edge.weight,
                }
            })
            .collect();

        let source_side = Self::find_source_side(s, &residual, &graph);

        tracing::debug!(max_flow = max_flow_value, "最大流计算完成");

        Ok(MaxFlow {
            max_flow: max_flow_value,
            flow_edges,
            source_side: adj.ids_of(&source_side),
        })
    }

    /// BFS 找增广路径，返回路径及其瓶颈
    fn bfs_find_path(
        source: NodeIndex,
        sink: NodeIndex,
        residual: &[Vec<f64>],
        graph: &[Vec<NodeIndex>],
    ) -> Option<(Vec<NodeIndex>, f64)> {
        let mut parent: Vec<Option<NodeIndex>> = vec![None; graph.len()];
        let mut visited = vec![false; graph.len()];
        let mut queue = VecDeque::new();

        visited[source.0] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            if u == sink {
                break;
            }
            for &v in &graph[u.0] {
                if !visited[v.0] && residual[u.0][v.0] > 0.0 {
                    visited[v.0] = true;
                    parent[v.0] = Some(u);
                    queue.push_back(v);
                }
            }
        }

        if !visited[sink.0] {
            return None;
        }

        // 重构路径并计算瓶颈
        let mut path = vec![sink];
        let mut current = sink;
        while let Some(prev) = parent[current.0] {
            path.push(prev);
            current = prev;
        }
        path.reverse();

        let bottleneck = path
            .windows(2)
            .map(|pair| residual[pair[0].0][pair[1].0])
            .fold(f64::INFINITY, f64::min);

        Some((path, bottleneck))
    }

    /// 找最小割的源侧节点
    fn find_source_side(
        source: NodeIndex,
        residual: &[Vec<f64>],
        graph: &[Vec<NodeIndex>],
    ) -> Vec<NodeIndex> {
        let mut visited = vec![false; graph.len()];
        let mut queue = VecDeque::new();
        let mut side = vec![source];

        visited[source.0] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &graph[u.0] {
                if !visited[v.0] && residual[u.0][v.0] > 0.0 {
                    visited[v.0] = true;
                    side.push(v);
                    queue.push_back(v);
                }
            }
        }

        side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn build(directed: bool, edges: &[(&str, &str, f64)]) -> AdjacencyMap {
        let mut graph = Graph::new(directed);
        for (u, v, _) in edges {
            for id in [u, v] {
                if graph.index_of(&(*id).into()).is_none() {
                    graph.add_node(*id, *id).unwrap();
                }
            }
        }
        for (u, v, w) in edges {
            graph.add_edge(&(*u).into(), &(*v).into(), Some(*w)).unwrap();
        }
        graph.project()
    }

    fn create_flow_graph() -> AdjacencyMap {
        // 经典最大流测试图
        //     10       10
        // S -----> A -----> T
        // |        ^        ^
        // |5       |5       |
        // v        |        |
        // B -----> C ------>|
        //     10       10
        build(
            true,
            &[
                ("S", "A", 10.0),
                ("S", "B", 5.0),
                ("A", "T", 10.0),
                ("B", "C", 10.0),
                ("C", "A", 5.0),
                ("C", "T", 10.0),
            ],
        )
    }

    fn net_flow(result: &MaxFlow, node: &str) -> f64 {
        let inflow: f64 = result
            .flow_edges
            .iter()
            .filter(|e| e.to.as_str() == node)
            .map(|e| e.flow)
            .sum();
        let outflow: f64 = result
            .flow_edges
            .iter()
            .filter(|e| e.from.as_str() == node)
            .map(|e| e.flow)
            .sum();
        inflow - outflow
    }

    #[test]
    fn test_max_flow_basic() {
        let adj = create_flow_graph();
        let result = EdmondsKarp::new(&adj).max_flow(&"S".into(), &"T".into()).unwrap();

        // 最大流应该是 15 (10 through A + 5 through B-C)
        assert!(
            (result.max_flow - 15.0).abs() < 0.01,
            "Expected 15, got {}",
            result.max_flow
        );
        assert_eq!(result.flow_edges.len(), 6);
        for node in ["A", "B", "C"] {
            assert!(net_flow(&result, node).abs() < 1e-9);
        }
        assert!((net_flow(&result, "T") - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_simple_flow() {
        let adj = build(true, &[("1", "2", 10.0), ("2", "3", 5.0)]);
        let result = EdmondsKarp::new(&adj).max_flow(&"1".into(), &"3".into()).unwrap();

        // 瓶颈在 2 -> 3，最大流是 5
        assert_eq!(result.max_flow, 5.0);
        assert_eq!(
            result.flow_edges,
            vec![
                FlowEdge { from: "1".into(), to: "2".into(), flow: 5.0, capacity: 10.0 },
                FlowEdge { from: "2".into(), to: "3".into(), flow: 5.0, capacity: 5.0 },
            ]
        );
        let saturated: Vec<_> = result.saturated_edges().collect();
        assert_eq!(saturated.len(), 1);
        assert_eq!(saturated[0].from.as_str(), "2");
        assert_eq!(result.source_side, vec![NodeId::from("1"), NodeId::from("2")]);
    }

    #[test]
    fn test_parallel_paths() {
        // S -> A -> T (5), S -> B -> T (10)
        let adj = build(
            true,
            &[("S", "A", 5.0), ("A", "T", 5.0), ("S", "B", 10.0), ("B", "T", 10.0)],
        );
        let result = EdmondsKarp::new(&adj).max_flow(&"S".into(), &"T".into()).unwrap();
        assert!((result.max_flow - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_flow_edges_reported() {
        let adj = build(true, &[("1", "2", 4.0), ("3", "2", 7.0)]);
        let result = EdmondsKarp::new(&adj).max_flow(&"1".into(), &"2".into()).unwrap();
        assert_eq!(result.max_flow, 4.0);
        assert_eq!(result.flow_edges[1].flow, 0.0);
        assert_eq!(result.flow_edges[1].capacity, 7.0);
    }

    #[test]
    fn test_invalid_input() {
        let adj = build(true, &[("1", "2", 4.0), ("2", "3", -1.0)]);
        let algo = EdmondsKarp::new(&adj);

        assert!(matches!(algo.max_flow(&"9".into(), &"2".into()), Err(Error::NodeNotFound(_))));
        assert!(matches!(algo.max_flow(&"1".into(), &"9".into()), Err(Error::NodeNotFound(_))));
        assert!(matches!(algo.max_flow(&"1".into(), &"1".into()), Err(Error::SameEndpoint(_))));
        assert!(matches!(
            algo.max_flow(&"1".into(), &"3".into()),
            Err(Error::NegativeWeight { .. })
        ));
    }

    #[test]
    fn test_antiparallel_edges() {
        let adj = build(true, &[("1", "2", 3.0), ("2", "1", 2.0), ("2", "3", 3.0)]);
        let result = EdmondsKarp::new(&adj).max_flow(&"1".into(), &"3".into()).unwrap();
        assert_eq!(result.max_flow, 3.0);
        for edge in &result.flow_edges {
            assert!(edge.flow >= 0.0 && edge.flow <= edge.capacity);
        }
    }
}
