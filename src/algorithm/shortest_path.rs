//! 最短路径算法（Dijkstra）
//!
//! 非负权单源单汇，懒删除优先队列，目标节点确定后提前结束

use super::{IterationGuard, MinEntry};
use crate::error::{Error, Result};
use crate::graph::{AdjacencyMap, NodeIndex};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;

/// 最短路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// 起点到终点的节点序列
    pub path: Vec<NodeId>,
    /// 路径总权重
    pub cost: f64,
    /// 节点被确定（settled）的顺序
    pub visit_order: Vec<NodeId>,
}

impl ShortestPath {
    /// 路径包含的边数
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Dijkstra 最短路径
///
/// 图中任何负权边都会导致 `NegativeWeight`（即使它不在最短路径上）；
/// 终点不可达时返回 `NoPathFound`，其中保留已确定节点的顺序。
#[tracing::instrument(skip_all, fields(start = %start, end = %end))]
pub fn dijkstra(adj: &AdjacencyMap, start: &NodeId, end: &NodeId) -> Result<ShortestPath> {
    let source = adj.require(start)?;
    let target = adj.require(end)?;

    if let Some(edge) = adj.edges().iter().find(|e| e.weight < 0.0) {
        return Err(Error::NegativeWeight {
            from: adj.id(edge.from).clone(),
            to: adj.id(edge.to).clone(),
            weight: edge.weight,
        });
    }

    let n = adj.node_count();
    let mut distances = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<NodeIndex>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut visit_order = Vec::new();
    let mut heap = BinaryHeap::new();
    // 每次成功松弛最多入堆一次
    let mut guard = IterationGuard::new("dijkstra", adj.entry_count() + 1);

    distances[source.0] = 0.0;
    heap.push(MinEntry {
        key: 0.0,
        node: source,
    });

    while let Some(MinEntry { key: dist, node: u }) = heap.pop() {
        guard.tick()?;

        // 懒删除：过期条目直接跳过
        if settled[u.0] || dist > distances[u.0] {
            continue;
        }
        settled[u.0] = true;
        visit_order.push(u);
        tracing::trace!(node = %adj.id(u), dist, "节点已确定");

        if u == target {
            break;
        }

        for neighbor in adj.neighbors(u) {
            let candidate = dist + neighbor.weight;
            if candidate < distances[neighbor.node.0] {
                distances[neighbor.node.0] = candidate;
                previous[neighbor.node.0] = Some(u);
                heap.push(MinEntry {
                    key: candidate,
                    node: neighbor.node,
                });
            }
        }
    }

    let visit_order = adj.ids_of(&visit_order);

    if distances[target.0].is_infinite() {
        tracing::debug!(settled = visit_order.len(), "终点不可达");
        return Err(Error::NoPathFound {
            start: start.clone(),
            end: end.clone(),
            visit_order,
        });
    }

    // 沿前驱回溯
    let mut path = vec![target];
    let mut current = target;
    while let Some(prev) = previous[current.0] {
        path.push(prev);
        current = prev;
    }
    path.reverse();

    let cost = distances[target.0];
    tracing::debug!(cost, hops = path.len() - 1, "最短路径已找到");

    Ok(ShortestPath {
        path: adj.ids_of(&path),
        cost,
        visit_order,
    })
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

    fn ids(list: &[&str]) -> Vec<NodeId> {
        list.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn test_shortest_path_square() {
        let adj = build(
            false,
            &[
                ("1", "2", 4.0),
                ("2", "3", 5.0),
                ("3", "4", 2.0),
                ("4", "1", 8.0),
                ("2", "4", 1.0),
            ],
        );

        let result = dijkstra(&adj, &"1".into(), &"3".into()).unwrap();
        assert_eq!(result.path, ids(&["1", "2", "4", "3"]));
        assert_eq!(result.cost, 7.0);
        assert_eq!(result.hops(), 3);
        assert_eq!(result.visit_order.first(), Some(&NodeId::from("1")));
        assert_eq!(result.visit_order.last(), Some(&NodeId::from("3")));
    }

    #[test]
    fn test_same_start_and_end() {
        let adj = build(false, &[("1", "2", 3.0)]);
        let result = dijkstra(&adj, &"1".into(), &"1".into()).unwrap();
        assert_eq!(result.path, ids(&["1"]));
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_no_path_keeps_trace() {
        let adj = build(true, &[("1", "2", 3.0), ("3", "4", 1.0)]);
        match dijkstra(&adj, &"1".into(), &"4".into()) {
            Err(Error::NoPathFound { visit_order, .. }) => {
                assert_eq!(visit_order, ids(&["1", "2"]));
            }
            other => panic!("expected NoPathFound, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_weight_rejected_anywhere() {
        // 负权边位于不可达的分量中，同样拒绝
        let adj = build(true, &[("1", "2", 1.0), ("2", "4", 1.0), ("5", "6", -4.0)]);
        assert!(matches!(
            dijkstra(&adj, &"1".into(), &"4".into()),
            Err(Error::NegativeWeight { weight, .. }) if weight == -4.0
        ));
    }

    #[test]
    fn test_missing_endpoints() {
        let adj = build(false, &[("1", "2", 1.0)]);
        assert!(matches!(
            dijkstra(&adj, &"0".into(), &"2".into()),
            Err(Error::NodeNotFound(id)) if id.as_str() == "0"
        ));
        assert!(matches!(
            dijkstra(&adj, &"1".into(), &"5".into()),
            Err(Error::NodeNotFound(id)) if id.as_str() == "5"
        ));
    }
}
