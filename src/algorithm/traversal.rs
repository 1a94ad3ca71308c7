//! 遍历算法（BFS / DFS）

use super::IterationGuard;
use crate::error::Result;
use crate::graph::{AdjacencyMap, NodeIndex};
use crate::types::NodeId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 遍历结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traversal {
    /// 访问顺序（不可达节点不出现）
    pub visit_order: Vec<NodeId>,
    /// 前驱：起点为 None，其余为首个发现者
    pub predecessor: IndexMap<NodeId, Option<NodeId>>,
}

impl Traversal {
    /// 遍历树的边 (父, 子)
    pub fn tree_edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.predecessor
            .iter()
            .filter_map(|(child, parent)| parent.as_ref().map(|p| (p, child)))
    }

    fn build(
        adj: &AdjacencyMap,
        order: Vec<NodeIndex>,
        parents: Vec<(NodeIndex, Option<NodeIndex>)>,
    ) -> Self {
        Self {
            visit_order: adj.ids_of(&order),
            predecessor: parents
                .into_iter()
                .map(|(node, parent)| {
                    (adj.id(node).clone(), parent.map(|p| adj.id(p).clone()))
                })
                .collect(),
        }
    }
}

/// 广度优先遍历
#[tracing::instrument(skip_all, fields(start = %start))]
pub fn bfs(adj: &AdjacencyMap, start: &NodeId) -> Result<Traversal> {
    let start = adj.require(start)?;
    // 每个节点最多入队一次
    let mut guard = IterationGuard::new("bfs", adj.node_count());

    let mut visited = vec![false; adj.node_count()];
    let mut queue = VecDeque::new();
    let mut order = Vec::new();
    let mut parents = vec![(start, None)];

    visited[start.0] = true;
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        guard.tick()?;
        order.push(u);

        for n in adj.neighbors(u) {
            if !visited[n.node.0] {
                visited[n.node.0] = true;
                parents.push((n.node, Some(u)));
                queue.push_back(n.node);
            }
        }
    }

    tracing::debug!(visited = order.len(), "BFS 完成");
    Ok(Traversal::build(adj, order, parents))
}

/// 深度优先遍历（显式栈，弹出顺序与邻接表顺序一致）
#[tracing::instrument(skip_all, fields(start = %start))]
pub fn dfs(adj: &AdjacencyMap, start: &NodeId) -> Result<Traversal> {
    let start = adj.require(start)?;
    // 入栈次数不超过 1 + 邻接表项数
    let mut guard = IterationGuard::new("dfs", adj.entry_count() + 1);

    let mut visited = vec![false; adj.node_count()];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; adj.node_count()];
    let mut discovered = vec![false; adj.node_count()];
    let mut stack = vec![start];
    let mut order = Vec::new();
    let mut parents = Vec::new();
    discovered[start.0] = true;

    while let Some(u) = stack.pop() {
        guard.tick()?;
        if visited[u.0] {
            continue;
        }
        visited[u.0] = true;
        order.push(u);
        parents.push((u, parent[u.0]));

        for n in adj.neighbors(u).iter().rev() {
            if !visited[n.node.0] {
                if !discovered[n.node.0] {
                    discovered[n.node.0] = true;
                    parent[n.node.0] = Some(u);
                }
                stack.push(n.node);
            }
        }
    }

    tracing::debug!(visited = order.len(), "DFS 完成");
    Ok(Traversal::build(adj, order, parents))
}
