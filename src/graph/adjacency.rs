//! 邻接投影
//!
//! 每次算法调用前由图快照重新构建：无向图的每条边在两个方向各贡献一项。
//! 需要破坏性操作的算法（Fleury、Hierholzer、最大流）先克隆再修改。

use super::graph::Graph;
use super::node::NodeIndex;
use crate::error::{Error, Result};
use crate::types::NodeId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

/// 邻接表项
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeIndex,
    pub weight: f64,
}

/// 投影中保留的原始边（自环已剔除）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub weight: f64,
}

type NeighborList = SmallVec<[Neighbor; 4]>;

/// 邻接投影
#[derive(Debug, Clone)]
pub struct AdjacencyMap {
    directed: bool,
    /// 节点标识，下标与图 arena 一致
    ids: IndexSet<NodeId>,
    /// 每个节点的出邻居
    lists: Vec<NeighborList>,
    /// 原始边（输入顺序）
    edges: Vec<WeightedEdge>,
}

impl AdjacencyMap {
    /// 由图快照构建投影，O(V + E)
    pub fn project(graph: &Graph) -> Self {
        let ids: IndexSet<NodeId> = graph.nodes().map(|n| n.id().clone()).collect();
        let mut lists: Vec<NeighborList> = vec![SmallVec::new(); ids.len()];
        let mut edges = Vec::with_capacity(graph.edge_count());
        let directed = graph.is_directed();

        for edge in graph.edges() {
            if edge.is_self_loop() {
                tracing::warn!(node = %ids[edge.from().0], "跳过自环边");
                continue;
            }
            let (from, to, weight) = (edge.from(), edge.to(), edge.weight());
            lists[from.0].push(Neighbor { node: to, weight });
            if !directed {
                lists[to.0].push(Neighbor { node: from, weight });
            }
            edges.push(WeightedEdge { from, to, weight });
        }

        tracing::trace!(
            nodes = ids.len(),
            edges = edges.len(),
            directed,
            "邻接投影已构建"
        );

        Self {
            directed,
            ids,
            lists,
            edges,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// 原始边数（不含自环）
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 当前邻接表项总数（无向图为边数的两倍）
    pub fn entry_count(&self) -> usize {
        self.lists.iter().map(|l| l.len()).sum()
    }

    /// 所有节点下标（投影顺序）
    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.ids.len()).map(NodeIndex)
    }

    /// 节点标识；下标必须来自本投影
    pub fn id(&self, index: NodeIndex) -> &NodeId {
        &self.ids[index.0]
    }

    /// 批量转换为节点标识
    pub fn ids_of(&self, indices: &[NodeIndex]) -> Vec<NodeId> {
        indices.iter().map(|&i| self.id(i).clone()).collect()
    }

    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.ids.get_index_of(id).map(NodeIndex)
    }

    /// 查找下标，不存在时返回 NodeNotFound
    pub fn require(&self, id: &NodeId) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    pub fn neighbors(&self, index: NodeIndex) -> &[Neighbor] {
        &self.lists[index.0]
    }

    /// 出度（无向图即度数）
    pub fn degree(&self, index: NodeIndex) -> usize {
        self.lists[index.0].len()
    }

    /// 原始边（输入顺序）
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    // ==================== 工作副本操作 ====================

    /// 删除 from -> to 的所有表项（无向图同时删除反向），返回被删项在 from 表中的位置
    pub fn remove_edge(&mut self, from: NodeIndex, to: NodeIndex) -> Option<(usize, Neighbor)> {
        let position = self.lists[from.0].iter().position(|n| n.node == to)?;
        let removed = self.lists[from.0][position];
        self.lists[from.0].retain(|n| n.node != to);
        if !self.directed {
            self.lists[to.0].retain(|n| n.node != from);
        }
        Some((position, removed))
    }

    /// 撤销 remove_edge：按原位置放回
    pub fn restore_edge(&mut self, from: NodeIndex, position: usize, neighbor: Neighbor) {
        let list = &mut self.lists[from.0];
        list.insert(position.min(list.len()), neighbor);
        if !self.directed {
            self.lists[neighbor.node.0].push(Neighbor {
                node: from,
                weight: neighbor.weight,
            });
        }
    }

    /// 弹出 index 的最后一个邻接项（无向图同时删除配对的反向项）
    pub fn pop_edge(&mut self, index: NodeIndex) -> Option<Neighbor> {
        let next = self.lists[index.0].pop()?;
        if !self.directed {
            let back = &mut self.lists[next.node.0];
            if let Some(pos) = back.iter().position(|n| n.node == index) {
                back.remove(pos);
            }
        }
        Some(next)
    }

    /// 从 start 出发沿当前表项可达的节点数（含自身）
    pub fn reachable_count(&self, start: NodeIndex) -> usize {
        let mut visited = vec![false; self.ids.len()];
        let mut queue = VecDeque::new();
        visited[start.0] = true;
        queue.push_back(start);
        let mut count = 1;

        while let Some(u) = queue.pop_front() {
            for n in &self.lists[u.0] {
                if !visited[n.node.0] {
                    visited[n.node.0] = true;
                    count += 1;
                    queue.push_back(n.node);
                }
            }
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(directed: bool) -> Graph {
        let mut graph = Graph::new(directed);
        for id in ["1", "2", "3"] {
            graph.add_node(id, id).unwrap();
        }
        graph.add_edge(&"1".into(), &"2".into(), Some(4.0)).unwrap();
        graph.add_edge(&"2".into(), &"3".into(), Some(5.0)).unwrap();
        graph.add_edge(&"3".into(), &"1".into(), None).unwrap();
        graph
    }

    #[test]
    fn test_project_undirected() {
        let adj = triangle(false).project();
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.entry_count(), 6);
        assert_eq!(adj.degree(NodeIndex(0)), 2);
        assert_eq!(
            adj.neighbors(NodeIndex(0)),
            &[
                Neighbor { node: NodeIndex(1), weight: 4.0 },
                Neighbor { node: NodeIndex(2), weight: 0.0 },
            ]
        );
    }

    #[test]
    fn test_project_directed() {
        let adj = triangle(true).project();
        assert_eq!(adj.entry_count(), 3);
        assert_eq!(adj.degree(NodeIndex(0)), 1);
        assert_eq!(adj.neighbors(NodeIndex(2))[0].node, NodeIndex(0));
    }

    #[test]
    fn test_project_skips_self_loop() {
        let mut graph = triangle(false);
        graph.add_edge(&"2".into(), &"2".into(), Some(1.0)).unwrap();
        let adj = graph.project();
        assert_eq!(adj.edge_count(), 3);
        assert_eq!(adj.degree(NodeIndex(1)), 2);
    }

    #[test]
    fn test_remove_and_restore() {
        let mut adj = triangle(false).project();
        let (pos, removed) = adj.remove_edge(NodeIndex(0), NodeIndex(1)).unwrap();
        assert_eq!(adj.entry_count(), 4);
        assert_eq!(adj.reachable_count(NodeIndex(0)), 3);

        adj.restore_edge(NodeIndex(0), pos, removed);
        assert_eq!(adj.entry_count(), 6);
        assert_eq!(adj.neighbors(NodeIndex(0))[0].node, NodeIndex(1));
    }

    #[test]
    fn test_require_missing() {
        let adj = triangle(false).project();
        assert!(matches!(adj.require(&"7".into()), Err(Error::NodeNotFound(_))));
    }
}
