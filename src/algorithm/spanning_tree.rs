//! 最小生成树（Prim / Kruskal）
//!
//! 两种算法都把邻接投影当作无向图使用；对有向图调用只给出警告

use super::MinEntry;
use crate::graph::{AdjacencyMap, NodeIndex};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;

/// 生成树中的边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MstEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

/// 最小生成树（非连通图为生成森林的一部分）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpanningTree {
    pub mst_edges: Vec<MstEdge>,
    /// mst_edges 权重之和
    pub cost: f64,
}

impl SpanningTree {
    fn from_edges(adj: &AdjacencyMap, edges: Vec<(NodeIndex, NodeIndex, f64)>) -> Self {
        let mst_edges: Vec<MstEdge> = edges
            .into_iter()
            .map(|(from, to, weight)| MstEdge {
                from: adj.id(from).clone(),
                to: adj.id(to).clone(),
                weight,
            })
            .collect();
        let cost = mst_edges.iter().map(|e| e.weight).sum();
        Self { mst_edges, cost }
    }
}

fn warn_if_directed(adj: &AdjacencyMap, algorithm: &'static str) {
    if adj.is_directed() {
        tracing::warn!(algorithm, "最小生成树只适用于无向图，按投影原样计算");
    }
}

/// Prim：从第一个节点出发，只覆盖其可达分量
#[tracing::instrument(skip_all, fields(nodes = adj.node_count()))]
pub fn prim(adj: &AdjacencyMap) -> SpanningTree {
    warn_if_directed(adj, "prim");
    let n = adj.node_count();
    if n == 0 {
        return SpanningTree::default();
    }

    let start = NodeIndex(0);
    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; n];
    let mut in_tree = vec![false; n];
    let mut edges = Vec::with_capacity(n - 1);
    let mut heap = BinaryHeap::new();

    key[start.0] = 0.0;
    heap.push(MinEntry {
        key: 0.0,
        node: start,
    });

    while let Some(MinEntry { node: u, .. }) = heap.pop() {
        if in_tree[u.0] {
            continue;
        }
        in_tree[u.0] = true;

        if let Some(p) = parent[u.0] {
            edges.push((p, u, key[u.0]));
        }

        for neighbor in adj.neighbors(u) {
            let v = neighbor.node;
            if !in_tree[v.0] && neighbor.weight < key[v.0] {
                key[v.0] = neighbor.weight;
                parent[v.0] = Some(u);
                heap.push(MinEntry {
                    key: neighbor.weight,
                    node: v,
                });
            }
        }
    }

    let tree = SpanningTree::from_edges(adj, edges);
    tracing::debug!(edges = tree.mst_edges.len(), cost = tree.cost, "Prim 完成");
    tree
}

/// Kruskal：按权重稳定排序后用并查集合并
#[tracing::instrument(skip_all, fields(nodes = adj.node_count(), edges = adj.edge_count()))]
pub fn kruskal(adj: &AdjacencyMap) -> SpanningTree {
    warn_if_directed(adj, "kruskal");

    let mut sorted: Vec<_> = adj.edges().to_vec();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut components = DisjointSet::new(adj.node_count());
    let mut edges = Vec::new();

    for edge in sorted {
        if components.union(edge.from.0, edge.to.0) {
            edges.push((edge.from, edge.to, edge.weight));
        } else {
            tracing::trace!(from = %adj.id(edge.from), to = %adj.id(edge.to), "跳过成环边");
        }
    }

    let tree = SpanningTree::from_edges(adj, edges);
    tracing::debug!(edges = tree.mst_edges.len(), cost = tree.cost, "Kruskal 完成");
    tree
}

/// 并查集（按秩合并 + 路径压缩）
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// 查找代表元
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// 合并两个集合；已在同一集合时返回 false
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let (rx, ry) = (self.find(x), self.find(y));
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn build(edges: &[(&str, &str, f64)], extra_nodes: &[&str]) -> AdjacencyMap {
        let mut graph = Graph::new(false);
        for (u, v, _) in edges {
            for id in [u, v] {
                if graph.index_of(&(*id).into()).is_none() {
                    graph.add_node(*id, *id).unwrap();
                }
            }
        }
        for id in extra_nodes {
            graph.add_node(*id, *id).unwrap();
        }
        for (u, v, w) in edges {
            graph.add_edge(&(*u).into(), &(*v).into(), Some(*w)).unwrap();
        }
        graph.project()
    }

    fn edge(from: &str, to: &str, weight: f64) -> MstEdge {
        MstEdge {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    #[test]
    fn test_kruskal_triangle() {
        let adj = build(&[("1", "2", 10.0), ("2", "3", 5.0), ("1", "3", 15.0)], &[]);
        let tree = kruskal(&adj);

        assert_eq!(tree.mst_edges, vec![edge("2", "3", 5.0), edge("1", "2", 10.0)]);
        assert_eq!(tree.cost, 15.0);
    }

    #[test]
    fn test_prim_matches_kruskal_cost() {
        let adj = build(
            &[
                ("1", "2", 4.0),
                ("2", "3", 5.0),
                ("3", "4", 2.0),
                ("4", "1", 8.0),
                ("2", "4", 1.0),
            ],
            &[],
        );
        let p = prim(&adj);
        let k = kruskal(&adj);

        assert_eq!(p.cost, 7.0);
        assert_eq!(k.cost, 7.0);
        assert_eq!(p.mst_edges.len(), 3);
        assert_eq!(k.mst_edges.len(), 3);
        assert_eq!(p.mst_edges[0], edge("1", "2", 4.0));
    }

    #[test]
    fn test_disconnected_graph() {
        let adj = build(&[("1", "2", 3.0), ("3", "4", 1.0)], &["5"]);

        // Prim 只覆盖起点所在分量
        let p = prim(&adj);
        assert_eq!(p.mst_edges, vec![edge("1", "2", 3.0)]);

        // Kruskal 构建整个森林
        let k = kruskal(&adj);
        assert_eq!(k.mst_edges.len(), 2);
        assert_eq!(k.cost, 4.0);
    }

    #[test]
    fn test_kruskal_stable_ties() {
        let adj = build(&[("1", "2", 1.0), ("2", "3", 1.0), ("1", "3", 1.0)], &[]);
        let tree = kruskal(&adj);
        assert_eq!(tree.mst_edges, vec![edge("1", "2", 1.0), edge("2", "3", 1.0)]);
    }

    #[test]
    fn test_empty_graph() {
        let adj = Graph::new(false).project();
        assert_eq!(prim(&adj), SpanningTree::default());
        assert_eq!(kruskal(&adj).cost, 0.0);
    }

    #[test]
    fn test_disjoint_set() {
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert!(set.union(1, 3));
        assert_eq!(set.find(0), set.find(2));
    }
}
