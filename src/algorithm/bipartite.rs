//! 二分图检测（BFS 二染色，覆盖所有连通分量）

use crate::graph::{AdjacencyMap, NodeIndex};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 检测结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Bipartition {
    /// 两个颜色类，各自按染色顺序排列
    Bipartite { set_a: Vec<NodeId>, set_b: Vec<NodeId> },
    /// 染色冲突时被重复染色的邻居
    NotBipartite { conflict_node: NodeId },
}

impl Bipartition {
    pub fn is_bipartite(&self) -> bool {
        matches!(self, Bipartition::Bipartite { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    A,
    B,
}

impl Color {
    fn flip(self) -> Self {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }
}

/// 忽略方向的邻居表；无向图与投影的邻接顺序一致
fn undirected_neighbors(adj: &AdjacencyMap) -> Vec<Vec<NodeIndex>> {
    let mut lists = vec![Vec::new(); adj.node_count()];
    for u in adj.nodes() {
        for n in adj.neighbors(u) {
            lists[u.0].push(n.node);
            if adj.is_directed() {
                lists[n.node.0].push(u);
            }
        }
    }
    lists
}

/// 二染色；有向图按其底层无向图染色
#[tracing::instrument(skip_all, fields(nodes = adj.node_count()))]
pub fn check_bipartite(adj: &AdjacencyMap) -> Bipartition {
    if adj.is_directed() {
        tracing::warn!("二分图检测通常针对无向图，有向图忽略边的方向");
    }

    let neighbors = undirected_neighbors(adj);
    let mut color: Vec<Option<Color>> = vec![None; adj.node_count()];
    let mut set_a: Vec<NodeIndex> = Vec::new();
    let mut set_b: Vec<NodeIndex> = Vec::new();

    for root in adj.nodes() {
        if color[root.0].is_some() {
            continue;
        }
        color[root.0] = Some(Color::A);
        set_a.push(root);

        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            let Some(cu) = color[u.0] else { continue };
            for &v in &neighbors[u.0] {
                match color[v.0] {
                    None => {
                        let cv = cu.flip();
                        color[v.0] = Some(cv);
                        match cv {
                            Color::A => set_a.push(v),
                            Color::B => set_b.push(v),
                        }
                        queue.push_back(v);
                    }
                    Some(cv) if cv == cu => {
                        tracing::debug!(node = %adj.id(v), "染色冲突");
                        return Bipartition::NotBipartite {
                            conflict_node: adj.id(v).clone(),
                        };
                    }
                    Some(_) => {}
                }
            }
        }
    }

    Bipartition::Bipartite {
        set_a: adj.ids_of(&set_a),
        set_b: adj.ids_of(&set_b),
    }
}
