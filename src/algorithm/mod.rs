//! 图算法模块
//!
//! 每个算法都是作用于邻接投影的纯函数，返回独立的结果值

mod bipartite;
mod euler;
mod max_flow;
mod runner;
mod shortest_path;
mod spanning_tree;
mod traversal;

pub use bipartite::{check_bipartite, Bipartition};
pub use euler::{check_euler, fleury, hierholzer, EulerKind, EulerStart, EulerWalk};
pub use max_flow::{EdmondsKarp, FlowEdge, MaxFlow};
pub use runner::{run, AlgorithmKind, Outcome};
pub use shortest_path::{dijkstra, ShortestPath};
pub use spanning_tree::{kruskal, prim, DisjointSet, MstEdge, SpanningTree};
pub use traversal::{bfs, dfs, Traversal};

use crate::error::{Error, Result};
use crate::graph::NodeIndex;
use std::cmp::Ordering;

/// 迭代保护：上限由图规模推导，只在 debug 构建中计数
#[derive(Debug)]
pub(crate) struct IterationGuard {
    algorithm: &'static str,
    limit: usize,
    used: usize,
}

impl IterationGuard {
    pub(crate) fn new(algorithm: &'static str, limit: usize) -> Self {
        Self {
            algorithm,
            limit,
            used: 0,
        }
    }

    pub(crate) fn tick(&mut self) -> Result<()> {
        if cfg!(debug_assertions) {
            self.used += 1;
            if self.used > self.limit {
                tracing::error!(
                    algorithm = self.algorithm,
                    limit = self.limit,
                    "迭代次数超出理论上限"
                );
                return Err(Error::IterationLimitExceeded {
                    algorithm: self.algorithm,
                    limit: self.limit,
                });
            }
        }
        Ok(())
    }
}

/// 最小堆元素（BinaryHeap 为最大堆，比较时取反）
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinEntry {
    pub(crate) key: f64,
    pub(crate) node: NodeIndex,
}

impl PartialEq for MinEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MinEntry {}

impl PartialOrd for MinEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_min_entry_order() {
        let mut heap = BinaryHeap::new();
        for (key, node) in [(3.0, 0), (1.0, 1), (2.0, 2), (1.0, 3)] {
            heap.push(MinEntry {
                key,
                node: NodeIndex(node),
            });
        }
        let keys: Vec<f64> = std::iter::from_fn(|| heap.pop().map(|e| e.key)).collect();
        assert_eq!(keys, vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_iteration_guard() {
        let mut guard = IterationGuard::new("test", 2);
        assert!(guard.tick().is_ok());
        assert!(guard.tick().is_ok());
        if cfg!(debug_assertions) {
            assert!(matches!(
                guard.tick(),
                Err(Error::IterationLimitExceeded { limit: 2, .. })
            ));
        }
    }
}
