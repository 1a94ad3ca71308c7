//! GraphLab - 图算法引擎
//!
//! 作用于不可变图快照的确定性算法：
//! - 遍历（BFS / DFS）与 Dijkstra 最短路径
//! - 最小生成树（Prim / Kruskal）与 Edmonds-Karp 最大流
//! - 欧拉回路 / 路径（Fleury / Hierholzer）与二分图检测
//! - 邻接矩阵、邻接表、边列表三种文本表示

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod representation;
pub mod scenario;
pub mod types;

// 重导出常用类型
pub use algorithm::{run, AlgorithmKind, Outcome};
pub use error::{Error, EulerViolation, Result};
pub use graph::{AdjacencyMap, Edge, EdgeIndex, Graph, Node, NodeIndex};
pub use import::GraphSnapshot;
pub use representation::{represent, Representations};
pub use types::{GeoPoint, Geometry, NodeId};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
