//! 图核心模块
//!
//! 定义节点、边、图快照和邻接投影

mod adjacency;
mod edge;
mod graph;
mod node;

pub use adjacency::{AdjacencyMap, Neighbor, WeightedEdge};
pub use edge::{Edge, EdgeIndex};
pub use graph::Graph;
pub use node::{Node, NodeIndex};
