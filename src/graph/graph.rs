//! 图数据结构
//!
//! 一次算法调用所用的不可变快照：节点 arena + 边记录 + 有向标志

use super::adjacency::AdjacencyMap;
use super::edge::{Edge, EdgeIndex};
use super::node::{Node, NodeIndex};
use crate::error::{Error, Result};
use crate::types::{Geometry, NodeId};
use indexmap::IndexMap;

/// 图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// 是否为有向图
    directed: bool,
    /// 节点（按插入顺序，下标即 NodeIndex）
    nodes: IndexMap<NodeId, Node>,
    /// 边
    edges: Vec<Edge>,
}

impl Graph {
    /// 创建空图
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// 切换有向/无向模式，节点和边保持不变
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    // ==================== 节点操作 ====================

    /// 添加节点
    pub fn add_node(
        &mut self,
        id: impl Into<NodeId>,
        label: impl Into<String>,
    ) -> Result<NodeIndex> {
        self.insert_node(Node::new(id.into(), label))
    }

    /// 添加已构造好的节点（可带坐标）
    pub fn insert_node(&mut self, node: Node) -> Result<NodeIndex> {
        if self.nodes.contains_key(node.id()) {
            return Err(Error::DuplicateNode(node.id().clone()));
        }
        let (index, _) = self.nodes.insert_full(node.id().clone(), node);
        Ok(NodeIndex(index))
    }

    /// 通过标识查找下标
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.nodes.get_index_of(id).map(NodeIndex)
    }

    /// 查找下标，不存在时返回 NodeNotFound
    pub fn require(&self, id: &NodeId) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    /// 获取节点
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get_index(index.0).map(|(_, node)| node)
    }

    /// 通过标识获取节点
    pub fn node_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// 所有节点（插入顺序）
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        weight: Option<f64>,
    ) -> Result<EdgeIndex> {
        let from = self.require(from)?;
        let to = self.require(to)?;
        Ok(self.push_edge(Edge::new(from, to, weight)))
    }

    /// 添加带折线几何的边（地图场景）
    pub fn add_edge_with_geometry(
        &mut self,
        from: &NodeId,
        to: &NodeId,
        weight: Option<f64>,
        geometry: Geometry,
    ) -> Result<EdgeIndex> {
        let from = self.require(from)?;
        let to = self.require(to)?;
        Ok(self.push_edge(Edge::new(from, to, weight).with_geometry(geometry)))
    }

    fn push_edge(&mut self, edge: Edge) -> EdgeIndex {
        self.edges.push(edge);
        EdgeIndex(self.edges.len() - 1)
    }

    /// 获取边
    pub fn edge(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index.0)
    }

    /// 所有边（插入顺序）
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// 节点标识
    pub fn id_of(&self, index: NodeIndex) -> Option<&NodeId> {
        self.nodes.get_index(index.0).map(|(id, _)| id)
    }

    // ==================== 投影 ====================

    /// 按当前有向标志构建邻接投影
    pub fn project(&self) -> AdjacencyMap {
        AdjacencyMap::project(self)
    }
}
