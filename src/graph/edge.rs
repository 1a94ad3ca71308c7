//! 边定义
//!
//! 有序端点对 + 可选权重 + 可选折线几何

use crate::graph::node::NodeIndex;
use crate::types::Geometry;
use serde::{Deserialize, Serialize};

/// 边在图内部的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// 起点
    from: NodeIndex,
    /// 终点
    to: NodeIndex,
    /// 权重（缺省视为未设置）
    weight: Option<f64>,
    /// 地图折线，引擎不解释
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<Geometry>,
}

impl Edge {
    /// 创建新边
    pub fn new(from: NodeIndex, to: NodeIndex, weight: Option<f64>) -> Self {
        Self {
            from,
            to,
            weight,
            geometry: None,
        }
    }

    /// 附带折线几何
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn from(&self) -> NodeIndex {
        self.from
    }

    pub fn to(&self) -> NodeIndex {
        self.to
    }

    /// 算法使用的权重，未设置时为 0
    pub fn weight(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    /// 原始权重
    pub fn raw_weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
