//! 节点定义
//!
//! 节点由外部编辑器创建，引擎只读取其快照

use crate::types::{GeoPoint, NodeId};
use serde::{Deserialize, Serialize};

/// 节点在图内部 arena 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

/// 节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 节点标识
    id: NodeId,
    /// 显示名称（与标识无关）
    label: String,
    /// 地图场景中的坐标
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<GeoPoint>,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            position: None,
        }
    }

    /// 设置坐标
    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }
}
