//! 错误类型定义

use crate::types::NodeId;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// JSON 模式下序列化为 `{"kind": ..., "detail": ...}`
#[derive(Error, Debug, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Error {
    #[error("节点不存在: {0}")]
    NodeNotFound(NodeId),

    #[error("节点已存在: {0}")]
    DuplicateNode(NodeId),

    #[error("缺少端点参数: {0}")]
    MissingEndpoint(&'static str),

    #[error("源点与汇点不能相同: {0}")]
    SameEndpoint(NodeId),

    #[error("不支持负权边 {from} -> {to}: {weight}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },

    #[error("找不到从 {start} 到 {end} 的路径")]
    NoPathFound {
        start: NodeId,
        end: NodeId,
        /// 失败前已确定（settled）的节点顺序
        visit_order: Vec<NodeId>,
    },

    #[error("不满足欧拉条件: {0}")]
    EulerConditionViolated(EulerViolation),

    #[error("{algorithm} 超出迭代上限 {limit}")]
    IterationLimitExceeded {
        algorithm: &'static str,
        limit: usize,
    },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("序列化错误: {0}")]
    SerializationError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] #[serde(serialize_with = "io_message")] std::io::Error),
}

fn io_message<S: Serializer>(
    err: &std::io::Error,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ParseError(e.to_string())
    }
}

/// 欧拉路径不可行的具体原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EulerViolation {
    /// 无向图：奇度数节点个数既不是 0 也不是 2
    OddDegree { count: usize },
    /// 有向图：该节点入度与出度相差超过 1
    Imbalanced { node: NodeId },
    /// 有向图：起点/终点候选个数不是 (0, 0) 或 (1, 1)
    Endpoints { starts: usize, ends: usize },
    /// 边分布在多个连通分量中
    Disconnected,
}

impl fmt::Display for EulerViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EulerViolation::OddDegree { count } => {
                write!(f, "无向图有 {} 个奇度数节点（只允许 0 或 2 个）", count)
            }
            EulerViolation::Imbalanced { node } => {
                write!(f, "有向图节点 {} 的入度与出度不平衡", node)
            }
            EulerViolation::Endpoints { starts, ends } => write!(
                f,
                "有向图有 {} 个起点候选和 {} 个终点候选",
                starts, ends
            ),
            EulerViolation::Disconnected => write!(f, "边不在同一个连通分量中"),
        }
    }
}
