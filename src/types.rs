//! 通用类型定义

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// 节点标识（编辑器里的字符串或整数 token，按值比较）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 能解析为数字时返回其数值
    pub fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// 全序：数字 id 按数值排在前面，其余按字典序；数值相同（如 "1" 与 "01"）再按字典序
impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Token {
            Int(i64),
            Text(String),
        }

        Ok(match Token::deserialize(deserializer)? {
            Token::Int(v) => NodeId(v.to_string()),
            Token::Text(s) => NodeId(s),
        })
    }
}

/// 地理坐标（地图场景使用，引擎不解释）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// 边的折线几何，原样透传
pub type Geometry = Vec<GeoPoint>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_order() {
        let mut ids: Vec<NodeId> = ["10", "b", "2", "a", "1"]
            .iter()
            .map(|s| NodeId::from(*s))
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(sorted, vec!["1", "2", "10", "a", "b"]);
    }

    #[test]
    fn test_node_id_deserialize() {
        let ids: Vec<NodeId> = serde_json::from_str(r#"[1, "2", "x"]"#).unwrap();
        assert_eq!(ids, vec![NodeId::from("1"), NodeId::from("2"), NodeId::from("x")]);
        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), r#""1""#);
    }
}
