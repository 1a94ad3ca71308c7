//! 数据导入模块
//!
//! 从 JSON 快照文档或 CSV 边列表构建 `Graph`

use crate::error::{Error, Result};
use crate::graph::{Graph, Node};
use crate::types::{GeoPoint, Geometry, NodeId};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 节点记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    /// 缺省时使用 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// 边记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
}

/// 图快照文档（编辑器与展示层之间交换的格式）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    /// 校验并构建图：重复节点、未知端点、只给出一半的坐标都会报错
    pub fn into_graph(self) -> Result<Graph> {
        let mut graph = Graph::new(self.directed);

        for record in self.nodes {
            let label = record.label.unwrap_or_else(|| record.id.to_string());
            let mut node = Node::new(record.id, label);
            match (record.lat, record.lng) {
                (Some(lat), Some(lng)) => node = node.with_position(GeoPoint::new(lat, lng)),
                (None, None) => {}
                _ => {
                    return Err(Error::ParseError(format!(
                        "节点 {} 的坐标不完整（需要同时提供 lat 和 lng）",
                        node.id()
                    )))
                }
            }
            graph.insert_node(node)?;
        }

        for record in self.edges {
            match record.geometry {
                Some(geometry) => {
                    graph.add_edge_with_geometry(&record.from, &record.to, record.weight, geometry)?
                }
                None => graph.add_edge(&record.from, &record.to, record.weight)?,
            };
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed = graph.is_directed(),
            "快照已载入"
        );
        Ok(graph)
    }
}

impl From<&Graph> for GraphSnapshot {
    fn from(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .map(|node| NodeRecord {
                id: node.id().clone(),
                label: Some(node.label().to_string()),
                lat: node.position().map(|p| p.lat),
                lng: node.position().map(|p| p.lng),
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .filter_map(|edge| {
                Some(EdgeRecord {
                    from: graph.id_of(edge.from())?.clone(),
                    to: graph.id_of(edge.to())?.clone(),
                    weight: edge.raw_weight(),
                    geometry: edge.geometry().cloned(),
                })
            })
            .collect();

        Self {
            directed: graph.is_directed(),
            nodes,
            edges,
        }
    }
}

impl Graph {
    /// 导出快照，交给展示层使用
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from(self)
    }
}

/// 从 JSON 字符串构建图
pub fn from_json_str(s: &str) -> Result<Graph> {
    let snapshot: GraphSnapshot = serde_json::from_str(s)?;
    snapshot.into_graph()
}

/// 从 JSON 文件构建图
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "读取 JSON 图快照");
    let reader = BufReader::new(File::open(path)?);
    let snapshot: GraphSnapshot = serde_json::from_reader(reader)?;
    snapshot.into_graph()
}

/// CSV 行：from,to,weight（weight 可为空）
#[derive(Debug, Deserialize)]
struct CsvEdge {
    from: String,
    to: String,
    #[serde(default)]
    weight: Option<f64>,
}

/// 从 CSV 边列表构建图；节点按首次出现顺序创建，label 即 id
pub fn from_csv_reader<R: Read>(reader: R, directed: bool) -> Result<Graph> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut graph = Graph::new(directed);
    for (line, row) in csv_reader.deserialize::<CsvEdge>().enumerate() {
        let row = row.map_err(|e| Error::ParseError(format!("第 {} 行: {}", line + 2, e)))?;
        let (from, to) = (NodeId::from(row.from), NodeId::from(row.to));
        for id in [&from, &to] {
            if graph.index_of(id).is_none() {
                graph.add_node(id.clone(), id.to_string())?;
            }
        }
        graph.add_edge(&from, &to, row.weight)?;
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "CSV 边列表已载入"
    );
    Ok(graph)
}

/// 从 CSV 文件构建图
pub fn load_edges_csv<P: AsRef<Path>>(path: P, directed: bool) -> Result<Graph> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), directed, "读取 CSV 边列表");
    from_csv_reader(File::open(path)?, directed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "directed": false,
        "nodes": [
            {"id": 1, "label": "Ben Thanh", "lat": 10.772, "lng": 106.698},
            {"id": "2", "label": "Opera"},
            {"id": 3}
        ],
        "edges": [
            {"from": 1, "to": 2, "weight": 4, "geometry": [{"lat": 10.772, "lng": 106.698}, {"lat": 10.776, "lng": 106.703}]},
            {"from": "2", "to": "3"}
        ]
    }"#;

    #[test]
    fn test_from_json_str() {
        let graph = from_json_str(SNAPSHOT).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let ben_thanh = graph.node_by_id(&"1".into()).unwrap();
        assert_eq!(ben_thanh.label(), "Ben Thanh");
        assert_eq!(ben_thanh.position(), Some(GeoPoint::new(10.772, 106.698)));
        assert_eq!(graph.node_by_id(&"3".into()).unwrap().label(), "3");

        assert_eq!(graph.edges()[0].geometry().map(|g| g.len()), Some(2));
        assert_eq!(graph.edges()[1].raw_weight(), None);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let graph = from_json_str(SNAPSHOT).unwrap();
        let snapshot = graph.to_snapshot();
        assert_eq!(snapshot.nodes[2].label.as_deref(), Some("3"));

        let rebuilt = snapshot.clone().into_graph().unwrap();
        assert_eq!(rebuilt.to_snapshot(), snapshot);
    }

    #[test]
    fn test_invalid_snapshot() {
        let dup = r#"{"nodes": [{"id": 1}, {"id": "1"}]}"#;
        assert!(matches!(from_json_str(dup), Err(Error::DuplicateNode(_))));

        let dangling = r#"{"nodes": [{"id": 1}], "edges": [{"from": 1, "to": 9}]}"#;
        assert!(matches!(from_json_str(dangling), Err(Error::NodeNotFound(_))));

        let half = r#"{"nodes": [{"id": 1, "lat": 1.0}]}"#;
        assert!(matches!(from_json_str(half), Err(Error::ParseError(_))));

        assert!(matches!(from_json_str("{"), Err(Error::SerializationError(_))));
    }

    #[test]
    fn test_from_csv_reader() {
        let data = "from,to,weight\n3,1,2.5\n1, 2 ,\n2,3,7\n";
        let graph = from_csv_reader(data.as_bytes(), true).unwrap();

        let ids: Vec<&str> = graph.nodes().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert!(graph.is_directed());
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges()[0].raw_weight(), Some(2.5));
        assert_eq!(graph.edges()[1].raw_weight(), None);
    }

    #[test]
    fn test_csv_bad_weight() {
        let data = "from,to,weight\n1,2,heavy\n";
        assert!(matches!(
            from_csv_reader(data.as_bytes(), false),
            Err(Error::ParseError(msg)) if msg.contains("第 2 行")
        ));
    }
}
