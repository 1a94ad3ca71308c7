//! 内置示例图

use crate::algorithm::AlgorithmKind;
use crate::error::Result;
use crate::graph::{Graph, Node};
use crate::types::{GeoPoint, NodeId};

/// 示例场景：一张图加上建议运行的算法与端点
#[derive(Debug, Clone)]
pub struct Scenario {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub algorithm: AlgorithmKind,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    pub graph: Graph,
}

/// 全部内置场景
pub fn builtin() -> Result<Vec<Scenario>> {
    Ok(vec![default_graph()?, hcm_map()?, flow_network()?])
}

/// 按 id 查找场景
pub fn find(id: &str) -> Result<Option<Scenario>> {
    Ok(builtin()?.into_iter().find(|s| s.id == id))
}

fn weighted(graph: &mut Graph, edges: &[(&str, &str, f64)]) -> Result<()> {
    for (from, to, weight) in edges {
        graph.add_edge(&(*from).into(), &(*to).into(), Some(*weight))?;
    }
    Ok(())
}

/// 编辑器启动时的 4 节点无向图
fn default_graph() -> Result<Scenario> {
    let mut graph = Graph::new(false);
    for id in ["1", "2", "3", "4"] {
        graph.add_node(id, id)?;
    }
    weighted(
        &mut graph,
        &[("1", "2", 4.0), ("2", "3", 5.0), ("3", "4", 2.0), ("4", "1", 8.0), ("2", "4", 1.0)],
    )?;

    Ok(Scenario {
        id: "default",
        name: "默认示例图",
        description: "4 个节点、5 条带权无向边",
        algorithm: AlgorithmKind::Dijkstra,
        start: Some("1".into()),
        end: Some("3".into()),
        graph,
    })
}

/// 胡志明市第一郡地标（OSM 坐标，权重单位 km）
fn hcm_map() -> Result<Scenario> {
    let mut graph = Graph::new(false);
    let landmarks = [
        ("1", "Chợ Bến Thành", 10.7721, 106.6983),
        ("2", "Nhà thờ Đức Bà", 10.7798, 106.6990),
        ("3", "Phố đi bộ Nguyễn Huệ", 10.7744, 106.7035),
        ("4", "Thảo Cầm Viên", 10.7877, 106.7052),
        ("5", "Dinh Độc Lập", 10.7769, 106.6953),
    ];
    for (id, label, lat, lng) in landmarks {
        graph.insert_node(Node::new(id.into(), label).with_position(GeoPoint::new(lat, lng)))?;
    }

    let polyline = |points: &[(f64, f64)]| -> Vec<GeoPoint> {
        points.iter().map(|&(lat, lng)| GeoPoint::new(lat, lng)).collect()
    };

    graph.add_edge_with_geometry(
        &"1".into(),
        &"5".into(),
        Some(0.8),
        polyline(&[
            (10.7721, 106.6983),
            (10.7735, 106.6995),
            (10.7719, 106.7013),
            (10.7765, 106.6957),
            (10.7769, 106.6953),
        ]),
    )?;
    graph.add_edge_with_geometry(
        &"5".into(),
        &"2".into(),
        Some(0.6),
        polyline(&[(10.7769, 106.6953), (10.7785, 106.6975), (10.7798, 106.6990)]),
    )?;
    graph.add_edge_with_geometry(
        &"2".into(),
        &"4".into(),
        Some(1.5),
        polyline(&[(10.7798, 106.6990), (10.7810, 106.7005), (10.7877, 106.7052)]),
    )?;
    weighted(&mut graph, &[("1", "3", 1.2), ("3", "2", 0.9), ("3", "4", 2.1)])?;

    Ok(Scenario {
        id: "real-map-hcm",
        name: "实际地图（OSM）",
        description: "胡志明市第一郡，边附带沿街道的折线",
        algorithm: AlgorithmKind::Dijkstra,
        start: Some("1".into()),
        end: Some("4".into()),
        graph,
    })
}

/// 经典 6 节点有向流网络，最大流 23
fn flow_network() -> Result<Scenario> {
    let mut graph = Graph::new(true);
    for id in ["1", "2", "3", "4", "5", "6"] {
        graph.add_node(id, id)?;
    }
    weighted(
        &mut graph,
        &[
            ("1", "2", 16.0),
            ("1", "3", 13.0),
            ("3", "2", 4.0),
            ("2", "4", 12.0),
            ("4", "3", 9.0),
            ("3", "5", 14.0),
            ("5", "4", 7.0),
            ("4", "6", 20.0),
            ("5", "6", 4.0),
        ],
    )?;

    Ok(Scenario {
        id: "flow-network",
        name: "流网络",
        description: "源点 1、汇点 6 的有向容量图",
        algorithm: AlgorithmKind::MaxFlow,
        start: Some("1".into()),
        end: Some("6".into()),
        graph,
    })
}
