//! 欧拉回路 / 欧拉路径
//!
//! 可行性检查由 Fleury 与 Hierholzer 共用；两者都在投影的私有副本上删边

use super::spanning_tree::DisjointSet;
use crate::error::{Error, EulerViolation, Result};
use crate::graph::{AdjacencyMap, Neighbor, NodeIndex};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 欧拉游走类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EulerKind {
    /// 起点与终点相同
    Circuit,
    /// 起点与终点不同
    Path,
}

/// 可行性检查结果：游走类型与必须使用的起点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EulerStart {
    /// 空图没有起点
    pub start: Option<NodeIndex>,
    pub kind: EulerKind,
}

/// 欧拉游走：每条边恰好经过一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerWalk {
    pub path: Vec<NodeId>,
    #[serde(rename = "type")]
    pub kind: EulerKind,
}

/// 按度数检查欧拉条件，并要求所有边位于同一连通分量
pub fn check_euler(adj: &AdjacencyMap) -> Result<EulerStart> {
    let mut in_degree = vec![0usize; adj.node_count()];
    for u in adj.nodes() {
        for n in adj.neighbors(u) {
            in_degree[n.node.0] += 1;
        }
    }
    let has_edges = |u: NodeIndex| adj.degree(u) > 0 || in_degree[u.0] > 0;
    let circuit_start = adj.nodes().find(|&u| has_edges(u)).or_else(|| adj.nodes().next());

    let plan = if adj.is_directed() {
        let mut starts = Vec::new();
        let mut ends = 0;
        for u in adj.nodes() {
            let (out, inn) = (adj.degree(u), in_degree[u.0]);
            if out == inn {
                continue;
            } else if out == inn + 1 {
                starts.push(u);
            } else if inn == out + 1 {
                ends += 1;
            } else {
                return Err(Error::EulerConditionViolated(EulerViolation::Imbalanced {
                    node: adj.id(u).clone(),
                }));
            }
        }
        match (starts.len(), ends) {
            (0, 0) => EulerStart {
                start: circuit_start,
                kind: EulerKind::Circuit,
            },
            (1, 1) => EulerStart {
                start: Some(starts[0]),
                kind: EulerKind::Path,
            },
            (starts, ends) => {
                return Err(Error::EulerConditionViolated(EulerViolation::Endpoints {
                    starts,
                    ends,
                }))
            }
        }
    } else {
        let odd: Vec<NodeIndex> = adj.nodes().filter(|&u| adj.degree(u) % 2 == 1).collect();
        match odd.len() {
            0 => EulerStart {
                start: circuit_start,
                kind: EulerKind::Circuit,
            },
            2 => EulerStart {
                start: Some(odd[0]),
                kind: EulerKind::Path,
            },
            count => {
                return Err(Error::EulerConditionViolated(EulerViolation::OddDegree {
                    count,
                }))
            }
        }
    };

    // 弱连通：所有带边节点与起点在同一分量
    if let Some(start) = plan.start {
        let mut components = DisjointSet::new(adj.node_count());
        for edge in adj.edges() {
            components.union(edge.from.0, edge.to.0);
        }
        let root = components.find(start.0);
        if adj
            .nodes()
            .any(|u| has_edges(u) && components.find(u.0) != root)
        {
            return Err(Error::EulerConditionViolated(EulerViolation::Disconnected));
        }
    }

    Ok(plan)
}

/// Fleury：每一步优先走非桥边，复杂度 O(E²)
#[tracing::instrument(skip_all, fields(directed = adj.is_directed(), edges = adj.edge_count()))]
pub fn fleury(adj: &AdjacencyMap) -> Result<EulerWalk> {
    let plan = check_euler(adj)?;
    let Some(start) = plan.start else {
        return Ok(EulerWalk {
            path: Vec::new(),
            kind: plan.kind,
        });
    };

    let mut work = adj.clone();
    let mut remaining = adj.edge_count();
    let mut current = start;
    let mut path = vec![start];

    while remaining > 0 {
        let candidates: Vec<Neighbor> = work.neighbors(current).to_vec();
        let chosen = match candidates.as_slice() {
            [] => break,
            [only] => only.node,
            _ => pick_non_bridge(&mut work, current, &candidates).unwrap_or(candidates[0].node),
        };

        work.remove_edge(current, chosen);
        remaining -= 1;
        current = chosen;
        path.push(current);
    }

    tracing::debug!(steps = path.len() - 1, kind = ?plan.kind, "Fleury 完成");
    Ok(EulerWalk {
        path: adj.ids_of(&path),
        kind: plan.kind,
    })
}

/// 按邻接表顺序试删每条候选边，返回第一条不是桥的边的终点
fn pick_non_bridge(
    work: &mut AdjacencyMap,
    current: NodeIndex,
    candidates: &[Neighbor],
) -> Option<NodeIndex> {
    let before = work.reachable_count(current);

    for candidate in candidates {
        let v = candidate.node;
        let Some((position, removed)) = work.remove_edge(current, v) else {
            continue;
        };
        let safe = if work.is_directed() {
            // 有向图：剩余所有出边必须仍能从 v 到达
            reaches_all_edges(work, v)
        } else {
            work.reachable_count(current) == before
        };
        work.restore_edge(current, position, removed);

        if safe {
            return Some(v);
        }
        tracing::trace!(from = %work.id(current), to = %work.id(v), "跳过桥边");
    }

    None
}

fn reaches_all_edges(work: &AdjacencyMap, from: NodeIndex) -> bool {
    let mut visited = vec![false; work.node_count()];
    let mut queue = VecDeque::new();
    visited[from.0] = true;
    queue.push_back(from);

    while let Some(u) = queue.pop_front() {
        for n in work.neighbors(u) {
            if !visited[n.node.0] {
                visited[n.node.0] = true;
                queue.push_back(n.node);
            }
        }
    }

    work.nodes().all(|u| visited[u.0] || work.degree(u) == 0)
}

/// Hierholzer：显式栈，线性时间
#[tracing::instrument(skip_all, fields(directed = adj.is_directed(), edges = adj.edge_count()))]
pub fn hierholzer(adj: &AdjacencyMap) -> Result<EulerWalk> {
    let plan = check_euler(adj)?;
    let Some(start) = plan.start else {
        return Ok(EulerWalk {
            path: Vec::new(),
            kind: plan.kind,
        });
    };

    let mut work = adj.clone();
    let mut stack = vec![start];
    let mut circuit = Vec::with_capacity(adj.edge_count() + 1);

    while let Some(&top) = stack.last() {
        match work.pop_edge(top) {
            Some(next) => stack.push(next.node),
            None => {
                circuit.push(top);
                stack.pop();
            }
        }
    }
    circuit.reverse();

    tracing::debug!(steps = circuit.len() - 1, kind = ?plan.kind, "Hierholzer 完成");
    Ok(EulerWalk {
        path: adj.ids_of(&circuit),
        kind: plan.kind,
    })
}
