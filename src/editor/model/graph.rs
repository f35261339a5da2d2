use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use super::connection::{Connection, ConnectionCurve};
use super::error::EditorError;
use super::node::FlowNode;
use super::position::Position;

/// 연결 추가 시도의 결과이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// 새 연결이 추가되었다.
    Added,
    /// 출발과 도착이 같은 노드라 무시되었다.
    SelfLoop,
    /// 동일한 순서쌍이 이미 존재해 무시되었다.
    Duplicate,
    /// 한쪽 끝 노드가 존재하지 않아 무시되었다.
    MissingNode,
}

/// 노드와 연결로 구성된 플로우차트 전체이다. 저장과 되돌리기의 단위가 된다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    /// 노드 목록. 뒤에 있을수록 위에 그려진다.
    #[serde(default, deserialize_with = "lenient_list")]
    pub nodes: Vec<FlowNode>,
    /// 연결 목록.
    #[serde(default, deserialize_with = "lenient_list")]
    pub connections: Vec<Connection>,
}

/// `null`은 빈 목록으로 읽고, 해석할 수 없는 항목은 경고 후 건너뛴다.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    let items = raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(error = %err, "해석할 수 없는 항목을 건너뜁니다.");
                None
            }
        })
        .collect();
    Ok(items)
}

impl FlowGraph {
    /// 빈 그래프를 생성한다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 노드가 하나도 없는지 확인한다.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// ID로 노드를 조회한다.
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// ID로 노드를 조회한다.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    /// ID로 노드를 조회하고 없으면 오류를 반환한다.
    pub fn require_node_mut(&mut self, id: &str) -> Result<&mut FlowNode, EditorError> {
        self.node_mut(id)
            .ok_or_else(|| EditorError::UnknownNode(id.to_string()))
    }

    /// 노드를 추가한다.
    pub fn add_node(&mut self, node: FlowNode) {
        self.nodes.push(node);
    }

    /// 노드를 제거하고 해당 노드를 참조하는 연결을 모두 정리한다.
    pub fn remove_node(&mut self, id: &str) -> Option<FlowNode> {
        let idx = self.nodes.iter().position(|node| node.id == id)?;
        let removed = self.nodes.remove(idx);
        self.connections.retain(|conn| !conn.touches(id));
        Some(removed)
    }

    /// 순서쌍이 이미 존재하는지 확인한다.
    pub fn has_connection(&self, from: &str, to: &str) -> bool {
        self.connections
            .iter()
            .any(|conn| conn.from == from && conn.to == to)
    }

    /// 자기 연결과 중복 연결을 거른 뒤 연결을 추가한다.
    pub fn add_connection(&mut self, from: &str, to: &str) -> ConnectOutcome {
        if from == to {
            return ConnectOutcome::SelfLoop;
        }
        if self.node(from).is_none() || self.node(to).is_none() {
            return ConnectOutcome::MissingNode;
        }
        if self.has_connection(from, to) {
            return ConnectOutcome::Duplicate;
        }
        self.connections.push(Connection::new(from, to));
        ConnectOutcome::Added
    }

    /// 지정한 순서쌍과 정확히 일치하는 연결만 제거한다.
    pub fn remove_connection(&mut self, target: &Connection) -> bool {
        let before = self.connections.len();
        self.connections.retain(|conn| conn != target);
        before != self.connections.len()
    }

    /// 존재하지 않는 노드를 참조하거나 중복된 연결을 제거하고 제거 개수를 반환한다.
    pub fn prune_connections(&mut self) -> usize {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let before = self.connections.len();
        self.connections.retain(|conn| {
            ids.contains(conn.from.as_str())
                && ids.contains(conn.to.as_str())
                && seen.insert((conn.from.clone(), conn.to.clone()))
        });
        before - self.connections.len()
    }

    /// 연결의 곡선 형상을 계산한다. 끝 노드가 없으면 `None`이다.
    pub fn connection_curve(&self, conn: &Connection, node_size: Position) -> Option<ConnectionCurve> {
        let from = self.node(&conn.from)?;
        let to = self.node(&conn.to)?;
        Some(ConnectionCurve::between(
            from.output_anchor(node_size),
            to.input_anchor(node_size),
        ))
    }

    /// 월드 좌표 아래에 있는 가장 위쪽 노드를 찾는다.
    pub fn node_at(&self, point: Position, node_size: Position) -> Option<&FlowNode> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.contains(point, node_size))
    }

    /// 월드 좌표 아래에 있는 출력 핸들의 노드를 찾는다.
    pub fn handle_at(&self, point: Position, node_size: Position, radius: f64) -> Option<&FlowNode> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.output_anchor(node_size).distance(point) <= radius)
    }

    /// 월드 좌표에서 `tolerance` 이내에 지나는 연결을 찾는다.
    pub fn connection_at(
        &self,
        point: Position,
        node_size: Position,
        tolerance: f64,
    ) -> Option<&Connection> {
        self.connections.iter().rev().find(|conn| {
            self.connection_curve(conn, node_size)
                .map(|curve| curve.distance_to(point) <= tolerance)
                .unwrap_or(false)
        })
    }
}
