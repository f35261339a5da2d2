use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::position::Position;

/// 플로우차트에서 지원하는 노드 유형을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// 흐름의 시작점이다.
    Start,
    /// 일반 작업 단계이다.
    Task,
    /// 분기 판단 단계이다.
    Decision,
    /// 흐름의 종료점이다.
    End,
}

impl NodeKind {
    /// 팔레트에 노출되는 순서대로 정렬된 전체 유형 목록.
    pub const PALETTE: [NodeKind; 4] = [
        NodeKind::Start,
        NodeKind::Task,
        NodeKind::Decision,
        NodeKind::End,
    ];

    /// 직렬화 및 화면 표시에 쓰는 유형 이름을 반환한다.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Task => "Task",
            NodeKind::Decision => "Decision",
            NodeKind::End => "End",
        }
    }

    /// 새 노드에 부여할 기본 제목을 반환한다.
    pub fn default_title(self) -> String {
        format!("New {}", self.as_str())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 캔버스에 배치되는 플로우 노드이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// 노드 고유 ID.
    pub id: String,
    /// 노드 유형.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// 노드 제목.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// 노드 설명.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label: String,
    /// 노드 좌상단의 월드 좌표.
    pub position: Position,
}

/// `null` 문자열 필드를 빈 문자열로 읽는다.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 새 노드 설명란에 들어가는 자리표시 문자열.
pub const PLACEHOLDER_LABEL: &str = "Description...";

impl FlowNode {
    /// 유형별 기본 제목과 자리표시 설명을 가진 노드를 생성한다.
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            title: kind.default_title(),
            label: PLACEHOLDER_LABEL.to_string(),
            position,
        }
    }

    /// 노드 본문이 월드 좌표 `point`를 포함하는지 확인한다.
    pub fn contains(&self, point: Position, size: Position) -> bool {
        point.x >= self.position.x
            && point.x <= self.position.x + size.x
            && point.y >= self.position.y
            && point.y <= self.position.y + size.y
    }

    /// 출력 핸들(우측 중앙)의 월드 좌표를 반환한다.
    pub fn output_anchor(&self, size: Position) -> Position {
        Position::new(self.position.x + size.x, self.position.y + size.y / 2.0)
    }

    /// 입력 지점(좌측 중앙)의 월드 좌표를 반환한다.
    pub fn input_anchor(&self, size: Position) -> Position {
        Position::new(self.position.x, self.position.y + size.y / 2.0)
    }
}
