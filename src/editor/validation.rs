use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::model::{FlowGraph, NodeKind};

/// 검증 표시 상태이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationStatus {
    /// 검증 결과가 없거나 만료되었다.
    #[default]
    Unknown,
    /// 마지막 검증이 통과했다.
    Valid,
    /// 마지막 검증이 실패했다.
    Invalid,
}

/// 그래프가 올바른 플로우차트인지 판정한다.
///
/// 노드가 하나 이상 있고, 모든 노드가 어떤 연결의 끝점으로 참조되며,
/// Start와 End 노드가 각각 하나 이상 있어야 통과한다.
pub fn is_well_formed(graph: &FlowGraph) -> bool {
    if graph.nodes.is_empty() {
        return false;
    }
    let referenced: HashSet<&str> = graph
        .connections
        .iter()
        .flat_map(|conn| [conn.from.as_str(), conn.to.as_str()])
        .collect();
    let all_referenced = graph
        .nodes
        .iter()
        .all(|node| referenced.contains(node.id.as_str()));
    let has_start = graph.nodes.iter().any(|node| node.kind == NodeKind::Start);
    let has_end = graph.nodes.iter().any(|node| node.kind == NodeKind::End);
    all_referenced && has_start && has_end
}

/// 검증 결과를 일정 시간만 노출하는 표시기이다.
///
/// 만료 시각은 하나만 보관하므로 재검증하면 이전 만료 예약을 대체한다.
#[derive(Debug, Clone)]
pub struct ValidationIndicator {
    status: ValidationStatus,
    expires_at: Option<Instant>,
    hold: Duration,
}

impl ValidationIndicator {
    /// 결과를 `hold` 동안 유지하는 표시기를 생성한다.
    pub fn new(hold: Duration) -> Self {
        Self {
            status: ValidationStatus::Unknown,
            expires_at: None,
            hold,
        }
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// 검증 결과를 표시하고 만료 시각을 `now + hold`로 다시 예약한다.
    pub fn show(&mut self, valid: bool, now: Instant) {
        self.status = if valid {
            ValidationStatus::Valid
        } else {
            ValidationStatus::Invalid
        };
        self.expires_at = Some(now + self.hold);
    }

    /// 만료 시각이 지났으면 Unknown으로 되돌린다. 상태 변경 여부를 반환한다.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.status = ValidationStatus::Unknown;
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    /// 만료까지 남은 시간. 예약이 없으면 `None`이다.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// 표시를 즉시 지운다.
    pub fn clear(&mut self) {
        self.status = ValidationStatus::Unknown;
        self.expires_at = None;
    }
}
