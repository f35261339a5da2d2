use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Position;

/// 노드 간의 방향성 연결이다. (from, to) 순서쌍이 고유 키가 된다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    /// 출발 노드 ID.
    pub from: String,
    /// 도착 노드 ID.
    pub to: String,
}

impl Connection {
    /// 새 연결을 생성한다.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// 지정한 노드를 양 끝 중 하나로 참조하는지 확인한다.
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 연결선을 구성하는 3차 베지어 곡선의 네 제어점이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionCurve {
    /// 시작점, 제어점 1, 제어점 2, 끝점.
    pub points: [Position; 4],
}

impl ConnectionCurve {
    /// 수평 방향으로 휘어지는 연결 곡선을 만든다.
    pub fn between(start: Position, end: Position) -> Self {
        let half = (end.x - start.x).abs() / 2.0;
        Self {
            points: [
                start,
                Position::new(start.x + half, start.y),
                Position::new(end.x - half, end.y),
                end,
            ],
        }
    }

    /// 매개변수 `t`(0..=1) 위치의 점을 계산한다.
    pub fn point_at(&self, t: f64) -> Position {
        let [p0, p1, p2, p3] = self.points;
        let u = 1.0 - t;
        p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
    }

    /// 곡선을 `segments`개의 선분으로 근사한 점 목록을 반환한다.
    pub fn sample(&self, segments: usize) -> Vec<Position> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }

    /// 곡선과 `point` 사이의 근사 최단 거리를 반환한다.
    pub fn distance_to(&self, point: Position) -> f64 {
        self.sample(32)
            .windows(2)
            .map(|pair| point.distance_to_segment(pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min)
    }
}
