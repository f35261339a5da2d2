use eframe::egui;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// 월드(그래프) 좌표계의 2차원 점이다. 화면 픽셀 좌표와 구분해서 사용한다.
///
/// 문서 좌표를 손실 없이 보존하도록 `f64`로 저장하고, egui 경계에서만 `f32`로 바꾼다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// 가로 좌표.
    pub x: f64,
    /// 세로 좌표.
    pub y: f64,
}

impl Position {
    /// 원점.
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    /// 새 좌표를 생성한다.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// 두 점 사이의 유클리드 거리를 반환한다.
    pub fn distance(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// 선분 `a`-`b`와의 최단 거리를 반환한다.
    pub fn distance_to_segment(self, a: Position, b: Position) -> f64 {
        let ab = b - a;
        let len_sq = ab.x * ab.x + ab.y * ab.y;
        if len_sq <= f64::EPSILON {
            return self.distance(a);
        }
        let ap = self - a;
        let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
        self.distance(a + ab * t)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Position {
    type Output = Position;

    fn mul(self, rhs: f64) -> Position {
        Position::new(self.x * rhs, self.y * rhs)
    }
}

impl From<egui::Pos2> for Position {
    fn from(pos: egui::Pos2) -> Self {
        Position::new(f64::from(pos.x), f64::from(pos.y))
    }
}

impl From<egui::Vec2> for Position {
    fn from(vec: egui::Vec2) -> Self {
        Position::new(f64::from(vec.x), f64::from(vec.y))
    }
}

impl From<Position> for egui::Pos2 {
    fn from(pos: Position) -> Self {
        egui::pos2(pos.x as f32, pos.y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 선분 양 끝 바깥의 점은 가까운 끝점까지의 거리를 갖는다.
    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(10.0, 0.0);
        assert!((Position::new(5.0, 3.0).distance_to_segment(a, b) - 3.0).abs() < 1e-5);
        assert!((Position::new(-4.0, 3.0).distance_to_segment(a, b) - 5.0).abs() < 1e-5);
        assert!((Position::new(1.0, 1.0).distance_to_segment(a, a) - 2f64.sqrt()).abs() < 1e-5);
    }
}
