use super::model::Position;

/// 월드 좌표를 화면 좌표로 옮기는 확대/이동 변환이다.
///
/// `screen = world * scale + translate` 관계를 항상 유지하며,
/// 저장 대상 그래프에는 포함되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// 확대 비율.
    pub scale: f64,
    /// 화면 좌표 기준 이동량.
    pub translate: Position,
    /// 허용 최소 배율.
    min_scale: f64,
    /// 허용 최대 배율.
    max_scale: f64,
}

impl ViewTransform {
    /// 배율 범위를 지정해 단위 변환을 생성한다.
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            scale: 1.0,
            translate: Position::ZERO,
            min_scale,
            max_scale,
        }
    }

    /// 월드 좌표를 화면 좌표로 변환한다.
    pub fn world_to_screen(&self, world: Position) -> Position {
        world * self.scale + self.translate
    }

    /// 화면 좌표를 월드 좌표로 변환한다.
    pub fn screen_to_world(&self, screen: Position) -> Position {
        (screen - self.translate) * (1.0 / self.scale)
    }

    /// 배율을 1로 되돌리고 월드 원점을 `center`(화면 좌표)에 놓는다.
    pub fn reset(&mut self, center: Position) {
        self.scale = 1.0;
        self.translate = center;
    }

    /// 포인터 아래의 월드 좌표를 고정한 채 배율에 `factor`를 곱한다.
    pub fn zoom_at(&mut self, factor: f64, pointer: Position) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_world(pointer);
        self.scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        self.translate = pointer - anchor * self.scale;
    }

    /// 화면 좌표 기준으로 뷰를 이동한다.
    pub fn pan(&mut self, delta: Position) {
        self.translate = self.translate + delta;
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(0.3, 2.0)
    }
}
