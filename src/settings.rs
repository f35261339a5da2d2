use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::editor::model::Position;

/// 작업 디렉터리에서 찾는 설정 파일 이름.
pub const SETTINGS_FILE: &str = "flow_builder.yaml";

/// 에디터 동작을 조정하는 설정값이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// 되돌리기 스냅샷 최대 개수.
    pub history_capacity: usize,
    /// 최소 확대 배율.
    pub min_scale: f64,
    /// 최대 확대 배율.
    pub max_scale: f64,
    /// 휠 한 칸 확대 배율.
    pub zoom_in_factor: f64,
    /// 휠 한 칸 축소 배율.
    pub zoom_out_factor: f64,
    /// 방향키 이동 거리(월드 단위).
    pub nudge_step: f64,
    /// Shift와 함께 누른 방향키 이동 거리.
    pub nudge_step_large: f64,
    /// 검증 결과 표시 유지 시간(ms).
    pub validation_hold_ms: u64,
    /// 노드 너비.
    pub node_width: f64,
    /// 노드 높이.
    pub node_height: f64,
    /// 출력 핸들 반지름.
    pub handle_radius: f64,
    /// 연결선 클릭 허용 거리.
    pub connection_hit_tolerance: f64,
    /// 시작 시 다크 모드 여부.
    pub dark_mode: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            min_scale: 0.3,
            max_scale: 2.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            nudge_step: 10.0,
            nudge_step_large: 50.0,
            validation_hold_ms: 3000,
            node_width: 220.0,
            node_height: 100.0,
            handle_radius: 9.0,
            connection_hit_tolerance: 10.0,
            dark_mode: false,
        }
    }
}

impl EditorSettings {
    /// 노드 크기를 월드 단위 벡터로 반환한다.
    pub fn node_size(&self) -> Position {
        Position::new(self.node_width, self.node_height)
    }

    /// 검증 결과 유지 시간.
    pub fn validation_hold(&self) -> Duration {
        Duration::from_millis(self.validation_hold_ms)
    }

    /// 의미 없는 값을 기본값으로 바로잡은 설정을 반환한다.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        self.history_capacity = self.history_capacity.max(1);
        if not_positive(self.min_scale) || not_positive(self.max_scale) {
            self.min_scale = defaults.min_scale;
            self.max_scale = defaults.max_scale;
        }
        if self.min_scale > self.max_scale {
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if self.zoom_in_factor.is_nan() || self.zoom_in_factor <= 1.0 {
            self.zoom_in_factor = defaults.zoom_in_factor;
        }
        if not_positive(self.zoom_out_factor) || self.zoom_out_factor >= 1.0 {
            self.zoom_out_factor = defaults.zoom_out_factor;
        }
        if not_positive(self.node_width) || not_positive(self.node_height) {
            self.node_width = defaults.node_width;
            self.node_height = defaults.node_height;
        }
        self
    }

    /// 파일이 있으면 읽고, 없거나 잘못되었으면 기본값을 사용한다.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match load_settings_from_file(path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "에디터 설정을 불러왔습니다.");
                settings
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "설정 파일이 잘못되어 기본값을 사용합니다.");
                Self::default()
            }
        }
    }
}

/// 0 이하이거나 NaN인 값인지 확인한다.
fn not_positive(value: f64) -> bool {
    value.is_nan() || value <= 0.0
}

/// YAML 파일을 읽어 설정으로 역직렬화한다.
pub fn load_settings_from_file(path: &Path) -> anyhow::Result<EditorSettings> {
    let mut file = File::open(path)?;
    load_settings_from_reader(&mut file)
}

/// Reader에서 YAML을 읽어 설정으로 파싱한다.
pub fn load_settings_from_reader<R: Read>(reader: &mut R) -> anyhow::Result<EditorSettings> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    let settings: EditorSettings = serde_yaml::from_str(&buf)?;
    Ok(settings.validated())
}
