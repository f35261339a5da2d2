use crate::editor::model::NodeKind;
use crate::editor::validation::ValidationStatus;
use eframe::egui::{self, Color32};

include!(concat!(env!("OUT_DIR"), "/custom_font.rs"));

/// 라이트/다크 모드별로 달라지는 색상 묶음이다.
#[derive(Debug, Clone, Copy)]
pub struct ThemePalette {
    /// 툴바와 패널 배경.
    pub bg_panel: Color32,
    /// 사이드바 배경.
    pub bg_sidebar: Color32,
    /// 캔버스 배경.
    pub canvas_fill: Color32,
    /// 캔버스 격자 점.
    pub grid_dot: Color32,
    /// 노드 본문 배경.
    pub node_fill: Color32,
    /// 노드 헤더 배경.
    pub node_header: Color32,
    /// 노드 테두리.
    pub node_border: Color32,
    /// 본문 텍스트.
    pub fg_text_primary: Color32,
    /// 보조 텍스트.
    pub fg_text_secondary: Color32,
    /// 옅은 경계선.
    pub border_soft: Color32,
    /// 연결선 기본 색.
    pub connection_stroke: Color32,
}

impl ThemePalette {
    fn light() -> Self {
        Self {
            bg_panel: Color32::from_rgb(255, 255, 255),
            bg_sidebar: Color32::from_rgb(252, 252, 252),
            canvas_fill: Color32::from_rgb(248, 250, 252),
            grid_dot: Color32::from_rgb(148, 163, 184),
            node_fill: Color32::from_rgb(255, 255, 255),
            node_header: Color32::from_rgb(248, 250, 252),
            node_border: Color32::from_rgb(203, 213, 225),
            fg_text_primary: Color32::from_rgb(15, 23, 42),
            fg_text_secondary: Color32::from_rgb(71, 85, 105),
            border_soft: Color32::from_rgb(226, 232, 240),
            connection_stroke: Color32::from_rgb(100, 116, 139),
        }
    }

    fn dark() -> Self {
        Self {
            bg_panel: Color32::from_rgb(0, 0, 0),
            bg_sidebar: Color32::from_rgb(10, 10, 10),
            canvas_fill: Color32::from_rgb(0, 0, 0),
            grid_dot: Color32::from_rgb(55, 65, 81),
            node_fill: Color32::from_rgb(17, 24, 39),
            node_header: Color32::from_rgb(10, 10, 10),
            node_border: Color32::from_rgb(55, 65, 81),
            fg_text_primary: Color32::from_rgb(243, 244, 246),
            fg_text_secondary: Color32::from_rgb(156, 163, 175),
            border_soft: Color32::from_rgb(31, 41, 55),
            connection_stroke: Color32::from_rgb(75, 85, 99),
        }
    }
}

/// UI 전체에서 참조할 공통 테마 정보.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// 다크 모드 여부.
    dark: bool,
    /// 현재 모드의 색상.
    palette: ThemePalette,
    /// 선택/강조 색상.
    pub accent: Color32,
    /// 검증 통과 색상.
    pub valid: Color32,
    /// 검증 실패 색상.
    pub invalid: Color32,
}

impl Theme {
    /// 모드에 맞는 테마를 생성한다.
    pub fn new(dark: bool) -> Self {
        Self {
            dark,
            palette: if dark {
                ThemePalette::dark()
            } else {
                ThemePalette::light()
            },
            accent: Color32::from_rgb(99, 102, 241),
            valid: Color32::from_rgb(5, 150, 105),
            invalid: Color32::from_rgb(220, 38, 38),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// 노드 유형별 강조 색상을 반환한다.
    pub fn node_accent(&self, kind: NodeKind) -> Color32 {
        match kind {
            NodeKind::Start => Color32::from_rgb(16, 185, 129),
            NodeKind::Task => Color32::from_rgb(59, 130, 246),
            NodeKind::Decision => Color32::from_rgb(245, 158, 11),
            NodeKind::End => Color32::from_rgb(244, 63, 94),
        }
    }

    /// 노드 유형별 아이콘 문자를 반환한다.
    pub fn node_icon(&self, kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Start => "▶",
            NodeKind::Task => "■",
            NodeKind::Decision => "◆",
            NodeKind::End => "✖",
        }
    }

    /// 검증 상태에 대응하는 버튼 색상을 반환한다.
    pub fn validation_color(&self, status: ValidationStatus) -> Option<Color32> {
        match status {
            ValidationStatus::Unknown => None,
            ValidationStatus::Valid => Some(self.valid),
            ValidationStatus::Invalid => Some(self.invalid),
        }
    }

    /// egui Context에 테마 기반 스타일을 적용한다.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.window_rounding = egui::Rounding::same(8.0);
        visuals.panel_fill = self.palette.bg_panel;
        visuals.selection.bg_fill = self.accent;
        ctx.set_visuals(visuals);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(false)
    }
}

/// 두 색을 `t` 비율로 섞는다.
pub fn blend_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r()),
        mix(a.g(), b.g()),
        mix(a.b(), b.b()),
        mix(a.a(), b.a()),
    )
}

/// build.rs에서 찾은 폰트를 egui에 등록한다.
pub fn install_custom_font(ctx: &egui::Context) {
    if let Some(bytes) = embedded_font_bytes() {
        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("custom".into(), egui::FontData::from_static(bytes));
        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push("custom".into());
        }
        ctx.set_fonts(fonts);
    }
}
