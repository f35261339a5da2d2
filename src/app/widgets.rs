use crate::theme::{Theme, blend_color};
use eframe::egui::{self, Widget};

/// 버튼 높이 하한.
const BUTTON_HEIGHT: f32 = 30.0;

/// 단색 배경과 일정한 간격을 제공하는 기본 버튼 위젯.
pub(super) struct PrimaryButton<'a> {
    theme: &'a Theme,
    label: &'a str,
    icon: &'a str,
    fill: Option<egui::Color32>,
}

impl<'a> PrimaryButton<'a> {
    pub(super) fn new(theme: &'a Theme, label: &'a str) -> Self {
        Self {
            theme,
            label,
            icon: "",
            fill: None,
        }
    }

    pub(super) fn icon(mut self, icon: &'a str) -> Self {
        self.icon = icon;
        self
    }

    /// 배경색을 강조색 대신 지정한 색으로 바꾼다.
    pub(super) fn fill(mut self, fill: egui::Color32) -> Self {
        self.fill = Some(fill);
        self
    }
}

impl<'a> Widget for PrimaryButton<'a> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let palette = self.theme.palette();
        let enabled = ui.is_enabled();

        let text = if self.icon.is_empty() {
            self.label.to_string()
        } else {
            format!("{}  {}", self.icon, self.label)
        };
        let font_size = 14.0;
        let rich = egui::RichText::new(text)
            .size(font_size)
            .strong()
            .color(if enabled {
                egui::Color32::WHITE
            } else {
                blend_color(palette.fg_text_secondary, palette.bg_panel, 0.4)
            });

        let text_height = ui.ctx().fonts(|f| {
            f.row_height(&egui::FontId::new(font_size, egui::FontFamily::Proportional))
        });
        let base = self.fill.unwrap_or(self.theme.accent);
        let fill = if enabled {
            base
        } else {
            blend_color(base, palette.border_soft, 0.5)
        };
        let button = egui::Button::new(rich)
            .min_size(egui::vec2(72.0, BUTTON_HEIGHT.max(text_height + 6.0)))
            .rounding(egui::Rounding::same(6.0))
            .fill(fill);

        let response = ui.add(button);
        if enabled && response.hovered() {
            ui.output_mut(|o| {
                o.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        response
    }
}
