use super::*;

impl<'a> FlowBuilderUi<'a> {
    /// 노드 팔레트를 렌더링한다. 끌어서 캔버스에 놓거나 클릭해 중앙에 추가한다.
    pub(super) fn render_palette(&mut self, ui: &mut egui::Ui) {
        let palette = *self.get_theme().palette();
        ui.label(
            egui::RichText::new("구성 요소")
                .size(13.0)
                .strong()
                .color(palette.fg_text_secondary),
        );
        ui.add_space(12.0);
        ui.spacing_mut().item_spacing.y = 10.0;
        for kind in NodeKind::PALETTE {
            let size = egui::vec2(ui.available_width(), 44.0);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
            let accent = self.get_theme().node_accent(kind);
            let border = if response.hovered() {
                accent
            } else {
                palette.node_border
            };
            let painter = ui.painter();
            painter.rect_filled(rect, 12.0, palette.node_fill);
            painter.rect_stroke(rect, 12.0, Stroke::new(1.5, border));
            painter.text(
                rect.left_center() + egui::vec2(16.0, 0.0),
                egui::Align2::LEFT_CENTER,
                self.get_theme().node_icon(kind),
                egui::FontId::proportional(16.0),
                accent,
            );
            painter.text(
                rect.left_center() + egui::vec2(44.0, 0.0),
                egui::Align2::LEFT_CENTER,
                kind.as_str(),
                egui::FontId::proportional(15.0),
                palette.fg_text_primary,
            );
            if response.hovered() {
                ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::Grab);
            }
            if response.drag_started() {
                self.get_state_mut().begin_placement(kind);
            } else if response.clicked() {
                self.get_state_mut().add_node_at_center(kind);
            }
        }
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("캔버스로 끌어 놓거나 클릭해 추가하세요.")
                .size(12.0)
                .color(palette.fg_text_secondary),
        );
    }
}
