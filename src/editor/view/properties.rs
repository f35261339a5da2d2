use super::*;

impl<'a> FlowBuilderUi<'a> {
    /// 우측 속성 패널을 렌더링한다.
    pub(super) fn render_properties(&mut self, ui: &mut egui::Ui) {
        let palette = *self.get_theme().palette();
        match self.get_state().selection().clone() {
            Selection::Node(id) => self.render_node_properties(ui, &id, &palette),
            Selection::Connection(conn) => {
                ui.heading("🔗 연결 속성");
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(conn.to_string())
                        .monospace()
                        .color(palette.fg_text_primary),
                );
                ui.add_space(12.0);
                if ui.button("🗑 Delete Connection").clicked() {
                    self.get_state_mut().delete_selected();
                }
            }
            Selection::None => {}
        }
    }

    fn render_node_properties(&mut self, ui: &mut egui::Ui, id: &str, palette: &ThemePalette) {
        let Some(node) = self.get_state().selected_node() else {
            return;
        };
        let kind = node.kind;
        let mut title = node.title.clone();
        let mut label = node.label.clone();
        let accent = self.get_theme().node_accent(kind);

        ui.heading("⚙️ 노드 속성");
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(format!("{} {}", self.get_theme().node_icon(kind), kind))
                .color(accent)
                .strong(),
        );
        ui.label(egui::RichText::new(format!("ID · {id}")).small().color(palette.fg_text_secondary));
        ui.add_space(10.0);

        ui.label("Title");
        let title_changed = ui
            .add(egui::TextEdit::singleline(&mut title).desired_width(f32::INFINITY))
            .changed();
        ui.add_space(6.0);
        ui.label("Description");
        let label_changed = ui
            .add(
                egui::TextEdit::multiline(&mut label)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            )
            .changed();

        let state = self.get_state_mut();
        if title_changed {
            if let Err(err) = state.set_node_title(id, &title) {
                tracing::warn!(%err, "노드 제목을 수정하지 못했습니다.");
            }
        }
        if label_changed {
            if let Err(err) = state.set_node_label(id, &label) {
                tracing::warn!(%err, "노드 설명을 수정하지 못했습니다.");
            }
        }

        ui.add_space(16.0);
        let delete = egui::Button::new(
            egui::RichText::new("🗑 Delete Node").color(egui::Color32::WHITE),
        )
        .fill(self.get_theme().invalid);
        if ui.add(delete).clicked() {
            self.get_state_mut().delete_selected();
        }
    }
}
