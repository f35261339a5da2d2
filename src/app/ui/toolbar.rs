use super::*;

impl FlowBuilderApp {
    /// 상단 툴바를 그린다.
    pub(super) fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let palette = *self.theme.palette();
        let ctx = ui.ctx().clone();
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("🧩 Flow Builder")
                    .size(20.0)
                    .color(palette.fg_text_primary)
                    .strong(),
            );
            ui.add_space(16.0);
            ui.spacing_mut().item_spacing.x = 8.0;

            if ui
                .add(PrimaryButton::new(&self.theme, "Reset").icon("⟲"))
                .on_hover_text("화면 배율과 위치를 초기화합니다.")
                .clicked()
            {
                self.editor.reset_view();
            }
            if ui
                .add_enabled(
                    self.editor.can_undo(),
                    PrimaryButton::new(&self.theme, "Undo").icon("↶"),
                )
                .clicked()
            {
                self.editor.undo();
            }
            if ui
                .add_enabled(
                    self.editor.can_redo(),
                    PrimaryButton::new(&self.theme, "Redo").icon("↷"),
                )
                .clicked()
            {
                self.editor.redo();
            }

            let status = self.editor.validation_status();
            let mut validate = PrimaryButton::new(&self.theme, "Validate").icon("✔");
            if let Some(color) = self.theme.validation_color(status) {
                validate = validate.fill(color);
            }
            if ui.add(validate).clicked() {
                self.editor.validate();
            }

            let idle = !self.is_busy();
            if ui
                .add_enabled(idle, PrimaryButton::new(&self.theme, "Save").icon("💾"))
                .clicked()
            {
                self.save(&ctx);
            }
            if ui
                .add_enabled(idle, PrimaryButton::new(&self.theme, "Load").icon("📂"))
                .clicked()
            {
                self.open_dialog(&ctx);
            }

            let theme_icon = if self.editor.dark_mode() { "☀" } else { "🌙" };
            if ui
                .button(RichText::new(theme_icon).size(18.0))
                .on_hover_text("라이트/다크 모드 전환")
                .clicked()
            {
                self.editor.toggle_theme();
            }

            ui.add_space(16.0);
            let dirty = if self.editor.is_dirty() { " (수정됨)" } else { "" };
            let file = match self.editor.current_file() {
                Some(path) => format!("파일 · {}{}", path.display(), dirty),
                None => format!("새 플로우{dirty}"),
            };
            ui.label(RichText::new(file).color(palette.fg_text_secondary));
            if let Some(err) = &self.last_error {
                ui.label(RichText::new(err).color(self.theme.invalid).strong());
            }
        });
    }
}
