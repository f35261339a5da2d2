use crate::editor::FlowBuilderUi;
use eframe::egui::{self, RichText};
use std::time::Instant;

use super::state::FlowBuilderApp;
use super::widgets::PrimaryButton;

mod toolbar;

impl FlowBuilderApp {
    /// 상단 툴바와 에디터 화면을 배치한다.
    fn render_layout(&mut self, ctx: &egui::Context) {
        let palette = *self.theme.palette();
        let toolbar_frame = egui::Frame {
            fill: palette.bg_panel,
            stroke: egui::Stroke::new(1.0, palette.border_soft),
            inner_margin: egui::Margin::symmetric(16.0, 10.0),
            ..Default::default()
        };
        egui::TopBottomPanel::top("flow_toolbar")
            .frame(toolbar_frame)
            .resizable(false)
            .show(ctx, |ui| {
                self.render_toolbar(ui);
            });
        let mut builder_ui = FlowBuilderUi::new(&self.theme, &mut self.editor);
        builder_ui.show(ctx);
    }

    /// 검증 표시의 만료를 확인하고, 남은 시간 뒤에 다시 그리도록 예약한다.
    fn tick_validation(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.editor.tick(now);
        if let Some(remaining) = self.editor.validation_remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for FlowBuilderApp {
    /// egui 메인 루프에서 호출되어 UI를 갱신한다.
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        self.drain_events();
        self.tick_validation(ctx);
        self.sync_theme(ctx);
        self.render_layout(ctx);
    }
}
