use super::*;

/// 플로우 빌더 화면 전체를 담당하는 뷰이다.
pub struct FlowBuilderUi<'a> {
    /// 테마 참조.
    theme: &'a Theme,
    /// 에디터 상태 참조.
    state: &'a mut FlowEditorState,
}

impl<'a> FlowBuilderUi<'a> {
    /// 뷰 인스턴스를 생성한다.
    pub fn new(theme: &'a Theme, state: &'a mut FlowEditorState) -> Self {
        Self { theme, state }
    }

    /// 에디터 상태에 대한 불변 참조를 반환한다.
    pub fn get_state(&self) -> &FlowEditorState {
        self.state
    }

    /// 에디터 상태에 대한 가변 참조를 반환한다.
    pub fn get_state_mut(&mut self) -> &mut FlowEditorState {
        self.state
    }

    /// 현재 테마에 대한 참조를 반환한다.
    pub fn get_theme(&self) -> &Theme {
        self.theme
    }

    /// 좌측 팔레트, 우측 속성 패널, 중앙 캔버스를 구성하고 전역 키 입력을 처리한다.
    pub fn show(&mut self, ctx: &egui::Context) {
        let palette = *self.theme.palette();
        egui::SidePanel::left("flow_palette")
            .frame(side_frame(&palette))
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                self.render_palette(ui);
            });
        if !self.state.selection().is_none() {
            egui::SidePanel::right("flow_properties")
                .frame(side_frame(&palette))
                .resizable(false)
                .exact_width(300.0)
                .show(ctx, |ui| {
                    self.render_properties(ui);
                });
        }
        let canvas_frame = egui::Frame {
            fill: palette.canvas_fill,
            ..Default::default()
        };
        egui::CentralPanel::default()
            .frame(canvas_frame)
            .show(ctx, |ui| {
                self.render_canvas(ui);
            });
        self.handle_keys(ctx);
    }

    /// 문서 전역 단축키를 에디터 명령으로 전달한다. 텍스트 입력 중에는 무시한다.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        const BINDINGS: [(egui::Key, EditorKey); 7] = [
            (egui::Key::Delete, EditorKey::Delete),
            (egui::Key::Backspace, EditorKey::Backspace),
            (egui::Key::ArrowUp, EditorKey::ArrowUp),
            (egui::Key::ArrowDown, EditorKey::ArrowDown),
            (egui::Key::ArrowLeft, EditorKey::ArrowLeft),
            (egui::Key::ArrowRight, EditorKey::ArrowRight),
            (egui::Key::Z, EditorKey::Z),
        ];
        let (pressed, modifiers) = ctx.input(|i| {
            let pressed: Vec<EditorKey> = BINDINGS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, editor_key)| *editor_key)
                .collect();
            let modifiers = KeyModifiers {
                shift: i.modifiers.shift,
                command: i.modifiers.command,
            };
            (pressed, modifiers)
        });
        for key in pressed {
            self.state.handle_key(key, modifiers);
        }
    }
}

/// 사이드 패널 공통 프레임.
fn side_frame(palette: &ThemePalette) -> egui::Frame {
    egui::Frame {
        fill: palette.bg_sidebar,
        stroke: egui::Stroke::new(1.0, palette.border_soft),
        inner_margin: egui::Margin::same(16.0),
        ..Default::default()
    }
}
