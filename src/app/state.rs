use super::events::AppEvent;
use crate::document::{self, DEFAULT_FILE_NAME};
use crate::editor::FlowEditorState;
use crate::settings::EditorSettings;
use crate::theme::{Theme, install_custom_font};
use eframe::egui;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// egui 애플리케이션의 전체 상태를 보관한다.
pub struct FlowBuilderApp {
    /// UI 테마 정보.
    pub(super) theme: Theme,
    /// 플로우 에디터 상태.
    pub(super) editor: FlowEditorState,
    /// 파일 입출력용 Tokio 런타임.
    runtime: Runtime,
    /// 백그라운드 작업이 이벤트를 보내는 채널.
    events_tx: UnboundedSender<AppEvent>,
    /// UI 스레드에서 소비하는 이벤트 채널.
    events_rx: UnboundedReceiver<AppEvent>,
    /// 진행 중인 파일 작업 수.
    pending_io: usize,
    /// 마지막 오류 메시지.
    pub(super) last_error: Option<String>,
}

impl FlowBuilderApp {
    /// egui Context를 받아 초기 상태를 구성한다.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: EditorSettings, runtime: Runtime) -> Self {
        let editor = FlowEditorState::new(settings);
        let theme = Theme::new(editor.dark_mode());
        install_custom_font(&cc.egui_ctx);
        theme.apply(&cc.egui_ctx);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            theme,
            editor,
            runtime,
            events_tx,
            events_rx,
            pending_io: 0,
            last_error: None,
        }
    }

    /// 파일 작업 이벤트를 모두 소비하여 에디터 상태를 동기화한다.
    pub(super) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.pending_io = self.pending_io.saturating_sub(1);
            match event {
                AppEvent::Loaded { path, contents } => {
                    tracing::info!(path = %path.display(), "문서를 불러왔습니다.");
                    self.editor.load_document(&contents, Some(path));
                    self.last_error = None;
                }
                AppEvent::LoadFailed { path, message } => {
                    tracing::error!(path = %path.display(), %message, "문서를 읽지 못했습니다.");
                    self.last_error = Some(format!("불러오기 실패: {message}"));
                }
                AppEvent::Saved { path } => {
                    tracing::info!(path = %path.display(), "문서를 저장했습니다.");
                    self.editor.mark_saved(path);
                    self.last_error = None;
                }
                AppEvent::SaveFailed { path, message } => {
                    tracing::error!(path = %path.display(), %message, "문서를 저장하지 못했습니다.");
                    self.last_error = Some(format!("저장 실패: {message}"));
                }
            }
        }
    }

    /// 파일 작업이 진행 중인지 반환한다.
    pub(super) fn is_busy(&self) -> bool {
        self.pending_io > 0
    }

    /// 에디터 설정의 테마 플래그가 바뀌었으면 테마를 다시 적용한다.
    pub(super) fn sync_theme(&mut self, ctx: &egui::Context) {
        if self.theme.is_dark() != self.editor.dark_mode() {
            self.theme = Theme::new(self.editor.dark_mode());
            self.theme.apply(ctx);
        }
    }

    /// 파일 다이얼로그로 JSON 문서를 선택해 백그라운드에서 읽는다.
    pub(super) fn open_dialog(&mut self, ctx: &egui::Context) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.pending_io += 1;
        self.runtime.spawn(async move {
            let event = match document::read_document(&path).await {
                Ok(contents) => AppEvent::Loaded { path, contents },
                Err(err) => AppEvent::LoadFailed {
                    path,
                    message: format!("{err:#}"),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    /// 현재 그래프를 JSON으로 저장한다. 경로가 없으면 저장 다이얼로그를 띄운다.
    pub(super) fn save(&mut self, ctx: &egui::Context) {
        let contents = match self.editor.export_document() {
            Ok(contents) => contents,
            Err(err) => {
                tracing::error!(%err, "문서를 직렬화하지 못했습니다.");
                self.last_error = Some(err.to_string());
                return;
            }
        };
        let Some(path) = self.save_target() else {
            return;
        };
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        self.pending_io += 1;
        self.runtime.spawn(async move {
            let event = match document::write_document(&path, &contents).await {
                Ok(()) => AppEvent::Saved { path },
                Err(err) => AppEvent::SaveFailed {
                    path,
                    message: format!("{err:#}"),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }

    /// 저장할 경로를 결정한다.
    fn save_target(&self) -> Option<PathBuf> {
        if let Some(path) = self.editor.current_file() {
            return Some(path.clone());
        }
        rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(DEFAULT_FILE_NAME)
            .save_file()
    }
}
