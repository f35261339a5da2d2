use std::path::PathBuf;

/// 백그라운드 파일 작업에서 UI로 전달되는 이벤트 모델이다.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// 문서 읽기 완료.
    Loaded { path: PathBuf, contents: String },
    /// 문서 읽기 실패.
    LoadFailed { path: PathBuf, message: String },
    /// 문서 저장 완료.
    Saved { path: PathBuf },
    /// 문서 저장 실패.
    SaveFailed { path: PathBuf, message: String },
}
