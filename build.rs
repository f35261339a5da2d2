use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 폰트 파일 탐색 시 사용하는 파일명 키워드이다.
const FONT_KEYWORDS: [&str; 5] = ["noto", "nanum", "malgun", "applegothic", "pretendard"];

/// 빌드 단계에서 에디터가 사용할 한글 폰트 스텁을 생성한다.
fn main() {
    if let Err(err) = write_font_stub() {
        println!("cargo:warning=폰트 스텁 생성 실패: {err}");
    }
}

/// `embedded_font_bytes()`를 정의하는 코드를 OUT_DIR에 기록한다.
fn write_font_stub() -> std::io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| std::io::Error::other("OUT_DIR이 설정되지 않았습니다."))?;
    let body = match find_font() {
        Some(path) => {
            let escaped = path.to_string_lossy().replace('\\', "\\\\");
            format!(
                "pub fn embedded_font_bytes() -> Option<&'static [u8]> {{\n    Some(include_bytes!(\"{escaped}\"))\n}}\n"
            )
        }
        None => "pub fn embedded_font_bytes() -> Option<&'static [u8]> { None }\n".to_string(),
    };
    fs::write(out_dir.join("custom_font.rs"), body)
}

/// 시스템 폰트 디렉터리를 순회하며 첫 번째 후보 폰트를 반환한다.
fn find_font() -> Option<PathBuf> {
    let mut roots: Vec<PathBuf> = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("/Library/Fonts"),
    ];
    if let Some(home) = env::var_os("HOME") {
        roots.push(Path::new(&home).join(".fonts"));
    }
    if let Some(windir) = env::var_os("WINDIR") {
        roots.push(Path::new(&windir).join("Fonts"));
    }
    let found = roots
        .into_iter()
        .filter(|dir| dir.exists())
        .flat_map(|dir| WalkDir::new(dir).into_iter().filter_map(Result::ok))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| is_font_candidate(path));
    match &found {
        Some(path) => println!("cargo:rerun-if-changed={}", path.display()),
        None => println!("cargo:warning=한글 폰트를 찾지 못해 egui 기본 폰트를 사용합니다."),
    }
    found
}

/// 파일명과 확장자로 폰트 후보 여부를 판정한다.
fn is_font_candidate(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
        .unwrap_or(false);
    ext_ok && FONT_KEYWORDS.iter().any(|k| name.contains(k))
}
