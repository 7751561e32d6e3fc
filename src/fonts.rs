//! 그래프/라벨의 한글 표시를 위한 폰트 탐색.
//!
//! 사용자 지정 경로 → 프로젝트 폰트 → 시스템 폰트 순으로 찾고, 하나도 없으면
//! `None`을 돌려준다. 호출 측은 기본 폰트를 유지한 채 계속 실행한다.

use std::fs;
use std::path::{Path, PathBuf};

/// 프로젝트 폴더 기준 후보(작업 디렉터리에서 상대 경로).
const BUNDLED_CANDIDATES: &[&str] = &[
    "fonts/NanumGothic.ttf",
    "fonts/NanumGothic-Regular.ttf",
    "assets/fonts/NanumGothic.ttf",
    "assets/fonts/malgun.ttf",
    "NanumGothic.ttf",
    "NanumGothic-Regular.ttf",
];

/// 운영체제별 대표 한글 폰트 경로.
const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/truetype/nanum/NanumGothic-Regular.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
];

const WINDOWS_FONT_FILES: &[&str] = &["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"];

/// 시스템 폰트 디렉터리를 훑을 때 받아들이는 파일 이름 조각.
const SCAN_MARKERS: &[&str] = &["NanumGothic", "NotoSansCJK", "NotoSansKR"];

/// 찾은 폰트.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl ResolvedFont {
    /// egui에 등록할 때 쓰는 이름(파일 이름).
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "korean_font".into())
    }
}

/// 검사할 후보 경로 목록을 우선순위대로 만든다.
pub fn candidate_paths(custom: Option<&Path>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = custom.map(Path::to_path_buf).into_iter().collect();
    out.extend(BUNDLED_CANDIDATES.iter().map(PathBuf::from));
    out.extend(SYSTEM_CANDIDATES.iter().map(PathBuf::from));
    if let Some(windir) = std::env::var_os("WINDIR") {
        let dir = Path::new(&windir).join("Fonts");
        out.extend(WINDOWS_FONT_FILES.iter().map(|f| dir.join(f)));
    }
    out
}

/// egui가 읽을 수 있는 TTF/OTF(컬렉션은 첫 글꼴) 바이트인지 확인한다.
pub fn is_parsable_font(bytes: &[u8]) -> bool {
    ab_glyph::FontRef::try_from_slice(bytes).is_ok()
}

fn read_font(path: &Path) -> Option<ResolvedFont> {
    if !path.is_file() {
        return None;
    }
    match fs::read(path) {
        Ok(bytes) if bytes.is_empty() => {
            tracing::warn!(path = %path.display(), "font file is empty");
            None
        }
        Ok(bytes) if !is_parsable_font(&bytes) => {
            tracing::warn!(path = %path.display(), "not a TTF/OTF font, skipping");
            None
        }
        Ok(bytes) => Some(ResolvedFont {
            path: path.to_path_buf(),
            bytes,
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read font file");
            None
        }
    }
}

/// 디렉터리를 재귀적으로 훑어 이름에 표식이 들어간 첫 유효 폰트를 찾는다.
fn scan_dir(dir: &Path, depth: usize) -> Option<ResolvedFont> {
    if depth == 0 {
        return None;
    }
    let mut entries: Vec<PathBuf> = fs::read_dir(dir).ok()?.flatten().map(|e| e.path()).collect();
    entries.sort();
    for path in &entries {
        if path.is_file() {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            let is_font = ["ttf", "ttc", "otf"]
                .iter()
                .any(|ext| path.extension().is_some_and(|e| e.eq_ignore_ascii_case(ext)));
            if is_font && SCAN_MARKERS.iter().any(|m| name.contains(m)) {
                if let Some(font) = read_font(path) {
                    return Some(font);
                }
            }
        }
    }
    entries
        .iter()
        .filter(|p| p.is_dir())
        .find_map(|p| scan_dir(p, depth - 1))
}

/// `candidates`를 순서대로 검사하고, 없으면 `scan_roots`를 훑는다.
pub fn resolve_from(candidates: &[PathBuf], scan_roots: &[PathBuf]) -> Option<ResolvedFont> {
    candidates
        .iter()
        .find_map(|p| read_font(p))
        .or_else(|| scan_roots.iter().find_map(|root| scan_dir(root, 4)))
}

/// 한글을 표시할 수 있는 폰트를 찾는다. 실패해도 오류가 아니다.
pub fn resolve_korean_font(custom: Option<&Path>) -> Option<ResolvedFont> {
    let found = resolve_from(
        &candidate_paths(custom),
        &[PathBuf::from("/usr/share/fonts"), PathBuf::from("/usr/local/share/fonts")],
    );
    match &found {
        Some(font) => tracing::info!(path = %font.path.display(), "using Korean font"),
        None => tracing::warn!("no Korean font found, falling back to default fonts"),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blood_flow_fonts_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// egui 기본 글꼴을 테스트용 실제 폰트 바이트로 쓴다.
    fn real_font_bytes() -> Vec<u8> {
        eframe::egui::FontDefinitions::default().font_data["Hack"].font.to_vec()
    }

    #[test]
    fn custom_path_comes_first() {
        let list = candidate_paths(Some(Path::new("/tmp/custom.ttf")));
        assert_eq!(list[0], PathBuf::from("/tmp/custom.ttf"));
        assert!(list.len() > BUNDLED_CANDIDATES.len());
    }

    #[test]
    fn first_existing_candidate_wins() {
        let dir = temp_dir("candidates");
        let a = dir.join("missing.ttf");
        let b = dir.join("b.ttf");
        let c = dir.join("c.ttf");
        let bytes = real_font_bytes();
        fs::write(&b, &bytes).unwrap();
        fs::write(&c, &bytes).unwrap();
        let font = resolve_from(&[a, b.clone(), c], &[]).unwrap();
        assert_eq!(font.path, b);
        assert_eq!(font.bytes, bytes);
        assert_eq!(font.name(), "b");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_file_is_skipped() {
        let dir = temp_dir("empty");
        let empty = dir.join("empty.ttf");
        fs::write(&empty, b"").unwrap();
        assert!(resolve_from(&[empty], &[]).is_none());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unparsable_font_falls_through_to_next_candidate() {
        let dir = temp_dir("unparsable");
        let pointer = dir.join("NanumGothic.ttf");
        fs::write(&pointer, b"version https://git-lfs.github.com/spec/v1\n").unwrap();
        let truncated = dir.join("truncated.ttf");
        fs::write(&truncated, &real_font_bytes()[..64]).unwrap();
        assert!(resolve_from(&[pointer.clone(), truncated.clone()], &[]).is_none());

        let good = dir.join("good.ttf");
        fs::write(&good, real_font_bytes()).unwrap();
        let font = resolve_from(&[pointer, truncated, good.clone()], &[]).unwrap();
        assert_eq!(font.path, good);
        assert!(is_parsable_font(&font.bytes));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scan_skips_unparsable_marker_files() {
        let dir = temp_dir("scan_bogus");
        fs::write(dir.join("NanumGothic.ttf"), b"not a font").unwrap();
        assert!(resolve_from(&[], &[dir.clone()]).is_none());
        fs::write(dir.join("NanumGothicBold.ttf"), real_font_bytes()).unwrap();
        let font = resolve_from(&[], &[dir.clone()]).unwrap();
        assert!(font.path.ends_with("NanumGothicBold.ttf"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn scan_finds_nested_cjk_font() {
        let dir = temp_dir("scan");
        let nested = dir.join("opentype").join("noto");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("readme.txt"), b"x").unwrap();
        fs::write(nested.join("NotoSansCJK-Bold.ttc"), real_font_bytes()).unwrap();
        let font = resolve_from(&[], &[dir.clone()]).unwrap();
        assert!(font.path.ends_with("NotoSansCJK-Bold.ttc"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn nothing_found_is_none() {
        let dir = temp_dir("nothing");
        assert!(resolve_from(&[dir.join("nope.ttf")], &[dir.clone()]).is_none());
        fs::remove_dir_all(&dir).unwrap();
    }
}
