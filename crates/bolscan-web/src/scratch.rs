//! 업로드 임시 파일 수명 관리.
//!
//! `ScratchFile`은 생성 시 디스크에 업로드를 기록하고, 드롭될 때 파일을 삭제한다.
//! 성공, 에러 반환, 패닉 언와인딩 어느 경로에서도 파일이 남지 않는다.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// 원본 파일 이름 최대 길이 (임시 파일 이름에 포함되는 부분)
const MAX_NAME_CHARS: usize = 100;

/// 요청 단위 임시 업로드 파일
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    removed: bool,
}

impl ScratchFile {
    /// 업로드 바이트를 임시 디렉토리에 기록
    ///
    /// 파일 이름: `<unix_millis>-<uuid 8자리>-<정리된 원본 이름>`
    pub async fn create(dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(scratch_file_name(original_name));
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "임시 업로드 저장");

        Ok(Self {
            path,
            removed: false,
        })
    }

    /// 임시 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 즉시 삭제 (비동기)
    ///
    /// 실패해도 에러를 반환하지 않고 로그만 남긴다.
    pub async fn remove(mut self) {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "임시 업로드 삭제"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "임시 업로드 삭제 실패: {e}"),
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "임시 업로드 삭제 (drop)"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "임시 업로드 삭제 실패: {e}"),
        }
    }
}

/// 충돌 방지 임시 파일 이름 생성
fn scratch_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", millis, &nonce[..8], sanitize_file_name(original_name))
}

/// 경로 구분자 제거 + 안전한 문자만 남김
fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_CHARS)
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
