//! OCR 텍스트 추출 모듈.
//!
//! `leptess` 기반 Tesseract OCR 래퍼.
//! `ocr` feature flag 활성화 시에만 빌드된다.
//!
//! Tesseract 호출은 블로킹이므로 spawn_blocking으로 런타임 스레드와 분리한다.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// OCR 에러 타입
#[derive(Debug, Error)]
pub enum OcrError {
    /// Tesseract 초기화 실패
    #[error("OCR 초기화 실패: {0}")]
    Init(String),

    /// 이미지 설정 실패
    #[error("OCR 이미지 설정 실패: {0}")]
    ImageSetup(String),

    /// 텍스트 추출 실패
    #[error("OCR 텍스트 추출 실패: {0}")]
    Extraction(String),

    /// 비동기 작업 실패
    #[error("OCR 비동기 작업 실패: {0}")]
    Async(String),
}

/// OCR 텍스트 추출기
pub struct OcrExtractor {
    /// Tesseract 데이터 경로 (None이면 시스템 기본값)
    tessdata_path: Option<PathBuf>,
    /// 언어 프로필 (예: "eng")
    language: String,
}

impl OcrExtractor {
    /// 새 OCR 추출기 생성
    pub fn new(tessdata_path: Option<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            tessdata_path,
            language: language.into(),
        }
    }

    /// 이미지 파일에서 텍스트 추출
    ///
    /// 엔진 출력을 그대로 반환한다 (trim 등 가공 없음).
    pub async fn extract_file_async(&self, path: &Path) -> Result<String, OcrError> {
        let tessdata = self
            .tessdata_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        let language = self.language.clone();
        let path = path.to_path_buf();

        debug!(path = %path.display(), language = %language, "leptess OCR 실행");

        tokio::task::spawn_blocking(move || run_tesseract(tessdata.as_deref(), &language, &path))
            .await
            .map_err(|e| OcrError::Async(format!("작업 조인 실패: {e}")))?
    }
}

fn run_tesseract(tessdata: Option<&str>, language: &str, path: &Path) -> Result<String, OcrError> {
    let mut lt =
        leptess::LepTess::new(tessdata, language).map_err(|e| OcrError::Init(format!("{e}")))?;

    lt.set_image(path)
        .map_err(|e| OcrError::ImageSetup(format!("{}: {e}", path.display())))?;

    lt.get_utf8_text()
        .map_err(|e| OcrError::Extraction(format!("{e}")))
}
