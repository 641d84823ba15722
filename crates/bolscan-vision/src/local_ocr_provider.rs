//! 로컬 OCR 제공자: leptess(Tesseract) 래퍼.
//!
//! `OcrExtractor`를 `OcrProvider` 트레이트로 래핑한다.
//! `ocr` feature가 꺼져 있으면 호출 시 에러를 반환한다.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use bolscan_core::config::OcrConfig;
use bolscan_core::error::CoreError;
use bolscan_core::ports::ocr_provider::OcrProvider;

/// leptess 기반 OCR 제공자
pub struct LeptessOcrProvider {
    tessdata_path: Option<PathBuf>,
    language: String,
}

impl LeptessOcrProvider {
    /// 설정으로부터 생성
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            tessdata_path: config.tessdata_path.clone(),
            language: config.language.clone(),
        }
    }
}

#[async_trait]
impl OcrProvider for LeptessOcrProvider {
    async fn recognize(&self, image_path: &Path) -> Result<String, CoreError> {
        #[cfg(feature = "ocr")]
        {
            use crate::ocr::OcrExtractor;

            let extractor = OcrExtractor::new(self.tessdata_path.clone(), self.language.clone());
            extractor
                .extract_file_async(image_path)
                .await
                .map_err(|e| CoreError::OcrError(e.to_string()))
        }

        #[cfg(not(feature = "ocr"))]
        {
            let _ = (image_path, &self.tessdata_path, &self.language);
            Err(CoreError::OcrError(
                "leptess OCR 비활성: `ocr` feature로 빌드하세요".to_string(),
            ))
        }
    }

    fn provider_name(&self) -> &str {
        "leptess"
    }
}
