//! # bolscan-vision
//!
//! OCR 엔진 어댑터 크레이트.
//! 업로드된 이미지 파일에서 원문 텍스트를 추출하는 `OcrProvider` 구현을 제공한다.
//!
//! - [`tesseract_cli`]: `tesseract` 실행 파일 호출 (기본)
//! - [`local_ocr_provider`]: leptess 바인딩 (`ocr` feature)

pub mod local_ocr_provider;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod tesseract_cli;

use std::sync::Arc;

use bolscan_core::config::{OcrConfig, OcrEngine};
use bolscan_core::error::CoreError;
use bolscan_core::ports::ocr_provider::OcrProvider;

pub use local_ocr_provider::LeptessOcrProvider;
pub use tesseract_cli::TesseractCliProvider;

/// 설정에 맞는 OCR 제공자 생성
pub fn ocr_provider_from_config(config: &OcrConfig) -> Result<Arc<dyn OcrProvider>, CoreError> {
    match config.engine {
        OcrEngine::Cli => Ok(Arc::new(TesseractCliProvider::new(config))),
        OcrEngine::Leptess => {
            if !cfg!(feature = "ocr") {
                return Err(CoreError::Config(
                    "leptess OCR 엔진은 `ocr` feature로 빌드해야 합니다".into(),
                ));
            }
            Ok(Arc::new(LeptessOcrProvider::new(config)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_engine_by_default() {
        let provider = ocr_provider_from_config(&OcrConfig::default()).unwrap();
        assert_eq!(provider.provider_name(), "tesseract-cli");
    }

    #[test]
    fn leptess_engine_depends_on_feature() {
        let config = OcrConfig {
            engine: OcrEngine::Leptess,
            ..Default::default()
        };
        let result = ocr_provider_from_config(&config);
        if cfg!(feature = "ocr") {
            assert_eq!(result.unwrap().provider_name(), "leptess");
        } else {
            let err = result.err().unwrap();
            assert!(err.to_string().contains("ocr"));
        }
    }
}
