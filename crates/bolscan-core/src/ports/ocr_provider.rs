//! OCR 제공자 포트.
//!
//! 이미지 파일 경로를 받아 인식된 원문 텍스트를 반환한다.
//! 신뢰도 임계값 필터링은 하지 않는다.

use async_trait::async_trait;
use std::path::Path;

use crate::error::CoreError;

/// OCR 제공자: 내장(leptess) 또는 Tesseract CLI
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// 이미지에서 원문 텍스트 추출
    ///
    /// 반환값은 엔진 출력 그대로이며 잡음이 섞여 있어도 가공하지 않는다.
    async fn recognize(&self, image_path: &Path) -> Result<String, CoreError>;

    /// 제공자 이름 (예: "tesseract-cli", "leptess")
    fn provider_name(&self) -> &str;
}
