//! 비전 LLM 제공자 포트.
//!
//! 지시문 + 인라인 이미지를 한 번에 보내고 텍스트 응답을 받는다.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::ModelCompletion;

/// 비전 LLM 요청
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    /// 추출 지시문 (OCR 원문 포함)
    pub prompt: String,
    /// Base64 인코딩된 원본 이미지
    pub image_base64: String,
    /// 이미지 MIME 타입 (예: "image/png")
    pub media_type: String,
}

/// 비전 LLM 제공자
///
/// 구현체: `RemoteVisionLlm` (Anthropic / OpenAI 호환)
#[async_trait]
pub trait VisionLlmProvider: Send + Sync {
    /// 단일 호출로 텍스트 응답 생성 (재시도 없음)
    async fn complete(&self, request: &VisionRequest) -> Result<ModelCompletion, CoreError>;

    /// 제공자 이름 (보통 모델 이름)
    fn provider_name(&self) -> &str;
}
