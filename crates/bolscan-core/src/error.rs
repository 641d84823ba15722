//! BOLSCAN 핵심 에러 타입.
//!
//! 어댑터 crate(vision, network, web)는 이 에러를 그대로 반환하거나
//! 자체 에러 타입에서 래핑한다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 외부 API가 비정상 상태 코드로 응답
    #[error("외부 API 오류 ({status}): {body}")]
    Upstream {
        /// HTTP 상태 코드
        status: u16,
        /// 응답 본문 (앞부분만)
        body: String,
    },

    /// OCR 처리 실패
    #[error("OCR 에러: {0}")]
    OcrError(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}
