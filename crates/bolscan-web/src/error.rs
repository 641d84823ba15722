//! API 에러 처리.
//!
//! 응답 본문 형식:
//! - 400: `{ "error": string }`
//! - 500: `{ "error": string, "details": string }`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// 업로드 파일이 없을 때 메시지
pub const NO_IMAGE_MESSAGE: &str = "No image file provided";

/// 이미지가 아닌 파일 메시지
pub const NOT_IMAGE_MESSAGE: &str = "Only image files are allowed";

/// 처리 실패 공통 메시지
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process image";

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 잘못된 요청 (파일 없음, 형식/크기 위반)
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 추출 처리 실패 (OCR / 모델 호출)
    #[error("처리 실패: {details}")]
    Processing {
        /// 하위 에러 메시지
        details: String,
    },
}

impl ApiError {
    /// 파일 없음
    pub fn no_image() -> Self {
        ApiError::BadRequest(NO_IMAGE_MESSAGE.to_string())
    }

    /// 업로드 크기 초과
    pub fn too_large(max_megabytes: u64) -> Self {
        ApiError::BadRequest(format!(
            "File too large. Maximum size is {max_megabytes}MB"
        ))
    }

    /// 처리 실패
    pub fn processing(details: impl ToString) -> Self {
        ApiError::Processing {
            details: details.to_string(),
        }
    }

    /// HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Processing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
    /// 하위 에러 상세 (500 응답에만)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) => ErrorResponse {
                error: msg,
                details: None,
            },
            ApiError::Processing { details } => ErrorResponse {
                error: PROCESSING_FAILED_MESSAGE.to_string(),
                details: Some(details),
            },
        };

        (status, Json(body)).into_response()
    }
}
