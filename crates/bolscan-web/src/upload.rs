//! 업로드 수락 계층.
//!
//! multipart 본문에서 이미지 필드를 찾아 크기/형식을 검증한다.
//! 여기서 거부된 요청은 디스크에 아무것도 쓰지 않고 외부 호출도 하지 않는다.

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::{debug, warn};

use bolscan_core::config::UploadConfig;
use bolscan_core::models::UploadedImage;

use crate::error::{ApiError, NOT_IMAGE_MESSAGE};

/// 이미지 MIME 타입 여부
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// multipart 본문에서 업로드 이미지 추출
///
/// - 설정된 필드가 없거나, 파일 이름이 없거나, 비어 있으면 `No image file provided`
/// - `image/*`가 아니면 거부
/// - 최대 크기를 넘으면 읽기를 중단하고 거부
pub async fn accept_upload(
    mut multipart: Multipart,
    config: &UploadConfig,
) -> Result<UploadedImage, ApiError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, config))?
    {
        if field.name() != Some(config.field_name.as_str()) {
            debug!(name = ?field.name(), "알 수 없는 multipart 필드 무시");
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        // 파일 미선택 시 브라우저는 filename=""과 application/octet-stream 빈 파트를 보낸다
        if file_name.is_empty() {
            return Err(ApiError::no_image());
        }

        if !is_image_content_type(&content_type) {
            warn!(file = %file_name, content_type = %content_type, "이미지가 아닌 업로드 거부");
            return Err(ApiError::BadRequest(NOT_IMAGE_MESSAGE.to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, config))?
        {
            if (bytes.len() + chunk.len()) as u64 > config.max_bytes {
                warn!(file = %file_name, limit = config.max_bytes, "업로드 크기 초과");
                return Err(ApiError::too_large(config.max_megabytes()));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(ApiError::no_image());
        }

        return Ok(UploadedImage {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(ApiError::no_image())
}

/// multipart 파싱 에러 → API 에러
///
/// 본문 크기 제한(413)은 크기 초과 메시지로 통일한다.
fn multipart_error(err: MultipartError, config: &UploadConfig) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(limit = config.max_bytes, "요청 본문 크기 제한 초과");
        return ApiError::too_large(config.max_megabytes());
    }
    ApiError::BadRequest(err.body_text())
}
