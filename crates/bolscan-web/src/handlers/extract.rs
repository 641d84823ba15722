//! 이미지 추출 핸들러.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};

use bolscan_core::models::ExtractionResult;

use crate::error::ApiError;
use crate::scratch::ScratchFile;
use crate::upload::accept_upload;
use crate::AppState;

/// 추출 성공 응답
#[derive(Debug, Serialize)]
pub struct ProcessImageResponse {
    pub success: bool,
    pub data: ExtractionResult,
}

/// BOL 이미지에서 필드 추출
///
/// POST /api/process-image (multipart, 필드 `image`)
///
/// 업로드 검증 → 임시 저장 → OCR → 비전 LLM → 파싱 → 임시 파일 삭제.
/// 임시 파일은 `ScratchFile` 가드가 모든 종료 경로에서 삭제한다.
pub async fn process_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        warn!("multipart 요청 아님: {rejection}");
        ApiError::no_image()
    })?;

    let upload_config = &state.config.upload;
    let image = accept_upload(multipart, upload_config).await?;
    info!(
        file = %image.file_name,
        content_type = %image.content_type,
        size = image.len(),
        "이미지 수신"
    );

    let scratch = ScratchFile::create(&upload_config.scratch_dir, &image.file_name, &image.bytes)
        .await
        .map_err(|e| {
            error!("임시 업로드 저장 실패: {e}");
            ApiError::processing(e)
        })?;

    let outcome = state.pipeline.run(scratch.path(), &image).await;
    scratch.remove().await;

    match outcome {
        Ok(result) => {
            info!(
                file = %image.file_name,
                bol_found = result.fields.bol_number.is_some(),
                weight_found = result.fields.weight.is_some(),
                "추출 완료"
            );
            Ok(Json(ProcessImageResponse {
                success: true,
                data: result,
            }))
        }
        Err(e) => {
            error!(stage = e.stage(), file = %image.file_name, "추출 실패: {e}");
            Err(ApiError::processing(e))
        }
    }
}
