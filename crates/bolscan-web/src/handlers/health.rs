//! 헬스 체크 핸들러.

use axum::Json;
use serde::Serialize;

/// 헬스 체크 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// 서버 생존 확인 (추출 파이프라인과 무관)
///
/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
    })
}
